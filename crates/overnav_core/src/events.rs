//! Event dispatch system
//!
//! Platform-neutral input events and a binding table that resolves them to
//! component-level actions.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::{CoreError, Result};

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_UP: EventType = 2;
    pub const KEY_DOWN: EventType = 20;
    pub const RESIZE: EventType = 40;
}

/// Target id used for events that are not aimed at a specific control
pub const DOCUMENT_TARGET: u64 = 0;

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: u64, // Control ID
    pub data: EventData,
    /// Milliseconds on the host clock
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer { x: f32, y: f32 },
    Key { key: KeyCode, repeat: bool },
    Resize { width: f32, height: f32 },
}

impl Event {
    /// Pointer release on a control (a click)
    pub fn pointer_up(target: u64, timestamp: u64) -> Self {
        Self {
            event_type: event_types::POINTER_UP,
            target,
            data: EventData::Pointer { x: 0.0, y: 0.0 },
            timestamp,
        }
    }

    /// Key press delivered to a control (or the document)
    pub fn key_down(target: u64, key: KeyCode, timestamp: u64) -> Self {
        Self {
            event_type: event_types::KEY_DOWN,
            target,
            data: EventData::Key { key, repeat: false },
            timestamp,
        }
    }

    /// Viewport resize
    pub fn resize(width: f32, height: f32, timestamp: u64) -> Self {
        Self {
            event_type: event_types::RESIZE,
            target: DOCUMENT_TARGET,
            data: EventData::Resize { width, height },
            timestamp,
        }
    }

    /// Key carried by a key event, if any
    pub fn key(&self) -> Option<KeyCode> {
        match self.data {
            EventData::Key { key, .. } => Some(key),
            _ => None,
        }
    }

    /// True for key auto-repeat events
    pub fn is_repeat(&self) -> bool {
        matches!(self.data, EventData::Key { repeat: true, .. })
    }
}

/// Virtual key codes (platform-agnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);

    // Unknown/unmapped key
    pub const UNKNOWN: KeyCode = KeyCode(0);

    /// Resolve a DOM-style key name (`"Escape"`, `"Enter"`, `" "`, ...)
    pub fn from_name(name: &str) -> Result<KeyCode> {
        match name {
            "Enter" => Ok(Self::ENTER),
            "Escape" | "Esc" => Ok(Self::ESCAPE),
            " " | "Space" | "Spacebar" => Ok(Self::SPACE),
            other => Err(CoreError::UnknownKey(other.to_string())),
        }
    }
}

/// Match rule for a binding
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Binding<A> {
    /// `None` matches any target
    target: Option<u64>,
    /// `None` matches any key (and non-key events)
    key: Option<KeyCode>,
    action: A,
}

impl<A> Binding<A> {
    fn matches(&self, event: &Event) -> bool {
        self.target.map_or(true, |t| t == event.target)
            && self.key.map_or(true, |k| event.key() == Some(k))
    }
}

/// Resolves events to actions registered per (target, event type, key)
pub struct EventDispatcher<A> {
    bindings: FxHashMap<EventType, Vec<Binding<A>>>,
}

impl<A: Copy> EventDispatcher<A> {
    pub fn new() -> Self {
        Self {
            bindings: FxHashMap::default(),
        }
    }

    /// Bind an action to an event type on a specific control
    pub fn bind(&mut self, target: u64, event_type: EventType, action: A) {
        let binding = Binding {
            target: Some(target),
            key: None,
            action,
        };
        self.push(event_type, binding);
    }

    /// Bind an action to a key press on a specific control
    pub fn bind_key(&mut self, target: u64, key: KeyCode, action: A) {
        let binding = Binding {
            target: Some(target),
            key: Some(key),
            action,
        };
        self.push(event_types::KEY_DOWN, binding);
    }

    /// Bind an action to a key press regardless of focus
    pub fn bind_global_key(&mut self, key: KeyCode, action: A) {
        let binding = Binding {
            target: None,
            key: Some(key),
            action,
        };
        self.push(event_types::KEY_DOWN, binding);
    }

    fn push(&mut self, event_type: EventType, binding: Binding<A>) {
        self.bindings.entry(event_type).or_default().push(binding);
    }

    /// All actions bound to this event, in registration order
    pub fn resolve(&self, event: &Event) -> SmallVec<[A; 2]> {
        self.bindings
            .get(&event.event_type)
            .map(|bindings| {
                bindings
                    .iter()
                    .filter(|b| b.matches(event))
                    .map(|b| b.action)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of registered bindings
    pub fn len(&self) -> usize {
        self.bindings.values().map(Vec::len).sum()
    }

    /// Check if no bindings are registered
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<A: Copy> Default for EventDispatcher<A> {
    fn default() -> Self {
        Self::new()
    }
}
