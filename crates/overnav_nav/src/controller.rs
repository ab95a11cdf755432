//! Overlay navigation controller
//!
//! Owns the open/closed state of the mobile navigation overlay and the
//! scroll anchor for one open/close cycle.
//!
//! Every transition has a synchronous half and exactly one deferred frame
//! half:
//!
//! | Transition       | Synchronous                               | Next frame            |
//! |------------------|-------------------------------------------|-----------------------|
//! | `Closed -> Open` | capture anchor, lock scroll, state `open` | reveal overlay        |
//! | `Open -> Closed` | hide overlay, unlock, state `closed`      | reapply anchor        |
//!
//! The host calls [`OverlayNavController::on_frame`] once per rendered frame.
//!
//! # Example
//!
//! ```rust
//! use overnav_nav::{NavConfig, OverlayNavController, NoScrollContainer};
//!
//! let mut host = NoScrollContainer;
//! let mut nav = OverlayNavController::new(NavConfig::default());
//!
//! assert!(nav.open(&mut host, 0));
//! assert!(!nav.open(&mut host, 5)); // already open
//! nav.on_frame(&mut host, 16);
//! assert_eq!(nav.data_state(), "open");
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use overnav_core::events::{event_types, Event, EventData, EventDispatcher, KeyCode};
use overnav_core::frame::{FrameCallbackId, FrameInfo, FrameScheduler};
use overnav_core::fsm::{StateMachine, Transition, TransitionRecord};
use slotmap::{new_key_type, SlotMap};
use tracing::{debug, trace};

use crate::config::NavConfig;
use crate::scroll::{ScrollAnchor, ScrollHost, ScrollLock};
use crate::state::{Control, NavAttributes, NavRequest, NavigationState};

new_key_type! {
    /// Handle returned by [`OverlayNavController::subscribe`]
    pub struct SubscriptionId;
}

/// State change listener
pub type StateListener = Box<dyn FnMut(NavigationState)>;

/// Work deferred to the frame after a transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Deferred {
    Reveal,
    Restore,
}

/// Request and settle time of one transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionTiming {
    /// State the transition entered
    pub target: NavigationState,
    pub requested_at_ms: u64,
    pub settled_at_ms: u64,
    /// Settled early because the opposite request arrived first
    pub superseded: bool,
}

impl TransitionTiming {
    pub fn duration_ms(&self) -> u64 {
        self.settled_at_ms.saturating_sub(self.requested_at_ms)
    }

    /// Duration of a transition that ran its own frame work, `None` if superseded
    pub fn completed_ms(&self) -> Option<u64> {
        (!self.superseded).then(|| self.duration_ms())
    }
}

#[derive(Debug, Default)]
struct TimingLog {
    in_flight: Option<(NavigationState, u64)>,
    last_open: Option<TransitionTiming>,
    last_close: Option<TransitionTiming>,
}

impl TimingLog {
    fn begin(&mut self, target: NavigationState, now_ms: u64) {
        self.in_flight = Some((target, now_ms));
    }

    fn settle(&mut self, now_ms: u64, superseded: bool) {
        let Some((target, requested_at_ms)) = self.in_flight.take() else {
            return;
        };
        let timing = TransitionTiming {
            target,
            requested_at_ms,
            settled_at_ms: now_ms.max(requested_at_ms),
            superseded,
        };
        match target {
            NavigationState::Open => self.last_open = Some(timing),
            NavigationState::Closed => self.last_close = Some(timing),
        }
    }
}

/// Mobile navigation overlay controller
pub struct OverlayNavController {
    config: NavConfig,
    fsm: StateMachine<NavigationState, NavRequest>,
    inputs: EventDispatcher<NavRequest>,
    frames: FrameScheduler<Deferred>,
    pending: Option<FrameCallbackId>,
    anchor: Option<ScrollAnchor>,
    lock: ScrollLock,
    overlay_visible: bool,
    /// Cleared when the viewport is at or above the breakpoint
    available: Arc<AtomicBool>,
    timings: TimingLog,
    listeners: SlotMap<SubscriptionId, StateListener>,
}

impl OverlayNavController {
    pub fn new(config: NavConfig) -> Self {
        let available = Arc::new(AtomicBool::new(true));
        let guard = Arc::clone(&available);

        let fsm = StateMachine::builder(NavigationState::Closed)
            .transition(
                Transition::new(NavigationState::Closed, NavRequest::Open, NavigationState::Open)
                    .with_guard(move || guard.load(Ordering::Acquire)),
            )
            .on(NavigationState::Open, NavRequest::Close, NavigationState::Closed)
            .history_limit(config.history_limit)
            .build();

        let inputs = Self::bind_inputs(&config);

        Self {
            config,
            fsm,
            inputs,
            frames: FrameScheduler::new(),
            pending: None,
            anchor: None,
            lock: ScrollLock::new(),
            overlay_visible: false,
            available,
            timings: TimingLog::default(),
            listeners: SlotMap::with_key(),
        }
    }

    fn bind_inputs(config: &NavConfig) -> EventDispatcher<NavRequest> {
        let mut inputs = EventDispatcher::new();

        for (control, request) in [
            (Control::OpenMenu, NavRequest::Open),
            (Control::CloseMenu, NavRequest::Close),
        ] {
            inputs.bind(control.id(), event_types::POINTER_UP, request);
            inputs.bind_key(control.id(), KeyCode::ENTER, request);
            inputs.bind_key(control.id(), KeyCode::SPACE, request);
        }
        if config.dismiss_on_backdrop {
            inputs.bind(Control::Backdrop.id(), event_types::POINTER_UP, NavRequest::Close);
        }
        if config.dismiss_on_escape {
            inputs.bind_global_key(KeyCode::ESCAPE, NavRequest::Close);
        }

        inputs
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Current state
    pub fn state(&self) -> NavigationState {
        self.fsm.current_state()
    }

    pub fn is_open(&self) -> bool {
        self.fsm.is_in(NavigationState::Open)
    }

    /// Value of the `data-state` attribute
    pub fn data_state(&self) -> &'static str {
        self.state().as_str()
    }

    /// Observable attributes for tests and assistive tooling
    pub fn attributes(&self) -> NavAttributes {
        NavAttributes {
            state: self.state(),
            visible: self.overlay_visible,
        }
    }

    /// Overlay panel has been revealed
    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// Anchor of the current cycle (kept until its restore frame runs)
    pub fn anchor(&self) -> Option<ScrollAnchor> {
        self.anchor
    }

    /// This controller holds the background scroll lock
    pub fn holds_scroll_lock(&self) -> bool {
        self.lock.is_engaged()
    }

    /// No deferred frame work outstanding
    pub fn is_settled(&self) -> bool {
        self.pending.is_none()
    }

    /// Overlay can currently be opened (viewport below the breakpoint)
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Acquire)
    }

    pub fn last_open_timing(&self) -> Option<TransitionTiming> {
        self.timings.last_open
    }

    pub fn last_close_timing(&self) -> Option<TransitionTiming> {
        self.timings.last_close
    }

    /// Absolute difference between the last open and close durations.
    /// `None` unless both ran to completion.
    pub fn symmetry_delta_ms(&self) -> Option<u64> {
        let open = self.timings.last_open?.completed_ms()?;
        let close = self.timings.last_close?.completed_ms()?;
        Some(open.abs_diff(close))
    }

    /// Recent transitions, oldest first
    pub fn history(&self) -> &[TransitionRecord<NavigationState, NavRequest>] {
        self.fsm.history()
    }

    /// Register a listener called after every state change
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(NavigationState) + 'static,
    {
        self.listeners.insert(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id).is_some()
    }

    /// Open the overlay. Returns false if nothing changed.
    pub fn open<H: ScrollHost + ?Sized>(&mut self, host: &mut H, now_ms: u64) -> bool {
        if self.fsm.send(NavRequest::Open).is_none() {
            trace!(state = %self.state(), available = self.is_available(), "open ignored");
            return false;
        }

        // A close whose restore has not run yet leaves the page at a stale
        // offset; its anchor still describes where the user really was.
        let carried = match self.cancel_pending() {
            Some(Deferred::Restore) => self.anchor,
            _ => None,
        };
        self.timings.settle(now_ms, true);

        self.anchor = carried.or_else(|| ScrollAnchor::capture(host));
        if self.anchor.is_none() {
            debug!("no scroll container; opening without anchor");
        }
        if self.config.lock_scroll {
            self.lock.engage(host);
        }

        self.pending = Some(self.frames.schedule(Deferred::Reveal));
        self.timings.begin(NavigationState::Open, now_ms);

        debug!(
            anchor = ?self.anchor.map(|a| a.offset()),
            carried = carried.is_some(),
            "navigation opened"
        );
        self.notify();
        true
    }

    /// Close the overlay. Returns false if nothing changed.
    pub fn close<H: ScrollHost + ?Sized>(&mut self, host: &mut H, now_ms: u64) -> bool {
        if self.fsm.send(NavRequest::Close).is_none() {
            trace!(state = %self.state(), "close ignored");
            return false;
        }

        if let Some(stale) = self.cancel_pending() {
            trace!(?stale, "cancelled pending frame work");
        }
        self.timings.settle(now_ms, true);

        self.overlay_visible = false;
        self.lock.release(host);

        self.pending = Some(self.frames.schedule(Deferred::Restore));
        self.timings.begin(NavigationState::Closed, now_ms);

        debug!(anchor = ?self.anchor.map(|a| a.offset()), "navigation closed");
        self.notify();
        true
    }

    /// Open when closed, close when open
    pub fn toggle<H: ScrollHost + ?Sized>(&mut self, host: &mut H, now_ms: u64) -> bool {
        match self.state() {
            NavigationState::Closed => self.open(host, now_ms),
            NavigationState::Open => self.close(host, now_ms),
        }
    }

    /// Route an input event. Returns true if it changed the state.
    pub fn handle_event<H: ScrollHost + ?Sized>(&mut self, host: &mut H, event: &Event) -> bool {
        if let EventData::Resize { width, .. } = event.data {
            return self.handle_resize(host, width, event.timestamp);
        }
        if event.is_repeat() {
            return false;
        }

        let Some(request) = self.inputs.resolve(event).first().copied() else {
            return false;
        };
        match request {
            NavRequest::Open => self.open(host, event.timestamp),
            NavRequest::Close => self.close(host, event.timestamp),
        }
    }

    fn handle_resize<H>(&mut self, host: &mut H, width: f32, now_ms: u64) -> bool
    where
        H: ScrollHost + ?Sized,
    {
        let available = width < self.config.breakpoint_width;
        if self.available.swap(available, Ordering::AcqRel) != available {
            debug!(width, available, "navigation availability changed");
        }
        if !available && self.is_open() {
            return self.close(host, now_ms);
        }
        false
    }

    /// Run deferred work for a new frame
    pub fn on_frame<H>(&mut self, host: &mut H, timestamp_ms: u64) -> FrameInfo
    where
        H: ScrollHost + ?Sized,
    {
        let (frame, due) = self.frames.advance(timestamp_ms);

        for (id, work) in due {
            if self.pending == Some(id) {
                self.pending = None;
            }
            match work {
                Deferred::Reveal => {
                    self.overlay_visible = true;
                    trace!(frame = frame.index, "overlay revealed");
                }
                Deferred::Restore => {
                    if let Some(anchor) = self.anchor.take() {
                        let applied = anchor.restore(host);
                        debug!(
                            frame = frame.index,
                            offset = anchor.offset(),
                            applied,
                            "scroll anchor restored"
                        );
                    }
                }
            }
            self.timings.settle(timestamp_ms, false);
        }

        frame
    }

    fn cancel_pending(&mut self) -> Option<Deferred> {
        let id = self.pending.take()?;
        self.frames.cancel(id)
    }

    fn notify(&mut self) {
        let state = self.state();
        for (_, listener) in self.listeners.iter_mut() {
            listener(state);
        }
    }
}

impl Default for OverlayNavController {
    fn default() -> Self {
        Self::new(NavConfig::default())
    }
}
