//! State Machine Runtime
//!
//! Flat statecharts for UI interaction states.
//! Supports:
//! - Typed states and events (any `Copy + Eq + Hash` type)
//! - Guards (conditional transitions)
//! - Bounded transition history
//!
//! A request that has no matching transition from the current state is a
//! no-op, so a machine without self-loops is idempotent by construction.

use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

/// Default number of transitions kept in history
pub const DEFAULT_HISTORY_LIMIT: usize = 32;

/// Marker for types usable as states or events
pub trait StateKey: Copy + Eq + Hash + Debug + 'static {}

impl<T: Copy + Eq + Hash + Debug + 'static> StateKey for T {}

/// A guard function that determines if a transition should occur
pub type Guard = Box<dyn Fn() -> bool + Send>;

/// A transition in the state machine
pub struct Transition<S, E> {
    pub from_state: S,
    pub event: E,
    pub to_state: S,
    pub guard: Option<Guard>,
}

impl<S: StateKey, E: StateKey> Transition<S, E> {
    /// Create a simple transition without a guard
    pub fn new(from: S, event: E, to: S) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
            guard: None,
        }
    }

    /// Add a guard condition
    pub fn with_guard<F: Fn() -> bool + Send + 'static>(mut self, guard: F) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }

    fn accepts(&self, state: S, event: E) -> bool {
        self.from_state == state
            && self.event == event
            && self.guard.as_ref().map_or(true, |guard| guard())
    }
}

/// A transition that actually fired
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionRecord<S, E> {
    pub from: S,
    pub event: E,
    pub to: S,
}

/// Builder for creating state machines
pub struct StateMachineBuilder<S, E> {
    initial_state: S,
    transitions: SmallVec<[Transition<S, E>; 4]>,
    history_limit: usize,
}

impl<S: StateKey, E: StateKey> StateMachineBuilder<S, E> {
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            transitions: SmallVec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Add a transition
    pub fn transition(mut self, transition: Transition<S, E>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add a simple transition (from, event, to)
    pub fn on(mut self, from: S, event: E, to: S) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    /// Cap the number of history entries retained (0 disables history)
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Build the state machine
    pub fn build(self) -> StateMachine<S, E> {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
            history: Vec::new(),
            history_limit: self.history_limit,
        }
    }
}

/// A state machine instance
pub struct StateMachine<S, E> {
    current_state: S,
    transitions: SmallVec<[Transition<S, E>; 4]>,
    /// History of state transitions (for debugging)
    history: Vec<TransitionRecord<S, E>>,
    history_limit: usize,
}

impl<S: StateKey, E: StateKey> StateMachine<S, E> {
    /// Create a new state machine with an initial state and transitions
    pub fn new(initial_state: S, transitions: Vec<Transition<S, E>>) -> Self {
        Self {
            current_state: initial_state,
            transitions: transitions.into_iter().collect(),
            history: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Create a builder for a state machine
    pub fn builder(initial_state: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder::new(initial_state)
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Get transition history, oldest first
    pub fn history(&self) -> &[TransitionRecord<S, E>] {
        &self.history
    }

    /// Send an event to the state machine.
    ///
    /// Returns the fired transition, or `None` when the event is not
    /// accepted in the current state (the state is left untouched).
    pub fn send(&mut self, event: E) -> Option<TransitionRecord<S, E>> {
        let current = self.current_state;
        let to = self
            .transitions
            .iter()
            .find(|t| t.accepts(current, event))
            .map(|t| t.to_state)?;

        self.current_state = to;

        let record = TransitionRecord {
            from: current,
            event,
            to,
        };
        self.record(record);
        tracing::trace!(from = ?current, event = ?event, to = ?to, "fsm transition");

        Some(record)
    }

    fn record(&mut self, record: TransitionRecord<S, E>) {
        if self.history_limit == 0 {
            return;
        }
        if self.history.len() == self.history_limit {
            self.history.remove(0);
        }
        self.history.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Panel {
        Hidden,
        Shown,
        Pinned,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Cmd {
        Show,
        Hide,
        Pin,
    }

    fn panel_fsm() -> StateMachine<Panel, Cmd> {
        StateMachine::new(
            Panel::Hidden,
            vec![
                Transition::new(Panel::Hidden, Cmd::Show, Panel::Shown),
                Transition::new(Panel::Shown, Cmd::Hide, Panel::Hidden),
                Transition::new(Panel::Shown, Cmd::Pin, Panel::Pinned),
            ],
        )
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = panel_fsm();
        assert_eq!(fsm.current_state(), Panel::Hidden);

        fsm.send(Cmd::Show);
        assert_eq!(fsm.current_state(), Panel::Shown);

        fsm.send(Cmd::Hide);
        assert_eq!(fsm.current_state(), Panel::Hidden);

        fsm.send(Cmd::Show);
        fsm.send(Cmd::Pin);
        assert!(fsm.is_in(Panel::Pinned));
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = panel_fsm();

        // Hide is not valid while hidden
        assert!(fsm.send(Cmd::Hide).is_none());
        assert_eq!(fsm.current_state(), Panel::Hidden);
        assert!(fsm.history().is_empty());
    }

    #[test]
    fn test_repeated_event_is_noop() {
        let mut fsm = panel_fsm();

        let first = fsm.send(Cmd::Show);
        let second = fsm.send(Cmd::Show);

        assert_eq!(
            first,
            Some(TransitionRecord {
                from: Panel::Hidden,
                event: Cmd::Show,
                to: Panel::Shown
            })
        );
        assert!(second.is_none());
        assert_eq!(fsm.history().len(), 1);
    }

    #[test]
    fn test_guard_conditions() {
        let enabled = Arc::new(AtomicBool::new(true));
        let enabled_clone = enabled.clone();

        let mut fsm = StateMachine::builder(Panel::Hidden)
            .transition(
                Transition::new(Panel::Hidden, Cmd::Show, Panel::Shown)
                    .with_guard(move || enabled_clone.load(Ordering::SeqCst)),
            )
            .on(Panel::Shown, Cmd::Hide, Panel::Hidden)
            .build();

        // Guard passes - transition happens
        fsm.send(Cmd::Show);
        assert_eq!(fsm.current_state(), Panel::Shown);
        fsm.send(Cmd::Hide);

        // Guard fails - no transition
        enabled.store(false, Ordering::SeqCst);
        assert!(fsm.send(Cmd::Show).is_none());
        assert_eq!(fsm.current_state(), Panel::Hidden);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut fsm = StateMachine::builder(Panel::Hidden)
            .on(Panel::Hidden, Cmd::Show, Panel::Shown)
            .on(Panel::Shown, Cmd::Hide, Panel::Hidden)
            .history_limit(3)
            .build();

        for _ in 0..5 {
            fsm.send(Cmd::Show);
            fsm.send(Cmd::Hide);
        }

        let history = fsm.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[2].to, Panel::Hidden);
        assert_eq!(history[1].to, Panel::Shown);
    }
}
