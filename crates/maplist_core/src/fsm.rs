//! State machine support
//!
//! Typed transition tables for widget interaction states. A widget defines
//! its own state enum, implements [`StateTransitions`] to map events to
//! transitions, and wraps it in a [`StateMachine`] to get event sending and
//! transition history.

use crate::events::EventType;

/// Trait for widget state types that can handle event transitions
///
/// Implement this trait on your state enum to define how events cause
/// state transitions. Returning `None` means the event is ignored in the
/// current state.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// enum PickerState {
///     #[default]
///     Default,
///     Expanding,
///     FullScreen,
///     Collapsing,
/// }
///
/// impl StateTransitions for PickerState {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         use maplist_core::events::event_types::*;
///         match (self, event) {
///             (PickerState::Default, EXPAND) => Some(PickerState::Expanding),
///             (PickerState::Expanding, SETTLED) => Some(PickerState::FullScreen),
///             (PickerState::FullScreen, COLLAPSE) => Some(PickerState::Collapsing),
///             (PickerState::Collapsing, SETTLED) => Some(PickerState::Default),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// A state machine instance wrapping a [`StateTransitions`] state type
pub struct StateMachine<S: StateTransitions> {
    current: S,
    /// History of state transitions (for debugging)
    history: Vec<(S, EventType, S)>,
}

impl<S: StateTransitions> StateMachine<S> {
    /// Create a new state machine with an initial state
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
        }
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Check if an event would trigger a transition from the current state
    pub fn can_send(&self, event: EventType) -> bool {
        self.current.on_event(event).is_some()
    }

    /// Send an event to the state machine, potentially triggering a transition
    ///
    /// Returns the state after the event: unchanged if the event is ignored
    /// in the current state.
    pub fn send(&mut self, event: EventType) -> S {
        let from = self.current;
        let Some(to) = from.on_event(event) else {
            tracing::trace!("fsm ignored event={} in state={:?}", event, from);
            return from;
        };

        self.current = to;
        self.history.push((from, event, to));
        tracing::trace!("fsm {:?} --{}--> {:?}", from, event, to);
        to
    }

    /// Get transition history
    pub fn history(&self) -> &[(S, EventType, S)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
