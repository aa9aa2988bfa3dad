//! Pending state transition requests.
//!
//! States cannot reach their [`StateManager`](crate::states::statemanager::StateManager)
//! while it is dispatching to them, so they request a transition through a
//! [`NextGameState`] handle instead. The frame driver applies the request
//! after the update pass, see
//! [`check_pending_state`](crate::systems::gamestate::check_pending_state).

use std::cell::RefCell;
use std::rc::Rc;

/// Representation of a requested next state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(String),
}

/// Shared intent to change to another named state.
///
/// Clones share the same request slot. The last `set` in a frame wins.
#[derive(Debug, Clone, Default)]
pub struct NextGameState {
    next: Rc<RefCell<NextGameStates>>,
}

impl NextGameState {
    /// Create a new handle initialized to [`NextGameStates::Unchanged`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of the current transition request.
    pub fn get(&self) -> NextGameStates {
        self.next.borrow().clone()
    }

    /// Request a transition to `next` by marking it as pending.
    pub fn set(&self, next: impl Into<String>) {
        *self.next.borrow_mut() = NextGameStates::Pending(next.into());
    }

    /// Take the pending request, resetting to [`NextGameStates::Unchanged`].
    pub fn take(&self) -> Option<String> {
        match std::mem::take(&mut *self.next.borrow_mut()) {
            NextGameStates::Pending(name) => Some(name),
            NextGameStates::Unchanged => None,
        }
    }

    /// Reset to [`NextGameStates::Unchanged`].
    pub fn reset(&self) {
        *self.next.borrow_mut() = NextGameStates::Unchanged;
    }
}
