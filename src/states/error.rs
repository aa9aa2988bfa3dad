//! State machine errors.

use thiserror::Error;

/// Errors returned by [`StateManager`](super::statemanager::StateManager).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Switch target was given by name and no state with that name is registered.
    #[error("state not found: {0}")]
    NotFound(String),
}
