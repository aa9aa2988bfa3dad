//! Applies pending state transitions.

use log::warn;

use crate::resources::gamestate::NextGameState;
use crate::states::error::StateError;
use crate::states::state::State;
use crate::states::statemanager::{StateManager, StateRef};

/// Apply the transition requested through `next_state`, if any.
///
/// A requested name that is not registered is offered to `make_state`, which
/// may build a fresh instance (single-use states are evicted on exit and
/// come back this way). Returns the name switched to.
pub fn check_pending_state(
    manager: &mut StateManager,
    next_state: &NextGameState,
    make_state: impl FnOnce(&str) -> Option<Box<dyn State>>,
) -> Result<Option<String>, StateError> {
    let Some(name) = next_state.take() else {
        return Ok(None);
    };

    let target = if manager.contains(&name) {
        StateRef::from(name.as_str())
    } else {
        match make_state(&name) {
            Some(state) => StateRef::from(state),
            None => StateRef::from(name.as_str()),
        }
    };

    if let Err(e) = manager.switch_state(target) {
        warn!("dropping transition request: {}", e);
        return Err(e);
    }
    Ok(Some(name))
}
