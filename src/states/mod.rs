//! Named game modes and the manager that switches between them.
//!
//! [`state`] declares the [`State`](state::State) trait and its flags,
//! [`statemanager`] owns registered states and dispatches frames to them.
//! The concrete modes of the game live alongside: [`menu`], [`arena`],
//! [`pause`] and the always-on [`hud`] overlay.

pub mod arena;
pub mod error;
pub mod hud;
pub mod menu;
pub mod pause;
pub mod state;
pub mod statemanager;
