//! Named application modes.
//!
//! A [`State`] is a coarse mode of the game (menu, arena, pause, HUD) with
//! its own update/draw and enter/exit hooks. States are registered into a
//! [`StateManager`](super::statemanager::StateManager), which decides which of
//! them run each frame from the flags in their [`StateInfo`]:
//!
//! - `active` – set by the manager while the state is the current one
//! - `persistent_update` – keep receiving `update` while not current
//! - `persistent_draw` – keep receiving `draw` while not current
//! - `keep_registered` – stay in the registry after being switched away from;
//!   when `false` the state is single-use and must be re-added to be entered
//!   again
//!
//! # Example
//!
//! ```ignore
//! struct Pause { info: StateInfo }
//!
//! impl State for Pause {
//!     fn info(&self) -> &StateInfo { &self.info }
//!     fn info_mut(&mut self) -> &mut StateInfo { &mut self.info }
//!     fn on_enter(&mut self, from: Option<&str>) { /* ... */ }
//!     fn on_exit(&mut self, to: &str) { /* ... */ }
//!     fn update(&mut self, _dt: f32) {}
//!     fn draw(&self, renderer: &mut dyn Renderer) { renderer.print("PAUSED", 8.0, 8.0); }
//! }
//! ```

use crate::resources::renderer::Renderer;

/// Name and scheduling flags of a state.
///
/// The name is fixed at construction and is the state's key in its manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateInfo {
    name: String,
    pub active: bool,
    pub persistent_update: bool,
    pub persistent_draw: bool,
    pub keep_registered: bool,
}

impl StateInfo {
    /// Inactive, non-persistent, kept registered.
    pub fn new(name: impl Into<String>) -> Self {
        StateInfo {
            name: name.into(),
            active: false,
            persistent_update: false,
            persistent_draw: false,
            keep_registered: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_persistent_update(mut self, persistent: bool) -> Self {
        self.persistent_update = persistent;
        self
    }

    pub fn with_persistent_draw(mut self, persistent: bool) -> Self {
        self.persistent_draw = persistent;
        self
    }

    pub fn with_keep_registered(mut self, keep: bool) -> Self {
        self.keep_registered = keep;
        self
    }

    pub fn runs_update(&self) -> bool {
        self.active || self.persistent_update
    }

    pub fn runs_draw(&self) -> bool {
        self.active || self.persistent_draw
    }
}

/// A named, independently activatable mode of the application.
pub trait State {
    fn info(&self) -> &StateInfo;
    fn info_mut(&mut self) -> &mut StateInfo;

    fn name(&self) -> &str {
        self.info().name()
    }

    /// Called once when the state becomes current. `from` is the previous
    /// current state, if any.
    fn on_enter(&mut self, from: Option<&str>);

    /// Called once when another state replaces this one as current.
    fn on_exit(&mut self, to: &str);

    fn update(&mut self, dt: f32);

    fn draw(&self, renderer: &mut dyn Renderer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_info_defaults() {
        let info = StateInfo::new("arena");
        assert_eq!(info.name(), "arena");
        assert!(!info.active);
        assert!(!info.persistent_update);
        assert!(!info.persistent_draw);
        assert!(info.keep_registered);
        assert!(!info.runs_update());
        assert!(!info.runs_draw());
    }

    #[test]
    fn test_state_info_flags() {
        let info = StateInfo::new("hud")
            .with_persistent_update(true)
            .with_keep_registered(false);
        assert!(info.runs_update());
        assert!(!info.runs_draw());
        assert!(!info.keep_registered);

        let mut info = StateInfo::new("menu").with_persistent_draw(true);
        assert!(info.runs_draw());
        info.active = true;
        assert!(info.runs_update());
    }
}
