//! Registry of named states and per-frame dispatch.
//!
//! The [`StateManager`] owns every registered [`State`] in insertion order and
//! tracks which one is current. Each frame:
//!
//! - [`StateManager::update`] updates every state that is active or has
//!   `persistent_update`, then the transition group
//! - [`StateManager::draw`] draws every state that is active or has
//!   `persistent_draw`, then the transition group on top
//!
//! [`StateManager::switch_state`] resolves the target first and only then
//! touches anything, so a failed switch leaves the manager exactly as it was.
//!
//! Transition effects (fades, wipes) are plain [`Updatable`] entities added
//! with [`StateManager::add_transition`]; they die on their own and the
//! manager's group reclaims them.

use log::{debug, info};

use crate::resources::group::{Group, Updatable};
use crate::resources::renderer::Renderer;
use crate::states::error::StateError;
use crate::states::state::State;

/// Target of a [`StateManager::switch_state`] call.
pub enum StateRef {
    /// A state that must already be registered.
    Name(String),
    /// A state instance, registered (replacing any state with the same name)
    /// as part of the switch.
    Instance(Box<dyn State>),
}

impl From<&str> for StateRef {
    fn from(name: &str) -> Self {
        StateRef::Name(name.to_string())
    }
}

impl From<String> for StateRef {
    fn from(name: String) -> Self {
        StateRef::Name(name)
    }
}

impl From<Box<dyn State>> for StateRef {
    fn from(state: Box<dyn State>) -> Self {
        StateRef::Instance(state)
    }
}

impl std::fmt::Debug for StateRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateRef::Name(name) => f.debug_tuple("Name").field(name).finish(),
            StateRef::Instance(state) => f.debug_tuple("Instance").field(&state.name()).finish(),
        }
    }
}

#[derive(Default)]
pub struct StateManager {
    states: Vec<Box<dyn State>>,
    current: Option<String>,
    transitions: Group<Box<dyn Updatable>>,
}

impl std::fmt::Debug for StateManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateManager")
            .field("states", &self.names().collect::<Vec<_>>())
            .field("current", &self.current)
            .field("transitions", &self.transitions.len())
            .finish()
    }
}

impl StateManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.states.iter().position(|s| s.name() == name)
    }

    /// Register `state`. A state with the same name is replaced in place and
    /// keeps its registry position.
    pub fn add(&mut self, state: Box<dyn State>) {
        match self.index_of(state.name()) {
            Some(idx) => {
                debug!("replacing registered state '{}'", state.name());
                self.states[idx] = state;
            }
            None => {
                debug!("registering state '{}'", state.name());
                self.states.push(state);
            }
        }
    }

    /// Unregister and return the state called `name`. Removing the current
    /// state leaves the manager without one; no hooks run.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn State>> {
        let idx = self.index_of(name)?;
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        Some(self.states.remove(idx))
    }

    pub fn get_state(&self, name: &str) -> Option<&dyn State> {
        for state in self.states.iter() {
            if state.name() == name {
                return Some(state.as_ref());
            }
        }
        None
    }

    pub fn get_state_mut(&mut self, name: &str) -> Option<&mut dyn State> {
        for state in self.states.iter_mut() {
            if state.name() == name {
                return Some(state.as_mut());
            }
        }
        None
    }

    /// Name of the current state, if a switch has happened.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Registered state names in dispatch order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|s| s.name())
    }

    /// Make `next` the current state.
    ///
    /// The outgoing state (if active) gets `on_exit` with the incoming name
    /// and is deactivated, then dropped from the registry unless it has
    /// `keep_registered`. The incoming state is activated and gets `on_enter`
    /// with the outgoing name. Re-entering the current state runs both hooks.
    pub fn switch_state(&mut self, next: impl Into<StateRef>) -> Result<(), StateError> {
        let (next_name, instance) = match next.into() {
            StateRef::Name(name) => {
                if !self.contains(&name) {
                    return Err(StateError::NotFound(name));
                }
                (name, None)
            }
            StateRef::Instance(state) => (state.name().to_string(), Some(state)),
        };

        let previous = self.current.take();
        if let Some(prev) = previous.as_deref() {
            if let Some(idx) = self.index_of(prev) {
                let state = &mut self.states[idx];
                if state.info().active {
                    state.on_exit(&next_name);
                    state.info_mut().active = false;
                    if !state.info().keep_registered && prev != next_name {
                        self.states.remove(idx);
                        debug!("evicted state '{}'", prev);
                    }
                }
            }
        }

        if let Some(state) = instance {
            self.add(state);
        }

        self.current = Some(next_name.clone());
        if let Some(state) = self.get_state_mut(&next_name) {
            state.info_mut().active = true;
            state.on_enter(previous.as_deref());
        }
        info!(
            "Transitioning from {} to {}",
            previous.as_deref().unwrap_or("<none>"),
            next_name
        );
        Ok(())
    }

    pub fn update(&mut self, dt: f32) {
        for state in self.states.iter_mut() {
            if state.info().runs_update() {
                state.update(dt);
            }
        }
        self.transitions.update(dt);
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        for state in self.states.iter() {
            if state.info().runs_draw() {
                state.draw(renderer);
            }
        }
        self.transitions.draw(renderer);
    }

    /// Add a transition effect, drawn above every state until it dies.
    pub fn add_transition(&mut self, effect: Box<dyn Updatable>) {
        self.transitions.add(effect);
    }

    pub fn transitions(&self) -> &Group<Box<dyn Updatable>> {
        &self.transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::renderer::CommandRecorder;
    use crate::states::state::StateInfo;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorded {
        info: StateInfo,
        log: Log,
        updates: u32,
    }

    impl Recorded {
        fn boxed(info: StateInfo, log: &Log) -> Box<dyn State> {
            Box::new(Recorded {
                info,
                log: log.clone(),
                updates: 0,
            })
        }
    }

    impl State for Recorded {
        fn info(&self) -> &StateInfo {
            &self.info
        }
        fn info_mut(&mut self) -> &mut StateInfo {
            &mut self.info
        }
        fn on_enter(&mut self, from: Option<&str>) {
            let entry = format!("{}.enter({})", self.info.name(), from.unwrap_or("-"));
            self.log.borrow_mut().push(entry);
        }
        fn on_exit(&mut self, to: &str) {
            let entry = format!("{}.exit({})", self.info.name(), to);
            self.log.borrow_mut().push(entry);
        }
        fn update(&mut self, _dt: f32) {
            self.updates += 1;
            let entry = format!("{}.update#{}", self.info.name(), self.updates);
            self.log.borrow_mut().push(entry);
        }
        fn draw(&self, renderer: &mut dyn Renderer) {
            renderer.print(self.info.name(), 0.0, 0.0);
        }
    }

    struct Blink {
        frames: u32,
    }

    impl Updatable for Blink {
        fn is_dead(&self) -> bool {
            self.frames == 0
        }
        fn kill(&mut self) {
            self.frames = 0;
        }
        fn update(&mut self, _dt: f32) {
            self.frames = self.frames.saturating_sub(1);
        }
        fn draw(&self, renderer: &mut dyn Renderer) {
            renderer.print("blink", 0.0, 0.0);
        }
    }

    fn manager_with(names: &[&str], log: &Log) -> StateManager {
        let mut m = StateManager::new();
        for name in names {
            m.add(Recorded::boxed(StateInfo::new(*name), log));
        }
        m
    }

    fn updates_of(log: &Log, name: &str) -> usize {
        let prefix = format!("{name}.update");
        log.borrow().iter().filter(|e| e.starts_with(&prefix)).count()
    }

    #[test]
    fn test_only_current_state_updates() {
        let log = Log::default();
        let mut m = manager_with(&["a", "b"], &log);
        m.switch_state("a").unwrap();
        m.update(0.016);
        m.update(0.016);
        m.switch_state("b").unwrap();
        m.update(0.016);

        assert_eq!(updates_of(&log, "a"), 2);
        assert_eq!(updates_of(&log, "b"), 1);
        assert_eq!(m.current(), Some("b"));
        assert!(m.get_state("b").unwrap().info().active);
        assert!(!m.get_state("a").unwrap().info().active);
    }

    #[test]
    fn test_exit_runs_before_enter() {
        let log = Log::default();
        let mut m = manager_with(&["a", "b"], &log);
        m.switch_state("a").unwrap();
        m.switch_state("b").unwrap();
        assert_eq!(
            *log.borrow(),
            vec!["a.enter(-)", "a.exit(b)", "b.enter(a)"]
        );
    }

    #[test]
    fn test_persistent_state_updates_and_draws_while_not_current() {
        let log = Log::default();
        let mut m = manager_with(&["a"], &log);
        m.add(Recorded::boxed(
            StateInfo::new("hud")
                .with_persistent_update(true)
                .with_persistent_draw(true),
            &log,
        ));
        m.switch_state("a").unwrap();
        m.update(0.016);

        assert_eq!(updates_of(&log, "hud"), 1);
        assert_eq!(updates_of(&log, "a"), 1);
        assert_eq!(m.current(), Some("a"));

        let mut r = CommandRecorder::new();
        m.draw(&mut r);
        assert_eq!(r.printed().collect::<Vec<_>>(), vec!["a", "hud"]);
    }

    #[test]
    fn test_switch_to_unregistered_name_changes_nothing() {
        let log = Log::default();
        let mut m = manager_with(&["a"], &log);
        m.switch_state("a").unwrap();
        let before = log.borrow().len();

        let err = m.switch_state("ghost").unwrap_err();
        assert_eq!(err, StateError::NotFound("ghost".to_string()));
        assert_eq!(err.to_string(), "state not found: ghost");
        assert_eq!(m.current(), Some("a"));
        assert!(m.get_state("a").unwrap().info().active);
        assert_eq!(log.borrow().len(), before);
    }

    #[test]
    fn test_switch_from_nothing_to_unregistered_name_fails() {
        let mut m = StateManager::new();
        assert!(m.switch_state("a").is_err());
        assert_eq!(m.current(), None);
    }

    #[test]
    fn test_states_are_kept_by_default_and_can_toggle() {
        let log = Log::default();
        let mut m = manager_with(&["a", "b"], &log);
        m.switch_state("a").unwrap();
        m.switch_state("b").unwrap();
        m.switch_state("a").unwrap();
        m.switch_state("b").unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.current(), Some("b"));
    }

    #[test]
    fn test_single_use_state_is_evicted_on_exit() {
        let log = Log::default();
        let mut m = manager_with(&["a"], &log);
        m.add(Recorded::boxed(
            StateInfo::new("once").with_keep_registered(false),
            &log,
        ));
        m.switch_state("once").unwrap();
        m.switch_state("a").unwrap();

        assert!(!m.contains("once"));
        assert!(log.borrow().contains(&"once.exit(a)".to_string()));
        assert!(log.borrow().contains(&"a.enter(once)".to_string()));
        assert_eq!(
            m.switch_state("once"),
            Err(StateError::NotFound("once".to_string()))
        );
    }

    #[test]
    fn test_switch_to_instance_registers_and_replaces() {
        let log = Log::default();
        let mut m = manager_with(&["a", "b"], &log);
        m.switch_state("a").unwrap();
        m.update(0.016);

        m.switch_state(Recorded::boxed(StateInfo::new("a"), &log)).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.names().collect::<Vec<_>>(), vec!["a", "b"]);
        m.update(0.016);
        // the replacement counts its own updates from one
        assert_eq!(log.borrow().last().unwrap(), "a.update#1");

        m.switch_state(Recorded::boxed(StateInfo::new("c"), &log)).unwrap();
        assert_eq!(m.current(), Some("c"));
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn test_reentering_current_state_runs_both_hooks() {
        let log = Log::default();
        let mut m = manager_with(&["a"], &log);
        m.switch_state("a").unwrap();
        m.switch_state("a").unwrap();
        assert_eq!(*log.borrow(), vec!["a.enter(-)", "a.exit(a)", "a.enter(a)"]);
        assert!(m.get_state("a").unwrap().info().active);
    }

    #[test]
    fn test_remove_current_state_clears_current() {
        let log = Log::default();
        let mut m = manager_with(&["a", "b"], &log);
        m.switch_state("a").unwrap();
        assert!(m.remove("a").is_some());
        assert_eq!(m.current(), None);
        assert!(m.remove("a").is_none());
        m.switch_state("b").unwrap();
        assert_eq!(*log.borrow(), vec!["a.enter(-)", "b.enter(-)"]);
    }

    #[test]
    fn test_transitions_draw_on_top_and_expire() {
        let log = Log::default();
        let mut m = manager_with(&["a"], &log);
        m.switch_state("a").unwrap();
        m.add_transition(Box::new(Blink { frames: 2 }));

        let mut r = CommandRecorder::new();
        m.draw(&mut r);
        assert_eq!(r.printed().collect::<Vec<_>>(), vec!["a", "blink"]);

        m.update(0.016);
        assert_eq!(m.transitions().len(), 1);
        m.update(0.016);
        assert!(m.transitions().is_empty());
    }

    #[test]
    fn test_get_state_mut_can_toggle_persistence() {
        let log = Log::default();
        let mut m = manager_with(&["a", "b"], &log);
        m.switch_state("a").unwrap();
        m.get_state_mut("b").unwrap().info_mut().persistent_update = true;
        m.update(0.016);
        assert_eq!(updates_of(&log, "b"), 1);
        assert!(m.get_state_mut("zzz").is_none());
    }
}
