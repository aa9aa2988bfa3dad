//! Game setup and the per-frame entry points.
//!
//! [`Game`] is what a host frame driver talks to: [`Game::load`] once, then
//! [`Game::update`] and [`Game::draw`] every frame. It owns the simulation
//! clock, the shared input snapshot and the [`StateManager`] with the game's
//! states:
//!
//! - `menu` – title screen, current after `load`
//! - `arena` – the playfield
//! - `hud` – persistent overlay, registered last so it draws over the others
//! - `pause` – single-use overlay, built on demand each time it is requested
//!
//! [`run_headless`] drives a game against scripted input and a recording
//! renderer; the binary's `--headless` mode and the integration tests use it.

use log::{debug, info, warn};

use crate::components::fade::Fade;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::NextGameState;
use crate::resources::input::{InputSource, ScriptedInput, SharedInput};
use crate::resources::renderer::{Color, CommandRecorder, Renderer};
use crate::resources::worldtime::{SharedClock, WorldTime};
use crate::states::arena::{ARENA, Arena, Population};
use crate::states::error::StateError;
use crate::states::hud::Hud;
use crate::states::menu::{MENU, Menu};
use crate::states::pause::{PAUSE, Pause};
use crate::states::state::State;
use crate::states::statemanager::StateManager;
use crate::systems::gamestate::check_pending_state;
use crate::systems::time::update_world_time;

/// Length of the fade played when the arena opens.
pub const FADE_SECONDS: f32 = 0.3;

pub struct Game {
    config: GameConfig,
    world_time: SharedClock,
    input: SharedInput,
    next_state: NextGameState,
    population: Population,
    manager: StateManager,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let world_time = WorldTime::default().with_time_scale(config.time_scale);
        Game {
            config,
            world_time: SharedClock::new(world_time.into()),
            input: SharedInput::default(),
            next_state: NextGameState::new(),
            population: Population::default(),
            manager: StateManager::new(),
        }
    }

    /// Register the states and enter the menu.
    pub fn load(&mut self) -> Result<(), StateError> {
        let (w, h) = self.config.screen_size();
        self.manager.add(Box::new(Menu::new(
            w,
            h,
            self.input.clone(),
            self.next_state.clone(),
        )));
        self.manager.add(Box::new(Arena::new(
            &self.config,
            self.input.clone(),
            self.next_state.clone(),
            self.population.clone(),
        )));
        self.manager.add(Box::new(Hud::new(
            self.input.clone(),
            self.population.clone(),
            self.world_time.clone(),
        )));
        info!("Game loaded with {} states", self.manager.len());
        self.manager.switch_state(MENU)
    }

    /// Advance one frame of `dt` unscaled seconds.
    ///
    /// Input is sampled first, then every running state is updated, then a
    /// transition requested during the update is applied. A failed transition
    /// is reported but leaves the game running in its current state.
    pub fn update(&mut self, dt: f32, source: &dyn InputSource) -> Result<(), StateError> {
        let mut world_time = self.world_time.get();
        update_world_time(&mut world_time, dt);
        self.world_time.set(world_time);
        self.input.borrow_mut().sample(source);
        self.manager.update(world_time.delta);

        let previous = self.manager.current().map(str::to_string);
        let (w, h) = self.config.screen_size();
        let input = self.input.clone();
        let next = self.next_state.clone();
        let switched = check_pending_state(&mut self.manager, &self.next_state, |name| {
            if name == PAUSE {
                let pause: Box<dyn State> = Box::new(Pause::new(w, h, input, next));
                Some(pause)
            } else {
                None
            }
        })?;

        if let Some(name) = switched {
            debug!("frame {}: now in {}", world_time.frame_count, name);
            if name == ARENA && previous.as_deref() == Some(MENU) {
                self.manager
                    .add_transition(Box::new(Fade::reveal(w, h, Color::BLACK, FADE_SECONDS)));
            }
        }
        Ok(())
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        self.manager.draw(renderer);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world_time(&self) -> WorldTime {
        self.world_time.get()
    }

    pub fn manager(&self) -> &StateManager {
        &self.manager
    }

    pub fn current_state(&self) -> Option<&str> {
        self.manager.current()
    }

    /// Live circles in the arena.
    pub fn population(&self) -> usize {
        self.population.get()
    }
}

/// What a headless run went through.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSummary {
    pub frames: u64,
    pub elapsed: f32,
    pub peak_population: usize,
    /// Draw calls issued on the last frame.
    pub last_frame_commands: usize,
    pub final_state: Option<String>,
}

/// Run `frames` fixed-step frames of `game`, feeding it `script` and drawing
/// into a [`CommandRecorder`] that is cleared every frame.
///
/// Transition failures are logged and the run continues.
pub fn run_headless(game: &mut Game, script: &mut ScriptedInput, frames: u64) -> HeadlessSummary {
    let dt = game.config().fixed_dt;
    let mut recorder = CommandRecorder::new();
    let mut peak_population = 0;

    for _ in 0..frames {
        if let Err(e) = game.update(dt, &*script) {
            warn!("frame {}: {}", game.world_time().frame_count, e);
        }
        script.advance();

        recorder.clear();
        game.draw(&mut recorder);
        peak_population = peak_population.max(game.population());
    }

    HeadlessSummary {
        frames,
        elapsed: game.world_time().elapsed,
        peak_population,
        last_frame_commands: recorder.len(),
        final_state: game.current_state().map(str::to_string),
    }
}
