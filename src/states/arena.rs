//! The playfield.
//!
//! While the pointer is held the arena spawns circles under it, each one
//! kicked with the configured squash. While the kill key is held every live
//! circle dies without splitting, Escape goes back to the menu and P
//! pauses. The arena keeps drawing while paused so the frozen playfield shows
//! under the pause overlay.

use std::cell::Cell;
use std::rc::Rc;

use log::{debug, info};

use crate::components::circle::Circle;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::NextGameState;
use crate::resources::group::Group;
use crate::resources::input::SharedInput;
use crate::resources::renderer::Renderer;
use crate::states::menu::MENU;
use crate::states::pause::PAUSE;
use crate::states::state::{State, StateInfo};

pub const ARENA: &str = "arena";

/// Live circle count, published by the arena for overlays.
pub type Population = Rc<Cell<usize>>;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Squash {
    force: f32,
    tension: f32,
    dampening: f32,
}

pub struct Arena {
    info: StateInfo,
    input: SharedInput,
    next: NextGameState,
    circles: Group<Circle>,
    rng: fastrand::Rng,
    spawn_per_frame: u32,
    fragments: u8,
    squash: Squash,
    population: Population,
    spawned: u64,
}

impl Arena {
    pub fn new(
        config: &GameConfig,
        input: SharedInput,
        next: NextGameState,
        population: Population,
    ) -> Self {
        Arena {
            info: StateInfo::new(ARENA).with_persistent_draw(true),
            input,
            next,
            circles: Group::new(),
            rng: fastrand::Rng::with_seed(config.seed),
            spawn_per_frame: config.spawn_per_frame,
            fragments: config.fragments,
            squash: Squash {
                force: config.squash_force,
                tension: config.squash_tension,
                dampening: config.squash_dampening,
            },
            population,
            spawned: 0,
        }
    }

    pub fn circles(&self) -> &Group<Circle> {
        &self.circles
    }

    /// Circles spawned since the arena was created, fragments excluded.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    pub fn spawn(&mut self, x: f32, y: f32) {
        let mut circle = Circle::new(x, y, &mut self.rng, Some(self.circles.spawner()))
            .with_fragments(self.fragments);
        circle
            .base
            .pull(self.squash.force, self.squash.tension, self.squash.dampening);
        self.circles.add(circle);
        self.spawned += 1;
    }
}

impl State for Arena {
    fn info(&self) -> &StateInfo {
        &self.info
    }
    fn info_mut(&mut self) -> &mut StateInfo {
        &mut self.info
    }

    fn on_enter(&mut self, from: Option<&str>) {
        info!("arena entered from {}", from.unwrap_or("<start>"));
    }

    fn on_exit(&mut self, to: &str) {
        if to != PAUSE {
            debug!("arena cleared {} circles", self.circles.len());
            self.circles.clear();
            self.population.set(0);
        }
        info!("arena left for {}", to);
    }

    fn update(&mut self, dt: f32) {
        let (pointer, held, kill, back, pause) = {
            let input = self.input.borrow();
            (
                (input.mouse_x, input.mouse_y),
                input.mouse_primary.active,
                input.action_kill.active,
                input.action_back.just_pressed,
                input.action_pause.just_pressed,
            )
        };

        if back {
            self.next.set(MENU);
        } else if pause {
            self.next.set(PAUSE);
        }
        if held {
            for _ in 0..self.spawn_per_frame {
                self.spawn(pointer.0, pointer.1);
            }
        }
        if kill {
            self.circles.kill_all();
        }

        self.circles.update(dt);
        self.population.set(self.circles.len());
    }

    fn draw(&self, renderer: &mut dyn Renderer) {
        self.circles.draw(renderer);
    }
}
