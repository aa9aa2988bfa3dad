//! Always-on overlay.
//!
//! The HUD is registered but never switched to: it runs through
//! `persistent_update` and `persistent_draw` on top of whichever state is
//! current. It prints the frame rate in the top-left corner and, with the
//! debug overlay toggled on (Tab), the live circle count. The frame rate is
//! measured on the unscaled clock, so slow motion does not inflate it.

use crate::resources::input::SharedInput;
use crate::resources::renderer::Renderer;
use crate::resources::worldtime::SharedClock;
use crate::states::arena::Population;
use crate::states::state::{State, StateInfo};

pub const HUD: &str = "hud";

/// Seconds between frame rate refreshes.
const FPS_WINDOW: f32 = 0.5;

pub struct Hud {
    info: StateInfo,
    input: SharedInput,
    population: Population,
    clock: SharedClock,
    frames: u32,
    window: f32,
    fps: u32,
    debug: bool,
}

impl Hud {
    pub fn new(input: SharedInput, population: Population, clock: SharedClock) -> Self {
        Hud {
            info: StateInfo::new(HUD)
                .with_persistent_update(true)
                .with_persistent_draw(true),
            input,
            population,
            clock,
            frames: 0,
            window: 0.0,
            fps: 0,
            debug: false,
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn debug(&self) -> bool {
        self.debug
    }
}

impl State for Hud {
    fn info(&self) -> &StateInfo {
        &self.info
    }
    fn info_mut(&mut self) -> &mut StateInfo {
        &mut self.info
    }

    fn on_enter(&mut self, _from: Option<&str>) {}

    fn on_exit(&mut self, _to: &str) {}

    fn update(&mut self, _dt: f32) {
        if self.input.borrow().mode_debug.just_pressed {
            self.debug = !self.debug;
            log::debug!("debug overlay {}", if self.debug { "on" } else { "off" });
        }

        self.frames += 1;
        self.window += self.clock.get().real_delta;
        if self.window >= FPS_WINDOW {
            self.fps = (self.frames as f32 / self.window).round() as u32;
            self.frames = 0;
            self.window = 0.0;
        }
    }

    fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.print(&self.fps.to_string(), 0.0, 0.0);
        if self.debug {
            renderer.print(&format!("circles: {}", self.population.get()), 0.0, 16.0);
        }
    }
}
