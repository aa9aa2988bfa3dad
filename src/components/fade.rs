//! Full-screen fade used as a state transition effect.
//!
//! A [`Fade`] covers the screen with a solid color and eases its alpha from
//! `from` to `to`. When the tween completes the fade marks itself dead, so
//! the [`StateManager`](crate::states::statemanager::StateManager)'s
//! transition group drops it on its own.

use crate::components::timer::Timer;
use crate::components::tween::Easing;
use crate::resources::group::Updatable;
use crate::resources::renderer::{Color, DrawMode, Renderer};

#[derive(Debug)]
pub struct Fade {
    pub width: f32,
    pub height: f32,
    pub color: Color,
    pub alpha: f32,
    pub dead: bool,
    timer: Timer<Fade>,
}

impl Fade {
    pub fn new(width: f32, height: f32, color: Color, from: f32, to: f32, duration: f32) -> Self {
        let mut timer: Timer<Fade> = Timer::new();
        timer.tween(
            duration,
            |f| &mut f.alpha,
            to,
            Easing::QuadInOut,
            Some(Box::new(|f: &mut Fade| f.dead = true)),
        );
        Fade {
            width,
            height,
            color,
            alpha: from,
            dead: false,
            timer,
        }
    }

    /// Opaque to transparent over `duration` seconds.
    pub fn reveal(width: f32, height: f32, color: Color, duration: f32) -> Self {
        Self::new(width, height, color, 1.0, 0.0, duration)
    }
}

impl Updatable for Fade {
    fn is_dead(&self) -> bool {
        self.dead
    }
    fn kill(&mut self) {
        self.dead = true;
    }
    fn update(&mut self, dt: f32) {
        Timer::update_owned(self, |f| &mut f.timer, dt);
    }
    fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.rectangle(
            DrawMode::Fill,
            0.0,
            0.0,
            self.width,
            self.height,
            self.color.fade(self.alpha),
        );
    }
}
