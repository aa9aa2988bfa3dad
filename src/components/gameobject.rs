//! Base state shared by every simulated entity.
//!
//! [`GameObject`] carries a 2-D pose (position, angle, origin, scale), a
//! velocity, the `dead` flag, an owned [`Spring`] and an owned
//! [`Timer<GameObject>`]. Concrete entities embed one and implement
//! [`Updatable`](crate::resources::group::Updatable) by calling
//! [`GameObject::update`] first and then applying their own motion:
//!
//! ```ignore
//! impl Updatable for Bullet {
//!     fn update(&mut self, dt: f32) {
//!         self.base.update(dt);
//!         self.base.integrate_velocity(dt);
//!     }
//!     // ...
//! }
//! ```
//!
//! A `GameObject` only ever mutates itself. Removal from its group happens
//! when the group sees `dead == true` at the end of an update.

use crate::components::spring::Spring;
use crate::components::timer::Timer;
use crate::resources::group::Updatable;
use crate::resources::renderer::{DrawParams, Renderer};

#[derive(Debug)]
pub struct GameObject {
    pub x: f32,
    pub y: f32,
    /// Rotation in radians.
    pub angle: f32,
    pub ox: f32,
    pub oy: f32,
    pub sx: f32,
    pub sy: f32,
    pub vx: f32,
    pub vy: f32,
    pub dead: bool,
    /// Scheduler scoped to this object. Callbacks get `&mut GameObject`.
    pub timer: Timer<GameObject>,
    spring: Spring,
}

impl GameObject {
    pub fn new(x: f32, y: f32) -> Self {
        GameObject {
            x,
            y,
            angle: 0.0,
            ox: 0.0,
            oy: 0.0,
            sx: 1.0,
            sy: 1.0,
            vx: 0.0,
            vy: 0.0,
            dead: false,
            timer: Timer::new(),
            spring: Spring::new(),
        }
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    pub fn with_origin(mut self, ox: f32, oy: f32) -> Self {
        self.ox = ox;
        self.oy = oy;
        self
    }

    pub fn spring(&self) -> &Spring {
        &self.spring
    }

    /// Kick the owned spring. See [`Spring::pull`].
    pub fn pull(&mut self, force: f32, tension: f32, dampening: f32) {
        self.spring.pull(force, tension, dampening);
    }

    /// Advance the timer, then the spring.
    pub fn update(&mut self, dt: f32) {
        Timer::update_owned(self, |o| &mut o.timer, dt);
        self.spring.update(dt);
    }

    /// Straight-line motion: `position += velocity * dt`.
    pub fn integrate_velocity(&mut self, dt: f32) {
        self.x += self.vx * dt;
        self.y += self.vy * dt;
    }

    /// Current pose as draw parameters, with the spring applied to the scale.
    pub fn draw_params(&self) -> DrawParams {
        let squash = 1.0 + self.spring.x();
        DrawParams::at(self.x, self.y)
            .with_rotation(self.angle)
            .with_scale(self.sx * squash, self.sy * squash)
            .with_origin(self.ox, self.oy)
    }
}

impl Updatable for GameObject {
    fn is_dead(&self) -> bool {
        self.dead
    }
    fn kill(&mut self) {
        self.dead = true;
    }
    fn update(&mut self, dt: f32) {
        GameObject::update(self, dt);
    }
    fn draw(&self, _renderer: &mut dyn Renderer) {}
}

/// Optional spatial helpers. The base object does not implement them;
/// entities with a shape opt in.
pub trait Steering {
    /// Angle in radians from this entity towards `other`.
    fn angle_to(&self, other: &GameObject) -> f32;
    /// Whether the point lies inside the entity's bounds.
    fn overlaps_point(&self, px: f32, py: f32) -> bool;
    /// Turn the entity towards `target` radians, at most `max_step` radians.
    fn rotate_towards(&mut self, target: f32, max_step: f32);
}

/// Signed shortest difference `to - from`, wrapped into `(-PI, PI]`.
pub fn angle_difference(from: f32, to: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let d = (to - from).rem_euclid(TAU);
    if d > PI { d - TAU } else { d }
}
