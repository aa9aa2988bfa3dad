//! Damped spring used for "juice" effects (squash, recoil, wobble).
//!
//! A [`Spring`] holds a scalar displacement from a rest point. Impulses are
//! added with [`Spring::pull`] and the oscillator settles back through
//! [`Spring::update`], integrated with semi-implicit Euler:
//!
//! ```text
//! a = -tension * (x - target) - dampening * v
//! v += a * dt
//! x += v * dt
//! ```
//!
//! Entities usually read [`Spring::x`] as a multiplier offset, e.g. drawing
//! with `scale * (1.0 + spring.x())`.
//!
//! Coefficients are not validated. With `dampening < 2 * sqrt(tension)` the
//! spring oscillates, and large `dt` with stiff springs can diverge.

pub const DEFAULT_TENSION: f32 = 500.0;
pub const DEFAULT_DAMPENING: f32 = 20.0;

/// Dampening at which a spring of the given tension stops overshooting.
pub fn critical_damping(tension: f32) -> f32 {
    2.0 * tension.sqrt()
}

/// Scalar second-order oscillator.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    x: f32,
    tension: f32,
    dampening: f32,
    target_x: f32,
    velocity: f32,
}

impl Default for Spring {
    fn default() -> Self {
        Self::new()
    }
}

impl Spring {
    /// Spring at rest on 0 with the default coefficients.
    pub fn new() -> Self {
        Spring {
            x: 0.0,
            tension: DEFAULT_TENSION,
            dampening: DEFAULT_DAMPENING,
            target_x: 0.0,
            velocity: 0.0,
        }
    }

    /// Move the rest point. The current displacement is kept and the spring
    /// will travel towards the new target on the next updates.
    pub fn set_target(&mut self, target: f32) {
        self.target_x = target;
    }

    pub fn with_target(mut self, target: f32) -> Self {
        self.target_x = target;
        self
    }

    pub fn x(&self) -> f32 {
        self.x
    }
    pub fn velocity(&self) -> f32 {
        self.velocity
    }
    pub fn target(&self) -> f32 {
        self.target_x
    }
    pub fn tension(&self) -> f32 {
        self.tension
    }
    pub fn dampening(&self) -> f32 {
        self.dampening
    }

    pub fn update(&mut self, dt: f32) {
        let a = -self.tension * (self.x - self.target_x) - self.dampening * self.velocity;
        self.velocity += a * dt;
        self.x += self.velocity * dt;
    }

    /// Add `force` to the velocity. Each pull also replaces the spring's
    /// coefficients, so a recoil and a squash on the same spring can feel
    /// different.
    pub fn pull(&mut self, force: f32, tension: f32, dampening: f32) {
        self.tension = tension;
        self.dampening = dampening;
        self.velocity += force;
    }

    /// [`Spring::pull`] with [`DEFAULT_TENSION`] and [`DEFAULT_DAMPENING`].
    pub fn pull_default(&mut self, force: f32) {
        self.pull(force, DEFAULT_TENSION, DEFAULT_DAMPENING);
    }
}
