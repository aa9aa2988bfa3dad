//! Short-lived particle circle.
//!
//! Spawned under the pointer, a [`Circle`] flies up-left at a random speed
//! and lives for [`CIRCLE_LIFETIME`] seconds: a
//! cubic-out tween on its x scale doubles as the lifetime and its completion
//! marks the circle dead.
//!
//! A circle created with fragments left (see [`Circle::with_fragments`]) pushes
//! two smaller circles into its group through its [`Spawner`] the frame its
//! lifetime runs out. A circle ended early through [`Updatable::kill`] does
//! not split.

use crate::components::gameobject::{GameObject, Steering, angle_difference};
use crate::components::tween::Easing;
use crate::resources::group::{Spawner, Updatable};
use crate::resources::renderer::{Color, DrawMode, Renderer};

pub const CIRCLE_LIFETIME: f32 = 0.2;
pub const CIRCLE_RADIUS: f32 = 2.0;
pub const CIRCLE_MAX_SPEED: f32 = 500.0;

#[derive(Debug)]
pub struct Circle {
    pub base: GameObject,
    pub radius: f32,
    pub color: Color,
    fragments: u8,
    group: Option<Spawner<Circle>>,
}

impl Circle {
    pub fn new(x: f32, y: f32, rng: &mut fastrand::Rng, group: Option<Spawner<Circle>>) -> Self {
        let vx = -rng.f32() * CIRCLE_MAX_SPEED;
        let vy = -rng.f32() * CIRCLE_MAX_SPEED;
        let mut base = GameObject::new(x, y).with_velocity(vx, vy);
        base.timer.tween(
            CIRCLE_LIFETIME,
            |o| &mut o.sx,
            16.0,
            Easing::CubicOut,
            Some(Box::new(|o: &mut GameObject| o.dead = true)),
        );
        Circle {
            base,
            radius: CIRCLE_RADIUS,
            color: Color::GOLD,
            fragments: 0,
            group,
        }
    }

    /// Number of times this circle's line splits in two when it dies.
    pub fn with_fragments(mut self, fragments: u8) -> Self {
        self.fragments = fragments;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn fragments(&self) -> u8 {
        self.fragments
    }

    fn fragment(&mut self) {
        let Some(group) = self.group.take() else {
            return;
        };
        if self.fragments == 0 {
            return;
        }
        // deterministic per position so replays stay stable
        let seed = (self.base.x.to_bits() as u64) << 32 | self.base.y.to_bits() as u64;
        let mut rng = fastrand::Rng::with_seed(seed);
        for _ in 0..2 {
            let mut child = Circle::new(self.base.x, self.base.y, &mut rng, Some(group.clone()))
                .with_fragments(self.fragments - 1)
                .with_color(self.color);
            child.radius = self.radius * 0.5;
            if group.spawn(child).is_err() {
                log::debug!("circle fragment dropped, group is gone");
                break;
            }
        }
        self.fragments = 0;
    }
}

impl Updatable for Circle {
    fn is_dead(&self) -> bool {
        self.base.dead
    }
    fn kill(&mut self) {
        self.fragments = 0;
        self.base.dead = true;
    }
    fn update(&mut self, dt: f32) {
        self.base.update(dt);
        self.base.integrate_velocity(dt);
        if self.base.dead {
            self.fragment();
        }
    }
    fn draw(&self, renderer: &mut dyn Renderer) {
        let squash = 1.0 + self.base.spring().x();
        renderer.circle(
            DrawMode::Fill,
            self.base.x,
            self.base.y,
            self.radius * squash,
            self.color,
        );
    }
}

impl Steering for Circle {
    fn angle_to(&self, other: &GameObject) -> f32 {
        (other.y - self.base.y).atan2(other.x - self.base.x)
    }

    fn overlaps_point(&self, px: f32, py: f32) -> bool {
        let dx = px - self.base.x;
        let dy = py - self.base.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }

    fn rotate_towards(&mut self, target: f32, max_step: f32) {
        let d = angle_difference(self.base.angle, target);
        self.base.angle += d.clamp(-max_step, max_step);
    }
}
