//! Entities and the building blocks they are made of.
//!
//! Submodules overview:
//! - [`spring`] – damped oscillator used for squash and recoil effects
//! - [`tween`] – easing curves
//! - [`timer`] – per-owner scheduler for delayed, repeating and tweened callbacks
//! - [`gameobject`] – pose, velocity, spring and timer shared by every entity
//! - [`circle`] – short-lived particle that can split into fragments
//! - [`fade`] – full-screen fade used for state transitions

pub mod circle;
pub mod fade;
pub mod gameobject;
pub mod spring;
pub mod timer;
pub mod tween;
