//! Per-frame steps run by the game driver.
//!
//! Submodules overview
//! - [`gamestate`] – apply pending state transitions
//! - [`time`] – update simulation time and delta
//! - `input` – raylib [`InputSource`](crate::resources::input::InputSource) (`raylib` feature)
//! - `render` – raylib [`Renderer`](crate::resources::renderer::Renderer) (`raylib` feature)

pub mod gamestate;
#[cfg(feature = "raylib")]
pub mod input;
#[cfg(feature = "raylib")]
pub mod render;
pub mod time;
