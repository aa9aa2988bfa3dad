//! Long-lived data shared across states and frames.
//!
//! Overview
//! - `gameconfig` – settings loaded from the INI file
//! - `gamestate` – pending state transition requests
//! - `group` – owning entity container and its spawn handle
//! - `input` – input backend trait, per-frame snapshot and scripted input
//! - `renderer` – render backend trait and the recording renderer
//! - `texturestore` – loaded textures keyed by name (`raylib` feature)
//! - `worldtime` – simulation time and delta
pub mod gameconfig;
pub mod gamestate;
pub mod group;
pub mod input;
pub mod renderer;
#[cfg(feature = "raylib")]
pub mod texturestore;
pub mod worldtime;
