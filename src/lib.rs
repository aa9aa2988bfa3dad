//! springloop library.
//!
//! A small frame-synchronous simulation loop: entities owned by groups,
//! named states switched by a manager, and springs for juice. Exposed as a
//! library for the binary and the integration tests.

pub mod components;
pub mod game;
pub mod resources;
pub mod states;
pub mod systems;
