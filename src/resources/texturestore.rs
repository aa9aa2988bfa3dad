//! Textures keyed by name. Only exists with the `raylib` feature.
//!
//! The game ships no image assets, so textures are generated at startup and
//! uploaded once. Renderers look them up by the key entities draw with.

use log::info;
use raylib::prelude::{Image, RaylibHandle, RaylibThread, Texture2D};
use std::collections::HashMap;

use crate::resources::renderer::Color;

#[derive(Default)]
pub struct TextureStore {
    map: HashMap<String, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload a solid `size` x `size` texture under `key`, replacing any
    /// previous one.
    pub fn generate(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        key: impl Into<String>,
        size: i32,
        color: Color,
    ) -> Result<(), String> {
        let key = key.into();
        let image = Image::gen_image_color(size, size, raylib::prelude::Color::from(color));
        let texture = rl
            .load_texture_from_image(thread, &image)
            .map_err(|e| format!("Failed to upload texture {}: {}", key, e))?;
        info!("Generated texture '{}' ({}x{})", key, size, size);
        self.map.insert(key, texture);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Texture2D> {
        self.map.get(key)
    }
}
