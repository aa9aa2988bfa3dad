//! Game configuration.
//!
//! Manages settings loaded from an INI configuration file. Provides defaults
//! for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 640
//! height = 360
//! target_fps = 60
//!
//! [simulation]
//! fixed_dt = 0.016666668
//! time_scale = 1.0
//! frames = 600
//! seed = 42
//! spawn_per_frame = 1
//! fragments = 1
//!
//! [juice]
//! squash_force = 0.5
//! squash_tension = 300
//! squash_dampening = 10
//! ```

use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 640;
const DEFAULT_WINDOW_HEIGHT: u32 = 360;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_FRAMES: u64 = 600;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_SPAWN_PER_FRAME: u32 = 1;
const DEFAULT_FRAGMENTS: u8 = 1;
const DEFAULT_SQUASH_FORCE: f32 = 0.5;
const DEFAULT_SQUASH_TENSION: f32 = 300.0;
const DEFAULT_SQUASH_DAMPENING: f32 = 10.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Upper bounds for values that multiply the circle count.
pub const MAX_SPAWN_PER_FRAME: u32 = 64;
/// Each fragment level doubles the circles a spawn ends up as.
pub const MAX_FRAGMENTS: u8 = 6;

fn clamp_setting(key: &str, value: u64, max: u64) -> u64 {
    if value > max {
        warn!("{} = {} is too large, using {}", key, value, max);
        max
    } else {
        value
    }
}

/// Game configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Seconds per frame for headless runs.
    pub fixed_dt: f32,
    pub time_scale: f32,
    /// Frames to simulate when running headless.
    pub frames: u64,
    pub seed: u64,
    /// Circles spawned per frame while the pointer is held.
    pub spawn_per_frame: u32,
    /// How many times a dying circle splits.
    pub fragments: u8,
    pub squash_force: f32,
    pub squash_tension: f32,
    pub squash_dampening: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            fixed_dt: 1.0 / DEFAULT_TARGET_FPS as f32,
            time_scale: DEFAULT_TIME_SCALE,
            frames: DEFAULT_FRAMES,
            seed: DEFAULT_SEED,
            spawn_per_frame: DEFAULT_SPAWN_PER_FRAME,
            fragments: DEFAULT_FRAGMENTS,
            squash_force: DEFAULT_SQUASH_FORCE,
            squash_tension: DEFAULT_SQUASH_TENSION,
            squash_dampening: DEFAULT_SQUASH_DAMPENING,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = (fps as u32).max(1);
            self.fixed_dt = 1.0 / self.target_fps as f32;
        }

        // [simulation] section
        if let Some(dt) = config.getfloat("simulation", "fixed_dt").ok().flatten() {
            self.fixed_dt = dt as f32;
        }
        if let Some(scale) = config.getfloat("simulation", "time_scale").ok().flatten() {
            self.time_scale = scale as f32;
        }
        if let Some(frames) = config.getuint("simulation", "frames").ok().flatten() {
            self.frames = frames;
        }
        if let Some(seed) = config.getuint("simulation", "seed").ok().flatten() {
            self.seed = seed;
        }
        if let Some(n) = config.getuint("simulation", "spawn_per_frame").ok().flatten() {
            self.spawn_per_frame =
                clamp_setting("spawn_per_frame", n, MAX_SPAWN_PER_FRAME as u64) as u32;
        }
        if let Some(n) = config.getuint("simulation", "fragments").ok().flatten() {
            self.fragments = clamp_setting("fragments", n, MAX_FRAGMENTS as u64) as u8;
        }

        // [juice] section
        if let Some(v) = config.getfloat("juice", "squash_force").ok().flatten() {
            self.squash_force = v as f32;
        }
        if let Some(v) = config.getfloat("juice", "squash_tension").ok().flatten() {
            self.squash_tension = v as f32;
        }
        if let Some(v) = config.getfloat("juice", "squash_dampening").ok().flatten() {
            self.squash_dampening = v as f32;
        }

        info!(
            "Loaded config: {}x{} window, fps={}, dt={}, time_scale={}, frames={}, seed={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.fixed_dt,
            self.time_scale,
            self.frames,
            self.seed
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        // [simulation] section
        config.set("simulation", "fixed_dt", Some(self.fixed_dt.to_string()));
        config.set("simulation", "time_scale", Some(self.time_scale.to_string()));
        config.set("simulation", "frames", Some(self.frames.to_string()));
        config.set("simulation", "seed", Some(self.seed.to_string()));
        config.set(
            "simulation",
            "spawn_per_frame",
            Some(self.spawn_per_frame.to_string()),
        );
        config.set("simulation", "fragments", Some(self.fragments.to_string()));

        // [juice] section
        config.set("juice", "squash_force", Some(self.squash_force.to_string()));
        config.set("juice", "squash_tension", Some(self.squash_tension.to_string()));
        config.set(
            "juice",
            "squash_dampening",
            Some(self.squash_dampening.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size as floats, the unit states draw in.
    pub fn screen_size(&self) -> (f32, f32) {
        (self.window_width as f32, self.window_height as f32)
    }
}
