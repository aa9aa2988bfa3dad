//! springloop entry point.
//!
//! # Main Loop
//!
//! 1. Parse the command line and load `config.ini` (defaults if missing)
//! 2. Build the [`Game`] and enter the menu
//! 3. Every frame: `update(dt)` with the frame's input, then `draw`
//!
//! Without the `raylib` feature, or with `--headless`, the game runs for a
//! fixed number of frames against a scripted demo input and logs a summary.
//!
//! # Running
//!
//! ```sh
//! cargo run --release --features raylib
//! cargo run -- --headless --frames 600 --seed 7
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};

use springloop::game::{Game, run_headless};
use springloop::resources::gameconfig::GameConfig;
use springloop::resources::input::ScriptedInput;

/// springloop: springs, groups and states in a tiny frame loop
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Frames to simulate in headless mode (overrides the config file).
    #[arg(long, value_name = "N")]
    frames: Option<u64>,

    /// Random seed (overrides the config file).
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Run without a window against scripted input.
    #[arg(long)]
    headless: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(frames) = cli.frames {
        config.frames = frames;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let mut game = Game::new(config);
    if let Err(e) = game.load() {
        error!("Failed to load game: {}", e);
        std::process::exit(1);
    }

    if !cli.headless {
        #[cfg(feature = "raylib")]
        {
            run_window(game);
            return;
        }
        #[cfg(not(feature = "raylib"))]
        warn!("built without the raylib feature, running headless");
    }

    run_scripted(game);
}

fn run_scripted(mut game: Game) {
    let (w, h) = game.config().screen_size();
    let frames = game.config().frames;
    let mut rng = fastrand::Rng::with_seed(game.config().seed);
    // the demo adds two menu frames before the sweep
    let sweep = frames.saturating_sub(2) as usize;
    let mut script = ScriptedInput::demo(w, h, sweep, &mut rng);

    let summary = run_headless(&mut game, &mut script, frames);
    info!(
        "Headless run: {} frames, {:.2}s simulated, peak {} circles, {} draw calls on the last frame, ended in {}",
        summary.frames,
        summary.elapsed,
        summary.peak_population,
        summary.last_frame_commands,
        summary.final_state.as_deref().unwrap_or("<none>")
    );
}

#[cfg(feature = "raylib")]
fn run_window(mut game: Game) {
    use springloop::resources::renderer::Color;
    use springloop::resources::texturestore::TextureStore;
    use springloop::states::menu::{BADGE_SIZE, BADGE_TEXTURE};
    use springloop::systems::render::RaylibRenderer;

    let config = game.config().clone();
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .title("springloop")
        .build();
    rl.set_target_fps(config.target_fps);
    // Escape is the back key, not quit
    rl.set_exit_key(None);

    let mut textures = TextureStore::new();
    let badge = BADGE_SIZE as i32;
    if let Err(e) = textures.generate(&mut rl, &thread, BADGE_TEXTURE, badge, Color::GOLD) {
        warn!("{}; the menu badge will not show", e);
    }

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        if let Err(e) = game.update(dt, &rl) {
            warn!("frame {}: {}", game.world_time().frame_count, e);
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(raylib::prelude::Color::RAYWHITE);
        let mut renderer = RaylibRenderer::new(&mut d, &textures);
        game.draw(&mut renderer);
    }
    info!("Window closed after {} frames", game.world_time().frame_count);
}
