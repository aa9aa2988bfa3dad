//! Pause overlay.
//!
//! Single-use: it is dropped from the registry when left, and a fresh one is
//! registered every time the game pauses.

use log::info;

use crate::resources::gamestate::NextGameState;
use crate::resources::input::SharedInput;
use crate::resources::renderer::{Color, DrawMode, Renderer};
use crate::states::arena::ARENA;
use crate::states::state::{State, StateInfo};

pub const PAUSE: &str = "pause";

pub struct Pause {
    info: StateInfo,
    input: SharedInput,
    next: NextGameState,
    width: f32,
    height: f32,
    /// Seconds spent paused.
    elapsed: f32,
}

impl Pause {
    pub fn new(width: f32, height: f32, input: SharedInput, next: NextGameState) -> Self {
        Pause {
            info: StateInfo::new(PAUSE).with_keep_registered(false),
            input,
            next,
            width,
            height,
            elapsed: 0.0,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl State for Pause {
    fn info(&self) -> &StateInfo {
        &self.info
    }
    fn info_mut(&mut self) -> &mut StateInfo {
        &mut self.info
    }

    fn on_enter(&mut self, from: Option<&str>) {
        info!("paused from {}", from.unwrap_or("<start>"));
    }

    fn on_exit(&mut self, to: &str) {
        info!("resumed to {} after {:.2}s", to, self.elapsed);
    }

    fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        let input = self.input.borrow();
        if input.action_pause.just_pressed || input.action_back.just_pressed {
            self.next.set(ARENA);
        }
    }

    fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.rectangle(
            DrawMode::Fill,
            0.0,
            0.0,
            self.width,
            self.height,
            Color::BLACK.fade(0.5),
        );
        renderer.print("paused", self.width * 0.5 - 24.0, self.height * 0.5);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::input::{InputFrame, Key, ScriptedInput};
    use crate::resources::renderer::{CommandRecorder, DrawCommand};

    #[test]
    fn test_pause_is_single_use() {
        let p = Pause::new(640.0, 360.0, SharedInput::default(), NextGameState::new());
        assert!(!p.info().keep_registered);
        assert_eq!(p.name(), PAUSE);
    }

    #[test]
    fn test_pause_key_resumes_arena() {
        let input = SharedInput::default();
        let next = NextGameState::new();
        let mut p = Pause::new(640.0, 360.0, input.clone(), next.clone());
        p.update(0.5);
        assert_eq!(next.take(), None);

        let script = ScriptedInput::new(vec![InputFrame::default().with_key(Key::P)]);
        input.borrow_mut().sample(&script);
        p.update(0.5);
        assert_eq!(next.take(), Some(ARENA.to_string()));
        assert!((p.elapsed() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pause_dims_the_screen() {
        let p = Pause::new(640.0, 360.0, SharedInput::default(), NextGameState::new());
        let mut r = CommandRecorder::new();
        p.draw(&mut r);
        assert!(matches!(
            r.commands.first(),
            Some(DrawCommand::Rectangle { w, h, .. }) if *w == 640.0 && *h == 360.0
        ));
        assert_eq!(r.printed().collect::<Vec<_>>(), vec!["paused"]);
    }
}
