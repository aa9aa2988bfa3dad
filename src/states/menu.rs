//! Title screen. Enter starts the arena.
//!
//! Above the title sits a square badge, textured with [`BADGE_TEXTURE`], that
//! squashes on its spring each time the menu is entered.

use log::info;

use crate::components::gameobject::GameObject;
use crate::resources::gamestate::NextGameState;
use crate::resources::input::SharedInput;
use crate::resources::renderer::Renderer;
use crate::states::arena::ARENA;
use crate::states::state::{State, StateInfo};

pub const MENU: &str = "menu";

/// Texture key the badge draws with.
pub const BADGE_TEXTURE: &str = "badge";
/// Badge texture side in pixels.
pub const BADGE_SIZE: f32 = 24.0;

const TITLE: &str = "springloop";
const PROMPT: &str = "press enter";

pub struct Menu {
    info: StateInfo,
    input: SharedInput,
    next: NextGameState,
    width: f32,
    height: f32,
    /// Bounces with the title every time the menu is entered.
    badge: GameObject,
}

impl Menu {
    pub fn new(width: f32, height: f32, input: SharedInput, next: NextGameState) -> Self {
        Menu {
            info: StateInfo::new(MENU),
            input,
            next,
            width,
            height,
            badge: GameObject::new(width * 0.5, height * 0.3)
                .with_origin(BADGE_SIZE * 0.5, BADGE_SIZE * 0.5),
        }
    }

    pub fn title_offset(&self) -> f32 {
        self.badge.spring().x()
    }
}

impl State for Menu {
    fn info(&self) -> &StateInfo {
        &self.info
    }
    fn info_mut(&mut self) -> &mut StateInfo {
        &mut self.info
    }

    fn on_enter(&mut self, from: Option<&str>) {
        info!("menu entered from {}", from.unwrap_or("<start>"));
        self.badge.pull(1.0, 200.0, 8.0);
    }

    fn on_exit(&mut self, to: &str) {
        info!("menu left for {}", to);
    }

    fn update(&mut self, dt: f32) {
        self.badge.update(dt);
        if self.input.borrow().action_start.just_pressed {
            self.next.set(ARENA);
        }
    }

    fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.draw_texture(BADGE_TEXTURE, &self.badge.draw_params());
        let y = self.height * 0.4 * (1.0 + 0.1 * self.title_offset());
        renderer.print(TITLE, self.width * 0.5 - 40.0, y);
        renderer.print(PROMPT, self.width * 0.5 - 44.0, self.height * 0.6);
    }
}
