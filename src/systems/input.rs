//! raylib input backend.

use raylib::ffi::{KeyboardKey, MouseButton as RlMouseButton};
use raylib::RaylibHandle;

use crate::resources::input::{InputSource, Key, MouseButton};

fn keyboard_key(key: Key) -> Option<KeyboardKey> {
    match key {
        Key::A => Some(KeyboardKey::KEY_A),
        Key::P => Some(KeyboardKey::KEY_P),
        Key::Space => Some(KeyboardKey::KEY_SPACE),
        Key::Enter => Some(KeyboardKey::KEY_ENTER),
        Key::Escape => Some(KeyboardKey::KEY_ESCAPE),
        Key::Tab => Some(KeyboardKey::KEY_TAB),
        Key::Null => None,
    }
}

fn mouse_button(button: MouseButton) -> RlMouseButton {
    match button {
        MouseButton::Left => RlMouseButton::MOUSE_BUTTON_LEFT,
        MouseButton::Right => RlMouseButton::MOUSE_BUTTON_RIGHT,
        MouseButton::Middle => RlMouseButton::MOUSE_BUTTON_MIDDLE,
    }
}

/// Poll the window's keyboard and mouse.
impl InputSource for RaylibHandle {
    fn mouse_position(&self) -> (f32, f32) {
        let p = self.get_mouse_position();
        (p.x, p.y)
    }

    fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.is_mouse_button_down(mouse_button(button))
    }

    fn is_key_down(&self, key: Key) -> bool {
        keyboard_key(key).is_some_and(|k| RaylibHandle::is_key_down(self, k))
    }
}
