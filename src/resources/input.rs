//! Per-frame input snapshot and the input backend boundary.
//!
//! Backends implement [`InputSource`] (pointer position, button and key
//! queries). Once per frame the host driver calls [`InputState::sample`],
//! which copies the subset of state the game cares about and derives
//! `just_pressed` / `just_released` edges by comparing with the previous
//! frame. States read the [`InputState`] snapshot, never the backend.
//!
//! [`ScriptedInput`] replays recorded frames; the headless binary and the
//! tests use it.

use std::cell::RefCell;
use std::rc::Rc;

/// Keys the game binds actions to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    P,
    Space,
    Enter,
    Escape,
    Tab,
    Null,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Input backend queried once per frame.
pub trait InputSource {
    fn mouse_position(&self) -> (f32, f32);
    fn is_mouse_down(&self, button: MouseButton) -> bool;
    fn is_key_down(&self, key: Key) -> bool;
}

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: Key,
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound(Key::Null)
    }
}

impl BoolState {
    pub fn bound(key_binding: Key) -> Self {
        BoolState {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding,
        }
    }

    fn set(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Snapshot of the input relevant to gameplay.
#[derive(Debug, Clone)]
pub struct InputState {
    pub mouse_x: f32,
    pub mouse_y: f32,
    /// Primary pointer button. `key_binding` is unused.
    pub mouse_primary: BoolState,
    /// Kill every live entity.
    pub action_kill: BoolState,
    /// Leave the menu / confirm.
    pub action_start: BoolState,
    pub action_pause: BoolState,
    pub action_back: BoolState,
    /// Toggle the debug overlay.
    pub mode_debug: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            mouse_x: 0.0,
            mouse_y: 0.0,
            mouse_primary: BoolState::default(),
            action_kill: BoolState::bound(Key::A),
            action_start: BoolState::bound(Key::Enter),
            action_pause: BoolState::bound(Key::P),
            action_back: BoolState::bound(Key::Escape),
            mode_debug: BoolState::bound(Key::Tab),
        }
    }
}

impl InputState {
    /// Read the backend and update every action, including edge flags.
    pub fn sample(&mut self, source: &dyn InputSource) {
        let (x, y) = source.mouse_position();
        self.mouse_x = x;
        self.mouse_y = y;
        self.mouse_primary.set(source.is_mouse_down(MouseButton::Left));
        for action in [
            &mut self.action_kill,
            &mut self.action_start,
            &mut self.action_pause,
            &mut self.action_back,
            &mut self.mode_debug,
        ] {
            let down = source.is_key_down(action.key_binding);
            action.set(down);
        }
    }
}

/// The frame's snapshot as seen by every state. Written once per frame by
/// the frame driver, read by states during their update.
pub type SharedInput = Rc<RefCell<InputState>>;

/// One recorded frame of input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    pub mouse: (f32, f32),
    pub mouse_down: bool,
    pub keys: Vec<Key>,
}

impl InputFrame {
    pub fn pointer(x: f32, y: f32, down: bool) -> Self {
        InputFrame {
            mouse: (x, y),
            mouse_down: down,
            keys: Vec::new(),
        }
    }

    pub fn with_key(mut self, key: Key) -> Self {
        self.keys.push(key);
        self
    }
}

/// Input backend replaying a fixed list of frames.
///
/// Past the end of the script the pointer stays where it was and nothing is
/// held down.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<InputFrame>,
    cursor: usize,
    idle: InputFrame,
}

impl ScriptedInput {
    pub fn new(frames: Vec<InputFrame>) -> Self {
        ScriptedInput {
            frames,
            cursor: 0,
            idle: InputFrame::default(),
        }
    }

    /// A script that presses Enter once, then sweeps a held pointer across
    /// the screen for `frames` frames, pressing the kill key on the last one.
    pub fn demo(width: f32, height: f32, frames: usize, rng: &mut fastrand::Rng) -> Self {
        let mut script = vec![
            InputFrame::pointer(width * 0.5, height * 0.5, false).with_key(Key::Enter),
            InputFrame::pointer(width * 0.5, height * 0.5, false),
        ];
        for i in 0..frames {
            let t = i as f32 / frames.max(1) as f32;
            let x = width * (0.25 + 0.5 * t);
            let y = height * (0.5 + 0.25 * (t * std::f32::consts::TAU).sin());
            let mut frame = InputFrame::pointer(x, y, rng.bool());
            if i + 1 == frames {
                frame = frame.with_key(Key::A);
            }
            script.push(frame);
        }
        Self::new(script)
    }

    fn current(&self) -> &InputFrame {
        self.frames.get(self.cursor).unwrap_or(&self.idle)
    }

    /// Move to the next recorded frame.
    pub fn advance(&mut self) {
        if self.cursor < self.frames.len() {
            self.idle.mouse = self.frames[self.cursor].mouse;
            self.cursor += 1;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn mouse_position(&self) -> (f32, f32) {
        self.current().mouse
    }
    fn is_mouse_down(&self, button: MouseButton) -> bool {
        button == MouseButton::Left && self.current().mouse_down
    }
    fn is_key_down(&self, key: Key) -> bool {
        self.current().keys.contains(&key)
    }
}
