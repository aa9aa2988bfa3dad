//! Render backend boundary.
//!
//! Entities never talk to a graphics library directly. Their `draw` methods
//! receive a `&mut dyn Renderer` and issue primitives through it:
//! - [`Renderer::draw_texture`] – textured quad with a full [`DrawParams`] pose
//! - [`Renderer::circle`] / [`Renderer::rectangle`] – flat shapes
//! - [`Renderer::print`] – positional text
//!
//! [`CommandRecorder`] is a backend that just stores the calls. The headless
//! binary and the tests use it. The raylib backend lives in
//! [`crate::systems::render`] behind the `raylib` feature.

/// RGBA color with 8-bit channels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const RAYWHITE: Color = Color::new(245, 245, 245, 255);
    pub const GOLD: Color = Color::new(255, 203, 0, 255);
    pub const SKYBLUE: Color = Color::new(102, 191, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Same color with alpha taken from `alpha` in `[0, 1]`.
    pub fn fade(self, alpha: f32) -> Self {
        Color {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }
}

/// Fill or outline.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrawMode {
    Fill,
    Line,
}

/// Full pose of a textured draw call.
///
/// Matches the classic `draw(x, y, r, sx, sy, ox, oy, kx, ky)` signature:
/// position, rotation in radians, scale, origin offset and shear.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawParams {
    pub x: f32,
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    pub sx: f32,
    pub sy: f32,
    pub ox: f32,
    pub oy: f32,
    pub kx: f32,
    pub ky: f32,
}

impl Default for DrawParams {
    fn default() -> Self {
        DrawParams {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            sx: 1.0,
            sy: 1.0,
            ox: 0.0,
            oy: 0.0,
            kx: 0.0,
            ky: 0.0,
        }
    }
}

impl DrawParams {
    pub fn at(x: f32, y: f32) -> Self {
        DrawParams {
            x,
            y,
            ..Default::default()
        }
    }
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }
    pub fn with_scale(mut self, sx: f32, sy: f32) -> Self {
        self.sx = sx;
        self.sy = sy;
        self
    }
    pub fn with_origin(mut self, ox: f32, oy: f32) -> Self {
        self.ox = ox;
        self.oy = oy;
        self
    }
    pub fn with_shear(mut self, kx: f32, ky: f32) -> Self {
        self.kx = kx;
        self.ky = ky;
        self
    }
}

/// Drawing primitives consumed by entity and state `draw` methods.
pub trait Renderer {
    /// Draw the texture stored under `tex_key` with the given pose.
    fn draw_texture(&mut self, tex_key: &str, params: &DrawParams);
    fn circle(&mut self, mode: DrawMode, x: f32, y: f32, radius: f32, color: Color);
    fn rectangle(&mut self, mode: DrawMode, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn print(&mut self, text: &str, x: f32, y: f32);
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Texture {
        tex_key: String,
        params: DrawParams,
    },
    Circle {
        mode: DrawMode,
        x: f32,
        y: f32,
        radius: f32,
        color: Color,
    },
    Rectangle {
        mode: DrawMode,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    Print {
        text: String,
        x: f32,
        y: f32,
    },
}

/// Renderer that stores every call in order instead of drawing it.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the recorded commands, typically once per frame.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Texts of all recorded [`DrawCommand::Print`] calls.
    pub fn printed(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Print { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Renderer for CommandRecorder {
    fn draw_texture(&mut self, tex_key: &str, params: &DrawParams) {
        self.commands.push(DrawCommand::Texture {
            tex_key: tex_key.to_string(),
            params: *params,
        });
    }

    fn circle(&mut self, mode: DrawMode, x: f32, y: f32, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            mode,
            x,
            y,
            radius,
            color,
        });
    }

    fn rectangle(&mut self, mode: DrawMode, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.commands.push(DrawCommand::Rectangle {
            mode,
            x,
            y,
            w,
            h,
            color,
        });
    }

    fn print(&mut self, text: &str, x: f32, y: f32) {
        self.commands.push(DrawCommand::Print {
            text: text.to_string(),
            x,
            y,
        });
    }
}
