//! raylib render backend.
//!
//! [`RaylibRenderer`] adapts any raylib draw handle to the
//! [`Renderer`](crate::resources::renderer::Renderer) trait, so states and
//! entities draw the same way into a window as into a
//! [`CommandRecorder`](crate::resources::renderer::CommandRecorder).

use log::trace;
use raylib::prelude::{Color as RlColor, RaylibDraw, Rectangle, Vector2};

use crate::resources::renderer::{Color, DrawMode, DrawParams, Renderer};
use crate::resources::texturestore::TextureStore;

const FONT_SIZE: i32 = 10;

impl From<Color> for RlColor {
    fn from(c: Color) -> Self {
        RlColor::new(c.r, c.g, c.b, c.a)
    }
}

pub struct RaylibRenderer<'a, D: RaylibDraw> {
    d: &'a mut D,
    textures: &'a TextureStore,
}

impl<'a, D: RaylibDraw> RaylibRenderer<'a, D> {
    pub fn new(d: &'a mut D, textures: &'a TextureStore) -> Self {
        RaylibRenderer { d, textures }
    }
}

impl<D: RaylibDraw> Renderer for RaylibRenderer<'_, D> {
    fn draw_texture(&mut self, tex_key: &str, params: &DrawParams) {
        let Some(tex) = self.textures.get(tex_key) else {
            trace!("no texture '{}', skipping draw", tex_key);
            return;
        };
        let (w, h) = (tex.width as f32, tex.height as f32);
        let src = Rectangle {
            x: 0.0,
            y: 0.0,
            width: w,
            height: h,
        };
        // raylib has no shear; scale goes into the destination size
        let dest = Rectangle {
            x: params.x,
            y: params.y,
            width: w * params.sx,
            height: h * params.sy,
        };
        let origin = Vector2::new(params.ox * params.sx, params.oy * params.sy);
        self.d.draw_texture_pro(
            tex,
            src,
            dest,
            origin,
            params.rotation.to_degrees(),
            RlColor::WHITE,
        );
    }

    fn circle(&mut self, mode: DrawMode, x: f32, y: f32, radius: f32, color: Color) {
        let color = RlColor::from(color);
        match mode {
            DrawMode::Fill => self.d.draw_circle_v(Vector2::new(x, y), radius, color),
            DrawMode::Line => self.d.draw_circle_lines(x as i32, y as i32, radius, color),
        }
    }

    fn rectangle(&mut self, mode: DrawMode, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let color = RlColor::from(color);
        let rec = Rectangle {
            x,
            y,
            width: w,
            height: h,
        };
        match mode {
            DrawMode::Fill => self.d.draw_rectangle_rec(rec, color),
            DrawMode::Line => self.d.draw_rectangle_lines_ex(rec, 1.0, color),
        }
    }

    fn print(&mut self, text: &str, x: f32, y: f32) {
        self.d
            .draw_text(text, x as i32, y as i32, FONT_SIZE, RlColor::BLACK);
    }
}
