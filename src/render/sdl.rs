//! SDL2 drawing back end for the desktop host.

use std::collections::HashMap;

use glam::Vec2;
use image::RgbaImage;
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::{Color as SdlColor, PixelFormatEnum};
use sdl2::rect::Rect as SdlRect;
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};

use crate::render::sprite::SpriteId;
use crate::render::{Color, Rect, Surface};

/// Rows per strip when drawing a sheared sprite.
const SHEAR_STRIP: u32 = 2;

/// Loaded sprite textures, keyed by slot.
#[derive(Default)]
pub struct SpriteTextures(pub HashMap<SpriteId, Texture>);

/// Uploads decoded RGBA pixels as an alpha-blended texture.
pub fn upload_rgba(creator: &TextureCreator<WindowContext>, pixels: &RgbaImage) -> Result<Texture, String> {
    let (width, height) = pixels.dimensions();
    let mut texture = creator
        .create_texture_static(PixelFormatEnum::RGBA32, width, height)
        .map_err(|e| e.to_string())?;
    texture
        .update(None, pixels.as_raw(), width as usize * 4)
        .map_err(|e| e.to_string())?;
    texture.set_blend_mode(BlendMode::Blend);
    Ok(texture)
}

impl From<Color> for SdlColor {
    fn from(color: Color) -> Self {
        SdlColor::RGBA(color.r, color.g, color.b, color.a)
    }
}

fn to_sdl_rect(rect: Rect) -> Option<SdlRect> {
    if rect.w < 1.0 || rect.h < 1.0 {
        return None;
    }
    Some(SdlRect::new(
        rect.x.round() as i32,
        rect.y.round() as i32,
        rect.w.round() as u32,
        rect.h.round() as u32,
    ))
}

fn clamp_i16(value: f32) -> i16 {
    value.round().clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

/// A [`Surface`] drawing straight onto the window canvas.
///
/// SDL reports failures per call; the first one of a frame is kept for the host to log.
pub struct SdlSurface<'a> {
    canvas: &'a mut Canvas<Window>,
    textures: &'a SpriteTextures,
    error: Option<String>,
}

impl<'a> SdlSurface<'a> {
    pub fn new(canvas: &'a mut Canvas<Window>, textures: &'a SpriteTextures) -> Self {
        canvas.set_blend_mode(BlendMode::Blend);
        Self {
            canvas,
            textures,
            error: None,
        }
    }

    pub fn take_error(&mut self) -> Option<String> {
        self.error.take()
    }

    fn report(&mut self, result: Result<(), String>) {
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }
}

impl Surface for SdlSurface<'_> {
    fn size(&self) -> Vec2 {
        match self.canvas.output_size() {
            Ok((w, h)) => Vec2::new(w as f32, h as f32),
            Err(_) => Vec2::ZERO,
        }
    }

    fn clear(&mut self, color: Color) {
        self.canvas.set_draw_color(SdlColor::from(color));
        self.canvas.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(rect) = to_sdl_rect(rect) else {
            return;
        };
        self.canvas.set_draw_color(SdlColor::from(color));
        let result = self.canvas.fill_rect(rect);
        self.report(result);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius < 0.5 {
            return;
        }
        let result = self
            .canvas
            .filled_circle(clamp_i16(center.x), clamp_i16(center.y), clamp_i16(radius), SdlColor::from(color));
        self.report(result);
    }

    fn fill_triangle(&mut self, [a, b, c]: [Vec2; 3], color: Color) {
        let result = self.canvas.filled_trigon(
            clamp_i16(a.x),
            clamp_i16(a.y),
            clamp_i16(b.x),
            clamp_i16(b.y),
            clamp_i16(c.x),
            clamp_i16(c.y),
            SdlColor::from(color),
        );
        self.report(result);
    }

    fn draw_sprite(&mut self, sprite: SpriteId, src: Rect, dst: Rect, shear: f32) {
        let textures = self.textures;
        let Some(texture) = textures.0.get(&sprite) else {
            return;
        };
        let query = texture.query();
        let (tw, th) = (query.width as f32, query.height as f32);
        let src = Rect::new(src.x * tw, src.y * th, src.w * tw, src.h * th);

        if shear.abs() < 0.5 {
            let result = match (to_sdl_rect(src), to_sdl_rect(dst)) {
                (Some(src), Some(dst)) => self.canvas.copy(texture, src, dst),
                _ => Ok(()),
            };
            self.report(result);
            return;
        }

        // Approximate the shear with horizontal strips slid progressively sideways.
        let rows = dst.h.max(1.0) as u32;
        let mut row = 0;
        while row < rows {
            let band = SHEAR_STRIP.min(rows - row) as f32;
            let t = row as f32 / rows as f32;
            let strip_src = Rect::new(src.x, src.y + t * src.h, src.w, (src.h * band / rows as f32).max(1.0));
            let strip_dst = Rect::new(dst.x + shear * t, dst.y + row as f32, dst.w, band);
            if let (Some(s), Some(d)) = (to_sdl_rect(strip_src), to_sdl_rect(strip_dst)) {
                let result = self.canvas.copy(texture, s, d);
                self.report(result);
            }
            row += SHEAR_STRIP;
        }
    }
}
