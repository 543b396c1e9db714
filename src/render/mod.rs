//! Presentation back ends.
//!
//! Renderers are pure projections of a [`SceneView`] onto a [`Surface`]; they never touch the
//! simulation. The top-down and pseudo-3D back ends are selected once per session from the
//! configured [`ViewMode`].

pub mod buffer;
pub mod loader;
pub mod palette;
pub mod scene;
#[cfg(feature = "desktop")]
pub mod sdl;
pub mod sprite;
pub mod three_d;
pub mod two_d;

use glam::Vec2;

use crate::config::ViewMode;
use crate::map::grid::TileGrid;
use crate::render::palette::Palette;
use crate::render::scene::Scene;
use crate::render::sprite::{SpriteId, SpriteSlots};

pub use three_d::Renderer3D;
pub use two_d::Renderer2D;

/// An RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Scales the colour channels, keeping alpha.
    pub fn shaded(self, brightness: f32) -> Self {
        let scale = |channel: u8| (channel as f32 * brightness.clamp(0.0, 1.0)).round() as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }
}

/// An axis-aligned rectangle in surface pixels, or in normalised units for sprite sources.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// The whole of a sprite, in normalised source units.
    pub const FULL: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Whether any part of the rectangle lies within `0..width` × `0..height`.
    pub fn overlaps_area(&self, size: Vec2) -> bool {
        self.right() > 0.0 && self.bottom() > 0.0 && self.x < size.x && self.y < size.y
    }
}

/// The drawing primitives renderers are built on.
pub trait Surface {
    /// Drawable size in pixels.
    fn size(&self) -> Vec2;
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_triangle(&mut self, points: [Vec2; 3], color: Color);
    /// Draws part of a loaded sprite. `src` is normalised to the sprite's size; `shear` slides the
    /// bottom edge of `dst` sideways by that many pixels relative to the top edge.
    fn draw_sprite(&mut self, sprite: SpriteId, src: Rect, dst: Rect, shear: f32);
}

/// Shared borrows of everything a renderer may read.
#[derive(Clone, Copy)]
pub struct SceneView<'a> {
    pub grid: &'a TileGrid,
    pub scene: &'a Scene,
    pub sprites: &'a SpriteSlots,
    pub palette: &'a Palette,
}

pub trait Renderer {
    fn mode(&self) -> ViewMode;
    fn render(&self, view: &SceneView<'_>, surface: &mut dyn Surface);
}

/// Creates the back end for a view mode.
pub fn renderer_for(mode: ViewMode) -> Box<dyn Renderer> {
    match mode {
        ViewMode::TopDown => Box::new(Renderer2D),
        ViewMode::FirstPerson => Box::new(Renderer3D),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shaded() {
        let color = Color::rgb(200, 100, 0);
        assert_eq!(color.shaded(0.5), Color::rgb(100, 50, 0));
        assert_eq!(color.shaded(2.0), color);
    }

    #[test]
    fn test_rect_overlap() {
        let area = Vec2::new(100.0, 100.0);
        assert!(Rect::new(-5.0, 10.0, 10.0, 10.0).overlaps_area(area));
        assert!(!Rect::new(-15.0, 10.0, 10.0, 10.0).overlaps_area(area));
        assert!(!Rect::new(100.0, 10.0, 10.0, 10.0).overlaps_area(area));
    }

    #[test]
    fn test_renderer_for_mode() {
        assert_eq!(renderer_for(ViewMode::TopDown).mode(), ViewMode::TopDown);
        assert_eq!(renderer_for(ViewMode::FirstPerson).mode(), ViewMode::FirstPerson);
    }
}
