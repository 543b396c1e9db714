use glam::Vec2;

use crate::render::sprite::SpriteId;
use crate::render::{Color, Rect, Surface};

/// A recorded drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Rect { rect: Rect, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Triangle { points: [Vec2; 3], color: Color },
    Sprite { sprite: SpriteId, src: Rect, dst: Rect, shear: f32 },
}

/// A surface that records primitives instead of drawing them, for headless hosts and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandBuffer {
    size: Vec2,
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
        }
    }

    pub fn sprites(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Sprite { .. }))
    }

    pub fn count_color(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|command| match command {
                DrawCommand::Clear(c) => *c == color,
                DrawCommand::Rect { color: c, .. }
                | DrawCommand::Circle { color: c, .. }
                | DrawCommand::Triangle { color: c, .. } => *c == color,
                DrawCommand::Sprite { .. } => false,
            })
            .count()
    }
}

impl Surface for CommandBuffer {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    fn fill_triangle(&mut self, points: [Vec2; 3], color: Color) {
        self.commands.push(DrawCommand::Triangle { points, color });
    }

    fn draw_sprite(&mut self, sprite: SpriteId, src: Rect, dst: Rect, shear: f32) {
        self.commands.push(DrawCommand::Sprite { sprite, src, dst, shear });
    }
}
