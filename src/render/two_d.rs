//! Top-down renderer.

use glam::Vec2;

use crate::config::ViewMode;
use crate::constants::TILE_SIZE;
use crate::map::grid::Tile;
use crate::render::scene::{ActorKind, ActorSnapshot};
use crate::render::sprite::SpriteId;
use crate::render::{Rect, Renderer, SceneView, Surface};
use crate::systems::components::VillainState;
use crate::systems::movement::tile_center;

/// Walk cycle speed, in radians per second.
const WALK_RATE: f32 = 12.0;
/// Share of the sprite height treated as the upper body; the rest are legs.
const UPPER_SHARE: f32 = 0.6;
/// Vertical bob of the upper body, as a fraction of the sprite height.
const BOB_AMPLITUDE: f32 = 0.06;
/// Sideways sway of the legs, as a fraction of the sprite width.
const SHEAR_AMPLITUDE: f32 = 0.12;
/// Sprite size relative to a tile.
const ACTOR_SCALE: f32 = 0.9;
/// Height the player falls from during the drop-in, in tiles.
const DROP_HEIGHT: f32 = 6.0;

/// Maps maze pixels onto the surface, letterboxing to preserve aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset: Vec2,
}

impl Viewport {
    pub fn fit(maze_size: Vec2, surface_size: Vec2) -> Self {
        let scale = (surface_size.x / maze_size.x).min(surface_size.y / maze_size.y).max(0.0);
        let offset = (surface_size - maze_size * scale) / 2.0;
        Self { scale, offset }
    }

    pub fn to_screen(&self, point: Vec2) -> Vec2 {
        self.offset + point * self.scale
    }
}

/// The sinusoidal walk cycle for a sprite, as (upper body bob, leg shear), in pixels.
pub fn walk_cycle(phase: f32, moving: bool, size: f32) -> (f32, f32) {
    if !moving {
        return (0.0, 0.0);
    }
    let bob = -phase.sin().abs() * BOB_AMPLITUDE * size;
    let shear = phase.sin() * SHEAR_AMPLITUDE * size;
    (bob, shear)
}

pub struct Renderer2D;

impl Renderer2D {
    fn draw_maze(view: &SceneView<'_>, viewport: &Viewport, surface: &mut dyn Surface) {
        let palette = view.palette;
        let tile_px = TILE_SIZE * viewport.scale;
        let pulse = 0.8 + 0.2 * (view.scene.time as f32 * 6.0).sin();

        for (tile, kind) in view.grid.iter() {
            let center = viewport.to_screen(tile_center(tile));
            match kind {
                Tile::Wall => surface.fill_rect(Rect::centered(center, Vec2::splat(tile_px)), palette.wall),
                Tile::Pellet => surface.fill_circle(center, tile_px * 0.1, palette.pellet),
                Tile::PowerPellet => surface.fill_circle(center, tile_px * 0.3 * pulse, palette.power_pellet),
                Tile::Empty => {}
            }
        }
    }

    fn draw_actor(view: &SceneView<'_>, viewport: &Viewport, actor: &ActorSnapshot, surface: &mut dyn Surface) {
        let palette = view.palette;
        let size = TILE_SIZE * ACTOR_SCALE * viewport.scale;
        let mut center = viewport.to_screen(actor.position);
        if actor.kind == ActorKind::Player {
            center.y -= (1.0 - view.scene.drop_in) * DROP_HEIGHT * TILE_SIZE * viewport.scale;
        }

        let phase = view.scene.time as f32 * WALK_RATE + actor.phase_offset();
        let (bob, shear) = walk_cycle(phase, actor.moving, size);

        let (sprite, color) = match actor.kind {
            ActorKind::Player => (SpriteId::Player, palette.player),
            ActorKind::Villain { state: VillainState::Eaten, .. } => {
                // Eyes only.
                let offset = Vec2::new(size * 0.18, -size * 0.1);
                let look = actor.facing.as_vec2() * size * 0.05;
                surface.fill_circle(center - Vec2::new(offset.x, -offset.y) + look, size * 0.14, palette.eyes);
                surface.fill_circle(center + offset + look, size * 0.14, palette.eyes);
                return;
            }
            ActorKind::Villain { index, state } => (SpriteId::Villain, palette.villain(index, state)),
        };

        let scared = actor.villain_state() == Some(VillainState::Scared);
        let body = Rect::centered(center, Vec2::splat(size));

        if view.sprites.is_ready(sprite) && !scared {
            let upper_h = body.h * UPPER_SHARE;
            surface.draw_sprite(
                sprite,
                Rect::new(0.0, 0.0, 1.0, UPPER_SHARE),
                Rect::new(body.x, body.y + bob, body.w, upper_h),
                0.0,
            );
            surface.draw_sprite(
                sprite,
                Rect::new(0.0, UPPER_SHARE, 1.0, 1.0 - UPPER_SHARE),
                Rect::new(body.x, body.y + upper_h, body.w, body.h - upper_h),
                shear,
            );
            return;
        }

        // Placeholder: a round body with a leg block underneath for villains.
        if let ActorKind::Villain { .. } = actor.kind {
            let legs_h = body.h * (1.0 - UPPER_SHARE);
            surface.fill_rect(
                Rect::new(body.x + shear * 0.5, body.bottom() - legs_h, body.w, legs_h),
                color,
            );
        }
        surface.fill_circle(Vec2::new(center.x, center.y + bob), size / 2.0, color);
    }
}

impl Renderer for Renderer2D {
    fn mode(&self) -> ViewMode {
        ViewMode::TopDown
    }

    fn render(&self, view: &SceneView<'_>, surface: &mut dyn Surface) {
        let viewport = Viewport::fit(view.grid.pixel_size(), surface.size());
        surface.clear(view.palette.background);

        Self::draw_maze(view, &viewport, surface);

        // Villains first so the player is never hidden.
        for actor in view.scene.actors.iter().rev() {
            Self::draw_actor(view, &viewport, actor, surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_letterboxes() {
        let viewport = Viewport::fit(Vec2::new(100.0, 50.0), Vec2::new(200.0, 200.0));
        assert_eq!(viewport.scale, 2.0);
        assert_eq!(viewport.offset, Vec2::new(0.0, 50.0));
        assert_eq!(viewport.to_screen(Vec2::new(10.0, 10.0)), Vec2::new(20.0, 70.0));
    }

    #[test]
    fn test_walk_cycle_only_while_moving() {
        assert_eq!(walk_cycle(1.0, false, 20.0), (0.0, 0.0));
        let (bob, shear) = walk_cycle(std::f32::consts::FRAC_PI_2, true, 20.0);
        assert!(bob < 0.0);
        assert!(shear > 0.0);
    }
}
