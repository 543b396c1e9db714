//! Kinematics shared by the player and villains.
//!
//! Entities move in fixed per-frame pixel steps through a tile grid. Headings may only change
//! when an entity's centre is within one step of a tile centre, which keeps hit-boxes from
//! cutting corners. A blocked entity has its perpendicular axis snapped back onto the tile
//! centre line and its blocked axis left alone.

use glam::{IVec2, Vec2};

use crate::constants::{HITBOX_HALF, TILE_SIZE};
use crate::map::direction::Direction;
use crate::map::grid::TileGrid;

/// The tile containing a pixel position.
pub fn tile_of(position: Vec2) -> IVec2 {
    (position / TILE_SIZE).floor().as_ivec2()
}

/// The pixel centre of a tile.
pub fn tile_center(tile: IVec2) -> Vec2 {
    (tile.as_vec2() + Vec2::splat(0.5)) * TILE_SIZE
}

/// Offset of a position from the centre of the tile it occupies.
pub fn center_offset(position: Vec2) -> Vec2 {
    position - tile_center(tile_of(position))
}

/// Whether the position is within `tolerance` of its tile centre on both axes.
pub fn is_centered(position: Vec2, tolerance: f32) -> bool {
    let offset = center_offset(position);
    offset.x.abs() <= tolerance && offset.y.abs() <= tolerance
}

/// Whether the position is within `tolerance` of the centre line for travelling in `direction`.
pub fn is_aligned_for(position: Vec2, direction: Direction, tolerance: f32) -> bool {
    let offset = center_offset(position);
    if direction.is_horizontal() {
        offset.y.abs() <= tolerance
    } else {
        offset.x.abs() <= tolerance
    }
}

/// Moves the position onto the tile centre line along `direction`, leaving the travel axis as is.
pub fn snap_perpendicular(position: Vec2, direction: Direction) -> Vec2 {
    let center = tile_center(tile_of(position));
    if direction.is_horizontal() {
        Vec2::new(position.x, center.y)
    } else {
        Vec2::new(center.x, position.y)
    }
}

/// Whether taking one step in `direction` would push a leading corner of the hit-box into a wall.
///
/// Tiles beyond the grid edge count as walls, except on tunnel rows where they wrap around.
pub fn is_blocked(grid: &TileGrid, position: Vec2, direction: Direction, step: f32) -> bool {
    let forward = direction.as_vec2();
    let lateral = Vec2::new(forward.y.abs(), forward.x.abs());
    let leading_edge = position + forward * (step + HITBOX_HALF);

    [leading_edge + lateral * HITBOX_HALF, leading_edge - lateral * HITBOX_HALF]
        .into_iter()
        .any(|corner| !grid.is_passable(tile_of(corner)))
}

/// Teleports a position that left the grid horizontally to the opposite edge.
pub fn wrap_horizontal(grid: &TileGrid, position: Vec2) -> Vec2 {
    let width = grid.pixel_size().x;
    let mut wrapped = position;
    if wrapped.x < 0.0 {
        wrapped.x += width;
    } else if wrapped.x >= width {
        wrapped.x -= width;
    }
    wrapped
}

/// Advances a position one step, wrapping through tunnels.
pub fn advance(grid: &TileGrid, position: Vec2, direction: Direction, step: f32) -> Vec2 {
    wrap_horizontal(grid, position + direction.as_vec2() * step)
}
