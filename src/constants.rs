//! This module contains all the constants used in the game.

use std::time::Duration;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of each tile, in pixels.
pub const TILE_SIZE: f32 = 20.0;

/// Gap between an entity's hit-box and the full tile edge, in pixels.
///
/// Lets an entity that is a pixel off-centre slide past a corner instead of snagging on it.
pub const WALL_MARGIN: f32 = 1.0;

/// Half-extent of an entity's square hit-box.
pub const HITBOX_HALF: f32 = TILE_SIZE / 2.0 - WALL_MARGIN;

/// Upper bound for any per-frame displacement. Faster entities could skip a wall tile entirely.
pub const MAX_STEP: f32 = TILE_SIZE / 2.0;

pub mod mechanics {
    /// Player displacement per frame, in pixels.
    pub const PLAYER_SPEED: f32 = 2.0;
    /// Villain displacement per frame on level 1 at normal difficulty.
    pub const VILLAIN_BASE_SPEED: f32 = 1.5;
    /// Additional fraction of the base villain speed gained per level after the first.
    pub const VILLAIN_LEVEL_SCALING: f32 = 0.1;
    /// Speed of an eaten villain heading back home.
    pub const VILLAIN_RETURN_SPEED: f32 = 4.0;
    /// Chance that a villain leaves its straight path at an intersection with several exits.
    pub const EXPLORE_CHANCE: f64 = 0.4;
    /// Centre-to-centre distance, as a fraction of a tile, at which the player touches a villain.
    pub const CATCH_DISTANCE: f32 = super::TILE_SIZE * 0.6;
    /// Base power pellet duration in seconds, before the difficulty multiplier.
    pub const POWER_DURATION: f64 = 6.0;
}

pub mod scoring {
    pub const PELLET_POINTS: u32 = 10;
    pub const POWER_PELLET_POINTS: u32 = 50;
    pub const VILLAIN_POINTS: u32 = 200;
}

pub mod stage {
    /// Frames spent on the drop-in intro before input is accepted.
    pub const DROP_IN_FRAMES: u32 = 90;
    /// Frames between clearing the maze and notifying the host.
    pub const WIN_DELAY_FRAMES: u32 = 90;
    /// Frames between being caught and notifying the host.
    pub const LOSS_DELAY_FRAMES: u32 = 60;
}

pub mod camera {
    /// Fraction of the remaining yaw error removed each frame.
    pub const SMOOTHING: f32 = 0.12;
    /// Distance behind the player, in tiles.
    pub const TRAIL_DISTANCE: f32 = 1.6;
    /// Eye height above the floor, in tiles.
    pub const EYE_HEIGHT: f32 = 0.55;
    /// Cells further than this from the camera are not drawn, in tiles.
    pub const RENDER_DISTANCE: f32 = 11.0;
    /// Points closer than this to the camera plane are culled, in tiles.
    pub const NEAR_PLANE: f32 = 0.15;
    /// Wall height, in tiles.
    pub const WALL_HEIGHT: f32 = 1.0;
    /// Horizontal field of view, in radians.
    pub const FIELD_OF_VIEW: f32 = 1.3;
}
