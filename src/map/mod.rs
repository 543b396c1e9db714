//! This module defines the maze and provides functions for interacting with it.

pub mod direction;
pub mod grid;
pub mod levels;
pub mod parser;

use bevy_ecs::resource::Resource;
use tracing::{debug, info};

use crate::error::GameResult;
use crate::map::grid::{Tile, TileGrid};
use crate::map::parser::{LevelLayout, MapParser};

/// The session's copy of a level: a mutable grid plus its static layout.
#[derive(Resource, Debug, Clone)]
pub struct Maze {
    /// 1-based level number after clamping.
    pub level: u32,
    pub grid: TileGrid,
    pub layout: LevelLayout,
    /// Pellets and power pellets present when the level was loaded.
    pub total_dots: usize,
    pub power_pellets: usize,
    pub par_time: f64,
}

impl Maze {
    pub const LEVEL_COUNT: u32 = levels::LEVELS.len() as u32;

    /// Clamps any requested level index into the shipped range.
    pub fn clamp_level(level: i32) -> u32 {
        level.clamp(1, Self::LEVEL_COUNT as i32) as u32
    }

    /// Loads a fresh copy of a level template.
    ///
    /// Every call parses the template anew, so consumption in one session never leaks into
    /// another.
    pub fn load(level: i32) -> GameResult<Maze> {
        let clamped = Self::clamp_level(level);
        if clamped as i32 != level {
            debug!(requested = level, clamped, "Level index out of range, clamping");
        }

        let index = (clamped - 1) as usize;
        let parsed = MapParser::parse_board(levels::LEVELS[index])?;
        let total_dots = parsed.grid.collectible_count();
        let power_pellets = parsed.grid.count(Tile::PowerPellet);

        info!(
            level = clamped,
            total_dots,
            power_pellets,
            villains = parsed.layout.villain_homes.len(),
            "Loaded maze"
        );

        Ok(Maze {
            level: clamped,
            grid: parsed.grid,
            layout: parsed.layout,
            total_dots,
            power_pellets,
            par_time: levels::PAR_TIMES[index],
        })
    }

    /// Pellets still on the grid.
    pub fn remaining_dots(&self) -> usize {
        self.grid.collectible_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    #[test]
    fn test_clamp_level() {
        assert_eq!(Maze::clamp_level(-4), 1);
        assert_eq!(Maze::clamp_level(0), 1);
        assert_eq!(Maze::clamp_level(2), 2);
        assert_eq!(Maze::clamp_level(99), 3);
    }

    #[test]
    fn test_load_is_fresh_copy() {
        let mut first = Maze::load(1).unwrap();
        let start = first.layout.player_start + IVec2::new(1, 0);
        assert_eq!(first.grid.consume(start), Some(Tile::Pellet));

        let second = Maze::load(1).unwrap();
        assert_eq!(second.grid.get(start), Tile::Pellet);
        assert_eq!(second.remaining_dots(), second.total_dots);
    }
}
