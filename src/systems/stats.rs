//! End-of-level statistics and grading.

use strum_macros::{AsRefStr, Display};

use crate::map::Maze;
use crate::systems::components::{MovementStats, PelletCount};

/// Letter grade, ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr)]
pub enum Grade {
    F,
    D,
    C,
    B,
    A,
    S,
}

impl Grade {
    /// Grades a won level from its movement efficiency and completion time.
    ///
    /// Efficiency above 80%, 60% and 40% earns 3, 2 and 1 points; finishing under par earns 2
    /// and under 1.2 × par earns 1. Five points or more is an S, dropping a letter per point
    /// down to D.
    pub fn for_win(efficiency: f64, time_elapsed: f64, par_time: f64) -> Grade {
        let efficiency_points = if efficiency > 0.8 {
            3
        } else if efficiency > 0.6 {
            2
        } else if efficiency > 0.4 {
            1
        } else {
            0
        };

        let time_points = if time_elapsed < par_time {
            2
        } else if time_elapsed < par_time * 1.2 {
            1
        } else {
            0
        };

        match efficiency_points + time_points {
            5.. => Grade::S,
            4 => Grade::A,
            3 => Grade::B,
            2 => Grade::C,
            _ => Grade::D,
        }
    }
}

/// The record handed to the host when a level ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelStats {
    pub level_number: u32,
    pub is_win: bool,
    pub score: u32,
    /// Seconds of live play, excluding the drop-in intro and pauses.
    pub time_elapsed: f64,
    pub steps_taken: u32,
    /// Traversable tiles in the level.
    pub total_tiles: usize,
    pub unique_tiles_visited: usize,
    pub dots_collected: usize,
    pub total_dots: usize,
    pub grade: Grade,
}

impl LevelStats {
    /// Derives the stats for the current session. A loss always grades F.
    pub fn collect(
        maze: &Maze,
        score: u32,
        time_elapsed: f64,
        movement: &MovementStats,
        pellets: &PelletCount,
        is_win: bool,
    ) -> LevelStats {
        let grade = if is_win {
            Grade::for_win(movement.efficiency(), time_elapsed, maze.par_time)
        } else {
            Grade::F
        };

        LevelStats {
            level_number: maze.level,
            is_win,
            score,
            time_elapsed,
            steps_taken: movement.steps,
            total_tiles: maze.grid.traversable_count(),
            unique_tiles_visited: movement.visited.len(),
            dots_collected: pellets.collected(),
            total_dots: pellets.total,
            grade,
        }
    }

    /// Unique tiles visited per step taken.
    pub fn efficiency(&self) -> f64 {
        if self.steps_taken == 0 {
            0.0
        } else {
            self.unique_tiles_visited as f64 / self.steps_taken as f64
        }
    }
}
