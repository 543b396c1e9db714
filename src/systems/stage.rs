use bevy_ecs::{
    event::EventWriter,
    resource::Resource,
    system::{Res, ResMut},
};
use tracing::{debug, info};

use crate::constants::stage::{DROP_IN_FRAMES, LOSS_DELAY_FRAMES, WIN_DELAY_FRAMES};
use crate::events::LevelOutcome;
use crate::systems::components::{DeltaTime, SessionClock, SessionFlags};
use crate::systems::stats::LevelStats;

/// Per-level lifecycle.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub enum GameStage {
    /// Intro animation. Rendering runs, simulation and input do not.
    DropIn {
        /// Remaining ticks in this stage
        remaining_ticks: u32,
    },
    Playing,
    /// The level has ended; stats are frozen and the host is told once the delay runs out.
    Celebrating {
        stats: LevelStats,
        /// Remaining ticks in this stage
        remaining_ticks: u32,
    },
    /// The host has been notified. Nothing moves until the session is replaced.
    Finished,
}

impl Default for GameStage {
    fn default() -> Self {
        GameStage::DropIn {
            remaining_ticks: DROP_IN_FRAMES,
        }
    }
}

impl GameStage {
    pub fn is_playing(&self) -> bool {
        matches!(self, GameStage::Playing)
    }

    /// Ends the level, starting the win or loss delay.
    pub fn conclude(&mut self, stats: LevelStats) {
        let remaining_ticks = if stats.is_win { WIN_DELAY_FRAMES } else { LOSS_DELAY_FRAMES };
        info!(
            level = stats.level_number,
            win = stats.is_win,
            score = stats.score,
            grade = %stats.grade,
            "Level concluded"
        );
        *self = GameStage::Celebrating { stats, remaining_ticks };
    }

    /// Ticks the timer by one frame, returning the stats to report once the level has ended.
    pub fn tick(&mut self) -> Option<LevelStats> {
        match self {
            GameStage::DropIn { remaining_ticks } => {
                *remaining_ticks = remaining_ticks.saturating_sub(1);
                if *remaining_ticks == 0 {
                    debug!("Drop-in finished, level is live");
                    *self = GameStage::Playing;
                }
                None
            }
            GameStage::Celebrating { stats, remaining_ticks } => {
                *remaining_ticks = remaining_ticks.saturating_sub(1);
                if *remaining_ticks == 0 {
                    let stats = *stats;
                    *self = GameStage::Finished;
                    Some(stats)
                } else {
                    None
                }
            }
            GameStage::Playing | GameStage::Finished => None,
        }
    }
}

/// Advances the stage timers and reports finished levels.
pub fn stage_system(mut stage: ResMut<GameStage>, mut outcomes: EventWriter<LevelOutcome>) {
    if let Some(stats) = stage.tick() {
        debug!(win = stats.is_win, "Reporting level outcome");
        outcomes.write(LevelOutcome(stats));
    }
}

/// Advances the visual clock every frame and the play clock only during live, unpaused play.
pub fn clock_system(
    delta_time: Res<DeltaTime>,
    stage: Res<GameStage>,
    flags: Res<SessionFlags>,
    mut clock: ResMut<SessionClock>,
) {
    let dt = delta_time.0 as f64;
    clock.visual += dt;
    if stage.is_playing() && !flags.paused {
        clock.play += dt;
    }
}

/// Run condition: the level is live and not paused.
pub fn is_running(stage: Res<GameStage>, flags: Res<SessionFlags>) -> bool {
    stage.is_playing() && !flags.paused
}

/// Run condition: the session is not an attract loop.
pub fn is_active(flags: Res<SessionFlags>) -> bool {
    flags.active
}

/// Run condition: the host has not paused the session.
pub fn is_unpaused(flags: Res<SessionFlags>) -> bool {
    !flags.paused
}
