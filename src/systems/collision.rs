use bevy_ecs::{
    query::{With, Without},
    system::{Query, Res, ResMut},
};
use thousands::Separable;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::constants::{mechanics, scoring};
use crate::map::grid::Tile;
use crate::map::Maze;
use crate::systems::components::{
    MovementStats, PelletCount, PlayerControlled, Position, PowerTimer, ScoreResource, SessionClock, Villain, VillainState,
};
use crate::systems::movement::tile_of;
use crate::systems::stage::GameStage;
use crate::systems::stats::LevelStats;

/// Consumes the pellet under the player's centre.
///
/// Power pellets scare every normal villain and (re)arm the power timer. Clearing the last
/// pellet wins the level.
#[allow(clippy::too_many_arguments)]
pub fn pellet_system(
    mut maze: ResMut<Maze>,
    mut score: ResMut<ScoreResource>,
    mut pellets: ResMut<PelletCount>,
    mut timer: ResMut<PowerTimer>,
    mut stage: ResMut<GameStage>,
    clock: Res<SessionClock>,
    movement: Res<MovementStats>,
    config: Res<SessionConfig>,
    player: Query<&Position, With<PlayerControlled>>,
    mut villains: Query<&mut VillainState, With<Villain>>,
) {
    if !stage.is_playing() {
        return;
    }
    let Ok(position) = player.single() else {
        return;
    };

    let tile = tile_of(position.0);
    let Some(consumed) = maze.grid.consume(tile) else {
        return;
    };

    score.0 += consumed.score_value().unwrap_or(0);
    pellets.remaining = pellets.remaining.saturating_sub(1);

    if consumed == Tile::PowerPellet {
        let duration = mechanics::POWER_DURATION * config.difficulty.power_duration_multiplier();
        timer.expires_at = Some(clock.play + duration);

        let mut scared = 0;
        for mut state in villains.iter_mut() {
            if *state == VillainState::Normal {
                *state = VillainState::Scared;
                scared += 1;
            }
        }
        debug!(?tile, scared, expires_at = clock.play + duration, "Power pellet consumed");
    }

    if pellets.remaining == 0 {
        info!(score = score.0.separate_with_commas(), "Maze cleared");
        let stats = LevelStats::collect(&maze, score.0, clock.play, &movement, &pellets, true);
        stage.conclude(stats);
    }
}

/// Resolves player and villain contact.
///
/// Touching a scared villain eats it; touching a normal one loses the level. Eaten villains are
/// ignored.
#[allow(clippy::too_many_arguments)]
pub fn contact_system(
    maze: Res<Maze>,
    mut score: ResMut<ScoreResource>,
    mut stage: ResMut<GameStage>,
    clock: Res<SessionClock>,
    movement: Res<MovementStats>,
    pellets: Res<PelletCount>,
    player: Query<&Position, With<PlayerControlled>>,
    mut villains: Query<(&Villain, &Position, &mut VillainState), Without<PlayerControlled>>,
) {
    if !stage.is_playing() {
        return;
    }
    let Ok(player_position) = player.single() else {
        return;
    };

    for (villain, position, mut state) in villains.iter_mut() {
        if player_position.0.distance(position.0) >= mechanics::CATCH_DISTANCE {
            continue;
        }

        match *state {
            VillainState::Scared => {
                *state = VillainState::Eaten;
                score.0 += scoring::VILLAIN_POINTS;
                debug!(villain = villain.index, score = score.0, "Villain eaten");
            }
            VillainState::Normal => {
                info!(villain = villain.index, "Player caught");
                let stats = LevelStats::collect(&maze, score.0, clock.play, &movement, &pellets, false);
                stage.conclude(stats);
                return;
            }
            VillainState::Eaten => {}
        }
    }
}
