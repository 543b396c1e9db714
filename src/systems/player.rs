use bevy_ecs::{
    event::EventReader,
    query::With,
    system::{Query, Res, ResMut},
};
use tracing::{debug, info};

use crate::{
    events::{GameCommand, GameEvent},
    map::{direction::Direction, Maze},
    systems::{
        camera::CameraRig,
        components::{BufferedDirection, GlobalState, MovementStats, PlayerControlled, Position, SessionFlags, Velocity},
        movement::{advance, is_aligned_for, is_blocked, is_centered, snap_perpendicular, tile_center, tile_of},
        stage::GameStage,
    },
};

/// Processes host commands and updates game state accordingly.
///
/// Movement commands are buffered so a turn can be requested before the intersection is
/// reached. They are ignored outside of live play, including the drop-in intro.
pub fn player_control_system(
    mut events: EventReader<GameEvent>,
    mut state: ResMut<GlobalState>,
    mut flags: ResMut<SessionFlags>,
    mut rig: ResMut<CameraRig>,
    stage: Res<GameStage>,
    mut players: Query<&mut BufferedDirection, With<PlayerControlled>>,
) {
    let allow_input = flags.active && !flags.paused && stage.is_playing();

    for event in events.read() {
        let GameEvent::Command(command) = event;
        match *command {
            GameCommand::MovePlayer(direction) => {
                if allow_input {
                    players.iter_mut().for_each(|mut buffered| buffered.0 = Some(direction));
                }
            }
            GameCommand::AutoRun => {
                if allow_input {
                    let facing = rig.facing();
                    players.iter_mut().for_each(|mut buffered| buffered.0 = Some(facing));
                }
            }
            GameCommand::RotateCamera { clockwise } => {
                if allow_input {
                    rig.rotate(clockwise);
                    debug!(quadrant = rig.quadrant, "Camera quadrant changed");
                }
            }
            GameCommand::TogglePause => {
                flags.paused = !flags.paused;
                info!("{}", if flags.paused { "Paused" } else { "Unpaused" });
            }
            GameCommand::Restart => {
                state.restart_requested = true;
            }
            GameCommand::Exit => {
                state.exit = true;
            }
        }
    }
}

/// Advances the player one frame.
///
/// A buffered heading is committed when the player is centred on a tile (or, from a standstill,
/// aligned on the perpendicular axis) and the heading is open. Running into a wall stops the
/// player; it stays stopped until a new heading is buffered.
pub fn player_movement_system(
    maze: Res<Maze>,
    mut players: Query<(&mut Position, &mut Velocity, &mut BufferedDirection), With<PlayerControlled>>,
) {
    let grid = &maze.grid;

    for (mut position, mut velocity, mut buffered) in players.iter_mut() {
        let step = velocity.speed;

        if let Some(wanted) = buffered.0 {
            match velocity.direction {
                Some(current) if current == wanted => {
                    buffered.0 = None;
                }
                Some(_) => {
                    if is_centered(position.0, step) {
                        let center = tile_center(tile_of(position.0));
                        if !is_blocked(grid, center, wanted, step) {
                            position.0 = center;
                            velocity.set_direction(wanted);
                            buffered.0 = None;
                        }
                    }
                }
                None => {
                    if is_aligned_for(position.0, wanted, step) {
                        let aligned = snap_perpendicular(position.0, wanted);
                        if !is_blocked(grid, aligned, wanted, step) {
                            position.0 = aligned;
                            velocity.set_direction(wanted);
                            buffered.0 = None;
                        }
                    }
                }
            }
        }

        let Some(direction) = velocity.direction else {
            continue;
        };

        if is_blocked(grid, position.0, direction, step) {
            position.0 = snap_perpendicular(position.0, direction);
            velocity.direction = None;
        } else {
            position.0 = advance(grid, position.0, direction, step);
        }
    }
}

/// Counts tile-entry events for grading.
pub fn movement_stats_system(mut stats: ResMut<MovementStats>, players: Query<&Position, With<PlayerControlled>>) {
    if let Ok(position) = players.single() {
        stats.record(tile_of(position.0));
    }
}

/// Chooses the heading the player starts with: the first open one, preferring left.
pub fn initial_facing(maze: &Maze) -> Direction {
    let exits = maze.grid.exits(maze.layout.player_start);
    [Direction::Left, Direction::Right, Direction::Up, Direction::Down]
        .into_iter()
        .find(|d| exits.allows(*d))
        .unwrap_or_default()
}
