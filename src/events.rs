use bevy_ecs::prelude::*;

use crate::map::direction::Direction;
use crate::systems::stats::LevelStats;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Exit,
    /// Queue a heading for the player (top-down view).
    MovePlayer(Direction),
    /// Cycle the pseudo-3D view quadrant.
    RotateCamera { clockwise: bool },
    /// Queue the heading the pseudo-3D camera currently faces.
    AutoRun,
    TogglePause,
    Restart,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

/// Emitted once per level, after the celebration or loss delay has elapsed.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct LevelOutcome(pub LevelStats);
