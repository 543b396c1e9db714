use std::collections::HashMap;

use bevy_ecs::resource::Resource;
use strum_macros::{AsRefStr, EnumIter};

use crate::{config::ViewMode, events::GameCommand, map::direction::Direction};

/// Platform-independent keys the engine understands. Hosts translate their own key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    P,
    R,
    Q,
    Escape,
}

#[derive(Debug, Clone, Resource)]
pub struct Bindings {
    key_bindings: HashMap<Key, GameCommand>,
}

impl Bindings {
    /// Arrow keys steer in the top-down view. In the pseudo-3D view left/right cycle the camera
    /// quadrant and up commits to running the way the camera faces.
    pub fn for_mode(mode: ViewMode) -> Self {
        let mut key_bindings = HashMap::new();

        match mode {
            ViewMode::TopDown => {
                key_bindings.insert(Key::Up, GameCommand::MovePlayer(Direction::Up));
                key_bindings.insert(Key::W, GameCommand::MovePlayer(Direction::Up));
                key_bindings.insert(Key::Down, GameCommand::MovePlayer(Direction::Down));
                key_bindings.insert(Key::S, GameCommand::MovePlayer(Direction::Down));
                key_bindings.insert(Key::Left, GameCommand::MovePlayer(Direction::Left));
                key_bindings.insert(Key::A, GameCommand::MovePlayer(Direction::Left));
                key_bindings.insert(Key::Right, GameCommand::MovePlayer(Direction::Right));
                key_bindings.insert(Key::D, GameCommand::MovePlayer(Direction::Right));
            }
            ViewMode::FirstPerson => {
                key_bindings.insert(Key::Left, GameCommand::RotateCamera { clockwise: false });
                key_bindings.insert(Key::A, GameCommand::RotateCamera { clockwise: false });
                key_bindings.insert(Key::Right, GameCommand::RotateCamera { clockwise: true });
                key_bindings.insert(Key::D, GameCommand::RotateCamera { clockwise: true });
                key_bindings.insert(Key::Up, GameCommand::AutoRun);
                key_bindings.insert(Key::W, GameCommand::AutoRun);
            }
        }

        // Game actions
        key_bindings.insert(Key::P, GameCommand::TogglePause);
        key_bindings.insert(Key::R, GameCommand::Restart);
        key_bindings.insert(Key::Escape, GameCommand::Exit);
        key_bindings.insert(Key::Q, GameCommand::Exit);

        Self { key_bindings }
    }

    pub fn command_for(&self, key: Key) -> Option<GameCommand> {
        self.key_bindings.get(&key).copied()
    }
}

impl Default for Bindings {
    fn default() -> Self {
        Self::for_mode(ViewMode::TopDown)
    }
}
