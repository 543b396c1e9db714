use std::collections::HashSet;

use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::{IVec2, Vec2};
use strum_macros::AsRefStr;

use crate::map::direction::Direction;
use crate::systems::movement::tile_center;

/// A tag component for entities that are controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// Centre of an entity's hit-box, in pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Heading and per-frame displacement.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    /// Pixels per frame.
    pub speed: f32,
    /// `None` while stopped.
    pub direction: Option<Direction>,
    /// The last heading, kept while stopped so sprites keep facing somewhere sensible.
    pub facing: Direction,
}

impl Velocity {
    pub fn stopped(speed: f32, facing: Direction) -> Self {
        Self {
            speed,
            direction: None,
            facing,
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = Some(direction);
        self.facing = direction;
    }

    pub fn is_moving(&self) -> bool {
        self.direction.is_some()
    }
}

/// Queued intent, committed by the movement system at the next legal moment.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferedDirection(pub Option<Direction>);

/// A chasing non-player character. `index` follows the spawn order of the level template.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Villain {
    pub index: usize,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr)]
pub enum VillainState {
    #[default]
    Normal,
    /// Fleeing at half speed until the power timer expires.
    Scared,
    /// Returning home, ignored by contact checks.
    Eaten,
}

/// The tile an eaten villain returns to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Home(pub IVec2);

impl Home {
    pub fn position(&self) -> Vec2 {
        tile_center(self.0)
    }
}

/// Edge detector for villain decisions: a decision is armed whenever the occupied tile changes
/// and fires once, when the villain reaches that tile's centre.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCursor {
    pub tile: IVec2,
    pub decision_pending: bool,
}

impl TileCursor {
    pub fn armed(tile: IVec2) -> Self {
        Self {
            tile,
            decision_pending: true,
        }
    }

    /// Records the current tile, arming a decision if it differs from the last one.
    pub fn observe(&mut self, tile: IVec2) {
        if tile != self.tile {
            self.tile = tile;
            self.decision_pending = true;
        }
    }
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub velocity: Velocity,
    pub buffered_direction: BufferedDirection,
}

#[derive(Bundle)]
pub struct VillainBundle {
    pub villain: Villain,
    pub state: VillainState,
    pub position: Position,
    pub velocity: Velocity,
    pub home: Home,
    pub cursor: TileCursor,
}

#[derive(Resource, Debug, Default)]
pub struct GlobalState {
    pub exit: bool,
    pub restart_requested: bool,
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResource(pub u32);

/// Seconds since the previous frame.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct DeltaTime(pub f32);

/// Host-controlled switches.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionFlags {
    pub paused: bool,
    /// `false` while the engine runs as an idle attract loop.
    pub active: bool,
}

/// Two clocks: `visual` always advances and drives animation, `play` advances only while the
/// level is being played and feeds scoring and the power timer.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct SessionClock {
    pub visual: f64,
    pub play: f64,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PelletCount {
    pub total: usize,
    pub remaining: usize,
}

impl PelletCount {
    pub fn new(total: usize) -> Self {
        Self { total, remaining: total }
    }

    pub fn collected(&self) -> usize {
        self.total - self.remaining
    }
}

/// Play-clock time at which scared villains recover.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct PowerTimer {
    pub expires_at: Option<f64>,
}

impl PowerTimer {
    pub fn is_active(&self, now: f64) -> bool {
        self.expires_at.is_some_and(|at| now < at)
    }
}

/// Player movement statistics used for grading.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct MovementStats {
    /// Number of tile-entry events.
    pub steps: u32,
    pub visited: HashSet<IVec2>,
    pub last_tile: IVec2,
}

impl MovementStats {
    pub fn new(start: IVec2) -> Self {
        Self {
            steps: 0,
            visited: HashSet::new(),
            last_tile: start,
        }
    }

    /// Records the tile the player occupies. Returns true when it was just entered.
    pub fn record(&mut self, tile: IVec2) -> bool {
        if tile == self.last_tile {
            return false;
        }
        self.steps += 1;
        self.visited.insert(tile);
        self.last_tile = tile;
        true
    }

    /// Unique tiles over steps, or zero before the first step.
    pub fn efficiency(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.visited.len() as f64 / self.steps as f64
        }
    }
}
