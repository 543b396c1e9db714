//! The read-only snapshot renderers draw from.

use bevy_ecs::resource::Resource;
use glam::Vec2;

use crate::map::direction::Direction;
use crate::systems::camera::CameraRig;
use crate::systems::components::VillainState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActorKind {
    Player,
    Villain { index: usize, state: VillainState },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorSnapshot {
    pub kind: ActorKind,
    /// Centre, in pixels.
    pub position: Vec2,
    pub facing: Direction,
    pub moving: bool,
}

impl ActorSnapshot {
    pub fn villain_state(&self) -> Option<VillainState> {
        match self.kind {
            ActorKind::Villain { state, .. } => Some(state),
            ActorKind::Player => None,
        }
    }

    /// Offsets each actor's walk cycle so they do not step in unison.
    pub fn phase_offset(&self) -> f32 {
        match self.kind {
            ActorKind::Player => 0.0,
            ActorKind::Villain { index, .. } => 1.3 * (index as f32 + 1.0),
        }
    }
}

/// Everything about the simulation a renderer may look at, refreshed once per tick.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// The player first, then villains in spawn order.
    pub actors: Vec<ActorSnapshot>,
    pub camera: CameraRig,
    /// Visual clock, in seconds.
    pub time: f64,
    pub score: u32,
    /// Progress of the drop-in intro, from 0 (starting) to 1 (landed).
    pub drop_in: f32,
    pub paused: bool,
}

impl Scene {
    pub fn player(&self) -> Option<&ActorSnapshot> {
        self.actors.iter().find(|actor| actor.kind == ActorKind::Player)
    }
}
