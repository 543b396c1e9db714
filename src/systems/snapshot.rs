use bevy_ecs::{
    query::With,
    system::{Query, Res, ResMut},
};

use crate::constants::stage::DROP_IN_FRAMES;
use crate::render::scene::{ActorKind, ActorSnapshot, Scene};
use crate::systems::camera::CameraRig;
use crate::systems::components::{PlayerControlled, Position, ScoreResource, SessionClock, SessionFlags, Velocity, Villain, VillainState};
use crate::systems::stage::GameStage;

/// Copies the state renderers need into the [`Scene`] resource.
#[allow(clippy::too_many_arguments)]
pub fn snapshot_system(
    mut scene: ResMut<Scene>,
    rig: Res<CameraRig>,
    clock: Res<SessionClock>,
    score: Res<ScoreResource>,
    stage: Res<GameStage>,
    flags: Res<SessionFlags>,
    player: Query<(&Position, &Velocity), With<PlayerControlled>>,
    villains: Query<(&Villain, &VillainState, &Position, &Velocity)>,
) {
    scene.actors.clear();

    if let Ok((position, velocity)) = player.single() {
        scene.actors.push(ActorSnapshot {
            kind: ActorKind::Player,
            position: position.0,
            facing: velocity.facing,
            moving: velocity.is_moving(),
        });
    }

    let mut villain_actors = villains
        .iter()
        .map(|(villain, state, position, velocity)| ActorSnapshot {
            kind: ActorKind::Villain {
                index: villain.index,
                state: *state,
            },
            position: position.0,
            facing: velocity.facing,
            moving: velocity.is_moving(),
        })
        .collect::<Vec<_>>();
    villain_actors.sort_by_key(|actor| match actor.kind {
        ActorKind::Villain { index, .. } => index,
        ActorKind::Player => 0,
    });
    scene.actors.extend(villain_actors);

    scene.camera = *rig;
    scene.time = clock.visual;
    scene.score = score.0;
    scene.paused = flags.paused;
    scene.drop_in = match *stage {
        GameStage::DropIn { remaining_ticks } => 1.0 - remaining_ticks as f32 / DROP_IN_FRAMES as f32,
        _ => 1.0,
    };
}
