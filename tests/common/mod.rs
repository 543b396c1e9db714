#![allow(dead_code)]

use bevy_ecs::{entity::Entity, query::With, world::World};
use glam::IVec2;
use maze_chase::{
    config::SessionConfig,
    events::{GameCommand, GameEvent},
    game::Game,
    map::{grid::Tile, Maze},
    systems::{movement::tile_center, GameStage, PlayerControlled, Position, Velocity, Villain},
};

/// One display frame at 60 Hz.
pub const FRAME: f32 = 1.0 / 60.0;

pub fn seeded_config(seed: u64) -> SessionConfig {
    SessionConfig {
        seed: Some(seed),
        ..Default::default()
    }
}

/// A level 1 session with a fixed villain seed, still in its drop-in intro.
pub fn create_game() -> Game {
    Game::new(seeded_config(7)).expect("level 1 should load")
}

/// A level 1 world with the intro skipped, for driving single systems.
pub fn create_test_world() -> World {
    let mut world = create_game().world;
    start_playing(&mut world);
    world
}

pub fn start_playing(world: &mut World) {
    world.insert_resource(GameStage::Playing);
}

pub fn skip_drop_in(game: &mut Game) {
    start_playing(&mut game.world);
}

pub fn tick_frames(game: &mut Game, frames: u32) {
    for _ in 0..frames {
        game.tick(FRAME);
    }
}

pub fn send_game_event(world: &mut World, command: GameCommand) {
    world.send_event(GameEvent::Command(command));
}

pub fn player_entity(world: &mut World) -> Entity {
    world
        .query_filtered::<Entity, With<PlayerControlled>>()
        .single(world)
        .expect("exactly one player")
}

/// Villain entities in spawn order.
pub fn villain_entities(world: &mut World) -> Vec<Entity> {
    let mut villains = world
        .query::<(Entity, &Villain)>()
        .iter(world)
        .map(|(entity, villain)| (villain.index, entity))
        .collect::<Vec<_>>();
    villains.sort_by_key(|(index, _)| *index);
    villains.into_iter().map(|(_, entity)| entity).collect()
}

/// Moves an entity onto a tile centre without touching its heading.
pub fn place_at(world: &mut World, entity: Entity, tile: IVec2) {
    world
        .get_mut::<Position>(entity)
        .expect("entity has a position")
        .0 = tile_center(tile);
}

pub fn place_player(world: &mut World, tile: IVec2) {
    let player = player_entity(world);
    place_at(world, player, tile);
}

pub fn player_velocity(world: &mut World) -> Velocity {
    let player = player_entity(world);
    *world.get::<Velocity>(player).expect("player has a velocity")
}

/// Tiles of the given kind in the session's maze, in reading order.
pub fn tiles_of_kind(world: &World, kind: Tile) -> Vec<IVec2> {
    world
        .resource::<Maze>()
        .grid
        .iter()
        .filter(|(_, tile)| *tile == kind)
        .map(|(position, _)| position)
        .collect()
}
