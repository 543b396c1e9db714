use maze_chase::config::{SessionConfig, ViewMode};
use maze_chase::events::GameCommand;
use maze_chase::game::Game;
use maze_chase::map::direction::Direction;
use maze_chase::systems::{BufferedDirection, Bindings, CameraRig, Key};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use strum::IntoEnumIterator;

mod common;

fn first_person_game() -> Game {
    let config = SessionConfig {
        view_mode: ViewMode::FirstPerson,
        seed: Some(7),
        ..Default::default()
    };
    Game::new(config).unwrap()
}

fn buffered(game: &mut Game) -> Option<Direction> {
    let player = common::player_entity(&mut game.world);
    game.world.get::<BufferedDirection>(player).unwrap().0
}

#[test]
fn test_top_down_bindings() {
    let bindings = Bindings::for_mode(ViewMode::TopDown);
    assert_eq!(bindings.command_for(Key::Up), Some(GameCommand::MovePlayer(Direction::Up)));
    assert_eq!(bindings.command_for(Key::S), Some(GameCommand::MovePlayer(Direction::Down)));
    assert_eq!(bindings.command_for(Key::A), Some(GameCommand::MovePlayer(Direction::Left)));
    assert_eq!(bindings.command_for(Key::Right), Some(GameCommand::MovePlayer(Direction::Right)));
    assert_eq!(bindings.command_for(Key::P), Some(GameCommand::TogglePause));
    assert_eq!(bindings.command_for(Key::R), Some(GameCommand::Restart));
    assert_eq!(bindings.command_for(Key::Escape), Some(GameCommand::Exit));
}

#[test]
fn test_every_key_is_bound_in_top_down() {
    let bindings = Bindings::default();
    for key in Key::iter() {
        assert_that(&bindings.command_for(key)).is_some();
    }
}

#[test]
fn test_first_person_bindings() {
    let bindings = Bindings::for_mode(ViewMode::FirstPerson);
    assert_eq!(bindings.command_for(Key::Left), Some(GameCommand::RotateCamera { clockwise: false }));
    assert_eq!(bindings.command_for(Key::D), Some(GameCommand::RotateCamera { clockwise: true }));
    assert_eq!(bindings.command_for(Key::W), Some(GameCommand::AutoRun));
    assert_eq!(bindings.command_for(Key::Q), Some(GameCommand::Exit));
}

#[test]
fn test_keys_ignored_during_drop_in() {
    let mut game = common::create_game();
    game.handle_key(Key::Left);
    game.tick(common::FRAME);

    assert_eq!(buffered(&mut game), None);
    assert_that(&common::player_velocity(&mut game.world).is_moving()).is_false();
}

#[test]
fn test_top_down_key_steers_player() {
    let mut game = common::create_game();
    common::skip_drop_in(&mut game);
    game.handle_key(Key::A);
    game.tick(common::FRAME);

    assert_eq!(common::player_velocity(&mut game.world).direction, Some(Direction::Left));
}

#[test]
fn test_camera_rotation_and_auto_run() {
    let mut game = first_person_game();
    common::skip_drop_in(&mut game);
    // The level 1 start opens to the left, so the camera starts facing west.
    assert_eq!(game.world.resource::<CameraRig>().facing(), Direction::Left);

    game.handle_key(Key::Right);
    game.handle_key(Key::Up);
    game.tick(common::FRAME);

    let rig = *game.world.resource::<CameraRig>();
    assert_eq!(rig.facing(), Direction::Up);
    // North of the start is a wall, so the run stays queued.
    assert_eq!(buffered(&mut game), Some(Direction::Up));
    assert_that(&common::player_velocity(&mut game.world).is_moving()).is_false();

    game.handle_key(Key::A);
    game.handle_key(Key::A);
    game.handle_key(Key::W);
    game.tick(common::FRAME);
    assert_eq!(game.world.resource::<CameraRig>().facing(), Direction::Down);
    assert_eq!(buffered(&mut game), Some(Direction::Down));
}

#[test]
fn test_camera_eases_towards_quadrant() {
    let mut game = first_person_game();
    common::skip_drop_in(&mut game);
    game.handle_key(Key::D);

    game.tick(common::FRAME);
    let early = game.world.resource::<CameraRig>().yaw;
    common::tick_frames(&mut game, 120);
    let settled = *game.world.resource::<CameraRig>();

    assert_that(&(early - settled.target_yaw()).abs()).is_greater_than(0.1);
    assert_that(&(settled.yaw - settled.target_yaw()).abs()).is_less_than(1e-3);
}

#[test]
fn test_pause_key_toggles() {
    let mut game = common::create_game();
    game.handle_key(Key::P);
    game.tick(common::FRAME);
    assert_that(&game.world.resource::<maze_chase::systems::SessionFlags>().paused).is_true();

    game.handle_key(Key::P);
    game.tick(common::FRAME);
    assert_that(&game.world.resource::<maze_chase::systems::SessionFlags>().paused).is_false();
}
