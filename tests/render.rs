use std::path::PathBuf;

use glam::IVec2;
use maze_chase::config::{SessionConfig, Theme, ViewMode};
use maze_chase::game::Game;
use maze_chase::map::grid::Tile;
use maze_chase::map::Maze;
use maze_chase::render::buffer::{CommandBuffer, DrawCommand};
use maze_chase::render::palette::Palette;
use maze_chase::render::scene::Scene;
use maze_chase::render::sprite::SpriteId;
use maze_chase::systems::VillainState;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

const WIDTH: f32 = 760.0;
const HEIGHT: f32 = 840.0;

fn game_with(view_mode: ViewMode, theme: Theme) -> Game {
    let config = SessionConfig {
        view_mode,
        theme,
        seed: Some(21),
        player_sprite: Some(PathBuf::from("player.png")),
        villain_sprite: Some(PathBuf::from("villain.png")),
        ..Default::default()
    };
    Game::new(config).unwrap()
}

fn draw(game: &Game) -> CommandBuffer {
    let mut buffer = CommandBuffer::new(WIDTH, HEIGHT);
    game.draw(&mut buffer);
    buffer
}

fn finish_sprite_loads(game: &mut Game) {
    let mut slots = game.sprite_slots_mut().unwrap();
    slots.finish(SpriteId::Player, Ok(()));
    slots.finish(SpriteId::Villain, Ok(()));
}

fn sprite_count(buffer: &CommandBuffer, id: SpriteId) -> usize {
    buffer
        .sprites()
        .filter(|command| matches!(command, DrawCommand::Sprite { sprite, .. } if *sprite == id))
        .count()
}

fn triangle_count(buffer: &CommandBuffer) -> usize {
    buffer
        .commands
        .iter()
        .filter(|command| matches!(command, DrawCommand::Triangle { .. }))
        .count()
}

#[test]
fn test_renderer_follows_view_mode() {
    assert_eq!(game_with(ViewMode::TopDown, Theme::Dark).renderer().mode(), ViewMode::TopDown);
    assert_eq!(game_with(ViewMode::FirstPerson, Theme::Dark).renderer().mode(), ViewMode::FirstPerson);
}

#[test]
fn test_top_down_draws_every_tile() {
    let mut game = game_with(ViewMode::TopDown, Theme::Light);
    game.tick(common::FRAME);
    let buffer = draw(&game);
    let palette = Palette::for_theme(Theme::Light);
    let grid = &game.world.resource::<Maze>().grid;

    assert_eq!(buffer.commands[0], DrawCommand::Clear(palette.background));
    assert_that(&buffer.count_color(palette.wall)).is_equal_to(grid.count(Tile::Wall));
    assert_that(&buffer.count_color(palette.pellet)).is_equal_to(grid.count(Tile::Pellet));
    assert_that(&buffer.count_color(palette.power_pellet)).is_equal_to(grid.count(Tile::PowerPellet));
}

#[test]
fn test_top_down_uses_placeholders_until_sprites_load() {
    let mut game = game_with(ViewMode::TopDown, Theme::Light);
    game.tick(common::FRAME);
    let palette = Palette::for_theme(Theme::Light);

    let loading = draw(&game);
    assert_that(&loading.sprites().count()).is_equal_to(0);
    assert_that(&loading.count_color(palette.player)).is_equal_to(1);

    finish_sprite_loads(&mut game);
    let ready = draw(&game);
    let villains = game.world.resource::<Maze>().layout.villain_homes.len();
    // Each actor is drawn as an upper and a lower half.
    assert_that(&sprite_count(&ready, SpriteId::Player)).is_equal_to(2);
    assert_that(&sprite_count(&ready, SpriteId::Villain)).is_equal_to(2 * villains);
    assert_that(&ready.count_color(palette.player)).is_equal_to(0);
}

#[test]
fn test_scared_and_eaten_villains_skip_sprites() {
    let mut game = game_with(ViewMode::TopDown, Theme::Light);
    finish_sprite_loads(&mut game);
    let villains = common::villain_entities(&mut game.world);
    *game.world.get_mut::<VillainState>(villains[0]).unwrap() = VillainState::Scared;
    *game.world.get_mut::<VillainState>(villains[1]).unwrap() = VillainState::Eaten;
    game.tick(common::FRAME);

    let buffer = draw(&game);
    let palette = Palette::for_theme(Theme::Light);
    assert_that(&sprite_count(&buffer, SpriteId::Villain)).is_equal_to(2 * (villains.len() - 2));
    assert_that(&buffer.count_color(palette.eyes)).is_equal_to(2);
    // Scared placeholder: body circle plus leg block.
    assert_that(&buffer.count_color(palette.scared)).is_equal_to(2);
}

#[test]
fn test_failed_sprite_keeps_placeholder() {
    let mut game = game_with(ViewMode::TopDown, Theme::Dark);
    game.sprite_slots_mut()
        .unwrap()
        .finish(SpriteId::Player, Err("no such file".to_string()));
    game.tick(common::FRAME);

    let buffer = draw(&game);
    assert_that(&sprite_count(&buffer, SpriteId::Player)).is_equal_to(0);
}

#[test]
fn test_first_person_sky_floor_and_indicators() {
    let mut game = game_with(ViewMode::FirstPerson, Theme::Dark);
    common::skip_drop_in(&mut game);

    // Stand a villain a few tiles ahead of the player, in the direction the camera faces.
    let start = game.world.resource::<Maze>().layout.player_start;
    let villains = common::villain_entities(&mut game.world);
    common::place_at(&mut game.world, villains[0], start - IVec2::new(3, 0));
    // Keep the catch check out of the way.
    game.set_active(false);
    game.tick(common::FRAME);

    let palette = Palette::for_theme(Theme::Dark);
    let buffer = draw(&game);
    assert_eq!(buffer.commands[0], DrawCommand::Clear(palette.background));
    assert!(matches!(buffer.commands[1], DrawCommand::Rect { color, .. } if color == palette.sky));
    assert!(matches!(buffer.commands[2], DrawCommand::Rect { color, .. } if color == palette.floor));
    assert_that(&triangle_count(&buffer)).is_greater_than_or_equal_to(1);
    assert_that(&triangle_count(&buffer)).is_equal_to(buffer.count_color(palette.indicator));

    for villain in &villains {
        *game.world.get_mut::<VillainState>(*villain).unwrap() = VillainState::Eaten;
    }
    game.tick(common::FRAME);
    assert_that(&triangle_count(&draw(&game))).is_equal_to(0);
}

#[test]
fn test_first_person_player_sprite_when_ready() {
    let mut game = game_with(ViewMode::FirstPerson, Theme::Dark);
    finish_sprite_loads(&mut game);
    common::skip_drop_in(&mut game);
    game.set_active(false);
    game.tick(common::FRAME);

    let buffer = draw(&game);
    assert_that(&sprite_count(&buffer, SpriteId::Player)).is_equal_to(1);
}

#[test]
fn test_drawing_leaves_session_untouched() {
    for mode in [ViewMode::TopDown, ViewMode::FirstPerson] {
        let mut game = game_with(mode, Theme::Dark);
        common::skip_drop_in(&mut game);
        common::tick_frames(&mut game, 10);

        let scene = game.world.resource::<Scene>().clone();
        let grid = game.world.resource::<Maze>().grid.clone();
        let score = game.score();

        let first = draw(&game);
        let second = draw(&game);

        assert_eq!(first, second);
        assert_eq!(*game.world.resource::<Scene>(), scene);
        assert_eq!(game.world.resource::<Maze>().grid, grid);
        assert_eq!(game.score(), score);
    }
}

#[test]
fn test_scene_lists_player_first() {
    let mut game = game_with(ViewMode::TopDown, Theme::Dark);
    game.tick(common::FRAME);
    let scene = game.world.resource::<Scene>();

    assert_that(&scene.actors.len()).is_equal_to(4);
    assert_that(&scene.player().is_some()).is_true();
    assert_that(&scene.drop_in).is_less_than(1.0);
    assert_eq!(scene.actors[0].kind, maze_chase::render::scene::ActorKind::Player);
}
