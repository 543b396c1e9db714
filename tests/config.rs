use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use maze_chase::config::{CliArgs, Difficulty, SessionConfig, Theme, ViewMode};
use maze_chase::error::GameError;
use maze_chase::game::Game;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

#[test]
fn test_defaults() {
    let config = SessionConfig::default();
    assert_eq!(config.level, 1);
    assert_eq!(config.difficulty, Difficulty::Normal);
    assert_eq!(config.view_mode, ViewMode::TopDown);
    assert_eq!(config.theme, Theme::Dark);
    assert_that(&config.active).is_true();
    assert_that(&config.paused).is_false();
    assert_that(&config.seed).is_none();
}

#[test]
fn test_from_args() {
    let config = SessionConfig::from_args(["--paused", "--villain-sprite", "assets/villain.png", "--view", "2D"]).unwrap();

    assert_eq!(
        config,
        SessionConfig {
            paused: true,
            villain_sprite: Some(PathBuf::from("assets/villain.png")),
            view_mode: ViewMode::TopDown,
            ..Default::default()
        }
    );
}

#[test]
fn test_from_args_errors() {
    let unknown = SessionConfig::from_args(["--fullscreen"]).unwrap_err();
    assert_eq!(unknown.kind(), ErrorKind::UnknownArgument);
    assert_that(&unknown.to_string()).contains("--fullscreen");

    let missing = SessionConfig::from_args(["--level"]).unwrap_err();
    assert_that(&missing.to_string()).contains("--level");

    let invalid = SessionConfig::from_args(["--difficulty", "brutal"]).unwrap_err();
    assert_eq!(invalid.kind(), ErrorKind::InvalidValue);
    assert_that(&invalid.to_string()).contains("brutal");
}

#[test]
fn test_cli_args_convert_to_config() {
    let args = CliArgs::try_parse_from(["maze-chase", "--attract", "--narrow", "--theme", "LIGHT", "--seed", "9"]).unwrap();
    let config = SessionConfig::from(args);

    assert_eq!(
        config,
        SessionConfig {
            active: false,
            narrow_viewport: true,
            theme: Theme::Light,
            seed: Some(9),
            ..Default::default()
        }
    );
}

#[test]
fn test_cli_error_converts() {
    let error: GameError = SessionConfig::from_args(["--x"]).unwrap_err().into();
    assert_that(&error.to_string()).contains("--x");
}

#[test]
fn test_difficulty_multipliers_are_ordered() {
    assert_that(&Difficulty::Easy.villain_speed_multiplier()).is_less_than(Difficulty::Hard.villain_speed_multiplier());
    assert_that(&Difficulty::Easy.power_duration_multiplier())
        .is_greater_than(Difficulty::Hard.power_duration_multiplier());
}

#[test]
fn test_session_flags_survive_restart() {
    let mut game = Game::new(SessionConfig::default()).unwrap();
    game.set_paused(true);
    game.set_active(false);
    game.restart().unwrap();

    assert_that(&game.config().paused).is_true();
    assert_that(&game.config().active).is_false();
}

#[test]
fn test_view_mode_switch_restarts() {
    let mut game = Game::new(SessionConfig::default()).unwrap();
    game.set_view_mode(ViewMode::FirstPerson).unwrap();

    assert_eq!(game.config().view_mode, ViewMode::FirstPerson);
    assert_eq!(game.renderer().mode(), ViewMode::FirstPerson);
    assert_eq!(ViewMode::FirstPerson.toggled(), ViewMode::TopDown);
}
