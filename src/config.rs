//! Session configuration supplied by the host when a level is mounted.

use std::ffi::OsString;
use std::iter;
use std::path::PathBuf;

use bevy_ecs::resource::Resource;
use clap::{Parser, ValueEnum};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Global difficulty, scaling villain speed and the power pellet duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr, EnumString, EnumIter, ValueEnum)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const fn villain_speed_multiplier(self) -> f32 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.25,
        }
    }

    pub const fn power_duration_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 1.5,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 0.6,
        }
    }
}

/// Which renderer presents the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr, EnumString, EnumIter, ValueEnum)]
#[strum(ascii_case_insensitive)]
pub enum ViewMode {
    #[default]
    #[strum(serialize = "2d")]
    #[value(name = "2d")]
    TopDown,
    #[strum(serialize = "3d")]
    #[value(name = "3d")]
    FirstPerson,
}

impl ViewMode {
    pub const fn toggled(self) -> ViewMode {
        match self {
            ViewMode::TopDown => ViewMode::FirstPerson,
            ViewMode::FirstPerson => ViewMode::TopDown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr, EnumString, EnumIter, ValueEnum)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Everything the host decides before a session starts.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// 1-based level index. Out-of-range values are clamped when the maze loads.
    pub level: i32,
    pub difficulty: Difficulty,
    /// Extra multiplier on villain speed.
    pub speed_modifier: f32,
    pub view_mode: ViewMode,
    pub theme: Theme,
    pub player_sprite: Option<PathBuf>,
    pub villain_sprite: Option<PathBuf>,
    pub paused: bool,
    /// `false` runs an idle attract loop: villains roam but nothing is scored.
    pub active: bool,
    /// Halves villain speed to keep small viewports playable.
    pub narrow_viewport: bool,
    /// Seeds villain decisions. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            level: 1,
            difficulty: Difficulty::default(),
            speed_modifier: 1.0,
            view_mode: ViewMode::default(),
            theme: Theme::default(),
            player_sprite: None,
            villain_sprite: None,
            paused: false,
            active: true,
            narrow_viewport: false,
            seed: None,
        }
    }
}

/// Desktop command line.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "maze-chase", about = "Real-time maze chase", long_about = None)]
#[command(version)]
pub struct CliArgs {
    /// Level to start on (1-based, clamped to the shipped levels)
    #[arg(long)]
    pub level: Option<i32>,

    #[arg(long, value_enum, ignore_case = true)]
    pub difficulty: Option<Difficulty>,

    /// Extra multiplier on villain speed
    #[arg(long = "speed")]
    pub speed_modifier: Option<f32>,

    #[arg(long = "view", value_enum, ignore_case = true)]
    pub view_mode: Option<ViewMode>,

    #[arg(long, value_enum, ignore_case = true)]
    pub theme: Option<Theme>,

    /// Sprite image for the player
    #[arg(long)]
    pub player_sprite: Option<PathBuf>,

    /// Sprite image for the villains
    #[arg(long)]
    pub villain_sprite: Option<PathBuf>,

    /// Seed for villain decisions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Halve villain speed for small windows
    #[arg(long)]
    pub narrow: bool,

    /// Run the idle attract loop instead of live play
    #[arg(long)]
    pub attract: bool,

    /// Start paused
    #[arg(long)]
    pub paused: bool,
}

impl From<CliArgs> for SessionConfig {
    fn from(args: CliArgs) -> Self {
        let defaults = SessionConfig::default();
        Self {
            level: args.level.unwrap_or(defaults.level),
            difficulty: args.difficulty.unwrap_or(defaults.difficulty),
            speed_modifier: args.speed_modifier.unwrap_or(defaults.speed_modifier),
            view_mode: args.view_mode.unwrap_or(defaults.view_mode),
            theme: args.theme.unwrap_or(defaults.theme),
            player_sprite: args.player_sprite,
            villain_sprite: args.villain_sprite,
            paused: args.paused,
            active: !args.attract,
            narrow_viewport: args.narrow,
            seed: args.seed,
        }
    }
}

impl SessionConfig {
    /// Parses command line arguments, excluding the program name.
    ///
    /// # Errors
    ///
    /// Returns the [`clap::Error`] for unknown flags, flags missing their value, and values that
    /// fail to parse.
    pub fn from_args<I, S>(args: I) -> Result<SessionConfig, clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let argv = iter::once(OsString::from("maze-chase")).chain(args.into_iter().map(Into::into));
        CliArgs::try_parse_from(argv).map(SessionConfig::from)
    }
}
