//! Centralized error types for the maze chase engine.
//!
//! Only setup can fail: parsing a maze template, reading configuration, or bringing up the
//! desktop host. Once a session is running every anomaly is absorbed by the simulation.

/// Main error type for the engine.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] clap::Error),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Error type for maze template parsing.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in board: {0:?}")]
    UnknownCharacter(char),
    #[error("Board is empty")]
    EmptyBoard,
    #[error("Row {row} has width {found}, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("Board has no player start")]
    MissingPlayerStart,
    #[error("Board has {0} player starts, expected exactly one")]
    DuplicatePlayerStart(usize),
    #[error("Board has no villain spawn")]
    MissingVillainSpawn,
    #[error("Home doorway must be a single tile, found {0}")]
    InvalidDoorCount(usize),
    #[error("Only {reached} of {open} open tiles are reachable from the player start")]
    Disconnected { reached: usize, open: usize },
}

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;
