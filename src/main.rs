use std::env;

use anyhow::Context;
use maze_chase::app::App;
use clap::Parser;
use maze_chase::config::{CliArgs, SessionConfig};
use maze_chase::constants::LOOP_TIME;
use maze_chase::formatter::FrameFormatter;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

fn init_logging() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(true)
        .event_format(FrameFormatter)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish()
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber).context("Could not set global default subscriber")
}

/// The main entry point of the application.
///
/// Parses the session configuration from the command line, opens the window and runs the game
/// loop until the player quits.
pub fn main() -> anyhow::Result<()> {
    // Help, version and usage errors print themselves and exit here.
    let args = CliArgs::try_parse_from(env::args()).unwrap_or_else(|e| e.exit());
    init_logging()?;

    let config = SessionConfig::from(args);
    let mut app = App::new(config).context("Could not create app")?;

    info!(loop_time = ?LOOP_TIME, "Starting game loop");
    while app.run() {}

    Ok(())
}
