//! Real-time maze chase engine library crate.

#[cfg(feature = "desktop")]
pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod map;
pub mod platform;
pub mod render;
pub mod systems;
