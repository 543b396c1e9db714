//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod camera;
pub mod collision;
pub mod components;
pub mod input;
pub mod movement;
pub mod player;
pub mod snapshot;
pub mod stage;
pub mod stats;
pub mod villain;

pub use self::camera::*;
pub use self::collision::*;
pub use self::components::*;
pub use self::input::*;
pub use self::player::*;
pub use self::snapshot::*;
pub use self::stage::*;
pub use self::stats::*;
pub use self::villain::*;
