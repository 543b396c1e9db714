//! Yaw tracking for the pseudo-3D view.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use bevy_ecs::{resource::Resource, system::ResMut};
use glam::Vec2;

use crate::constants::camera::SMOOTHING;
use crate::map::direction::Direction;

/// The player-selected view quadrant and the smoothed yaw that follows it.
///
/// Yaw 0 looks towards negative Y (up the screen); positive yaw turns clockwise.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraRig {
    /// 0 = north, 1 = east, 2 = south, 3 = west.
    pub quadrant: u8,
    pub yaw: f32,
}

impl CameraRig {
    /// A rig already settled on the quadrant of `direction`.
    pub fn facing_towards(direction: Direction) -> Self {
        let quadrant = direction.quadrant();
        Self {
            quadrant,
            yaw: wrap_angle(quadrant as f32 * FRAC_PI_2),
        }
    }

    pub fn facing(&self) -> Direction {
        Direction::from_quadrant(self.quadrant)
    }

    pub fn rotate(&mut self, clockwise: bool) {
        self.quadrant = if clockwise {
            (self.quadrant + 1) % 4
        } else {
            (self.quadrant + 3) % 4
        };
    }

    pub fn target_yaw(&self) -> f32 {
        self.quadrant as f32 * FRAC_PI_2
    }

    /// Eases the yaw a fixed fraction of the remaining shortest-arc error.
    pub fn ease(&mut self) {
        let error = wrap_angle(self.target_yaw() - self.yaw);
        self.yaw = wrap_angle(self.yaw + error * SMOOTHING);
    }

    /// Unit vector the camera looks along, in grid space.
    pub fn forward(&self) -> Vec2 {
        Vec2::new(self.yaw.sin(), -self.yaw.cos())
    }

    /// Unit vector to the camera's right, in grid space.
    pub fn right(&self) -> Vec2 {
        Vec2::new(self.yaw.cos(), self.yaw.sin())
    }
}

/// Maps an angle into `[-PI, PI)`.
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

pub fn camera_system(mut rig: ResMut<CameraRig>) {
    rig.ease();
}
