use glam::{IVec2, Vec2};
use strum_macros::AsRefStr;

/// The four cardinal directions.
///
/// Screen coordinates grow downwards, so `Up` is negative Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr)]
#[repr(usize)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// The four cardinal directions.
    /// This is just a convenience constant for iterating over the directions.
    pub const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Returns the opposite direction. Constant time.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the direction as a unit tile offset.
    pub const fn as_ivec2(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    /// Returns the direction as a unit pixel vector.
    pub fn as_vec2(self) -> Vec2 {
        self.as_ivec2().as_vec2()
    }

    /// Returns the direction as a usize (0-3). Constant time.
    /// This is useful for indexing into arrays.
    pub const fn as_usize(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// The direction a pseudo-3D view quadrant faces (0 = north, clockwise).
    pub const fn from_quadrant(quadrant: u8) -> Direction {
        match quadrant % 4 {
            0 => Direction::Up,
            1 => Direction::Right,
            2 => Direction::Down,
            _ => Direction::Left,
        }
    }

    /// Inverse of [`Direction::from_quadrant`].
    pub const fn quadrant(self) -> u8 {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    /// Picks the dominant axis of a pixel delta. Returns `None` for a zero vector.
    pub fn from_delta(delta: Vec2) -> Option<Direction> {
        if delta == Vec2::ZERO {
            None
        } else if delta.x.abs() >= delta.y.abs() {
            Some(if delta.x > 0.0 { Direction::Right } else { Direction::Left })
        } else {
            Some(if delta.y > 0.0 { Direction::Down } else { Direction::Up })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for direction in Direction::DIRECTIONS {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
        }
    }

    #[test]
    fn test_quadrant_round_trip() {
        for direction in Direction::DIRECTIONS {
            assert_eq!(Direction::from_quadrant(direction.quadrant()), direction);
        }
        assert_eq!(Direction::from_quadrant(5), Direction::Right);
    }

    #[test]
    fn test_from_delta() {
        assert_eq!(Direction::from_delta(Vec2::new(3.0, 1.0)), Some(Direction::Right));
        assert_eq!(Direction::from_delta(Vec2::new(-0.5, 4.0)), Some(Direction::Down));
        assert_eq!(Direction::from_delta(Vec2::new(0.0, -2.0)), Some(Direction::Up));
        assert_eq!(Direction::from_delta(Vec2::ZERO), None);
    }

    #[test]
    fn test_as_ref_str() {
        assert_eq!(Direction::Left.as_ref(), "left");
    }
}
