//! The mutable tile matrix a session plays on.

use bitflags::bitflags;
use glam::{IVec2, Vec2};
use smallvec::SmallVec;

use crate::constants::{scoring, TILE_SIZE};
use crate::map::direction::Direction;

/// The contents of a single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Wall,
    Pellet,
    Empty,
    PowerPellet,
}

impl Tile {
    pub const fn is_wall(self) -> bool {
        matches!(self, Tile::Wall)
    }

    pub const fn is_collectible(self) -> bool {
        matches!(self, Tile::Pellet | Tile::PowerPellet)
    }

    /// Points awarded for consuming this tile, if it can be consumed.
    pub const fn score_value(self) -> Option<u32> {
        match self {
            Tile::Pellet => Some(scoring::PELLET_POINTS),
            Tile::PowerPellet => Some(scoring::POWER_PELLET_POINTS),
            _ => None,
        }
    }
}

bitflags! {
    /// The set of open neighbours around a tile.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Exits: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

impl Exits {
    pub const fn from_direction(direction: Direction) -> Exits {
        match direction {
            Direction::Up => Exits::UP,
            Direction::Down => Exits::DOWN,
            Direction::Left => Exits::LEFT,
            Direction::Right => Exits::RIGHT,
        }
    }

    pub fn allows(self, direction: Direction) -> bool {
        self.contains(Exits::from_direction(direction))
    }

    /// The open directions, in [`Direction::DIRECTIONS`] order.
    pub fn directions(self) -> SmallVec<[Direction; 4]> {
        Direction::DIRECTIONS.into_iter().filter(|d| self.allows(*d)).collect()
    }
}

/// A rectangular matrix of tiles, stored row-major.
///
/// Lookups outside the matrix read as [`Tile::Wall`], except horizontally on a tunnel row where
/// they wrap around to the opposite edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Creates a grid from row-major tiles.
    ///
    /// # Panics
    ///
    /// Panics if `tiles.len() != width * height`.
    pub fn new(width: usize, height: usize, tiles: Vec<Tile>) -> Self {
        assert_eq!(tiles.len(), width * height, "tile count does not match grid dimensions");
        Self { width, height, tiles }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The size of the grid in pixels.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * TILE_SIZE
    }

    pub fn contains(&self, tile: IVec2) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as usize) < self.width && (tile.y as usize) < self.height
    }

    fn index(&self, tile: IVec2) -> Option<usize> {
        self.contains(tile)
            .then(|| tile.y as usize * self.width + tile.x as usize)
    }

    /// Reads a tile. Anything outside the matrix is a wall.
    pub fn get(&self, tile: IVec2) -> Tile {
        self.index(tile).map(|i| self.tiles[i]).unwrap_or(Tile::Wall)
    }

    pub fn set(&mut self, tile: IVec2, value: Tile) {
        if let Some(i) = self.index(tile) {
            self.tiles[i] = value;
        }
    }

    /// A row whose edge cells are open, allowing horizontal wraparound.
    pub fn is_tunnel_row(&self, row: i32) -> bool {
        if row < 0 || row as usize >= self.height {
            return false;
        }
        let left = self.get(IVec2::new(0, row));
        let right = self.get(IVec2::new(self.width as i32 - 1, row));
        !left.is_wall() || !right.is_wall()
    }

    /// Maps a possibly out-of-range coordinate onto the matrix, wrapping tunnel rows.
    pub fn resolve(&self, tile: IVec2) -> Option<IVec2> {
        if self.contains(tile) {
            Some(tile)
        } else if self.is_tunnel_row(tile.y) {
            Some(IVec2::new(tile.x.rem_euclid(self.width as i32), tile.y))
        } else {
            None
        }
    }

    /// Whether an entity may occupy the tile.
    pub fn is_passable(&self, tile: IVec2) -> bool {
        self.resolve(tile).is_some_and(|t| !self.get(t).is_wall())
    }

    /// The open neighbours of a tile.
    pub fn exits(&self, tile: IVec2) -> Exits {
        Direction::DIRECTIONS
            .into_iter()
            .filter(|d| self.is_passable(tile + d.as_ivec2()))
            .fold(Exits::empty(), |acc, d| acc | Exits::from_direction(d))
    }

    /// Clears a pellet or power pellet, returning what was consumed.
    pub fn consume(&mut self, tile: IVec2) -> Option<Tile> {
        let current = self.get(tile);
        if current.is_collectible() {
            self.set(tile, Tile::Empty);
            Some(current)
        } else {
            None
        }
    }

    /// Iterates every cell with its coordinate, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, Tile)> + '_ {
        self.tiles.iter().enumerate().map(|(i, tile)| {
            let position = IVec2::new((i % self.width) as i32, (i / self.width) as i32);
            (position, *tile)
        })
    }

    /// Number of pellets plus power pellets still on the grid.
    pub fn collectible_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_collectible()).count()
    }

    pub fn count(&self, kind: Tile) -> usize {
        self.tiles.iter().filter(|t| **t == kind).count()
    }

    /// Number of cells an entity can stand on.
    pub fn traversable_count(&self) -> usize {
        self.tiles.iter().filter(|t| !t.is_wall()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid() -> TileGrid {
        use Tile::*;
        #[rustfmt::skip]
        let tiles = vec![
            Wall,  Wall,   Wall,        Wall,
            Empty, Pellet, PowerPellet, Empty,
            Wall,  Wall,   Wall,        Wall,
        ];
        TileGrid::new(4, 3, tiles)
    }

    #[test]
    fn test_out_of_bounds_is_wall() {
        let grid = small_grid();
        assert_eq!(grid.get(IVec2::new(-1, 0)), Tile::Wall);
        assert_eq!(grid.get(IVec2::new(0, 7)), Tile::Wall);
    }

    #[test]
    fn test_tunnel_row_wraps() {
        let grid = small_grid();
        assert!(grid.is_tunnel_row(1));
        assert!(!grid.is_tunnel_row(0));
        assert_eq!(grid.resolve(IVec2::new(-1, 1)), Some(IVec2::new(3, 1)));
        assert_eq!(grid.resolve(IVec2::new(4, 1)), Some(IVec2::new(0, 1)));
        assert_eq!(grid.resolve(IVec2::new(-1, 0)), None);
        assert!(grid.is_passable(IVec2::new(-1, 1)));
    }

    #[test]
    fn test_exits() {
        let grid = small_grid();
        let exits = grid.exits(IVec2::new(0, 1));
        assert_eq!(exits, Exits::LEFT | Exits::RIGHT);
        assert_eq!(exits.directions().as_slice(), &[Direction::Left, Direction::Right]);
    }

    #[test]
    fn test_consume() {
        let mut grid = small_grid();
        assert_eq!(grid.collectible_count(), 2);
        assert_eq!(grid.consume(IVec2::new(2, 1)), Some(Tile::PowerPellet));
        assert_eq!(grid.consume(IVec2::new(2, 1)), None);
        assert_eq!(grid.consume(IVec2::new(0, 0)), None);
        assert_eq!(grid.collectible_count(), 1);
        assert_eq!(grid.traversable_count(), 4);
    }
}
