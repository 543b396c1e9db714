//! Map parsing functionality for converting raw board layouts into structured data.

use glam::IVec2;
use pathfinding::prelude::bfs_reach;
use tracing::trace;

use crate::error::ParseError;
use crate::map::direction::Direction;
use crate::map::grid::{Tile, TileGrid};

/// The villain home and the single doorway villains leave it through.
///
/// Derived from the board so that any level with a `-` doorway and `G` spawns gets the same
/// funnelling behaviour, wherever its home sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnCorridor {
    /// The doorway tile.
    pub door: IVec2,
    /// The first tile outside the doorway.
    pub exit: IVec2,
    /// Direction from the doorway towards the exit.
    pub outward: Direction,
    /// Inclusive bounding box of the spawn tiles and the doorway.
    pub home_min: IVec2,
    pub home_max: IVec2,
}

impl SpawnCorridor {
    /// Whether a tile is inside the home region (doorway included).
    pub fn contains(&self, tile: IVec2) -> bool {
        tile.x >= self.home_min.x && tile.x <= self.home_max.x && tile.y >= self.home_min.y && tile.y <= self.home_max.y
    }
}

/// Static placement data that accompanies a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelLayout {
    pub player_start: IVec2,
    /// One entry per villain, in reading order.
    pub villain_homes: Vec<IVec2>,
    pub spawn: SpawnCorridor,
    pub tunnel_rows: Vec<i32>,
}

/// Represents the parsed data from a raw board layout.
#[derive(Debug, Clone)]
pub struct ParsedMaze {
    pub grid: TileGrid,
    pub layout: LevelLayout,
}

/// Parser for converting raw board layouts into structured map data.
pub struct MapParser;

impl MapParser {
    /// Parses a single character into a map tile.
    ///
    /// # Returns
    ///
    /// The parsed map tile, or an error if the character is unknown.
    pub fn parse_character(c: char) -> Result<Tile, ParseError> {
        match c {
            '#' => Ok(Tile::Wall),
            '.' => Ok(Tile::Pellet),
            'o' => Ok(Tile::PowerPellet),
            ' ' => Ok(Tile::Empty),
            'P' => Ok(Tile::Empty), // Player start
            'G' => Ok(Tile::Empty), // Villain spawn
            '-' => Ok(Tile::Empty), // Home doorway
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw board layout into structured map data.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is empty or ragged, contains unknown characters, lacks a
    /// player start or villain spawn, does not have exactly one doorway tile, or has open tiles
    /// the player start cannot reach.
    pub fn parse_board(raw_board: &[&str]) -> Result<ParsedMaze, ParseError> {
        let height = raw_board.len();
        let width = raw_board.first().map(|row| row.chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(ParseError::EmptyBoard);
        }

        let mut tiles = Vec::with_capacity(width * height);
        let mut player_starts = Vec::new();
        let mut villain_homes = Vec::new();
        let mut doors = Vec::new();

        for (y, line) in raw_board.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(ParseError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, character) in line.chars().enumerate() {
                let tile = Self::parse_character(character)?;
                let position = IVec2::new(x as i32, y as i32);

                // Track special positions
                match character {
                    'P' => player_starts.push(position),
                    'G' => villain_homes.push(position),
                    '-' => doors.push(position),
                    _ => {}
                }

                tiles.push(tile);
            }
        }

        let player_start = match player_starts.as_slice() {
            [] => return Err(ParseError::MissingPlayerStart),
            [start] => *start,
            many => return Err(ParseError::DuplicatePlayerStart(many.len())),
        };
        if villain_homes.is_empty() {
            return Err(ParseError::MissingVillainSpawn);
        }
        if doors.len() != 1 {
            return Err(ParseError::InvalidDoorCount(doors.len()));
        }

        let grid = TileGrid::new(width, height, tiles);
        Self::check_connected(&grid, player_start)?;
        let spawn = Self::spawn_corridor(doors[0], &villain_homes);
        let tunnel_rows = (0..height as i32).filter(|row| grid.is_tunnel_row(*row)).collect::<Vec<_>>();

        trace!(
            width,
            height,
            villains = villain_homes.len(),
            tunnels = tunnel_rows.len(),
            "Parsed maze template"
        );

        Ok(ParsedMaze {
            grid,
            layout: LevelLayout {
                player_start,
                villain_homes,
                spawn,
                tunnel_rows,
            },
        })
    }

    /// Every open tile must be reachable from the player start, tunnels included.
    fn check_connected(grid: &TileGrid, start: IVec2) -> Result<(), ParseError> {
        let reached = bfs_reach(start, move |&tile| Self::open_neighbours(grid, tile)).count();

        let open = grid.traversable_count();
        if reached == open {
            Ok(())
        } else {
            Err(ParseError::Disconnected { reached, open })
        }
    }

    fn open_neighbours(grid: &TileGrid, tile: IVec2) -> impl Iterator<Item = IVec2> + '_ {
        Direction::DIRECTIONS
            .into_iter()
            .filter_map(move |d| grid.resolve(tile + d.as_ivec2()))
            .filter(move |next| !grid.get(*next).is_wall())
    }

    fn spawn_corridor(door: IVec2, homes: &[IVec2]) -> SpawnCorridor {
        let (min, max) = homes
            .iter()
            .fold((door, door), |(min, max), home| (min.min(*home), max.max(*home)));

        // The doorway leads away from the spawn tiles.
        let centre_y = homes.iter().map(|h| h.y).sum::<i32>() as f32 / homes.len() as f32;
        let outward = if centre_y > door.y as f32 {
            Direction::Up
        } else {
            Direction::Down
        };

        SpawnCorridor {
            door,
            exit: door + outward.as_ivec2(),
            outward,
            home_min: min,
            home_max: max,
        }
    }
}
