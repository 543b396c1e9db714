//! Villain behaviour: per-tile direction choice, the return trip after being eaten, and the
//! power pellet timer.

use bevy_ecs::{
    resource::Resource,
    system::{Query, Res, ResMut},
};
use glam::IVec2;
use pathfinding::prelude::bfs;
use rand::{rngs::SmallRng, seq::IndexedRandom, Rng, SeedableRng};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::config::SessionConfig;
use crate::constants::{mechanics, MAX_STEP};
use crate::map::direction::Direction;
use crate::map::grid::{Exits, TileGrid};
use crate::map::parser::SpawnCorridor;
use crate::map::Maze;
use crate::platform;
use crate::systems::components::{Home, Position, PowerTimer, SessionClock, TileCursor, Velocity, Villain, VillainState};
use crate::systems::movement::{advance, is_blocked, is_centered, snap_perpendicular, tile_center, tile_of};

/// Random source for villain decisions. Seeded when the session is configured with a seed.
#[derive(Resource)]
pub struct GameRng(pub SmallRng);

impl GameRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(SmallRng::seed_from_u64(seed)),
            None => Self(platform::rng()),
        }
    }
}

/// Sends villains leaving home into alternating corridors, starting with the left.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SpawnAlternator(pub u32);

impl SpawnAlternator {
    pub fn next_side(&mut self) -> Direction {
        let side = if self.0 % 2 == 0 { Direction::Left } else { Direction::Right };
        self.0 = self.0.wrapping_add(1);
        side
    }
}

/// Per-frame villain displacement in pixels.
///
/// Scales with the level, the difficulty and the host's speed modifier; halved while scared and
/// again on narrow viewports. Never exceeds [`MAX_STEP`].
pub fn villain_speed(level: u32, config: &SessionConfig, state: VillainState) -> f32 {
    if state == VillainState::Eaten {
        return mechanics::VILLAIN_RETURN_SPEED.min(MAX_STEP);
    }

    let level_scale = 1.0 + mechanics::VILLAIN_LEVEL_SCALING * level.saturating_sub(1) as f32;
    let mut speed = mechanics::VILLAIN_BASE_SPEED
        * level_scale
        * config.difficulty.villain_speed_multiplier()
        * config.speed_modifier;

    if state == VillainState::Scared {
        speed *= 0.5;
    }
    if config.narrow_viewport {
        speed *= 0.5;
    }

    speed.max(0.0).min(MAX_STEP)
}

/// Heading out of the home region, if the villain is in or just outside it.
fn funnel_direction(
    grid: &TileGrid,
    spawn: &SpawnCorridor,
    tile: IVec2,
    heading: Option<Direction>,
    alternator: &mut SpawnAlternator,
) -> Option<Direction> {
    let open = |direction: Direction| grid.is_passable(tile + direction.as_ivec2());

    if spawn.contains(tile) {
        let toward = match tile.x.cmp(&spawn.door.x) {
            std::cmp::Ordering::Less => Direction::Right,
            std::cmp::Ordering::Greater => Direction::Left,
            std::cmp::Ordering::Equal => spawn.outward,
        };
        return open(toward).then_some(toward);
    }

    if tile == spawn.exit && heading == Some(spawn.outward) {
        let side = alternator.next_side();
        return [side, side.opposite()].into_iter().find(|d| open(*d));
    }

    None
}

/// Chooses a villain's heading on arrival at a tile centre.
///
/// Reversing is only allowed when nothing else is open. When the current heading is blocked, or
/// several headings are open and the villain decides to explore, a random open heading is taken;
/// otherwise it carries straight on.
pub fn choose_direction<R: Rng>(
    grid: &TileGrid,
    spawn: &SpawnCorridor,
    tile: IVec2,
    heading: Option<Direction>,
    alternator: &mut SpawnAlternator,
    rng: &mut R,
) -> Direction {
    if let Some(direction) = funnel_direction(grid, spawn, tile, heading, alternator) {
        return direction;
    }

    let mut exits = grid.exits(tile);
    if tile == spawn.exit {
        // Only eaten villains go back through the doorway.
        exits.remove(Exits::from_direction(spawn.outward.opposite()));
    }

    let reverse = heading.map(Direction::opposite);
    let fallback = reverse.unwrap_or(Direction::Right);
    let options: SmallVec<[Direction; 4]> = exits.directions().into_iter().filter(|d| Some(*d) != reverse).collect();

    if options.is_empty() {
        trace!(?tile, ?fallback, "Villain forced to reverse");
        return fallback;
    }

    let explore = options.len() > 1 && rng.random_bool(mechanics::EXPLORE_CHANCE);
    match heading {
        Some(current) if options.contains(&current) && !explore => current,
        _ => options.choose(rng).copied().unwrap_or(fallback),
    }
}

/// Moves scared and normal villains, deciding a new heading once per tile.
pub fn villain_movement_system(
    maze: Res<Maze>,
    config: Res<SessionConfig>,
    mut rng: ResMut<GameRng>,
    mut alternator: ResMut<SpawnAlternator>,
    mut villains: Query<(&Villain, &VillainState, &mut Position, &mut Velocity, &mut TileCursor)>,
) {
    let grid = &maze.grid;

    for (villain, state, mut position, mut velocity, mut cursor) in villains.iter_mut() {
        if *state == VillainState::Eaten {
            continue;
        }

        let step = villain_speed(maze.level, &config, *state);
        velocity.speed = step;

        let tile = tile_of(position.0);
        cursor.observe(tile);

        if cursor.decision_pending && is_centered(position.0, step) {
            let heading = choose_direction(grid, &maze.layout.spawn, tile, velocity.direction, &mut alternator, &mut rng.0);
            trace!(villain = villain.index, ?tile, direction = heading.as_ref(), "Villain decision");
            position.0 = tile_center(tile);
            velocity.set_direction(heading);
            cursor.decision_pending = false;
        }

        let Some(direction) = velocity.direction else {
            continue;
        };

        if is_blocked(grid, position.0, direction, step) {
            position.0 = snap_perpendicular(position.0, direction);
            velocity.set_direction(direction.opposite());
            cursor.decision_pending = true;
            trace!(villain = villain.index, ?tile, "Villain blocked mid-tile, reversing");
            continue;
        }

        position.0 = advance(grid, position.0, direction, step);
    }
}

/// The next tile on a shortest 4-connected route between two tiles, ignoring tunnels.
pub fn next_step_towards(grid: &TileGrid, from: IVec2, goal: IVec2) -> Option<IVec2> {
    let path = bfs(
        &from,
        |tile| {
            Direction::DIRECTIONS
                .into_iter()
                .map(|d| *tile + d.as_ivec2())
                .filter(|next| grid.contains(*next) && !grid.get(*next).is_wall())
                .collect::<SmallVec<[IVec2; 4]>>()
        },
        |tile| *tile == goal,
    )?;
    path.get(1).copied()
}

/// Steers eaten villains home along the shortest route at the return speed.
///
/// A villain first settles onto the centre line of its tile, then runs centre to centre, so its
/// centre never leaves open tiles. On arrival it becomes normal and makes a fresh decision.
pub fn eaten_villain_system(
    maze: Res<Maze>,
    config: Res<SessionConfig>,
    mut villains: Query<(&Villain, &mut VillainState, &Home, &mut Position, &mut Velocity, &mut TileCursor)>,
) {
    let grid = &maze.grid;

    for (villain, mut state, home, mut position, mut velocity, mut cursor) in villains.iter_mut() {
        if *state != VillainState::Eaten {
            continue;
        }

        let speed = villain_speed(maze.level, &config, VillainState::Eaten);
        velocity.speed = speed;

        let tile = tile_of(position.0);
        let center = tile_center(tile);
        let target = if tile == home.0 {
            home.position()
        } else {
            match next_step_towards(grid, tile, home.0) {
                Some(next) => {
                    let delta = next - tile;
                    let aligned = if delta.x != 0 {
                        position.0.y == center.y
                    } else {
                        position.0.x == center.x
                    };
                    if aligned {
                        tile_center(next)
                    } else {
                        center
                    }
                }
                None => {
                    warn!(villain = villain.index, ?tile, "No route home, respawning in place");
                    position.0 = home.position();
                    home.position()
                }
            }
        };

        let delta = target - position.0;
        let distance = delta.length();
        if distance <= speed {
            position.0 = target;
        } else {
            position.0 += delta / distance * speed;
        }
        if let Some(direction) = Direction::from_delta(delta) {
            velocity.set_direction(direction);
        }

        if position.0 == home.position() {
            debug!(villain = villain.index, "Eaten villain reached home, respawning as normal");
            *state = VillainState::Normal;
            velocity.direction = None;
            *cursor = TileCursor::armed(home.0);
        }
    }
}

/// Returns scared villains to normal once the play clock reaches the power timer.
pub fn power_expiry_system(
    clock: Res<SessionClock>,
    mut timer: ResMut<PowerTimer>,
    mut villains: Query<&mut VillainState>,
) {
    let Some(expires_at) = timer.expires_at else {
        return;
    };
    if clock.play < expires_at {
        return;
    }

    let mut recovered = 0;
    for mut state in villains.iter_mut() {
        if *state == VillainState::Scared {
            *state = VillainState::Normal;
            recovered += 1;
        }
    }
    timer.expires_at = None;
    debug!(recovered, at = clock.play, "Power pellet expired");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::parser::MapParser;

    // A small level with the home at the bottom and a T-junction above the exit.
    const BOARD: [&str; 7] = [
        "#######",
        "#P....#",
        "#.###.#",
        "#.....#",
        "###-###",
        "##GGG##",
        "#######",
    ];

    #[test]
    fn test_speed_cap_and_modifiers() {
        let mut config = SessionConfig::default();
        let normal = villain_speed(1, &config, VillainState::Normal);
        assert_eq!(normal, mechanics::VILLAIN_BASE_SPEED);
        assert_eq!(villain_speed(1, &config, VillainState::Scared), normal * 0.5);
        assert!(villain_speed(3, &config, VillainState::Normal) > normal);

        config.narrow_viewport = true;
        assert_eq!(villain_speed(1, &config, VillainState::Normal), normal * 0.5);

        config.speed_modifier = 100.0;
        assert_eq!(villain_speed(1, &config, VillainState::Normal), MAX_STEP);
        config.speed_modifier = -1.0;
        assert_eq!(villain_speed(1, &config, VillainState::Normal), 0.0);
    }

    #[test]
    fn test_alternator() {
        let mut alternator = SpawnAlternator::default();
        assert_eq!(alternator.next_side(), Direction::Left);
        assert_eq!(alternator.next_side(), Direction::Right);
        assert_eq!(alternator.next_side(), Direction::Left);
    }

    #[test]
    fn test_funnel_out_of_home() {
        let parsed = MapParser::parse_board(&BOARD).unwrap();
        let spawn = parsed.layout.spawn;
        let mut alternator = SpawnAlternator::default();
        let mut rng = SmallRng::seed_from_u64(0);
        let grid = &parsed.grid;

        assert_eq!(spawn.outward, Direction::Up);
        let mut choose = |tile: IVec2, heading| choose_direction(grid, &spawn, tile, heading, &mut alternator, &mut rng);
        assert_eq!(choose(IVec2::new(2, 5), None), Direction::Right);
        assert_eq!(choose(IVec2::new(4, 5), Some(Direction::Down)), Direction::Left);
        assert_eq!(choose(IVec2::new(3, 5), Some(Direction::Right)), Direction::Up);
        assert_eq!(choose(IVec2::new(3, 4), Some(Direction::Up)), Direction::Up);
        assert_eq!(choose(IVec2::new(3, 3), Some(Direction::Up)), Direction::Left);
        assert_eq!(choose(IVec2::new(3, 3), Some(Direction::Up)), Direction::Right);
    }

    #[test]
    fn test_never_reenters_doorway() {
        let parsed = MapParser::parse_board(&BOARD).unwrap();
        let spawn = parsed.layout.spawn;
        let mut alternator = SpawnAlternator::default();

        for seed in 0..64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let direction = choose_direction(
                &parsed.grid,
                &spawn,
                spawn.exit,
                Some(Direction::Left),
                &mut alternator,
                &mut rng,
            );
            assert_ne!(direction, Direction::Down);
            assert_ne!(direction, Direction::Right);
        }
    }

    #[test]
    fn test_dead_end_reverses() {
        let parsed = MapParser::parse_board(&BOARD).unwrap();
        let spawn = parsed.layout.spawn;
        let mut alternator = SpawnAlternator::default();
        let mut rng = SmallRng::seed_from_u64(7);

        // The corridor at (1, 2) only opens up and down.
        let direction = choose_direction(
            &parsed.grid,
            &spawn,
            IVec2::new(1, 2),
            Some(Direction::Down),
            &mut alternator,
            &mut rng,
        );
        assert_eq!(direction, Direction::Down);

        let walled_in = TileGrid::new(3, 3, vec![crate::map::grid::Tile::Wall; 9]);
        let stuck = choose_direction(&walled_in, &spawn, IVec2::new(1, 1), None, &mut alternator, &mut rng);
        assert_eq!(stuck, Direction::Right);
    }

    #[test]
    fn test_next_step_towards() {
        let parsed = MapParser::parse_board(&BOARD).unwrap();
        let grid = &parsed.grid;
        assert_eq!(next_step_towards(grid, IVec2::new(3, 3), IVec2::new(3, 5)), Some(IVec2::new(3, 4)));
        assert_eq!(next_step_towards(grid, IVec2::new(1, 1), IVec2::new(1, 3)), Some(IVec2::new(1, 2)));
        assert_eq!(next_step_towards(grid, IVec2::new(1, 1), IVec2::new(0, 0)), None);
    }
}
