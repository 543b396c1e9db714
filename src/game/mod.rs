//! This module contains the session controller: the world, its schedule, and the host surface.

use bevy_ecs::change_detection::Mut;
use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::prelude::*;
use tracing::{debug, info};

use crate::config::{SessionConfig, ViewMode};
use crate::constants::mechanics;
use crate::error::GameResult;
use crate::events::{GameCommand, GameEvent, LevelOutcome};
use crate::formatter;
use crate::map::Maze;
use crate::render::palette::Palette;
use crate::render::scene::Scene;
use crate::render::sprite::SpriteSlots;
use crate::render::{renderer_for, Renderer, SceneView, Surface};
use crate::systems::input::Bindings;
use crate::systems::movement::tile_center;
use crate::systems::{
    self, initial_facing, villain_speed, BufferedDirection, CameraRig, DeltaTime, GameRng, GameStage, GlobalState, Home, Key,
    LevelStats, MovementStats, PelletCount, PlayerBundle, PlayerControlled, Position, PowerTimer, ScoreResource,
    SessionClock, SessionFlags, SpawnAlternator, TileCursor, Velocity, Villain, VillainBundle, VillainState,
};

/// Host callback receiving the stats of a finished level.
pub type LevelCallback = Box<dyn FnMut(&LevelStats)>;

/// System sets, run in declaration order every tick.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum SessionSet {
    /// Clocks and host commands
    Input,
    /// Movement of every entity
    Update,
    /// Drop-in and end-of-level timers
    Stage,
    /// Pellet consumption and contact checks
    Respond,
    /// Camera easing and the render snapshot
    Snapshot,
}

/// A single mounted game session.
///
/// Owns the ECS world holding the maze, entities and clocks, the schedule that advances them, and
/// the renderer chosen for the session's view mode. Restarting or switching levels rebuilds the
/// world from the level template but keeps the renderer, sprite slots and host callbacks.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
    config: SessionConfig,
    renderer: Box<dyn Renderer>,
    on_level_complete: Option<LevelCallback>,
    on_game_over: Option<LevelCallback>,
    last_outcome: Option<LevelStats>,
}

impl Game {
    /// Mounts a session for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`GameError`](crate::error::GameError) when the level template fails to parse.
    pub fn new(config: SessionConfig) -> GameResult<Game> {
        info!(
            level = config.level,
            difficulty = config.difficulty.as_ref(),
            view = config.view_mode.as_ref(),
            theme = config.theme.as_ref(),
            "Starting session"
        );

        let sprites = SpriteSlots::requested(config.player_sprite.clone(), config.villain_sprite.clone());
        let world = Self::build_world(&config, sprites)?;
        let mut schedule = Schedule::default();
        Self::configure_schedule(&mut schedule);

        Ok(Game {
            world,
            schedule,
            renderer: renderer_for(config.view_mode),
            config,
            on_level_complete: None,
            on_game_over: None,
            last_outcome: None,
        })
    }

    fn build_world(config: &SessionConfig, sprites: SpriteSlots) -> GameResult<World> {
        let maze = Maze::load(config.level)?;
        let mut world = World::default();

        EventRegistry::register_event::<GameEvent>(&mut world);
        EventRegistry::register_event::<LevelOutcome>(&mut world);

        let facing = initial_facing(&maze);
        let player_start = maze.layout.player_start;

        world.insert_resource(GlobalState::default());
        world.insert_resource(ScoreResource(0));
        world.insert_resource(DeltaTime(0.0));
        world.insert_resource(SessionFlags {
            paused: config.paused,
            active: config.active,
        });
        world.insert_resource(SessionClock::default());
        world.insert_resource(PelletCount::new(maze.total_dots));
        world.insert_resource(PowerTimer::default());
        world.insert_resource(MovementStats::new(player_start));
        world.insert_resource(CameraRig::facing_towards(facing));
        world.insert_resource(GameStage::default());
        world.insert_resource(GameRng::new(config.seed));
        world.insert_resource(SpawnAlternator::default());
        world.insert_resource(Bindings::for_mode(config.view_mode));
        world.insert_resource(Scene::default());
        world.insert_resource(sprites);
        world.insert_resource(config.clone());

        world.spawn(PlayerBundle {
            player: PlayerControlled,
            position: Position(tile_center(player_start)),
            velocity: Velocity::stopped(mechanics::PLAYER_SPEED, facing),
            buffered_direction: BufferedDirection::default(),
        });

        for (index, home) in maze.layout.villain_homes.iter().copied().enumerate() {
            let entity = world
                .spawn(VillainBundle {
                    villain: Villain { index },
                    state: VillainState::Normal,
                    position: Position(tile_center(home)),
                    velocity: Velocity::stopped(
                        villain_speed(maze.level, config, VillainState::Normal),
                        maze.layout.spawn.outward,
                    ),
                    home: Home(home),
                    cursor: TileCursor::armed(home),
                })
                .id();
            debug!(villain = index, ?home, ?entity, "Spawned villain");
        }

        world.insert_resource(maze);
        Ok(world)
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                (
                    systems::clock_system,
                    systems::player_control_system,
                )
                    .chain()
                    .in_set(SessionSet::Input),
                (
                    systems::power_expiry_system,
                    (
                        systems::player_movement_system.run_if(systems::is_active),
                        systems::movement_stats_system,
                    )
                        .chain(),
                    (systems::villain_movement_system, systems::eaten_villain_system).chain(),
                )
                    .chain()
                    .in_set(SessionSet::Update),
                // Runs after movement: nothing moves on the frame that ends the drop-in.
                systems::stage_system
                    .run_if(systems::is_unpaused)
                    .in_set(SessionSet::Stage),
                // Pellets first: clearing the maze on the same frame as a catch counts as a win.
                (systems::pellet_system, systems::contact_system)
                    .chain()
                    .in_set(SessionSet::Respond),
                (systems::camera_system, systems::snapshot_system)
                    .chain()
                    .in_set(SessionSet::Snapshot),
            ))
            .configure_sets(
                (
                    SessionSet::Input,
                    SessionSet::Update.run_if(systems::is_running),
                    SessionSet::Stage,
                    SessionSet::Respond.run_if(systems::is_running.and(systems::is_active)),
                    SessionSet::Snapshot,
                )
                    .chain(),
            );
    }

    /// Advances the session by one display frame.
    ///
    /// Runs the schedule once, then delivers any finished level to the host callbacks and handles
    /// a pending restart.
    ///
    /// # Returns
    ///
    /// `true` if the host should shut down (exit command received), `false` to continue
    pub fn tick(&mut self, dt: f32) -> bool {
        self.world.insert_resource(DeltaTime(dt));
        formatter::increment_frame();

        self.schedule.run(&mut self.world);

        let outcomes: Vec<LevelOutcome> = match self.world.get_resource_mut::<Events<LevelOutcome>>() {
            Some(mut events) => events.drain().collect(),
            None => Vec::new(),
        };
        for LevelOutcome(stats) in outcomes {
            self.last_outcome = Some(stats);
            let callback = if stats.is_win {
                self.on_level_complete.as_mut()
            } else {
                self.on_game_over.as_mut()
            };
            match callback {
                Some(callback) => callback(&stats),
                None => debug!(win = stats.is_win, "Level finished with no host callback registered"),
            }
        }

        if let Some(mut events) = self.world.get_resource_mut::<Events<GameEvent>>() {
            events.update();
        }

        let (exit, restart) = self
            .world
            .get_resource::<GlobalState>()
            .map_or((false, false), |state| (state.exit, state.restart_requested));

        if restart {
            if let Err(e) = self.restart() {
                tracing::error!(error = %e, "Restart failed");
            }
        }

        exit
    }

    /// Draws the latest snapshot with the session's renderer. Never mutates the simulation.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let (Some(maze), Some(scene), Some(sprites)) = (
            self.world.get_resource::<Maze>(),
            self.world.get_resource::<Scene>(),
            self.world.get_resource::<SpriteSlots>(),
        ) else {
            return;
        };

        let view = SceneView {
            grid: &maze.grid,
            scene,
            sprites,
            palette: Palette::for_theme(self.config.theme),
        };
        self.renderer.render(&view, surface);
    }

    /// Queues a command for the next tick.
    pub fn send(&mut self, command: GameCommand) {
        self.world.send_event(GameEvent::Command(command));
    }

    /// Translates a key press through the session's bindings. Unbound keys are ignored.
    pub fn handle_key(&mut self, key: Key) {
        let command = self
            .world
            .get_resource::<Bindings>()
            .and_then(|bindings| bindings.command_for(key));
        if let Some(command) = command {
            self.send(command);
        }
    }

    pub fn on_level_complete(&mut self, callback: impl FnMut(&LevelStats) + 'static) {
        self.on_level_complete = Some(Box::new(callback));
    }

    pub fn on_game_over(&mut self, callback: impl FnMut(&LevelStats) + 'static) {
        self.on_game_over = Some(Box::new(callback));
    }

    /// Rebuilds the current level from its template.
    ///
    /// # Errors
    ///
    /// Returns a [`GameError`](crate::error::GameError) when the level template fails to parse.
    pub fn restart(&mut self) -> GameResult<()> {
        if let Some(flags) = self.world.get_resource::<SessionFlags>() {
            self.config.paused = flags.paused;
            self.config.active = flags.active;
        }
        let sprites = self.world.remove_resource::<SpriteSlots>().unwrap_or_default();

        info!(level = self.config.level, "Restarting level");
        self.world = Self::build_world(&self.config, sprites)?;
        self.schedule = Schedule::default();
        Self::configure_schedule(&mut self.schedule);
        self.last_outcome = None;
        Ok(())
    }

    /// Switches to another level. Out-of-range indices are clamped.
    ///
    /// # Errors
    ///
    /// Returns a [`GameError`](crate::error::GameError) when the level template fails to parse.
    pub fn load_level(&mut self, level: i32) -> GameResult<()> {
        self.config.level = Maze::clamp_level(level) as i32;
        self.restart()
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.config.paused = paused;
        if let Some(mut flags) = self.world.get_resource_mut::<SessionFlags>() {
            flags.paused = paused;
        }
    }

    /// Switches between live play and the attract loop.
    pub fn set_active(&mut self, active: bool) {
        self.config.active = active;
        if let Some(mut flags) = self.world.get_resource_mut::<SessionFlags>() {
            flags.active = active;
        }
    }

    /// Selects another renderer. The view mode is fixed for a session, so this starts a new one.
    ///
    /// # Errors
    ///
    /// Returns a [`GameError`](crate::error::GameError) when the level template fails to parse.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> GameResult<()> {
        if mode == self.config.view_mode {
            return Ok(());
        }
        info!(view = mode.as_ref(), "Switching renderer");
        self.config.view_mode = mode;
        self.renderer = renderer_for(mode);
        self.restart()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    pub fn stage(&self) -> Option<GameStage> {
        self.world.get_resource::<GameStage>().copied()
    }

    pub fn score(&self) -> u32 {
        self.world.get_resource::<ScoreResource>().map_or(0, |score| score.0)
    }

    /// Stats for the level: frozen once it has ended, otherwise a live reading graded as if it
    /// ended now.
    pub fn stats(&self) -> Option<LevelStats> {
        match self.stage()? {
            GameStage::Celebrating { stats, .. } => return Some(stats),
            GameStage::Finished => return self.last_outcome,
            GameStage::DropIn { .. } | GameStage::Playing => {}
        }

        let maze = self.world.get_resource::<Maze>()?;
        let pellets = self.world.get_resource::<PelletCount>()?;
        Some(LevelStats::collect(
            maze,
            self.score(),
            self.world.get_resource::<SessionClock>()?.play,
            self.world.get_resource::<MovementStats>()?,
            pellets,
            pellets.remaining == 0,
        ))
    }

    /// Sprite load tracking, for hosts that load images.
    pub fn sprite_slots_mut(&mut self) -> Option<Mut<'_, SpriteSlots>> {
        self.world.get_resource_mut::<SpriteSlots>()
    }
}
