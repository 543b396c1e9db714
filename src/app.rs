use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::{EventPump, Sdl};
use thousands::Separable;
use tracing::{debug, error, info, trace, warn};

use crate::config::SessionConfig;
use crate::constants::LOOP_TIME;
use crate::error::{GameError, GameResult};
use crate::game::Game;
use crate::map::Maze;
use crate::platform;
use crate::render::loader::SpriteLoader;
use crate::render::sdl::{upload_rgba, SdlSurface, SpriteTextures};
use crate::systems::{Key, LevelStats};

/// Window pixels per maze pixel.
const WINDOW_SCALE: f32 = 2.0;

/// Maps SDL key codes onto the engine's keys.
fn map_keycode(keycode: Keycode) -> Option<Key> {
    Some(match keycode {
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::W => Key::W,
        Keycode::A => Key::A,
        Keycode::S => Key::S,
        Keycode::D => Key::D,
        Keycode::P => Key::P,
        Keycode::R => Key::R,
        Keycode::Q => Key::Q,
        Keycode::Escape => Key::Escape,
        _ => return None,
    })
}

/// Main application wrapper that manages SDL initialization, window lifecycle, and the game loop.
pub struct App {
    pub game: Game,
    canvas: Canvas<Window>,
    event_pump: EventPump,
    texture_creator: TextureCreator<WindowContext>,
    textures: SpriteTextures,
    loader: SpriteLoader,
    /// Written by the level callbacks, acted on after the tick that produced it.
    finished: Rc<Cell<Option<LevelStats>>>,
    last_tick: Instant,
    focused: bool,
    _sdl_context: Sdl,
}

impl App {
    /// Initializes SDL, creates a window sized to the maze, and mounts the session.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if any SDL initialization step fails, or propagates
    /// errors from `Game::new()`.
    pub fn new(config: SessionConfig) -> GameResult<Self> {
        info!("Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(GameError::Sdl)?;
        let video_subsystem = sdl_context.video().map_err(GameError::Sdl)?;
        let event_pump = sdl_context.event_pump().map_err(GameError::Sdl)?;

        let mut game = Game::new(config)?;

        let size = game
            .world
            .get_resource::<Maze>()
            .map(|maze| maze.grid.pixel_size() * WINDOW_SCALE)
            .ok_or_else(|| GameError::InvalidState("Session has no maze".to_string()))?;
        trace!(width = size.x, height = size.y, "Creating game window");

        let window = video_subsystem
            .window("Maze Chase", size.x.round() as u32, size.y.round() as u32)
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        debug!(renderer_info = ?canvas.info(), "Canvas renderer initialized");
        let texture_creator = canvas.texture_creator();

        let finished = Rc::new(Cell::new(None));
        let on_win = Rc::clone(&finished);
        game.on_level_complete(move |stats| on_win.set(Some(*stats)));
        let on_loss = Rc::clone(&finished);
        game.on_game_over(move |stats| on_loss.set(Some(*stats)));

        info!("Application initialization completed successfully");
        Ok(App {
            game,
            canvas,
            event_pump,
            texture_creator,
            textures: SpriteTextures::default(),
            loader: SpriteLoader::default(),
            finished,
            last_tick: Instant::now(),
            focused: true,
            _sdl_context: sdl_context,
        })
    }

    /// Uploads sprites decoded since the last frame and starts decoding any new requests.
    /// A failed load leaves the placeholder.
    fn load_sprites(&mut self) {
        let Some(mut slots) = self.game.sprite_slots_mut() else {
            return;
        };

        for decoded in self.loader.poll() {
            let result = decoded
                .result
                .and_then(|pixels| upload_rgba(&self.texture_creator, &pixels))
                .map(|texture| {
                    self.textures.0.insert(decoded.sprite, texture);
                });
            slots.finish(decoded.sprite, result);
        }

        self.loader.request_pending(&slots);
    }

    /// Starts the next level after a win, or the same one again after a loss.
    fn advance_session(&mut self, stats: LevelStats) -> GameResult<()> {
        info!(
            level = stats.level_number,
            win = stats.is_win,
            score = stats.score.separate_with_commas(),
            grade = %stats.grade,
            time = format!("{:.1}s", stats.time_elapsed),
            "Level finished"
        );

        if stats.is_win {
            let next = stats.level_number % Maze::LEVEL_COUNT + 1;
            self.game.load_level(next as i32)
        } else {
            self.game.restart()
        }
    }

    fn toggle_view(&mut self) {
        let mode = self.game.config().view_mode.toggled();
        if let Err(e) = self.game.set_view_mode(mode) {
            error!(error = %e, "Failed to switch renderer");
        }
    }

    /// Executes a single frame: input, one simulation tick, drawing, and frame pacing.
    ///
    /// # Returns
    ///
    /// `true` if the game should continue running, `false` if the game requested exit.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        let events = self.event_pump.poll_iter().collect::<Vec<_>>();
        for event in events {
            match event {
                Event::Quit { .. } => {
                    info!("Exit requested");
                    return false;
                }
                Event::Window { win_event, .. } => match win_event {
                    WindowEvent::FocusGained => {
                        self.focused = true;
                        debug!("Window focus gained");
                    }
                    WindowEvent::FocusLost => {
                        self.focused = false;
                        debug!("Window focus lost");
                    }
                    _ => {}
                },
                Event::KeyDown {
                    keycode: Some(Keycode::V),
                    repeat: false,
                    ..
                } => self.toggle_view(),
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => {
                    if let Some(key) = map_keycode(keycode) {
                        self.game.handle_key(key);
                    }
                }
                _ => {}
            }
        }

        self.load_sprites();

        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = start;

        if self.game.tick(dt) {
            info!("Exit requested");
            return false;
        }

        if let Some(stats) = self.finished.take() {
            if let Err(e) = self.advance_session(stats) {
                error!(error = %e, "Failed to start the next session");
                return false;
            }
        }

        {
            let mut surface = SdlSurface::new(&mut self.canvas, &self.textures);
            self.game.draw(&mut surface);
            if let Some(e) = surface.take_error() {
                warn!(error = %e, "Drawing failed");
            }
        }
        self.canvas.present();

        if start.elapsed() < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                platform::sleep(time, self.focused);
            }
        } else {
            trace!(behind = ?(start.elapsed() - LOOP_TIME), "Frame over budget");
        }

        true
    }
}
