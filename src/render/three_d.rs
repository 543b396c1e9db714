//! Pseudo-3D renderer.
//!
//! The camera trails the player at a fixed distance and eye height, looking along the eased yaw of
//! the [`CameraRig`](crate::systems::camera::CameraRig). Every wall cell, pellet and actor within
//! the render distance is rotated into camera space, perspective-divided and painted back to front.
//! With only upright boxes and billboards in the scene, sorting by depth is enough; there is no
//! depth buffer.

use glam::Vec2;

use crate::config::ViewMode;
use crate::constants::camera::{EYE_HEIGHT, FIELD_OF_VIEW, NEAR_PLANE, RENDER_DISTANCE, TRAIL_DISTANCE, WALL_HEIGHT};
use crate::constants::TILE_SIZE;
use crate::map::direction::Direction;
use crate::map::grid::Tile;
use crate::render::scene::{ActorKind, ActorSnapshot};
use crate::render::sprite::SpriteId;
use crate::render::{Rect, Renderer, SceneView, Surface};
use crate::systems::camera::CameraRig;
use crate::systems::components::VillainState;

/// Billboard height, in tiles.
const ACTOR_HEIGHT: f32 = 0.8;
/// Height at which direction indicators float, in tiles.
const INDICATOR_HEIGHT: f32 = 1.15;
/// Height the player falls from during the drop-in, in tiles.
const DROP_HEIGHT: f32 = 3.0;
/// Darkest a wall may get at the edge of the render distance.
const MIN_BRIGHTNESS: f32 = 0.15;

/// A point transformed into camera space and onto the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: Vec2,
    /// Distance along the view direction, in tiles.
    pub depth: f32,
    /// Pixels per tile at this depth.
    pub scale: f32,
}

/// A camera placed behind the player, in tile units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    pub forward: Vec2,
    pub right: Vec2,
    focal: f32,
    center: Vec2,
}

impl Camera {
    /// Trails `target` (in pixels) by [`TRAIL_DISTANCE`] along the rig's current yaw.
    pub fn behind(target: Vec2, rig: &CameraRig, surface: Vec2) -> Self {
        let forward = rig.forward();
        Self {
            position: target / TILE_SIZE - forward * TRAIL_DISTANCE,
            forward,
            right: rig.right(),
            focal: (surface.x / 2.0) / (FIELD_OF_VIEW / 2.0).tan(),
            center: surface / 2.0,
        }
    }

    /// Projects a floor point (in tiles) raised by `height` tiles. Points behind the near plane
    /// yield `None`.
    pub fn project(&self, point: Vec2, height: f32) -> Option<Projected> {
        let relative = point - self.position;
        let depth = relative.dot(self.forward);
        if depth < NEAR_PLANE {
            return None;
        }
        let scale = self.focal / depth;
        let lateral = relative.dot(self.right);
        Some(Projected {
            screen: Vec2::new(
                self.center.x + lateral * scale,
                self.center.y - (height - EYE_HEIGHT) * scale,
            ),
            depth,
            scale,
        })
    }

    /// Screen-space direction of a floor heading. Headings away from the camera point up the
    /// surface.
    pub fn screen_heading(&self, heading: Direction) -> Vec2 {
        let heading = heading.as_vec2();
        Vec2::new(heading.dot(self.right), -heading.dot(self.forward)).normalize_or_zero()
    }

    fn in_range(&self, point: Vec2) -> bool {
        point.distance(self.position) <= RENDER_DISTANCE
    }
}

/// Wall brightness at a given depth.
pub fn wall_brightness(depth: f32) -> f32 {
    (1.0 - depth / RENDER_DISTANCE).clamp(MIN_BRIGHTNESS, 1.0)
}

/// Arrow centred on `center`, pointing along `heading` on screen.
pub fn indicator_points(center: Vec2, half: f32, heading: Vec2) -> [Vec2; 3] {
    let heading = if heading == Vec2::ZERO { Vec2::Y } else { heading };
    let side = heading.perp() * half;
    let back = center - heading * (half * 0.75);
    [back - side, back + side, center + heading * (half * 0.75)]
}

enum Drawable<'a> {
    Wall(Projected),
    Pellet { at: Projected, power: bool },
    Actor { at: Projected, actor: &'a ActorSnapshot },
}

impl Drawable<'_> {
    fn depth(&self) -> f32 {
        match self {
            Drawable::Wall(at) | Drawable::Pellet { at, .. } | Drawable::Actor { at, .. } => at.depth,
        }
    }
}

pub struct Renderer3D;

impl Renderer3D {
    fn collect<'a>(view: &SceneView<'a>, camera: &Camera) -> Vec<Drawable<'a>> {
        let mut drawables = Vec::new();

        for (tile, kind) in view.grid.iter() {
            let center = tile.as_vec2() + Vec2::splat(0.5);
            if !camera.in_range(center) {
                continue;
            }
            let drawable = match kind {
                Tile::Wall => camera.project(center, 0.0).map(Drawable::Wall),
                Tile::Pellet => camera.project(center, 0.0).map(|at| Drawable::Pellet { at, power: false }),
                Tile::PowerPellet => camera.project(center, 0.0).map(|at| Drawable::Pellet { at, power: true }),
                Tile::Empty => None,
            };
            drawables.extend(drawable);
        }

        for actor in &view.scene.actors {
            let position = actor.position / TILE_SIZE;
            if !camera.in_range(position) {
                continue;
            }
            if let Some(at) = camera.project(position, 0.0) {
                drawables.push(Drawable::Actor { at, actor });
            }
        }

        drawables.sort_by(|a, b| b.depth().total_cmp(&a.depth()));
        drawables
    }

    fn draw_wall(view: &SceneView<'_>, at: &Projected, surface: &mut dyn Surface) {
        let width = at.scale;
        let height = WALL_HEIGHT * at.scale;
        let rect = Rect::new(at.screen.x - width / 2.0, at.screen.y - height, width, height);
        if rect.overlaps_area(surface.size()) {
            surface.fill_rect(rect, view.palette.wall.shaded(wall_brightness(at.depth)));
        }
    }

    fn draw_actor(
        view: &SceneView<'_>,
        camera: &Camera,
        at: &Projected,
        actor: &ActorSnapshot,
        surface: &mut dyn Surface,
    ) {
        let palette = view.palette;
        let mut lift = 0.0;
        if actor.kind == ActorKind::Player {
            lift = (1.0 - view.scene.drop_in) * DROP_HEIGHT * at.scale;
        }

        let height = ACTOR_HEIGHT * at.scale;
        let base = Vec2::new(at.screen.x, at.screen.y - lift);
        let body = Rect::new(base.x - height / 2.0, base.y - height, height, height);
        if !body.overlaps_area(surface.size()) {
            return;
        }

        let (sprite, color) = match actor.kind {
            ActorKind::Player => (SpriteId::Player, palette.player),
            ActorKind::Villain { state: VillainState::Eaten, .. } => {
                let eye = height * 0.14;
                let mid = base.y - height * 0.6;
                surface.fill_circle(Vec2::new(base.x - height * 0.18, mid), eye, palette.eyes);
                surface.fill_circle(Vec2::new(base.x + height * 0.18, mid), eye, palette.eyes);
                return;
            }
            ActorKind::Villain { index, state } => (SpriteId::Villain, palette.villain(index, state)),
        };

        let scared = actor.villain_state() == Some(VillainState::Scared);
        if view.sprites.is_ready(sprite) && !scared {
            surface.draw_sprite(sprite, Rect::FULL, body, 0.0);
        } else {
            surface.fill_circle(Vec2::new(base.x, base.y - height / 2.0), height / 2.0, color);
        }

        if actor.villain_state().is_some() {
            let half = at.scale * 0.12;
            let center = Vec2::new(base.x, base.y - INDICATOR_HEIGHT * at.scale - half * 0.75);
            let points = indicator_points(center, half, camera.screen_heading(actor.facing));
            surface.fill_triangle(points, palette.indicator);
        }
    }
}

impl Renderer for Renderer3D {
    fn mode(&self) -> ViewMode {
        ViewMode::FirstPerson
    }

    fn render(&self, view: &SceneView<'_>, surface: &mut dyn Surface) {
        let size = surface.size();
        surface.clear(view.palette.background);
        surface.fill_rect(Rect::new(0.0, 0.0, size.x, size.y / 2.0), view.palette.sky);
        surface.fill_rect(Rect::new(0.0, size.y / 2.0, size.x, size.y / 2.0), view.palette.floor);

        let Some(player) = view.scene.player() else {
            return;
        };
        let camera = Camera::behind(player.position, &view.scene.camera, size);

        for drawable in Self::collect(view, &camera) {
            match drawable {
                Drawable::Wall(at) => Self::draw_wall(view, &at, surface),
                Drawable::Pellet { at, power } => {
                    let radius = at.scale * if power { 0.22 } else { 0.08 };
                    let color = if power { view.palette.power_pellet } else { view.palette.pellet };
                    surface.fill_circle(at.screen, radius, color);
                }
                Drawable::Actor { at, actor } => Self::draw_actor(view, &camera, &at, actor, surface),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        // Player at tile (5, 5) centre, facing up.
        Camera::behind(Vec2::new(110.0, 110.0), &CameraRig::default(), Vec2::new(400.0, 300.0))
    }

    #[test]
    fn test_camera_trails_player() {
        let camera = camera();
        assert!((camera.position - Vec2::new(5.5, 5.5 + TRAIL_DISTANCE)).length() < 1e-4);
    }

    #[test]
    fn test_projection_centres_forward_points() {
        let camera = camera();
        let ahead = camera.project(Vec2::new(5.5, 2.0), EYE_HEIGHT).unwrap();
        assert!((ahead.screen.x - 200.0).abs() < 1e-3);
        assert!((ahead.screen.y - 150.0).abs() < 1e-3);

        let right = camera.project(Vec2::new(7.0, 2.0), 0.0).unwrap();
        assert!(right.screen.x > 200.0);
        assert!(right.screen.y > 150.0, "floor points sit below the horizon");
    }

    #[test]
    fn test_points_behind_camera_are_culled() {
        let camera = camera();
        assert!(camera.project(Vec2::new(5.5, 9.0), 0.0).is_none());
    }

    #[test]
    fn test_nearer_points_scale_larger() {
        let camera = camera();
        let near = camera.project(Vec2::new(5.5, 4.0), 0.0).unwrap();
        let far = camera.project(Vec2::new(5.5, 1.0), 0.0).unwrap();
        assert!(near.scale > far.scale);
        assert!(near.depth < far.depth);
    }

    #[test]
    fn test_indicator_follows_heading() {
        let camera = camera();
        let center = Vec2::new(100.0, 100.0);

        let away = indicator_points(center, 10.0, camera.screen_heading(Direction::Up));
        assert!(away[2].y < center.y && (away[2].x - center.x).abs() < 1e-4);

        let toward = indicator_points(center, 10.0, camera.screen_heading(Direction::Down));
        assert!(toward[2].y > center.y);

        let right = indicator_points(center, 10.0, camera.screen_heading(Direction::Right));
        assert!(right[2].x > center.x && (right[2].y - center.y).abs() < 1e-4);
    }

    #[test]
    fn test_indicator_turns_with_camera() {
        let rig = CameraRig::facing_towards(Direction::Right);
        let camera = Camera::behind(Vec2::new(110.0, 110.0), &rig, Vec2::new(400.0, 300.0));
        // Heading the same way as the camera reads as "away".
        assert!(camera.screen_heading(Direction::Right).y < -0.99);
        assert!(camera.screen_heading(Direction::Up).x < -0.99);
    }

    #[test]
    fn test_wall_brightness_falls_off() {
        assert_eq!(wall_brightness(0.0), 1.0);
        assert!(wall_brightness(5.0) < wall_brightness(2.0));
        assert_eq!(wall_brightness(RENDER_DISTANCE * 2.0), MIN_BRIGHTNESS);
    }
}
