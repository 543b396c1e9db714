use crate::config::Theme;
use crate::render::Color;
use crate::systems::components::VillainState;

/// Colours shared by both renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub wall: Color,
    pub pellet: Color,
    pub power_pellet: Color,
    pub player: Color,
    /// Cycled by villain index.
    pub villains: [Color; 4],
    pub scared: Color,
    pub eyes: Color,
    pub indicator: Color,
    pub sky: Color,
    pub floor: Color,
}

const DARK: Palette = Palette {
    background: Color::rgb(8, 8, 16),
    wall: Color::rgb(33, 33, 222),
    pellet: Color::rgb(255, 184, 151),
    power_pellet: Color::rgb(255, 184, 151),
    player: Color::rgb(255, 255, 0),
    villains: [
        Color::rgb(255, 0, 0),
        Color::rgb(255, 184, 255),
        Color::rgb(0, 255, 255),
        Color::rgb(255, 184, 82),
    ],
    scared: Color::rgb(33, 33, 255),
    eyes: Color::rgb(240, 240, 255),
    indicator: Color::rgb(255, 255, 255),
    sky: Color::rgb(4, 4, 20),
    floor: Color::rgb(20, 20, 28),
};

const LIGHT: Palette = Palette {
    background: Color::rgb(244, 241, 232),
    wall: Color::rgb(52, 73, 154),
    pellet: Color::rgb(196, 120, 70),
    power_pellet: Color::rgb(214, 88, 40),
    player: Color::rgb(232, 176, 0),
    villains: [
        Color::rgb(210, 40, 40),
        Color::rgb(214, 110, 190),
        Color::rgb(0, 150, 170),
        Color::rgb(226, 130, 30),
    ],
    scared: Color::rgb(70, 90, 220),
    eyes: Color::rgb(30, 30, 60),
    indicator: Color::rgb(40, 40, 40),
    sky: Color::rgb(190, 214, 240),
    floor: Color::rgb(210, 200, 180),
};

impl Palette {
    pub fn for_theme(theme: Theme) -> &'static Palette {
        match theme {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        }
    }

    /// Body colour for a villain, taking its state into account.
    pub fn villain(&self, index: usize, state: VillainState) -> Color {
        match state {
            VillainState::Normal => self.villains[index % self.villains.len()],
            VillainState::Scared => self.scared,
            VillainState::Eaten => self.eyes,
        }
    }
}
