//! Load tracking for host-supplied sprite images.
//!
//! Loading happens outside the engine. Renderers only ask whether a sprite is ready and fall back
//! to flat placeholders until it is, so no frame ever waits on an image.

use std::path::PathBuf;

use bevy_ecs::resource::Resource;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{AsRefStr, EnumCount as EnumCountMacro, EnumIter};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter, EnumCountMacro)]
#[strum(serialize_all = "lowercase")]
pub enum SpriteId {
    Player,
    Villain,
}

impl SpriteId {
    const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SpriteSlot {
    #[default]
    Missing,
    Loading(PathBuf),
    Ready(PathBuf),
    Failed { source: PathBuf, reason: String },
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct SpriteSlots {
    slots: [SpriteSlot; SpriteId::COUNT],
}

impl SpriteSlots {
    /// Slots for the configured sprite sources, each waiting on the host.
    pub fn requested(player: Option<PathBuf>, villain: Option<PathBuf>) -> Self {
        let mut slots = Self::default();
        if let Some(source) = player {
            slots.begin(SpriteId::Player, source);
        }
        if let Some(source) = villain {
            slots.begin(SpriteId::Villain, source);
        }
        slots
    }

    pub fn get(&self, sprite: SpriteId) -> &SpriteSlot {
        &self.slots[sprite.index()]
    }

    pub fn is_ready(&self, sprite: SpriteId) -> bool {
        matches!(self.get(sprite), SpriteSlot::Ready(_))
    }

    pub fn begin(&mut self, sprite: SpriteId, source: PathBuf) {
        debug!(sprite = sprite.as_ref(), source = %source.display(), "Sprite load requested");
        self.slots[sprite.index()] = SpriteSlot::Loading(source);
    }

    /// Records the result of a host-side load. Results for slots no longer loading are ignored.
    pub fn finish(&mut self, sprite: SpriteId, result: Result<(), String>) {
        let slot = &mut self.slots[sprite.index()];
        let SpriteSlot::Loading(source) = slot else {
            return;
        };
        let source = std::mem::take(source);

        *slot = match result {
            Ok(()) => {
                debug!(sprite = sprite.as_ref(), "Sprite ready");
                SpriteSlot::Ready(source)
            }
            Err(reason) => {
                warn!(sprite = sprite.as_ref(), %reason, "Sprite failed to load, using placeholder");
                SpriteSlot::Failed { source, reason }
            }
        };
    }

    /// Sprites the host still needs to load.
    pub fn pending(&self) -> impl Iterator<Item = (SpriteId, &PathBuf)> + '_ {
        SpriteId::iter().filter_map(|sprite| match self.get(sprite) {
            SpriteSlot::Loading(source) => Some((sprite, source)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_lifecycle() {
        let mut slots = SpriteSlots::requested(Some("hero.png".into()), Some("foe.png".into()));
        assert_eq!(slots.pending().count(), 2);
        assert!(!slots.is_ready(SpriteId::Player));

        slots.finish(SpriteId::Player, Ok(()));
        slots.finish(SpriteId::Villain, Err("bad header".into()));

        assert!(slots.is_ready(SpriteId::Player));
        assert!(!slots.is_ready(SpriteId::Villain));
        assert!(matches!(slots.get(SpriteId::Villain), SpriteSlot::Failed { reason, .. } if reason == "bad header"));
        assert_eq!(slots.pending().count(), 0);
    }

    #[test]
    fn test_finish_without_request_is_ignored() {
        let mut slots = SpriteSlots::default();
        slots.finish(SpriteId::Player, Ok(()));
        assert_eq!(slots.get(SpriteId::Player), &SpriteSlot::Missing);
    }
}
