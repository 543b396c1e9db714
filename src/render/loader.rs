//! Background decoding of host sprite files.
//!
//! Each requested sprite is decoded on its own worker thread. The frame loop polls for finished
//! decodes and never waits, so a slot stays [`SpriteSlot::Loading`](crate::render::sprite::SpriteSlot)
//! for as many frames as the decode takes.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use image::RgbaImage;
use tracing::{debug, trace};

use crate::render::sprite::{SpriteId, SpriteSlots};

/// A sprite decoded off the frame loop, ready to upload.
#[derive(Debug)]
pub struct DecodedSprite {
    pub sprite: SpriteId,
    pub source: PathBuf,
    pub result: Result<RgbaImage, String>,
}

pub struct SpriteLoader {
    sender: Sender<DecodedSprite>,
    receiver: Receiver<DecodedSprite>,
    in_flight: Vec<(SpriteId, PathBuf)>,
}

impl Default for SpriteLoader {
    fn default() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            in_flight: Vec::new(),
        }
    }
}

impl SpriteLoader {
    /// Starts a decode for every loading slot that is not already being decoded.
    pub fn request_pending(&mut self, slots: &SpriteSlots) {
        for (sprite, source) in slots.pending() {
            if self.in_flight.iter().any(|(s, p)| *s == sprite && p == source) {
                continue;
            }
            debug!(sprite = sprite.as_ref(), source = %source.display(), "Decoding sprite in background");
            self.in_flight.push((sprite, source.clone()));

            let sender = self.sender.clone();
            let source = source.clone();
            thread::spawn(move || {
                let result = decode(&source);
                // The receiving end is gone once the host shuts down.
                let _ = sender.send(DecodedSprite { sprite, source, result });
            });
        }
    }

    /// Decodes that finished since the last poll. Never blocks.
    pub fn poll(&mut self) -> Vec<DecodedSprite> {
        let finished = self.receiver.try_iter().collect::<Vec<_>>();
        if !finished.is_empty() {
            self.in_flight
                .retain(|(sprite, source)| !finished.iter().any(|d| d.sprite == *sprite && d.source == *source));
            trace!(finished = finished.len(), remaining = self.in_flight.len(), "Sprite decodes finished");
        }
        finished
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}

/// Reads and decodes an image file into RGBA pixels.
pub fn decode(source: &Path) -> Result<RgbaImage, String> {
    image::open(source)
        .map(|image| image.to_rgba8())
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::render::sprite::SpriteSlot;

    fn wait_for(loader: &mut SpriteLoader) -> Vec<DecodedSprite> {
        let mut finished = Vec::new();
        for _ in 0..500 {
            finished.extend(loader.poll());
            if loader.in_flight() == 0 {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        finished
    }

    #[test]
    fn test_decodes_in_background() {
        let path = std::env::temp_dir().join(format!("maze-chase-sprite-{}.png", std::process::id()));
        RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let mut slots = SpriteSlots::requested(Some(path.clone()), Some(PathBuf::from("no/such/villain.png")));
        let mut loader = SpriteLoader::default();
        loader.request_pending(&slots);
        loader.request_pending(&slots);
        assert_eq!(loader.in_flight(), 2);
        assert!(matches!(slots.get(SpriteId::Player), SpriteSlot::Loading(_)));

        for decoded in wait_for(&mut loader) {
            let result = decoded.result.map(|pixels| {
                assert_eq!(decoded.sprite, SpriteId::Player);
                assert_eq!(pixels.dimensions(), (3, 2));
            });
            slots.finish(decoded.sprite, result);
        }
        let _ = std::fs::remove_file(&path);

        assert!(slots.is_ready(SpriteId::Player));
        assert!(matches!(slots.get(SpriteId::Villain), SpriteSlot::Failed { .. }));
        assert_eq!(loader.in_flight(), 0);
    }

    #[test]
    fn test_poll_without_requests_is_empty() {
        let mut loader = SpriteLoader::default();
        assert!(loader.poll().is_empty());
    }
}
