//! Platform abstraction layer.

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// A fresh, entropy-seeded generator for unseeded sessions.
pub fn rng() -> SmallRng {
    SmallRng::from_rng(&mut rand::rng())
}

/// Sleeps until the next frame. Spins when the window has focus for tighter frame pacing.
#[cfg(feature = "desktop")]
pub fn sleep(duration: std::time::Duration, focused: bool) {
    if focused {
        spin_sleep::sleep(duration);
    } else {
        std::thread::sleep(duration);
    }
}
