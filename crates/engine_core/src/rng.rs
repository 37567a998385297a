//! Session random source.
//!
//! Every random draw in a session goes through one seeded generator so a
//! scene can be replayed exactly from its seed.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generator type owned by a simulation session.
pub type SimRng = StdRng;

/// Seeded session generator.
pub fn seeded(seed: u64) -> SimRng {
    StdRng::seed_from_u64(seed)
}

/// Uniform sample in `[lo, hi)`. Returns `lo` when the range is empty.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return lo;
    }
    rng.gen_range(lo..hi)
}

/// Vector with each component drawn independently from `[-half_extent, half_extent)`.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, half_extent: f32) -> Vec3 {
    Vec3::new(
        uniform(rng, -half_extent, half_extent),
        uniform(rng, -half_extent, half_extent),
        uniform(rng, -half_extent, half_extent),
    )
}
