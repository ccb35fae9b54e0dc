//! Deterministic RNG utilities for reproducible tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Create a deterministic `ChaCha8Rng` from a seed.
///
/// All test randomization should go through this to ensure reproducibility.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Random machine-order pose `[x, y, z, a|b, c]` inside the fixture travel.
///
/// The tilt stays clear of zero so inverse solves never hit the vertical
/// case by accident.
pub fn random_xyzab(rng: &mut impl Rng) -> [f32; 5] {
    let tilt: f32 = rng.gen_range(5.0..85.0);
    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    [
        rng.gen_range(-120.0..120.0),
        rng.gen_range(-120.0..120.0),
        rng.gen_range(0.0..90.0),
        sign * tilt,
        rng.gen_range(-175.0..175.0),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
