//! Seeded random source shared by every generator in a run.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// The engine owned by the driver for the duration of one run.
pub type RngEngine = StdRng;

/// Create an engine whose whole output sequence is determined by `seed`.
pub fn create_seeded_rng(seed: u32) -> RngEngine {
    StdRng::seed_from_u64(u64::from(seed))
}
