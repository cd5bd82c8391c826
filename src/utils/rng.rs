//! # Random Number Generators
//!
//! Construction of the generators handed to the resolvers.

use crate::EngineConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a random number generator from the config.
///
/// A configured seed gives reproducible loot; without one the generator is
/// seeded from operating system entropy.
pub fn create_rng(config: &EngineConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
