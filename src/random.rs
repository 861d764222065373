//! Seedable random number helpers.
//!
//! Every component that draws random numbers owns its own generator.
//! These helpers build those generators so that a fixed seed reproduces
//! a whole run.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from a fresh random seed when `None`.
pub fn rng_from_option(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Derives an independent child generator from `rng`.
///
/// Used to hand sub-components their own generator while keeping the whole
/// run reproducible from a single seed.
pub fn fork<R: Rng>(rng: &mut R) -> StdRng {
    create_rng(rng.random())
}

/// Shuffles a slice in place (Fisher-Yates).
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}
