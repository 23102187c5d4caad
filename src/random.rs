//! Seedable randomness source.
//!
//! A single RNG stream is created per run and threaded through every
//! constructor and operator. Randomness is consumed only at: tour shuffles,
//! nearest-neighbor start choice, crossover slice bounds, mutation trigger and
//! swap positions, parent sampling and parent pairing.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// RNG used by the solver. ChaCha8 gives the same stream on every platform.
pub type TspRng = ChaCha8Rng;

/// Creates the solver RNG from a seed.
pub fn create_rng(seed: u64) -> TspRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Draws two distinct indices uniformly from `0..n`.
///
/// # Panics
/// Panics if `n < 2`.
pub fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    assert!(n >= 2, "need at least two elements to draw a distinct pair");
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    (i, j)
}
