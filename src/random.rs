//! Random utilities.
//!
//! All randomness in the crate flows through an explicitly passed `Rng`, so a
//! run is reproducible whenever the caller seeds it.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Creates a seeded, reproducible generator.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Returns a uniformly shuffled copy of `items` (Fisher-Yates).
pub fn shuffled<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

/// Returns a uniformly random permutation of `0..n`.
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    perm
}

/// Picks a uniform index in `0..len`.
///
/// # Panics
/// Panics if `len` is zero.
pub fn pick<R: Rng>(len: usize, rng: &mut R) -> usize {
    assert!(len > 0, "cannot pick from an empty range");
    rng.random_range(0..len)
}
