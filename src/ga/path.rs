//! The tour genotype.

use super::operators::{prefix_crossover, swap_mutation};
use crate::environment::Environment;
use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

/// Score given to genotypes that are not a permutation of the environment's
/// point indices. Large enough to rank behind any real tour.
pub const SENTINEL_SCORE: f64 = 999_999_999.0;

/// An ordered visiting sequence over an [`Environment`]'s points.
///
/// The score is computed once at construction and never changes. Mutation
/// and crossover return new paths.
///
/// A path whose indices are not a permutation of `0..env.len()` is still
/// representable; it is scored with [`SENTINEL_SCORE`] so selection drives it
/// out of the population.
#[derive(Debug, Clone)]
pub struct Path {
    indices: Vec<usize>,
    env: Arc<Environment>,
    score: f64,
}

impl Path {
    pub fn new(indices: Vec<usize>, env: Arc<Environment>) -> Self {
        let mut path = Self {
            indices,
            env,
            score: SENTINEL_SCORE,
        };
        if path.is_valid() {
            path.score = path.length();
        }
        path
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn environment(&self) -> &Arc<Environment> {
        &self.env
    }

    /// Cached fitness: tour length, or [`SENTINEL_SCORE`] when invalid.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Closed-loop length `start -> first -> ... -> last -> start`.
    ///
    /// Recomputed on every call. An empty path has length 0; a path holding
    /// an index outside the environment has infinite length.
    pub fn length(&self) -> f64 {
        let points: Option<Vec<_>> = self.indices.iter().map(|&i| self.env.point(i)).collect();
        let Some(points) = points else {
            return f64::INFINITY;
        };
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return 0.0;
        };

        let start = self.env.start();
        let inner: f64 = points.windows(2).map(|w| w[0].distance_to(w[1])).sum();
        inner + start.distance_to(first) + start.distance_to(last)
    }

    /// `true` iff the indices are a permutation of `0..env.len()`.
    pub fn is_valid(&self) -> bool {
        if self.indices.len() != self.env.len() {
            return false;
        }
        if self.indices.iter().any(|&i| i >= self.env.len()) {
            return false;
        }
        let unique: HashSet<usize> = self.indices.iter().copied().collect();
        unique.len() == self.indices.len()
    }

    /// Orders by raw, recomputed [`length`](Self::length).
    pub fn is_shorter_than(&self, other: &Path) -> Ordering {
        self.length().total_cmp(&other.length())
    }

    /// Orders by cached [`score`](Self::score); invalid paths sort last.
    pub fn is_better_than(&self, other: &Path) -> Ordering {
        self.score.total_cmp(&other.score)
    }

    /// Returns a copy with `count` independent random position swaps.
    pub fn mutate<R: Rng>(&self, count: usize, rng: &mut R) -> Path {
        Path::new(self.mutate_genotype(count, rng), Arc::clone(&self.env))
    }

    /// Unscored genotype of [`mutate`](Self::mutate).
    pub fn mutate_genotype<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<usize> {
        let mut indices = self.indices.clone();
        for _ in 0..count {
            swap_mutation(&mut indices, rng);
        }
        indices
    }

    /// Single-point crossover with a random cut in `[0, len)`.
    ///
    /// The child takes this path's prefix and fills the rest from `other`.
    pub fn breed<R: Rng>(&self, other: &Path, rng: &mut R) -> Path {
        Path::new(self.breed_genotype(other, rng), Arc::clone(&self.env))
    }

    /// Unscored genotype of [`breed`](Self::breed).
    pub fn breed_genotype<R: Rng>(&self, other: &Path, rng: &mut R) -> Vec<usize> {
        let len = self.indices.len();
        let cut = if len == 0 { 0 } else { rng.random_range(0..len) };
        prefix_crossover(&self.indices, &other.indices, cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Point;
    use crate::random::{create_rng, random_permutation};
    use proptest::prelude::*;

    fn square() -> Arc<Environment> {
        // start at origin, unit square in the xy-plane
        Arc::new(
            Environment::new(
                Point::new(0.0, 0.0, 0.0),
                vec![
                    Point::new(1.0, 0.0, 0.0),
                    Point::new(1.0, 1.0, 0.0),
                    Point::new(0.0, 1.0, 0.0),
                ],
            )
            .unwrap(),
        )
    }

    fn random_env(n: usize, seed: u64) -> Arc<Environment> {
        let mut rng = create_rng(seed);
        Arc::new(Environment::generate(n, 60.0, &mut rng).unwrap())
    }

    #[test]
    fn test_length_closed_loop() {
        let path = Path::new(vec![0, 1, 2], square());
        assert!((path.length() - 4.0).abs() < 1e-12);
        assert!((path.score() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_length_diagonal_order() {
        // 0 -> (1,0) -> (0,1) -> (1,1) -> 0
        let path = Path::new(vec![0, 2, 1], square());
        let expected = 1.0 + 2f64.sqrt() + 1.0 + 2f64.sqrt();
        assert!((path.length() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_single_point_tour() {
        let env = Arc::new(
            Environment::new(Point::new(0.0, 0.0, 0.0), vec![Point::new(3.0, 4.0, 0.0)])
                .unwrap(),
        );
        let path = Path::new(vec![0], env);
        assert!(path.is_valid());
        assert!((path.score() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_is_invalid() {
        let path = Path::new(vec![0, 0, 2], square());
        assert!(!path.is_valid());
        assert_eq!(path.score(), SENTINEL_SCORE);
    }

    #[test]
    fn test_out_of_range_is_invalid() {
        let path = Path::new(vec![0, 1, 7], square());
        assert!(!path.is_valid());
        assert_eq!(path.score(), SENTINEL_SCORE);
        assert_eq!(path.length(), f64::INFINITY);
    }

    #[test]
    fn test_wrong_length_is_invalid() {
        let path = Path::new(vec![0, 1], square());
        assert!(!path.is_valid());
        assert_eq!(path.score(), SENTINEL_SCORE);
    }

    #[test]
    fn test_invalid_sorts_last() {
        let env = square();
        let valid = Path::new(vec![2, 0, 1], Arc::clone(&env));
        let invalid = Path::new(vec![1, 1, 1], Arc::clone(&env));
        assert_eq!(valid.is_better_than(&invalid), Ordering::Less);
        assert_eq!(invalid.is_better_than(&valid), Ordering::Greater);
        // raw length of the duplicate path is shorter, but it still loses on score
        assert_eq!(invalid.is_shorter_than(&valid), Ordering::Less);
    }

    #[test]
    fn test_mutate_returns_new_path() {
        let mut rng = create_rng(42);
        let env = random_env(10, 1);
        let path = Path::new((0..10).collect(), env);
        let mutated = path.mutate(5, &mut rng);
        assert_eq!(path.indices(), (0..10).collect::<Vec<_>>().as_slice());
        assert!(mutated.is_valid());
    }

    #[test]
    fn test_mutate_zero_is_copy() {
        let mut rng = create_rng(42);
        let path = Path::new(vec![2, 0, 1], square());
        assert_eq!(path.mutate(0, &mut rng).indices(), path.indices());
    }

    #[test]
    fn test_breed_with_huge_invalid_index() {
        let mut rng = create_rng(42);
        let env = square();
        let good = Path::new(vec![2, 0, 1], Arc::clone(&env));
        for bad in [usize::MAX, 1usize << 40] {
            let invalid = Path::new(vec![0, bad, 2], Arc::clone(&env));
            assert_eq!(invalid.score(), SENTINEL_SCORE);
            for _ in 0..20 {
                assert_eq!(good.breed(&invalid, &mut rng).indices().len(), 3);
                assert_eq!(invalid.breed(&good, &mut rng).indices().len(), 3);
            }
        }
    }

    #[test]
    fn test_genotype_helpers_match_scored_paths() {
        let env = random_env(12, 3);
        let mut rng = create_rng(8);
        let a = Path::new(random_permutation(12, &mut rng), Arc::clone(&env));
        let b = Path::new(random_permutation(12, &mut rng), env);

        let child = a.breed(&b, &mut create_rng(5));
        assert_eq!(child.indices(), a.breed_genotype(&b, &mut create_rng(5)).as_slice());
        let mutated = a.mutate(3, &mut create_rng(6));
        assert_eq!(mutated.indices(), a.mutate_genotype(3, &mut create_rng(6)).as_slice());
    }

    #[test]
    fn test_breed_identical_parents() {
        let mut rng = create_rng(42);
        let path = Path::new(vec![2, 0, 1], square());
        let child = path.breed(&path, &mut rng);
        assert_eq!(child.indices(), path.indices());
    }

    proptest! {
        #[test]
        fn prop_mutate_keeps_permutation(seed in any::<u64>(), n in 1usize..30, k in 0usize..20) {
            let mut rng = create_rng(seed);
            let env = random_env(n, seed);
            let path = Path::new(random_permutation(n, &mut rng), env);
            prop_assert!(path.mutate(k, &mut rng).is_valid());
        }

        #[test]
        fn prop_breed_keeps_permutation(seed in any::<u64>(), n in 1usize..30) {
            let mut rng = create_rng(seed);
            let env = random_env(n, seed);
            let a = Path::new(random_permutation(n, &mut rng), Arc::clone(&env));
            let b = Path::new(random_permutation(n, &mut rng), env);
            prop_assert!(a.breed(&b, &mut rng).is_valid());
            prop_assert!(b.breed(&a, &mut rng).is_valid());
        }

        #[test]
        fn prop_length_reversal_invariant(seed in any::<u64>(), n in 1usize..30) {
            let mut rng = create_rng(seed);
            let env = random_env(n, seed);
            let forward = random_permutation(n, &mut rng);
            let mut backward = forward.clone();
            backward.reverse();
            let a = Path::new(forward, Arc::clone(&env));
            let b = Path::new(backward, env);
            prop_assert!((a.length() - b.length()).abs() < 1e-9);
        }

        #[test]
        fn prop_valid_iff_permutation(
            seed in any::<u64>(),
            indices in prop::collection::vec(0usize..6, 0..8),
        ) {
            let env = random_env(5, seed);
            let mut sorted = indices.clone();
            sorted.sort_unstable();
            let is_perm = sorted == (0..5).collect::<Vec<_>>();
            let path = Path::new(indices, env);
            prop_assert_eq!(path.is_valid(), is_perm);
            if !is_perm {
                prop_assert_eq!(path.score(), SENTINEL_SCORE);
            }
        }
    }
}
