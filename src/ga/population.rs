//! Ordered collection of tours.

use super::path::Path;
use crate::environment::Environment;
use crate::random::random_permutation;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::Arc;

/// The current generation's tours.
///
/// Ranked best first after [`sort`](Self::sort). Reproduction appends beyond
/// the cap; [`trim`](Self::trim) restores it. Duplicate tours may coexist.
#[derive(Debug, Clone, Default)]
pub struct Population {
    members: Vec<Path>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths(members: Vec<Path>) -> Self {
        Self { members }
    }

    /// Seeds `size` uniformly shuffled permutations over `env`.
    pub fn seed<R: Rng>(env: &Arc<Environment>, size: usize, rng: &mut R, parallel: bool) -> Self {
        let genotypes: Vec<Vec<usize>> =
            (0..size).map(|_| random_permutation(env.len(), rng)).collect();
        Self {
            members: score_all(genotypes, env, parallel),
        }
    }

    /// Sorts ascending by score (best first). Stable for equal scores.
    pub fn sort(&mut self) {
        self.members.sort_by(|a, b| a.is_better_than(b));
    }

    /// Drops everything ranked after `max`.
    pub fn trim(&mut self, max: usize) {
        self.members.truncate(max);
    }

    pub fn push(&mut self, path: Path) {
        self.members.push(path);
    }

    /// Scores raw genotypes against `env` and appends them in order.
    pub fn extend_scored(&mut self, genotypes: Vec<Vec<usize>>, env: &Arc<Environment>, parallel: bool) {
        self.members.extend(score_all(genotypes, env, parallel));
    }

    /// First member; the best one once sorted.
    pub fn best(&self) -> Option<&Path> {
        self.members.first()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.members.get(index)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Path> {
        self.members.iter()
    }

    pub fn as_slice(&self) -> &[Path] {
        &self.members
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Path;

    fn index(&self, index: usize) -> &Path {
        &self.members[index]
    }
}

/// Builds paths from genotypes; scoring runs on rayon when enabled.
fn score_all(genotypes: Vec<Vec<usize>>, env: &Arc<Environment>, parallel: bool) -> Vec<Path> {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return genotypes
                .into_par_iter()
                .map(|g| Path::new(g, Arc::clone(env)))
                .collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    genotypes
        .into_iter()
        .map(|g| Path::new(g, Arc::clone(env)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::SENTINEL_SCORE;
    use crate::random::create_rng;

    fn env(n: usize) -> Arc<Environment> {
        let mut rng = create_rng(99);
        Arc::new(Environment::generate(n, 60.0, &mut rng).unwrap())
    }

    #[test]
    fn test_seed_valid_members() {
        let env = env(15);
        let mut rng = create_rng(42);
        let population = Population::seed(&env, 40, &mut rng, false);
        assert_eq!(population.len(), 40);
        assert!(population.iter().all(Path::is_valid));
    }

    #[test]
    fn test_parallel_flag_scores_identically() {
        let env = env(15);
        let a = Population::seed(&env, 30, &mut create_rng(1), false);
        let b = Population::seed(&env, 30, &mut create_rng(1), true);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.indices(), y.indices());
            assert_eq!(x.score(), y.score());
        }
    }

    #[test]
    fn test_sort_ascending_invalid_last() {
        let env = env(6);
        let mut rng = create_rng(42);
        let mut population = Population::seed(&env, 20, &mut rng, false);
        population.push(Path::new(vec![0; 6], Arc::clone(&env)));
        population.extend_scored(vec![vec![1, 1, 2, 3, 4, 5]], &env, false);
        population.sort();

        for w in population.as_slice().windows(2) {
            assert!(w[0].score() <= w[1].score());
        }
        assert_eq!(population[population.len() - 1].score(), SENTINEL_SCORE);
        assert_eq!(population[population.len() - 2].score(), SENTINEL_SCORE);
        assert!(population.best().unwrap().is_valid());
    }

    #[test]
    fn test_trim_keeps_best() {
        let env = env(8);
        let mut rng = create_rng(42);
        let mut population = Population::seed(&env, 30, &mut rng, false);
        population.sort();
        let best = population.best().unwrap().score();
        population.trim(10);
        assert_eq!(population.len(), 10);
        assert_eq!(population.best().unwrap().score(), best);

        population.trim(50);
        assert_eq!(population.len(), 10);
    }

    #[test]
    fn test_empty() {
        let population = Population::new();
        assert!(population.is_empty());
        assert!(population.best().is_none());
        assert!(population.get(0).is_none());
    }
}
