//! Weighted rank selection.
//!
//! The ranked population (best first) is split into `weights.len()` equal
//! buckets. A bucket is chosen with probability equal to its weight, then a
//! rank inside the bucket is chosen uniformly. With
//! `[0.40, 0.30, 0.17, 0.08, 0.05]` the best fifth of the population is drawn
//! 40% of the time.
//!
//! # References
//!
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use crate::error::{Error, Result};
use crate::random::pick;
use rand::Rng;

/// Allowed deviation of the weight sum from 1.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Selection-pressure curve over rank buckets.
///
/// # Examples
///
/// ```
/// use u_salesman::ga::RankWeights;
///
/// let weights = RankWeights::new(vec![0.40, 0.30, 0.17, 0.08, 0.05]).unwrap();
/// assert_eq!(weights.buckets(), 5);
/// assert_eq!(weights.bucket_size(100), 20);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RankWeights {
    weights: Vec<f64>,
}

impl RankWeights {
    /// Validates and wraps a weight list.
    ///
    /// Weights must be non-empty, finite, non-negative and sum to 1.
    pub fn new(weights: Vec<f64>) -> Result<Self> {
        validate_weights(&weights)?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn buckets(&self) -> usize {
        self.weights.len()
    }

    /// Ranks per bucket: `ceil(ranked / buckets)`.
    pub fn bucket_size(&self, ranked: usize) -> usize {
        ranked.div_ceil(self.weights.len())
    }

    /// Draws a rank in `0..ranked`, avoiding `exclude` when possible.
    ///
    /// # Panics
    /// Panics if `ranked` is zero.
    pub fn roll<R: Rng>(&self, ranked: usize, exclude: Option<usize>, rng: &mut R) -> usize {
        assert!(ranked > 0, "cannot select from empty population");

        let n: f64 = rng.random_range(0.0..1.0);
        let bucket_size = self.bucket_size(ranked);
        let mut sum = 0.0;

        for (i, &w) in self.weights.iter().enumerate() {
            if sum + w > n {
                let fraction = (n - sum) / w;
                let offset = ((fraction * bucket_size as f64) as usize).min(bucket_size - 1);
                let j = (i * bucket_size + offset).min(ranked - 1);
                return avoid(j, exclude, ranked);
            }
            sum += w;
        }

        // weights summed just below n through rounding
        avoid(pick(ranked, rng), exclude, ranked)
    }
}

/// Shifts `j` to a neighbour when it equals `exclude`, staying in `0..ranked`.
fn avoid(j: usize, exclude: Option<usize>, ranked: usize) -> usize {
    if exclude != Some(j) || ranked == 1 {
        return j;
    }
    if j + 1 < ranked {
        j + 1
    } else {
        j - 1
    }
}

pub(crate) fn validate_weights(weights: &[f64]) -> Result<()> {
    let well_formed = !weights.is_empty() && weights.iter().all(|w| w.is_finite() && *w >= 0.0);
    let sum: f64 = weights.iter().sum();
    if !well_formed || (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(Error::InvalidWeights(weights.to_vec()));
    }
    Ok(())
}
