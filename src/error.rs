//! Error type shared by the whole crate.
//!
//! Every variant is a configuration problem detected before any population
//! work starts. Invalid genotypes are not errors: they are absorbed into the
//! score (see [`crate::ga::SENTINEL_SCORE`]).

use thiserror::Error as ThisError;

#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    #[error("points_count must be at least 1, got {0}")]
    NoPoints(usize),
    #[error("population_max must be at least 1")]
    EmptyPopulation,
    #[error("{name} must lie in [0, 1], got {value}")]
    FrequencyOutOfRange { name: &'static str, value: f64 },
    #[error("selection weights must be non-negative and sum to 1, got {0:?}")]
    InvalidWeights(Vec<f64>),
    #[error("distance_scale must be finite and positive, got {0}")]
    InvalidScale(f64),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` for errors raised while validating [`crate::ga::Settings`].
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::NoPoints(_)
                | Error::EmptyPopulation
                | Error::FrequencyOutOfRange { .. }
                | Error::InvalidWeights(_)
                | Error::InvalidScale(_)
        )
    }
}
