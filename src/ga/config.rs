//! Engine configuration.
//!
//! [`Settings`] holds every parameter of a run. It is supplied when the
//! engine is built and may be replaced between runs, never mid-generation.

use super::selection::validate_weights;
use crate::error::{Error, Result};

/// Configuration for the salesman engine.
///
/// # Defaults
///
/// ```
/// use u_salesman::ga::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.points_count, 30);
/// assert_eq!(settings.population_max, 500);
/// assert_eq!(settings.generations, 60);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_salesman::ga::Settings;
///
/// let settings = Settings::default()
///     .with_points_count(12)
///     .with_population_max(80)
///     .with_cross_frequency(0.25)
///     .with_seed(7);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    /// Number of target points (at least 1).
    pub points_count: usize,

    /// Population size cap, restored by trimming every generation.
    pub population_max: usize,

    /// Fraction of the population that spawns a mutated copy each generation.
    pub mutation_frequency: f64,

    /// Fraction of the population used for crossover pairs each generation.
    ///
    /// Every pair adds two offspring.
    pub cross_frequency: f64,

    /// Rank-bucket selection weights, best bucket first. Must sum to 1.
    pub weights: Vec<f64>,

    /// Default generation budget for [`Engine::generate`](super::Engine::generate).
    pub generations: usize,

    /// Magnitude of randomly generated point coordinates.
    pub distance_scale: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to score offspring in parallel using rayon.
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    pub parallel: bool,

    /// Pause between generations of a blocking run, in milliseconds.
    ///
    /// Lets a host pace rendering. Stepwise runs ignore it.
    pub frame_delay_ms: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            points_count: 30,
            population_max: 500,
            mutation_frequency: 0.15,
            cross_frequency: 0.30,
            weights: vec![0.40, 0.30, 0.17, 0.08, 0.05],
            generations: 60,
            distance_scale: 60.0,
            seed: None,
            parallel: true,
            frame_delay_ms: None,
        }
    }
}

impl Settings {
    /// Sets the number of target points.
    pub fn with_points_count(mut self, n: usize) -> Self {
        self.points_count = n;
        self
    }

    /// Sets the population cap.
    pub fn with_population_max(mut self, n: usize) -> Self {
        self.population_max = n;
        self
    }

    /// Sets the mutation frequency.
    pub fn with_mutation_frequency(mut self, frequency: f64) -> Self {
        self.mutation_frequency = frequency.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover frequency.
    pub fn with_cross_frequency(mut self, frequency: f64) -> Self {
        self.cross_frequency = frequency.clamp(0.0, 1.0);
        self
    }

    /// Sets the rank-bucket selection weights.
    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the default generation budget.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the coordinate scale for generated points.
    pub fn with_distance_scale(mut self, scale: f64) -> Self {
        self.distance_scale = scale;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the pause between generations of a blocking run.
    pub fn with_frame_delay_ms(mut self, ms: u64) -> Self {
        self.frame_delay_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.points_count < 1 {
            return Err(Error::NoPoints(self.points_count));
        }
        if self.population_max < 1 {
            return Err(Error::EmptyPopulation);
        }
        check_frequency("mutation_frequency", self.mutation_frequency)?;
        check_frequency("cross_frequency", self.cross_frequency)?;
        validate_weights(&self.weights)?;
        if !self.distance_scale.is_finite() || self.distance_scale <= 0.0 {
            return Err(Error::InvalidScale(self.distance_scale));
        }
        Ok(())
    }
}

fn check_frequency(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::FrequencyOutOfRange { name, value })
    }
}
