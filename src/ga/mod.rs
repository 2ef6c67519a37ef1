//! Genetic algorithm for the travelling salesman problem.
//!
//! Tours are permutations of point indices ([`Path`]) scored by closed-loop
//! Euclidean length from a fixed start. Each generation the population is
//! ranked, trimmed to its cap, and grown again by crossover between
//! rank-weighted parents and by swap mutation.
//!
//! # Key Types
//!
//! - [`Settings`]: Run parameters (points, population cap, frequencies, weights)
//! - [`Path`]: A tour with its cached score
//! - [`Population`]: The ranked collection of tours
//! - [`RankWeights`]: Weighted rank-bucket parent selection
//! - [`Engine`]: Drives generations, blocking or one step at a time
//! - [`Renderer`]: Receives the best tour after every generation
//!
//! # Submodules
//!
//! - [`operators`]: Raw genotype crossover and mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod engine;
pub mod operators;
mod path;
mod population;
mod selection;
mod types;

pub use config::Settings;
pub use engine::{Engine, RunResult, StopHandle};
pub use path::{Path, SENTINEL_SCORE};
pub use population::Population;
pub use selection::RankWeights;
pub use types::{EngineState, GenerationStats, NoopRenderer, Renderer};
