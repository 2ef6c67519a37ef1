//! Genetic-algorithm solver for the Euclidean travelling salesman problem.
//!
//! Given a start location and a set of 3D target points, the engine evolves
//! a population of visiting orders toward shorter round trips. It is a
//! heuristic: the best tour found is not guaranteed to be optimal.
//!
//! - [`environment`]: Points and the start/target set of a run
//! - [`ga`]: Tours, selection, operators and the generation loop
//! - [`random`]: Seedable random source and shuffling helpers
//!
//! # Architecture
//!
//! The engine is pure in-memory computation with no I/O. Visualization lives
//! with the host, which receives the best tour after every generation through
//! [`ga::Renderer`] and may drive the loop one [`ga::Engine::step`] at a time.
//!
//! ```
//! use u_salesman::ga::{Engine, Settings};
//!
//! let settings = Settings::default()
//!     .with_points_count(15)
//!     .with_population_max(60)
//!     .with_generations(25)
//!     .with_seed(7);
//! let mut engine = Engine::new(settings).unwrap();
//! let best = engine.generate();
//! assert!(best.is_valid());
//! ```

pub mod environment;
mod error;
pub mod ga;
pub mod random;

pub use error::{Error, Result};
