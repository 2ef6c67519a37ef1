//! Contracts between the engine and its host.
//!
//! The engine is driven by a host (a blocking caller or a UI loop) and reports
//! the best tour through a [`Renderer`] after every generation.

use super::path::Path;

/// Receives the best tour once per completed generation.
///
/// Called synchronously between generations; the engine does not inspect
/// what the renderer does.
///
/// Any `FnMut(usize, &Path)` closure is a renderer:
///
/// ```
/// use u_salesman::ga::{Engine, Settings};
///
/// let settings = Settings::default()
///     .with_points_count(8)
///     .with_population_max(20)
///     .with_seed(1);
/// let mut engine = Engine::new(settings).unwrap();
/// let mut frames = Vec::new();
/// engine.run(5, &mut |generation: usize, best: &u_salesman::ga::Path| {
///     frames.push((generation, best.indices().to_vec()));
/// });
/// assert_eq!(frames.len(), 5);
/// ```
pub trait Renderer {
    /// `generation` counts from 0; `best` is rank 0 of the trimmed population.
    fn render(&mut self, generation: usize, best: &Path);
}

impl<F> Renderer for F
where
    F: FnMut(usize, &Path),
{
    fn render(&mut self, generation: usize, best: &Path) {
        self(generation, best)
    }
}

/// Renderer that discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn render(&mut self, _generation: usize, _best: &Path) {}
}

/// Lifecycle of an engine run.
///
/// `Idle -> Running -> (Stopped | Completed)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Built or reset, no run in progress.
    Idle,
    /// A run is in progress; [`step`](super::Engine::step) advances it.
    Running,
    /// Halted by a stop request at a generation boundary.
    Stopped,
    /// The generation budget was used up.
    Completed,
}

impl EngineState {
    /// `true` for `Stopped` and `Completed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, EngineState::Stopped | EngineState::Completed)
    }
}

/// Bookkeeping of one reproductive generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Zero-based generation number.
    pub generation: usize,

    /// Best score at the start of the generation, after trimming.
    pub best_score: f64,

    /// Population size after reproduction, before the next trim.
    pub population_size: usize,

    /// Crossover pairs performed (each adds two offspring).
    pub crossovers: usize,

    /// Mutated copies added.
    pub mutations: usize,
}
