//! The generation loop.
//!
//! [`Engine`] owns the environment, the population and the random source of
//! a run, and advances one generation per [`step`](Engine::step):
//! sort → (stop? / budget spent?) → trim → render → crossover → mutation.
//!
//! A host either drives [`step`](Engine::step) from its own loop (a UI frame,
//! a timer, a task queue) or calls [`run`](Engine::run) to block until the
//! run ends. Both paths execute the same step.

use super::config::Settings;
use super::path::Path;
use super::population::Population;
use super::selection::RankWeights;
use super::types::{EngineState, GenerationStats, NoopRenderer, Renderer};
use crate::environment::Environment;
use crate::error::Result;
use crate::random::{create_rng, pick};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Result of a finished run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// The best tour in the final population.
    pub best: Path,

    /// Same as `best.score()`.
    pub best_score: f64,

    /// Reproductive generations executed.
    pub generations: usize,

    /// Whether the run was halted by a stop request.
    pub cancelled: bool,

    /// Best score at the start of every generation, plus the final one.
    pub score_history: Vec<f64>,
}

/// Cooperative cancellation flag shared with an [`Engine`].
///
/// Cloneable and `Send`, so a stop can be requested from another thread
/// while [`Engine::run`] blocks. The flag is polled at generation boundaries
/// only.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Requests the run to halt before its next generation.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Genetic-algorithm engine for one environment.
///
/// # Usage
///
/// ```
/// use u_salesman::ga::{Engine, EngineState, NoopRenderer, Settings};
///
/// let settings = Settings::default()
///     .with_points_count(10)
///     .with_population_max(40)
///     .with_seed(42);
/// let mut engine = Engine::new(settings).unwrap();
///
/// engine.start(20);
/// while engine.step(&mut NoopRenderer) == EngineState::Running {}
///
/// assert_eq!(engine.state(), EngineState::Completed);
/// assert!(engine.best().unwrap().is_valid());
/// ```
pub struct Engine<R = StdRng> {
    settings: Settings,
    weights: RankWeights,
    env: Arc<Environment>,
    population: Population,
    rng: R,
    state: EngineState,
    generation: usize,
    remaining: usize,
    stop: StopHandle,
    score_history: Vec<f64>,
    last_stats: Option<GenerationStats>,
}

impl Engine<StdRng> {
    /// Builds an engine seeded from `settings.seed`, or randomly when unset.
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let rng = match settings.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Self::with_rng(settings, rng)
    }
}

impl<R: Rng> Engine<R> {
    /// Builds an engine around an injected random source.
    ///
    /// Validates `settings`, generates the environment and seeds the
    /// population. The engine starts `Idle`.
    pub fn with_rng(settings: Settings, mut rng: R) -> Result<Self> {
        settings.validate()?;
        let weights = RankWeights::new(settings.weights.clone())?;
        let env = Arc::new(Environment::generate(
            settings.points_count,
            settings.distance_scale,
            &mut rng,
        )?);

        let mut engine = Self {
            settings,
            weights,
            env,
            population: Population::new(),
            rng,
            state: EngineState::Idle,
            generation: 0,
            remaining: 0,
            stop: StopHandle::default(),
            score_history: Vec::new(),
            last_stats: None,
        };
        engine.reseed();
        Ok(engine)
    }

    /// Regenerates start and points, then reseeds the population.
    pub fn init(&mut self) -> Result<()> {
        self.env = Arc::new(Environment::generate(
            self.settings.points_count,
            self.settings.distance_scale,
            &mut self.rng,
        )?);
        self.reseed();
        Ok(())
    }

    /// Draws fresh target points around the same start, then reseeds the
    /// population.
    pub fn reset(&mut self) {
        self.env = Arc::new(self.env.with_fresh_points(&mut self.rng));
        self.reseed();
    }

    /// Replaces the settings and rebuilds environment and population.
    ///
    /// On error the engine is left untouched.
    pub fn set_settings(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        let weights = RankWeights::new(settings.weights.clone())?;
        let env = Environment::generate(settings.points_count, settings.distance_scale, &mut self.rng)?;
        self.settings = settings;
        self.weights = weights;
        self.env = Arc::new(env);
        self.reseed();
        Ok(())
    }

    /// Begins a run of `generations` reproductive generations.
    ///
    /// Clears any pending stop request. An engine that already ran gets a
    /// freshly seeded population over the current environment.
    pub fn start(&mut self, generations: usize) {
        if self.state != EngineState::Idle {
            self.reseed();
        }
        self.stop.clear();
        self.remaining = generations;
        self.state = EngineState::Running;
        log::info!(
            "engine.start: points={} population_max={} generations={generations}",
            self.env.len(),
            self.settings.population_max
        );
    }

    /// Requests cooperative cancellation; honoured at the next step.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// A handle that can request a stop from elsewhere.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Executes one generation. Does nothing unless the engine is `Running`.
    ///
    /// Returns the state after the step.
    pub fn step<F: Renderer + ?Sized>(&mut self, renderer: &mut F) -> EngineState {
        if self.state != EngineState::Running {
            return self.state;
        }

        self.population.sort();

        if self.stop.is_stop_requested() {
            self.finish(EngineState::Stopped);
            return self.state;
        }
        if self.remaining == 0 {
            self.finish(EngineState::Completed);
            return self.state;
        }

        self.population.trim(self.settings.population_max);

        let best_score = match self.population.best() {
            Some(best) => {
                renderer.render(self.generation, best);
                best.score()
            }
            None => {
                self.finish(EngineState::Completed);
                return self.state;
            }
        };
        self.score_history.push(best_score);

        let crossovers = self.crossover();
        let mutations = self.mutation();

        let stats = GenerationStats {
            generation: self.generation,
            best_score,
            population_size: self.population.len(),
            crossovers,
            mutations,
        };
        log::debug!(
            "engine.step: gen={} best={best_score:.3} size={} crossovers={crossovers} mutations={mutations}",
            stats.generation,
            stats.population_size
        );
        self.last_stats = Some(stats);

        self.generation += 1;
        self.remaining -= 1;
        self.state
    }

    /// Runs `generations` generations back to back and returns the outcome.
    ///
    /// Sleeps [`Settings::frame_delay_ms`] between generations when set. A
    /// stop requested through a [`StopHandle`] ends the run early.
    pub fn run<F: Renderer + ?Sized>(&mut self, generations: usize, renderer: &mut F) -> RunResult {
        self.start(generations);
        while !self.step(renderer).is_terminal() {
            if let Some(ms) = self.settings.frame_delay_ms {
                std::thread::sleep(Duration::from_millis(ms));
            }
        }
        self.result()
    }

    /// Runs [`Settings::generations`] generations without rendering and
    /// returns the best tour.
    pub fn generate(&mut self) -> Path {
        let generations = self.settings.generations;
        self.run(generations, &mut NoopRenderer).best
    }

    /// Snapshot of the current run.
    pub fn result(&self) -> RunResult {
        let best = self
            .best()
            .cloned()
            .expect("population is never empty: population_max >= 1");
        RunResult {
            best_score: best.score(),
            best,
            generations: self.generation,
            cancelled: self.state == EngineState::Stopped,
            score_history: self.score_history.clone(),
        }
    }

    /// Best member of the current population.
    pub fn best(&self) -> Option<&Path> {
        self.population.iter().min_by(|a, b| a.is_better_than(b))
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Completed reproductive generations of the current run.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn environment(&self) -> &Arc<Environment> {
        &self.env
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn score_history(&self) -> &[f64] {
        &self.score_history
    }

    pub fn last_stats(&self) -> Option<&GenerationStats> {
        self.last_stats.as_ref()
    }

    fn reseed(&mut self) {
        self.population = Population::seed(
            &self.env,
            self.settings.population_max,
            &mut self.rng,
            self.settings.parallel,
        );
        self.population.sort();
        self.state = EngineState::Idle;
        self.generation = 0;
        self.remaining = 0;
        self.score_history.clear();
        self.last_stats = None;
    }

    fn finish(&mut self, state: EngineState) {
        self.state = state;
        let best_score = self.population.best().map_or(f64::INFINITY, Path::score);
        self.score_history.push(best_score);
        log::info!(
            "engine.finish: state={state:?} generations={} best={best_score:.3}",
            self.generation
        );
    }

    /// Appends two offspring per weighted-rank parent pair. Returns the pair
    /// count.
    fn crossover(&mut self) -> usize {
        let ranked = self.population.len();
        let count = scaled_count(self.settings.cross_frequency, ranked);
        let mut offspring = Vec::with_capacity(count * 2);

        for _ in 0..count {
            let a = self.weights.roll(ranked, None, &mut self.rng);
            let b = self.weights.roll(ranked, Some(a), &mut self.rng);
            let (parent_a, parent_b) = (&self.population[a], &self.population[b]);
            offspring.push(parent_a.breed_genotype(parent_b, &mut self.rng));
            offspring.push(parent_b.breed_genotype(parent_a, &mut self.rng));
        }

        self.population
            .extend_scored(offspring, &self.env, self.settings.parallel);
        count
    }

    /// Appends single-swap copies of uniformly picked members. Returns the
    /// copy count.
    fn mutation(&mut self) -> usize {
        let before = self.population.len();
        let count = scaled_count(self.settings.mutation_frequency, before);
        let mut genotypes = Vec::with_capacity(count);

        for _ in 0..count {
            let source = &self.population[pick(before, &mut self.rng)];
            genotypes.push(source.mutate_genotype(1, &mut self.rng));
        }

        self.population
            .extend_scored(genotypes, &self.env, self.settings.parallel);
        count
    }
}

/// Number of operations for a frequency over `size` members, rounded up.
pub(crate) fn scaled_count(frequency: f64, size: usize) -> usize {
    (frequency * size as f64).ceil() as usize
}

// ============================================================================
// Tests
// ============================================================================
