//! GA generational loop.
//!
//! [`Evolution`] holds one run and advances it a generation at a time:
//! `Initialized` → `Generation(1)` → … → `Terminated` once the generation
//! budget is spent. [`GaRunner`] drives an [`Evolution`] to completion.
//!
//! Each generation:
//!
//! 1. select `population_size / 2` parents without replacement, best first
//! 2. carry every parent over and fill the rest with OX children
//! 3. give every tour, parents included, one chance of swap mutation
//! 4. evaluate and update the best-so-far record on strict improvement

use super::config::GaConfig;
use super::population::Population;
use crate::error::Result;
use crate::geometry::Geometry;
use crate::random::{create_rng, TspRng};
use crate::tour::Tour;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The shortest tour found during the entire run.
    pub best: Tour,

    /// Length of `best`.
    pub best_length: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run was cancelled before spending its budget.
    pub cancelled: bool,

    /// Seed the run used. Feed it back through
    /// [`GaConfig::with_seed`] to replay the run.
    pub seed: u64,

    /// Best-so-far length: entry 0 is the initial population, entry `g`
    /// is after generation `g`.
    pub length_history: Vec<f64>,
}

/// Phase of an [`Evolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolutionState {
    /// Population seeded, no generation run yet.
    Initialized,
    /// The given number of generations has completed, budget remains.
    Generation(usize),
    /// The generation budget is spent.
    Terminated,
}

/// A single GA run over one instance.
///
/// # Usage
///
/// ```
/// use tsp_ga::ga::{Evolution, EvolutionState, GaConfig};
/// use tsp_ga::Geometry;
///
/// let geo = Geometry::from_table(4, &[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])?;
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_num_generations(3)
///     .with_seed(1);
///
/// let mut evo = Evolution::new(&geo, &config)?;
/// assert_eq!(evo.state(), EvolutionState::Initialized);
/// assert_eq!(evo.step()?, EvolutionState::Generation(1));
/// let result = evo.run_to_end()?;
/// assert_eq!(result.generations, 3);
/// # Ok::<(), tsp_ga::TspError>(())
/// ```
#[derive(Debug)]
pub struct Evolution<'g> {
    geometry: &'g Geometry,
    config: GaConfig,
    seed: u64,
    rng: TspRng,
    population: Population,
    best: Tour,
    best_length: f64,
    generation: usize,
    length_history: Vec<f64>,
}

impl<'g> Evolution<'g> {
    /// Validates `config` and seeds the initial population with random tours.
    ///
    /// The best-so-far record starts at the shortest initial tour.
    pub fn new(geometry: &'g Geometry, config: &GaConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);

        let population = Population::random(geometry.len(), config.population_size, &mut rng)?;
        let (best, best_length) = population.best(geometry)?;
        let best = best.clone();

        let mut length_history = Vec::with_capacity(config.num_generations + 1);
        length_history.push(best_length);

        Ok(Self {
            geometry,
            config: config.clone(),
            seed,
            rng,
            population,
            best,
            best_length,
            generation: 0,
            length_history,
        })
    }

    /// Current phase.
    pub fn state(&self) -> EvolutionState {
        if self.generation >= self.config.num_generations {
            EvolutionState::Terminated
        } else if self.generation == 0 {
            EvolutionState::Initialized
        } else {
            EvolutionState::Generation(self.generation)
        }
    }

    /// Whether the generation budget is spent.
    pub fn is_terminated(&self) -> bool {
        self.state() == EvolutionState::Terminated
    }

    /// Generations completed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Seed driving this run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Best-so-far tour and its length.
    pub fn best(&self) -> (&Tour, f64) {
        (&self.best, self.best_length)
    }

    /// The current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Runs one generation and returns the resulting state.
    ///
    /// A no-op once [`Terminated`](EvolutionState::Terminated).
    pub fn step(&mut self) -> Result<EvolutionState> {
        if self.is_terminated() {
            return Ok(EvolutionState::Terminated);
        }

        let parents = self.population.select_parents(
            self.geometry,
            self.config.parent_count(),
            &mut self.rng,
        )?;
        self.population =
            Population::breed(&parents, self.config.population_size, &mut self.rng)?;
        let mutated = self
            .population
            .mutate_all(self.config.mutation_rate, &mut self.rng);

        self.generation += 1;

        let (gen_best, gen_best_length) = self.population.best(self.geometry)?;
        if gen_best_length < self.best_length {
            self.best = gen_best.clone();
            self.best_length = gen_best_length;
            debug!(
                generation = self.generation,
                best_length = self.best_length,
                "new best tour"
            );
        }
        trace!(
            generation = self.generation,
            generation_best = gen_best_length,
            mutated,
            "generation complete"
        );

        self.length_history.push(self.best_length);
        Ok(self.state())
    }

    /// Steps until the budget is spent and returns the result.
    pub fn run_to_end(mut self) -> Result<GaResult> {
        while !self.is_terminated() {
            self.step()?;
        }
        Ok(self.finish())
    }

    /// Ends the run, returning the best-so-far record and statistics.
    ///
    /// A run finished before its budget is spent is reported as cancelled.
    pub fn finish(self) -> GaResult {
        GaResult {
            cancelled: !self.is_terminated(),
            best: self.best,
            best_length: self.best_length,
            generations: self.generation,
            seed: self.seed,
            length_history: self.length_history,
        }
    }
}

/// Executes the GA loop.
///
/// # Usage
///
/// ```
/// use tsp_ga::ga::{GaConfig, GaRunner};
/// use tsp_ga::Geometry;
///
/// let geo = Geometry::from_table(3, &[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)])?;
/// let config = GaConfig::default().with_num_generations(10).with_seed(42);
/// let result = GaRunner::run(&geo, &config)?;
/// assert!((result.best_length - 12.0).abs() < 1e-9);
/// # Ok::<(), tsp_ga::TspError>(())
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA for the full generation budget.
    pub fn run(geometry: &Geometry, config: &GaConfig) -> Result<GaResult> {
        Self::run_with_cancel(geometry, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// The flag is checked between generations. When it is set the run
    /// stops and returns the best tour found so far, marked as cancelled.
    pub fn run_with_cancel(
        geometry: &Geometry,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult> {
        let mut evolution = Evolution::new(geometry, config)?;
        info!(
            cities = geometry.len(),
            population_size = config.population_size,
            num_generations = config.num_generations,
            mutation_rate = config.mutation_rate,
            seed = evolution.seed(),
            "starting genetic search"
        );

        while !evolution.is_terminated() {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    break;
                }
            }
            evolution.step()?;
        }

        let result = evolution.finish();
        info!(
            best_length = result.best_length,
            generations = result.generations,
            cancelled = result.cancelled,
            "genetic search finished"
        );
        Ok(result)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::random_tour;
    use crate::error::TspError;
    use rand::Rng;

    fn random_instance(n: usize, seed: u64) -> Geometry {
        let mut rng = create_rng(seed);
        let coords: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)))
            .collect();
        Geometry::from_table(n, &coords).unwrap()
    }

    fn small_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(20)
            .with_num_generations(30)
            .with_mutation_rate(0.1)
            .with_seed(42)
    }

    #[test]
    fn test_best_length_matches_best_tour() {
        let geo = random_instance(15, 1);
        let result = GaRunner::run(&geo, &small_config()).unwrap();
        assert!(result.best.validate().is_ok());
        assert_eq!(result.best.len(), 15);
        let recomputed = result.best.length(&geo).unwrap();
        assert!((recomputed - result.best_length).abs() < 1e-9);
    }

    #[test]
    fn test_best_never_regresses() {
        let geo = random_instance(25, 2);
        let config = small_config().with_num_generations(100);
        let result = GaRunner::run(&geo, &config).unwrap();

        for window in result.length_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best length increased: {} -> {}",
                window[0],
                window[1]
            );
        }
        assert_eq!(result.length_history.last(), Some(&result.best_length));
    }

    #[test]
    fn test_length_history_size() {
        let geo = random_instance(10, 3);
        let result = GaRunner::run(&geo, &small_config()).unwrap();
        assert_eq!(result.generations, 30);
        assert_eq!(result.length_history.len(), 31);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_same_seed_same_result() {
        let geo = random_instance(20, 4);
        let a = GaRunner::run(&geo, &small_config()).unwrap();
        let b = GaRunner::run(&geo, &small_config()).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.best_length, b.best_length);
        assert_eq!(a.length_history, b.length_history);
    }

    #[test]
    fn test_unseeded_run_reports_replayable_seed() {
        let geo = random_instance(12, 5);
        let config = GaConfig::default()
            .with_population_size(10)
            .with_num_generations(20);
        let first = GaRunner::run(&geo, &config).unwrap();
        let replay = GaRunner::run(&geo, &config.clone().with_seed(first.seed)).unwrap();
        assert_eq!(first.best, replay.best);
        assert_eq!(first.length_history, replay.length_history);
    }

    #[test]
    fn test_single_city_instance() {
        let geo = Geometry::from_table(1, &[(2.0, 3.0)]).unwrap();
        let config = GaConfig::default()
            .with_population_size(2)
            .with_num_generations(5)
            .with_seed(0);
        let result = GaRunner::run(&geo, &config).unwrap();
        assert_eq!(result.best.as_slice(), &[0]);
        assert_eq!(result.best_length, 0.0);
        assert_eq!(result.generations, 5);
    }

    #[test]
    fn test_not_worse_than_random_tour() {
        let geo = random_instance(20, 6);
        let config = GaConfig::default()
            .with_population_size(50)
            .with_num_generations(200)
            .with_seed(6);
        let result = GaRunner::run(&geo, &config).unwrap();

        let mut rng = create_rng(99);
        let baseline = random_tour(20, &mut rng).unwrap().length(&geo).unwrap();
        assert!(
            result.best_length <= baseline,
            "GA {} worse than random tour {}",
            result.best_length,
            baseline
        );
    }

    #[test]
    fn test_search_improves_on_initial_population() {
        let geo = random_instance(30, 7);
        let config = GaConfig::default()
            .with_population_size(60)
            .with_num_generations(300)
            .with_mutation_rate(0.05)
            .with_seed(7);
        let result = GaRunner::run(&geo, &config).unwrap();
        assert!(result.best_length < result.length_history[0]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let geo = random_instance(5, 8);
        for config in [
            GaConfig::default().with_population_size(1),
            GaConfig::default().with_num_generations(0),
            GaConfig::default().with_mutation_rate(1.5),
        ] {
            assert!(matches!(
                GaRunner::run(&geo, &config),
                Err(TspError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_state_transitions() {
        let geo = random_instance(8, 9);
        let config = small_config().with_num_generations(3);
        let mut evo = Evolution::new(&geo, &config).unwrap();

        assert_eq!(evo.state(), EvolutionState::Initialized);
        assert_eq!(evo.population().len(), 20);
        assert_eq!(evo.step().unwrap(), EvolutionState::Generation(1));
        assert_eq!(evo.step().unwrap(), EvolutionState::Generation(2));
        assert_eq!(evo.step().unwrap(), EvolutionState::Terminated);
        assert_eq!(evo.population().len(), 20);

        // Terminated is absorbing.
        let before = evo.best().1;
        assert_eq!(evo.step().unwrap(), EvolutionState::Terminated);
        assert_eq!(evo.generation(), 3);
        assert_eq!(evo.best().1, before);

        let result = evo.finish();
        assert!(!result.cancelled);
        assert_eq!(result.generations, 3);
    }

    #[test]
    fn test_initial_best_is_population_minimum() {
        let geo = random_instance(10, 10);
        let evo = Evolution::new(&geo, &small_config()).unwrap();
        let min = evo
            .population()
            .lengths(&geo)
            .unwrap()
            .into_iter()
            .fold(f64::INFINITY, f64::min);
        assert_eq!(evo.best().1, min);
    }

    #[test]
    fn test_early_finish_is_cancelled() {
        let geo = random_instance(10, 11);
        let mut evo = Evolution::new(&geo, &small_config()).unwrap();
        evo.step().unwrap();
        let result = evo.finish();
        assert!(result.cancelled);
        assert_eq!(result.generations, 1);
        assert_eq!(result.length_history.len(), 2);
    }

    #[test]
    fn test_cancellation() {
        let geo = random_instance(10, 12);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = GaRunner::run_with_cancel(&geo, &small_config(), Some(cancel)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.length_history.len(), 1);
        assert!(result.best.validate().is_ok());
    }

    #[test]
    fn test_cancellation_from_other_thread() {
        let geo = random_instance(50, 13);
        let config = GaConfig::default()
            .with_population_size(50)
            .with_num_generations(1_000_000)
            .with_seed(13);

        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_clone = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(10));
            cancel_clone.store(true, Ordering::Relaxed);
        });

        let result = GaRunner::run_with_cancel(&geo, &config, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert!(result.generations < 1_000_000);
    }
}
