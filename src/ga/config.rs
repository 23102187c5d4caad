//! GA configuration.
//!
//! [`GaConfig`] holds the parameters that control the generational loop.

use crate::error::{Result, TspError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the TSP genetic algorithm.
///
/// # Defaults
///
/// ```
/// use tsp_ga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.num_generations, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use tsp_ga::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_num_generations(200)
///     .with_mutation_rate(0.05)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of tours in the population. At least 2.
    ///
    /// Half of it (rounded down) is selected as parents each generation.
    pub population_size: usize,

    /// Number of generations to run. The search never stops early
    /// except through explicit cancellation.
    pub num_generations: usize,

    /// Probability (0.0–1.0) that an individual receives one swap mutation
    /// in a generation. Applied per tour, not per city.
    pub mutation_rate: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a fresh seed, reported back on the result.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            num_generations: 1000,
            mutation_rate: 0.01,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_num_generations(mut self, n: usize) -> Self {
        self.num_generations = n;
        self
    }

    /// Sets the mutation rate. Out-of-range values are rejected by
    /// [`validate`](Self::validate), not clamped.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of parents selected each generation.
    pub fn parent_count(&self) -> usize {
        self.population_size / 2
    }

    /// Validates the configuration.
    ///
    /// Fails with [`TspError::InvalidParameter`] describing the first
    /// offending field.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(TspError::InvalidParameter(format!(
                "population_size must be at least 2, got {}",
                self.population_size
            )));
        }
        if self.num_generations == 0 {
            return Err(TspError::InvalidParameter(
                "num_generations must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TspError::InvalidParameter(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}
