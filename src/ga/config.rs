//! Run configuration.
//!
//! [`QueensConfig`] holds the five run parameters plus an optional seed.

use crate::error::{QueensError, Result};

/// Configuration for one GA run.
///
/// # Defaults
///
/// ```
/// use u_queens::ga::QueensConfig;
///
/// let config = QueensConfig::default();
/// assert_eq!(config.generations, 300);
/// assert_eq!(config.population_size, 400);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_queens::ga::QueensConfig;
///
/// let config = QueensConfig::default()
///     .with_generations(50)
///     .with_population_size(100)
///     .with_tournament_size(5)
///     .with_mutation_rate(0.3)
///     .with_elite_count(4)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueensConfig {
    /// Number of generation steps to run. Zero returns the best of the
    /// initial population.
    pub generations: usize,

    /// Size of the initial population, and the number of offspring pairs
    /// bred per generation.
    ///
    /// Every generation after the first holds `2 * population_size +
    /// elite_count` individuals.
    pub population_size: usize,

    /// Number of draws (with replacement) per tournament.
    pub tournament_size: usize,

    /// Probability that each offspring gets one gene rewritten (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of lowest-conflict individuals carried unchanged into the
    /// next generation.
    pub elite_count: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for QueensConfig {
    fn default() -> Self {
        Self {
            generations: 300,
            population_size: 400,
            tournament_size: 20,
            mutation_rate: 0.8,
            elite_count: 30,
            seed: None,
        }
    }
}

impl QueensConfig {
    /// Builds a configuration from the positional `(g, n, k, m, e)` tuple.
    pub fn new(
        generations: usize,
        population_size: usize,
        tournament_size: usize,
        mutation_rate: f64,
        elite_count: usize,
    ) -> Self {
        Self {
            generations,
            population_size,
            tournament_size,
            mutation_rate,
            elite_count,
            seed: None,
        }
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the elite count.
    pub fn with_elite_count(mut self, e: usize) -> Self {
        self.elite_count = e;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Size of the breeding pool in the first generation step.
    ///
    /// Later pools hold `2 * population_size` individuals, which is never
    /// smaller, so this is the binding constraint on `tournament_size`.
    pub fn initial_pool_size(&self) -> usize {
        self.population_size.saturating_sub(self.elite_count)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`QueensError::InvalidConfig`] describing the first bad parameter.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(QueensError::InvalidConfig(msg));

        if self.population_size == 0 {
            return invalid("population_size must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return invalid(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            ));
        }
        if self.elite_count >= self.population_size {
            return invalid(format!(
                "elite_count ({}) must be smaller than population_size ({})",
                self.elite_count, self.population_size
            ));
        }
        if self.tournament_size == 0 {
            return invalid("tournament_size must be at least 1".into());
        }
        if self.tournament_size > self.initial_pool_size() {
            return invalid(format!(
                "tournament_size ({}) exceeds the breeding pool ({} = population_size - elite_count)",
                self.tournament_size,
                self.initial_pool_size()
            ));
        }
        Ok(())
    }
}
