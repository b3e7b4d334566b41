//! Per-population fitness summaries.
//!
//! [`PopulationStats`] condenses one population into max/mean/min
//! conflicts; [`fitness_curve`] maps a whole history to the series an
//! external plotter draws.

use super::fitness::evaluate;
use super::types::{Fitness, Individual, Population};
use crate::error::{QueensError, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Fitness summary of one population.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationStats {
    /// Most conflicts in the population.
    pub max: Fitness,
    /// Mean conflicts.
    pub mean: f64,
    /// Fewest conflicts in the population.
    pub min: Fitness,
    /// Number of individuals summarized.
    pub size: usize,
}

impl PopulationStats {
    /// Summarizes `population`.
    ///
    /// # Errors
    /// [`QueensError::EmptyPopulation`] if `population` is empty.
    pub fn from_population(population: &[Individual]) -> Result<Self> {
        if population.is_empty() {
            return Err(QueensError::EmptyPopulation);
        }

        let scores = score_all(population);
        let max = scores.iter().copied().max().unwrap_or(0);
        let min = scores.iter().copied().min().unwrap_or(0);
        let total: u64 = scores.iter().map(|&f| u64::from(f)).sum();

        Ok(Self {
            max,
            mean: total as f64 / scores.len() as f64,
            min,
            size: scores.len(),
        })
    }
}

/// One [`PopulationStats`] per history entry, in order.
///
/// # Errors
/// [`QueensError::EmptyPopulation`] if any entry is empty.
pub fn fitness_curve(history: &[Population]) -> Result<Vec<PopulationStats>> {
    history
        .iter()
        .map(|pop| PopulationStats::from_population(pop))
        .collect()
}

#[cfg(feature = "parallel")]
fn score_all(population: &[Individual]) -> Vec<Fitness> {
    population.par_iter().map(evaluate).collect()
}

#[cfg(not(feature = "parallel"))]
fn score_all(population: &[Individual]) -> Vec<Fitness> {
    population.iter().map(evaluate).collect()
}
