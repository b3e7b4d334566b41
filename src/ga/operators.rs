//! Variation and survivor operators for eight-queens chromosomes.
//!
//! # Crossover
//!
//! - [`crossover`]: single-point suffix exchange, in place
//! - [`crossover_point`]: uniform cut in `1..=7`
//!
//! # Mutation
//!
//! - [`mutate`]: with probability `m`, reset one random gene to a random
//!   column
//!
//! # Survivors
//!
//! - [`elitism_split`]: shuffle, stable sort by conflicts, split off the
//!   elite

use super::fitness::evaluate;
use super::types::{Individual, Population, GENES};
use crate::error::{QueensError, Result};
use rand::seq::SliceRandom;
use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Single-point crossover.
///
/// Swaps the genes of `parent1` and `parent2` from `index` to the end.
/// Both parents are modified in place and become the two offspring.
///
/// # Example
///
/// ```
/// use u_queens::ga::{operators::crossover, Individual};
///
/// let mut a = Individual::new([2, 4, 7, 4, 8, 5, 5, 2]).unwrap();
/// let mut b = Individual::new([3, 2, 7, 5, 2, 4, 1, 1]).unwrap();
/// crossover(&mut a, &mut b, 3);
/// assert_eq!(a.genes(), &[2, 4, 7, 5, 2, 4, 1, 1]);
/// assert_eq!(b.genes(), &[3, 2, 7, 4, 8, 5, 5, 2]);
/// ```
///
/// # Panics
/// Panics if `index` is not in `1..=7`; a cut at either boundary would
/// hand back an unchanged parent.
pub fn crossover(parent1: &mut Individual, parent2: &mut Individual, index: usize) {
    assert!(
        (1..GENES).contains(&index),
        "crossover index must be in 1..={}, got {index}",
        GENES - 1
    );
    parent1.genes_mut()[index..].swap_with_slice(&mut parent2.genes_mut()[index..]);
}

/// Draws a crossover index uniformly from `1..=7`.
pub fn crossover_point<R: Rng>(rng: &mut R) -> usize {
    rng.random_range(1..GENES)
}

// ============================================================================
// Mutation
// ============================================================================

/// Resets one gene with probability `m`.
///
/// The position is uniform over the 8 genes and the new value uniform
/// over `1..=8`, so the "mutated" gene may keep its old value. With
/// probability `1 - m` the individual is left untouched.
///
/// Returns `true` when a gene was rewritten.
pub fn mutate<R: Rng>(individual: &mut Individual, m: f64, rng: &mut R) -> bool {
    if rng.random::<f64>() >= m {
        return false;
    }
    let pos = rng.random_range(0..GENES);
    individual.genes_mut()[pos] = rng.random_range(1..=GENES as u8);
    true
}

// ============================================================================
// Elitism
// ============================================================================

/// Splits `population` into `(elite, pool)`.
///
/// The population is shuffled first so that individuals with equal
/// conflict counts do not keep their previous order, then stably sorted
/// ascending by [`evaluate`]. The first `elite_count` individuals form the
/// elite; the rest form the breeding pool.
///
/// # Errors
/// [`QueensError::InvalidConfig`] if `elite_count` leaves no breeding pool.
pub fn elitism_split<R: Rng>(
    mut population: Population,
    elite_count: usize,
    rng: &mut R,
) -> Result<(Population, Population)> {
    if elite_count >= population.len() {
        return Err(QueensError::InvalidConfig(format!(
            "elite count {elite_count} must be smaller than the population present at split time ({})",
            population.len()
        )));
    }

    population.shuffle(rng);
    population.sort_by_cached_key(evaluate);
    let pool = population.split_off(elite_count);
    Ok((population, pool))
}
