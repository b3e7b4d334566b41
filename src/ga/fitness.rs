//! Conflict counting.
//!
//! Two queens in rows `a < b` attack each other when they share a column
//! or when `|col_b - col_a| == b - a` (shared diagonal). Each unordered
//! pair is checked once by only looking at rows below the current one.

use super::types::{Fitness, Individual};

/// Returns the number of attacking pairs in `individual`.
///
/// # Examples
///
/// ```
/// use u_queens::ga::{evaluate, Individual};
///
/// let ind = Individual::new([2, 2, 4, 8, 1, 6, 3, 4]).unwrap();
/// assert_eq!(evaluate(&ind), 10);
/// ```
pub fn evaluate(individual: &Individual) -> Fitness {
    let genes = individual.genes();
    let mut count = 0;
    for (row_a, &col_a) in genes.iter().enumerate() {
        for (offset, &col_b) in genes[row_a + 1..].iter().enumerate() {
            let rows_apart = offset + 1;
            if col_a == col_b || col_a.abs_diff(col_b) as usize == rows_apart {
                count += 1;
            }
        }
    }
    count
}

/// Returns the lowest-conflict individual, keeping the first one in list
/// order on ties. `None` for an empty slice.
pub fn best_of(population: &[Individual]) -> Option<&Individual> {
    let mut best: Option<(&Individual, Fitness)> = None;
    for ind in population {
        let f = evaluate(ind);
        match best {
            Some((_, best_f)) if f >= best_f => {}
            _ => best = Some((ind, f)),
        }
    }
    best.map(|(ind, _)| ind)
}
