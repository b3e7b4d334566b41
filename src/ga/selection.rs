//! Tournament selection.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::fitness::evaluate;
use super::types::Individual;
use rand::Rng;

/// Draws `k` individuals uniformly **with replacement** from `pool` and
/// returns the index of the one with the fewest conflicts.
///
/// On ties the earliest draw wins. The returned index refers to the slot
/// in `pool`, not to a copy, so the caller can modify the winner in place.
///
/// A `k` of 0 is treated as 1.
///
/// # Complexity
/// O(k) evaluations per call
///
/// # Panics
/// Panics if `pool` is empty.
pub fn tournament<R: Rng>(pool: &[Individual], k: usize, rng: &mut R) -> usize {
    assert!(!pool.is_empty(), "cannot select from empty population");

    let n = pool.len();
    let mut best_idx = rng.random_range(0..n);
    let mut best_fitness = evaluate(&pool[best_idx]);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        let f = evaluate(&pool[idx]);
        if f < best_fitness {
            best_idx = idx;
            best_fitness = f;
        }
    }
    best_idx
}
