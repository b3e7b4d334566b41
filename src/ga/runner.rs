//! Generation loop.
//!
//! [`GenerationEngine`] owns one run: the seeded RNG, the generation
//! counter, and the history of every committed population. Each step is
//! shuffle → sort → elitism split → tournament → crossover → mutation →
//! reassemble.
//!
//! # Population size
//!
//! A step always breeds `2 * population_size` offspring and appends the
//! elite, so generation 0 holds `n` individuals and every later generation
//! holds `2n + e`. Nothing here assumes the size stays at `n`.
//!
//! # Shared offspring
//!
//! Within one step the breeding pool is an arena: tournaments return slot
//! indices, and crossover and mutation rewrite those slots in place. A
//! slot picked several times is the same individual each time, so later
//! edits show up in every offspring position that refers to it, and a
//! pair that picks the same slot twice crosses it with itself (a no-op)
//! and mutates it twice. The next population is copied out of the arena
//! when the step commits, so sharing never spans two generations.

use super::config::QueensConfig;
use super::fitness::{best_of, evaluate};
use super::operators::{crossover, crossover_point, elitism_split, mutate};
use super::selection::tournament;
use super::stats::PopulationStats;
use super::types::{Fitness, Individual, Population};
use crate::error::{QueensError, Result};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of a GA run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult {
    /// Lowest-conflict individual of the last committed generation
    /// (first in list order on ties).
    pub best: Individual,

    /// Conflicts of `best`.
    pub best_fitness: Fitness,

    /// Number of committed generation steps.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

/// Progress snapshot handed to observers after each committed step.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// Index of the generation just committed (1 for the first step).
    pub generation: usize,

    /// Number of individuals in that generation.
    pub population_size: usize,

    /// Lowest-conflict individual in that generation.
    pub best: Individual,

    /// Conflicts of `best`.
    pub best_fitness: Fitness,
}

/// Creates `n` individuals with genes drawn uniformly from `1..=8`.
pub fn initialize_population<R: Rng>(n: usize, rng: &mut R) -> Population {
    (0..n).map(|_| Individual::random(rng)).collect()
}

/// Runs `g` generations with population size `n`, tournament size `k`,
/// mutation rate `m` and elite count `e`, returning the best individual
/// of the last generation.
///
/// # Errors
/// [`QueensError::InvalidConfig`] if the parameters are out of range.
pub fn run(g: usize, n: usize, k: usize, m: f64, e: usize) -> Result<Individual> {
    let mut engine = GenerationEngine::new(QueensConfig::new(g, n, k, m, e))?;
    Ok(engine.run()?.best)
}

/// Drives one GA run from a random initial population.
///
/// # Usage
///
/// ```
/// use u_queens::ga::{GenerationEngine, QueensConfig};
///
/// let config = QueensConfig::new(20, 30, 3, 0.8, 2).with_seed(42);
/// let mut engine = GenerationEngine::new(config).unwrap();
/// let result = engine.run().unwrap();
///
/// assert_eq!(result.generations, 20);
/// assert_eq!(engine.history().len(), 21);
/// assert_eq!(engine.population().len(), 2 * 30 + 2);
/// ```
#[derive(Debug)]
pub struct GenerationEngine {
    config: QueensConfig,
    rng: StdRng,
    generation: usize,
    history: Vec<Population>,
}

impl GenerationEngine {
    /// Validates `config`, seeds the RNG and draws generation 0.
    ///
    /// # Errors
    /// [`QueensError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: QueensConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let initial = initialize_population(config.population_size, &mut rng);

        Ok(Self {
            config,
            rng,
            generation: 0,
            history: vec![initial],
        })
    }

    pub fn config(&self) -> &QueensConfig {
        &self.config
    }

    /// Number of committed generation steps.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The most recently committed population.
    pub fn population(&self) -> &[Individual] {
        &self.history[self.generation]
    }

    /// Every committed population, starting with generation 0.
    pub fn history(&self) -> &[Population] {
        &self.history
    }

    /// Consumes the engine and returns its history.
    pub fn into_history(self) -> Vec<Population> {
        self.history
    }

    /// Lowest-conflict individual of the current population.
    pub fn best(&self) -> Result<Individual> {
        best_of(self.population())
            .copied()
            .ok_or(QueensError::EmptyPopulation)
    }

    /// Runs one generation step and commits it.
    ///
    /// # Errors
    /// [`QueensError::InvalidConfig`] if the current population cannot
    /// supply the elite or a big enough breeding pool.
    pub fn step(&mut self) -> Result<()> {
        self.step_with_cancel(None).map(|_| ())
    }

    /// Runs the remaining generations to completion.
    pub fn run(&mut self) -> Result<RunResult> {
        self.run_with_observer(None, |_| {})
    }

    /// Runs with an optional cancellation flag.
    ///
    /// When the flag is raised, the step being built is dropped and the
    /// result comes from the last committed generation.
    pub fn run_with_cancel(&mut self, cancel: Option<Arc<AtomicBool>>) -> Result<RunResult> {
        self.run_with_observer(cancel, |_| {})
    }

    /// Runs with an optional cancellation flag, calling `on_generation`
    /// after every committed step.
    pub fn run_with_observer<F>(
        &mut self,
        cancel: Option<Arc<AtomicBool>>,
        mut on_generation: F,
    ) -> Result<RunResult>
    where
        F: FnMut(&GenerationReport),
    {
        let flag = cancel.as_deref();
        info!(
            "running {} generations: n={} k={} m={} e={}",
            self.config.generations,
            self.config.population_size,
            self.config.tournament_size,
            self.config.mutation_rate,
            self.config.elite_count
        );

        let mut cancelled = false;
        while self.generation < self.config.generations {
            if is_cancelled(flag) || !self.step_with_cancel(flag)? {
                cancelled = true;
                break;
            }

            let best = self.best()?;
            let report = GenerationReport {
                generation: self.generation,
                population_size: self.population().len(),
                best,
                best_fitness: evaluate(&best),
            };
            on_generation(&report);
        }

        if cancelled {
            warn!(
                "interrupted; keeping generation {} of {}",
                self.generation, self.config.generations
            );
        }

        let best = self.best()?;
        let best_fitness = evaluate(&best);
        info!("best placement {best} with {best_fitness} attacks");

        Ok(RunResult {
            best,
            best_fitness,
            generations: self.generation,
            cancelled,
        })
    }

    /// Builds the next generation and commits it unless `cancel` is raised
    /// first. Returns `false` when the step was abandoned; population,
    /// history and counter are then untouched.
    pub(crate) fn step_with_cancel(&mut self, cancel: Option<&AtomicBool>) -> Result<bool> {
        let Some(next) = self.breed(cancel)? else {
            return Ok(false);
        };

        self.history.push(next);
        self.generation += 1;

        if log::log_enabled!(log::Level::Debug) {
            let stats = PopulationStats::from_population(self.population())?;
            debug!(
                "generation {}: size={} min={} mean={:.3} max={}",
                self.generation, stats.size, stats.min, stats.mean, stats.max
            );
        }
        Ok(true)
    }

    fn breed(&mut self, cancel: Option<&AtomicBool>) -> Result<Option<Population>> {
        let QueensConfig {
            population_size: n,
            tournament_size: k,
            mutation_rate: m,
            elite_count: e,
            ..
        } = self.config;

        let current = self.population().to_vec();
        let (elite, mut arena) = elitism_split(current, e, &mut self.rng)?;
        if k > arena.len() {
            return Err(QueensError::InvalidConfig(format!(
                "tournament_size ({k}) exceeds the breeding pool ({}) at generation {}",
                arena.len(),
                self.generation
            )));
        }

        let mut offspring: Vec<usize> = Vec::with_capacity(2 * n);
        for _ in 0..n {
            if is_cancelled(cancel) {
                return Ok(None);
            }

            let a = tournament(&arena, k, &mut self.rng);
            let b = tournament(&arena, k, &mut self.rng);
            let cut = crossover_point(&mut self.rng);
            crossover_slots(&mut arena, a, b, cut);
            mutate(&mut arena[a], m, &mut self.rng);
            mutate(&mut arena[b], m, &mut self.rng);
            offspring.push(a);
            offspring.push(b);
        }

        let mut next: Population = offspring.iter().map(|&slot| arena[slot]).collect();
        next.extend(elite);
        Ok(Some(next))
    }
}

/// Crosses two arena slots in place. The same slot twice is left as is.
fn crossover_slots(arena: &mut [Individual], a: usize, b: usize, index: usize) {
    if a == b {
        return;
    }
    let (lo, hi) = (a.min(b), a.max(b));
    let (left, right) = arena.split_at_mut(hi);
    crossover(&mut left[lo], &mut right[0], index);
}

fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ind(genes: [u8; 8]) -> Individual {
        Individual::new(genes).unwrap()
    }

    fn seeded(g: usize, n: usize, k: usize, m: f64, e: usize) -> GenerationEngine {
        GenerationEngine::new(QueensConfig::new(g, n, k, m, e).with_seed(42)).unwrap()
    }

    #[test]
    fn test_initialize_population() {
        let mut rng = StdRng::seed_from_u64(1);
        let pop = initialize_population(25, &mut rng);
        assert_eq!(pop.len(), 25);
        assert!(pop
            .iter()
            .all(|i| i.genes().iter().all(|&g| (1..=8).contains(&g))));
    }

    #[test]
    fn test_new_starts_at_generation_zero() {
        let engine = seeded(10, 12, 2, 0.5, 1);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.population().len(), 12);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = GenerationEngine::new(QueensConfig::new(1, 5, 10, 0.5, 0)).unwrap_err();
        assert!(matches!(err, QueensError::InvalidConfig(_)));
    }

    #[test]
    fn test_population_size_law() {
        let mut engine = seeded(6, 10, 3, 0.5, 2);
        engine.run().unwrap();

        let sizes: Vec<usize> = engine.history().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![10, 22, 22, 22, 22, 22, 22]);
    }

    #[test]
    fn test_population_size_law_without_elite() {
        let mut engine = seeded(3, 7, 2, 0.2, 0);
        engine.run().unwrap();
        let sizes: Vec<usize> = engine.history().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![7, 14, 14, 14]);
    }

    #[test]
    fn test_zero_generations_returns_initial_best() {
        let mut engine = seeded(0, 15, 2, 0.5, 1);
        let initial = engine.history()[0].clone();
        let result = engine.run().unwrap();

        let min = initial.iter().map(evaluate).min().unwrap();
        assert_eq!(result.generations, 0);
        assert!(!result.cancelled);
        assert_eq!(result.best_fitness, min);
        assert_eq!(result.best, *best_of(&initial).unwrap());
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_interrupt_after_generation_3() {
        let mut engine = seeded(10, 20, 3, 0.8, 2);
        let cancel = Arc::new(AtomicBool::new(false));
        let trigger = cancel.clone();

        let result = engine
            .run_with_observer(Some(cancel), |report| {
                if report.generation == 3 {
                    trigger.store(true, Ordering::Relaxed);
                }
            })
            .unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 3);
        assert_eq!(engine.history().len(), 4);
        assert_eq!(result.best, *best_of(&engine.history()[3]).unwrap());
        assert_eq!(result.best_fitness, evaluate(&result.best));
    }

    #[test]
    fn test_cancel_before_start() {
        let mut engine = seeded(10, 20, 3, 0.8, 2);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = engine.run_with_cancel(Some(cancel)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_abandoned_step_is_not_committed() {
        let mut engine = seeded(10, 20, 3, 0.8, 2);
        engine.step().unwrap();
        let before = engine.history().to_vec();

        let flag = AtomicBool::new(true);
        assert!(!engine.step_with_cancel(Some(&flag)).unwrap());
        assert_eq!(engine.generation(), 1);
        assert_eq!(engine.history(), before.as_slice());
    }

    #[test]
    fn test_resume_after_cancel() {
        let mut engine = seeded(5, 10, 2, 0.5, 1);
        let cancel = Arc::new(AtomicBool::new(true));
        engine.run_with_cancel(Some(cancel)).unwrap();

        let result = engine.run().unwrap();
        assert!(!result.cancelled);
        assert_eq!(result.generations, 5);
        assert_eq!(engine.history().len(), 6);
    }

    #[test]
    fn test_observer_sees_every_generation() {
        let mut engine = seeded(5, 10, 2, 0.5, 1);
        let mut seen = Vec::new();
        engine
            .run_with_observer(None, |r| seen.push((r.generation, r.population_size)))
            .unwrap();
        assert_eq!(seen, vec![(1, 21), (2, 21), (3, 21), (4, 21), (5, 21)]);
    }

    #[test]
    fn test_same_seed_same_history() {
        let mut a = seeded(8, 12, 3, 0.7, 2);
        let mut b = seeded(8, 12, 3, 0.7, 2);
        a.run().unwrap();
        b.run().unwrap();
        assert_eq!(a.history(), b.history());
    }

    #[test]
    fn test_elite_is_carried_unchanged() {
        let mut engine = seeded(1, 30, 3, 1.0, 5);
        let mut initial_scores: Vec<Fitness> =
            engine.history()[0].iter().map(evaluate).collect();
        initial_scores.sort_unstable();

        engine.step().unwrap();
        let next = &engine.history()[1];
        let elite = &next[next.len() - 5..];

        let mut elite_scores: Vec<Fitness> = elite.iter().map(evaluate).collect();
        elite_scores.sort_unstable();
        assert_eq!(elite_scores, initial_scores[..5].to_vec());
        for member in elite {
            assert!(engine.history()[0].contains(member));
        }
    }

    #[test]
    fn test_best_never_worsens_with_elite() {
        let mut engine = seeded(40, 30, 3, 0.8, 1);
        engine.run().unwrap();
        let mins: Vec<Fitness> = engine
            .history()
            .iter()
            .map(|p| p.iter().map(evaluate).min().unwrap())
            .collect();
        for w in mins.windows(2) {
            assert!(w[1] <= w[0], "min conflicts rose: {mins:?}");
        }
    }

    #[test]
    fn test_single_slot_pool_shares_offspring() {
        // n=2, e=1 leaves one individual in the pool: every tournament
        // returns slot 0, so all four offspring are the same individual
        // after both mutations of both pairs have landed on it.
        let mut engine = seeded(1, 2, 1, 1.0, 1);
        engine.step().unwrap();
        let next = &engine.history()[1];

        assert_eq!(next.len(), 5);
        assert!(next[..4].iter().all(|i| *i == next[0]));
    }

    #[test]
    fn test_crossover_slots_distinct() {
        let mut arena = vec![ind([1; 8]), ind([2; 8]), ind([3; 8])];
        crossover_slots(&mut arena, 2, 0, 6);
        assert_eq!(arena[0].genes(), &[1, 1, 1, 1, 1, 1, 3, 3]);
        assert_eq!(arena[2].genes(), &[3, 3, 3, 3, 3, 3, 1, 1]);
        assert_eq!(arena[1].genes(), &[2; 8]);
    }

    #[test]
    fn test_crossover_slots_same_slot_is_noop() {
        let mut arena = vec![ind([2, 2, 4, 8, 1, 6, 3, 4])];
        crossover_slots(&mut arena, 0, 0, 3);
        assert_eq!(arena[0].genes(), &[2, 2, 4, 8, 1, 6, 3, 4]);
    }

    #[test]
    fn test_run_free_function() {
        let best = run(5, 20, 3, 0.8, 2).unwrap();
        assert!(best.genes().iter().all(|&g| (1..=8).contains(&g)));
    }

    #[test]
    fn test_run_free_function_rejects_elite_overflow() {
        assert!(run(5, 4, 1, 0.8, 4).is_err());
    }

    #[test]
    fn test_search_improves_on_initial_population() {
        let mut engine = seeded(100, 100, 5, 0.8, 10);
        let initial_min = engine.history()[0].iter().map(evaluate).min().unwrap();
        let result = engine.run().unwrap();

        assert!(result.best_fitness <= initial_min);
        assert!(
            result.best_fitness <= 3,
            "expected at most 3 attacks after 100 generations, got {}",
            result.best_fitness
        );
    }
}
