//! Evolutionary search for low-conflict eight-queens placements.
//!
//! The [`ga`] module holds the engine: individual encoding, conflict
//! counting, tournament selection, single-point crossover, gene-reset
//! mutation, elitism, and the generational loop with its population
//! history. [`report`] turns a finished (or interrupted) run into the
//! training log and the per-generation fitness series.
//!
//! # Example
//!
//! ```
//! use u_queens::ga::{evaluate, GenerationEngine, QueensConfig};
//!
//! let config = QueensConfig::new(30, 50, 4, 0.8, 5).with_seed(7);
//! let mut engine = GenerationEngine::new(config).unwrap();
//! let result = engine.run().unwrap();
//! assert_eq!(result.best_fitness, evaluate(&result.best));
//! ```

pub mod error;
pub mod ga;
pub mod report;

pub use error::{QueensError, Result};
