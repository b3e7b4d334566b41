//! Genetic algorithm for the eight-queens problem.
//!
//! An individual places one queen per row of an 8×8 board; its fitness is
//! the number of attacking pairs, minimized toward zero.
//!
//! # Key Types
//!
//! - [`Individual`]: eight genes in `1..=8`, one column per row
//! - [`QueensConfig`]: run parameters (generations, population, tournament,
//!   mutation, elite, seed)
//! - [`GenerationEngine`]: executes the generational loop and keeps the
//!   population history
//! - [`RunResult`]: best individual of the last committed generation
//!
//! # Submodules
//!
//! - [`operators`]: single-point crossover, gene-reset mutation, elitism split
//! - [`stats`]: per-generation max/mean/min conflict summaries
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod fitness;
pub mod operators;
mod runner;
mod selection;
pub mod stats;
mod types;

pub use config::QueensConfig;
pub use fitness::{best_of, evaluate};
pub use runner::{initialize_population, run, GenerationEngine, GenerationReport, RunResult};
pub use selection::tournament;
pub use stats::{fitness_curve, PopulationStats};
pub use types::{Fitness, Individual, Population, GENES};
