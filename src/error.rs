//! Error type shared by the engine, the report writer, and the CLI.

use thiserror::Error;

/// Errors produced by the eight-queens GA.
#[derive(Error, Debug)]
pub enum QueensError {
    /// A run parameter is out of range for the population it applies to.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A gene outside `1..=8` was supplied when building an individual.
    #[error("gene {value} at position {position} is outside 1..=8")]
    InvalidGene { position: usize, value: u8 },

    /// An operation that needs at least one individual got none.
    #[error("population is empty")]
    EmptyPopulation,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QueensError>;
