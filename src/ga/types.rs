//! Chromosome representation.
//!
//! An [`Individual`] places one queen per row: gene `i` is the column
//! (1-based) of the queen in row `i`. Nothing forces the columns to be
//! distinct, so duplicate columns are valid (attacking) placements.

use crate::error::{QueensError, Result};
use rand::Rng;
use std::fmt;

/// Number of genes (rows, and also columns) in every individual.
pub const GENES: usize = 8;

/// Conflict count of an individual. Lower is better; `0` is a solution.
pub type Fitness = u32;

/// A population is an ordered list of individuals whose size is not
/// fixed across generations.
pub type Population = Vec<Individual>;

/// One candidate placement of eight queens.
///
/// # Examples
///
/// ```
/// use u_queens::ga::Individual;
///
/// let ind = Individual::new([1, 5, 8, 6, 3, 7, 2, 4]).unwrap();
/// assert_eq!(ind.genes()[2], 8);
/// assert_eq!(ind.to_string(), "[1, 5, 8, 6, 3, 7, 2, 4]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual([u8; GENES]);

impl Individual {
    /// Builds an individual, rejecting genes outside `1..=8`.
    pub fn new(genes: [u8; GENES]) -> Result<Self> {
        if let Some((position, &value)) = genes
            .iter()
            .enumerate()
            .find(|&(_, &g)| !(1..=GENES as u8).contains(&g))
        {
            return Err(QueensError::InvalidGene { position, value });
        }
        Ok(Self(genes))
    }

    /// Draws every gene uniformly and independently from `1..=8`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut genes = [0u8; GENES];
        for g in genes.iter_mut() {
            *g = rng.random_range(1..=GENES as u8);
        }
        Self(genes)
    }

    /// Column of the queen in each row.
    pub fn genes(&self) -> &[u8; GENES] {
        &self.0
    }

    pub(crate) fn genes_mut(&mut self) -> &mut [u8; GENES] {
        &mut self.0
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, g) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{g}")?;
        }
        write!(f, "]")
    }
}

impl TryFrom<[u8; GENES]> for Individual {
    type Error = QueensError;

    fn try_from(genes: [u8; GENES]) -> Result<Self> {
        Self::new(genes)
    }
}
