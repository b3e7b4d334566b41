//! Run reports: the appended training log and the fitness series CSV.
//!
//! A [`TrainingReport`] is taken from an engine after the run ends,
//! whether it finished or was interrupted, and always describes the last
//! committed generation.

use crate::error::{QueensError, Result};
use crate::ga::{
    best_of, fitness_curve, GenerationEngine, Individual, PopulationStats, QueensConfig,
};
use chrono::Local;
use log::info;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Timestamp format used for report headers and output file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Local time formatted with [`TIMESTAMP_FORMAT`].
pub fn timestamp_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Summary of one run, ready to be appended to a log file.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub started_at: String,
    pub config: QueensConfig,
    /// Number of committed generation steps; generation 0 is not counted.
    pub generations: usize,
    pub best: Individual,
    pub last: PopulationStats,
}

impl TrainingReport {
    /// Builds the report from the engine's last committed generation.
    pub fn from_engine(engine: &GenerationEngine, started_at: impl Into<String>) -> Result<Self> {
        let population = engine.population();
        let best = *best_of(population).ok_or(QueensError::EmptyPopulation)?;
        Ok(Self {
            started_at: started_at.into(),
            config: engine.config().clone(),
            generations: engine.generation(),
            best,
            last: PopulationStats::from_population(population)?,
        })
    }

    /// Renders the log block.
    pub fn render(&self) -> String {
        let c = &self.config;
        format!(
            "[{}]\nPARAMETERS:\ngens={}\nindivs={}\nt_size={}\nmut={}\nelite={}\n\
             LAST GEN: {}\nBEST: {}\nFitness: MAX={}; MIN={}; MEAN={};\n\n\n\n",
            self.started_at,
            c.generations,
            c.population_size,
            c.tournament_size,
            c.mutation_rate,
            c.elite_count,
            self.generations,
            self.best,
            self.last.max,
            self.last.min,
            self.last.mean,
        )
    }

    /// Appends the rendered block to `path`, creating parent directories.
    pub fn append_to(&self, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(self.render().as_bytes())?;
        info!("training log appended to {}", path.display());
        Ok(())
    }
}

/// Writes `generation,max,mean,min` rows for every history entry.
pub fn write_fitness_csv(path: &Path, curve: &[PopulationStats]) -> Result<()> {
    ensure_parent(path)?;
    let mut out = BufWriter::new(fs::File::create(path)?);
    writeln!(out, "generation,max,mean,min")?;
    for (generation, s) in curve.iter().enumerate() {
        writeln!(out, "{generation},{},{},{}", s.max, s.mean, s.min)?;
    }
    out.flush()?;
    info!("fitness series written to {}", path.display());
    Ok(())
}

/// Writes the training log and fitness CSV for `engine` under `dir`.
///
/// The log is appended to `dir/training.txt`; the series goes to
/// `dir/<started_at>_fitness.csv`.
pub fn write_run_reports(engine: &GenerationEngine, dir: &Path, started_at: &str) -> Result<()> {
    TrainingReport::from_engine(engine, started_at)?.append_to(&dir.join("training.txt"))?;
    let curve = fitness_curve(engine.history())?;
    write_fitness_csv(&dir.join(format!("{started_at}_fitness.csv")), &curve)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
