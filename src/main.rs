use anyhow::{Context, Result};
use clap::{arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use u_queens::ga::{GenerationEngine, QueensConfig};
use u_queens::report::{timestamp_now, write_run_reports};

fn cli() -> Command {
    Command::new("u-queens")
        .about("Searches for low-conflict eight-queens placements with a genetic algorithm")
        .arg(
            arg!(-g --generations [GENERATIONS] "Number of generations")
                .default_value("300")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(-n --individuals [INDIVIDUALS] "Initial population size and offspring pairs per generation")
                .default_value("400")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(-k --"tournament-size" [TOURNAMENT_SIZE] "Draws per tournament")
                .default_value("20")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(-m --mutation [MUTATION] "Mutation probability in [0, 1]")
                .default_value("0.8")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            arg!(-e --elitism [ELITISM] "Individuals carried unchanged to the next generation")
                .default_value("30")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(arg!(--seed [SEED] "Random seed").value_parser(clap::value_parser!(u64)))
        .arg(
            arg!(--"log-dir" [LOG_DIR] "Directory for the training log and fitness series")
                .default_value("logs/eight_queens")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(--"no-report" "Skip writing the training log and fitness series")
                .action(ArgAction::SetTrue),
        )
}

fn config_from(matches: &ArgMatches) -> QueensConfig {
    let mut config = QueensConfig::new(
        *matches.get_one::<usize>("generations").unwrap(),
        *matches.get_one::<usize>("individuals").unwrap(),
        *matches.get_one::<usize>("tournament-size").unwrap(),
        *matches.get_one::<f64>("mutation").unwrap(),
        *matches.get_one::<usize>("elitism").unwrap(),
    );
    config.seed = matches.get_one::<u64>("seed").copied();
    config
}

fn main() -> Result<()> {
    env_logger::init();

    let matches = cli().get_matches();
    let config = config_from(&matches);
    let started_at = timestamp_now();

    let cancel = Arc::new(AtomicBool::new(false));
    let handler_flag = cancel.clone();
    ctrlc::set_handler(move || {
        if !request_stop(&handler_flag) {
            std::process::exit(130);
        }
    })
    .context("failed to install Ctrl-C handler")?;

    let total = config.generations;
    let mut engine = GenerationEngine::new(config)?;
    println!("Running genetic algorithm...");
    let result = engine.run_with_observer(Some(cancel), |report| {
        eprint!(
            "\rgeneration {}/{}: best {} attacks",
            report.generation,
            total,
            report.best_fitness
        );
    });
    eprintln!();
    let result = result?;

    if result.cancelled {
        println!("Interrupted at generation {}", result.generations);
    }

    if !matches.get_flag("no-report") {
        let dir = matches.get_one::<PathBuf>("log-dir").unwrap();
        write_run_reports(&engine, dir, &started_at)
            .with_context(|| format!("failed to write reports to {}", dir.display()))?;
    }

    println!("Best placement: {} ({} attacks)", result.best, result.best_fitness);
    Ok(())
}

/// Raises the stop flag. Returns `false` if it was already raised, in
/// which case the caller should exit immediately.
fn request_stop(flag: &AtomicBool) -> bool {
    !flag.swap(true, Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_interrupt_requests_exit() {
        let flag = AtomicBool::new(false);
        assert!(request_stop(&flag));
        assert!(flag.load(Ordering::Relaxed));
        assert!(!request_stop(&flag));
        assert!(flag.load(Ordering::Relaxed));
    }
}
