//! End-to-end engine behavior through the public API.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use u_queens::ga::{best_of, evaluate, run, GenerationEngine, QueensConfig};
use u_queens::QueensError;

#[test]
fn test_population_grows_then_stabilizes() {
    let config = QueensConfig::new(5, 10, 3, 0.8, 2).with_seed(1);
    let mut engine = GenerationEngine::new(config).unwrap();

    assert_eq!(engine.population().len(), 10);
    engine.step().unwrap();
    assert_eq!(engine.population().len(), 22);
    engine.step().unwrap();
    assert_eq!(engine.population().len(), 22);
}

#[test]
fn test_zero_generations() {
    let config = QueensConfig::new(0, 25, 3, 0.8, 2).with_seed(5);
    let mut engine = GenerationEngine::new(config).unwrap();
    let initial_min = engine.population().iter().map(evaluate).min().unwrap();

    let result = engine.run().unwrap();
    assert_eq!(result.best_fitness, initial_min);
    assert_eq!(result.generations, 0);
}

#[test]
fn test_interrupted_run_uses_last_committed_generation() {
    let config = QueensConfig::new(10, 30, 4, 0.8, 3).with_seed(9);
    let mut engine = GenerationEngine::new(config).unwrap();
    let cancel = Arc::new(AtomicBool::new(false));
    let trigger = cancel.clone();

    let result = engine
        .run_with_observer(Some(cancel), move |report| {
            if report.generation == 3 {
                trigger.store(true, Ordering::Relaxed);
            }
        })
        .unwrap();

    assert!(result.cancelled);
    assert_eq!(result.generations, 3);
    let history = engine.history();
    assert_eq!(history.len(), 4);
    assert_eq!(&result.best, best_of(&history[3]).unwrap());
}

#[test]
fn test_invalid_configuration_fails_fast() {
    for config in [
        QueensConfig::new(3, 0, 1, 0.5, 0),
        QueensConfig::new(3, 10, 1, 0.5, 10),
        QueensConfig::new(3, 10, 9, 0.5, 2),
        QueensConfig::new(3, 10, 0, 0.5, 0),
    ] {
        let err = GenerationEngine::new(config).unwrap_err();
        assert!(matches!(err, QueensError::InvalidConfig(_)), "{err}");
    }
}

#[test]
fn test_reference_parameters_find_a_good_placement() {
    let config = QueensConfig::default().with_generations(60).with_seed(2024);
    let mut engine = GenerationEngine::new(config).unwrap();
    let result = engine.run().unwrap();
    assert!(
        result.best_fitness <= 2,
        "expected at most 2 attacks, got {}",
        result.best_fitness
    );
}

#[test]
fn test_free_run() {
    let best = run(10, 20, 3, 0.8, 2).unwrap();
    assert!(evaluate(&best) <= 28);
}
