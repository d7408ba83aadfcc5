//! Benchmark Sweep
//!
//! Runs every search mode on every function of the built-in benchmark suite
//! with the standard budget of `10_000 * D` evaluations and prints the error
//! against each function's known optimum.
//!
//! Usage: `cargo run --example benchmark_sweep -- [DIM] [RESULTS.json]`

use std::env;
use std::fs;

use firefly_evo::prelude::*;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct SweepRow {
    function_id: usize,
    function: &'static str,
    dimension: usize,
    mode: SearchMode,
    best_fitness: f64,
    error: f64,
    evaluations: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut args = env::args().skip(1);
    let dimension: usize = match args.next() {
        Some(arg) => arg.parse()?,
        None => 10,
    };
    let output = args.next();

    println!("=== Benchmark Sweep (D = {}) ===\n", dimension);
    println!("{:<4} {:<14} {:<14} {:>14}", "F", "function", "mode", "error");

    let mut rows = Vec::new();
    for function_id in 1..=FUNCTION_COUNT {
        for mode in SearchMode::ALL {
            let mut config = FireflyConfig::for_dimension(dimension);
            config.mode = mode;
            config.seed = Some(function_id as u64);

            let mut suite = BenchmarkSuite::new();
            let result = FireflyOptimizer::new(config)?.run_with_observer(
                &mut suite,
                dimension,
                function_id,
                mode.as_str(),
                NoopObserver,
            )?;
            let function = suite.function_name().unwrap_or("unknown");

            println!(
                "{:<4} {:<14} {:<14} {:>14.6e}",
                function_id, function, mode, result.error
            );
            rows.push(SweepRow {
                function_id,
                function,
                dimension,
                mode,
                best_fitness: result.best_fitness,
                error: result.error,
                evaluations: result.evaluations,
            });
        }
    }

    if let Some(path) = output {
        fs::write(&path, serde_json::to_string_pretty(&rows)?)?;
        println!("\nResults written to {}", path);
    }

    Ok(())
}
