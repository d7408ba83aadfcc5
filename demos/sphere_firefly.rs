//! Sphere Function Optimization
//!
//! Minimizes the 10-dimensional sphere function (sum of squares) with the
//! basic firefly algorithm, streaming progress through `tracing`.
//!
//! Run with `RUST_LOG=firefly_evo=debug` to also see phase transitions.

use firefly_evo::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Sphere Function Optimization ===\n");

    const DIM: usize = 10;

    let config = FireflyConfig::builder()
        .num_fireflies(30)
        .bounds(-5.12, 5.12)
        .alpha(0.2)
        .max_fes(20_000)
        .seed(42)
        .build()?;

    let sphere = FnOracle::new(|x: &[f64]| x.iter().map(|v| v * v).sum());
    let result = FireflyOptimizer::new(config)?.run(sphere, DIM, 1, "firefly")?;

    println!("\nOptimization complete!");
    println!("  Best fitness: {:e}", result.best_fitness);
    println!("  Generations:  {}", result.generations);
    println!("  Evaluations:  {}", result.evaluations);
    println!("\nBest solution:");
    for (i, val) in result.best_position.iter().enumerate() {
        println!("  x[{}] = {:.6}", i, val);
    }

    println!("\n{}", result.stats.summary());

    Ok(())
}
