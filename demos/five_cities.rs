//! Solves the 5-city instance and prints the best tour.
//!
//! Run with `RUST_LOG=debug` to see every iteration.

use tracing_subscriber::EnvFilter;
use u_antcolony::aco::{AcoConfig, AcoError, AntColony, DistanceMatrix};

fn main() -> Result<(), AcoError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let inf = f64::INFINITY;
    let distances = DistanceMatrix::new(vec![
        vec![inf, 2.0, 2.0, 5.0, 7.0],
        vec![2.0, inf, 4.0, 8.0, 2.0],
        vec![2.0, 4.0, inf, 1.0, 3.0],
        vec![5.0, 8.0, 1.0, inf, 2.0],
        vec![7.0, 2.0, 3.0, 2.0, inf],
    ])?;

    let config = AcoConfig::default()
        .with_ants(50)
        .with_best(10)
        .with_iterations(200)
        .with_decay(0.8)
        .with_alpha(1.0)
        .with_beta(2.0);

    let mut colony = AntColony::new(distances, config)?;
    let result = colony.run()?;

    match result.best {
        Some(tour) => println!("shortest path: {:?} (cost {})", tour.edges(), result.best_cost),
        None => println!("no tour found"),
    }
    Ok(())
}
