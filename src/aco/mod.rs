//! Ant Colony Optimization (ACO).
//!
//! A population of simulated ants builds closed tours over every node of
//! a weighted graph. Each step is a probabilistic choice biased by the
//! pheromone left on an edge and by the edge's length. After every
//! iteration the cheapest tours reinforce their edges and all pheromone
//! evaporates, so the colony concentrates on short tours over time.
//!
//! # Key Types
//!
//! - [`DistanceMatrix`]: static edge costs, validated at construction
//! - [`PheromoneMatrix`]: per-edge desirability, updated once per iteration
//! - [`MoveSelector`]: the `tau^alpha * (1/d)^beta` roulette move rule
//! - [`AcoConfig`]: colony hyperparameters
//! - [`AntColony`]: executes the iteration loop
//! - [`AcoResult`]: best tour found with run statistics
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod builder;
mod config;
mod error;
mod runner;
mod selector;
mod types;

pub use builder::build_tour;
pub use config::AcoConfig;
pub use error::AcoError;
pub use runner::{AcoResult, AntColony};
pub use selector::{MoveSelector, RouletteSampler, WeightedSampler};
pub use types::{DistanceMatrix, Edge, PheromoneMatrix, Tour};
