//! Ant Colony Optimization for all-nodes tour problems.
//!
//! Provides the base Ant System over a weighted, possibly asymmetric
//! distance matrix:
//!
//! - **Distance model**: validated N x N edge costs with infinite self-edges.
//! - **Pheromone state**: per-edge desirability, deposited by elite tours
//!   and evaporated once per iteration.
//! - **Move selection**: roulette wheel over `tau^alpha * (1/d)^beta`,
//!   with an injectable [`aco::WeightedSampler`] for deterministic tests.
//! - **Colony runner**: the generate / deposit-decay / track-best loop.
//!
//! # Architecture
//!
//! This crate sits at Layer 2 (Algorithms) in the U-Engine ecosystem,
//! depending only on `u-numflow` (Layer 1: Foundation) for seeded random
//! number generation.

pub mod aco;
