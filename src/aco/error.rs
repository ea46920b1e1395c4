//! Error type for ACO construction and runs.

use thiserror::Error;

/// Errors raised while building or running an [`AntColony`](super::AntColony).
///
/// Every variant except [`AcoError::Unreachable`],
/// [`AcoError::DegenerateWeights`] and [`AcoError::NoFiniteTour`] is a
/// configuration error and is reported before any iteration starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcoError {
    /// A distance row does not have N entries.
    #[error("distance matrix is not square: row {row} has {found} entries, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A row-major buffer does not hold exactly `n * n` entries.
    #[error("flat distance buffer for {n} nodes needs n*n entries, got {found}")]
    FlatLength { n: usize, found: usize },

    /// The pheromone matrix and the distance matrix differ in size.
    #[error("pheromone matrix has {found} nodes, distance matrix has {expected}")]
    ShapeMismatch { expected: usize, found: usize },

    /// Fewer than two nodes; no cycle can be formed.
    #[error("distance matrix needs at least 2 nodes, got {0}")]
    TooFewNodes(usize),

    /// A self-edge has a finite cost.
    #[error("diagonal entry ({node}, {node}) must be infinite, got {value}")]
    FiniteDiagonal { node: usize, value: f64 },

    /// An off-diagonal cost is NaN, zero or negative.
    #[error("distance ({from}, {to}) must be positive, got {value}")]
    InvalidDistance { from: usize, to: usize, value: f64 },

    /// A hyperparameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configured start node does not exist.
    #[error("start node {start} out of range for {n} nodes")]
    StartOutOfRange { start: usize, n: usize },

    /// Every unvisited node is unreachable from `from`.
    #[error("no unvisited node reachable from node {from}")]
    Unreachable { from: usize },

    /// Move weights from `from` sum to zero or a non-finite value.
    #[error("move weights from node {from} do not form a distribution")]
    DegenerateWeights { from: usize },

    /// Every tour of a completed run needed an infinite closing edge.
    #[error("no finite tour found back to node {start} in {iterations} iterations")]
    NoFiniteTour { start: usize, iterations: usize },
}

impl AcoError {
    /// Returns `true` for errors detected at construction time.
    pub fn is_config_error(&self) -> bool {
        !matches!(
            self,
            AcoError::Unreachable { .. }
                | AcoError::DegenerateWeights { .. }
                | AcoError::NoFiniteTour { .. }
        )
    }
}
