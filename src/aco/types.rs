//! Core data types: distance model, pheromone state and tours.

use super::error::AcoError;

/// A directed edge `(from, to)` between two node indices.
pub type Edge = (usize, usize);

/// Static edge-cost matrix of an N-node graph.
///
/// Entry `(i, j)` is the cost of the directed edge `i -> j`. The matrix
/// may be asymmetric. Self-edges must be `f64::INFINITY`; an infinite
/// off-diagonal entry marks a missing edge.
///
/// # Examples
///
/// ```
/// use u_antcolony::aco::DistanceMatrix;
///
/// let inf = f64::INFINITY;
/// let d = DistanceMatrix::new(vec![
///     vec![inf, 2.0, 3.0],
///     vec![2.0, inf, 4.0],
///     vec![3.0, 4.0, inf],
/// ])
/// .unwrap();
/// assert_eq!(d.len(), 3);
/// assert_eq!(d.edges_cost(&[(0, 1), (1, 2), (2, 0)]), 9.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds a distance matrix from rows.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, AcoError> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n {
                return Err(AcoError::NotSquare {
                    row,
                    expected: n,
                    found: values.len(),
                });
            }
            data.extend(values);
        }
        Self::from_flat(n, data)
    }

    /// Builds a distance matrix from a row-major buffer of `n * n` values.
    pub fn from_flat(n: usize, data: Vec<f64>) -> Result<Self, AcoError> {
        if n < 2 {
            return Err(AcoError::TooFewNodes(n));
        }
        if n.checked_mul(n) != Some(data.len()) {
            return Err(AcoError::FlatLength {
                n,
                found: data.len(),
            });
        }

        for i in 0..n {
            for j in 0..n {
                let value = data[i * n + j];
                if i == j {
                    if value != f64::INFINITY {
                        return Err(AcoError::FiniteDiagonal { node: i, value });
                    }
                } else if value.is_nan() || value <= 0.0 {
                    return Err(AcoError::InvalidDistance {
                        from: i,
                        to: j,
                        value,
                    });
                }
            }
        }

        Ok(Self { n, data })
    }

    /// Number of nodes N.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always `false`: a valid matrix has at least two nodes.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Cost of the edge `from -> to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.n + to]
    }

    /// Outgoing costs of `from`.
    #[inline]
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.n..(from + 1) * self.n]
    }

    /// Sum of edge costs along `edges`.
    pub fn edges_cost(&self, edges: &[Edge]) -> f64 {
        edges.iter().map(|&(from, to)| self.get(from, to)).sum()
    }

    /// Total cost of a tour.
    pub fn tour_cost(&self, tour: &Tour) -> f64 {
        self.edges_cost(tour.edges())
    }
}

/// Mutable pheromone level of every directed edge.
///
/// Initialized uniformly to `1/N`. Entries are never negative: deposits
/// only add nonnegative amounts and evaporation multiplies by a factor in
/// `(0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    n: usize,
    data: Vec<f64>,
    version: u64,
}

impl PheromoneMatrix {
    /// Creates an `n x n` matrix with every entry set to `1/n`.
    pub fn uniform(n: usize) -> Self {
        let initial = if n == 0 { 0.0 } else { 1.0 / n as f64 };
        Self {
            n,
            data: vec![initial; n * n],
            version: 0,
        }
    }

    /// Restores the uniform initial state.
    pub fn reset(&mut self) {
        *self = Self::uniform(self.n);
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.n + to]
    }

    /// Pheromone levels on the outgoing edges of `from`.
    #[inline]
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.n..(from + 1) * self.n]
    }

    /// All entries in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Number of completed evaporation phases since the last reset.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Adds `amount` to the entry of `edge`. Negative or NaN amounts are ignored.
    pub fn deposit(&mut self, edge: Edge, amount: f64) {
        if amount > 0.0 {
            let (from, to) = edge;
            self.data[from * self.n + to] += amount;
        }
    }

    /// Multiplies every entry by `decay` and closes the current update phase.
    pub fn evaporate(&mut self, decay: f64) {
        for value in &mut self.data {
            *value *= decay;
        }
        self.version += 1;
    }
}

/// A closed tour: N directed edges starting and ending at the same node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    edges: Vec<Edge>,
}

impl Tour {
    /// Wraps an edge sequence.
    pub fn from_edges(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Origin of the first edge.
    pub fn start(&self) -> Option<usize> {
        self.edges.first().map(|&(from, _)| from)
    }

    /// Nodes in visiting order, without repeating the start at the end.
    pub fn nodes(&self) -> Vec<usize> {
        self.edges.iter().map(|&(from, _)| from).collect()
    }

    /// Checks that the tour is a Hamiltonian cycle over `n` nodes.
    ///
    /// Consecutive edges must chain, the last edge must return to the
    /// start, and every node must be entered exactly once.
    pub fn is_hamiltonian_cycle(&self, n: usize) -> bool {
        if self.edges.len() != n || n == 0 {
            return false;
        }
        for pair in self.edges.windows(2) {
            if pair[0].1 != pair[1].0 {
                return false;
            }
        }
        let first = self.edges[0].0;
        let last = self.edges[n - 1].1;
        if first != last {
            return false;
        }

        let mut entered = vec![false; n];
        for &(_, to) in &self.edges {
            if to >= n || entered[to] {
                return false;
            }
            entered[to] = true;
        }
        true
    }
}
