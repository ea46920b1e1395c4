//! Tour construction for a single ant.

use super::error::AcoError;
use super::selector::{MoveSelector, WeightedSampler};
use super::types::{DistanceMatrix, PheromoneMatrix, Tour};

/// Builds one closed tour starting and ending at `start`.
///
/// The ant takes N-1 probabilistic steps, each to an unvisited node,
/// then closes the cycle with the edge back to `start`. The closing edge
/// may be infinite on a sparse graph; such a tour is still returned and
/// scores as infinitely expensive.
///
/// # Errors
/// - [`AcoError::StartOutOfRange`] if `start` is not a node.
/// - [`AcoError::ShapeMismatch`] if `pheromone` and `distances` differ in size.
/// - [`AcoError::Unreachable`] / [`AcoError::DegenerateWeights`] when the
///   ant gets stuck.
pub fn build_tour<S: WeightedSampler + ?Sized>(
    distances: &DistanceMatrix,
    pheromone: &PheromoneMatrix,
    selector: &MoveSelector,
    start: usize,
    sampler: &mut S,
) -> Result<Tour, AcoError> {
    let n = distances.len();
    if pheromone.len() != n {
        return Err(AcoError::ShapeMismatch {
            expected: n,
            found: pheromone.len(),
        });
    }
    if start >= n {
        return Err(AcoError::StartOutOfRange { start, n });
    }

    let mut visited = vec![false; n];
    visited[start] = true;

    let mut edges = Vec::with_capacity(n);
    let mut current = start;
    for _ in 1..n {
        let next = selector.pick_move(
            current,
            pheromone.row(current),
            distances.row(current),
            &visited,
            sampler,
        )?;
        edges.push((current, next));
        visited[next] = true;
        current = next;
    }
    edges.push((current, start));

    Ok(Tour::from_edges(edges))
}
