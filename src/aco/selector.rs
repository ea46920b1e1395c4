//! Probabilistic next-node selection.
//!
//! The move rule weighs every unvisited destination `j` of the current
//! node by `tau_j^alpha * (1 / d_j)^beta`, normalizes the weights into a
//! probability vector and draws one index from it. Weights are computed
//! in log space so large exponents stay representable.
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"

use super::error::AcoError;
use rand::Rng;

/// Weighted random choice over a probability vector.
///
/// Implementations must return an index whose probability is strictly
/// positive. Tests can substitute a scripted sampler; runs use
/// [`RouletteSampler`].
pub trait WeightedSampler {
    /// Draws one index from `probabilities` (nonnegative, summing to 1).
    fn sample(&mut self, probabilities: &[f64]) -> usize;
}

/// Roulette wheel (fitness-proportionate) sampler backed by an RNG.
///
/// # Complexity
/// O(n) per draw (linear scan)
#[derive(Debug, Clone)]
pub struct RouletteSampler<R: Rng> {
    rng: R,
}

impl<R: Rng> RouletteSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Gives back the underlying RNG.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> WeightedSampler for RouletteSampler<R> {
    fn sample(&mut self, probabilities: &[f64]) -> usize {
        let total: f64 = probabilities.iter().filter(|&&p| p > 0.0).sum();
        let threshold = self.rng.random_range(0.0..1.0) * total;

        let mut cumulative = 0.0;
        let mut last_positive = 0;
        for (i, &p) in probabilities.iter().enumerate() {
            if p <= 0.0 {
                continue;
            }
            last_positive = i;
            cumulative += p;
            if cumulative > threshold {
                return i;
            }
        }

        last_positive // floating-point fallback
    }
}

/// Chooses the next node of a tour.
///
/// `alpha` scales the pheromone influence and `beta` the greedy distance
/// influence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveSelector {
    pub alpha: f64,
    pub beta: f64,
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
        }
    }
}

impl MoveSelector {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Move weights for one row, scaled so the heaviest candidate is 1.
    ///
    /// Weights are formed in log space, `alpha * ln(tau) - beta * ln(d)`,
    /// and shifted by their maximum before exponentiating, so large
    /// exponents cannot overflow. When every candidate carries zero
    /// pheromone the distance term `(1/d)^beta` alone decides. Visited
    /// nodes and nodes behind an infinite edge get weight 0.
    ///
    /// Returns `None` if a log weight is NaN or `+inf`.
    pub fn weights(
        &self,
        pheromone: &[f64],
        distances: &[f64],
        visited: &[bool],
    ) -> Option<Vec<f64>> {
        let candidate = |j: usize| !visited[j] && distances[j].is_finite();
        let n = distances.len().min(pheromone.len()).min(visited.len());

        let log_tau = |tau: f64| {
            if self.alpha == 0.0 {
                0.0
            } else {
                self.alpha * tau.ln()
            }
        };
        let log_eta = |d: f64| {
            if self.beta == 0.0 {
                0.0
            } else {
                -self.beta * d.ln()
            }
        };

        let trail_vanished = (0..n)
            .filter(|&j| candidate(j))
            .all(|j| log_tau(pheromone[j]) == f64::NEG_INFINITY);

        let mut logs = vec![f64::NEG_INFINITY; n];
        for (j, log) in logs.iter_mut().enumerate() {
            if !candidate(j) {
                continue;
            }
            *log = if trail_vanished {
                log_eta(distances[j])
            } else {
                log_tau(pheromone[j]) + log_eta(distances[j])
            };
            if log.is_nan() || *log == f64::INFINITY {
                return None;
            }
        }

        let max = logs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max == f64::NEG_INFINITY {
            return Some(vec![0.0; n]);
        }
        Some(
            logs.into_iter()
                .map(|log| {
                    if log == f64::NEG_INFINITY {
                        0.0
                    } else {
                        (log - max).exp()
                    }
                })
                .collect(),
        )
    }

    /// Move probabilities for one row.
    ///
    /// # Errors
    /// - [`AcoError::Unreachable`] if no unvisited node has a finite edge
    ///   from `from`.
    /// - [`AcoError::DegenerateWeights`] if the weights cannot be
    ///   normalized (NaN pheromone or an empty distribution).
    pub fn probabilities(
        &self,
        from: usize,
        pheromone: &[f64],
        distances: &[f64],
        visited: &[bool],
    ) -> Result<Vec<f64>, AcoError> {
        let reachable = distances
            .iter()
            .zip(visited)
            .any(|(&d, &seen)| !seen && d.is_finite());
        if !reachable {
            return Err(AcoError::Unreachable { from });
        }

        let mut weights = self
            .weights(pheromone, distances, visited)
            .ok_or(AcoError::DegenerateWeights { from })?;
        let total: f64 = weights.iter().sum();
        if !(total > 0.0 && total.is_finite()) {
            return Err(AcoError::DegenerateWeights { from });
        }

        for w in &mut weights {
            *w /= total;
        }
        Ok(weights)
    }

    /// Picks an unvisited destination for an ant standing on `from`.
    ///
    /// `visited` is indexed by node and must already contain `from`.
    pub fn pick_move<S: WeightedSampler + ?Sized>(
        &self,
        from: usize,
        pheromone: &[f64],
        distances: &[f64],
        visited: &[bool],
        sampler: &mut S,
    ) -> Result<usize, AcoError> {
        let probabilities = self.probabilities(from, pheromone, distances, visited)?;
        let choice = sampler.sample(&probabilities);

        // A sampler must never hand back a zero-probability node.
        match probabilities.get(choice) {
            Some(&p) if p > 0.0 => Ok(choice),
            _ => Err(AcoError::DegenerateWeights { from }),
        }
    }
}
