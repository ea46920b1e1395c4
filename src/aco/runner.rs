//! ACO iteration loop.
//!
//! Each iteration runs three phases:
//!
//! 1. **Generate**: every ant builds a tour from the start node against
//!    the pheromone state as it stood at the start of the iteration.
//! 2. **Deposit / decay**: the `n_best` cheapest tours add `1 / d(edge)`
//!    to each of their edges, then the whole matrix is multiplied by
//!    `decay`. Deposits are therefore decayed once before the next
//!    iteration reads them.
//! 3. **Track best**: the iteration's cheapest tour replaces the
//!    best-so-far record only if strictly cheaper.

use super::builder::build_tour;
use super::config::AcoConfig;
use super::error::AcoError;
use super::selector::{MoveSelector, RouletteSampler, WeightedSampler};
use super::types::{DistanceMatrix, PheromoneMatrix, Tour};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};
use u_numflow::random::create_rng;

/// Result of an ACO run: the best-so-far record plus statistics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoResult {
    /// Cheapest tour found. `None` only when no iteration ran (zero
    /// iterations or cancelled before the first one).
    pub best: Option<Tour>,

    /// Cost of `best`, `f64::INFINITY` when `best` is `None`.
    pub best_cost: f64,

    /// Number of completed iterations.
    pub iterations: usize,

    /// Iteration (0-based) in which `best` was found.
    pub best_iteration: Option<usize>,

    /// Best-so-far cost after each iteration. Non-increasing.
    pub cost_history: Vec<f64>,

    /// Cheapest tour cost of each individual iteration.
    pub iteration_best_costs: Vec<f64>,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

impl AcoResult {
    fn empty() -> Self {
        Self {
            best: None,
            best_cost: f64::INFINITY,
            iterations: 0,
            best_iteration: None,
            cost_history: Vec::new(),
            iteration_best_costs: Vec::new(),
            cancelled: false,
        }
    }

    /// Returns `true` if a finite tour was found.
    pub fn found(&self) -> bool {
        self.best.is_some()
    }
}

/// A colony of ants searching for the cheapest closed tour over all nodes.
///
/// Owns the distance model and the pheromone state. The pheromone matrix
/// is only written in the deposit/decay phase; tour construction reads it.
///
/// # Examples
///
/// ```
/// use u_antcolony::aco::{AcoConfig, AntColony, DistanceMatrix};
///
/// let inf = f64::INFINITY;
/// let distances = DistanceMatrix::new(vec![
///     vec![inf, 2.0, 2.0, 5.0, 7.0],
///     vec![2.0, inf, 4.0, 8.0, 2.0],
///     vec![2.0, 4.0, inf, 1.0, 3.0],
///     vec![5.0, 8.0, 1.0, inf, 2.0],
///     vec![7.0, 2.0, 3.0, 2.0, inf],
/// ])
/// .unwrap();
/// let config = AcoConfig::default()
///     .with_ants(50)
///     .with_best(10)
///     .with_iterations(200)
///     .with_decay(0.8)
///     .with_beta(2.0)
///     .with_seed(42);
///
/// let mut colony = AntColony::new(distances, config).unwrap();
/// let result = colony.run().unwrap();
/// assert!(result.best_cost >= 9.0);
/// ```
#[derive(Debug, Clone)]
pub struct AntColony {
    distances: DistanceMatrix,
    pheromone: PheromoneMatrix,
    selector: MoveSelector,
    config: AcoConfig,
}

impl AntColony {
    /// Creates a colony after validating the configuration against the graph.
    pub fn new(distances: DistanceMatrix, config: AcoConfig) -> Result<Self, AcoError> {
        config.validate()?;
        let n = distances.len();
        if config.start >= n {
            return Err(AcoError::StartOutOfRange {
                start: config.start,
                n,
            });
        }

        Ok(Self {
            pheromone: PheromoneMatrix::uniform(n),
            selector: MoveSelector::new(config.alpha, config.beta),
            distances,
            config,
        })
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Current pheromone state.
    pub fn pheromone(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Runs the full iteration loop with the configured seed.
    pub fn run(&mut self) -> Result<AcoResult, AcoError> {
        self.run_with_cancel(None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// The flag is checked before each iteration; once set, the run
    /// stops and returns the best-so-far record.
    pub fn run_with_cancel(
        &mut self,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult, AcoError> {
        let rng = match self.config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        let mut sampler = RouletteSampler::new(rng);
        self.run_inner(&mut sampler, cancel.as_deref())
    }

    /// Runs with a caller-supplied sampler instead of the seeded roulette wheel.
    pub fn run_with_sampler<S: WeightedSampler + ?Sized>(
        &mut self,
        sampler: &mut S,
    ) -> Result<AcoResult, AcoError> {
        self.run_inner(sampler, None)
    }

    fn run_inner<S: WeightedSampler + ?Sized>(
        &mut self,
        sampler: &mut S,
        cancel: Option<&AtomicBool>,
    ) -> Result<AcoResult, AcoError> {
        self.pheromone.reset();
        let mut result = AcoResult::empty();
        result.cost_history.reserve(self.config.n_iterations);
        result.iteration_best_costs.reserve(self.config.n_iterations);

        for iteration in 0..self.config.n_iterations {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                result.cancelled = true;
                break;
            }

            // Generate
            let ants = match self.generate(sampler) {
                Ok(ants) => ants,
                Err(err) => {
                    warn!(
                        iteration,
                        best_cost = result.best_cost,
                        error = %err,
                        "ant colony run aborted"
                    );
                    return Err(err);
                }
            };

            // Deposit / decay
            self.update_pheromone(&ants);

            // Track best
            let Some((iteration_best, iteration_cost)) =
                ants.into_iter().min_by(|a, b| a.1.total_cmp(&b.1))
            else {
                break;
            };
            debug!(
                iteration,
                iteration_cost,
                best_cost = result.best_cost,
                tour = ?iteration_best.edges(),
                "ant colony iteration"
            );
            if iteration_cost < result.best_cost {
                result.best = Some(iteration_best);
                result.best_cost = iteration_cost;
                result.best_iteration = Some(iteration);
            }

            result.iteration_best_costs.push(iteration_cost);
            result.cost_history.push(result.best_cost);
            result.iterations = iteration + 1;
        }

        if result.best.is_none() && result.iterations > 0 && !result.cancelled {
            warn!(
                iterations = result.iterations,
                start = self.config.start,
                "ant colony run found no finite tour"
            );
            return Err(AcoError::NoFiniteTour {
                start: self.config.start,
                iterations: result.iterations,
            });
        }

        info!(
            iterations = result.iterations,
            best_cost = result.best_cost,
            cancelled = result.cancelled,
            "ant colony run finished"
        );
        Ok(result)
    }

    /// Builds one tour per ant and pairs each with its cost.
    pub fn generate<S: WeightedSampler + ?Sized>(
        &self,
        sampler: &mut S,
    ) -> Result<Vec<(Tour, f64)>, AcoError> {
        (0..self.config.n_ants)
            .map(|_| {
                let tour = build_tour(
                    &self.distances,
                    &self.pheromone,
                    &self.selector,
                    self.config.start,
                    &mut *sampler,
                )?;
                let cost = self.distances.tour_cost(&tour);
                Ok((tour, cost))
            })
            .collect()
    }

    /// Deposit/decay phase for one iteration's tours.
    ///
    /// Only the `n_best` cheapest tours deposit. Every entry is then
    /// decayed exactly once, deposited or not.
    pub fn update_pheromone(&mut self, ants: &[(Tour, f64)]) {
        let mut ranked: Vec<&(Tour, f64)> = ants.iter().collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

        for (tour, _) in ranked.into_iter().take(self.config.n_best) {
            for &(from, to) in tour.edges() {
                self.pheromone
                    .deposit((from, to), 1.0 / self.distances.get(from, to));
            }
        }
        self.pheromone.evaporate(self.config.decay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INF: f64 = f64::INFINITY;

    fn five_cities() -> DistanceMatrix {
        DistanceMatrix::new(vec![
            vec![INF, 2.0, 2.0, 5.0, 7.0],
            vec![2.0, INF, 4.0, 8.0, 2.0],
            vec![2.0, 4.0, INF, 1.0, 3.0],
            vec![5.0, 8.0, 1.0, INF, 2.0],
            vec![7.0, 2.0, 3.0, 2.0, INF],
        ])
        .unwrap()
    }

    fn scenario_config() -> AcoConfig {
        AcoConfig::default()
            .with_ants(50)
            .with_best(10)
            .with_iterations(200)
            .with_decay(0.8)
            .with_alpha(1.0)
            .with_beta(2.0)
    }

    #[test]
    fn test_five_cities_converges_to_optimum() {
        for seed in [1, 7, 42] {
            let mut colony =
                AntColony::new(five_cities(), scenario_config().with_seed(seed)).unwrap();
            let result = colony.run().unwrap();

            assert!(
                (result.best_cost - 9.0).abs() < 1e-9,
                "seed {seed}: expected optimal cost 9.0, got {}",
                result.best_cost
            );
            let best = result.best.expect("a tour must be found");
            assert!(best.is_hamiltonian_cycle(5));
            assert_eq!(best.start(), Some(0));
            assert!((colony.distances().tour_cost(&best) - result.best_cost).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_iterations_returns_sentinel() {
        let mut colony =
            AntColony::new(five_cities(), scenario_config().with_iterations(0)).unwrap();
        let result = colony.run().unwrap();
        assert!(result.best.is_none());
        assert!(!result.found());
        assert_eq!(result.best_cost, INF);
        assert_eq!(result.iterations, 0);
        assert!(result.cost_history.is_empty());
        assert_eq!(colony.pheromone().version(), 0);
    }

    #[test]
    fn test_seeded_runs_are_deterministic() {
        let config = scenario_config().with_iterations(30).with_seed(123);
        let a = AntColony::new(five_cities(), config.clone())
            .unwrap()
            .run()
            .unwrap();
        let b = AntColony::new(five_cities(), config).unwrap().run().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rerun_resets_pheromone() {
        let mut colony =
            AntColony::new(five_cities(), scenario_config().with_iterations(20).with_seed(5))
                .unwrap();
        let first = colony.run().unwrap();
        let second = colony.run().unwrap();
        assert_eq!(first, second);
        assert_eq!(colony.pheromone().version(), 20);
    }

    #[test]
    fn test_best_cost_non_increasing() {
        let mut colony = AntColony::new(
            five_cities(),
            scenario_config().with_ants(5).with_best(2).with_seed(9),
        )
        .unwrap();
        let result = colony.run().unwrap();

        assert_eq!(result.cost_history.len(), 200);
        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
        for (best, iter) in result.cost_history.iter().zip(&result.iteration_best_costs) {
            assert!(best <= iter);
        }
    }

    #[test]
    fn test_pheromone_stays_nonnegative() {
        let mut colony = AntColony::new(
            five_cities(),
            scenario_config().with_iterations(50).with_decay(0.3).with_seed(3),
        )
        .unwrap();
        colony.run().unwrap();
        assert!(colony.pheromone().values().iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_elite_only_deposit() {
        let mut colony = AntColony::new(
            five_cities(),
            scenario_config().with_ants(2).with_best(1).with_decay(0.5),
        )
        .unwrap();
        let cheap = Tour::from_edges(vec![(0, 2), (2, 3), (3, 4), (4, 1), (1, 0)]);
        let dear = Tour::from_edges(vec![(0, 4), (4, 3), (3, 1), (1, 2), (2, 0)]);
        let ants = vec![
            (dear.clone(), colony.distances().tour_cost(&dear)),
            (cheap.clone(), colony.distances().tour_cost(&cheap)),
        ];

        colony.update_pheromone(&ants);
        let p = colony.pheromone();
        let base = 0.2 * 0.5;

        // Edges of the elite tour: (0.2 + 1/d) * decay.
        assert!((p.get(2, 3) - (0.2 + 1.0) * 0.5).abs() < 1e-12);
        assert!((p.get(0, 2) - (0.2 + 0.5) * 0.5).abs() < 1e-12);
        // Edges only on the non-elite tour received nothing.
        for (from, to) in [(0, 4), (4, 3), (3, 1), (1, 2), (2, 0)] {
            assert!((p.get(from, to) - base).abs() < 1e-12, "edge ({from}, {to})");
        }
        assert_eq!(p.version(), 1);
    }

    #[test]
    fn test_start_out_of_range() {
        let err = AntColony::new(five_cities(), scenario_config().with_start(5)).unwrap_err();
        assert_eq!(err, AcoError::StartOutOfRange { start: 5, n: 5 });
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = AntColony::new(five_cities(), scenario_config().with_best(60)).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_custom_start_node() {
        let mut colony = AntColony::new(
            five_cities(),
            scenario_config().with_iterations(20).with_start(3).with_seed(11),
        )
        .unwrap();
        let result = colony.run().unwrap();
        let best = result.best.unwrap();
        assert_eq!(best.start(), Some(3));
        assert!(best.is_hamiltonian_cycle(5));
    }

    #[test]
    fn test_scripted_sampler() {
        struct LowestIndex;
        impl WeightedSampler for LowestIndex {
            fn sample(&mut self, probabilities: &[f64]) -> usize {
                probabilities.iter().position(|&p| p > 0.0).unwrap_or(0)
            }
        }

        let mut colony =
            AntColony::new(five_cities(), scenario_config().with_iterations(3)).unwrap();
        let result = colony.run_with_sampler(&mut LowestIndex).unwrap();
        assert_eq!(
            result.best.unwrap().edges(),
            &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]
        );
        assert!((result.best_cost - 16.0).abs() < 1e-12);
        assert_eq!(result.best_iteration, Some(0));
    }

    #[test]
    fn test_cancellation() {
        let mut colony = AntColony::new(five_cities(), scenario_config().with_seed(1)).unwrap();
        let cancel = Arc::new(AtomicBool::new(true));
        let result = colony.run_with_cancel(Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert!(result.best.is_none());
    }

    #[test]
    fn test_infinite_closing_edge_never_becomes_best() {
        // Every tour from 0 ends with 2 -> 0 or 1 -> 0; 1 -> 0 is missing.
        let d = DistanceMatrix::new(vec![
            vec![INF, 1.0, 1.0],
            vec![INF, INF, 1.0],
            vec![1.0, 1.0, INF],
        ])
        .unwrap();
        let config = AcoConfig::default()
            .with_ants(10)
            .with_best(3)
            .with_iterations(10)
            .with_seed(4);
        let result = AntColony::new(d, config).unwrap().run().unwrap();
        assert_eq!(
            result.best.unwrap().edges(),
            &[(0, 1), (1, 2), (2, 0)]
        );
        assert!((result.best_cost - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_way_back_to_start_fails_the_run() {
        // 1 and 2 reach each other, but nothing returns to 0.
        let d = DistanceMatrix::new(vec![
            vec![INF, 1.0, 1.0],
            vec![INF, INF, 1.0],
            vec![INF, 1.0, INF],
        ])
        .unwrap();
        let config = AcoConfig::default()
            .with_ants(4)
            .with_best(2)
            .with_iterations(5)
            .with_seed(2);
        let err = AntColony::new(d, config).unwrap().run().unwrap_err();
        assert_eq!(
            err,
            AcoError::NoFiniteTour {
                start: 0,
                iterations: 5
            }
        );
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_large_alpha_without_evaporation() {
        let config = scenario_config()
            .with_alpha(200.0)
            .with_decay(1.0)
            .with_iterations(50)
            .with_seed(1);
        let mut colony = AntColony::new(five_cities(), config).unwrap();
        let result = colony.run().unwrap();

        assert_eq!(result.iterations, 50);
        let best = result.best.unwrap();
        assert!(best.is_hamiltonian_cycle(5));
        assert!(result.best_cost.is_finite());
    }

    #[test]
    fn test_degenerate_graph_aborts_run() {
        let d = DistanceMatrix::new(vec![
            vec![INF, 1.0, INF],
            vec![INF, INF, INF],
            vec![1.0, 1.0, INF],
        ])
        .unwrap();
        let config = AcoConfig::default()
            .with_ants(4)
            .with_best(2)
            .with_iterations(5)
            .with_seed(1);
        let err = AntColony::new(d, config).unwrap().run().unwrap_err();
        assert_eq!(err, AcoError::Unreachable { from: 1 });
        assert!(!err.is_config_error());
    }
}
