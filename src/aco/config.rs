//! ACO configuration.

use super::error::AcoError;

/// Hyperparameters of an ant colony run.
///
/// # Examples
///
/// ```
/// use u_antcolony::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_ants(50)
///     .with_best(10)
///     .with_iterations(200)
///     .with_decay(0.8)
///     .with_beta(2.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Ants (tours) built per iteration.
    pub n_ants: usize,

    /// Number of lowest-cost tours per iteration that deposit pheromone.
    ///
    /// Must satisfy `1 <= n_best <= n_ants`.
    pub n_best: usize,

    /// Number of iterations. 0 performs no run and returns the empty
    /// result.
    pub n_iterations: usize,

    /// Pheromone retention factor in (0, 1].
    ///
    /// Every entry is multiplied by `decay` once per iteration, so 0.95
    /// evaporates slowly and 0.5 much faster.
    pub decay: f64,

    /// Pheromone exponent. Higher values give trails more weight.
    pub alpha: f64,

    /// Distance exponent. Higher values make ants greedier.
    pub beta: f64,

    /// Node every tour starts and ends at.
    pub start: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            n_ants: 50,
            n_best: 10,
            n_iterations: 200,
            decay: 0.95,
            alpha: 1.0,
            beta: 1.0,
            start: 0,
            seed: None,
        }
    }
}

impl AcoConfig {
    pub fn with_ants(mut self, n: usize) -> Self {
        self.n_ants = n;
        self
    }

    pub fn with_best(mut self, n: usize) -> Self {
        self.n_best = n;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.n_iterations = n;
        self
    }

    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the start node (default 0).
    pub fn with_start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// The start node is checked against the graph size by
    /// [`AntColony::new`](super::AntColony::new).
    pub fn validate(&self) -> Result<(), AcoError> {
        if self.n_ants == 0 {
            return Err(AcoError::InvalidConfig("n_ants must be positive".into()));
        }
        if self.n_best == 0 {
            return Err(AcoError::InvalidConfig("n_best must be positive".into()));
        }
        if self.n_best > self.n_ants {
            return Err(AcoError::InvalidConfig(format!(
                "n_best ({}) must not exceed n_ants ({})",
                self.n_best, self.n_ants
            )));
        }
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(AcoError::InvalidConfig(format!(
                "decay must be in (0, 1], got {}",
                self.decay
            )));
        }
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(AcoError::InvalidConfig(format!(
                "alpha must be a nonnegative number, got {}",
                self.alpha
            )));
        }
        if !(self.beta.is_finite() && self.beta >= 0.0) {
            return Err(AcoError::InvalidConfig(format!(
                "beta must be a nonnegative number, got {}",
                self.beta
            )));
        }
        Ok(())
    }
}
