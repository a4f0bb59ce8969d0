//! CMA-ES (Covariance Matrix Adaptation Evolution Strategy) relative sampler.
//!
//! CMA-ES keeps a multivariate Gaussian over the joint search space and moves
//! its mean and step size towards well-ranked trials. This sampler owns the
//! mean vector and step size, dimensioned to the current search space, and
//! re-initializes them whenever that space changes.
//!
//! The update recursion itself is not available yet: once warm-up has passed
//! and at least two dimensions are eligible,
//! [`sample_relative`](RelativeSampler::sample_relative) prepares the state
//! and then fails with [`Error::NotImplemented`].
//!
//! Requires the `cma-es` feature flag.
//!
//! # Examples
//!
//! ```
//! use relative_sampler::sampler::cma_es::CmaEsSampler;
//!
//! let sampler = CmaEsSampler::builder().sigma0(0.5).seed(42).build()?;
//! assert!(sampler.mean().is_empty());
//! # Ok::<(), relative_sampler::Error>(())
//! ```

use nalgebra::DVector;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::sampler::common::internal_bounds;
use crate::sampler::search_space::SearchSpace;
use crate::sampler::{RelativeSample, RelativeSampler, count_complete, joint_search_space};
use crate::trial::FrozenTrial;

/// Joint spaces with fewer dimensions carry no covariance to exploit.
const MIN_DIMENSIONS: usize = 2;

/// CMA-ES relative sampler.
///
/// # Examples
///
/// ```
/// use relative_sampler::sampler::cma_es::CmaEsSampler;
///
/// // Default configuration
/// let sampler = CmaEsSampler::new();
///
/// // With seed for reproducibility
/// let sampler = CmaEsSampler::with_seed(42);
///
/// // Custom configuration via builder
/// let sampler = CmaEsSampler::builder()
///     .sigma0(0.5)
///     .n_startup_trials(5)
///     .seed(42)
///     .build()?;
/// assert_eq!(sampler.n_startup_trials(), 5);
/// # Ok::<(), relative_sampler::Error>(())
/// ```
pub struct CmaEsSampler {
    n_startup_trials: usize,
    sigma0: Option<f64>,
    state: Mutex<CmaEsState>,
}

impl CmaEsSampler {
    /// Creates a new CMA-ES sampler with a random seed.
    #[must_use]
    pub fn new() -> Self {
        CmaEsSamplerBuilder::new().assemble()
    }

    /// Creates a new CMA-ES sampler with a fixed seed for reproducibility.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        CmaEsSamplerBuilder::new().seed(seed).assemble()
    }

    /// Creates a builder for configuring a `CmaEsSampler`.
    #[must_use]
    pub fn builder() -> CmaEsSamplerBuilder {
        CmaEsSamplerBuilder::new()
    }

    /// Returns the number of startup trials.
    #[must_use]
    pub fn n_startup_trials(&self) -> usize {
        self.n_startup_trials
    }

    /// Returns a copy of the current mean vector (empty before the first
    /// eligible call).
    #[must_use]
    pub fn mean(&self) -> Vec<f64> {
        self.state.lock().mean.iter().copied().collect()
    }

    /// Returns the current step size.
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.state.lock().sigma
    }

    /// Returns the parameter names the mean vector is dimensioned to, in order.
    #[must_use]
    pub fn dimensions(&self) -> Vec<String> {
        self.state.lock().space.keys().cloned().collect()
    }

    /// Re-seeds the sampler's random number generator.
    pub fn reseed_rng(&self, seed: u64) {
        self.state.lock().rng.seed(seed);
    }
}

impl Default for CmaEsSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl RelativeSampler for CmaEsSampler {
    fn infer_relative_search_space(
        &self,
        history: &[FrozenTrial],
        _trial: &FrozenTrial,
    ) -> Result<SearchSpace> {
        Ok(joint_search_space(history))
    }

    fn sample_relative(
        &self,
        history: &[FrozenTrial],
        _trial: &FrozenTrial,
        search_space: &SearchSpace,
    ) -> Result<RelativeSample> {
        let mut state = self.state.lock();

        if search_space.len() < MIN_DIMENSIONS {
            trace_debug!(
                n_dimensions = search_space.len(),
                "cma-es needs at least two dimensions, deferring to independent sampling"
            );
            return Ok(RelativeSample::new());
        }

        let n_complete = count_complete(history);
        if n_complete < self.n_startup_trials {
            trace_debug!(
                n_complete,
                n_startup_trials = self.n_startup_trials,
                "cma-es warm-up, deferring to independent sampling"
            );
            return Ok(RelativeSample::new());
        }

        state.fit_to(search_space, self.sigma0);

        Err(Error::NotImplemented("CMA-ES mean/covariance update"))
    }
}

/// Builder for configuring a [`CmaEsSampler`].
///
/// All options have sensible defaults:
/// - `sigma0`: auto-computed as the smallest range / 6
/// - `n_startup_trials`: 1
/// - `seed`: random
#[derive(Debug, Clone, Default)]
pub struct CmaEsSamplerBuilder {
    sigma0: Option<f64>,
    n_startup_trials: Option<usize>,
    seed: Option<u64>,
}

impl CmaEsSamplerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial step size (sigma).
    ///
    /// Default: the smallest parameter range divided by 6.
    #[must_use]
    pub fn sigma0(mut self, sigma0: f64) -> Self {
        self.sigma0 = Some(sigma0);
        self
    }

    /// Sets the number of complete trials required before relative sampling.
    #[must_use]
    pub fn n_startup_trials(mut self, n: usize) -> Self {
        self.n_startup_trials = Some(n);
        self
    }

    /// Sets the random seed for reproducibility.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configured [`CmaEsSampler`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSigma`] if `sigma0` is set to a value that is
    /// not positive and finite.
    pub fn build(self) -> Result<CmaEsSampler> {
        if let Some(sigma0) = self.sigma0
            && !(sigma0.is_finite() && sigma0 > 0.0)
        {
            return Err(Error::InvalidSigma(sigma0));
        }
        Ok(self.assemble())
    }

    fn assemble(self) -> CmaEsSampler {
        CmaEsSampler {
            n_startup_trials: self.n_startup_trials.unwrap_or(1),
            sigma0: self.sigma0,
            state: Mutex::new(CmaEsState::new(self.seed)),
        }
    }
}

// ---------------------------------------------------------------------------
// Internal types
// ---------------------------------------------------------------------------

/// The mutable CMA-ES state.
struct CmaEsState {
    /// RNG for candidate generation.
    rng: fastrand::Rng,
    /// Search space the state is dimensioned to, one dimension per entry.
    space: SearchSpace,
    /// Distribution mean, in internal space.
    mean: DVector<f64>,
    /// Step size.
    sigma: f64,
}

impl CmaEsState {
    fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed),
            space: SearchSpace::new(),
            mean: DVector::zeros(0),
            sigma: 0.0,
        }
    }

    /// Re-dimensions the state to `search_space` if any parameter or
    /// distribution changed.
    ///
    /// The mean starts at the center of every dimension's internal bounds and
    /// the step size at `sigma0`, or a sixth of the narrowest range.
    fn fit_to(&mut self, search_space: &SearchSpace, sigma0: Option<f64>) {
        if self.space == *search_space {
            return;
        }

        let bounds: Vec<(f64, f64)> = search_space.values().map(internal_bounds).collect();
        self.mean = DVector::from_iterator(
            bounds.len(),
            bounds.iter().map(|(low, high)| 0.5 * (low + high)),
        );
        self.sigma = sigma0.unwrap_or_else(|| {
            bounds
                .iter()
                .map(|(low, high)| high - low)
                .fold(f64::INFINITY, f64::min)
                / 6.0
        });
        self.space = search_space.clone();

        trace_info!(
            n_dimensions = self.space.len(),
            sigma = self.sigma,
            "cma-es state initialized"
        );
    }
}
