//! TPE-style relative sampler.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::parzen_estimator::{ParzenEstimator, ParzenEstimatorParams};
use super::weights::WeightStrategy;
use crate::error::{Error, Result};
use crate::sampler::common::{model_bounds, to_model_space};
use crate::sampler::search_space::SearchSpace;
use crate::sampler::{RelativeSample, RelativeSampler, count_complete, joint_search_space};
use crate::trial::FrozenTrial;

/// A Tree-structured Parzen Estimator relative sampler.
///
/// For every numeric parameter of the joint search space the sampler fits a
/// [`ParzenEstimator`] to the values seen in complete trials. Until
/// `n_startup_trials` trials have completed it returns no relative values
/// at all, leaving everything to independent sampling.
///
/// The acquisition step (splitting history into good and bad populations and
/// scoring candidates against the estimators) is not available yet: past
/// warm-up, [`sample_relative`](RelativeSampler::sample_relative) fails with
/// [`Error::NotImplemented`] after building the estimators.
///
/// # Examples
///
/// ```
/// use relative_sampler::sampler::RelativeSampler;
/// use relative_sampler::sampler::tpe::{TpeSampler, UniformWeights};
///
/// let sampler = TpeSampler::builder()
///     .n_startup_trials(5)
///     .consider_endpoints(true)
///     .weights(UniformWeights)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let space = sampler.infer_relative_search_space(&[], &Default::default()).unwrap();
/// assert!(space.is_empty());
/// ```
pub struct TpeSampler {
    /// Complete trials required before relative sampling kicks in.
    n_startup_trials: usize,
    /// Estimator configuration shared by every parameter.
    params: ParzenEstimatorParams,
    /// Thread-safe RNG for sampling.
    rng: Mutex<fastrand::Rng>,
}

impl TpeSampler {
    /// Creates a TPE sampler with default settings.
    ///
    /// Default settings:
    /// - `n_startup_trials`: 10
    /// - estimator: [`ParzenEstimatorParams::default`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            n_startup_trials: 10,
            params: ParzenEstimatorParams::default(),
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    /// Creates a builder for configuring a TPE sampler.
    #[must_use]
    pub fn builder() -> TpeSamplerBuilder {
        TpeSamplerBuilder::new()
    }

    /// Returns the number of startup trials.
    #[must_use]
    pub fn n_startup_trials(&self) -> usize {
        self.n_startup_trials
    }

    /// Returns the estimator configuration.
    #[must_use]
    pub fn parzen_estimator_params(&self) -> &ParzenEstimatorParams {
        &self.params
    }

    /// Re-seeds the sampler's random number generator.
    pub fn reseed_rng(&self, seed: u64) {
        self.rng.lock().seed(seed);
    }

    /// Fits one Parzen estimator per numeric parameter of `search_space`.
    ///
    /// Observations are the internal values of complete trials, in history
    /// order, mapped into the model space of their distribution (log space
    /// for log-uniform parameters). Categorical parameters are skipped.
    ///
    /// # Errors
    ///
    /// Propagates [`ParzenEstimator::new`] failures, e.g. a numeric
    /// distribution whose bounds collapse to a point.
    pub fn build_estimators(
        &self,
        history: &[FrozenTrial],
        search_space: &SearchSpace,
    ) -> Result<BTreeMap<String, ParzenEstimator>> {
        let mut estimators = BTreeMap::new();
        for (name, distribution) in search_space {
            let Some((low, high)) = model_bounds(distribution) else {
                continue;
            };
            let observations: Vec<f64> = history
                .iter()
                .filter(|t| t.is_complete())
                .filter_map(|t| t.param_internal(name))
                .map(|v| to_model_space(distribution, v))
                .collect();
            let estimator = ParzenEstimator::new(&observations, low, high, &self.params)?;
            estimators.insert(name.clone(), estimator);
        }
        Ok(estimators)
    }
}

impl Default for TpeSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl RelativeSampler for TpeSampler {
    fn infer_relative_search_space(
        &self,
        history: &[FrozenTrial],
        _trial: &FrozenTrial,
    ) -> Result<SearchSpace> {
        Ok(joint_search_space(history))
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn sample_relative(
        &self,
        history: &[FrozenTrial],
        _trial: &FrozenTrial,
        search_space: &SearchSpace,
    ) -> Result<RelativeSample> {
        let _rng = self.rng.lock();

        let n_complete = count_complete(history);
        if n_complete < self.n_startup_trials {
            trace_debug!(
                n_complete,
                n_startup_trials = self.n_startup_trials,
                "tpe warm-up, deferring to independent sampling"
            );
            return Ok(RelativeSample::new());
        }
        if search_space.is_empty() {
            return Ok(RelativeSample::new());
        }

        let estimators = self.build_estimators(history, search_space)?;
        trace_debug!(n_estimators = estimators.len(), "built parzen estimators");

        Err(Error::NotImplemented("TPE relative acquisition"))
    }
}

/// Builder for configuring a [`TpeSampler`].
///
/// # Examples
///
/// ```
/// use relative_sampler::sampler::tpe::{RampWeights, TpeSamplerBuilder};
///
/// let sampler = TpeSamplerBuilder::new()
///     .n_startup_trials(20)
///     .prior_weight(0.5)
///     .weights(RampWeights::new(10))
///     .build()
///     .unwrap();
/// assert_eq!(sampler.n_startup_trials(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct TpeSamplerBuilder {
    n_startup_trials: usize,
    params: ParzenEstimatorParams,
    seed: Option<u64>,
}

impl TpeSamplerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            n_startup_trials: 10,
            params: ParzenEstimatorParams::default(),
            seed: None,
        }
    }

    /// Sets the number of complete trials required before relative sampling.
    #[must_use]
    pub fn n_startup_trials(mut self, n: usize) -> Self {
        self.n_startup_trials = n;
        self
    }

    /// Sets whether a prior component is added to every estimator.
    #[must_use]
    pub fn consider_prior(mut self, consider_prior: bool) -> Self {
        self.params.consider_prior = consider_prior;
        self
    }

    /// Sets the un-normalized weight of the prior component.
    #[must_use]
    pub fn prior_weight(mut self, prior_weight: f64) -> Self {
        self.params.prior_weight = prior_weight;
        self
    }

    /// Sets whether the minimum scale depends on the component count.
    #[must_use]
    pub fn consider_magic_clip(mut self, consider_magic_clip: bool) -> Self {
        self.params.consider_magic_clip = consider_magic_clip;
        self
    }

    /// Sets whether the outermost components see the domain edges.
    #[must_use]
    pub fn consider_endpoints(mut self, consider_endpoints: bool) -> Self {
        self.params.consider_endpoints = consider_endpoints;
        self
    }

    /// Sets the per-observation weighting strategy.
    #[must_use]
    pub fn weights<W: WeightStrategy + 'static>(mut self, weights: W) -> Self {
        self.params.weights = Arc::new(weights);
        self
    }

    /// Sets the random seed for reproducibility.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configured [`TpeSampler`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPriorWeight`] if the prior is enabled and its
    /// weight is not positive and finite.
    pub fn build(self) -> Result<TpeSampler> {
        let weight = self.params.prior_weight;
        if self.params.consider_prior && !(weight.is_finite() && weight > 0.0) {
            return Err(Error::InvalidPriorWeight(weight));
        }
        let rng = self
            .seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Ok(TpeSampler {
            n_startup_trials: self.n_startup_trials,
            params: self.params,
            rng: Mutex::new(rng),
        })
    }
}

impl Default for TpeSamplerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
