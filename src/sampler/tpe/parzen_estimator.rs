//! Parzen estimator construction.
//!
//! A [`ParzenEstimator`] is a weighted mixture of Gaussians truncated to
//! `[low, high]`, one component per observation plus an optional prior
//! component at the middle of the domain. The component scales adapt to the
//! local spacing of the observations so dense regions get narrow kernels and
//! sparse regions wide ones.

use std::sync::Arc;

use super::weights::{RampWeights, WeightStrategy};
use crate::error::{Error, Result};

/// Lower bound on a component scale when magic clip is disabled, capped at
/// the domain width.
pub const EPS: f64 = 1e-12;

/// Upper bound on the component count used by magic clip.
const MAGIC_CLIP_MAX_COMPONENTS: f64 = 100.0;

/// Configuration of [`ParzenEstimator::new`].
///
/// The defaults are prior on with weight 1, magic clip on, endpoints off and
/// [`RampWeights`].
#[derive(Debug, Clone)]
pub struct ParzenEstimatorParams {
    /// Add a prior component centered at the middle of the domain.
    pub consider_prior: bool,
    /// Un-normalized weight of the prior component.
    pub prior_weight: f64,
    /// Derive the minimum scale from the component count instead of [`EPS`].
    pub consider_magic_clip: bool,
    /// Let the outermost components take the distance to the domain edge
    /// into account.
    pub consider_endpoints: bool,
    /// Per-observation weighting.
    pub weights: Arc<dyn WeightStrategy>,
}

impl Default for ParzenEstimatorParams {
    fn default() -> Self {
        Self {
            consider_prior: true,
            prior_weight: 1.0,
            consider_magic_clip: true,
            consider_endpoints: false,
            weights: Arc::new(RampWeights::default()),
        }
    }
}

/// A weighted Gaussian mixture fitted to one parameter's observations.
///
/// `weights`, `mus` and `sigmas` always have the same length. The weights
/// sum to one and every sigma lies in `[min_sigma, max_sigma]`. An empty
/// estimator means there was nothing to learn from; callers fall back to
/// uniform sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct ParzenEstimator {
    weights: Vec<f64>,
    mus: Vec<f64>,
    sigmas: Vec<f64>,
    min_sigma: f64,
    max_sigma: f64,
}

impl ParzenEstimator {
    /// Builds an estimator from `mus` observed on `[low, high]`.
    ///
    /// `mus` are taken in the order they were observed; that order is what
    /// the weight strategy sees.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidBounds`] if `high <= low` or a bound is not finite.
    /// - [`Error::InvalidObservation`] if an observation is not finite.
    /// - [`Error::InvalidPriorWeight`] if the prior is used with a weight that
    ///   is not positive and finite.
    /// - [`Error::WeightsLengthMismatch`] if the weight strategy returns the
    ///   wrong number of weights.
    /// - [`Error::DegenerateWeights`] if the weights cannot be normalized.
    ///
    /// # Examples
    ///
    /// ```
    /// use relative_sampler::sampler::tpe::{ParzenEstimator, ParzenEstimatorParams};
    ///
    /// let pe = ParzenEstimator::new(&[], 0.0, 1.0, &ParzenEstimatorParams::default()).unwrap();
    /// assert_eq!(pe.weights(), &[1.0]);
    /// assert_eq!(pe.mus(), &[0.5]);
    /// assert_eq!(pe.sigmas(), &[1.0]);
    /// ```
    #[allow(clippy::cast_precision_loss)]
    pub fn new(mus: &[f64], low: f64, high: f64, params: &ParzenEstimatorParams) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || high <= low {
            return Err(Error::InvalidBounds { low, high });
        }
        if let Some(&bad) = mus.iter().find(|m| !m.is_finite()) {
            return Err(Error::InvalidObservation(bad));
        }
        if params.consider_prior && !(params.prior_weight.is_finite() && params.prior_weight > 0.0)
        {
            return Err(Error::InvalidPriorWeight(params.prior_weight));
        }

        let max_sigma = high - low;
        let prior = params.consider_prior.then(|| Prior {
            mu: 0.5 * (low + high),
            sigma: high - low,
        });

        // Stable argsort; `order[k]` is the observation at sorted position `k`.
        let mut order: Vec<usize> = (0..mus.len()).collect();
        order.sort_by(|&a, &b| mus[a].total_cmp(&mus[b]));
        let mut ordered_mus: Vec<f64> = order.iter().map(|&i| mus[i]).collect();

        let prior_pos = match prior {
            Some(prior) if mus.is_empty() => {
                return Ok(Self {
                    weights: vec![1.0],
                    mus: vec![prior.mu],
                    sigmas: vec![prior.sigma],
                    min_sigma: min_sigma(params.consider_magic_clip, max_sigma, 1),
                    max_sigma,
                });
            }
            Some(prior) => {
                let pos = ordered_mus.partition_point(|&m| m < prior.mu);
                ordered_mus.insert(pos, prior.mu);
                Some((pos, prior))
            }
            None => None,
        };

        let mut sigmas = neighbor_scales(&ordered_mus, low, high, params.consider_endpoints);
        if let Some((pos, prior)) = prior_pos {
            sigmas[pos] = prior.sigma;
        }

        let raw = params.weights.weights(mus.len());
        if raw.len() != mus.len() {
            return Err(Error::WeightsLengthMismatch {
                expected: mus.len(),
                got: raw.len(),
            });
        }
        let mut weights: Vec<f64> = order.iter().map(|&i| raw[i]).collect();
        if let Some((pos, _)) = prior_pos {
            weights.insert(pos, params.prior_weight);
        }
        let total: f64 = weights.iter().sum();
        if !weights.is_empty() && !(total.is_finite() && total > 0.0) {
            return Err(Error::DegenerateWeights);
        }
        for w in &mut weights {
            *w /= total;
        }

        let min_sigma = min_sigma(params.consider_magic_clip, max_sigma, ordered_mus.len());
        for s in &mut sigmas {
            *s = s.max(min_sigma).min(max_sigma);
        }
        if let Some((pos, prior)) = prior_pos {
            sigmas[pos] = prior.sigma;
        }

        Ok(Self {
            weights,
            mus: ordered_mus,
            sigmas,
            min_sigma,
            max_sigma,
        })
    }

    /// Normalized mixture weights, in ascending order of `mus`.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Component means, ascending.
    #[must_use]
    pub fn mus(&self) -> &[f64] {
        &self.mus
    }

    /// Component scales.
    #[must_use]
    pub fn sigmas(&self) -> &[f64] {
        &self.sigmas
    }

    /// The smallest scale a component was allowed to have.
    #[must_use]
    pub fn min_sigma(&self) -> f64 {
        self.min_sigma
    }

    /// The largest scale a component was allowed to have.
    #[must_use]
    pub fn max_sigma(&self) -> f64 {
        self.max_sigma
    }

    /// Number of mixture components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mus.len()
    }

    /// Returns `true` if the estimator carries no information.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mus.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct Prior {
    mu: f64,
    sigma: f64,
}

#[allow(clippy::cast_precision_loss)]
fn min_sigma(consider_magic_clip: bool, max_sigma: f64, n_components: usize) -> f64 {
    if consider_magic_clip {
        max_sigma / MAGIC_CLIP_MAX_COMPONENTS.min(1.0 + n_components as f64)
    } else {
        EPS.min(max_sigma)
    }
}

/// Raw scale of every component: the larger of its gaps to the neighbours,
/// with the domain bounds acting as virtual neighbours at either end.
fn neighbor_scales(ordered_mus: &[f64], low: f64, high: f64, consider_endpoints: bool) -> Vec<f64> {
    if ordered_mus.is_empty() {
        return Vec::new();
    }

    let mut padded = Vec::with_capacity(ordered_mus.len() + 2);
    padded.push(low);
    padded.extend_from_slice(ordered_mus);
    padded.push(high);

    let mut sigmas: Vec<f64> = padded
        .windows(3)
        .map(|w| (w[1] - w[0]).max(w[2] - w[1]))
        .collect();

    let l = padded.len();
    if !consider_endpoints && l > 2 {
        let last = sigmas.len() - 1;
        sigmas[0] = padded[2] - padded[1];
        sigmas[last] = padded[l - 2] - padded[l - 3];
    }
    sigmas
}
