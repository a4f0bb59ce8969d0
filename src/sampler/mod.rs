//! Relative sampler contract and implementations.
//!
//! A relative sampler models several parameters jointly. Once per trial the
//! orchestration layer asks it for the search space it is able to handle
//! ([`RelativeSampler::infer_relative_search_space`]) and then for joint
//! values in that space ([`RelativeSampler::sample_relative`]). Every
//! parameter missing from the returned sample is drawn by an independent,
//! per-parameter sampler outside this crate.
//!
//! | Sampler | Model | Feature flag |
//! |---------|-------|--------------|
//! | [`TpeSampler`](tpe::TpeSampler) | One Parzen estimator per parameter | — |
//! | [`CmaEsSampler`](cma_es::CmaEsSampler) | Mean vector and step size | `cma-es` |

#[cfg(feature = "cma-es")]
pub mod cma_es;
mod common;
pub mod search_space;
pub mod tpe;

use std::collections::BTreeMap;

use crate::error::Result;
use crate::storage::TrialSource;
use crate::trial::FrozenTrial;
use crate::types::TrialState;
use search_space::{IntersectionSearchSpace, SearchSpace};

/// Jointly sampled values keyed by parameter name, in internal representation.
///
/// Use [`Distribution::to_external_repr`](crate::Distribution::to_external_repr)
/// to obtain the value handed to the objective.
pub type RelativeSample = BTreeMap<String, f64>;

/// Trait for samplers that draw several parameters at once.
///
/// Implementations share one instance across concurrently running trial
/// workers, hence `Send + Sync`; mutable state lives behind a lock held for
/// the whole of each call.
///
/// An empty [`RelativeSample`] is a valid answer and means "sample
/// everything independently" (warm-up not reached, nothing eligible, too few
/// dimensions).
pub trait RelativeSampler: Send + Sync {
    /// Infers the search space used for relative sampling in `trial`.
    ///
    /// Called right before [`sample_relative`](Self::sample_relative), which
    /// receives the returned space.
    ///
    /// # Errors
    ///
    /// Implementations propagate failures of their collaborators.
    fn infer_relative_search_space(
        &self,
        history: &[FrozenTrial],
        trial: &FrozenTrial,
    ) -> Result<SearchSpace>;

    /// Samples values for a subset (up to all) of `search_space`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotImplemented`](crate::Error::NotImplemented) when
    /// the strategy has no algorithm behind the call, and propagates
    /// estimator construction failures.
    fn sample_relative(
        &self,
        history: &[FrozenTrial],
        trial: &FrozenTrial,
        search_space: &SearchSpace,
    ) -> Result<RelativeSample>;
}

/// The intersection search space with single-valued distributions removed.
#[must_use]
pub fn joint_search_space(history: &[FrozenTrial]) -> SearchSpace {
    let mut space = IntersectionSearchSpace::calculate(history);
    space.retain(|_, dist| !dist.single());
    space
}

/// Number of `Complete` trials in `history`.
#[must_use]
pub fn count_complete(history: &[FrozenTrial]) -> usize {
    history
        .iter()
        .filter(|t| t.state == TrialState::Complete)
        .count()
}

/// Runs one relative sampling round for `trial` against a trial source.
///
/// Takes a snapshot of the history, infers the search space and samples in
/// it, in that order.
///
/// # Errors
///
/// Propagates errors of the source and the sampler.
pub fn sample_relative_from(
    sampler: &dyn RelativeSampler,
    source: &dyn TrialSource,
    trial: &FrozenTrial,
) -> Result<RelativeSample> {
    let history = source.get_trials()?;
    let search_space = sampler.infer_relative_search_space(&history, trial)?;
    if search_space.is_empty() {
        return Ok(RelativeSample::new());
    }
    sampler.sample_relative(&history, trial, &search_space)
}
