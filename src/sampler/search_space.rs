//! Intersection search space across a trial history.
//!
//! A relative sampler may only model parameters jointly if every completed
//! trial suggested them from the very same distribution. The intersection
//! search space is that set: parameters that are new, were dropped by some
//! trial, or changed their domain mid-study fall out of it and are left to
//! independent sampling.

use std::collections::BTreeMap;

use crate::distribution::Distribution;
use crate::trial::FrozenTrial;

/// Mapping from parameter name to distribution.
///
/// A `BTreeMap` so joint dimensions come out in the same order on every call.
pub type SearchSpace = BTreeMap<String, Distribution>;

/// Computes the intersection of search spaces across completed trials.
///
/// Only `Complete` trials participate. Running, pruned and failed trials may
/// have suggested parameters whose distributions were never validated by a
/// successful evaluation, so they are ignored entirely.
///
/// The first complete trial seeds the result with its full distribution map.
/// Every later one removes the parameters it lacks and those whose
/// distribution differs. Parameters are never added after that, so folding in
/// more trials can only shrink the result.
///
/// # Examples
///
/// ```
/// use relative_sampler::sampler::search_space::IntersectionSearchSpace;
/// use relative_sampler::{Distribution, FrozenTrial, IntUniformDistribution, UniformDistribution};
///
/// let x = Distribution::from(IntUniformDistribution::new(0, 10).unwrap());
/// let y = Distribution::from(UniformDistribution::new(-3.0, 3.0).unwrap());
///
/// let trials = vec![
///     FrozenTrial::builder(0)
///         .param("x", x, 4.0)
///         .param("y", y.clone(), 0.5)
///         .complete(4.5)
///         .build()
///         .unwrap(),
///     FrozenTrial::builder(1).param("y", y, -1.0).complete(-1.0).build().unwrap(),
/// ];
///
/// let space = IntersectionSearchSpace::calculate(&trials);
/// assert_eq!(space.len(), 1);
/// assert!(space.contains_key("y"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IntersectionSearchSpace {
    search_space: Option<SearchSpace>,
}

impl IntersectionSearchSpace {
    /// Creates an empty fold; no trial has been seen yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates the intersection search space of `trials`.
    ///
    /// Returns an empty map when no trial is `Complete`.
    #[must_use]
    pub fn calculate(trials: &[FrozenTrial]) -> SearchSpace {
        let mut intersection = Self::new();
        for trial in trials {
            intersection.add_trial(trial);
        }
        intersection.search_space.unwrap_or_default()
    }

    /// Folds one trial into the running intersection.
    ///
    /// Non-complete trials are a no-op.
    pub fn add_trial(&mut self, trial: &FrozenTrial) {
        if !trial.is_complete() {
            return;
        }

        match self.search_space.as_mut() {
            None => {
                self.search_space = Some(
                    trial
                        .distributions
                        .iter()
                        .map(|(name, dist)| (name.clone(), dist.clone()))
                        .collect(),
                );
            }
            Some(space) => {
                space.retain(|name, dist| trial.distributions.get(name) == Some(dist));
            }
        }
    }

    /// Returns the current intersection, or `None` before the first complete trial.
    #[must_use]
    pub fn search_space(&self) -> Option<&SearchSpace> {
        self.search_space.as_ref()
    }
}
