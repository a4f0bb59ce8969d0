//! Frozen trial snapshots consumed by the samplers.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use crate::distribution::Distribution;
use crate::error::Result;
use crate::param::ParamValue;
use crate::types::TrialState;

/// An immutable snapshot of one trial.
///
/// Frozen trials are produced by the storage layer whenever a trial changes
/// stage and are only ever read by the sampling core. Parameters are kept in
/// both representations: `params` holds what the objective saw, while
/// `params_in_internal` holds the `f64` form samplers compute with.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrozenTrial {
    /// Storage-level identifier.
    pub id: u64,
    /// Identifier of the owning study.
    pub study_id: u64,
    /// Sequential number of the trial within its study.
    pub number: u64,
    /// Lifecycle state.
    pub state: TrialState,
    /// Objective value; present only for `Complete` trials.
    pub value: Option<f64>,
    /// Intermediate values reported during the trial, keyed by step.
    pub intermediate_values: BTreeMap<u64, f64>,
    /// When the trial started.
    pub datetime_start: Option<DateTime<Utc>>,
    /// When the trial finished.
    pub datetime_complete: Option<DateTime<Utc>>,
    /// Parameters in external representation.
    pub params: HashMap<String, ParamValue>,
    /// Parameters in internal representation.
    pub params_in_internal: HashMap<String, f64>,
    /// Distribution each parameter was suggested from.
    pub distributions: HashMap<String, Distribution>,
    /// User attributes (opaque strings).
    pub user_attrs: HashMap<String, String>,
    /// System attributes (opaque strings).
    pub system_attrs: HashMap<String, String>,
}

impl FrozenTrial {
    /// Starts building a trial with the given sequential number.
    #[must_use]
    pub fn builder(number: u64) -> FrozenTrialBuilder {
        FrozenTrialBuilder::new(number)
    }

    /// Returns `true` if the trial completed successfully.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == TrialState::Complete
    }

    /// Returns the internal value of a parameter.
    #[must_use]
    pub fn param_internal(&self, name: &str) -> Option<f64> {
        self.params_in_internal.get(name).copied()
    }

    /// Returns the distribution a parameter was suggested from.
    #[must_use]
    pub fn distribution(&self, name: &str) -> Option<&Distribution> {
        self.distributions.get(name)
    }
}

/// Builder for [`FrozenTrial`].
///
/// The state setters are the only way to attach an objective value, so a
/// built trial carries a value exactly when it is `Complete`.
///
/// # Examples
///
/// ```
/// use relative_sampler::{Distribution, FrozenTrial, UniformDistribution};
///
/// let y = Distribution::from(UniformDistribution::new(-3.0, 3.0).unwrap());
/// let trial = FrozenTrial::builder(0)
///     .param("y", y, 1.5)
///     .complete(2.25)
///     .build()
///     .unwrap();
///
/// assert!(trial.is_complete());
/// assert_eq!(trial.value, Some(2.25));
/// ```
#[derive(Clone, Debug)]
pub struct FrozenTrialBuilder {
    id: u64,
    study_id: u64,
    number: u64,
    state: TrialState,
    value: Option<f64>,
    intermediate_values: BTreeMap<u64, f64>,
    datetime_start: Option<DateTime<Utc>>,
    datetime_complete: Option<DateTime<Utc>>,
    params: Vec<(String, Distribution, f64)>,
    user_attrs: HashMap<String, String>,
    system_attrs: HashMap<String, String>,
}

impl FrozenTrialBuilder {
    /// Creates a builder for a running trial. The id defaults to `number`.
    #[must_use]
    pub fn new(number: u64) -> Self {
        Self {
            id: number,
            study_id: 0,
            number,
            state: TrialState::Running,
            value: None,
            intermediate_values: BTreeMap::new(),
            datetime_start: None,
            datetime_complete: None,
            params: Vec::new(),
            user_attrs: HashMap::new(),
            system_attrs: HashMap::new(),
        }
    }

    /// Sets the storage-level identifier.
    #[must_use]
    pub fn id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    /// Sets the owning study.
    #[must_use]
    pub fn study_id(mut self, study_id: u64) -> Self {
        self.study_id = study_id;
        self
    }

    /// Marks the trial complete with its objective value.
    #[must_use]
    pub fn complete(mut self, value: f64) -> Self {
        self.state = TrialState::Complete;
        self.value = Some(value);
        self
    }

    /// Marks the trial pruned.
    #[must_use]
    pub fn pruned(mut self) -> Self {
        self.state = TrialState::Pruned;
        self.value = None;
        self
    }

    /// Marks the trial failed.
    #[must_use]
    pub fn failed(mut self) -> Self {
        self.state = TrialState::Fail;
        self.value = None;
        self
    }

    /// Marks the trial running (the initial state).
    #[must_use]
    pub fn running(mut self) -> Self {
        self.state = TrialState::Running;
        self.value = None;
        self
    }

    /// Records a parameter by its internal value.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, distribution: Distribution, internal: f64) -> Self {
        self.params.push((name.into(), distribution, internal));
        self
    }

    /// Records an intermediate value at `step`.
    #[must_use]
    pub fn intermediate_value(mut self, step: u64, value: f64) -> Self {
        self.intermediate_values.insert(step, value);
        self
    }

    /// Sets the start timestamp.
    #[must_use]
    pub fn started_at(mut self, at: DateTime<Utc>) -> Self {
        self.datetime_start = Some(at);
        self
    }

    /// Sets the completion timestamp.
    #[must_use]
    pub fn completed_at(mut self, at: DateTime<Utc>) -> Self {
        self.datetime_complete = Some(at);
        self
    }

    /// Adds a user attribute.
    #[must_use]
    pub fn user_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.user_attrs.insert(key.into(), value.into());
        self
    }

    /// Adds a system attribute.
    #[must_use]
    pub fn system_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.system_attrs.insert(key.into(), value.into());
        self
    }

    /// Builds the trial, deriving each parameter's external representation.
    ///
    /// # Errors
    ///
    /// Returns an error if an internal value cannot be represented by its
    /// distribution (see [`Distribution::to_external_repr`]).
    pub fn build(self) -> Result<FrozenTrial> {
        let mut params = HashMap::with_capacity(self.params.len());
        let mut params_in_internal = HashMap::with_capacity(self.params.len());
        let mut distributions = HashMap::with_capacity(self.params.len());
        for (name, distribution, internal) in self.params {
            params.insert(name.clone(), distribution.to_external_repr(internal)?);
            params_in_internal.insert(name.clone(), internal);
            distributions.insert(name, distribution);
        }

        Ok(FrozenTrial {
            id: self.id,
            study_id: self.study_id,
            number: self.number,
            state: self.state,
            value: self.value,
            intermediate_values: self.intermediate_values,
            datetime_start: self.datetime_start,
            datetime_complete: self.datetime_complete,
            params,
            params_in_internal,
            distributions,
            user_attrs: self.user_attrs,
            system_attrs: self.system_attrs,
        })
    }
}
