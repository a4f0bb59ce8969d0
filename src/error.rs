#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the lower bound is greater than the upper bound, or a
    /// bound is not finite.
    #[error("invalid bounds: low ({low}) must be less than or equal to high ({high})")]
    InvalidBounds {
        /// The lower bound value.
        low: f64,
        /// The upper bound value.
        high: f64,
    },

    /// Returned when log scale is used with non-positive bounds.
    #[error("invalid log bounds: low must be positive for log scale")]
    InvalidLogBounds,

    /// Returned when step size is not positive.
    #[error("invalid step: step must be positive")]
    InvalidStep,

    /// Returned when categorical choices are empty.
    #[error("categorical choices cannot be empty")]
    EmptyChoices,

    /// Returned when a distribution is read back as a different variant than
    /// the one it was stored as.
    #[error("failed to cast distribution: expected {expected}, got {got}")]
    DistributionCast {
        /// The variant the caller asked for.
        expected: &'static str,
        /// The variant actually stored.
        got: &'static str,
    },

    /// Returned when a parameter value does not fit its distribution.
    #[error("parameter mismatch for '{name}': {reason}")]
    ParameterMismatch {
        /// The name of the offending parameter (or distribution kind).
        name: String,
        /// The reason for the mismatch.
        reason: String,
    },

    /// Returned when an internal value cannot be mapped back to the external
    /// representation (e.g. a categorical index past the last choice).
    #[error("internal value {value} is not valid for a {distribution} distribution")]
    InvalidInternalValue {
        /// The internal value.
        value: f64,
        /// The distribution kind.
        distribution: &'static str,
    },

    /// Returned when the prior weight is not a positive finite number.
    #[error("invalid prior weight: {0} must be positive and finite")]
    InvalidPriorWeight(f64),

    /// Returned when the initial CMA-ES step size is not a positive finite number.
    #[error("invalid sigma0: {0} must be positive and finite")]
    InvalidSigma(f64),

    /// Returned when an observation fed to a Parzen estimator is not finite.
    #[error("invalid observation: {0} is not finite")]
    InvalidObservation(f64),

    /// Returned when a weight strategy yields the wrong number of weights.
    #[error("weight strategy returned {got} weights for {expected} observations")]
    WeightsLengthMismatch {
        /// The number of observations.
        expected: usize,
        /// The number of weights returned.
        got: usize,
    },

    /// Returned when the component weights cannot be normalized.
    #[error("component weights must sum to a positive finite value")]
    DegenerateWeights,

    /// Returned by sampling paths that are not backed by an algorithm yet.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    /// Returned when a trial source fails to produce a snapshot.
    #[error("storage error: {0}")]
    Storage(String),
}

pub type Result<T> = core::result::Result<T, Error>;
