#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Relative (joint) sampling core for hyperparameter optimization.
//!
//! A relative sampler looks at the completed trials of a study, works out
//! which parameters every one of them shares, and models those parameters
//! together. This crate provides the pieces such samplers are made of: the
//! parameter distributions and frozen-trial data model, the intersection
//! search space, the univariate Parzen estimator used by TPE, and the
//! [`RelativeSampler`](sampler::RelativeSampler) contract with TPE and
//! CMA-ES strategies behind it.
//!
//! # Getting Started
//!
//! ```
//! use relative_sampler::prelude::*;
//!
//! let x = Distribution::from(UniformDistribution::new(-5.0, 5.0)?);
//! let history: Vec<FrozenTrial> = (0..3)
//!     .map(|n| {
//!         FrozenTrial::builder(n)
//!             .param("x", x.clone(), n as f64)
//!             .complete(n as f64)
//!             .build()
//!     })
//!     .collect::<Result<_>>()?;
//!
//! let space = IntersectionSearchSpace::calculate(&history);
//! assert_eq!(space.len(), 1);
//!
//! let mus: Vec<f64> = history.iter().filter_map(|t| t.param_internal("x")).collect();
//! let pe = ParzenEstimator::new(&mus, -5.0, 5.0, &ParzenEstimatorParams::default())?;
//! assert_eq!(pe.len(), 4);
//! # Ok::<(), Error>(())
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Distribution`] | Domain of one parameter, with internal/external conversions. |
//! | [`FrozenTrial`] | Immutable record of one trial: state, value, parameters. |
//! | [`IntersectionSearchSpace`] | Parameters shared, with equal distributions, by all complete trials. |
//! | [`ParzenEstimator`](sampler::tpe::ParzenEstimator) | Gaussian mixture over one parameter's observations. |
//! | [`RelativeSampler`](sampler::RelativeSampler) | Joint sampling contract. |
//! | [`TrialSource`](storage::TrialSource) | Snapshot access to a study's trials. |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `cma-es` | `CmaEsSampler`, backed by `nalgebra` | on |
//! | `serde` | `Serialize`/`Deserialize` on the data model | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at sampling decisions | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod distribution;
mod error;
mod param;
pub mod sampler;
pub mod storage;
mod trial;
mod types;

pub use distribution::{
    CategoricalDistribution, DiscreteUniformDistribution, Distribution, IntUniformDistribution,
    LogUniformDistribution, UniformDistribution,
};
pub use error::{Error, Result};
pub use param::ParamValue;
pub use sampler::search_space::{IntersectionSearchSpace, SearchSpace};
pub use trial::{FrozenTrial, FrozenTrialBuilder};
pub use types::TrialState;

/// Convenient wildcard import for the most common types.
///
/// ```
/// use relative_sampler::prelude::*;
/// ```
pub mod prelude {
    pub use crate::distribution::{
        CategoricalDistribution, DiscreteUniformDistribution, Distribution,
        IntUniformDistribution, LogUniformDistribution, UniformDistribution,
    };
    pub use crate::error::{Error, Result};
    pub use crate::param::ParamValue;
    #[cfg(feature = "cma-es")]
    pub use crate::sampler::cma_es::CmaEsSampler;
    pub use crate::sampler::search_space::{IntersectionSearchSpace, SearchSpace};
    pub use crate::sampler::tpe::{ParzenEstimator, ParzenEstimatorParams, TpeSampler};
    pub use crate::sampler::{RelativeSample, RelativeSampler, sample_relative_from};
    pub use crate::storage::{MemoryStorage, TrialSource};
    pub use crate::trial::{FrozenTrial, FrozenTrialBuilder};
    pub use crate::types::TrialState;
}
