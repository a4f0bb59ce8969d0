//! Tree-structured Parzen Estimator (TPE) relative sampling.
//!
//! TPE models the distribution of promising parameter values with a
//! [`ParzenEstimator`]: a mixture of truncated Gaussians, one per observed
//! value, whose widths follow the spacing between neighbouring observations.
//!
//! # Estimator configuration
//!
//! | Option | Effect | Default |
//! |--------|--------|---------|
//! | `consider_prior` | Adds a wide component at the middle of the domain | on |
//! | `prior_weight` | Un-normalized weight of that component | 1.0 |
//! | `consider_magic_clip` | Minimum width shrinks with the component count | on |
//! | `consider_endpoints` | Outermost widths may reach the domain edge | off |
//! | `weights` | Per-observation weighting ([`WeightStrategy`]) | [`RampWeights`] |
//!
//! # Examples
//!
//! ```
//! use relative_sampler::sampler::tpe::{ParzenEstimator, ParzenEstimatorParams};
//!
//! let params = ParzenEstimatorParams {
//!     consider_prior: false,
//!     ..ParzenEstimatorParams::default()
//! };
//! let pe = ParzenEstimator::new(&[0.2, 0.4, 0.9], 0.0, 1.0, &params).unwrap();
//!
//! assert_eq!(pe.len(), 3);
//! assert!((pe.weights().iter().sum::<f64>() - 1.0).abs() < 1e-12);
//! assert!(pe.sigmas().iter().all(|&s| s >= pe.min_sigma() && s <= pe.max_sigma()));
//! ```

mod parzen_estimator;
mod sampler;
mod weights;

pub use parzen_estimator::{EPS, ParzenEstimator, ParzenEstimatorParams};
pub use sampler::{TpeSampler, TpeSamplerBuilder};
pub use weights::{FnWeights, RampWeights, UniformWeights, WeightStrategy};
