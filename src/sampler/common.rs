//! Shared distribution-level utilities used by the relative samplers.

use crate::distribution::Distribution;

/// Bounds of the space a numeric parameter is modelled in.
///
/// Log-uniform parameters are modelled in log space. Stepped parameters get
/// half a step of slack on either side so the grid end points carry the same
/// mass as interior points. Categorical parameters have no numeric model.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn model_bounds(distribution: &Distribution) -> Option<(f64, f64)> {
    match distribution {
        Distribution::Uniform(d) => Some((d.low, d.high)),
        Distribution::LogUniform(d) => Some((d.low.ln(), d.high.ln())),
        Distribution::IntUniform(d) => {
            let half = 0.5 * d.step as f64;
            Some((d.low as f64 - half, d.high as f64 + half))
        }
        Distribution::DiscreteUniform(d) => {
            let half = 0.5 * d.q;
            Some((d.low - half, d.high + half))
        }
        Distribution::Categorical(_) => None,
    }
}

/// Maps an internal value into model space.
pub(crate) fn to_model_space(distribution: &Distribution, internal: f64) -> f64 {
    match distribution {
        Distribution::LogUniform(_) => internal.ln(),
        _ => internal,
    }
}

/// Internal-space bounds for a distribution, log-transformed where the
/// distribution samples in log space. Categorical parameters span their
/// index range.
#[allow(clippy::cast_precision_loss)]
#[cfg_attr(not(feature = "cma-es"), allow(dead_code))]
pub(crate) fn internal_bounds(distribution: &Distribution) -> (f64, f64) {
    match distribution {
        Distribution::Uniform(d) => (d.low, d.high),
        Distribution::LogUniform(d) => (d.low.ln(), d.high.ln()),
        Distribution::IntUniform(d) => (d.low as f64, d.high as f64),
        Distribution::DiscreteUniform(d) => (d.low, d.high),
        Distribution::Categorical(d) => (0.0, d.choices.len().saturating_sub(1) as f64),
    }
}
