use core::fmt::Debug;
use std::sync::Arc;

/// A strategy for weighting the observations of a Parzen estimator.
///
/// Given the number of observations `n`, returns `n` un-normalized weights,
/// one per observation in the order the observations were recorded (oldest
/// first). The estimator reorders and normalizes them itself.
///
/// # Examples
///
/// ```
/// use relative_sampler::sampler::tpe::WeightStrategy;
///
/// #[derive(Debug)]
/// struct Doubling;
///
/// impl WeightStrategy for Doubling {
///     fn weights(&self, n: usize) -> Vec<f64> {
///         (0..n).map(|i| 2f64.powi(i as i32)).collect()
///     }
/// }
///
/// assert_eq!(Doubling.weights(3), vec![1.0, 2.0, 4.0]);
/// ```
pub trait WeightStrategy: Send + Sync + Debug {
    /// Returns `n` un-normalized weights.
    fn weights(&self, n: usize) -> Vec<f64>;
}

/// Every observation weighs the same.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformWeights;

impl WeightStrategy for UniformWeights {
    fn weights(&self, n: usize) -> Vec<f64> {
        vec![1.0; n]
    }
}

/// Recency-biased weighting.
///
/// The newest `flat` observations get weight 1. Older observations ramp
/// linearly from `1/n` up to 1, so stale history fades out. With fewer than
/// `flat` observations every weight is 1.
#[derive(Debug, Clone, Copy)]
pub struct RampWeights {
    flat: usize,
}

impl RampWeights {
    /// Creates a ramp that keeps the newest `flat` observations at full weight.
    #[must_use]
    pub fn new(flat: usize) -> Self {
        Self { flat }
    }

    /// Returns the number of observations kept at full weight.
    #[must_use]
    pub fn flat(&self) -> usize {
        self.flat
    }
}

impl Default for RampWeights {
    fn default() -> Self {
        Self::new(25)
    }
}

impl WeightStrategy for RampWeights {
    #[allow(clippy::cast_precision_loss)]
    fn weights(&self, n: usize) -> Vec<f64> {
        if n < self.flat || n == 0 {
            return vec![1.0; n];
        }
        let start = 1.0 / n as f64;
        let mut weights = linspace(start, 1.0, n - self.flat);
        weights.resize(n, 1.0);
        weights
    }
}

/// Adapts a closure into a [`WeightStrategy`].
///
/// ```
/// use relative_sampler::sampler::tpe::{FnWeights, WeightStrategy};
///
/// let halves = FnWeights::new(|n| vec![0.5; n]);
/// assert_eq!(halves.weights(2), vec![0.5, 0.5]);
/// ```
#[derive(Clone)]
pub struct FnWeights {
    func: Arc<dyn Fn(usize) -> Vec<f64> + Send + Sync>,
}

impl FnWeights {
    /// Wraps `func`.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(usize) -> Vec<f64> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }
}

impl Debug for FnWeights {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnWeights").finish_non_exhaustive()
    }
}

impl WeightStrategy for FnWeights {
    fn weights(&self, n: usize) -> Vec<f64> {
        (self.func)(n)
    }
}

/// `num` evenly spaced values over `[start, stop]`; a single value is `start`.
#[allow(clippy::cast_precision_loss)]
fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num).map(|i| start + step * i as f64).collect()
        }
    }
}
