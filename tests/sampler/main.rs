#![allow(
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation
)]

#[cfg(feature = "cma-es")]
mod cma_es;
mod intersection;
mod tpe;

use relative_sampler::{
    Distribution, FrozenTrial, IntUniformDistribution, Result, UniformDistribution,
};

fn x_dist() -> Distribution {
    IntUniformDistribution::new(0, 10).unwrap().into()
}

fn y_dist() -> Distribution {
    UniformDistribution::new(-3.0, 3.0).unwrap().into()
}

/// A complete trial over `x` and `y` with the given internal values.
fn xy_trial(number: u64, x: f64, y: f64) -> Result<FrozenTrial> {
    FrozenTrial::builder(number)
        .param("x", x_dist(), x)
        .param("y", y_dist(), y)
        .complete(x + y)
        .build()
}
