//! Parameter distribution types.
//!
//! A [`Distribution`] describes the domain of one parameter. Two
//! distributions are equal when they are the same variant with the same
//! bounds (or choices); that equality is what the intersection search space
//! joins on.

use crate::error::{Error, Result};
use crate::param::ParamValue;

/// Distribution for floating-point parameters sampled uniformly.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniformDistribution {
    /// Lower bound (inclusive).
    pub low: f64,
    /// Upper bound (inclusive).
    pub high: f64,
}

impl UniformDistribution {
    /// Creates a uniform distribution over `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if `low > high` or either bound is not finite.
    pub fn new(low: f64, high: f64) -> Result<Self> {
        check_bounds(low, high)?;
        Ok(Self { low, high })
    }
}

/// Distribution for floating-point parameters sampled uniformly in log space.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogUniformDistribution {
    /// Lower bound (inclusive, positive).
    pub low: f64,
    /// Upper bound (inclusive).
    pub high: f64,
}

impl LogUniformDistribution {
    /// Creates a log-uniform distribution over `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if `low > high`, and
    /// [`Error::InvalidLogBounds`] if `low` is not positive.
    pub fn new(low: f64, high: f64) -> Result<Self> {
        check_bounds(low, high)?;
        if low <= 0.0 {
            return Err(Error::InvalidLogBounds);
        }
        Ok(Self { low, high })
    }
}

/// Distribution for integer parameters on a regular grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntUniformDistribution {
    /// Lower bound (inclusive).
    pub low: i64,
    /// Upper bound (inclusive).
    pub high: i64,
    /// Grid spacing.
    pub step: i64,
}

impl IntUniformDistribution {
    /// Creates an integer distribution over `[low, high]` with unit step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if `low > high`.
    pub fn new(low: i64, high: i64) -> Result<Self> {
        Self::with_step(low, high, 1)
    }

    /// Creates an integer distribution over `[low, high]` with the given step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if `low > high` and
    /// [`Error::InvalidStep`] if `step` is not positive.
    #[allow(clippy::cast_precision_loss)]
    pub fn with_step(low: i64, high: i64, step: i64) -> Result<Self> {
        if low > high {
            return Err(Error::InvalidBounds {
                low: low as f64,
                high: high as f64,
            });
        }
        if step <= 0 {
            return Err(Error::InvalidStep);
        }
        Ok(Self { low, high, step })
    }
}

/// Distribution for floating-point parameters quantized by `q`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscreteUniformDistribution {
    /// Lower bound (inclusive).
    pub low: f64,
    /// Upper bound (inclusive).
    pub high: f64,
    /// Quantization step.
    pub q: f64,
}

impl DiscreteUniformDistribution {
    /// Creates a discretized uniform distribution over `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if `low > high` and
    /// [`Error::InvalidStep`] if `q` is not positive.
    pub fn new(low: f64, high: f64, q: f64) -> Result<Self> {
        check_bounds(low, high)?;
        if q.is_nan() || q <= 0.0 {
            return Err(Error::InvalidStep);
        }
        Ok(Self { low, high, q })
    }
}

/// Distribution for categorical parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoricalDistribution {
    /// The ordered set of choices.
    pub choices: Vec<String>,
}

impl CategoricalDistribution {
    /// Creates a categorical distribution over `choices`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyChoices`] if `choices` is empty.
    pub fn new<I, S>(choices: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let choices: Vec<String> = choices.into_iter().map(Into::into).collect();
        if choices.is_empty() {
            return Err(Error::EmptyChoices);
        }
        Ok(Self { choices })
    }
}

/// Enum wrapping all parameter distribution types.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Distribution {
    /// A categorical distribution.
    Categorical(CategoricalDistribution),
    /// A uniform float distribution.
    Uniform(UniformDistribution),
    /// A log-uniform float distribution.
    LogUniform(LogUniformDistribution),
    /// An integer distribution.
    IntUniform(IntUniformDistribution),
    /// A quantized float distribution.
    DiscreteUniform(DiscreteUniformDistribution),
}

impl Distribution {
    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Categorical(_) => "categorical",
            Self::Uniform(_) => "uniform",
            Self::LogUniform(_) => "log-uniform",
            Self::IntUniform(_) => "int-uniform",
            Self::DiscreteUniform(_) => "discrete-uniform",
        }
    }

    /// Returns `true` if the distribution admits exactly one value.
    ///
    /// Single distributions carry nothing to sample and are left out of
    /// relative sampling.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn single(&self) -> bool {
        match self {
            Self::Categorical(d) => d.choices.len() == 1,
            Self::Uniform(d) => d.low == d.high,
            Self::LogUniform(d) => d.low == d.high,
            Self::IntUniform(d) => d.high.abs_diff(d.low) < d.step.unsigned_abs(),
            Self::DiscreteUniform(d) => d.low == d.high || d.high - d.low < d.q,
        }
    }

    /// Returns `true` if `internal` is a valid internal value for this distribution.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn contains(&self, internal: f64) -> bool {
        match self {
            Self::Categorical(d) => {
                internal >= 0.0 && internal.fract() == 0.0 && internal < d.choices.len() as f64
            }
            Self::Uniform(UniformDistribution { low, high })
            | Self::LogUniform(LogUniformDistribution { low, high })
            | Self::DiscreteUniform(DiscreteUniformDistribution { low, high, .. }) => {
                (*low..=*high).contains(&internal)
            }
            Self::IntUniform(d) => {
                if internal.fract() != 0.0 || !(d.low as f64..=d.high as f64).contains(&internal) {
                    return false;
                }
                (i128::from(internal as i64) - i128::from(d.low)) % i128::from(d.step) == 0
            }
        }
    }

    /// Converts an internal value to its external representation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInternalValue`] if a categorical index is not
    /// a valid choice position, or the value is not finite.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_external_repr(&self, internal: f64) -> Result<ParamValue> {
        if !internal.is_finite() {
            return Err(self.invalid_internal(internal));
        }
        match self {
            Self::Uniform(_) | Self::LogUniform(_) | Self::DiscreteUniform(_) => {
                Ok(ParamValue::Float(internal))
            }
            Self::IntUniform(_) => Ok(ParamValue::Int(internal.round() as i64)),
            Self::Categorical(d) => {
                if internal < 0.0 || internal.fract() != 0.0 {
                    return Err(self.invalid_internal(internal));
                }
                d.choices
                    .get(internal as usize)
                    .map(|choice| ParamValue::Categorical(choice.clone()))
                    .ok_or_else(|| self.invalid_internal(internal))
            }
        }
    }

    /// Converts an external value to its internal representation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterMismatch`] if the value kind does not match
    /// the distribution, or a categorical label is not among the choices.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_internal_repr(&self, value: &ParamValue) -> Result<f64> {
        match (self, value) {
            (
                Self::Uniform(_) | Self::LogUniform(_) | Self::DiscreteUniform(_),
                ParamValue::Float(v),
            ) => Ok(*v),
            (Self::IntUniform(_), ParamValue::Int(v)) => Ok(*v as f64),
            (Self::Categorical(d), ParamValue::Categorical(label)) => d
                .choices
                .iter()
                .position(|c| c == label)
                .map(|idx| idx as f64)
                .ok_or_else(|| Error::ParameterMismatch {
                    name: label.clone(),
                    reason: "not among the categorical choices".to_string(),
                }),
            _ => Err(Error::ParameterMismatch {
                name: self.kind().to_string(),
                reason: format!(
                    "{} value does not fit a {} distribution",
                    value.kind(),
                    self.kind()
                ),
            }),
        }
    }

    fn invalid_internal(&self, value: f64) -> Error {
        Error::InvalidInternalValue {
            value,
            distribution: self.kind(),
        }
    }
}

fn check_bounds(low: f64, high: f64) -> Result<()> {
    if !low.is_finite() || !high.is_finite() || low > high {
        return Err(Error::InvalidBounds { low, high });
    }
    Ok(())
}

macro_rules! impl_cast {
    ($variant:ident, $ty:ty, $name:literal) => {
        impl TryFrom<&Distribution> for $ty {
            type Error = Error;

            fn try_from(distribution: &Distribution) -> Result<Self> {
                match distribution {
                    Distribution::$variant(d) => Ok(d.clone()),
                    other => Err(Error::DistributionCast {
                        expected: $name,
                        got: other.kind(),
                    }),
                }
            }
        }

        impl From<$ty> for Distribution {
            fn from(d: $ty) -> Self {
                Distribution::$variant(d)
            }
        }
    };
}

impl_cast!(Categorical, CategoricalDistribution, "categorical");
impl_cast!(Uniform, UniformDistribution, "uniform");
impl_cast!(LogUniform, LogUniformDistribution, "log-uniform");
impl_cast!(IntUniform, IntUniformDistribution, "int-uniform");
impl_cast!(DiscreteUniform, DiscreteUniformDistribution, "discrete-uniform");
