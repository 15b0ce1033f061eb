//! Parametric fits mapping a surrogate-parameterization point to reduced-basis
//! coefficients.
//!
//! Two families exist and each model uses exactly one:
//!
//! - 1-D B-spline over a scalar parameter
//! - Gaussian-process regression over a parameter vector

pub mod gpr;
pub mod spline;

use serde::{Deserialize, Serialize};

pub use gpr::{GprFit, LinearTrend};
pub use spline::BSpline;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitFamily {
    Spline1d,
    Gpr,
}

/// One fitted scalar function of the surrogate parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FitFunction {
    Spline(BSpline),
    Gpr(GprFit),
}

impl FitFunction {
    pub fn family(&self) -> FitFamily {
        match self {
            FitFunction::Spline(_) => FitFamily::Spline1d,
            FitFunction::Gpr(_) => FitFamily::Gpr,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            FitFunction::Spline(s) => s.validate(),
            FitFunction::Gpr(g) => g.validate(),
        }
    }

    /// Evaluate at `x`. A spline reads only `x[0]`.
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        match self {
            FitFunction::Spline(s) => s.evaluate(x[0]),
            FitFunction::Gpr(g) => g.predict(x),
        }
    }
}

/// Evaluate every fit of one mode/channel, yielding its coefficient vector.
pub fn evaluate_fits(fits: &[FitFunction], x: &[f64]) -> Vec<f64> {
    fits.iter().map(|f| f.evaluate(x)).collect()
}
