//! Physical inputs and their derived parameterizations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Physical inputs of one evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterPoint {
    /// Mass ratio q = m1/m2 ≥ 1.
    pub mass_ratio: f64,
    /// Dimensionless aligned spin of the primary, when the model takes one.
    pub spin: Option<f64>,
}

impl ParameterPoint {
    pub fn new(mass_ratio: f64) -> Self {
        Self {
            mass_ratio,
            spin: None,
        }
    }

    pub fn with_spin(mass_ratio: f64, spin: f64) -> Self {
        Self {
            mass_ratio,
            spin: Some(spin),
        }
    }

    pub fn log10_q(&self) -> f64 {
        self.mass_ratio.log10()
    }

    pub fn inverse_q(&self) -> f64 {
        1.0 / self.mass_ratio
    }

    pub fn spin_or_zero(&self) -> f64 {
        self.spin.unwrap_or(0.0)
    }
}

/// Per-parameter `[min, max]` hyperrectangle of the training domain.
///
/// Not a hard limit: evaluation outside it extrapolates.
#[derive(Clone, Debug, PartialEq)]
pub struct DomainBounds {
    pub names: Vec<&'static str>,
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

impl DomainBounds {
    pub fn dim(&self) -> usize {
        self.min.len()
    }

    /// Indices of components of `x` lying outside their bound.
    pub fn violations(&self, x: &[f64]) -> Vec<usize> {
        x.iter()
            .zip(self.min.iter().zip(self.max.iter()))
            .enumerate()
            .filter(|(_, (v, (lo, hi)))| **v < **lo || **v > **hi)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Mass unit the uncalibrated waveform is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MassScale {
    /// Total mass M = m1 + m2.
    #[default]
    #[serde(rename = "M")]
    Total,
    /// Primary mass m1.
    #[serde(rename = "m1")]
    Primary,
}

impl FromStr for MassScale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(MassScale::Total),
            "m1" => Ok(MassScale::Primary),
            other => Err(ConfigError::InvalidMassScale {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for MassScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MassScale::Total => write!(f, "M"),
            MassScale::Primary => write!(f, "m1"),
        }
    }
}

/// Observer-dependent parameters. All optional; pairing rules are checked by
/// [`crate::validate::check_extrinsic_params`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Extrinsics {
    /// Total mass in solar masses.
    pub total_mass: Option<f64>,
    /// Luminosity distance in Mpc.
    pub distance_mpc: Option<f64>,
    /// Azimuthal angle on the sky (rad).
    pub orbital_phase: Option<f64>,
    /// Polar angle on the sky (rad).
    pub inclination: Option<f64>,
}

impl Extrinsics {
    pub fn mass_and_distance(&self) -> Option<(f64, f64)> {
        self.total_mass.zip(self.distance_mpc)
    }

    pub fn orientation(&self) -> Option<(f64, f64)> {
        self.inclination.zip(self.orbital_phase)
    }

    pub fn is_complete(&self) -> bool {
        self.mass_and_distance().is_some() && self.orientation().is_some()
    }
}
