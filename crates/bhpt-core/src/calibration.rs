//! NR calibration of raw ppBHPT modes.
//!
//! Both models share the rescaling law
//!
//! ```text
//! h_NR(t) ≈ α_l · h_ppBHPT(β · t)
//! ```
//!
//! Each mode is multiplied by α_l (amplitude correction α_l − 1) and the time
//! axis becomes t / β, which carries the phase correction. Only the
//! polynomial giving α_l and β differs between models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::advisory::{Advisory, AdvisoryKind};
use crate::mode::{ModeIndex, format_modes};
use crate::waveform::WaveformModeSet;

/// Polynomial coefficient tables.
///
/// Row `i` multiplies ε^(i+1) with ε = 1/q; column `j` multiplies χ^j.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationCoefficients {
    /// Amplitude tables keyed by `l`.
    pub alpha: BTreeMap<u32, Vec<Vec<f64>>>,
    /// Time-dilation table shared by every mode.
    pub beta: Vec<Vec<f64>>,
}

/// Closed set of calibration definitions, one per model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationFormula {
    /// α_l = 1 + Σ_k a_{l,k} ε^k, β = 1 + Σ_k b_k ε^k (arXiv:2204.01972).
    InverseMassRatio,
    /// α_l = 1 + Σ_{i,j} a_{l,ij} ε^i χ^j, β likewise (arXiv:2407.18319).
    InverseMassRatioSpin,
}

/// Correction factors evaluated at one calibration point.
#[derive(Clone, Debug, PartialEq)]
pub struct CalibrationTerms {
    pub alpha: BTreeMap<u32, f64>,
    pub beta: f64,
}

impl CalibrationFormula {
    pub fn validate(self, coeffs: &CalibrationCoefficients) -> Result<(), String> {
        let tables = coeffs.alpha.values().chain(std::iter::once(&coeffs.beta));
        match self {
            CalibrationFormula::InverseMassRatio => {
                for table in tables {
                    if table.iter().any(|row| row.len() != 1) {
                        return Err(
                            "mass-ratio-only calibration rows must hold exactly one coefficient"
                                .to_string(),
                        );
                    }
                }
            }
            CalibrationFormula::InverseMassRatioSpin => {
                for table in tables {
                    if table.iter().any(|row| row.is_empty()) {
                        return Err("calibration rows must not be empty".to_string());
                    }
                }
            }
        }
        Ok(())
    }

    /// Evaluate at a calibration point `[ε]` or `[ε, χ]`, as produced by
    /// [`crate::model::ModelKind::calibration_point`]. A missing χ reads as 0.
    pub fn evaluate(self, coeffs: &CalibrationCoefficients, x: &[f64]) -> CalibrationTerms {
        let eps = x.first().copied().unwrap_or(0.0);
        let chi = x.get(1).copied().unwrap_or(0.0);
        let poly = |table: &[Vec<f64>]| match self {
            CalibrationFormula::InverseMassRatio => 1.0 + series_in_eps(table, eps),
            CalibrationFormula::InverseMassRatioSpin => 1.0 + bivariate(table, eps, chi),
        };
        CalibrationTerms {
            alpha: coeffs
                .alpha
                .iter()
                .map(|(l, table)| (*l, poly(table)))
                .collect(),
            beta: poly(&coeffs.beta),
        }
    }
}

fn series_in_eps(table: &[Vec<f64>], eps: f64) -> f64 {
    let mut power = eps;
    let mut acc = 0.0;
    for row in table {
        acc += row[0] * power;
        power *= eps;
    }
    acc
}

fn bivariate(table: &[Vec<f64>], eps: f64, chi: f64) -> f64 {
    let mut eps_power = eps;
    let mut acc = 0.0;
    for row in table {
        let mut chi_power = 1.0;
        for c in row {
            acc += c * eps_power * chi_power;
            chi_power *= chi;
        }
        eps_power *= eps;
    }
    acc
}

/// Apply calibration terms to raw modes.
///
/// Modes whose `l` has no amplitude table are passed through with α = 1 (the
/// time axis is still dilated) and reported in one advisory, as is a
/// requested `max_l` above the calibrated range.
pub fn apply_calibration(
    raw: WaveformModeSet,
    terms: &CalibrationTerms,
    max_l: u32,
) -> (WaveformModeSet, Vec<Advisory>) {
    let WaveformModeSet { time, modes } = raw;
    let time: Vec<f64> = time.iter().map(|t| t / terms.beta).collect();

    let mut uncovered: Vec<ModeIndex> = Vec::new();
    let modes = modes
        .into_iter()
        .map(|(mode, series)| match terms.alpha.get(&mode.l) {
            Some(alpha) => (mode, series.into_iter().map(|h| h * *alpha).collect()),
            None => {
                uncovered.push(mode);
                (mode, series)
            }
        })
        .collect();

    let covered_l = terms.alpha.keys().next_back().copied().unwrap_or(0);
    let mut advisories = Vec::new();
    if !uncovered.is_empty() || max_l > covered_l {
        let mut message = format!("only modes up to l={covered_l} are NR calibrated");
        if !uncovered.is_empty() {
            message.push_str(&format!("; uncalibrated: {}", format_modes(&uncovered)));
        }
        advisories.push(
            Advisory::new(AdvisoryKind::BeyondCalibrationCoverage, message).with_value(max_l),
        );
    }

    (WaveformModeSet { time, modes }, advisories)
}
