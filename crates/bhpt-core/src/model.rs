//! Per-model configuration of the two ppBHPT surrogates.
//!
//! Everything that varies between the models is fixed here, once, as plain
//! data and closed enums: parameterization, domain bounds, fit family,
//! composition rule, calibration formula and dataset branching.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calibration::CalibrationFormula;
use crate::dataset::BranchKey;
use crate::fit::FitFamily;
use crate::mode::ModeIndex;
use crate::params::{DomainBounds, ParameterPoint};
use crate::reconstruct::Composition;

const MODES_1DQ1E4: [ModeIndex; 25] = [
    ModeIndex::new(2, 2),
    ModeIndex::new(2, 1),
    ModeIndex::new(3, 1),
    ModeIndex::new(3, 2),
    ModeIndex::new(3, 3),
    ModeIndex::new(4, 2),
    ModeIndex::new(4, 3),
    ModeIndex::new(4, 4),
    ModeIndex::new(5, 3),
    ModeIndex::new(5, 4),
    ModeIndex::new(5, 5),
    ModeIndex::new(6, 4),
    ModeIndex::new(6, 5),
    ModeIndex::new(6, 6),
    ModeIndex::new(7, 5),
    ModeIndex::new(7, 6),
    ModeIndex::new(7, 7),
    ModeIndex::new(8, 6),
    ModeIndex::new(8, 7),
    ModeIndex::new(8, 8),
    ModeIndex::new(9, 7),
    ModeIndex::new(9, 8),
    ModeIndex::new(9, 9),
    ModeIndex::new(10, 8),
    ModeIndex::new(10, 9),
];

const MODES_2DQ1E3: [ModeIndex; 8] = [
    ModeIndex::new(2, 2),
    ModeIndex::new(2, 1),
    ModeIndex::new(3, 1),
    ModeIndex::new(3, 2),
    ModeIndex::new(3, 3),
    ModeIndex::new(4, 2),
    ModeIndex::new(4, 3),
    ModeIndex::new(4, 4),
];

/// A surrogate model variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    /// Non-spinning, q ∈ [2.5, 10⁴] (arXiv:2204.01972).
    #[serde(rename = "BHPTNRSur1dq1e4")]
    Sur1dq1e4,
    /// Aligned primary spin, q ∈ [3, 10³], χ ∈ [−0.8, 0.8] (arXiv:2407.18319).
    #[serde(rename = "BHPTNRSur2dq1e3")]
    Sur2dq1e3,
}

impl ModelKind {
    pub const ALL: [ModelKind; 2] = [ModelKind::Sur1dq1e4, ModelKind::Sur2dq1e3];

    pub fn name(self) -> &'static str {
        match self {
            ModelKind::Sur1dq1e4 => "BHPTNRSur1dq1e4",
            ModelKind::Sur2dq1e3 => "BHPTNRSur2dq1e3",
        }
    }

    pub fn available_modes(self) -> &'static [ModeIndex] {
        match self {
            ModelKind::Sur1dq1e4 => &MODES_1DQ1E4,
            ModelKind::Sur2dq1e3 => &MODES_2DQ1E3,
        }
    }

    pub fn default_max_l(self) -> u32 {
        match self {
            ModelKind::Sur1dq1e4 => 5,
            ModelKind::Sur2dq1e3 => 4,
        }
    }

    /// Dimension of the surrogate parameterization.
    pub fn dimension(self) -> usize {
        match self {
            ModelKind::Sur1dq1e4 => 1,
            ModelKind::Sur2dq1e3 => 2,
        }
    }

    /// Training domain in the surrogate parameterization.
    pub fn bounds(self) -> DomainBounds {
        match self {
            ModelKind::Sur1dq1e4 => DomainBounds {
                names: vec!["log10(q)"],
                min: vec![2.5f64.log10()],
                max: vec![4.0],
            },
            ModelKind::Sur2dq1e3 => DomainBounds {
                names: vec!["log10(q)", "spin1"],
                min: vec![3.0f64.log10(), -0.8],
                max: vec![3.0, 0.8],
            },
        }
    }

    pub fn fit_family(self) -> FitFamily {
        match self {
            ModelKind::Sur1dq1e4 => FitFamily::Spline1d,
            ModelKind::Sur2dq1e3 => FitFamily::Gpr,
        }
    }

    pub fn composition(self) -> Composition {
        match self {
            ModelKind::Sur1dq1e4 => Composition::CoorbitalHigherModes,
            ModelKind::Sur2dq1e3 => Composition::AmplitudePhase,
        }
    }

    pub fn calibration_formula(self) -> CalibrationFormula {
        match self {
            ModelKind::Sur1dq1e4 => CalibrationFormula::InverseMassRatio,
            ModelKind::Sur2dq1e3 => CalibrationFormula::InverseMassRatioSpin,
        }
    }

    /// Branches a complete dataset for this model must carry.
    pub fn branch_keys(self) -> &'static [BranchKey] {
        match self {
            ModelKind::Sur1dq1e4 => &[BranchKey::Default],
            ModelKind::Sur2dq1e3 => &[BranchKey::PositiveSpin, BranchKey::NegativeSpin],
        }
    }

    /// Branch serving `point`. Zero spin goes to the positive branch.
    pub fn branch_for(self, point: &ParameterPoint) -> BranchKey {
        match self {
            ModelKind::Sur1dq1e4 => BranchKey::Default,
            ModelKind::Sur2dq1e3 if point.spin_or_zero() < 0.0 => BranchKey::NegativeSpin,
            ModelKind::Sur2dq1e3 => BranchKey::PositiveSpin,
        }
    }

    /// Point at which the fits are evaluated.
    pub fn surrogate_point(self, point: &ParameterPoint) -> Vec<f64> {
        match self {
            ModelKind::Sur1dq1e4 => vec![point.log10_q()],
            ModelKind::Sur2dq1e3 => vec![point.log10_q(), point.spin_or_zero()],
        }
    }

    /// Point at which the calibration polynomials are evaluated. Both models
    /// expand in ε = 1/q; the spinning model adds χ.
    pub fn calibration_point(self, point: &ParameterPoint) -> Vec<f64> {
        match self {
            ModelKind::Sur1dq1e4 => vec![point.inverse_q()],
            ModelKind::Sur2dq1e3 => vec![point.inverse_q(), point.spin_or_zero()],
        }
    }

    /// Amplitude normalization applied to every raw mode.
    pub fn normalization(self, point: &ParameterPoint) -> f64 {
        point.inverse_q()
    }

    /// Names of the inputs this model reads.
    pub fn inputs(self) -> &'static [&'static str] {
        match self {
            ModelKind::Sur1dq1e4 => &["q"],
            ModelKind::Sur2dq1e3 => &["q", "spin1"],
        }
    }

    pub fn takes_spin(self) -> bool {
        self.dimension() > 1
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = String;

    /// Accepts the full name or its `1dq1e4` / `2dq1e3` suffix, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let short = lowered.strip_prefix("bhptnrsur").unwrap_or(&lowered);
        match short {
            "1dq1e4" => Ok(ModelKind::Sur1dq1e4),
            "2dq1e3" => Ok(ModelKind::Sur2dq1e3),
            _ => Err(format!(
                "unknown model '{s}', expected BHPTNRSur1dq1e4 or BHPTNRSur2dq1e3"
            )),
        }
    }
}
