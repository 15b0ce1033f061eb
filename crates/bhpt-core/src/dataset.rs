//! The immutable surrogate dataset.
//!
//! A dataset is built once, fully validated against its model, and then only
//! read. Per branch it holds a time grid and, per mode, two channels of
//! reduced basis plus fits.

use std::collections::BTreeMap;

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::calibration::CalibrationCoefficients;
use crate::error::{Result, SurrogateError};
use crate::fit::{FitFunction, evaluate_fits};
use crate::mode::ModeIndex;
use crate::model::ModelKind;

/// Sub-dataset selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchKey {
    Default,
    PositiveSpin,
    NegativeSpin,
}

impl BranchKey {
    pub fn as_str(self) -> &'static str {
        match self {
            BranchKey::Default => "default",
            BranchKey::PositiveSpin => "positive_spin",
            BranchKey::NegativeSpin => "negative_spin",
        }
    }
}

/// Orthonormal basis stored as a `rank × n_times` matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct ReducedBasis {
    matrix: DMatrix<f64>,
}

impl ReducedBasis {
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let rank = rows.len();
        if rank == 0 {
            return Err(SurrogateError::dataset("reduced basis has no vectors"));
        }
        let len = rows[0].len();
        if rows.iter().any(|r| r.len() != len) {
            return Err(SurrogateError::dataset(
                "reduced basis vectors have different lengths",
            ));
        }
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        Ok(Self {
            matrix: DMatrix::from_row_slice(rank, len, &flat),
        })
    }

    pub fn rank(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of time samples.
    pub fn len(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.matrix
            .row_iter()
            .map(|r| r.iter().copied().collect())
            .collect()
    }

    /// Σ_k c_k · e_k. `coefficients.len()` must equal the rank.
    pub fn reconstruct(&self, coefficients: &[f64]) -> Vec<f64> {
        let c = DVector::from_column_slice(coefficients);
        self.matrix.tr_mul(&c).iter().copied().collect()
    }
}

/// One real decomposition channel of a mode.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelSurrogate {
    pub basis: ReducedBasis,
    /// One fit per basis vector.
    pub fits: Vec<FitFunction>,
}

impl ChannelSurrogate {
    pub fn coefficients(&self, x: &[f64]) -> Vec<f64> {
        evaluate_fits(&self.fits, x)
    }

    pub fn evaluate(&self, x: &[f64]) -> Vec<f64> {
        self.basis.reconstruct(&self.coefficients(x))
    }
}

/// Amplitude/phase or real/imaginary channel pair.
#[derive(Clone, Debug, PartialEq)]
pub struct ModeSurrogate {
    pub channels: [ChannelSurrogate; 2],
}

#[derive(Clone, Debug, PartialEq)]
pub struct SurrogateBranch {
    pub time: Vec<f64>,
    pub modes: BTreeMap<ModeIndex, ModeSurrogate>,
}

impl SurrogateBranch {
    pub fn mode(&self, mode: &ModeIndex) -> Result<&ModeSurrogate> {
        self.modes
            .get(mode)
            .ok_or_else(|| SurrogateError::dataset(format!("dataset has no data for mode {mode}")))
    }
}

/// Everything one model needs to evaluate. Never mutated after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct SurrogateDataset {
    model: ModelKind,
    branches: BTreeMap<BranchKey, SurrogateBranch>,
    calibration: CalibrationCoefficients,
}

impl SurrogateDataset {
    /// Assemble and validate a dataset for `model`.
    pub fn new(
        model: ModelKind,
        branches: BTreeMap<BranchKey, SurrogateBranch>,
        calibration: CalibrationCoefficients,
    ) -> Result<Self> {
        let dataset = Self {
            model,
            branches,
            calibration,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn model(&self) -> ModelKind {
        self.model
    }

    pub fn calibration(&self) -> &CalibrationCoefficients {
        &self.calibration
    }

    pub fn branches(&self) -> &BTreeMap<BranchKey, SurrogateBranch> {
        &self.branches
    }

    pub fn branch(&self, key: BranchKey) -> Result<&SurrogateBranch> {
        self.branches.get(&key).ok_or_else(|| {
            SurrogateError::dataset(format!(
                "{} dataset has no '{}' branch",
                self.model,
                key.as_str()
            ))
        })
    }

    fn validate(&self) -> Result<()> {
        let model = self.model;
        let expected = model.branch_keys();
        if self.branches.len() != expected.len() || expected.iter().any(|k| !self.branches.contains_key(k)) {
            let keys: Vec<&str> = expected.iter().map(|k| k.as_str()).collect();
            return Err(SurrogateError::dataset(format!(
                "{model} dataset must have branches [{}]",
                keys.join(", ")
            )));
        }

        for (key, branch) in &self.branches {
            let where_ = |mode: &ModeIndex| format!("{model} {} {mode}", key.as_str());
            if branch.time.is_empty() {
                return Err(SurrogateError::dataset(format!(
                    "{model} branch '{}' has an empty time grid",
                    key.as_str()
                )));
            }
            for (mode, surrogate) in &branch.modes {
                if !model.available_modes().contains(mode) {
                    return Err(SurrogateError::dataset(format!(
                        "{}: mode is not modelled",
                        where_(mode)
                    )));
                }
                for (i, channel) in surrogate.channels.iter().enumerate() {
                    if channel.basis.len() != branch.time.len() {
                        return Err(SurrogateError::dataset(format!(
                            "{} channel {i}: basis has {} samples, time grid has {}",
                            where_(mode),
                            channel.basis.len(),
                            branch.time.len()
                        )));
                    }
                    if channel.fits.len() != channel.basis.rank() {
                        return Err(SurrogateError::dataset(format!(
                            "{} channel {i}: {} fits for a rank-{} basis",
                            where_(mode),
                            channel.fits.len(),
                            channel.basis.rank()
                        )));
                    }
                    for fit in &channel.fits {
                        if fit.family() != model.fit_family() {
                            return Err(SurrogateError::dataset(format!(
                                "{} channel {i}: expected {:?} fits",
                                where_(mode),
                                model.fit_family()
                            )));
                        }
                        fit.validate().map_err(|e| {
                            SurrogateError::dataset(format!("{} channel {i}: {e}", where_(mode)))
                        })?;
                        if let FitFunction::Gpr(g) = fit
                            && g.dim() != model.dimension()
                        {
                            return Err(SurrogateError::dataset(format!(
                                "{} channel {i}: GPR of dimension {} for a {}-parameter model",
                                where_(mode),
                                g.dim(),
                                model.dimension()
                            )));
                        }
                    }
                }
            }
        }

        model
            .calibration_formula()
            .validate(&self.calibration)
            .map_err(|e| SurrogateError::dataset(format!("{model} calibration: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::BSpline;

    fn constant_fit(value: f64) -> FitFunction {
        FitFunction::Spline(BSpline::new(vec![0.0, 0.0, 5.0, 5.0], vec![value, value], 1).unwrap())
    }

    fn channel(rows: Vec<Vec<f64>>, values: &[f64]) -> ChannelSurrogate {
        ChannelSurrogate {
            basis: ReducedBasis::from_rows(&rows).unwrap(),
            fits: values.iter().map(|v| constant_fit(*v)).collect(),
        }
    }

    fn branch(n: usize) -> SurrogateBranch {
        let e0: Vec<f64> = (0..n).map(|i| if i == 0 { 1.0 } else { 0.0 }).collect();
        let mut modes = BTreeMap::new();
        modes.insert(
            ModeIndex::new(2, 2),
            ModeSurrogate {
                channels: [channel(vec![e0.clone()], &[1.0]), channel(vec![e0], &[0.0])],
            },
        );
        SurrogateBranch {
            time: (0..n).map(|i| i as f64).collect(),
            modes,
        }
    }

    fn calibration() -> CalibrationCoefficients {
        CalibrationCoefficients {
            alpha: BTreeMap::new(),
            beta: vec![vec![0.0]],
        }
    }

    #[test]
    fn test_basis_reconstruct() {
        let b = ReducedBasis::from_rows(&[vec![1.0, 0.0, 1.0], vec![0.0, 2.0, 0.0]]).unwrap();
        assert_eq!(b.rank(), 2);
        assert_eq!(b.len(), 3);
        assert_eq!(b.reconstruct(&[3.0, 0.5]), vec![3.0, 1.0, 3.0]);
        assert_eq!(b.rows()[1], vec![0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_basis_rejects_ragged_rows() {
        assert!(ReducedBasis::from_rows(&[vec![1.0, 0.0], vec![1.0]]).is_err());
        assert!(ReducedBasis::from_rows(&[]).is_err());
    }

    #[test]
    fn test_valid_single_branch() {
        let mut branches = BTreeMap::new();
        branches.insert(BranchKey::Default, branch(4));
        let ds = SurrogateDataset::new(ModelKind::Sur1dq1e4, branches, calibration()).unwrap();
        let b = ds.branch(BranchKey::Default).unwrap();
        let mode = b.mode(&ModeIndex::new(2, 2)).unwrap();
        assert_eq!(mode.channels[0].evaluate(&[1.0]), vec![1.0, 0.0, 0.0, 0.0]);
        assert!(b.mode(&ModeIndex::new(3, 3)).is_err());
        assert!(ds.branch(BranchKey::NegativeSpin).is_err());
    }

    #[test]
    fn test_wrong_branch_set_rejected() {
        let mut branches = BTreeMap::new();
        branches.insert(BranchKey::Default, branch(4));
        let err = SurrogateDataset::new(ModelKind::Sur2dq1e3, branches, calibration()).unwrap_err();
        assert!(err.to_string().contains("positive_spin"));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut b = branch(4);
        b.time.pop();
        let mut branches = BTreeMap::new();
        branches.insert(BranchKey::Default, b);
        assert!(SurrogateDataset::new(ModelKind::Sur1dq1e4, branches, calibration()).is_err());
    }

    #[test]
    fn test_fit_family_checked() {
        let mut branches = BTreeMap::new();
        branches.insert(BranchKey::PositiveSpin, branch(4));
        branches.insert(BranchKey::NegativeSpin, branch(4));
        let err = SurrogateDataset::new(ModelKind::Sur2dq1e3, branches, calibration()).unwrap_err();
        assert!(err.to_string().contains("Gpr"));
    }
}
