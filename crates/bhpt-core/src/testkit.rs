//! Small synthetic datasets for tests and benches.
//!
//! The shapes match real datasets (every available mode, two channels of
//! rank-2 bases, the right fit family and branches) but the numbers are
//! smooth toy functions, so evaluations are fast and deterministic.

use std::collections::BTreeMap;

use crate::calibration::CalibrationCoefficients;
use crate::dataset::{
    BranchKey, ChannelSurrogate, ModeSurrogate, ReducedBasis, SurrogateBranch, SurrogateDataset,
};
use crate::error::{Result, SurrogateError};
use crate::fit::{BSpline, FitFunction, GprFit};
use crate::mode::ModeIndex;
use crate::model::ModelKind;
use crate::reconstruct::Composition;
use crate::serde_compat::export_json;

pub const SAMPLES: usize = 61;

/// Geometric time grid from −100 to 50 in steps of 2.5.
pub fn time_grid() -> Vec<f64> {
    (0..SAMPLES).map(|i| -100.0 + 2.5 * i as f64).collect()
}

fn envelope(t: f64) -> f64 {
    1.0 / (1.0 + (t / 40.0).powi(2))
}

fn basis(rows: [Vec<f64>; 2]) -> Result<ReducedBasis> {
    ReducedBasis::from_rows(&rows)
}

/// Linear in the scalar parameter on [0, 4], extrapolating beyond.
fn spline(at_zero: f64, slope: f64) -> FitFunction {
    FitFunction::Spline(BSpline {
        knots: vec![0.0, 0.0, 4.0, 4.0],
        coefficients: vec![at_zero, at_zero + 4.0 * slope],
        degree: 1,
    })
}

fn gpr(mean: f64, spin_weight: f64) -> FitFunction {
    FitFunction::Gpr(GprFit {
        x_train: vec![vec![1.0, -0.5], vec![2.0, 0.0], vec![3.0, 0.5]],
        alpha: vec![-0.1 * spin_weight, 0.05, 0.1 * spin_weight],
        constant: 1.0,
        length_scales: vec![1.0, 0.5],
        y_train_mean: 0.0,
        data_mean: mean,
        data_std: 1.0,
        linear: None,
    })
}

fn fit(model: ModelKind, value: f64, variation: f64) -> FitFunction {
    match model {
        ModelKind::Sur1dq1e4 => spline(value, variation),
        ModelKind::Sur2dq1e3 => gpr(value, variation),
    }
}

fn mode_surrogate(model: ModelKind, mode: ModeIndex, time: &[f64]) -> Result<ModeSurrogate> {
    let l = f64::from(mode.l);
    let m = f64::from(mode.m);
    let env: Vec<f64> = time.iter().map(|t| envelope(*t)).collect();
    let tilt: Vec<f64> = time.iter().map(|t| envelope(*t) * t / 100.0).collect();
    let scale = 1.0 / (l - 1.0);

    let amp_phase = (mode.l == 2 && mode.m == 2) || model.composition() == Composition::AmplitudePhase;
    let channels = if amp_phase {
        let ramp: Vec<f64> = time.to_vec();
        let ones = vec![1.0; time.len()];
        [
            ChannelSurrogate {
                basis: basis([env, tilt])?,
                fits: vec![fit(model, scale, 0.02), fit(model, 0.05 * scale, 0.0)],
            },
            ChannelSurrogate {
                basis: basis([ramp, ones])?,
                fits: vec![fit(model, -0.15 * m, 0.01), fit(model, 0.1 * m, 0.0)],
            },
        ]
    } else {
        [
            ChannelSurrogate {
                basis: basis([env.clone(), tilt.clone()])?,
                fits: vec![fit(model, 0.5 * scale, 0.01), fit(model, 0.0, 0.01)],
            },
            ChannelSurrogate {
                basis: basis([env, tilt])?,
                fits: vec![fit(model, 0.1 * scale, -0.01), fit(model, 0.02, 0.0)],
            },
        ]
    };
    Ok(ModeSurrogate { channels })
}

fn branch(model: ModelKind, time_offset: f64) -> Result<SurrogateBranch> {
    let time: Vec<f64> = time_grid().into_iter().map(|t| t + time_offset).collect();
    let mut modes = BTreeMap::new();
    for mode in model.available_modes() {
        modes.insert(*mode, mode_surrogate(model, *mode, &time)?);
    }
    Ok(SurrogateBranch { time, modes })
}

fn calibration(model: ModelKind) -> CalibrationCoefficients {
    let mut alpha = BTreeMap::new();
    match model {
        ModelKind::Sur1dq1e4 => {
            for l in 2..=5 {
                alpha.insert(l, vec![vec![0.05 * f64::from(l)], vec![-0.01]]);
            }
            CalibrationCoefficients {
                alpha,
                beta: vec![vec![-0.02], vec![0.001]],
            }
        }
        ModelKind::Sur2dq1e3 => {
            for l in 2..=4 {
                alpha.insert(l, vec![vec![0.05 * f64::from(l), 0.01], vec![-0.01, 0.0]]);
            }
            CalibrationCoefficients {
                alpha,
                beta: vec![vec![-0.02, 0.005]],
            }
        }
    }
}

/// Synthetic dataset for `model`.
///
/// For the spin-branched model the negative branch's time grid is shifted,
/// so tests can tell which branch served a call.
pub fn dataset(model: ModelKind) -> Result<SurrogateDataset> {
    let mut branches = BTreeMap::new();
    for key in model.branch_keys() {
        let offset = if *key == BranchKey::NegativeSpin { -10.0 } else { 0.0 };
        branches.insert(*key, branch(model, offset)?);
    }
    SurrogateDataset::new(model, branches, calibration(model))
}

pub fn dataset_1d() -> Result<SurrogateDataset> {
    dataset(ModelKind::Sur1dq1e4)
}

pub fn dataset_2d() -> Result<SurrogateDataset> {
    dataset(ModelKind::Sur2dq1e3)
}

/// Wire-format JSON of [`dataset`].
pub fn dataset_json(model: ModelKind) -> Result<String> {
    export_json(&dataset(model)?)
        .map_err(|e| SurrogateError::dataset(format!("cannot serialize test dataset: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serde_compat::import_json;

    #[test]
    fn test_datasets_validate() {
        for model in ModelKind::ALL {
            let ds = dataset(model).unwrap();
            assert_eq!(ds.branches().len(), model.branch_keys().len());
            for branch in ds.branches().values() {
                assert_eq!(branch.modes.len(), model.available_modes().len());
                assert_eq!(branch.time.len(), SAMPLES);
            }
        }
    }

    #[test]
    fn test_json_reloads() {
        let json = dataset_json(ModelKind::Sur2dq1e3).unwrap();
        assert_eq!(import_json(&json).unwrap(), dataset_2d().unwrap());
    }

    #[test]
    fn test_grid_ends_away_from_zero() {
        let t = time_grid();
        assert_eq!(t[0], -100.0);
        assert_eq!(t[SAMPLES - 1], 50.0);
    }
}
