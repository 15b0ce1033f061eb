//! Calibrated ppBHPT gravitational-wave surrogate evaluation.
//!
//! Evaluates the BHPTNRSur1dq1e4 and BHPTNRSur2dq1e3 reduced-basis surrogates:
//! parametric fits give basis coefficients, bases give raw modes, and NR
//! calibration, symmetry completion, unit conversion and sky projection
//! follow in a fixed order.
//!
//! Zero I/O: the dataset arrives fully materialized and is only read.

pub mod advisory;
pub mod calibration;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod fit;
pub mod generate;
pub mod harmonics;
pub mod mode;
pub mod model;
pub mod params;
pub mod reconstruct;
pub mod serde_compat;
pub mod symmetry;
pub mod testkit;
pub mod units;
pub mod validate;
pub mod waveform;

pub use advisory::{Advisory, AdvisoryKind, has_kind};
pub use calibration::{CalibrationCoefficients, CalibrationFormula, CalibrationTerms, apply_calibration};
pub use constants::{C_SI, G_SI, MPC_SI, MSUN_SI, PC_SI, solar_mass_time};
pub use dataset::{
    BranchKey, ChannelSurrogate, ModeSurrogate, ReducedBasis, SurrogateBranch, SurrogateDataset,
};
pub use error::{ConfigError, Result, SurrogateError};
pub use fit::{BSpline, FitFamily, FitFunction, GprFit, LinearTrend, evaluate_fits};
pub use generate::{SurrogateRequest, generate_surrogate};
pub use harmonics::{project_modes, spin_weighted_ylm, sum_projected};
pub use mode::{ModeIndex, ParseModeError, format_modes};
pub use model::ModelKind;
pub use params::{DomainBounds, Extrinsics, MassScale, ParameterPoint};
pub use reconstruct::{Composition, reconstruct_modes};
pub use serde_compat::{export_json, import_json};
pub use symmetry::complete_negative_modes;
pub use units::{geometric_to_physical, physical_scale};
pub use validate::{check_domain_of_validity, check_extrinsic_params, check_input_modes};
pub use waveform::{SurrogateOutput, Waveform, WaveformModeSet};

pub use num_complex::Complex64;
