//! The evaluation pipeline shared by both models.
//!
//! Stages run in a fixed order:
//!
//! 1. default the requested modes
//! 2. advise on inputs the model ignores
//! 3. resolve the mass scale
//! 4. reject invalid configuration
//! 5. advise when outside the training domain
//! 6. evaluate fits and reconstruct raw modes
//! 7. calibrate to NR, or advise that the result is 0PA only
//! 8. apply the mass-scale factor
//! 9. complete negative-m modes
//! 10. convert to physical units
//! 11. project on the sky and sum, when summation was requested

use crate::advisory::{Advisory, AdvisoryKind};
use crate::calibration::apply_calibration;
use crate::dataset::SurrogateDataset;
use crate::error::{ConfigError, Result};
use crate::harmonics::{project_modes, sum_projected};
use crate::mode::ModeIndex;
use crate::model::ModelKind;
use crate::params::{Extrinsics, MassScale, ParameterPoint};
use crate::reconstruct::reconstruct_modes;
use crate::symmetry::complete_negative_modes;
use crate::units::geometric_to_physical;
use crate::validate::{check_domain_of_validity, check_extrinsic_params, check_input_modes};
use crate::waveform::{SurrogateOutput, Waveform};

/// Inputs of one evaluation.
///
/// Every model accepts the same fields; those it does not use are reported
/// in an [`AdvisoryKind::IgnoredParameter`] advisory.
#[derive(Clone, Debug, PartialEq)]
pub struct SurrogateRequest {
    pub mass_ratio: f64,
    pub spin1: Option<f64>,
    pub spin2: Option<f64>,
    pub eccentricity: Option<f64>,
    pub mean_anomaly: Option<f64>,
    /// `None` means every available mode.
    pub modes: Option<Vec<ModeIndex>>,
    pub extrinsics: Extrinsics,
    pub include_negative_modes: bool,
    pub sum_modes: bool,
    /// `None` means the model default.
    pub max_l: Option<u32>,
    pub calibrated: bool,
    /// `"M"` or `"m1"`.
    pub mass_scale: String,
}

impl SurrogateRequest {
    pub fn new(mass_ratio: f64) -> Self {
        Self {
            mass_ratio,
            spin1: None,
            spin2: None,
            eccentricity: None,
            mean_anomaly: None,
            modes: None,
            extrinsics: Extrinsics::default(),
            include_negative_modes: true,
            sum_modes: false,
            max_l: None,
            calibrated: true,
            mass_scale: MassScale::Total.to_string(),
        }
    }

    pub fn with_spin1(mut self, spin: f64) -> Self {
        self.spin1 = Some(spin);
        self
    }

    pub fn with_modes(mut self, modes: Vec<ModeIndex>) -> Self {
        self.modes = Some(modes);
        self
    }

    pub fn with_mass_and_distance(mut self, total_mass: f64, distance_mpc: f64) -> Self {
        self.extrinsics.total_mass = Some(total_mass);
        self.extrinsics.distance_mpc = Some(distance_mpc);
        self
    }

    pub fn with_orientation(mut self, inclination: f64, orbital_phase: f64) -> Self {
        self.extrinsics.inclination = Some(inclination);
        self.extrinsics.orbital_phase = Some(orbital_phase);
        self
    }

    pub fn summed(mut self) -> Self {
        self.sum_modes = true;
        self
    }

    pub fn without_negative_modes(mut self) -> Self {
        self.include_negative_modes = false;
        self
    }

    pub fn uncalibrated(mut self) -> Self {
        self.calibrated = false;
        self
    }

    pub fn with_max_l(mut self, max_l: u32) -> Self {
        self.max_l = Some(max_l);
        self
    }

    pub fn with_mass_scale(mut self, mass_scale: impl Into<String>) -> Self {
        self.mass_scale = mass_scale.into();
        self
    }

    fn parameter_point(&self, model: ModelKind) -> ParameterPoint {
        match (model.takes_spin(), self.spin1) {
            (true, Some(spin)) => ParameterPoint::with_spin(self.mass_ratio, spin),
            _ => ParameterPoint::new(self.mass_ratio),
        }
    }

    /// Names of supplied inputs that `model` does not read, sorted.
    fn ignored_inputs(&self, model: ModelKind) -> Vec<&'static str> {
        let mut supplied = vec![];
        if self.spin1.is_some() && !model.takes_spin() {
            supplied.push("spin1");
        }
        for (name, value) in [
            ("spin2", self.spin2),
            ("ecc", self.eccentricity),
            ("ano", self.mean_anomaly),
        ] {
            if value.is_some() {
                supplied.push(name);
            }
        }
        supplied.sort_unstable();
        supplied
    }
}

/// Evaluate the surrogate held by `dataset`.
pub fn generate_surrogate(
    dataset: &SurrogateDataset,
    request: &SurrogateRequest,
) -> Result<SurrogateOutput> {
    let model = dataset.model();
    let mut advisories = Vec::new();

    let modes: Vec<ModeIndex> = request
        .modes
        .clone()
        .unwrap_or_else(|| model.available_modes().to_vec());

    let ignored = request.ignored_inputs(model);
    if !ignored.is_empty() {
        advisories.push(
            Advisory::new(
                AdvisoryKind::IgnoredParameter,
                format!(
                    "{model} only takes [{}] as input; ignoring extra params",
                    model.inputs().join(", ")
                ),
            )
            .with_value(ignored.join(", ")),
        );
    }

    let mass_scale: MassScale = request.mass_scale.parse()?;
    if request.calibrated && mass_scale != MassScale::Total {
        advisories.push(
            Advisory::new(
                AdvisoryKind::MassScaleIgnored,
                "mass scale is ignored when calibrated; NR calibration already uses total mass M",
            )
            .with_value(mass_scale),
        );
    }
    let q = request.mass_ratio;
    if !q.is_finite() || q <= 0.0 {
        return Err(ConfigError::InvalidMassRatio { value: q }.into());
    }
    let mass_factor = if !request.calibrated && mass_scale == MassScale::Total {
        1.0 / (1.0 + 1.0 / q)
    } else {
        1.0
    };

    check_input_modes(&modes, model.available_modes())?;
    check_extrinsic_params(&request.extrinsics, request.sum_modes)?;

    let point = request.parameter_point(model);
    let x = model.surrogate_point(&point);
    advisories.extend(check_domain_of_validity(&x, &model.bounds()));

    let branch = dataset.branch(model.branch_for(&point))?;
    let raw = reconstruct_modes(
        branch,
        &modes,
        &x,
        model.composition(),
        model.normalization(&point),
    )?;

    let mut set = if request.calibrated {
        let terms = model
            .calibration_formula()
            .evaluate(dataset.calibration(), &model.calibration_point(&point));
        let max_l = request.max_l.unwrap_or_else(|| model.default_max_l());
        let (calibrated, notes) = apply_calibration(raw, &terms, max_l);
        advisories.extend(notes);
        calibrated
    } else {
        advisories.push(Advisory::new(
            AdvisoryKind::Uncalibrated,
            "modes are NOT NR calibrated; the waveform only has the 0PA contribution",
        ));
        raw
    };

    if mass_factor != 1.0 {
        set.rescale(mass_factor, mass_factor);
    }

    if request.include_negative_modes {
        complete_negative_modes(&mut set)?;
    }

    if let Some((total_mass, distance)) = request.extrinsics.mass_and_distance() {
        geometric_to_physical(&mut set, total_mass, distance);
    }

    let waveform = match request.extrinsics.orientation() {
        Some((inclination, phase)) if request.sum_modes => {
            let projected = project_modes(&set, inclination, phase);
            Waveform::Summed {
                strain: sum_projected(&projected, set.len()),
            }
        }
        _ => Waveform::Modes { modes: set.modes },
    };

    Ok(SurrogateOutput {
        time: set.time,
        waveform,
        advisories,
    })
}
