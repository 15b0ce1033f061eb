//! Input checks run before any numeric work.

use crate::advisory::{Advisory, AdvisoryKind};
use crate::error::ConfigError;
use crate::mode::ModeIndex;
use crate::params::{DomainBounds, Extrinsics};

/// Fail if any requested mode is not modelled. Every offending mode is named.
pub fn check_input_modes(
    requested: &[ModeIndex],
    available: &[ModeIndex],
) -> Result<(), ConfigError> {
    let missing: Vec<ModeIndex> = requested
        .iter()
        .filter(|m| !available.contains(m))
        .copied()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::UnsupportedModes { modes: missing })
    }
}

/// Advisory for every component of `x` outside `bounds`. Never fails.
pub fn check_domain_of_validity(x: &[f64], bounds: &DomainBounds) -> Vec<Advisory> {
    bounds
        .violations(x)
        .into_iter()
        .map(|i| {
            let name = bounds.names.get(i).copied().unwrap_or("parameter");
            Advisory::new(
                AdvisoryKind::OutOfBounds,
                format!(
                    "{name} = {} is outside bounds [{}, {}]; the surrogate is extrapolating",
                    x[i], bounds.min[i], bounds.max[i]
                ),
            )
            .with_value(x[i])
        })
        .collect()
}

/// Enforce the pairing rules on extrinsic parameters.
pub fn check_extrinsic_params(extrinsics: &Extrinsics, mode_sum: bool) -> Result<(), ConfigError> {
    if extrinsics.total_mass.is_some() != extrinsics.distance_mpc.is_some() {
        return Err(ConfigError::IncompleteMassDistance);
    }
    if extrinsics.orbital_phase.is_some() != extrinsics.inclination.is_some() {
        return Err(ConfigError::IncompleteOrientation);
    }
    if mode_sum && !extrinsics.is_complete() {
        return Err(ConfigError::ModeSumWithoutExtrinsics);
    }
    Ok(())
}
