//! Geometric-to-physical unit conversion.

use crate::constants::{C_SI, MPC_SI, solar_mass_time};
use crate::waveform::WaveformModeSet;

/// Time unit G·M/c³ (s) and strain factor (G·M/c³)/d for a total mass in
/// solar masses and a distance in Mpc.
pub fn physical_scale(total_mass: f64, distance_mpc: f64) -> (f64, f64) {
    let time_unit = total_mass * solar_mass_time();
    let distance_seconds = distance_mpc * MPC_SI / C_SI;
    (time_unit, time_unit / distance_seconds)
}

/// Rescale time to seconds and strain to a dimensionless observer amplitude.
pub fn geometric_to_physical(set: &mut WaveformModeSet, total_mass: f64, distance_mpc: f64) {
    let (time_unit, strain_unit) = physical_scale(total_mass, distance_mpc);
    set.rescale(time_unit, strain_unit);
}
