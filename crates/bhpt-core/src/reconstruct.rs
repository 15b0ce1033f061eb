//! Raw mode reconstruction: fits → basis → channel series → complex mode.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::dataset::SurrogateBranch;
use crate::error::Result;
use crate::mode::ModeIndex;
use crate::waveform::WaveformModeSet;

const QUADRUPOLE: ModeIndex = ModeIndex::new(2, 2);

/// How a mode's two real channels combine into one complex series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Composition {
    /// h = A · exp(iφ) for every mode.
    AmplitudePhase,
    /// (2,2) as amplitude/phase; every other mode stored as coorbital
    /// real/imaginary parts and rotated to the inertial frame by
    /// exp(i·m·φ_orb), with φ_orb = φ₂₂ / 2.
    CoorbitalHigherModes,
}

pub fn amplitude_phase(amplitude: &[f64], phase: &[f64]) -> Vec<Complex64> {
    amplitude
        .iter()
        .zip(phase)
        .map(|(a, p)| Complex64::from_polar(*a, *p))
        .collect()
}

pub fn coorbital_to_inertial(re: &[f64], im: &[f64], m: i32, orbital_phase: &[f64]) -> Vec<Complex64> {
    let m = f64::from(m);
    re.iter()
        .zip(im)
        .zip(orbital_phase)
        .map(|((r, i), phi)| Complex64::new(*r, *i) * Complex64::from_polar(1.0, m * phi))
        .collect()
}

/// Evaluate `modes` of `branch` at surrogate point `x` in geometric units of
/// the primary mass, each multiplied by `normalization`.
pub fn reconstruct_modes(
    branch: &SurrogateBranch,
    modes: &[ModeIndex],
    x: &[f64],
    composition: Composition,
    normalization: f64,
) -> Result<WaveformModeSet> {
    let orbital_phase = match composition {
        Composition::CoorbitalHigherModes if modes.iter().any(|m| *m != QUADRUPOLE) => {
            let phase22 = branch.mode(&QUADRUPOLE)?.channels[1].evaluate(x);
            Some(phase22.into_iter().map(|p| 0.5 * p).collect::<Vec<_>>())
        }
        _ => None,
    };

    let mut set = WaveformModeSet::new(branch.time.clone());
    for mode in modes {
        let surrogate = branch.mode(mode)?;
        let first = surrogate.channels[0].evaluate(x);
        let second = surrogate.channels[1].evaluate(x);
        let series = match (&orbital_phase, *mode == QUADRUPOLE) {
            (Some(phi), false) => coorbital_to_inertial(&first, &second, mode.m, phi),
            _ => amplitude_phase(&first, &second),
        };
        set.insert(*mode, series.into_iter().map(|h| h * normalization).collect())?;
    }
    Ok(set)
}
