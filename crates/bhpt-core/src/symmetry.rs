//! Negative-m modes from their m > 0 partners.

use crate::error::ConfigError;
use crate::waveform::WaveformModeSet;

/// Add h(l, −m) = (−1)^l · conj(h(l, m)) for every mode in `set`.
///
/// Every input key must have m ≥ 1. The check runs before anything is
/// inserted, so a failed call leaves `set` untouched.
pub fn complete_negative_modes(set: &mut WaveformModeSet) -> Result<(), ConfigError> {
    if let Some(mode) = set.modes.keys().find(|m| !m.is_positive()) {
        return Err(ConfigError::NonPositiveMode { mode: *mode });
    }

    let mirrored: Vec<_> = set
        .modes
        .iter()
        .map(|(mode, series)| {
            let sign = if mode.l % 2 == 0 { 1.0 } else { -1.0 };
            let partner = series.iter().map(|h| h.conj() * sign).collect::<Vec<_>>();
            (mode.mirrored(), partner)
        })
        .collect();
    set.modes.extend(mirrored);
    Ok(())
}
