//! Waveform containers passed between pipeline stages.

use std::collections::BTreeMap;

use num_complex::Complex64;

use crate::advisory::Advisory;
use crate::error::{Result, SurrogateError};
use crate::mode::ModeIndex;

/// Complex mode series sharing one time array.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaveformModeSet {
    pub time: Vec<f64>,
    pub modes: BTreeMap<ModeIndex, Vec<Complex64>>,
}

impl WaveformModeSet {
    pub fn new(time: Vec<f64>) -> Self {
        Self {
            time,
            modes: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Add or replace a mode. The series must match the time array.
    pub fn insert(&mut self, mode: ModeIndex, series: Vec<Complex64>) -> Result<()> {
        if series.len() != self.time.len() {
            return Err(SurrogateError::dataset(format!(
                "mode {mode} has {} samples but the time grid has {}",
                series.len(),
                self.time.len()
            )));
        }
        self.modes.insert(mode, series);
        Ok(())
    }

    pub fn get(&self, mode: &ModeIndex) -> Option<&[Complex64]> {
        self.modes.get(mode).map(Vec::as_slice)
    }

    pub fn mode_indices(&self) -> Vec<ModeIndex> {
        self.modes.keys().copied().collect()
    }

    /// Multiply time by `time_factor` and every series by `strain_factor`.
    pub fn rescale(&mut self, time_factor: f64, strain_factor: f64) {
        for t in &mut self.time {
            *t *= time_factor;
        }
        for series in self.modes.values_mut() {
            for h in series.iter_mut() {
                *h *= strain_factor;
            }
        }
    }
}

/// Either individual modes or one complex strain series.
#[derive(Clone, Debug, PartialEq)]
pub enum Waveform {
    /// Per-mode series, projected onto the sky when an orientation was given.
    Modes {
        modes: BTreeMap<ModeIndex, Vec<Complex64>>,
    },
    /// h = h₊ − i h×.
    Summed { strain: Vec<Complex64> },
}

impl Waveform {
    pub fn is_summed(&self) -> bool {
        matches!(self, Waveform::Summed { .. })
    }

    pub fn modes(&self) -> Option<&BTreeMap<ModeIndex, Vec<Complex64>>> {
        match self {
            Waveform::Modes { modes } => Some(modes),
            Waveform::Summed { .. } => None,
        }
    }

    pub fn strain(&self) -> Option<&[Complex64]> {
        match self {
            Waveform::Summed { strain } => Some(strain),
            Waveform::Modes { .. } => None,
        }
    }
}

/// Result of one surrogate evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct SurrogateOutput {
    pub time: Vec<f64>,
    pub waveform: Waveform,
    pub advisories: Vec<Advisory>,
}

impl SurrogateOutput {
    pub fn mode(&self, l: u32, m: i32) -> Option<&[Complex64]> {
        self.waveform
            .modes()
            .and_then(|modes| modes.get(&ModeIndex::new(l, m)))
            .map(Vec::as_slice)
    }
}
