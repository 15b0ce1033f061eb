//! Human summary and JSON document for one evaluation.

use std::fmt::Write;

use serde::Serialize;

use bhpt_core::{
    Advisory, Complex64, ModeIndex, ModelKind, SurrogateOutput, Waveform, format_modes,
};

#[derive(Serialize)]
pub struct Series {
    pub real: Vec<f64>,
    pub imag: Vec<f64>,
}

#[derive(Serialize)]
pub struct ModeSeries {
    pub l: u32,
    pub m: i32,
    #[serde(flatten)]
    pub series: Series,
}

#[derive(Serialize)]
pub struct Document<'a> {
    pub model: &'static str,
    pub time: &'a [f64],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modes: Option<Vec<ModeSeries>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strain: Option<Series>,
    pub advisories: &'a [Advisory],
}

fn split<'a, I>(values: I) -> Series
where
    I: IntoIterator<Item = &'a Complex64>,
{
    let (real, imag) = values.into_iter().map(|h| (h.re, h.im)).unzip();
    Series { real, imag }
}

pub fn document(model: ModelKind, output: &SurrogateOutput) -> Document<'_> {
    let (modes, strain) = match &output.waveform {
        Waveform::Modes { modes } => (
            Some(
                modes
                    .iter()
                    .map(|(mode, values)| ModeSeries {
                        l: mode.l,
                        m: mode.m,
                        series: split(values),
                    })
                    .collect(),
            ),
            None,
        ),
        Waveform::Summed { strain } => (None, Some(split(strain))),
    };
    Document {
        model: model.name(),
        time: &output.time,
        modes,
        strain,
        advisories: &output.advisories,
    }
}

fn peak(values: &[Complex64]) -> f64 {
    values.iter().map(|h| h.norm()).fold(0.0, f64::max)
}

pub fn summary(model: ModelKind, output: &SurrogateOutput) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "model:    {model}");
    let _ = writeln!(s, "samples:  {}", output.time.len());
    if let (Some(first), Some(last)) = (output.time.first(), output.time.last()) {
        let _ = writeln!(s, "time:     [{first:.6e}, {last:.6e}]");
    }
    match &output.waveform {
        Waveform::Modes { modes } => {
            let keys: Vec<ModeIndex> = modes.keys().copied().collect();
            let _ = writeln!(s, "modes:    {}", format_modes(&keys));
            if let Some(h22) = modes.get(&ModeIndex::new(2, 2)) {
                let _ = writeln!(s, "peak |h22|: {:.6e}", peak(h22));
            }
        }
        Waveform::Summed { strain } => {
            let _ = writeln!(s, "summed:   yes");
            let _ = writeln!(s, "peak |h|: {:.6e}", peak(strain));
        }
    }
    let _ = writeln!(s, "advisories: {}", output.advisories.len());
    s
}
