//! JSON serde for the dataset wire format.
//!
//! The wire format stores modes as a list of `{l, m, channels}` records and
//! bases as row-major arrays of basis vectors. Conversion to the typed
//! dataset validates every shape against the model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calibration::CalibrationCoefficients;
use crate::dataset::{
    BranchKey, ChannelSurrogate, ModeSurrogate, ReducedBasis, SurrogateBranch, SurrogateDataset,
};
use crate::error::{Result, SurrogateError};
use crate::fit::FitFunction;
use crate::mode::ModeIndex;
use crate::model::ModelKind;

#[derive(Serialize, Deserialize, Debug)]
pub struct WireDataset {
    pub model: ModelKind,
    pub branches: BTreeMap<BranchKey, WireBranch>,
    pub calibration: CalibrationCoefficients,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WireBranch {
    pub time: Vec<f64>,
    pub modes: Vec<WireMode>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WireMode {
    pub l: u32,
    pub m: i32,
    pub channels: Vec<WireChannel>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WireChannel {
    pub basis: Vec<Vec<f64>>,
    pub fits: Vec<FitFunction>,
}

impl WireChannel {
    fn into_channel(self) -> Result<ChannelSurrogate> {
        Ok(ChannelSurrogate {
            basis: ReducedBasis::from_rows(&self.basis)?,
            fits: self.fits,
        })
    }

    fn from_channel(channel: &ChannelSurrogate) -> Self {
        Self {
            basis: channel.basis.rows(),
            fits: channel.fits.clone(),
        }
    }
}

impl WireDataset {
    pub fn into_dataset(self) -> Result<SurrogateDataset> {
        let mut branches = BTreeMap::new();
        for (key, wire) in self.branches {
            let mut modes = BTreeMap::new();
            for wire_mode in wire.modes {
                let mode = ModeIndex::new(wire_mode.l, wire_mode.m);
                let [first, second]: [WireChannel; 2] =
                    wire_mode.channels.try_into().map_err(|c: Vec<WireChannel>| {
                        SurrogateError::dataset(format!(
                            "mode {mode} in branch '{}' has {} channels, expected 2",
                            key.as_str(),
                            c.len()
                        ))
                    })?;
                let surrogate = ModeSurrogate {
                    channels: [first.into_channel()?, second.into_channel()?],
                };
                if modes.insert(mode, surrogate).is_some() {
                    return Err(SurrogateError::dataset(format!(
                        "mode {mode} appears twice in branch '{}'",
                        key.as_str()
                    )));
                }
            }
            branches.insert(
                key,
                SurrogateBranch {
                    time: wire.time,
                    modes,
                },
            );
        }
        SurrogateDataset::new(self.model, branches, self.calibration)
    }

    pub fn from_dataset(dataset: &SurrogateDataset) -> Self {
        let branches = dataset
            .branches()
            .iter()
            .map(|(key, branch)| {
                let modes = branch
                    .modes
                    .iter()
                    .map(|(mode, surrogate)| WireMode {
                        l: mode.l,
                        m: mode.m,
                        channels: surrogate
                            .channels
                            .iter()
                            .map(WireChannel::from_channel)
                            .collect(),
                    })
                    .collect();
                (
                    *key,
                    WireBranch {
                        time: branch.time.clone(),
                        modes,
                    },
                )
            })
            .collect();
        Self {
            model: dataset.model(),
            branches,
            calibration: dataset.calibration().clone(),
        }
    }
}

/// Parse and validate a dataset from JSON.
pub fn import_json(json: &str) -> Result<SurrogateDataset> {
    let wire: WireDataset = serde_json::from_str(json)
        .map_err(|e| SurrogateError::dataset(format!("malformed dataset JSON: {e}")))?;
    wire.into_dataset()
}

/// Serialize a dataset to JSON.
pub fn export_json(dataset: &SurrogateDataset) -> std::result::Result<String, serde_json::Error> {
    serde_json::to_string(&WireDataset::from_dataset(dataset))
}
