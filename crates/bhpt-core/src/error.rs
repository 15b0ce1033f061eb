//! Error types for surrogate evaluation.
//!
//! Configuration errors abort a call before any numeric work. Dataset errors
//! mean the loaded dataset cannot serve the request it was handed.

use thiserror::Error;

use crate::mode::{ModeIndex, format_modes};

/// Caller-side misconfiguration. Always fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("requested modes [{}] are NOT a subset of the available modes", format_modes(.modes))]
    UnsupportedModes { modes: Vec<ModeIndex> },

    #[error("both total mass and distance must be given, or neither")]
    IncompleteMassDistance,

    #[error("both orbital phase and inclination must be given, or neither")]
    IncompleteOrientation,

    #[error(
        "mode summation requested: total mass, distance, orbital phase and inclination should NOT be None"
    )]
    ModeSumWithoutExtrinsics,

    #[error("mass scale must be 'M' or 'm1', got '{value}'")]
    InvalidMassScale { value: String },

    #[error("mode {mode} has m <= 0; negative-m modes are generated from their m > 0 partner")]
    NonPositiveMode { mode: ModeIndex },

    #[error("mass ratio must be finite and positive, got {value}")]
    InvalidMassRatio { value: f64 },
}

/// Canonical error type for the evaluation pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurrogateError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("dataset error: {0}")]
    Dataset(String),
}

impl SurrogateError {
    pub fn dataset(message: impl Into<String>) -> Self {
        SurrogateError::Dataset(message.into())
    }

    pub fn is_config(&self) -> bool {
        matches!(self, SurrogateError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, SurrogateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_modes_names_every_mode() {
        let err = ConfigError::UnsupportedModes {
            modes: vec![ModeIndex::new(4, 4), ModeIndex::new(11, 3)],
        };
        let msg = err.to_string();
        assert!(msg.contains("(4,4)"));
        assert!(msg.contains("(11,3)"));
        assert!(msg.contains("NOT a subset"));
    }

    #[test]
    fn test_config_converts_into_surrogate_error() {
        let err: SurrogateError = ConfigError::IncompleteMassDistance.into();
        assert!(err.is_config());
        assert!(err.to_string().starts_with("configuration error"));
    }
}
