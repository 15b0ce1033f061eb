//! Structured, non-fatal fidelity advisories.
//!
//! Every pipeline stage returns its advisories next to its result. Nothing in
//! this crate logs; callers decide whether to surface, log, or drop them.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    /// A parameter lies outside the model's training domain.
    OutOfBounds,
    /// NR calibration was disabled; only the 0PA contribution is present.
    Uncalibrated,
    /// Some requested modes have no NR calibration coefficients.
    BeyondCalibrationCoverage,
    /// A parameter this model does not take was supplied and ignored.
    IgnoredParameter,
    /// A non-default mass scale was supplied while calibrating.
    MassScaleIgnored,
}

impl AdvisoryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AdvisoryKind::OutOfBounds => "out_of_bounds",
            AdvisoryKind::Uncalibrated => "uncalibrated",
            AdvisoryKind::BeyondCalibrationCoverage => "beyond_calibration_coverage",
            AdvisoryKind::IgnoredParameter => "ignored_parameter",
            AdvisoryKind::MassScaleIgnored => "mass_scale_ignored",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub message: String,
    /// The offending value, rendered for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Advisory {
    pub fn new(kind: AdvisoryKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl fmt::Display) -> Self {
        self.value = Some(value.to_string());
        self
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)?;
        if let Some(value) = &self.value {
            write!(f, " (value: {value})")?;
        }
        Ok(())
    }
}

/// Returns true if any advisory in `advisories` has the given kind.
pub fn has_kind(advisories: &[Advisory], kind: AdvisoryKind) -> bool {
    advisories.iter().any(|a| a.kind == kind)
}
