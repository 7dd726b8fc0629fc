use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which forecasting model the analytics service should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionMode {
    Standard,
    Advanced,
}

impl PredictionMode {
    /// The remote operation name this mode posts to.
    pub fn endpoint(&self) -> &'static str {
        match self {
            PredictionMode::Standard => "predict",
            PredictionMode::Advanced => "predict-advanced",
        }
    }

    /// Human-facing model name shown next to a forecast.
    pub fn model_label(&self) -> &'static str {
        match self {
            PredictionMode::Standard => "Prophet",
            PredictionMode::Advanced => "Advanced LSTM",
        }
    }
}

impl fmt::Display for PredictionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionMode::Standard => write!(f, "standard"),
            PredictionMode::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for PredictionMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "prophet" => Ok(PredictionMode::Standard),
            "advanced" | "lstm" => Ok(PredictionMode::Advanced),
            other => Err(CoreError::InvalidInput(
                "prediction mode".to_string(),
                other.to_string(),
            )),
        }
    }
}

/// The market scenario the analysis classified the subject into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    High,
    Low,
}

impl Scenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::High => "high",
            Scenario::Low => "low",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
