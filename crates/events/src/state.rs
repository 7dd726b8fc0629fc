use core_types::{
    AnalysisPayload, BacktestPayload, PredictionMode, PredictionPayload, Subject,
    TargetParameters,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// One of the three remote operations the coordinator sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Analysis,
    Prediction,
    Backtest,
}

impl Slot {
    /// All slots, in dependency order.
    pub const ALL: [Slot; 3] = [Slot::Analysis, Slot::Prediction, Slot::Backtest];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Analysis => "analysis",
            Slot::Prediction => "prediction",
            Slot::Backtest => "backtest",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Slot::Analysis => 0,
            Slot::Prediction => 1,
            Slot::Backtest => 2,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The tag of an [`OperationResult`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    Idle,
    Pending,
    Success,
    Failed,
}

/// The state of one remote operation.
///
/// Successful payloads are shared behind an `Arc`, so cloning a snapshot never copies
/// the service's data.
#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum OperationResult<T> {
    /// Never requested for the current subject, or invalidated since.
    Idle,
    /// A request is in flight.
    Pending,
    Success(Arc<T>),
    Failed(String),
}

impl<T> OperationResult<T> {
    pub fn status(&self) -> OperationStatus {
        match self {
            OperationResult::Idle => OperationStatus::Idle,
            OperationResult::Pending => OperationStatus::Pending,
            OperationResult::Success(_) => OperationStatus::Success,
            OperationResult::Failed(_) => OperationStatus::Failed,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, OperationResult::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, OperationResult::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success(_))
    }

    /// The payload, when the operation succeeded.
    pub fn success(&self) -> Option<&T> {
        match self {
            OperationResult::Success(payload) => Some(payload),
            _ => None,
        }
    }

    /// The failure message, when the operation failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            OperationResult::Failed(message) => Some(message),
            _ => None,
        }
    }
}

// Manual impls: `Arc<T>` is cloneable for any `T`, so no `T: Clone` bound is wanted.
impl<T> Clone for OperationResult<T> {
    fn clone(&self) -> Self {
        match self {
            OperationResult::Idle => OperationResult::Idle,
            OperationResult::Pending => OperationResult::Pending,
            OperationResult::Success(payload) => OperationResult::Success(Arc::clone(payload)),
            OperationResult::Failed(message) => OperationResult::Failed(message.clone()),
        }
    }
}

impl<T> Default for OperationResult<T> {
    fn default() -> Self {
        OperationResult::Idle
    }
}

/// Everything the presentation layer needs to render one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub subject: Subject,
    pub targets: TargetParameters,
    pub analysis: OperationResult<AnalysisPayload>,
    pub prediction: OperationResult<PredictionPayload>,
    /// The model behind `prediction`: the one that produced the current forecast, or the
    /// one being (or last) attempted. `None` until a prediction has been requested.
    pub prediction_mode: Option<PredictionMode>,
    pub backtest: OperationResult<BacktestPayload>,
}

impl SessionState {
    /// A fresh session with every stage idle.
    pub fn new(subject: Subject, targets: TargetParameters) -> Self {
        Self {
            subject,
            targets,
            analysis: OperationResult::Idle,
            prediction: OperationResult::Idle,
            prediction_mode: None,
            backtest: OperationResult::Idle,
        }
    }

    pub fn status(&self, slot: Slot) -> OperationStatus {
        match slot {
            Slot::Analysis => self.analysis.status(),
            Slot::Prediction => self.prediction.status(),
            Slot::Backtest => self.backtest.status(),
        }
    }

    /// The failure message for a slot, if it failed.
    pub fn error(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Analysis => self.analysis.error(),
            Slot::Prediction => self.prediction.error(),
            Slot::Backtest => self.backtest.error(),
        }
    }

    /// True while any stage has a request in flight.
    pub fn is_busy(&self) -> bool {
        Slot::ALL
            .iter()
            .any(|slot| self.status(*slot) == OperationStatus::Pending)
    }
}

/// Per-slot storage indexed by [`Slot`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerSlot<V>([V; 3]);

impl<V> PerSlot<V> {
    pub fn get(&self, slot: Slot) -> &V {
        &self.0[slot.index()]
    }

    pub fn get_mut(&mut self, slot: Slot) -> &mut V {
        &mut self.0[slot.index()]
    }
}
