use events::{OperationStatus, SessionState, Slot};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum StageState {
    NotStarted,
    Loading,
    Complete,
    Failed(String),
}

impl StageState {
    pub fn label(&self) -> String {
        match self {
            StageState::NotStarted => "Not started".to_string(),
            StageState::Loading => "Loading".to_string(),
            StageState::Complete => "Complete".to_string(),
            StageState::Failed(message) => format!("Failed: {}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageLine {
    pub slot: Slot,
    pub title: &'static str,
    pub state: StageState,
}

/// Where each stage of the workflow stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusPanel {
    pub subject: String,
    pub stages: Vec<StageLine>,
    /// Model behind the current (or attempted) prediction.
    pub model: Option<&'static str>,
}

pub fn stage_title(slot: Slot) -> &'static str {
    match slot {
        Slot::Analysis => "Market Analysis",
        Slot::Prediction => "AI Prediction",
        Slot::Backtest => "Backtest",
    }
}

pub fn status_panel(state: &SessionState) -> StatusPanel {
    let stages = Slot::ALL
        .iter()
        .map(|&slot| {
            let stage = match state.status(slot) {
                OperationStatus::Idle => StageState::NotStarted,
                OperationStatus::Pending => StageState::Loading,
                OperationStatus::Success => StageState::Complete,
                OperationStatus::Failed => {
                    StageState::Failed(state.error(slot).unwrap_or_default().to_string())
                }
            };
            StageLine {
                slot,
                title: stage_title(slot),
                state: stage,
            }
        })
        .collect();

    StatusPanel {
        subject: state.subject.label.clone(),
        stages,
        model: state.prediction_mode.map(|mode| mode.model_label()),
    }
}
