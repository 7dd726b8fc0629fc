use crate::state::{OperationStatus, Slot};
use chrono::{DateTime, Utc};
use core_types::TargetParameters;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What happened inside the coordinator.
///
/// The `#[serde(tag = "type", content = "payload")]` attribute serializes each variant
/// as a flat JSON object, e.g.
/// `{ "type": "Dispatched", "payload": { "slot": "analysis", "generation": 3 } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum SessionEventKind {
    /// A new subject was selected and every stage was reset.
    SubjectChanged { symbol: String },
    /// The targets were replaced with their normalized values.
    TargetsChanged(TargetParameters),
    /// A slot went pending and its gateway call was started.
    Dispatched { slot: Slot, generation: u64 },
    /// A current-generation call resolved and its outcome was applied.
    Resolved {
        slot: Slot,
        generation: u64,
        status: OperationStatus,
    },
    /// A superseded call resolved and its outcome was dropped.
    StaleDiscarded {
        slot: Slot,
        generation: u64,
        current: u64,
    },
}

/// A timestamped event, tagged with the session that emitted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub timestamp: DateTime<Utc>,
    pub session_id: Uuid,
    pub kind: SessionEventKind,
}

impl SessionEvent {
    pub fn new(session_id: Uuid, kind: SessionEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            session_id,
            kind,
        }
    }
}
