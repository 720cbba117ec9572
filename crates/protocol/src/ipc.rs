//! Inter-process communication protocol.
//!
//! This module defines the message types for asynchronous communication
//! between a user interface and the Core (the orchestrator).
//!
//! The protocol follows an Operation/Event pattern:
//! - `Op`: Commands sent from the UI to Core
//! - `Event`: Status updates sent from Core to the UI
//!
//! Communication is asynchronous and channel-based, allowing the UI to
//! remain responsive while the core waits on the text-generation provider.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::message_models::Message;
use crate::session_models::{BusyState, Mode, Phase, SessionSnapshot};

/// Operations sent from the UI to the Core logic.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "submit",
///   "payload": { "text": "backup all switches" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Op {
    /// Submit a free-text request. Ignored while a run is in flight.
    Submit { text: String },

    /// Run a previously generated script through the execution simulator.
    ExecuteCode { code: String },

    /// Reset the transcript to the greeting for the current mode.
    ClearHistory,

    /// Select the pipeline variant for the next submission.
    SetMode { mode: Mode },

    /// Request a full session snapshot.
    GetSnapshot,

    /// Stop serving operations.
    Shutdown,
}

/// Why a submission or execute request was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub enum RejectReason {
    /// Input was empty or whitespace-only.
    EmptyInput,
    /// A run or an execution is already in flight.
    Busy,
}

/// Events sent from the Core logic to the UI.
///
/// ```json
/// {
///   "type": "phaseChanged",
///   "payload": { "run_id": "uuid-here", "phase": "EXECUTING" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A message was appended to the transcript.
    MessageAppended { message: Message },

    /// A placeholder message was removed from the transcript.
    MessageRemoved {
        #[ts(type = "string")]
        message_id: Uuid,
    },

    /// The transcript was replaced by a single greeting message.
    TranscriptReset { greeting: Message },

    /// One of the busy indicators changed.
    BusyChanged { busy: BusyState },

    /// The selected mode changed.
    ModeChanged { mode: Mode },

    /// A run was accepted and started.
    RunStarted {
        #[ts(type = "string")]
        run_id: Uuid,
        mode: Mode,
    },

    /// A run moved to a new phase.
    PhaseChanged {
        #[ts(type = "string")]
        run_id: Uuid,
        phase: Phase,
    },

    /// A run reached a terminal phase.
    RunFinished {
        #[ts(type = "string")]
        run_id: Uuid,
        phase: Phase,
    },

    /// A submission or execute request was ignored.
    SubmissionRejected { reason: RejectReason },

    /// Response to `Op::GetSnapshot`.
    Snapshot { snapshot: SessionSnapshot },
}
