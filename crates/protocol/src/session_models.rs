//! Session state models.
//!
//! This module defines the structures a UI reads to render the assistant:
//! which pipeline variant is selected, where the current run is, and which
//! busy indicators are showing.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::transcript_models::Transcript;

/// Pipeline variant used for the next submission.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Intent → script for review → optional manual execution.
    #[default]
    Manual,

    /// Intent → automatic execution → natural-language answer.
    Autonomous,
}

impl Mode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Manual => Self::Autonomous,
            Self::Autonomous => Self::Manual,
        }
    }

    /// Greeting shown after the transcript is cleared in this mode.
    pub fn greeting(self) -> &'static str {
        match self {
            Self::Manual => "Script Mode Ready. Ask me to write code.",
            Self::Autonomous => "Agent Mode Ready. Ask me to perform a task.",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Manual => "Script Generator",
            Self::Autonomous => "Autonomous AI Agent",
        }
    }
}

/// Lifecycle phase of a pipeline run.
///
/// Manual runs progress Extracting -> Synthesizing -> Done.
/// Autonomous runs progress Extracting -> Executing -> Summarizing -> Done.
/// Any stage after extraction may end in Failed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// No run has started yet.
    #[default]
    Idle,

    Extracting,

    /// Producing a script (manual mode).
    Synthesizing,

    /// Simulating device execution (autonomous mode).
    Executing,

    /// Turning device output into an answer (autonomous mode).
    Summarizing,

    Done,

    Failed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// The two independent busy indicators.
///
/// `is_thinking` gates input submission while a request is being planned or
/// scripted; `is_executing` gates the "run script" action while a simulated
/// execution is outstanding. Submission is accepted only when both are false.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "camelCase")]
pub struct BusyState {
    pub is_thinking: bool,
    pub is_executing: bool,
}

impl BusyState {
    pub fn is_busy(&self) -> bool {
        self.is_thinking || self.is_executing
    }
}

/// Point-in-time view of a session, as rendered by a UI.
#[derive(Serialize, Deserialize, Debug, Clone, TS)]
pub struct SessionSnapshot {
    pub mode: Mode,
    pub phase: Phase,
    pub busy: BusyState,
    pub transcript: Transcript,
}
