//! Chat session management.
//!
//! The [`Orchestrator`] owns the session state (mode, phase, busy flags and
//! transcript) and is the only thing that mutates it. UIs drive it through
//! [`serve`] with `Op`s and follow along through `Event`s.

pub mod orchestrator;
pub mod service;
pub mod state;

pub use orchestrator::{
    ExecuteOutcome, Orchestrator, PendingExecution, PendingRun, RunReport, SubmitOutcome,
};
pub use service::serve;
pub use state::{SessionState, INITIAL_GREETING};
