//! Local mirror of the core session, rebuilt from events.

use ng_core::session::INITIAL_GREETING;
use ng_protocol::{
    BusyState, Event, Message, Mode, Phase, RejectReason, SessionSnapshot, Transcript,
};
use uuid::Uuid;

/// What the UI knows about the session.
///
/// The core is the only writer of session state; this view is updated
/// exclusively through [`SessionView::apply`].
#[derive(Debug, Clone)]
pub struct SessionView {
    pub mode: Mode,
    pub phase: Phase,
    pub busy: BusyState,
    pub transcript: Transcript,
    pub current_run: Option<Uuid>,
    /// Transient status line, cleared by the next run.
    pub notice: Option<String>,
}

impl SessionView {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            phase: Phase::Idle,
            busy: BusyState::default(),
            transcript: Transcript::with_greeting(Message::system(INITIAL_GREETING)),
            current_run: None,
            notice: None,
        }
    }

    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            mode: snapshot.mode,
            phase: snapshot.phase,
            busy: snapshot.busy,
            transcript: snapshot.transcript,
            current_run: None,
            notice: None,
        }
    }

    /// Fold one core event into the view.
    pub fn apply(&mut self, event: Event) {
        match event {
            Event::MessageAppended { message } => self.transcript.push(message),
            Event::MessageRemoved { message_id } => {
                self.transcript.remove(message_id);
            }
            Event::TranscriptReset { greeting } => self.transcript.reset(greeting),
            Event::BusyChanged { busy } => self.busy = busy,
            Event::ModeChanged { mode } => {
                self.mode = mode;
                self.notice = Some(format!("Switched to {}", mode.title()));
            }
            Event::RunStarted { run_id, .. } => {
                self.current_run = Some(run_id);
                self.notice = None;
            }
            Event::PhaseChanged { run_id, phase } => {
                if self.current_run == Some(run_id) {
                    self.phase = phase;
                }
            }
            Event::RunFinished { run_id, phase } => {
                if self.current_run == Some(run_id) {
                    self.phase = phase;
                    self.current_run = None;
                }
            }
            Event::SubmissionRejected { reason } => {
                self.notice = Some(rejection_notice(reason).to_string());
            }
            Event::Snapshot { snapshot } => {
                let current_run = self.current_run;
                *self = Self::from_snapshot(snapshot);
                self.current_run = current_run;
            }
        }
    }

    /// Body of the most recent generated script, if any.
    pub fn last_script(&self) -> Option<&str> {
        self.transcript.last_code().map(|m| m.content.as_str())
    }
}

fn rejection_notice(reason: RejectReason) -> &'static str {
    match reason {
        RejectReason::EmptyInput => "Nothing to send.",
        RejectReason::Busy => "Still working on the previous request.",
    }
}
