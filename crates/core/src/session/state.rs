//! Session state and its event-emitting transitions.
//!
//! Every mutation of [`SessionState`] goes through one of the functions in
//! this module, which applies the change and then reports it on the event
//! channel. Callers hold the session lock while calling them, so events are
//! observed in the same order the state changed.

use ng_protocol::ipc::Event;
use ng_protocol::message_models::Message;
use ng_protocol::session_models::{BusyState, Mode, Phase, SessionSnapshot};
use ng_protocol::transcript_models::Transcript;
use tokio::sync::mpsc::Sender;
use uuid::Uuid;

/// Greeting shown before any mode-specific reset.
pub const INITIAL_GREETING: &str = "NetGenius AIOps initialized. Select a mode to begin.";

/// Mutable state of one chat session.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub mode: Mode,
    pub phase: Phase,
    pub busy: BusyState,
    pub transcript: Transcript,
}

impl SessionState {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            phase: Phase::Idle,
            busy: BusyState::default(),
            transcript: Transcript::with_greeting(Message::system(INITIAL_GREETING)),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode,
            phase: self.phase,
            busy: self.busy,
            transcript: self.transcript.clone(),
        }
    }
}

/// Append a message and emit `MessageAppended`. Returns the message id.
pub async fn append_message(
    state: &mut SessionState,
    message: Message,
    events_tx: &Sender<Event>,
) -> Uuid {
    let id = message.id;
    state.transcript.push(message.clone());
    let _ = events_tx.send(Event::MessageAppended { message }).await;
    id
}

/// Remove a placeholder message by id and emit `MessageRemoved`.
///
/// Does nothing if the message is already gone (e.g. after a clear).
pub async fn remove_message(state: &mut SessionState, id: Uuid, events_tx: &Sender<Event>) {
    if state.transcript.remove(id).is_some() {
        let _ = events_tx
            .send(Event::MessageRemoved { message_id: id })
            .await;
    }
}

/// Replace the transcript with the greeting for the current mode.
pub async fn reset_transcript(state: &mut SessionState, events_tx: &Sender<Event>) {
    let greeting = Message::system(state.mode.greeting());
    state.transcript.reset(greeting.clone());
    let _ = events_tx.send(Event::TranscriptReset { greeting }).await;
}

/// Update the busy flags, emitting `BusyChanged` only on an actual change.
pub async fn set_busy(state: &mut SessionState, busy: BusyState, events_tx: &Sender<Event>) {
    if state.busy == busy {
        return;
    }
    state.busy = busy;
    let _ = events_tx.send(Event::BusyChanged { busy }).await;
}

pub async fn set_phase(
    state: &mut SessionState,
    run_id: Uuid,
    phase: Phase,
    events_tx: &Sender<Event>,
) {
    state.phase = phase;
    let _ = events_tx.send(Event::PhaseChanged { run_id, phase }).await;
}

pub async fn set_mode(state: &mut SessionState, mode: Mode, events_tx: &Sender<Event>) {
    state.mode = mode;
    let _ = events_tx.send(Event::ModeChanged { mode }).await;
}
