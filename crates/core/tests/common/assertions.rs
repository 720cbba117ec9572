//! Custom assertion helpers over events and transcripts.

use ng_protocol::ipc::Event;
use ng_protocol::message_models::Message;
use ng_protocol::session_models::Phase;
use tokio::sync::mpsc::Receiver;

/// Collect every event currently queued on the channel.
#[allow(dead_code)]
pub fn drain_events(rx: &mut Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Messages appended, in order.
#[allow(dead_code)]
pub fn appended_messages(events: &[Event]) -> Vec<Message> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::MessageAppended { message } => Some(message.clone()),
            _ => None,
        })
        .collect()
}

/// Phases reported through `PhaseChanged`, in order.
#[allow(dead_code)]
pub fn phase_sequence(events: &[Event]) -> Vec<Phase> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::PhaseChanged { phase, .. } => Some(*phase),
            _ => None,
        })
        .collect()
}

#[allow(dead_code)]
pub fn count_runs_started(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, Event::RunStarted { .. }))
        .count()
}

/// Assert that `before` is an unchanged prefix of `after`.
#[allow(dead_code)]
pub fn assert_transcript_extends(before: &[Message], after: &[Message]) {
    assert!(
        after.len() > before.len(),
        "Transcript should grow: {} -> {}",
        before.len(),
        after.len()
    );
    for (old, new) in before.iter().zip(after) {
        assert_eq!(old.id, new.id, "Earlier message was replaced");
        assert!(old.same_entry(new), "Earlier message was modified");
    }
}

/// Assert that the last event of a run is `RunFinished` with the given phase.
#[allow(dead_code)]
pub fn assert_run_finished(events: &[Event], expected: Phase) {
    match events.last() {
        Some(Event::RunFinished { phase, .. }) => assert_eq!(*phase, expected),
        other => panic!("Last event should be RunFinished, got: {:?}", other),
    }
}
