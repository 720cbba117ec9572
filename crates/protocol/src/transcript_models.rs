//! The ordered conversation transcript.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::message_models::Message;

/// Ordered, append-only record of all messages exchanged in a session.
///
/// Entries are only ever appended. The two exceptions are removal of a
/// placeholder by id and a full reset to a single greeting message.
#[derive(Serialize, Deserialize, Debug, Clone, Default, TS)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create a transcript holding a single greeting message.
    pub fn with_greeting(greeting: Message) -> Self {
        Self {
            messages: vec![greeting],
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Remove the message with the given id.
    ///
    /// Returns the removed message, or `None` if it is no longer present
    /// (for instance because the history was cleared meanwhile).
    pub fn remove(&mut self, id: Uuid) -> Option<Message> {
        let position = self.messages.iter().position(|m| m.id == id)?;
        Some(self.messages.remove(position))
    }

    /// Replace every entry with a single greeting message.
    pub fn reset(&mut self, greeting: Message) {
        self.messages.clear();
        self.messages.push(greeting);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The most recent message that can be executed.
    pub fn last_code(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.is_executable())
    }
}
