//! Transcript message models.
//!
//! A [`Message`] is one entry of the conversation transcript. Its
//! [`MessageKind`] decides how a UI renders it and which actions are
//! offered (only `Code` messages can be executed).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Who authored a transcript entry.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

/// What a transcript entry contains.
///
/// Serialized with an inline `type` tag:
/// ```json
/// { "type": "code", "language": "python" }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessageKind {
    /// Prose, status lines and error notices.
    PlainText,

    /// Plain text that is the final synthesized answer of an autonomous run.
    AgentResponse,

    /// Generated automation script. The only kind that can be executed.
    Code { language: String },

    /// Raw (simulated) device output.
    ExecutionOutput,

    /// The extracted plan, shown before any later stage runs.
    ReasoningTrace,
}

impl MessageKind {
    /// Whether the message body is rendered as prose.
    pub fn is_plain_text(&self) -> bool {
        matches!(self, Self::PlainText | Self::AgentResponse)
    }

    /// Short label used by renderers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PlainText => "text",
            Self::AgentResponse => "agent-response",
            Self::Code { .. } => "code",
            Self::ExecutionOutput => "execution-output",
            Self::ReasoningTrace => "reasoning-trace",
        }
    }
}

/// One transcript entry.
///
/// Messages are immutable once appended to a transcript; the only allowed
/// change is removal of a placeholder by its `id`.
#[derive(Serialize, Deserialize, Debug, Clone, TS)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[ts(type = "string")]
    pub id: Uuid,

    pub role: MessageRole,

    pub content: String,

    pub kind: MessageKind,

    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a message with a fresh id and the current timestamp.
    pub fn new(role: MessageRole, kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            kind,
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, MessageKind::PlainText, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, MessageKind::PlainText, content)
    }

    pub fn assistant_text(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, MessageKind::PlainText, content)
    }

    pub fn reasoning(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, MessageKind::ReasoningTrace, content)
    }

    pub fn code(language: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(
            MessageRole::Assistant,
            MessageKind::Code {
                language: language.into(),
            },
            content,
        )
    }

    pub fn execution_output(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, MessageKind::ExecutionOutput, content)
    }

    pub fn agent_response(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, MessageKind::AgentResponse, content)
    }

    /// Whether this is the final synthesized answer of an autonomous run.
    pub fn is_agent_response(&self) -> bool {
        self.kind == MessageKind::AgentResponse
    }

    /// Whether the "execute" action applies to this message.
    pub fn is_executable(&self) -> bool {
        matches!(self.kind, MessageKind::Code { .. })
    }

    /// Compare role, kind and content, ignoring identity and timestamp.
    pub fn same_entry(&self, other: &Message) -> bool {
        self.role == other.role && self.kind == other.kind && self.content == other.content
    }
}
