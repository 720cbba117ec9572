//! Base TextGenerator trait and supporting types.

use async_trait::async_trait;
use ng_protocol::prompt_models::Stage;
use thiserror::Error;

/// A single request to the text-generation provider.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The fully rendered prompt.
    pub prompt: String,

    /// The stage issuing the request (used for logging and by the mock provider).
    pub stage: Stage,

    /// JSON shape the response should follow. When set, the provider is
    /// asked for JSON output.
    pub schema_hint: Option<serde_json::Value>,
}

impl GenerationRequest {
    /// Create a new plain-text request.
    pub fn new(stage: Stage, prompt: String) -> Self {
        Self {
            prompt,
            stage,
            schema_hint: None,
        }
    }

    /// Request structured JSON output matching the given schema.
    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.schema_hint = Some(schema);
        self
    }

    pub fn wants_json(&self) -> bool {
        self.schema_hint.is_some()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider not available: {0}")]
    NotAvailable(String),
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Quota exhausted: {0}")]
    Quota(String),
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// The external text-generation service used by every pipeline stage.
///
/// Implementations do not retry; callers decide what a failure means.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &str;

    async fn check_availability(&self) -> bool;

    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError>;
}
