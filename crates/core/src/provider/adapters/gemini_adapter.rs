//! Gemini adapter implementation using the `generateContent` REST endpoint.
//!
//! Each request is a single-turn prompt. When the request carries a schema
//! hint the adapter asks for `application/json` output constrained to it.

use crate::provider::base::GenerationRequest;
use crate::provider::base::ProviderError;
use crate::provider::base::TextGenerator;
use async_trait::async_trait;
use ng_protocol::config_models::ProviderSettings;
use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;

/// Gemini adapter for text generation over HTTPS.
pub struct GeminiAdapter {
    model: String,
    endpoint: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl GeminiAdapter {
    /// Create a new Gemini adapter.
    ///
    /// The API key is read from the environment variable named by
    /// `settings.api_key_env`. A missing key is not an error here; it
    /// surfaces as `ProviderError::Authentication` on the first request.
    pub fn new(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ProviderError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            model: settings.model.clone(),
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            api_key,
            timeout: settings.request_timeout_secs.map(Duration::from_secs),
            client,
        })
    }

    /// Override the API key (mainly for tests and embedding).
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    fn build_body(&self, request: &GenerationRequest) -> GenerateContentRequest {
        let generation_config = request.schema_hint.as_ref().map(|schema| GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: schema.clone(),
        });

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.prompt.clone()),
                }],
            }],
            generation_config,
        }
    }

    async fn send(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            ProviderError::Authentication("gemini: API key is not configured".to_string())
        })?;

        let body = self.build_body(request);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key.as_str())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body_text = response
            .text()
            .await
            .map_err(|e| {
                ProviderError::Transport(format!(
                    "Failed to read response body: {}",
                    e.without_url()
                ))
            })?;

        if !(200..300).contains(&status) {
            return Err(parse_http_error(status, &body_text));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body_text).map_err(|e| {
            ProviderError::MalformedResponse(format!("Failed to parse response: {}", e))
        })?;

        parsed.text().ok_or_else(|| {
            ProviderError::MalformedResponse("Response contained no text candidates".to_string())
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiAdapter {
    fn name(&self) -> &str {
        &self.model
    }

    async fn check_availability(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        tracing::debug!(
            model = %self.model,
            stage = request.stage.name(),
            json = request.wants_json(),
            "sending generateContent request"
        );

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.send(request))
                .await
                .map_err(|_| {
                    ProviderError::Transport(format!(
                        "Request timed out after {}s",
                        limit.as_secs()
                    ))
                })?,
            None => self.send(request).await,
        }
    }
}

/// Map a non-success HTTP status to a provider error.
fn parse_http_error(status: u16, body: &str) -> ProviderError {
    let message = extract_error_message(body).unwrap_or_else(|| body.to_string());

    match status {
        401 | 403 => ProviderError::Authentication(format!("gemini: {}", message)),
        429 => ProviderError::Quota(message),
        _ if message.contains("RESOURCE_EXHAUSTED") => ProviderError::Quota(message),
        _ => ProviderError::Api { status, message },
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let parsed: ErrorEnvelope = serde_json::from_str(body).ok()?;
    let error = parsed.error?;
    match (error.status, error.message) {
        (Some(status), Some(message)) => Some(format!("{}: {}", status, message)),
        (None, Some(message)) => Some(message),
        (Some(status), None) => Some(status),
        (None, None) => None,
    }
}

// Wire types for the generateContent endpoint

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenate the text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        Some(text)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}
