//! Script synthesis (manual mode): request and intent to automation code.

use super::error::{ParseError, StageResult};
use super::StageContext;
use crate::provider::GenerationRequest;
use ng_protocol::intent_models::Intent;
use ng_protocol::prompt_models::Stage;

/// Remove Markdown code fence lines (```` ``` ```` with or without a language
/// tag) and trim the result.
pub fn strip_code_fences(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

pub struct ScriptSynthesizer {
    ctx: StageContext,
    language: String,
}

impl ScriptSynthesizer {
    pub fn new(ctx: StageContext, language: impl Into<String>) -> Self {
        Self {
            ctx,
            language: language.into(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Produce plain script text for `request`, using the intent as context.
    #[tracing::instrument(name = "synthesize_script", skip_all, fields(language = %self.language))]
    pub async fn synthesize(&self, request: &str, intent: &Intent) -> StageResult<String> {
        let context = serde_json::to_string(intent)
            .map_err(|e| ParseError::InvalidJson(e.to_string()))?;

        let prompt = self.ctx.prompts.render(
            Stage::ScriptSynthesis,
            &[
                ("request", request),
                ("context", &context),
                ("language", &self.language),
            ],
        )?;

        let text = self
            .ctx
            .provider
            .generate(&GenerationRequest::new(Stage::ScriptSynthesis, prompt))
            .await?;

        let script = strip_code_fences(&text);
        if script.is_empty() {
            return Err(ParseError::EmptyScript.into());
        }

        tracing::debug!(lines = script.lines().count(), "script synthesized");
        Ok(script)
    }
}
