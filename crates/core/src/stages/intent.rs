//! Intent extraction: free-text request to structured [`Intent`].

use super::error::{ParseError, StageResult};
use super::script::strip_code_fences;
use super::StageContext;
use crate::provider::GenerationRequest;
use ng_protocol::intent_models::Intent;
use ng_protocol::prompt_models::Stage;
use serde_json::json;

/// Response schema sent with the extraction request.
fn intent_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "commands": { "type": "ARRAY", "items": { "type": "STRING" } },
            "ip": { "type": "STRING", "nullable": true },
            "explanation": { "type": "STRING" }
        },
        "required": ["commands", "explanation"]
    })
}

/// Parse provider text into an intent. Code fences around the JSON are tolerated.
pub fn parse_intent(text: &str) -> Result<Intent, ParseError> {
    let body = strip_code_fences(text);
    if body.is_empty() {
        return Err(ParseError::InvalidJson("empty response".to_string()));
    }
    serde_json::from_str(&body).map_err(|e| ParseError::InvalidJson(e.to_string()))
}

pub struct IntentExtractor {
    ctx: StageContext,
}

impl IntentExtractor {
    pub fn new(ctx: StageContext) -> Self {
        Self { ctx }
    }

    /// Extract an intent from `query`.
    ///
    /// Never fails: provider and parse errors are logged and replaced by
    /// [`Intent::fallback`].
    #[tracing::instrument(name = "extract_intent", skip_all)]
    pub async fn extract(&self, query: &str) -> Intent {
        match self.try_extract(query).await {
            Ok(intent) => {
                tracing::debug!(commands = intent.commands.len(), "intent extracted");
                intent
            }
            Err(err) => {
                tracing::warn!(error = %err, "intent extraction failed, using fallback");
                Intent::fallback()
            }
        }
    }

    async fn try_extract(&self, query: &str) -> StageResult<Intent> {
        let prompt = self
            .ctx
            .prompts
            .render(Stage::IntentExtraction, &[("query", query)])?;
        let request =
            GenerationRequest::new(Stage::IntentExtraction, prompt).with_schema(intent_schema());

        let text = self.ctx.provider.generate(&request).await?;
        Ok(parse_intent(&text)?)
    }
}
