//! Result synthesis (autonomous mode): raw device output to a concise answer.

use super::error::StageResult;
use super::StageContext;
use crate::provider::GenerationRequest;
use ng_protocol::prompt_models::Stage;

/// Answer used when the provider returns nothing.
pub const EMPTY_SUMMARY: &str = "I processed the command but couldn't generate a summary.";

pub struct ResultSynthesizer {
    ctx: StageContext,
}

impl ResultSynthesizer {
    pub fn new(ctx: StageContext) -> Self {
        Self { ctx }
    }

    #[tracing::instrument(name = "synthesize_result", skip_all)]
    pub async fn summarize(&self, question: &str, output: &str) -> StageResult<String> {
        let prompt = self.ctx.prompts.render(
            Stage::ResultSynthesis,
            &[("question", question), ("output", output)],
        )?;

        let text = self
            .ctx
            .provider
            .generate(&GenerationRequest::new(Stage::ResultSynthesis, prompt))
            .await?;

        let answer = text.trim();
        if answer.is_empty() {
            return Ok(EMPTY_SUMMARY.to_string());
        }
        Ok(answer.to_string())
    }
}
