//! One-shot analyses outside the chat pipeline: logs, security audit,
//! packet capture summaries and configuration comparison.

use super::error::StageResult;
use super::StageContext;
use crate::provider::GenerationRequest;
use ng_protocol::prompt_models::Stage;

pub const EMPTY_LOG_ANALYSIS: &str = "No analysis available.";
pub const EMPTY_AUDIT: &str = "Audit failed.";
pub const EMPTY_CAPTURE_ANALYSIS: &str = "Analysis complete.";
pub const EMPTY_COMPARISON: &str = "Comparison complete.";

pub struct Analyst {
    ctx: StageContext,
}

impl Analyst {
    pub fn new(ctx: StageContext) -> Self {
        Self { ctx }
    }

    /// Root causes and suggested fixes for device logs.
    pub async fn analyze_logs(&self, logs: &str) -> StageResult<String> {
        self.run(Stage::LogAnalysis, &[("logs", logs)], EMPTY_LOG_ANALYSIS)
            .await
    }

    /// Security audit of a configuration, with a 0-100 score and remediation.
    pub async fn audit_config(&self, config: &str) -> StageResult<String> {
        self.run(Stage::SecurityAudit, &[("config", config)], EMPTY_AUDIT)
            .await
    }

    /// Threat analysis of a packet-capture summary.
    pub async fn analyze_capture(&self, summary: &str) -> StageResult<String> {
        self.run(
            Stage::CaptureAnalysis,
            &[("summary", summary)],
            EMPTY_CAPTURE_ANALYSIS,
        )
        .await
    }

    /// Operational impact of moving from `old` to `new`.
    pub async fn compare_configs(&self, old: &str, new: &str) -> StageResult<String> {
        self.run(
            Stage::ConfigComparison,
            &[("old", old), ("new", new)],
            EMPTY_COMPARISON,
        )
        .await
    }

    #[tracing::instrument(name = "analysis", skip_all, fields(stage = stage.name()))]
    async fn run(
        &self,
        stage: Stage,
        vars: &[(&str, &str)],
        empty: &'static str,
    ) -> StageResult<String> {
        let prompt = self.ctx.prompts.render(stage, vars)?;
        let text = self
            .ctx
            .provider
            .generate(&GenerationRequest::new(stage, prompt))
            .await?;

        if text.trim().is_empty() {
            return Ok(empty.to_string());
        }
        Ok(text)
    }
}
