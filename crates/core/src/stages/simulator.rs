//! Execution simulation: a stand-in for a real device session.

use super::error::StageResult;
use super::StageContext;
use crate::provider::GenerationRequest;
use ng_protocol::intent_models::Intent;
use ng_protocol::prompt_models::Stage;

/// Output used when the provider returns nothing.
pub const EMPTY_EXECUTION_OUTPUT: &str = "Execution finished.";

/// Target written into the auto-execution script when the intent has none.
pub const UNKNOWN_TARGET: &str = "unknown-device";

/// Build the auto-execution script the autonomous pipeline runs for an intent.
pub fn agent_script(intent: &Intent) -> String {
    let commands = serde_json::to_string(&intent.commands).unwrap_or_else(|_| "[]".to_string());
    format!(
        "# Agent Auto-Execution\n\
         connect_to('{target}')\n\
         results = []\n\
         for cmd in {commands}:\n    \
         output = device.send_command(cmd)\n    \
         results.append(output)\n\
         print(results)",
        target = intent.target_or(UNKNOWN_TARGET),
        commands = commands,
    )
}

pub struct ExecutionSimulator {
    ctx: StageContext,
}

impl ExecutionSimulator {
    pub fn new(ctx: StageContext) -> Self {
        Self { ctx }
    }

    /// Produce plausible device output for `script`.
    #[tracing::instrument(name = "simulate_execution", skip_all, fields(script_len = script.len()))]
    pub async fn simulate(&self, script: &str) -> StageResult<String> {
        let prompt = self
            .ctx
            .prompts
            .render(Stage::ExecutionSimulation, &[("script", script)])?;

        let text = self
            .ctx
            .provider
            .generate(&GenerationRequest::new(Stage::ExecutionSimulation, prompt))
            .await?;

        if text.trim().is_empty() {
            return Ok(EMPTY_EXECUTION_OUTPUT.to_string());
        }
        Ok(text)
    }
}
