//! Test fixtures for creating sample configurations and sessions.

use ng_core::prompts::PromptLibrary;
use ng_core::provider::MockProvider;
use ng_core::session::Orchestrator;
use ng_core::stages::StageContext;
use ng_protocol::config_models::SessionSettings;
use ng_protocol::ipc::Event;
use ng_protocol::session_models::Mode;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;

/// Large enough that no test blocks on a full event channel.
pub const EVENT_BUFFER: usize = 1024;

/// Create a temporary project directory with `.netgenius` configuration.
///
/// The project uses the offline `mock` model and overrides the result
/// synthesis prompt. Returns a TempDir that must be kept alive for the
/// test duration.
#[allow(dead_code)]
pub fn create_test_project() -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let root = temp_dir.path();

    std::fs::create_dir_all(root.join(".netgenius/prompts"))?;

    let config_toml = r#"
[provider]
model = "mock"

[session]
default_mode = "autonomous"
script_language = "python"
"#;
    std::fs::write(root.join(".netgenius/config.toml"), config_toml)?;

    let summary_md = r#"---
name: terse-summary
stage: result-synthesis
description: Test override
---

TERSE ANSWER FOR "{{question}}":
{{output}}"#;
    std::fs::write(root.join(".netgenius/prompts/summary.md"), summary_md)?;

    Ok(temp_dir)
}

/// Intent JSON as the provider would return it.
#[allow(dead_code)]
pub fn intent_json(commands: &[&str], ip: Option<&str>, explanation: &str) -> String {
    serde_json::json!({
        "commands": commands,
        "ip": ip,
        "explanation": explanation,
    })
    .to_string()
}

#[allow(dead_code)]
pub fn session_settings(mode: Mode) -> SessionSettings {
    SessionSettings {
        default_mode: mode,
        ..SessionSettings::default()
    }
}

/// Orchestrator over the given provider with embedded prompts.
#[allow(dead_code)]
pub fn create_orchestrator(
    provider: MockProvider,
    mode: Mode,
) -> (Orchestrator, mpsc::Receiver<Event>) {
    let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
    let ctx = StageContext::new(Arc::new(provider), Arc::new(PromptLibrary::embedded()));
    let orchestrator = Orchestrator::new(ctx, &session_settings(mode), events_tx);
    (orchestrator, events_rx)
}
