//! `netgenius ask`: one request through the pipeline, outside the chat UI.

use crate::render::print_messages;
use color_eyre::eyre::bail;
use color_eyre::Result;
use ng_core::config::AppConfig;
use ng_core::session::{ExecuteOutcome, Orchestrator, SubmitOutcome};
use ng_protocol::{Event, Mode, Phase};
use tokio::sync::mpsc;

const EVENT_BUFFER: usize = 256;

#[derive(Debug, Clone, Copy, Default)]
pub struct AskOptions {
    pub agent: bool,
    pub execute: bool,
    pub json: bool,
}

pub async fn run(config: AppConfig, text: &str, options: AskOptions) -> Result<()> {
    let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
    let progress = tokio::spawn(log_progress(events_rx));

    let orchestrator = Orchestrator::from_config(&config, events_tx)?;
    if options.agent {
        orchestrator.set_mode(Mode::Autonomous).await;
    }
    let first_new = orchestrator.snapshot().await.transcript.len();

    let report = match orchestrator.submit(text).await {
        SubmitOutcome::Accepted(report) => report,
        SubmitOutcome::Rejected(reason) => bail!("Request rejected: {reason:?}"),
    };

    let mut execution_failed = false;
    if options.execute && report.mode == Mode::Manual && report.phase == Phase::Done {
        let script = orchestrator
            .snapshot()
            .await
            .transcript
            .last_code()
            .map(|m| m.content.clone());
        if let Some(script) = script {
            execution_failed = matches!(
                orchestrator.execute_code(&script).await,
                ExecuteOutcome::Failed { .. }
            );
        }
    }

    let snapshot = orchestrator.snapshot().await;
    drop(orchestrator);
    let _ = progress.await;

    let messages = snapshot
        .transcript
        .messages()
        .get(first_new..)
        .unwrap_or_default();
    if options.json {
        println!("{}", serde_json::to_string_pretty(messages)?);
    } else {
        print_messages(messages);
    }

    if report.phase == Phase::Failed {
        bail!("The request could not be completed");
    }
    if execution_failed {
        bail!("Script execution failed");
    }
    Ok(())
}

/// Mirror pipeline progress into the log until the session is dropped.
async fn log_progress(mut events_rx: mpsc::Receiver<Event>) {
    while let Some(event) = events_rx.recv().await {
        match event {
            Event::RunStarted { run_id, mode } => {
                tracing::info!(%run_id, ?mode, "run started");
            }
            Event::PhaseChanged { phase, .. } => tracing::info!(?phase, "phase"),
            Event::RunFinished { phase, .. } => tracing::info!(?phase, "run finished"),
            _ => {}
        }
    }
}
