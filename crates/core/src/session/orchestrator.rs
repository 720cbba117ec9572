//! The orchestrator: owns the session and sequences the pipeline stages.
//!
//! Two pipeline variants exist:
//!
//! ```text
//! manual:     extracting -> synthesizing -> done
//! autonomous: extracting -> executing -> summarizing -> done
//! ```
//!
//! Any stage after extraction may end the run in `failed`. Intent extraction
//! itself never fails the run.
//!
//! At most one run is in flight. The busy check and the flag update happen
//! under the session lock; the lock is released before every provider call.

use crate::config::AppConfig;
use crate::provider::ProviderError;
use crate::session::state::{self, SessionState};
use crate::stages::simulator::UNKNOWN_TARGET;
use crate::stages::{
    agent_script, ExecutionSimulator, IntentExtractor, ResultSynthesizer, ScriptSynthesizer,
    StageContext,
};
use ng_protocol::config_models::SessionSettings;
use ng_protocol::intent_models::Intent;
use ng_protocol::ipc::{Event, RejectReason};
use ng_protocol::message_models::Message;
use ng_protocol::session_models::{BusyState, Mode, Phase, SessionSnapshot};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::Instrument;
use uuid::Uuid;

pub const SCRIPT_FAILURE_MESSAGE: &str = "Error processing request.";
pub const AGENT_FAILURE_MESSAGE: &str = "Agent failed to complete the task.";
pub const EXECUTION_PLACEHOLDER: &str = "Initializing Netmiko session...";

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub run_id: Uuid,
    pub mode: Mode,
    pub phase: Phase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(RunReport),
    Rejected(RejectReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecuteOutcome {
    Completed { output: String },
    Failed { error: String },
    Rejected(RejectReason),
}

/// A submission that has been accepted but whose stages have not run yet.
#[derive(Debug, Clone)]
pub struct PendingRun {
    pub run_id: Uuid,
    pub mode: Mode,
    text: String,
}

/// An accepted execution request, holding the placeholder to remove.
#[derive(Debug, Clone)]
pub struct PendingExecution {
    placeholder_id: Uuid,
    code: String,
}

#[derive(Clone)]
pub struct Orchestrator {
    state: Arc<Mutex<SessionState>>,
    extractor: Arc<IntentExtractor>,
    scripter: Arc<ScriptSynthesizer>,
    simulator: Arc<ExecutionSimulator>,
    summarizer: Arc<ResultSynthesizer>,
    events_tx: mpsc::Sender<Event>,
}

impl Orchestrator {
    pub fn new(ctx: StageContext, settings: &SessionSettings, events_tx: mpsc::Sender<Event>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::new(settings.default_mode))),
            extractor: Arc::new(IntentExtractor::new(ctx.clone())),
            scripter: Arc::new(ScriptSynthesizer::new(
                ctx.clone(),
                settings.script_language.clone(),
            )),
            simulator: Arc::new(ExecutionSimulator::new(ctx.clone())),
            summarizer: Arc::new(ResultSynthesizer::new(ctx)),
            events_tx,
        }
    }

    /// Build the provider and prompt library from configuration.
    pub fn from_config(
        config: &AppConfig,
        events_tx: mpsc::Sender<Event>,
    ) -> Result<Self, ProviderError> {
        let ctx = StageContext::from_config(config)?;
        Ok(Self::new(ctx, &config.global.session, events_tx))
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.lock().await.snapshot()
    }

    /// Send the current snapshot on the event channel.
    pub async fn publish_snapshot(&self) {
        let state = self.state.lock().await;
        let _ = self
            .events_tx
            .send(Event::Snapshot {
                snapshot: state.snapshot(),
            })
            .await;
    }

    /// Submit a free-text request and run it to completion.
    ///
    /// Rejected without side effects on the transcript when the text is
    /// blank or a run or execution is in flight.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        match self.begin(text).await {
            Ok(run) => SubmitOutcome::Accepted(self.drive(run).await),
            Err(reason) => SubmitOutcome::Rejected(reason),
        }
    }

    /// Accept a submission: check-and-set the busy flags, record the user's
    /// message and fix the run's mode.
    ///
    /// The returned [`PendingRun`] is carried to [`Orchestrator::drive`].
    /// Operations applied after `begin` returns cannot change the run's mode.
    pub async fn begin(&self, text: &str) -> Result<PendingRun, RejectReason> {
        if text.trim().is_empty() {
            self.reject(RejectReason::EmptyInput).await;
            return Err(RejectReason::EmptyInput);
        }

        let Some((run_id, mode)) = self.begin_run(text).await else {
            self.reject(RejectReason::Busy).await;
            return Err(RejectReason::Busy);
        };

        Ok(PendingRun {
            run_id,
            mode,
            text: text.to_string(),
        })
    }

    /// Run the stages of an accepted submission and finish the run.
    pub async fn drive(&self, run: PendingRun) -> RunReport {
        let PendingRun { run_id, mode, text } = run;

        let span = tracing::info_span!("run", %run_id, ?mode);
        let phase = async {
            match mode {
                Mode::Manual => self.run_manual(run_id, &text).await,
                Mode::Autonomous => self.run_autonomous(run_id, &text).await,
            }
        }
        .instrument(span)
        .await;

        self.finish_run(run_id, phase).await;
        tracing::info!(%run_id, ?phase, "run finished");

        RunReport {
            run_id,
            mode,
            phase,
        }
    }

    /// Run a script through the execution simulator on the operator's request.
    ///
    /// A transient placeholder is shown while the call is outstanding and
    /// removed once it resolves. The result (or the error) is appended as
    /// execution output.
    pub async fn execute_code(&self, code: &str) -> ExecuteOutcome {
        match self.begin_execution(code).await {
            Ok(execution) => self.drive_execution(execution).await,
            Err(reason) => ExecuteOutcome::Rejected(reason),
        }
    }

    /// Accept an execution request: set `is_executing` and show the placeholder.
    pub async fn begin_execution(&self, code: &str) -> Result<PendingExecution, RejectReason> {
        if code.trim().is_empty() {
            self.reject(RejectReason::EmptyInput).await;
            return Err(RejectReason::EmptyInput);
        }

        let mut state = self.state.lock().await;
        if state.busy.is_busy() {
            drop(state);
            self.reject(RejectReason::Busy).await;
            return Err(RejectReason::Busy);
        }
        let busy = BusyState {
            is_thinking: false,
            is_executing: true,
        };
        state::set_busy(&mut state, busy, &self.events_tx).await;
        let placeholder_id = state::append_message(
            &mut state,
            Message::system(EXECUTION_PLACEHOLDER),
            &self.events_tx,
        )
        .await;

        Ok(PendingExecution {
            placeholder_id,
            code: code.to_string(),
        })
    }

    /// Simulate an accepted execution and append its output.
    pub async fn drive_execution(&self, execution: PendingExecution) -> ExecuteOutcome {
        tracing::info!("executing script on operator request");
        let result = self.simulator.simulate(&execution.code).await;

        let mut state = self.state.lock().await;
        state::remove_message(&mut state, execution.placeholder_id, &self.events_tx).await;

        let outcome = match result {
            Ok(output) => {
                state::append_message(
                    &mut state,
                    Message::execution_output(output.clone()),
                    &self.events_tx,
                )
                .await;
                ExecuteOutcome::Completed { output }
            }
            Err(err) => {
                tracing::warn!(error = %err, "execution failed");
                let error = format!("Execution failed: {}", err);
                state::append_message(
                    &mut state,
                    Message::execution_output(error.clone()),
                    &self.events_tx,
                )
                .await;
                ExecuteOutcome::Failed { error }
            }
        };

        state::set_busy(&mut state, BusyState::default(), &self.events_tx).await;
        outcome
    }

    /// Reset the transcript to the greeting for the current mode.
    pub async fn clear_history(&self) {
        let mut state = self.state.lock().await;
        state::reset_transcript(&mut state, &self.events_tx).await;
    }

    /// Select the mode for the next submission.
    ///
    /// When idle, the transcript is reset to the new mode's greeting. While a
    /// run is in flight only the selection changes; the running pipeline
    /// keeps the mode it started with.
    pub async fn set_mode(&self, mode: Mode) {
        let mut state = self.state.lock().await;
        if state.mode == mode {
            return;
        }

        state::set_mode(&mut state, mode, &self.events_tx).await;
        if !state.busy.is_busy() {
            state::reset_transcript(&mut state, &self.events_tx).await;
        }
    }

    async fn reject(&self, reason: RejectReason) {
        tracing::debug!(?reason, "submission rejected");
        let _ = self
            .events_tx
            .send(Event::SubmissionRejected { reason })
            .await;
    }

    /// Check-and-set the busy flag and record the user's message.
    async fn begin_run(&self, text: &str) -> Option<(Uuid, Mode)> {
        let mut state = self.state.lock().await;
        if state.busy.is_busy() {
            return None;
        }

        let run_id = Uuid::new_v4();
        let mode = state.mode;
        let busy = BusyState {
            is_thinking: true,
            is_executing: false,
        };

        state::set_busy(&mut state, busy, &self.events_tx).await;
        state::append_message(&mut state, Message::user(text), &self.events_tx).await;
        let _ = self.events_tx.send(Event::RunStarted { run_id, mode }).await;
        state::set_phase(&mut state, run_id, Phase::Extracting, &self.events_tx).await;

        tracing::info!(%run_id, ?mode, "run started");
        Some((run_id, mode))
    }

    async fn finish_run(&self, run_id: Uuid, phase: Phase) {
        let mut state = self.state.lock().await;
        state::set_phase(&mut state, run_id, phase, &self.events_tx).await;
        state::set_busy(&mut state, BusyState::default(), &self.events_tx).await;
        let _ = self.events_tx.send(Event::RunFinished { run_id, phase }).await;
    }

    async fn append(&self, message: Message) {
        let mut state = self.state.lock().await;
        state::append_message(&mut state, message, &self.events_tx).await;
    }

    async fn enter_phase(&self, run_id: Uuid, phase: Phase) {
        let mut state = self.state.lock().await;
        state::set_phase(&mut state, run_id, phase, &self.events_tx).await;
    }

    async fn run_manual(&self, run_id: Uuid, text: &str) -> Phase {
        let intent = self.extractor.extract(text).await;
        self.append(Message::reasoning(reasoning_trace(&intent))).await;

        self.enter_phase(run_id, Phase::Synthesizing).await;
        match self.scripter.synthesize(text, &intent).await {
            Ok(script) => {
                self.append(Message::code(self.scripter.language(), script))
                    .await;
                Phase::Done
            }
            Err(err) => {
                tracing::warn!(%run_id, error = %err, "script synthesis failed");
                self.append(Message::assistant_text(SCRIPT_FAILURE_MESSAGE))
                    .await;
                Phase::Failed
            }
        }
    }

    async fn run_autonomous(&self, run_id: Uuid, text: &str) -> Phase {
        let intent = self.extractor.extract(text).await;
        self.append(Message::reasoning(agent_plan(&intent))).await;

        {
            let mut state = self.state.lock().await;
            let busy = BusyState {
                is_thinking: false,
                is_executing: true,
            };
            state::set_busy(&mut state, busy, &self.events_tx).await;
            state::set_phase(&mut state, run_id, Phase::Executing, &self.events_tx).await;
        }

        let output = match self.simulator.simulate(&agent_script(&intent)).await {
            Ok(output) => output,
            Err(err) => {
                tracing::warn!(%run_id, error = %err, "autonomous execution failed");
                self.append(Message::assistant_text(AGENT_FAILURE_MESSAGE))
                    .await;
                return Phase::Failed;
            }
        };

        self.append(Message::system(execution_log(&intent, &output)))
            .await;

        self.enter_phase(run_id, Phase::Summarizing).await;
        match self.summarizer.summarize(text, &output).await {
            Ok(answer) => {
                self.append(Message::agent_response(answer)).await;
                Phase::Done
            }
            Err(err) => {
                tracing::warn!(%run_id, error = %err, "result synthesis failed");
                self.append(Message::assistant_text(AGENT_FAILURE_MESSAGE))
                    .await;
                Phase::Failed
            }
        }
    }
}

/// Reasoning shown after extraction in manual mode.
pub fn reasoning_trace(intent: &Intent) -> String {
    format!(
        "Logic:\n• Target IP: {}\n• Commands: {}\n• Intent: {}",
        intent.target_or("None"),
        intent.commands.join(", "),
        intent.explanation
    )
}

/// Plan shown after extraction in autonomous mode.
pub fn agent_plan(intent: &Intent) -> String {
    format!(
        "Agent Plan: I will connect to {} and run: [{}].",
        intent.target_or("the device"),
        intent.commands.join(", ")
    )
}

/// System log line appended once simulated output arrives.
pub fn execution_log(intent: &Intent, output: &str) -> String {
    format!(
        "> Executing commands on {}...\n> {}\n> Data received ({} bytes)",
        intent.target_or(UNKNOWN_TARGET),
        intent.commands.join(", "),
        output.len()
    )
}
