//! Integration tests for the Orchestrator.
//!
//! These tests drive complete runs against scripted providers and verify:
//! - The manual and autonomous pipelines append the expected messages
//! - Phases and busy flags move in the documented order
//! - Failures end the run with exactly one error message
//! - At most one run is ever in flight
//! - Clear and mode switching reset the transcript only when they should

mod common;

use common::*;
use ng_core::provider::{MockProvider, ProviderError};
use ng_core::session::{ExecuteOutcome, SubmitOutcome, INITIAL_GREETING};
use ng_protocol::ipc::{Event, RejectReason};
use ng_protocol::message_models::{MessageKind, MessageRole};
use ng_protocol::session_models::{BusyState, Mode, Phase};
use std::time::Duration;

async fn wait_until_busy(orchestrator: &ng_core::session::Orchestrator) {
    for _ in 0..200 {
        if orchestrator.snapshot().await.busy.is_busy() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("orchestrator never became busy");
}

#[tokio::test]
async fn test_manual_run_produces_reasoning_and_code() {
    let provider = manual_success_provider();
    let (orchestrator, mut rx) = create_orchestrator(provider.clone(), Mode::Manual);

    let outcome = orchestrator.submit("backup the config of 10.0.0.2").await;
    let report = match outcome {
        SubmitOutcome::Accepted(report) => report,
        other => panic!("Expected accepted run, got {:?}", other),
    };
    assert_eq!(report.mode, Mode::Manual);
    assert_eq!(report.phase, Phase::Done);

    let snapshot = orchestrator.snapshot().await;
    let messages = snapshot.transcript.messages();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0].content, INITIAL_GREETING);

    assert_eq!(messages[1].role, MessageRole::User);
    assert_eq!(messages[1].content, "backup the config of 10.0.0.2");

    assert_eq!(messages[2].kind, MessageKind::ReasoningTrace);
    assert!(messages[2].content.contains("• Target IP: 10.0.0.2"));
    assert!(messages[2].content.contains("• Commands: show running-config"));

    assert_eq!(
        messages[3].kind,
        MessageKind::Code {
            language: "python".to_string()
        }
    );
    assert!(messages[3].is_executable());
    assert!(!messages[3].content.contains("```"));
    assert!(messages[3].content.starts_with("from netmiko import ConnectHandler"));

    assert_eq!(snapshot.phase, Phase::Done);
    assert_eq!(snapshot.busy, BusyState::default());
    assert_eq!(provider.call_count().await, 2);

    let events = drain_events(&mut rx);
    assert_eq!(
        phase_sequence(&events),
        vec![Phase::Extracting, Phase::Synthesizing, Phase::Done]
    );
    assert_run_finished(&events, Phase::Done);
}

#[tokio::test]
async fn test_autonomous_run_reports_plan_log_and_answer() {
    let provider = autonomous_success_provider();
    let (orchestrator, mut rx) = create_orchestrator(provider.clone(), Mode::Autonomous);

    let outcome = orchestrator.submit("check the ports on Core-Switch-01").await;
    assert!(matches!(
        outcome,
        SubmitOutcome::Accepted(report) if report.phase == Phase::Done && report.mode == Mode::Autonomous
    ));

    let snapshot = orchestrator.snapshot().await;
    let messages = snapshot.transcript.messages();
    assert_eq!(messages.len(), 5);

    assert_eq!(messages[2].kind, MessageKind::ReasoningTrace);
    assert!(messages[2].content.starts_with("Agent Plan:"));
    assert!(messages[2].content.contains("Core-Switch-01"));

    assert_eq!(messages[3].role, MessageRole::System);
    assert!(messages[3]
        .content
        .starts_with("> Executing commands on Core-Switch-01..."));
    assert!(messages[3].content.contains("bytes)"));

    assert!(messages[4].is_agent_response());
    assert_eq!(messages[4].content, "Gi0/1 is up; Gi0/2 is down.");

    let requests = provider.requests().await;
    assert_eq!(requests.len(), 3);
    assert!(requests[1].prompt.contains("connect_to('Core-Switch-01')"));
    assert!(requests[2].prompt.contains("Gi0/2  notconnect"));

    let events = drain_events(&mut rx);
    assert_eq!(
        phase_sequence(&events),
        vec![
            Phase::Extracting,
            Phase::Executing,
            Phase::Summarizing,
            Phase::Done
        ]
    );
}

#[tokio::test]
async fn test_autonomous_busy_flags_hand_over_to_executing() {
    let (orchestrator, mut rx) =
        create_orchestrator(autonomous_success_provider(), Mode::Autonomous);

    orchestrator.submit("check ports").await;

    let busy_changes: Vec<BusyState> = drain_events(&mut rx)
        .into_iter()
        .filter_map(|e| match e {
            Event::BusyChanged { busy } => Some(busy),
            _ => None,
        })
        .collect();

    assert_eq!(
        busy_changes,
        vec![
            BusyState {
                is_thinking: true,
                is_executing: false
            },
            BusyState {
                is_thinking: false,
                is_executing: true
            },
            BusyState::default(),
        ]
    );
}

#[tokio::test]
async fn test_manual_failure_on_second_call() {
    let (orchestrator, mut rx) =
        create_orchestrator(fails_on_second_call_provider(), Mode::Manual);

    let outcome = orchestrator.submit("what version am I running").await;
    assert!(matches!(
        outcome,
        SubmitOutcome::Accepted(report) if report.phase == Phase::Failed
    ));

    let snapshot = orchestrator.snapshot().await;
    let messages = snapshot.transcript.messages();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[2].kind, MessageKind::ReasoningTrace);
    assert_eq!(messages[3].kind, MessageKind::PlainText);
    assert_eq!(messages[3].content, "Error processing request.");
    assert!(messages.iter().all(|m| !m.is_executable()));

    assert_eq!(snapshot.phase, Phase::Failed);
    assert!(!snapshot.busy.is_busy());

    let events = drain_events(&mut rx);
    assert_run_finished(&events, Phase::Failed);
}

#[tokio::test]
async fn test_autonomous_failure_during_execution() {
    let (orchestrator, _rx) =
        create_orchestrator(fails_on_second_call_provider(), Mode::Autonomous);

    orchestrator.submit("check version").await;

    let snapshot = orchestrator.snapshot().await;
    let messages = snapshot.transcript.messages();
    assert_eq!(messages.len(), 4);
    assert!(messages[2].content.starts_with("Agent Plan:"));
    assert_eq!(messages[3].content, "Agent failed to complete the task.");
    assert_eq!(snapshot.phase, Phase::Failed);
    assert!(!snapshot.busy.is_busy());
}

#[tokio::test]
async fn test_autonomous_failure_during_summary_keeps_partial_transcript() {
    let provider = MockProvider::new(
        true,
        vec![
            Ok(intent_json(&["show clock"], Some("10.9.9.9"), "Time check")),
            Ok("10:00:00.000 UTC Mon Jan 1 2024".to_string()),
            Err(ProviderError::Quota("exhausted".to_string())),
        ],
    );
    let (orchestrator, _rx) = create_orchestrator(provider, Mode::Autonomous);

    orchestrator.submit("what time is it on 10.9.9.9").await;

    let snapshot = orchestrator.snapshot().await;
    let messages = snapshot.transcript.messages();
    assert_eq!(messages.len(), 5);
    assert!(messages[3].content.starts_with("> Executing commands on 10.9.9.9"));
    assert_eq!(messages[4].content, "Agent failed to complete the task.");
    assert!(!messages[4].is_agent_response());
    assert_eq!(snapshot.phase, Phase::Failed);
}

#[tokio::test]
async fn test_intent_fallback_does_not_fail_run() {
    let provider = MockProvider::new(
        true,
        vec![
            Ok("this is not json".to_string()),
            Ok("print('hello')".to_string()),
        ],
    );
    let (orchestrator, _rx) = create_orchestrator(provider, Mode::Manual);

    let outcome = orchestrator.submit("do something").await;
    assert!(matches!(
        outcome,
        SubmitOutcome::Accepted(report) if report.phase == Phase::Done
    ));

    let snapshot = orchestrator.snapshot().await;
    let messages = snapshot.transcript.messages();
    assert!(messages[2].content.contains("• Target IP: None"));
    assert!(messages[2].content.contains("• Intent: Failed to parse intent"));
    assert_eq!(messages[3].content, "print('hello')");
}

#[tokio::test]
async fn test_blank_submission_is_rejected() {
    let provider = MockProvider::canned();
    let (orchestrator, mut rx) = create_orchestrator(provider.clone(), Mode::Manual);

    let outcome = orchestrator.submit("   \n\t").await;
    assert_eq!(outcome, SubmitOutcome::Rejected(RejectReason::EmptyInput));

    assert_eq!(orchestrator.snapshot().await.transcript.len(), 1);
    assert_eq!(provider.call_count().await, 0);

    let events = drain_events(&mut rx);
    assert!(matches!(
        events.as_slice(),
        [Event::SubmissionRejected {
            reason: RejectReason::EmptyInput
        }]
    ));
}

#[tokio::test]
async fn test_at_most_one_run_under_concurrent_submissions() {
    let provider = MockProvider::canned().with_delay(Duration::from_millis(50));
    let (orchestrator, mut rx) = create_orchestrator(provider.clone(), Mode::Manual);

    let (first, second, third) = tokio::join!(
        orchestrator.submit("first"),
        orchestrator.submit("second"),
        orchestrator.submit("third"),
    );

    let outcomes = [first, second, third];
    let accepted = outcomes
        .iter()
        .filter(|o| matches!(o, SubmitOutcome::Accepted(_)))
        .count();
    let rejected = outcomes
        .iter()
        .filter(|o| matches!(o, SubmitOutcome::Rejected(RejectReason::Busy)))
        .count();
    assert_eq!(accepted, 1);
    assert_eq!(rejected, 2);

    let events = drain_events(&mut rx);
    assert_eq!(count_runs_started(&events), 1);

    let users = appended_messages(&events)
        .into_iter()
        .filter(|m| m.role == MessageRole::User)
        .count();
    assert_eq!(users, 1);

    // One run: intent + script
    assert_eq!(provider.call_count().await, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_at_most_one_run_across_tasks() {
    let provider = MockProvider::canned().with_delay(Duration::from_millis(30));
    let (orchestrator, mut rx) = create_orchestrator(provider, Mode::Autonomous);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move { orchestrator.submit(&format!("request {}", i)).await })
        })
        .collect();

    let mut accepted = 0;
    for handle in handles {
        if let SubmitOutcome::Accepted(_) = handle.await.unwrap() {
            accepted += 1;
        }
    }
    assert!(accepted >= 1);

    // Runs never overlap: every RunStarted is followed by its RunFinished
    // before the next RunStarted.
    let mut in_flight = false;
    for event in drain_events(&mut rx) {
        match event {
            Event::RunStarted { .. } => {
                assert!(!in_flight, "two runs overlapped");
                in_flight = true;
            }
            Event::RunFinished { .. } => in_flight = false,
            _ => {}
        }
    }
    assert!(!in_flight);
}

#[tokio::test]
async fn test_submission_rejected_while_executing() {
    let provider = MockProvider::canned().with_delay(Duration::from_millis(50));
    let (orchestrator, _rx) = create_orchestrator(provider, Mode::Manual);

    let exec = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.execute_code("print(1)").await })
    };
    wait_until_busy(&orchestrator).await;

    let outcome = orchestrator.submit("show vlan").await;
    assert_eq!(outcome, SubmitOutcome::Rejected(RejectReason::Busy));

    assert!(matches!(exec.await.unwrap(), ExecuteOutcome::Completed { .. }));
    assert!(!orchestrator.snapshot().await.busy.is_busy());
}

#[tokio::test]
async fn test_transcript_only_grows_across_runs() {
    let (orchestrator, _rx) = create_orchestrator(MockProvider::canned(), Mode::Manual);

    let mut previous = orchestrator.snapshot().await.transcript.messages().to_vec();
    for request in ["show vlan", "show arp", "show clock"] {
        orchestrator.submit(request).await;
        let current = orchestrator.snapshot().await.transcript.messages().to_vec();
        assert_transcript_extends(&previous, &current);
        previous = current;
    }
}

#[tokio::test]
async fn test_execute_code_replaces_placeholder_with_output() {
    let provider = MockProvider::new(true, vec![Ok("Switch#show version\nIOS 15.2".to_string())]);
    let (orchestrator, mut rx) = create_orchestrator(provider, Mode::Manual);

    let outcome = orchestrator.execute_code("print('x')").await;
    assert_eq!(
        outcome,
        ExecuteOutcome::Completed {
            output: "Switch#show version\nIOS 15.2".to_string()
        }
    );

    let snapshot = orchestrator.snapshot().await;
    let messages = snapshot.transcript.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].kind, MessageKind::ExecutionOutput);
    assert!(messages
        .iter()
        .all(|m| m.content != "Initializing Netmiko session..."));
    assert!(!snapshot.busy.is_busy());

    let events = drain_events(&mut rx);
    let placeholder = appended_messages(&events)
        .into_iter()
        .find(|m| m.content == "Initializing Netmiko session...")
        .expect("placeholder should have been shown");
    assert!(events.iter().any(|e| matches!(
        e,
        Event::MessageRemoved { message_id } if *message_id == placeholder.id
    )));
}

#[tokio::test]
async fn test_execute_code_failure_is_reported_as_output() {
    let provider = MockProvider::new(
        true,
        vec![Err(ProviderError::Transport("boom".to_string()))],
    );
    let (orchestrator, _rx) = create_orchestrator(provider, Mode::Manual);

    let outcome = orchestrator.execute_code("print('x')").await;
    match outcome {
        ExecuteOutcome::Failed { error } => {
            assert!(error.starts_with("Execution failed: "));
            assert!(error.contains("boom"));
        }
        other => panic!("Expected failure, got {:?}", other),
    }

    let snapshot = orchestrator.snapshot().await;
    let messages = snapshot.transcript.messages();
    assert_eq!(messages.len(), 2, "placeholder removed, error appended");
    assert_eq!(messages[1].kind, MessageKind::ExecutionOutput);
    assert!(!snapshot.busy.is_executing);
}

#[tokio::test]
async fn test_execute_code_rejects_blank_and_concurrent() {
    let provider = MockProvider::canned().with_delay(Duration::from_millis(50));
    let (orchestrator, _rx) = create_orchestrator(provider, Mode::Manual);

    assert_eq!(
        orchestrator.execute_code("  ").await,
        ExecuteOutcome::Rejected(RejectReason::EmptyInput)
    );

    let (first, second) = tokio::join!(
        orchestrator.execute_code("print(1)"),
        orchestrator.execute_code("print(2)")
    );
    assert!(matches!(first, ExecuteOutcome::Completed { .. }));
    assert_eq!(second, ExecuteOutcome::Rejected(RejectReason::Busy));
}

#[tokio::test]
async fn test_clear_history_is_idempotent() {
    let (orchestrator, _rx) = create_orchestrator(MockProvider::canned(), Mode::Manual);
    orchestrator.submit("show vlan").await;

    orchestrator.clear_history().await;
    let once = orchestrator.snapshot().await.transcript;
    orchestrator.clear_history().await;
    let twice = orchestrator.snapshot().await.transcript;

    assert_eq!(once.len(), 1);
    assert_eq!(twice.len(), 1);
    assert!(once.messages()[0].same_entry(&twice.messages()[0]));
    assert_eq!(
        twice.messages()[0].content,
        "Script Mode Ready. Ask me to write code."
    );
}

#[tokio::test]
async fn test_mode_switch_while_idle_resets_transcript() {
    let (orchestrator, mut rx) = create_orchestrator(MockProvider::canned(), Mode::Manual);
    orchestrator.submit("show vlan").await;
    drain_events(&mut rx);

    orchestrator.set_mode(Mode::Autonomous).await;

    let snapshot = orchestrator.snapshot().await;
    assert_eq!(snapshot.mode, Mode::Autonomous);
    assert_eq!(snapshot.transcript.len(), 1);
    assert_eq!(
        snapshot.transcript.messages()[0].content,
        "Agent Mode Ready. Ask me to perform a task."
    );

    let events = drain_events(&mut rx);
    assert!(matches!(
        events.as_slice(),
        [
            Event::ModeChanged {
                mode: Mode::Autonomous
            },
            Event::TranscriptReset { .. }
        ]
    ));

    // Selecting the current mode again changes nothing
    orchestrator.set_mode(Mode::Autonomous).await;
    assert!(drain_events(&mut rx).is_empty());
}

#[tokio::test]
async fn test_mode_switch_mid_run_applies_to_next_submission() {
    let provider = MockProvider::canned().with_delay(Duration::from_millis(40));
    let (orchestrator, _rx) = create_orchestrator(provider, Mode::Manual);

    let run = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.submit("show vlan").await })
    };
    wait_until_busy(&orchestrator).await;

    orchestrator.set_mode(Mode::Autonomous).await;

    let report = match run.await.unwrap() {
        SubmitOutcome::Accepted(report) => report,
        other => panic!("Expected accepted run, got {:?}", other),
    };
    assert_eq!(report.mode, Mode::Manual);
    assert_eq!(report.phase, Phase::Done);

    let snapshot = orchestrator.snapshot().await;
    assert_eq!(snapshot.mode, Mode::Autonomous);
    assert!(
        snapshot
            .transcript
            .messages()
            .iter()
            .any(|m| m.is_executable()),
        "in-flight manual run should still append its script"
    );

    let next = orchestrator.submit("show arp").await;
    assert!(matches!(
        next,
        SubmitOutcome::Accepted(report) if report.mode == Mode::Autonomous
    ));
}
