//! Operation loop connecting a UI to the orchestrator.

use crate::session::orchestrator::Orchestrator;
use ng_protocol::ipc::Op;
use tokio::sync::mpsc::UnboundedReceiver;

/// Serve operations until `Op::Shutdown` or until the sender is dropped.
///
/// Every operation is accepted or rejected inline, in arrival order. For
/// `Submit` and `ExecuteCode` only the provider-bound part runs on its own
/// task, so the loop keeps accepting operations while a run is in flight.
pub async fn serve(orchestrator: Orchestrator, mut op_rx: UnboundedReceiver<Op>) {
    while let Some(op) = op_rx.recv().await {
        tracing::debug!(?op, "received op");
        match op {
            Op::Submit { text } => {
                if let Ok(run) = orchestrator.begin(&text).await {
                    let orchestrator = orchestrator.clone();
                    tokio::spawn(async move {
                        orchestrator.drive(run).await;
                    });
                }
            }
            Op::ExecuteCode { code } => {
                if let Ok(execution) = orchestrator.begin_execution(&code).await {
                    let orchestrator = orchestrator.clone();
                    tokio::spawn(async move {
                        orchestrator.drive_execution(execution).await;
                    });
                }
            }
            Op::ClearHistory => orchestrator.clear_history().await,
            Op::SetMode { mode } => orchestrator.set_mode(mode).await,
            Op::GetSnapshot => orchestrator.publish_snapshot().await,
            Op::Shutdown => {
                tracing::info!("session service shutting down");
                break;
            }
        }
    }
}
