//! # ng-tui
//!
//! Terminal chat UI for NetGenius.
//!
//! The UI never touches session state directly. It sends `Op`s to the
//! session service from `ng-core` and redraws from the `Event`s it gets
//! back, both defined in `ng-protocol`.

pub mod app;
pub mod event;
pub mod event_handler;
pub mod logging;
pub mod session_view;
pub mod tui;
pub mod widgets;

pub use app::App;
pub use tui::Tui;

use anyhow::Result;
use ng_core::config::AppConfig;
use ng_core::session::{serve, Orchestrator};
use ng_protocol::Op;
use tokio::sync::mpsc;

/// Capacity of the core-to-UI event channel.
pub const EVENT_BUFFER: usize = 1024;

/// Start the session service and run the chat UI until the user quits.
pub async fn run_app(config: AppConfig) -> Result<()> {
    let (op_tx, op_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);

    let orchestrator = Orchestrator::from_config(&config, event_tx)?;
    let snapshot = orchestrator.snapshot().await;
    tracing::info!(
        model = %config.global.provider.model,
        mode = ?snapshot.mode,
        "starting chat session"
    );
    let service = tokio::spawn(serve(orchestrator, op_rx));

    let mut tui = Tui::init()?;
    let mut app = App::new(op_tx.clone(), event_rx, snapshot);
    let result = app.run(&mut tui).await;
    tui.restore()?;

    let _ = op_tx.send(Op::Shutdown);
    drop(app);
    let _ = service.await;
    tracing::info!("chat session closed");

    result
}
