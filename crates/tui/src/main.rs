//! Standalone chat UI, configured from `.netgenius/` in the current directory.

use anyhow::Result;
use ng_core::config::load_config;
use ng_tui::logging::{default_log_dir, init_file_logging};
use ng_tui::run_app;

#[tokio::main]
async fn main() -> Result<()> {
    let root = std::env::current_dir()?;
    let _log_guard = init_file_logging(&default_log_dir(&root))?;

    let config = load_config(&root).await?;
    run_app(config).await
}
