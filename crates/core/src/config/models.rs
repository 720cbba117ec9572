//! Configuration models that aggregate all settings.
//!
//! This module provides the unified `AppConfig` structure that combines
//! global settings and prompt overrides into a single configuration object.

use ng_protocol::config_models::GlobalConfig;
use ng_protocol::prompt_models::PromptTemplate;

/// Unified application configuration loaded from the `.netgenius/` directory.
///
/// This structure aggregates all configuration sources:
/// - `config.toml`: Provider and session settings
/// - `prompts/*.md`: Prompt templates that replace the embedded defaults
///
/// # Example
///
/// ```rust,no_run
/// use ng_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Model: {}, {} prompt overrides",
///          config.global.provider.model,
///          config.prompts.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Global settings from `config.toml`.
    pub global: GlobalConfig,

    /// Prompt overrides loaded from `prompts/*.md`.
    pub prompts: Vec<PromptTemplate>,
}

impl AppConfig {
    /// Replace the configured model, e.g. from a `--model` flag.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.global.provider.model = model.into();
        self
    }
}
