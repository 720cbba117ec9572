//! Pipeline stages.
//!
//! Each stage renders its prompt, makes exactly one provider call and turns
//! the answer into a typed result. Stages never touch the transcript; the
//! orchestrator decides what a result or failure means for the session.

pub mod analysis;
pub mod error;
pub mod intent;
pub mod script;
pub mod simulator;
pub mod summary;

pub use analysis::Analyst;
pub use error::{ParseError, StageError, StageResult};
pub use intent::IntentExtractor;
pub use script::{strip_code_fences, ScriptSynthesizer};
pub use simulator::{agent_script, ExecutionSimulator};
pub use summary::ResultSynthesizer;

use crate::config::AppConfig;
use crate::prompts::PromptLibrary;
use crate::provider::{ProviderError, ProviderFactory, TextGenerator};
use std::sync::Arc;

/// Provider and prompts shared by every stage.
#[derive(Clone)]
pub struct StageContext {
    pub provider: Arc<dyn TextGenerator>,
    pub prompts: Arc<PromptLibrary>,
}

impl StageContext {
    pub fn new(provider: Arc<dyn TextGenerator>, prompts: Arc<PromptLibrary>) -> Self {
        Self { provider, prompts }
    }

    /// Create the configured provider and merge prompt overrides over the
    /// embedded defaults.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let provider = ProviderFactory::create(&config.global.provider)?;
        tracing::info!(provider = provider.name(), "text-generation provider ready");
        let prompts = PromptLibrary::with_overrides(&config.prompts);
        Ok(Self::new(provider, Arc::new(prompts)))
    }
}
