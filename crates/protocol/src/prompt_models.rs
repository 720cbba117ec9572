//! Prompt template models for `.netgenius/prompts/*.md`.
//!
//! Every call to the text-generation provider is issued by a [`Stage`] and
//! built from a [`PromptTemplate`]. Templates are Markdown files with YAML
//! front matter; the body is the prompt text with `{{placeholder}}` slots.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The pipeline or analysis stage that issues a provider call.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    IntentExtraction,
    ScriptSynthesis,
    ExecutionSimulation,
    ResultSynthesis,
    LogAnalysis,
    SecurityAudit,
    CaptureAnalysis,
    ConfigComparison,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::IntentExtraction,
        Stage::ScriptSynthesis,
        Stage::ExecutionSimulation,
        Stage::ResultSynthesis,
        Stage::LogAnalysis,
        Stage::SecurityAudit,
        Stage::CaptureAnalysis,
        Stage::ConfigComparison,
    ];

    /// Kebab-case name, matching the `stage` front matter value.
    pub fn name(self) -> &'static str {
        match self {
            Self::IntentExtraction => "intent-extraction",
            Self::ScriptSynthesis => "script-synthesis",
            Self::ExecutionSimulation => "execution-simulation",
            Self::ResultSynthesis => "result-synthesis",
            Self::LogAnalysis => "log-analysis",
            Self::SecurityAudit => "security-audit",
            Self::CaptureAnalysis => "capture-analysis",
            Self::ConfigComparison => "config-comparison",
        }
    }
}

/// A prompt template definition.
///
/// # Example
///
/// ```markdown
/// ---
/// name: intent
/// stage: intent-extraction
/// description: Parse the operator request into commands and a target
/// ---
///
/// You are a Network Automation Assistant. Parse the user's intent.
/// User Query: "{{query}}"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, TS)]
pub struct PromptTemplate {
    pub name: String,

    pub stage: Stage,

    #[serde(default)]
    pub description: String,

    /// The Markdown body, not part of the front matter.
    #[serde(skip)]
    pub body: String,
}
