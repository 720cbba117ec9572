//! Global configuration models for `.netgenius/config.toml`.
//!
//! This module defines the structure of the project configuration file that
//! selects the text-generation provider and session defaults.

use serde::Deserialize;
use serde::Serialize;
use ts_rs::TS;

use crate::session_models::Mode;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_SCRIPT_LANGUAGE: &str = "python";

/// Represents global settings from `.netgenius/config.toml`.
///
/// # Example
///
/// ```toml
/// # .netgenius/config.toml
/// [provider]
/// model = "gemini-2.5-flash"
/// api_key_env = "GEMINI_API_KEY"
///
/// [session]
/// default_mode = "autonomous"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, TS)]
pub struct GlobalConfig {
    #[serde(default)]
    pub provider: ProviderSettings,

    #[serde(default)]
    pub session: SessionSettings,
}

/// Text-generation provider settings.
#[derive(Serialize, Deserialize, Debug, Clone, TS)]
pub struct ProviderSettings {
    /// Model name. Names containing `gemini` select the Gemini client;
    /// `mock` selects the offline canned provider.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generative language API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Per-request deadline in seconds. Unset means no deadline.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            request_timeout_secs: None,
        }
    }
}

/// Session defaults.
#[derive(Serialize, Deserialize, Debug, Clone, TS)]
pub struct SessionSettings {
    #[serde(default)]
    pub default_mode: Mode,

    /// Language tag attached to generated script messages.
    #[serde(default = "default_script_language")]
    pub script_language: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_mode: Mode::default(),
            script_language: default_script_language(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_script_language() -> String {
    DEFAULT_SCRIPT_LANGUAGE.to_string()
}
