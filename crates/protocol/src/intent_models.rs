//! Structured intent models.
//!
//! An [`Intent`] is what the intent extractor pulls out of a free-text
//! operator request: the device commands to run, the target device, and a
//! short rationale.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// Explanation used when the provider response could not be turned into an intent.
pub const FALLBACK_EXPLANATION: &str = "Failed to parse intent";

/// Structured extraction result.
///
/// # Example
///
/// ```json
/// {
///   "commands": ["show interfaces status", "show version"],
///   "ip": "10.0.0.1",
///   "explanation": "Checking interface status"
/// }
/// ```
///
/// `commands` and `explanation` default to empty when absent or `null`, so
/// downstream stages never need to distinguish a missing list from an empty one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub commands: Vec<String>,

    /// Address or hostname of the target device.
    #[serde(default, alias = "ip", alias = "target_address")]
    pub target_address: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub explanation: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Intent {
    /// The degraded intent returned when extraction fails.
    pub fn fallback() -> Self {
        Self {
            commands: Vec::new(),
            target_address: None,
            explanation: FALLBACK_EXPLANATION.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }

    /// Target address, or the given placeholder when there is none.
    pub fn target_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.target_address.as_deref().unwrap_or(placeholder)
    }
}
