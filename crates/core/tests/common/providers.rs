//! Scripted provider responses for the pipeline scenarios.

use super::fixtures::intent_json;
use ng_core::provider::{MockProvider, ProviderError};

/// Manual run: intent, then a fenced script.
#[allow(dead_code)]
pub fn manual_success_provider() -> MockProvider {
    MockProvider::new(
        true,
        vec![
            Ok(intent_json(
                &["show running-config"],
                Some("10.0.0.2"),
                "Back up the running configuration",
            )),
            Ok("```python\nfrom netmiko import ConnectHandler\nprint('backup')\n```".to_string()),
        ],
    )
}

/// Autonomous run: intent for Core-Switch-01, simulated output, answer.
#[allow(dead_code)]
pub fn autonomous_success_provider() -> MockProvider {
    MockProvider::new(
        true,
        vec![
            Ok(intent_json(
                &["show interfaces status"],
                Some("Core-Switch-01"),
                "List interface status",
            )),
            Ok("Core-Switch-01#show interfaces status\nGi0/1  connected\nGi0/2  notconnect".to_string()),
            Ok("Gi0/1 is up; Gi0/2 is down.".to_string()),
        ],
    )
}

/// First call succeeds, second call fails with a transport error.
#[allow(dead_code)]
pub fn fails_on_second_call_provider() -> MockProvider {
    MockProvider::new(
        true,
        vec![
            Ok(intent_json(&["show version"], None, "Check version")),
            Err(ProviderError::Transport("connection reset".to_string())),
        ],
    )
}
