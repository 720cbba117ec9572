//! Mock provider implementation for tests and offline use.
//!
//! Responses are taken from a scripted queue first. Once the queue is empty
//! the provider answers with a canned response for the request's stage, so
//! the whole pipeline can run without network access (`model = "mock"`).

use crate::provider::base::GenerationRequest;
use crate::provider::base::ProviderError;
use crate::provider::base::TextGenerator;
use async_trait::async_trait;
use ng_protocol::prompt_models::Stage;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
pub struct MockProvider {
    available: bool,
    responses: Arc<Mutex<VecDeque<Result<String, ProviderError>>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
    delay: Option<Duration>,
}

impl MockProvider {
    pub fn new(available: bool, responses: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            available,
            responses: Arc::new(Mutex::new(responses.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Answers every stage with its canned response.
    pub fn canned() -> Self {
        Self::new(true, Vec::new())
    }

    pub fn unavailable() -> Self {
        Self::new(false, Vec::new())
    }

    /// Fails every call with a transport error.
    pub fn failing() -> Self {
        let responses = (0..16)
            .map(|_| Err(ProviderError::Transport("Mock failure".to_string())))
            .collect();
        Self::new(true, responses)
    }

    /// Wait this long before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far, in order.
    pub async fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    pub async fn push_response(&self, response: Result<String, ProviderError>) {
        self.responses.lock().await.push_back(response);
    }
}

#[async_trait]
impl TextGenerator for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn check_availability(&self) -> bool {
        self.available
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        self.requests.lock().await.push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if !self.available {
            return Err(ProviderError::NotAvailable(
                "Mock provider not available".to_string(),
            ));
        }

        let scripted = self.responses.lock().await.pop_front();
        match scripted {
            Some(response) => response,
            None => Ok(canned_response(request.stage).to_string()),
        }
    }
}

/// Offline answer for each stage.
pub fn canned_response(stage: Stage) -> &'static str {
    match stage {
        Stage::IntentExtraction => {
            r#"{"commands": ["show ip interface brief", "show version"], "ip": "192.168.1.1", "explanation": "Inspect interface status and software version"}"#
        }
        Stage::ScriptSynthesis => {
            "```python\nfrom netmiko import ConnectHandler\n\ndevice = {\n    \"device_type\": \"cisco_ios\",\n    \"host\": \"192.168.1.1\",\n    \"username\": \"admin\",\n    \"password\": \"password\",\n}\n\nwith ConnectHandler(**device) as conn:\n    print(conn.send_command(\"show ip interface brief\"))\n```"
        }
        Stage::ExecutionSimulation => {
            "Interface              IP-Address      OK? Method Status                Protocol\nGigabitEthernet0/0     192.168.1.1     YES NVRAM  up                    up\nGigabitEthernet0/1     unassigned      YES unset  administratively down down\nLoopback0              10.255.0.1      YES NVRAM  up                    up"
        }
        Stage::ResultSynthesis => {
            "GigabitEthernet0/0 and Loopback0 are up. GigabitEthernet0/1 is administratively down."
        }
        Stage::LogAnalysis => "No critical events found. One interface flap was recorded on Gi0/1.",
        Stage::SecurityAudit => {
            "Score: 72/100\n- Telnet is enabled on VTY lines. Remediation: `transport input ssh`"
        }
        Stage::CaptureAnalysis => "No DDoS patterns or cleartext credentials detected.",
        Stage::ConfigComparison => "+ ntp server 10.0.0.5\n- ntp server 10.0.0.4",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_scripted_then_canned() {
        let provider = MockProvider::new(true, vec![Ok("first".to_string())]);
        let request = GenerationRequest::new(Stage::ResultSynthesis, "p".to_string());

        assert_eq!(provider.generate(&request).await.unwrap(), "first");
        assert_eq!(
            provider.generate(&request).await.unwrap(),
            canned_response(Stage::ResultSynthesis)
        );
        assert_eq!(provider.call_count().await, 2);
    }

    #[tokio::test]
    async fn test_mock_provider_unavailable() {
        let provider = MockProvider::unavailable();
        assert!(!provider.check_availability().await);

        let request = GenerationRequest::new(Stage::LogAnalysis, "p".to_string());
        let result = provider.generate(&request).await;
        assert!(matches!(result, Err(ProviderError::NotAvailable(_))));
    }

    #[tokio::test]
    async fn test_mock_provider_failing() {
        let provider = MockProvider::failing();
        let request = GenerationRequest::new(Stage::IntentExtraction, "p".to_string());
        let result = provider.generate(&request).await;
        assert!(matches!(result, Err(ProviderError::Transport(_))));
    }

    #[tokio::test]
    async fn test_mock_provider_records_requests() {
        let provider = MockProvider::canned();
        let request = GenerationRequest::new(Stage::SecurityAudit, "audit this".to_string());
        provider.generate(&request).await.unwrap();

        let requests = provider.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].stage, Stage::SecurityAudit);
        assert_eq!(requests[0].prompt, "audit this");
    }

    #[test]
    fn test_canned_intent_is_valid_json() {
        let value: serde_json::Value =
            serde_json::from_str(canned_response(Stage::IntentExtraction)).unwrap();
        assert!(value["commands"].is_array());
    }
}
