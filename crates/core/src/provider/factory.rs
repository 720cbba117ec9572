//! Provider factory for creating text generators from configuration.

use crate::provider::adapters::GeminiAdapter;
use crate::provider::adapters::MockProvider;
use crate::provider::base::ProviderError;
use crate::provider::base::TextGenerator;
use crate::provider::provider_kind::ProviderKind;
use ng_protocol::config_models::ProviderSettings;
use std::sync::Arc;

/// Factory for creating provider instances based on configuration.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a text generator from provider settings.
    ///
    /// The model name decides the adapter:
    /// - Gemini models → `GeminiAdapter`
    /// - `mock` → `MockProvider` with canned responses
    ///
    /// Any other model name is rejected with `ProviderError::NotAvailable`.
    pub fn create(settings: &ProviderSettings) -> Result<Arc<dyn TextGenerator>, ProviderError> {
        match ProviderKind::from_model_name(&settings.model) {
            Some(ProviderKind::Gemini) => Ok(Arc::new(GeminiAdapter::new(settings)?)),
            Some(ProviderKind::Mock) => Ok(Arc::new(MockProvider::canned())),
            None => Err(ProviderError::NotAvailable(format!(
                "Unsupported model '{}'",
                settings.model
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(model: &str) -> ProviderSettings {
        ProviderSettings {
            model: model.to_string(),
            api_key_env: "NG_TEST_UNSET_GEMINI_KEY".to_string(),
            ..ProviderSettings::default()
        }
    }

    #[test]
    fn test_factory_creates_gemini_adapter() {
        let provider = ProviderFactory::create(&settings("gemini-2.5-flash")).unwrap();
        assert_eq!(provider.name(), "gemini-2.5-flash");
    }

    #[tokio::test]
    async fn test_factory_creates_mock_provider() {
        let provider = ProviderFactory::create(&settings("mock")).unwrap();
        assert_eq!(provider.name(), "mock");
        assert!(provider.check_availability().await);
    }

    #[test]
    fn test_factory_rejects_unknown_model() {
        let result = ProviderFactory::create(&settings("llama-3"));
        assert!(matches!(result, Err(ProviderError::NotAvailable(_))));
    }
}
