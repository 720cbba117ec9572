//! Provider kind enumeration for determining which adapter to use.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Gemini,
    Mock,
}

impl ProviderKind {
    /// Infer the provider kind from a model name.
    ///
    /// # Examples
    ///
    /// ```
    /// use ng_core::provider::ProviderKind;
    ///
    /// assert_eq!(ProviderKind::from_model_name("gemini-2.5-flash"), Some(ProviderKind::Gemini));
    /// assert_eq!(ProviderKind::from_model_name("mock"), Some(ProviderKind::Mock));
    /// assert_eq!(ProviderKind::from_model_name("gpt-5"), None);
    /// ```
    pub fn from_model_name(model: &str) -> Option<Self> {
        let model_lower = model.to_lowercase();

        if model_lower.contains("gemini") {
            Some(Self::Gemini)
        } else if model_lower == "mock" || model_lower.starts_with("mock-") {
            Some(Self::Mock)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::Mock => "Mock",
        }
    }
}
