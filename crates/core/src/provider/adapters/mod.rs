//! Provider adapter implementations.

mod gemini_adapter;
pub mod mock_provider;

pub use gemini_adapter::GeminiAdapter;
pub use mock_provider::MockProvider;
