//! Text-generation provider abstraction.
//!
//! This module provides the `TextGenerator` trait (Adapter Pattern) and
//! the factory that selects an implementation from configuration.

pub mod adapters;
pub mod base;
pub mod factory;
pub mod provider_kind;

pub use adapters::{GeminiAdapter, MockProvider};
pub use base::{GenerationRequest, ProviderError, TextGenerator};
pub use factory::ProviderFactory;
pub use provider_kind::ProviderKind;
