//! Common test utilities shared by the integration tests.
//!
//! - Test fixtures (sample projects, intents, orchestrators)
//! - Scripted provider helpers
//! - Custom assertions over events and transcripts

pub mod assertions;
pub mod fixtures;
pub mod providers;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use providers::*;
