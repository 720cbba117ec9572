//! # ng-protocol
//!
//! Core protocol definitions and data models for netgenius.
//!
//! This crate defines all shared data structures used for:
//! - Transcript messages exchanged between the operator and the assistant
//! - Structured intents extracted from free-text requests
//! - Session state (mode, phase, busy flags) read by user interfaces
//! - Prompt template metadata and configuration file parsing
//! - Inter-process communication between the UI and Core
//!
//! ## Modules
//!
//! - [`message_models`]: Transcript messages and their kinds
//! - [`transcript_models`]: The ordered transcript container
//! - [`intent_models`]: Structured intent extraction results
//! - [`session_models`]: Mode, phase and busy-state tracking
//! - [`prompt_models`]: Pipeline stages and prompt template metadata
//! - [`config_models`]: Project configuration from config.toml
//! - [`ipc`]: Operations and Events for Core-UI communication
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, ts-rs, uuid and chrono
//! - TypeScript generation: All types derive `TS` for client compatibility
//! - Independent compilation: No dependencies on other netgenius crates

pub mod config_models;
pub mod intent_models;
pub mod ipc;
pub mod message_models;
pub mod prompt_models;
pub mod session_models;
pub mod transcript_models;

// Re-export all public types for convenience
pub use config_models::*;
pub use intent_models::*;
pub use ipc::*;
pub use message_models::*;
pub use prompt_models::*;
pub use session_models::*;
pub use transcript_models::*;
