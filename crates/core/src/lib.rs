//! # ng-core
//!
//! Request orchestration pipeline for NetGenius.
//!
//! This crate provides:
//! - Configuration loading from the `.netgenius/` directory
//! - The text-generation provider abstraction and its adapters
//! - Prompt templates for every stage
//! - The pipeline stages and the one-shot analyses
//! - The session orchestrator and its operation loop
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and management
//! - [`init`]: `.netgenius/` project initialization
//! - [`prompts`]: Prompt template library
//! - [`provider`]: `TextGenerator` trait and adapter implementations
//! - [`stages`]: Intent extraction, script synthesis, execution simulation,
//!   result synthesis and analysis
//! - [`session`]: Orchestrator, session state and the operation loop

pub mod config;
pub mod init;
pub mod prompts;
pub mod provider;
pub mod session;
pub mod stages;
