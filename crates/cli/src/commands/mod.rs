//! Subcommand implementations.

pub mod analyze;
pub mod ask;
pub mod init;
