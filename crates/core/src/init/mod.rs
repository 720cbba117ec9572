//! Initialization module for creating `.netgenius` directory structures.
//!
//! `netgenius init` writes:
//! - Project configuration (`config.toml`)
//! - Editable copies of the stage prompts (`prompts/*.md`)
//!
//! # Example
//!
//! ```no_run
//! use ng_core::init::{InitOptions, generate_netgenius_structure};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = InitOptions {
//!     target_dir: PathBuf::from("."),
//!     force: false,
//!     minimal: false,
//! };
//!
//! let written = generate_netgenius_structure(options).await?;
//! println!("Wrote {} files", written.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod templates;

pub use error::{InitError, InitResult};
pub use generator::{generate_netgenius_structure, InitOptions};
pub use templates::{get_template, list_templates};
