//! Prompt templates for every provider call.
//!
//! Defaults are embedded from `templates/prompts/` and may be replaced per
//! stage by files in `.netgenius/prompts/`.

pub mod library;

pub use library::{parse_prompt_markdown, render_template, PromptError, PromptLibrary};
