//! TUI widgets.

pub mod composer;
pub mod status_bar;
pub mod transcript_view;

pub use composer::Composer;
pub use transcript_view::TranscriptView;
