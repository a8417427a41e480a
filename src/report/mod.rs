//! Terminal formatting helpers shared by the CLI and TUI.

pub mod format;

pub use format::{format_artifact_summary, format_currency, format_record_preview};
