//! `emi-predict` library crate.
//!
//! The binary (`emi`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future web front-end, batch scoring)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod artifacts;
pub mod cli;
pub mod domain;
pub mod error;
pub mod form;
pub mod predict;
pub mod report;
pub mod tui;
