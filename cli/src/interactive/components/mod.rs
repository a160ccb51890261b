//! UI components for interactive mode
//!
//! This module contains reusable UI components for the interactive interface.

pub mod header;
pub mod status_line;

pub use header::Header;
pub use status_line::StatusLine;
