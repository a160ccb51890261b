//! Interactive mode implementation

pub mod app;
pub mod components;
pub mod pages;
pub mod state;

pub use app::{run_console, TerminalSurface};
