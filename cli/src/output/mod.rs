//! CLI output
//!
//! Page rendering shared by the headless commands and the interactive
//! console, plus terminal printing helpers.

pub mod render;
pub mod terminal;

pub use render::{render_form, render_not_found, render_page, table, LineStyle, StyledLine};
pub use terminal::{print_lines, Stdout};
