//! Terminal output abstraction and formatting utilities

use super::render::{LineStyle, StyledLine};

/// Trait to abstract over different output handles
pub trait OutputHandle {
    fn println<S: ToString>(&self, msg: S);
}

/// Plain process stdout, for headless commands
pub struct Stdout;

impl OutputHandle for Stdout {
    fn println<S: ToString>(&self, msg: S) {
        println!("{}", msg.to_string());
    }
}

/// ANSI color codes for terminal output
#[derive(Debug, Clone, Copy)]
pub enum AnsiColor {
    Gray,
    Green,
    Yellow,
    Cyan,
    Red,
    Bold,
}

/// Apply ANSI color formatting to text
pub fn apply_color(text: &str, color: AnsiColor) -> String {
    match color {
        AnsiColor::Gray => format!("\x1b[90m{}\x1b[0m", text),
        AnsiColor::Green => format!("\x1b[32m{}\x1b[0m", text),
        AnsiColor::Yellow => format!("\x1b[33m{}\x1b[0m", text),
        AnsiColor::Cyan => format!("\x1b[36m{}\x1b[0m", text),
        AnsiColor::Red => format!("\x1b[31m{}\x1b[0m", text),
        AnsiColor::Bold => format!("\x1b[1m{}\x1b[0m", text),
    }
}

fn color_for(style: LineStyle) -> Option<AnsiColor> {
    match style {
        LineStyle::Title => Some(AnsiColor::Bold),
        LineStyle::Heading => Some(AnsiColor::Cyan),
        LineStyle::Muted => Some(AnsiColor::Gray),
        LineStyle::Warning => Some(AnsiColor::Yellow),
        LineStyle::Error => Some(AnsiColor::Red),
        LineStyle::Success => Some(AnsiColor::Green),
        LineStyle::Normal | LineStyle::Row(_) => None,
    }
}

/// Write styled lines, with ANSI colors when `colorize` is set
pub fn print_lines<T: OutputHandle>(out: &T, lines: &[StyledLine], colorize: bool) {
    for line in lines {
        match color_for(line.style).filter(|_| colorize) {
            Some(color) => out.println(apply_color(&line.text, color)),
            None => out.println(&line.text),
        }
    }
}
