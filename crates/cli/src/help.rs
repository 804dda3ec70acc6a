// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help text generation with colorization support.

use crate::colors;
use clap::builder::styling::Styles;

/// Generate clap Styles for help output.
pub fn styles() -> Styles {
    if !colors::should_colorize() {
        return Styles::plain();
    }

    use anstyle::{Ansi256Color, Color, Style};

    let header = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(colors::codes::HEADER))));
    let literal = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(colors::codes::LITERAL))));
    let context = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(colors::codes::CONTEXT))));

    Styles::styled()
        .header(header)
        .usage(header)
        .literal(literal)
        .placeholder(context)
        .valid(context)
}

/// Examples shown after the main help.
pub fn examples() -> String {
    format!(
        "{}
  {}    Queue a new report
  {}             Replay the queue now
  {}        Show cached reports
  {}             Follow connectivity and drain every 30s",
        colors::header("Examples:"),
        colors::literal("rhsync queue create --title \"Broken light\""),
        colors::literal("rhsync drain"),
        colors::literal("rhsync cache show"),
        colors::literal("rhsync watch"),
    )
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
