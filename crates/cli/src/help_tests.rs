// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn examples_list_common_commands() {
    let text = examples();
    for cmd in ["queue create", "drain", "cache show", "watch"] {
        assert!(text.contains(cmd), "missing example for {}", cmd);
    }
}

#[test]
fn examples_start_with_header() {
    assert!(examples().contains("Examples:"));
}

#[test]
fn help_renders_examples_and_commands() {
    use clap::CommandFactory;

    let mut cmd = crate::Cli::command();
    let help = cmd.render_long_help().to_string();
    assert!(help.contains("Examples:"));
    for sub in ["queue", "pending", "drain", "cache", "sync", "status", "watch"] {
        assert!(help.contains(sub), "missing subcommand {}", sub);
    }
}
