// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.
//!
//! These structs are used with `#[command(flatten)]` to reduce duplication
//! across commands that share common options.

use clap::{Args, ValueEnum};

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output format selection.
#[derive(Args, Clone, Debug, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

/// Replay right after queueing when the API is reachable.
#[derive(Args, Clone, Debug, Default)]
pub struct NowArgs {
    /// Drain the queue immediately if online
    #[arg(long)]
    pub now: bool,
}

/// Optional report fields shared by create and update.
#[derive(Args, Clone, Debug, Default)]
pub struct ReportFields {
    /// Longer description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Category (e.g. roads, lighting, waste)
    #[arg(long, short = 'c')]
    pub category: Option<String>,
}
