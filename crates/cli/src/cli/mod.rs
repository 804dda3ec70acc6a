// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use std::path::PathBuf;

use crate::help;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

pub use args::{NowArgs, OutputArgs, OutputFormat, ReportFields};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[derive(Parser)]
#[command(name = "rhsync")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Offline queue and report cache for the ReportHub client")]
#[command(
    long_about = "Offline queue and report cache for the ReportHub client.\n\n\
    Mutations made while offline are stored locally and replayed against the \
    ReportHub API once it is reachable again."
)]
#[command(after_help = help::examples())]
#[command(styles = help::styles())]
pub struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/reporthub/config.toml)
    #[arg(long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Treat the API as unreachable without probing
    #[arg(long, global = true)]
    pub offline: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Queue a mutation for replay
    #[command(subcommand)]
    Queue(QueueCommand),

    /// List pending actions in replay order
    Pending {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Replay pending actions now
    Drain {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Inspect or refresh the report cache
    #[command(subcommand)]
    Cache(CacheCommand),

    /// Push local drafts, refresh the cache, then drain
    Sync,

    /// Show connectivity, queue and cache state
    Status {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Stay in the foreground: follow connectivity and drain periodically
    Watch,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum QueueCommand {
    /// Queue a new report
    Create {
        /// Report title
        #[arg(long, short = 't', value_parser = non_empty_string)]
        title: String,

        #[command(flatten)]
        fields: ReportFields,

        #[command(flatten)]
        now: NowArgs,
    },

    /// Queue changes to an existing report
    Update {
        /// Report id
        id: i64,

        /// New title
        #[arg(long, short = 't', value_parser = non_empty_string)]
        title: Option<String>,

        #[command(flatten)]
        fields: ReportFields,

        /// New status (pending, approved, rejected)
        #[arg(long, short = 's')]
        status: Option<String>,

        #[command(flatten)]
        now: NowArgs,
    },

    /// Queue deletion of a report
    Delete {
        /// Report id
        id: i64,

        #[command(flatten)]
        now: NowArgs,
    },

    /// Queue a chat message
    Message {
        /// Recipient user id
        #[arg(long)]
        to: i64,

        /// Message text
        #[arg(value_parser = non_empty_string)]
        content: String,

        #[command(flatten)]
        now: NowArgs,
    },

    /// Remove a pending action without replaying it
    Drop {
        /// Pending action id
        id: i64,
    },

    /// Remove every pending action without replaying them
    Clear,
}

#[derive(Subcommand)]
pub enum CacheCommand {
    /// Show cached reports
    Show {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Fetch reports from the API and replace the cache
    Refresh {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Draft a report locally; the next sync pushes it
    Draft {
        /// Report title
        #[arg(long, short = 't', value_parser = non_empty_string)]
        title: String,

        #[command(flatten)]
        fields: ReportFields,
    },

    /// Empty the cache
    Clear,
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
