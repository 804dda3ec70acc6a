// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! rhsync - command-line host for the ReportHub offline sync manager.
//!
//! Mutations queued while offline live in a local SQLite store and are
//! replayed against the ReportHub API once it becomes reachable.
//!
//! # Main Components
//!
//! - [`Cli`] - argument parsing
//! - [`Config`] - `config.toml` loading and validation
//! - [`Error`] - errors surfaced to the user
//!
//! Each invocation builds an [`rh_sync::OfflineSyncManager`] from the config,
//! runs one command on a single-threaded runtime, then shuts the manager down.

mod cli;
pub mod colors;
mod commands;
pub mod config;
pub mod env;
pub mod error;
pub mod help;
mod host;
pub mod logging;

pub use cli::{CacheCommand, Cli, Command, OutputFormat, QueueCommand};
pub use config::Config;
pub use error::{Error, Result};

use clap::CommandFactory;
use clap_complete::generate;

use crate::host::{Host, Reach};

/// Run a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    if let Command::Completions { shell } = cli.command {
        generate(shell, &mut Cli::command(), "rhsync", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    logging::init(cli.verbose, config.log_file().as_deref());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async move {
        let host = Host::open(config, reach(&cli.command), cli.offline).await?;
        let result = execute(&host, cli.command, !cli.offline).await;
        host.close().await;
        result
    })
}

/// Commands that only read or edit the local store never probe the API.
fn reach(command: &Command) -> Reach {
    match command {
        Command::Queue(QueueCommand::Create { now, .. })
        | Command::Queue(QueueCommand::Update { now, .. })
        | Command::Queue(QueueCommand::Delete { now, .. })
        | Command::Queue(QueueCommand::Message { now, .. }) => {
            if now.now {
                Reach::Network
            } else {
                Reach::Local
            }
        }
        Command::Queue(_) | Command::Pending { .. } | Command::Completions { .. } => Reach::Local,
        Command::Cache(CacheCommand::Refresh { .. }) => Reach::Network,
        Command::Cache(_) => Reach::Local,
        Command::Drain { .. } | Command::Sync | Command::Status { .. } | Command::Watch => {
            Reach::Network
        }
    }
}

async fn execute(host: &Host, command: Command, probe_enabled: bool) -> Result<()> {
    let manager = &host.manager;
    match command {
        Command::Queue(cmd) => match cmd {
            QueueCommand::Create { title, fields, now } => {
                let action = commands::queue::create_action(title, fields)?;
                commands::queue::enqueue(manager, action, now.now).await
            }
            QueueCommand::Update {
                id,
                title,
                fields,
                status,
                now,
            } => {
                let action = commands::queue::update_action(id, title, fields, status)?;
                commands::queue::enqueue(manager, action, now.now).await
            }
            QueueCommand::Delete { id, now } => {
                let action = rh_core::Action::delete_report(id);
                commands::queue::enqueue(manager, action, now.now).await
            }
            QueueCommand::Message { to, content, now } => {
                let action = rh_core::Action::send_message(to, content);
                commands::queue::enqueue(manager, action, now.now).await
            }
            QueueCommand::Drop { id } => commands::queue::drop_action(manager, id).await,
            QueueCommand::Clear => commands::queue::clear(manager).await,
        },
        Command::Pending { output } => commands::pending::run(host, output.output).await,
        Command::Drain { output } => commands::drain::run(manager, output.output).await,
        Command::Cache(cmd) => match cmd {
            CacheCommand::Show { output } => commands::cache::show(manager, output.output).await,
            CacheCommand::Refresh { output } => {
                commands::cache::refresh(manager, output.output).await
            }
            CacheCommand::Draft { title, fields } => {
                commands::cache::draft(manager, title, fields).await
            }
            CacheCommand::Clear => commands::cache::clear(manager).await,
        },
        Command::Sync => commands::sync::run(manager).await,
        Command::Status { output } => commands::status::run(host, output.output).await,
        Command::Watch => commands::watch::run(host, probe_enabled).await,
        // Handled before the runtime starts.
        Command::Completions { .. } => Ok(()),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
