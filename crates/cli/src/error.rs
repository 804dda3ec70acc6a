// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors surfaced by `rhsync` commands.
///
/// Errors provide user-friendly messages with hints for common problems.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("config file not found: {0}\n  hint: omit --config to use defaults, or create the file")]
    ConfigNotFound(String),

    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error("nothing to update\n  hint: pass at least one of --title, --description, --category, --status")]
    EmptyUpdate,

    #[error("invalid status: {0}\n  hint: use pending, approved or rejected")]
    InvalidStatus(String),

    #[error("pending action not found: {0}")]
    ActionNotFound(i64),

    #[error("offline: {0}\n  hint: check the network or api_base_url in the config")]
    Offline(&'static str),

    #[error("full sync failed\n  hint: run with -v for details")]
    SyncFailed,

    #[error(transparent)]
    Core(#[from] rh_core::Error),

    #[error(transparent)]
    Sync(#[from] rh_sync::SyncError),

    #[error(transparent)]
    Api(#[from] rh_sync::ApiError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
