// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for rh-core operations.

use thiserror::Error;

/// All possible errors that can occur in rh-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid action kind: '{0}'\n  hint: valid kinds are: create_report, update_report, delete_report, send_message")]
    InvalidActionKind(String),

    #[error("invalid connectivity state: '{0}'\n  hint: valid states are: online, offline")]
    InvalidConnectivity(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for rh-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
