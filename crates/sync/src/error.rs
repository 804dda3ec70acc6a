// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the sync layer.

use thiserror::Error;

/// Error type for remote API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The bearer token was missing, expired or rejected.
    #[error("unauthorized (HTTP {0})")]
    Unauthorized(u16),

    /// The target resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Result type for remote API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error type for live channel operations.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The channel is not connected.
    #[error("chat channel not connected")]
    NotConnected,

    /// Connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Send failed.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// Serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for live channel operations.
pub type ChannelResult<T> = Result<T, ChannelError>;

/// Why a single pending action could not be replayed.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// The stored kind is not one this build can replay.
    #[error("unrecognized action kind: '{0}'")]
    Unrecognized(String),
}

impl ReplayError {
    /// Returns true if the remote API reported the target as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReplayError::Api(ApiError::NotFound(_)))
    }
}

/// Error type for manager operations surfaced to callers.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The persistent store failed to open, so nothing can be queued or read.
    #[error("offline store is not available\n  hint: check that the store path is writable")]
    StoreUnavailable,

    /// A store operation failed.
    #[error("store error: {0}")]
    Store(#[from] rh_core::Error),

    /// The action cannot be enqueued.
    #[error("invalid action: {0}")]
    InvalidAction(#[source] rh_core::Error),

    /// A remote API call failed.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// The operation needs the network and the manager is offline.
    #[error("offline: operation requires connectivity")]
    Offline,
}

/// Result type for manager operations.
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
