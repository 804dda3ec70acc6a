// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! rh-sync: Offline sync manager for the ReportHub client.
//!
//! Tracks connectivity, persists deferred mutations, and replays them
//! against the ReportHub API once the network is back.
//!
//! # Architecture
//!
//! ```text
//!   host signals ──► ┌────────────────────┐ ──► RemoteApi   (HTTP, reqwest)
//!   (online/offline) │ OfflineSyncManager │ ──► LiveChannel (chat, WebSocket)
//!                    │   + drain timer    │ ──► OfflineIndicator
//!                    └────────────────────┘
//!                              │
//!                              ▼
//!                    ┌────────────────────┐
//!                    │ Store (SQLite)     │  pending_actions + reports
//!                    └────────────────────┘
//! ```
//!
//! # Features
//!
//! - Durable FIFO queue of pending actions, drained while online
//! - Failure containment: one failing action never blocks later ones
//! - Non-reentrant drain passes on a fixed period (default 30s)
//! - Snapshot cache of the report collection for offline reads
//! - Injectable API, channel, indicator and token source for testing

mod api;
mod channel;
mod error;
mod indicator;
mod manager;
mod probe;
mod timer;
mod token;

pub use api::{ApiFuture, HttpApi, RemoteApi, DEFAULT_BASE_URL};
pub use channel::{ChannelFuture, LiveChannel, NoChannel, WebSocketChannel};
pub use error::{
    ApiError, ApiResult, ChannelError, ChannelResult, ReplayError, SyncError, SyncResult,
};
pub use indicator::{FileIndicator, LogIndicator, OfflineIndicator, OFFLINE_MESSAGE};
pub use manager::{
    Collaborators, DrainSummary, ManagerConfig, NotFoundPolicy, OfflineSyncManager,
    DEFAULT_DRAIN_INTERVAL,
};
pub use probe::ReachabilityProbe;
pub use token::{EnvToken, FileToken, StaticToken, TokenSource};

#[cfg(test)]
mod test_helpers;
