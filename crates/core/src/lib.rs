// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! rh-core: Shared library for the ReportHub offline client
//!
//! This crate provides the data model for deferred mutations and cached
//! reports, the wire types exchanged with the ReportHub API, and the
//! SQLite-backed store that persists both across restarts.

pub mod action;
pub mod connectivity;
pub mod error;
pub mod protocol;
pub mod report;
pub mod store;

pub use action::{Action, ActionId, ActionKind, MessageEnvelope, PendingAction, UserId};
pub use connectivity::{ConnectivitySignal, ConnectivityState};
pub use error::{Error, Result};
pub use protocol::{ChannelMessage, SyncRequest, SyncResponse};
pub use report::{NewReport, Report, ReportId, ReportPatch, ReportStatus};
pub use store::Store;
