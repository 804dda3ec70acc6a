// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wire types for the ReportHub API and chat channel.
//!
//! - `POST /sync` takes a [`SyncRequest`] and answers with a [`SyncResponse`]
//! - The chat WebSocket carries [`ChannelMessage`]s as tagged JSON

use serde::{Deserialize, Serialize};

use crate::action::{MessageEnvelope, UserId};
use crate::report::{Report, ReportId};

/// Bulk sync request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SyncRequest {
    /// Unix time of the last successful sync; 0 forces a full sync.
    pub last_sync_time: i64,
    pub created_reports: Vec<Report>,
    pub updated_reports: Vec<Report>,
    pub deleted_report_ids: Vec<ReportId>,
}

impl SyncRequest {
    /// Creates a full sync request pushing the given locally created reports.
    pub fn full(created_reports: Vec<Report>) -> Self {
        SyncRequest {
            last_sync_time: 0,
            created_reports,
            updated_reports: Vec::new(),
            deleted_report_ids: Vec::new(),
        }
    }
}

/// Bulk sync response body: the server's current collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SyncResponse {
    #[serde(default)]
    pub reports: Vec<Report>,
}

/// Messages sent over the live chat channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChannelMessage {
    /// A direct chat message.
    Message { recipient_id: UserId, content: String },
}

impl ChannelMessage {
    /// Creates a Message from an envelope.
    pub fn message(envelope: &MessageEnvelope) -> Self {
        ChannelMessage::Message {
            recipient_id: envelope.recipient_id,
            content: envelope.content.clone(),
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
