// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Deferred mutations waiting to be replayed against the remote API.
//!
//! Every mutation the UI cannot (or chooses not to) confirm immediately is
//! captured as an [`Action`]. Once persisted it becomes a [`PendingAction`]
//! with a store-assigned id; ids define the replay order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::report::{NewReport, ReportId, ReportPatch};

/// Locally assigned identifier of a pending action.
///
/// Strictly increasing in insertion order and never reused.
pub type ActionId = i64;

/// Identifier of a chat user.
pub type UserId = i64;

/// The closed set of operation kinds this client knows how to replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CreateReport,
    UpdateReport,
    DeleteReport,
    SendMessage,
}

impl ActionKind {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::CreateReport => "create_report",
            ActionKind::UpdateReport => "update_report",
            ActionKind::DeleteReport => "delete_report",
            ActionKind::SendMessage => "send_message",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = Error;

    /// Accepts snake_case, kebab-case and camelCase spellings.
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "createreport" => Ok(ActionKind::CreateReport),
            "updatereport" => Ok(ActionKind::UpdateReport),
            "deletereport" => Ok(ActionKind::DeleteReport),
            "sendmessage" => Ok(ActionKind::SendMessage),
            _ => Err(Error::InvalidActionKind(s.to_string())),
        }
    }
}

/// A chat message to deliver over the live channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub recipient_id: UserId,
    pub content: String,
}

impl MessageEnvelope {
    pub fn new(recipient_id: UserId, content: impl Into<String>) -> Self {
        MessageEnvelope {
            recipient_id,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct DeletePayload {
    id: ReportId,
}

/// A mutation to replay, with a payload shaped for its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Submit a new report.
    CreateReport(NewReport),

    /// Apply a partial update to an existing report.
    UpdateReport(ReportPatch),

    /// Delete a report by id.
    DeleteReport { id: ReportId },

    /// Deliver a chat message over the live channel.
    SendMessage(MessageEnvelope),

    /// A stored row this build cannot decode.
    ///
    /// Produced only when reading the store (a kind written by a newer
    /// client, or a payload that no longer parses). Never replayed and
    /// never removed automatically.
    Unrecognized { kind: String, payload: String },
}

impl Action {
    /// Creates a CreateReport action.
    pub fn create_report(report: NewReport) -> Self {
        Action::CreateReport(report)
    }

    /// Creates an UpdateReport action.
    pub fn update_report(patch: ReportPatch) -> Self {
        Action::UpdateReport(patch)
    }

    /// Creates a DeleteReport action.
    pub fn delete_report(id: ReportId) -> Self {
        Action::DeleteReport { id }
    }

    /// Creates a SendMessage action.
    pub fn send_message(recipient_id: UserId, content: impl Into<String>) -> Self {
        Action::SendMessage(MessageEnvelope::new(recipient_id, content))
    }

    /// Returns the kind, or `None` for unrecognized rows.
    pub fn kind(&self) -> Option<ActionKind> {
        match self {
            Action::CreateReport(_) => Some(ActionKind::CreateReport),
            Action::UpdateReport(_) => Some(ActionKind::UpdateReport),
            Action::DeleteReport { .. } => Some(ActionKind::DeleteReport),
            Action::SendMessage(_) => Some(ActionKind::SendMessage),
            Action::Unrecognized { .. } => None,
        }
    }

    /// Returns the kind tag as stored, including unrecognized ones.
    pub fn kind_str(&self) -> &str {
        match self {
            Action::Unrecognized { kind, .. } => kind,
            _ => self.kind().map(|k| k.as_str()).unwrap_or_default(),
        }
    }

    /// Returns the report this action targets, if any.
    pub fn report_id(&self) -> Option<ReportId> {
        match self {
            Action::UpdateReport(patch) => Some(patch.id),
            Action::DeleteReport { id } => Some(*id),
            _ => None,
        }
    }

    /// Serializes the payload (without the kind tag) to JSON.
    pub fn payload_json(&self) -> Result<String> {
        let json = match self {
            Action::CreateReport(report) => serde_json::to_string(report)?,
            Action::UpdateReport(patch) => serde_json::to_string(patch)?,
            Action::DeleteReport { id } => serde_json::to_string(&DeletePayload { id: *id })?,
            Action::SendMessage(envelope) => serde_json::to_string(envelope)?,
            Action::Unrecognized { payload, .. } => payload.clone(),
        };
        Ok(json)
    }

    /// Rebuilds an action from a stored kind tag and payload.
    ///
    /// Fails with [`Error::InvalidActionKind`] for kinds this build does not
    /// know and with [`Error::Json`] for payloads that do not parse.
    pub fn decode(kind: &str, payload: &str) -> Result<Self> {
        let action = match kind.parse::<ActionKind>()? {
            ActionKind::CreateReport => Action::CreateReport(serde_json::from_str(payload)?),
            ActionKind::UpdateReport => Action::UpdateReport(serde_json::from_str(payload)?),
            ActionKind::DeleteReport => {
                let DeletePayload { id } = serde_json::from_str(payload)?;
                Action::DeleteReport { id }
            }
            ActionKind::SendMessage => Action::SendMessage(serde_json::from_str(payload)?),
        };
        Ok(action)
    }

    /// Like [`Action::decode`], but keeps undecodable rows as `Unrecognized`.
    pub fn decode_lenient(kind: &str, payload: &str) -> Self {
        Action::decode(kind, payload).unwrap_or_else(|_| Action::Unrecognized {
            kind: kind.to_string(),
            payload: payload.to_string(),
        })
    }

    /// Checks that the action may be enqueued by a caller.
    pub fn validate(&self) -> Result<()> {
        match self {
            Action::CreateReport(report) if report.title.trim().is_empty() => Err(
                Error::InvalidInput("report title cannot be empty".to_string()),
            ),
            Action::UpdateReport(patch) if patch.is_empty() => Err(Error::InvalidInput(format!(
                "update for report {} changes nothing",
                patch.id
            ))),
            Action::SendMessage(envelope) if envelope.content.trim().is_empty() => Err(
                Error::InvalidInput("message content cannot be empty".to_string()),
            ),
            Action::Unrecognized { kind, .. } => Err(Error::InvalidActionKind(kind.clone())),
            _ => Ok(()),
        }
    }
}

/// A persisted action awaiting replay.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAction {
    /// Store-assigned id; replay order.
    pub id: ActionId,
    pub action: Action,
    /// Insertion time, for diagnostics only.
    pub enqueued_at: DateTime<Utc>,
}

impl PendingAction {
    pub fn new(id: ActionId, action: Action, enqueued_at: DateTime<Utc>) -> Self {
        PendingAction {
            id,
            action,
            enqueued_at,
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.action.kind().is_some()
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
