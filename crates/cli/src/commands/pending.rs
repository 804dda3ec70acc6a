// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use rh_core::{Action, ActionId, PendingAction, ReportId};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::colors;
use crate::error::Result;
use crate::host::Host;

use super::{print_json, truncate};

/// Message previews are cut to this many characters.
const PREVIEW_WIDTH: usize = 48;

#[derive(Serialize)]
struct PendingRow<'a> {
    id: ActionId,
    kind: &'a str,
    recognized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    report_id: Option<ReportId>,
    enqueued_at: DateTime<Utc>,
    payload: Value,
}

impl<'a> PendingRow<'a> {
    fn from_pending(pending: &'a PendingAction) -> Result<Self> {
        let raw = pending.action.payload_json()?;
        let payload = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
        Ok(PendingRow {
            id: pending.id,
            kind: pending.action.kind_str(),
            recognized: pending.is_recognized(),
            report_id: pending.action.report_id(),
            enqueued_at: pending.enqueued_at,
            payload,
        })
    }
}

pub async fn run(host: &Host, format: OutputFormat) -> Result<()> {
    let actions = host.manager.pending_actions().await?;
    match format {
        OutputFormat::Text => {
            println!("{}", format_text(&actions));
            Ok(())
        }
        OutputFormat::Json => print_json(&rows(&actions)?),
    }
}

fn rows(actions: &[PendingAction]) -> Result<Vec<PendingRow<'_>>> {
    actions.iter().map(PendingRow::from_pending).collect()
}

pub(crate) fn format_text(actions: &[PendingAction]) -> String {
    if actions.is_empty() {
        return "No pending actions.".to_string();
    }
    actions
        .iter()
        .map(format_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_line(pending: &PendingAction) -> String {
    format!(
        "#{:<4} {:<14} {}  {}",
        pending.id,
        pending.action.kind_str(),
        describe(&pending.action),
        colors::context(&pending.enqueued_at.format("%Y-%m-%d %H:%M").to_string()),
    )
}

/// One-line summary of what an action will do when replayed.
pub(crate) fn describe(action: &Action) -> String {
    match action {
        Action::CreateReport(report) => format!("\"{}\"", report.title),
        Action::UpdateReport(patch) => {
            let mut fields = Vec::new();
            if patch.title.is_some() {
                fields.push("title");
            }
            if patch.description.is_some() {
                fields.push("description");
            }
            if patch.category.is_some() {
                fields.push("category");
            }
            if patch.status.is_some() {
                fields.push("status");
            }
            if !patch.extra.is_empty() {
                fields.push("other");
            }
            format!("report {} ({})", patch.id, fields.join(", "))
        }
        Action::DeleteReport { id } => format!("report {}", id),
        Action::SendMessage(envelope) => format!(
            "to user {}: {}",
            envelope.recipient_id,
            truncate(&envelope.content, PREVIEW_WIDTH)
        ),
        Action::Unrecognized { .. } => "(unrecognized, not replayed)".to_string(),
    }
}

#[cfg(test)]
#[path = "pending_tests.rs"]
mod tests;
