// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Queueing and queue maintenance.

use rh_core::{Action, ActionId, NewReport, ReportId, ReportPatch, ReportStatus};
use rh_sync::OfflineSyncManager;

use crate::cli::ReportFields;
use crate::error::{Error, Result};

use super::pending::describe;

/// Build a CreateReport action from CLI fields.
pub(crate) fn create_action(title: String, fields: ReportFields) -> Result<Action> {
    let mut report = NewReport::new(title);
    report.description = fields.description;
    report.category = checked_category(fields.category)?;
    Ok(Action::create_report(report))
}

/// Build an UpdateReport action. At least one field must be set.
pub(crate) fn update_action(
    id: ReportId,
    title: Option<String>,
    fields: ReportFields,
    status: Option<String>,
) -> Result<Action> {
    let mut patch = ReportPatch::new(id);
    patch.title = title;
    patch.description = fields.description;
    patch.category = checked_category(fields.category)?;
    patch.status = status.map(parse_status).transpose()?;
    if patch.is_empty() {
        return Err(Error::EmptyUpdate);
    }
    Ok(Action::update_report(patch))
}

fn checked_category(category: Option<String>) -> Result<Option<String>> {
    match category {
        Some(c) if c.trim().is_empty() => Err(Error::FieldEmpty { field: "category" }),
        other => Ok(other),
    }
}

/// Statuses a client may request. `local` is reserved for drafts.
fn parse_status(raw: String) -> Result<ReportStatus> {
    match ReportStatus::from(raw.as_str()) {
        status @ (ReportStatus::Pending | ReportStatus::Approved | ReportStatus::Rejected) => {
            Ok(status)
        }
        _ => Err(Error::InvalidStatus(raw)),
    }
}

/// Queue `action`, then replay the queue if `now` is set and the API is up.
pub async fn enqueue(manager: &OfflineSyncManager, action: Action, now: bool) -> Result<()> {
    let text = enqueue_impl(manager, action, now).await?;
    println!("{}", text);
    Ok(())
}

pub(crate) async fn enqueue_impl(
    manager: &OfflineSyncManager,
    action: Action,
    now: bool,
) -> Result<String> {
    let summary_line = format!("{} {}", action.kind_str(), describe(&action));
    let id = manager.queue_action(action).await?;
    let mut out = format!("Queued #{}: {}", id, summary_line);

    if now {
        if manager.is_online() {
            let summary = manager.handle_online().await;
            out.push_str(&format!("\nDrained: {}", summary));
        } else {
            manager.start().await;
            out.push_str("\nOffline: will replay once the API is reachable");
        }
    }
    Ok(out)
}

pub async fn drop_action(manager: &OfflineSyncManager, id: ActionId) -> Result<()> {
    println!("{}", drop_impl(manager, id).await?);
    Ok(())
}

pub(crate) async fn drop_impl(manager: &OfflineSyncManager, id: ActionId) -> Result<String> {
    if !manager.discard_action(id).await? {
        return Err(Error::ActionNotFound(id));
    }
    Ok(format!("Dropped #{}", id))
}

pub async fn clear(manager: &OfflineSyncManager) -> Result<()> {
    let removed = manager.clear_queue().await?;
    println!("Cleared {} pending action(s)", removed);
    Ok(())
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
