// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report cache commands.

use rh_core::{NewReport, Report};
use rh_sync::{OfflineSyncManager, SyncError};

use crate::cli::{OutputFormat, ReportFields};
use crate::colors;
use crate::error::{Error, Result};

use super::{print_json, truncate};

const TITLE_WIDTH: usize = 60;

/// Print the cached collection.
///
/// A store that failed to open reads as an empty cache, matching what the
/// app shows when it has nothing to fall back on.
pub async fn show(manager: &OfflineSyncManager, format: OutputFormat) -> Result<()> {
    let reports = cached_or_empty(manager).await?;
    output(&reports, format)
}

pub(crate) async fn cached_or_empty(manager: &OfflineSyncManager) -> Result<Vec<Report>> {
    match manager.cached_reports().await {
        Ok(reports) => Ok(reports),
        Err(SyncError::StoreUnavailable) => {
            tracing::warn!("offline store unavailable, showing an empty cache");
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Fetch from the API, replace the cache, print the result.
pub async fn refresh(manager: &OfflineSyncManager, format: OutputFormat) -> Result<()> {
    let reports = refresh_impl(manager).await?;
    output(&reports, format)
}

pub(crate) async fn refresh_impl(manager: &OfflineSyncManager) -> Result<Vec<Report>> {
    match manager.refresh_reports().await {
        Ok(reports) => Ok(reports),
        Err(SyncError::Offline) => {
            manager.start().await;
            Err(Error::Offline("the cache was not refreshed"))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn draft(manager: &OfflineSyncManager, title: String, fields: ReportFields) -> Result<()> {
    let report = draft_impl(manager, title, fields).await?;
    println!("Drafted report {}: {}", report.id, report.title);
    println!(
        "{}",
        colors::context("run `rhsync sync` to push drafts when online")
    );
    Ok(())
}

pub(crate) async fn draft_impl(
    manager: &OfflineSyncManager,
    title: String,
    fields: ReportFields,
) -> Result<Report> {
    let mut draft = NewReport::new(title);
    draft.description = fields.description;
    draft.category = fields.category;
    Ok(manager.add_local_report(draft).await?)
}

pub async fn clear(manager: &OfflineSyncManager) -> Result<()> {
    manager.clear_cache().await?;
    println!("Cache cleared");
    Ok(())
}

fn output(reports: &[Report], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{}", format_text(reports));
            Ok(())
        }
        OutputFormat::Json => print_json(reports),
    }
}

pub(crate) fn format_text(reports: &[Report]) -> String {
    if reports.is_empty() {
        return "No cached reports.".to_string();
    }
    reports
        .iter()
        .map(|r| {
            let mut line = format!(
                "{:>6}  {:<9} {}",
                r.id,
                r.status.as_str(),
                truncate(&r.title, TITLE_WIDTH)
            );
            if let Some(category) = &r.category {
                line.push_str(&format!("  {}", colors::context(&format!("[{}]", category))));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
