// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use rh_core::ConnectivityState;
use rh_sync::OfflineSyncManager;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::colors;
use crate::error::Result;
use crate::host::Host;

use super::print_json;

#[derive(Debug, Serialize)]
pub(crate) struct Status {
    state: ConnectivityState,
    api_base_url: String,
    store_path: String,
    store_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pending: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cached: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    drafts: Option<usize>,
}

pub async fn run(host: &Host, format: OutputFormat) -> Result<()> {
    let status = collect(
        &host.manager,
        &host.config.api_base_url,
        &host.config.store_path(),
    )
    .await;
    match format {
        OutputFormat::Text => {
            println!("{}", format_text(&status));
            Ok(())
        }
        OutputFormat::Json => print_json(&status),
    }
}

/// Read-only snapshot. Store read errors show up as missing counts.
pub(crate) async fn collect(
    manager: &OfflineSyncManager,
    api_base_url: &str,
    store_path: &Path,
) -> Status {
    let store_available = manager.has_store().await;
    let pending = manager.pending_count().await.ok();
    let reports = manager.cached_reports().await.ok();
    Status {
        state: manager.state(),
        api_base_url: api_base_url.to_string(),
        store_path: store_path.display().to_string(),
        store_available,
        pending,
        cached: reports.as_ref().map(Vec::len),
        drafts: reports.map(|r| r.iter().filter(|r| r.is_local()).count()),
    }
}

pub(crate) fn format_text(status: &Status) -> String {
    let count = |n: Option<usize>| n.map_or_else(|| "-".to_string(), |n| n.to_string());
    let store = if status.store_available {
        status.store_path.clone()
    } else {
        format!("{} {}", status.store_path, colors::context("(unavailable)"))
    };
    let mut cached = count(status.cached);
    if let Some(drafts) = status.drafts.filter(|d| *d > 0) {
        cached.push_str(&format!(" ({} local draft(s))", drafts));
    }
    format!(
        "state:    {}\napi:      {}\nstore:    {}\npending:  {}\ncached:   {}",
        colors::state(status.state),
        status.api_base_url,
        store,
        count(status.pending),
        cached,
    )
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
