// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use rh_sync::{DrainSummary, OfflineSyncManager};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::{Error, Result};

use super::print_json;

#[derive(Serialize)]
struct DrainOutput {
    #[serde(flatten)]
    summary: DrainSummary,
    pending: usize,
}

pub async fn run(manager: &OfflineSyncManager, format: OutputFormat) -> Result<()> {
    let summary = drain_impl(manager).await?;
    let pending = manager.pending_count().await?;
    match format {
        OutputFormat::Text => {
            println!("{}", format_text(&summary, pending));
            Ok(())
        }
        OutputFormat::Json => print_json(&DrainOutput { summary, pending }),
    }
}

/// Drain once. Offline is an error here since nothing could be replayed.
pub(crate) async fn drain_impl(manager: &OfflineSyncManager) -> Result<DrainSummary> {
    if !manager.is_online() {
        manager.start().await;
        return Err(Error::Offline("nothing was replayed"));
    }
    Ok(manager.handle_online().await)
}

pub(crate) fn format_text(summary: &DrainSummary, pending: usize) -> String {
    let mut out = format!("Drained: {}", summary);
    if pending > 0 {
        out.push_str(&format!("\n{} action(s) still pending", pending));
    }
    out
}

#[cfg(test)]
#[path = "drain_tests.rs"]
mod tests;
