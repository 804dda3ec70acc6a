// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use rh_sync::OfflineSyncManager;

use crate::error::{Error, Result};

pub async fn run(manager: &OfflineSyncManager) -> Result<()> {
    println!("{}", run_impl(manager).await?);
    Ok(())
}

/// Push drafts, refresh the cache, then drain the queue.
pub(crate) async fn run_impl(manager: &OfflineSyncManager) -> Result<String> {
    if !manager.is_online() {
        manager.start().await;
        return Err(Error::Offline("full sync needs the API"));
    }
    if !manager.full_sync().await {
        return Err(Error::SyncFailed);
    }
    let cached = manager.cached_reports().await?.len();
    let pending = manager.pending_count().await?;
    Ok(format!(
        "Synced: {} cached report(s), {} pending action(s)",
        cached, pending
    ))
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
