// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The offline sync manager.
//!
//! Owns the durable action queue and the report cache, tracks connectivity,
//! and replays queued actions through the injected collaborators while
//! online. One instance is constructed by the host and shared by cloning.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rh_core::{
    Action, ActionId, ChannelMessage, ConnectivitySignal, ConnectivityState, NewReport,
    PendingAction, Report, Store, SyncRequest,
};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, Mutex, Notify};

use crate::api::RemoteApi;
use crate::channel::LiveChannel;
use crate::error::{ChannelError, ReplayError, SyncError, SyncResult};
use crate::indicator::OfflineIndicator;
use crate::timer::DrainTimer;

/// Period between drain passes while online.
pub const DEFAULT_DRAIN_INTERVAL: Duration = Duration::from_secs(30);

/// What a drain pass does with an action whose target the server reports
/// as missing (HTTP 404).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotFoundPolicy {
    /// Leave the action queued; it is retried on every pass.
    #[default]
    Keep,
    /// Drop the action from the queue.
    Discard,
}

impl NotFoundPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotFoundPolicy::Keep => "keep",
            NotFoundPolicy::Discard => "discard",
        }
    }
}

impl fmt::Display for NotFoundPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotFoundPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keep" => Ok(NotFoundPolicy::Keep),
            "discard" => Ok(NotFoundPolicy::Discard),
            _ => Err(format!("invalid not_found policy '{}' (expected keep or discard)", s)),
        }
    }
}

/// Tunables for the manager.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    pub drain_interval: Duration,
    pub not_found: NotFoundPolicy,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        ManagerConfig {
            drain_interval: DEFAULT_DRAIN_INTERVAL,
            not_found: NotFoundPolicy::default(),
        }
    }
}

/// The injected capabilities the manager replays through.
#[derive(Clone)]
pub struct Collaborators {
    pub api: Arc<dyn RemoteApi>,
    pub channel: Arc<dyn LiveChannel>,
    pub indicator: Arc<dyn OfflineIndicator>,
}

/// Outcome of one drain pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DrainSummary {
    /// The pass did not run (offline, store unavailable, or another pass
    /// was already in progress).
    pub skipped: bool,
    pub attempted: usize,
    pub replayed: usize,
    pub failed: usize,
    pub unrecognized: usize,
    pub discarded: usize,
}

impl DrainSummary {
    pub fn skipped() -> Self {
        DrainSummary {
            skipped: true,
            ..Default::default()
        }
    }

    /// Actions the pass looked at and left in the queue.
    pub fn kept(&self) -> usize {
        self.failed + self.unrecognized
    }
}

impl fmt::Display for DrainSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.skipped {
            return write!(f, "skipped");
        }
        write!(
            f,
            "{} attempted, {} replayed, {} failed",
            self.attempted, self.replayed, self.failed
        )?;
        if self.unrecognized > 0 {
            write!(f, ", {} unrecognized", self.unrecognized)?;
        }
        if self.discarded > 0 {
            write!(f, ", {} discarded", self.discarded)?;
        }
        Ok(())
    }
}

/// Tracks connectivity, queues mutations while offline, and replays them
/// once the network is back.
#[derive(Clone)]
pub struct OfflineSyncManager {
    pub(crate) inner: Arc<Inner>,
}

pub(crate) struct Inner {
    config: ManagerConfig,
    /// `None` when the store failed to open.
    store: Mutex<Option<Store>>,
    online: AtomicBool,
    /// Held for the duration of a pass.
    drain_gate: Mutex<()>,
    timer: std::sync::Mutex<Option<DrainTimer>>,
    wake: Arc<Notify>,
    api: Arc<dyn RemoteApi>,
    channel: Arc<dyn LiveChannel>,
    indicator: Arc<dyn OfflineIndicator>,
}

impl OfflineSyncManager {
    /// Create a manager around an already-opened store (or none).
    pub fn new(
        config: ManagerConfig,
        store: Option<Store>,
        parts: Collaborators,
        initial: ConnectivityState,
    ) -> Self {
        let inner = Inner {
            config,
            store: Mutex::new(store),
            online: AtomicBool::new(initial.is_online()),
            drain_gate: Mutex::new(()),
            timer: std::sync::Mutex::new(None),
            wake: Arc::new(Notify::new()),
            api: parts.api,
            channel: parts.channel,
            indicator: parts.indicator,
        };
        OfflineSyncManager {
            inner: Arc::new(inner),
        }
    }

    /// Open the store at `path` and create a manager around it.
    ///
    /// A store that fails to open is logged and the manager runs without
    /// one: queueing and cache reads then report [`SyncError::StoreUnavailable`].
    pub fn open(
        config: ManagerConfig,
        path: &Path,
        parts: Collaborators,
        initial: ConnectivityState,
    ) -> Self {
        let store = match Store::open(path) {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to open offline store");
                None
            }
        };
        Self::new(config, store, parts, initial)
    }

    /// Apply the initial connectivity state.
    pub async fn start(&self) {
        if self.is_online() {
            self.handle_online().await;
        } else {
            self.inner.indicator.show();
        }
    }

    /// Transition to online: hide the notice, drain once, keep the timer running.
    pub async fn handle_online(&self) -> DrainSummary {
        let was_online = self.inner.online.swap(true, Ordering::SeqCst);
        if !was_online {
            tracing::info!("connectivity restored");
        }
        self.inner.indicator.hide();
        self.ensure_timer();
        self.inner.drain().await
    }

    /// Transition to offline: show the notice and stop the timer.
    pub fn handle_offline(&self) {
        let was_online = self.inner.online.swap(false, Ordering::SeqCst);
        if was_online {
            tracing::info!("connectivity lost");
        }
        self.inner.indicator.show();
        self.stop_timer();
    }

    /// Dispatch host connectivity signals until the sender is dropped.
    pub async fn run_signals(&self, mut signals: mpsc::Receiver<ConnectivitySignal>) {
        while let Some(signal) = signals.recv().await {
            tracing::debug!(?signal, "connectivity signal");
            match ConnectivityState::after(signal) {
                ConnectivityState::Online => {
                    let summary = self.handle_online().await;
                    tracing::debug!(%summary, "drain after reconnect");
                }
                ConnectivityState::Offline => self.handle_offline(),
            }
        }
    }

    /// Stop the timer and wait for an in-flight pass to finish.
    pub async fn shutdown(&self) {
        self.stop_timer();
        let _gate = self.inner.drain_gate.lock().await;
        tracing::debug!("sync manager shut down");
    }

    /// Persist an action for later replay.
    ///
    /// Never touches the network; while online a drain pass is requested
    /// from the timer task instead.
    pub async fn queue_action(&self, action: Action) -> SyncResult<ActionId> {
        action.validate().map_err(SyncError::InvalidAction)?;

        let id = {
            let guard = self.inner.store.lock().await;
            let store = guard.as_ref().ok_or(SyncError::StoreUnavailable)?;
            store.add_action(&action)?
        };
        tracing::debug!(id, kind = action.kind_str(), "action queued");

        if self.is_online() {
            self.inner.wake.notify_one();
        }
        Ok(id)
    }

    /// Run one drain pass now.
    pub async fn drain(&self) -> DrainSummary {
        self.inner.drain().await
    }

    /// Replace the cached report collection. Failures are logged.
    pub async fn cache_reports(&self, reports: &[Report]) {
        self.inner.cache_reports(reports).await;
    }

    /// The cached report collection, in id order.
    pub async fn cached_reports(&self) -> SyncResult<Vec<Report>> {
        let guard = self.inner.store.lock().await;
        let store = guard.as_ref().ok_or(SyncError::StoreUnavailable)?;
        Ok(store.reports()?)
    }

    /// Push locally created reports, refresh the cache, then drain.
    ///
    /// Returns `false` when offline or when the push fails. A drain that
    /// collides with a running pass is left to that pass.
    pub async fn full_sync(&self) -> bool {
        if !self.is_online() {
            tracing::debug!("full sync skipped: offline");
            return false;
        }
        if let Err(e) = self.push_cached().await {
            tracing::warn!(error = %e, "full sync failed");
            return false;
        }
        let summary = self.inner.drain().await;
        if summary.skipped {
            tracing::info!("full sync complete, queue left to the pass in progress");
        } else {
            tracing::info!(%summary, "full sync complete");
        }
        true
    }

    async fn push_cached(&self) -> SyncResult<()> {
        let local = {
            let guard = self.inner.store.lock().await;
            let store = guard.as_ref().ok_or(SyncError::StoreUnavailable)?;
            if store.report_count()? == 0 {
                return Ok(());
            }
            store.local_reports()?
        };
        tracing::debug!(created = local.len(), "pushing cached reports");
        let response = self.inner.api.sync(SyncRequest::full(local)).await?;
        self.inner.cache_reports(&response.reports).await;
        Ok(())
    }

    /// Fetch the server's report collection and cache it.
    pub async fn refresh_reports(&self) -> SyncResult<Vec<Report>> {
        if !self.is_online() {
            return Err(SyncError::Offline);
        }
        let reports = self.inner.api.list_reports().await?;
        self.inner.cache_reports(&reports).await;
        Ok(reports)
    }

    /// Pending actions in replay order.
    pub async fn pending_actions(&self) -> SyncResult<Vec<PendingAction>> {
        let guard = self.inner.store.lock().await;
        let store = guard.as_ref().ok_or(SyncError::StoreUnavailable)?;
        Ok(store.pending_actions()?)
    }

    pub async fn pending_count(&self) -> SyncResult<usize> {
        let guard = self.inner.store.lock().await;
        let store = guard.as_ref().ok_or(SyncError::StoreUnavailable)?;
        Ok(store.pending_count()?)
    }

    /// Remove one pending action without replaying it.
    pub async fn discard_action(&self, id: ActionId) -> SyncResult<bool> {
        let guard = self.inner.store.lock().await;
        let store = guard.as_ref().ok_or(SyncError::StoreUnavailable)?;
        let removed = store.delete_action(id)?;
        if removed {
            tracing::info!(id, "pending action discarded");
        }
        Ok(removed)
    }

    /// Remove every pending action without replaying them.
    pub async fn clear_queue(&self) -> SyncResult<usize> {
        let guard = self.inner.store.lock().await;
        let store = guard.as_ref().ok_or(SyncError::StoreUnavailable)?;
        let removed = store.clear_actions()?;
        tracing::info!(removed, "pending queue cleared");
        Ok(removed)
    }

    /// Add a locally drafted report to the cache.
    ///
    /// Drafts get negative ids so they never collide with server ids, and
    /// carry the `local` status so the next full sync pushes them.
    pub async fn add_local_report(&self, draft: NewReport) -> SyncResult<Report> {
        if draft.title.trim().is_empty() {
            return Err(SyncError::InvalidAction(rh_core::Error::InvalidInput(
                "report title cannot be empty".to_string(),
            )));
        }
        let guard = self.inner.store.lock().await;
        let store = guard.as_ref().ok_or(SyncError::StoreUnavailable)?;
        let lowest = store.reports()?.iter().map(|r| r.id).min().unwrap_or(0);

        let mut report = Report::local(lowest.min(0) - 1, draft.title);
        report.description = draft.description;
        report.category = draft.category;
        report.extra = draft.extra;
        store.put_report(&report)?;
        tracing::debug!(id = report.id, "local draft cached");
        Ok(report)
    }

    /// Empty the report cache.
    pub async fn clear_cache(&self) -> SyncResult<()> {
        let guard = self.inner.store.lock().await;
        let store = guard.as_ref().ok_or(SyncError::StoreUnavailable)?;
        store.clear_reports()?;
        Ok(())
    }

    pub fn state(&self) -> ConnectivityState {
        ConnectivityState::from(self.is_online())
    }

    pub fn is_online(&self) -> bool {
        self.inner.online.load(Ordering::SeqCst)
    }

    /// Whether the recurring drain timer is active.
    pub fn timer_running(&self) -> bool {
        self.inner
            .lock_timer()
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }

    pub async fn has_store(&self) -> bool {
        self.inner.store.lock().await.is_some()
    }

    fn ensure_timer(&self) {
        let mut timer = self.inner.lock_timer();
        if timer.is_none() {
            *timer = Some(DrainTimer::spawn(
                Arc::downgrade(&self.inner),
                Arc::clone(&self.inner.wake),
                self.inner.config.drain_interval,
            ));
            tracing::debug!(period = ?self.inner.config.drain_interval, "drain timer started");
        }
    }

    fn stop_timer(&self) {
        if let Some(timer) = self.inner.lock_timer().take() {
            timer.stop();
            tracing::debug!("drain timer stopped");
        }
    }
}

impl Inner {
    fn lock_timer(&self) -> std::sync::MutexGuard<'_, Option<DrainTimer>> {
        self.timer.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    pub(crate) async fn drain(&self) -> DrainSummary {
        if !self.is_online() {
            return DrainSummary::skipped();
        }
        let Ok(_gate) = self.drain_gate.try_lock() else {
            tracing::debug!("drain pass already running");
            return DrainSummary::skipped();
        };

        let pending = {
            let guard = self.store.lock().await;
            let Some(store) = guard.as_ref() else {
                tracing::debug!("drain skipped: store unavailable");
                return DrainSummary::skipped();
            };
            match store.pending_actions() {
                Ok(pending) => pending,
                Err(e) => {
                    tracing::error!(error = %e, "failed to read pending actions");
                    return DrainSummary::skipped();
                }
            }
        };

        let mut summary = DrainSummary::default();
        for pending in pending {
            if !self.is_online() {
                tracing::info!("connectivity lost mid-pass, stopping");
                break;
            }
            summary.attempted += 1;
            let id = pending.id;
            match self.replay(&pending.action).await {
                Ok(()) => {
                    tracing::debug!(id, kind = pending.action.kind_str(), "action replayed");
                    self.remove(id).await;
                    summary.replayed += 1;
                }
                Err(ReplayError::Unrecognized(kind)) => {
                    tracing::warn!(id, kind, "unrecognized action left in queue");
                    summary.unrecognized += 1;
                }
                Err(e) if e.is_not_found() && self.config.not_found == NotFoundPolicy::Discard => {
                    tracing::warn!(id, error = %e, "target gone, discarding action");
                    self.remove(id).await;
                    summary.discarded += 1;
                }
                Err(e) => {
                    tracing::warn!(id, kind = pending.action.kind_str(), error = %e, "replay failed");
                    summary.failed += 1;
                }
            }
        }

        if summary.attempted > 0 {
            tracing::info!(%summary, "drain pass finished");
        }
        summary
    }

    async fn replay(&self, action: &Action) -> Result<(), ReplayError> {
        match action {
            Action::CreateReport(report) => {
                self.api.create_report(report.clone()).await?;
            }
            Action::UpdateReport(patch) => {
                self.api.update_report(patch.clone()).await?;
            }
            Action::DeleteReport { id } => {
                self.api.delete_report(*id).await?;
            }
            Action::SendMessage(envelope) => {
                if !self.channel.is_connected() {
                    return Err(ChannelError::NotConnected.into());
                }
                self.channel.send(ChannelMessage::message(envelope)).await?;
            }
            Action::Unrecognized { kind, .. } => {
                return Err(ReplayError::Unrecognized(kind.clone()));
            }
        }
        Ok(())
    }

    async fn remove(&self, id: ActionId) {
        let guard = self.store.lock().await;
        if let Some(store) = guard.as_ref() {
            if let Err(e) = store.delete_action(id) {
                tracing::error!(id, error = %e, "failed to remove replayed action");
            }
        }
    }

    async fn cache_reports(&self, reports: &[Report]) {
        let mut guard = self.store.lock().await;
        let Some(store) = guard.as_mut() else {
            tracing::warn!("report cache not updated: store unavailable");
            return;
        };
        match store.replace_reports(reports) {
            Ok(()) => tracing::debug!(count = reports.len(), "report cache replaced"),
            Err(e) => tracing::error!(error = %e, "failed to cache reports"),
        }
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
