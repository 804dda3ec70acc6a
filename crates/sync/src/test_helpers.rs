// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mock collaborators shared by the sync tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rh_core::{
    ChannelMessage, ConnectivityState, NewReport, Report, ReportId, ReportPatch, Store,
    SyncRequest, SyncResponse,
};
use tokio::sync::Notify;

use crate::api::{ApiFuture, RemoteApi};
use crate::channel::{ChannelFuture, LiveChannel};
use crate::error::{ApiError, ChannelError};
use crate::indicator::OfflineIndicator;
use crate::manager::{Collaborators, ManagerConfig, OfflineSyncManager};

/// A call observed by [`MockApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Create(String),
    Update(ReportId),
    Delete(ReportId),
    List,
    Sync(SyncRequest),
}

/// How a scripted call fails.
#[derive(Debug, Clone, Copy)]
pub enum Fail {
    NotFound,
    Server,
    Network,
}

impl Fail {
    fn error(self, key: &str) -> ApiError {
        match self {
            Fail::NotFound => ApiError::NotFound(key.to_string()),
            Fail::Server => ApiError::Status {
                status: 500,
                body: "internal error".into(),
            },
            Fail::Network => ApiError::Network("connection reset".into()),
        }
    }
}

/// Suspends the next API call until released.
#[derive(Default)]
pub struct Pause {
    pub entered: Notify,
    pub release: Notify,
}

/// Recording [`RemoteApi`] with scripted failures.
///
/// Failures are keyed by `create:<title>`, `update:<id>`, `delete:<id>`,
/// `list` or `sync` and persist until cleared.
#[derive(Default)]
pub struct MockApi {
    calls: Mutex<Vec<ApiCall>>,
    failures: Mutex<HashMap<String, Fail>>,
    server_reports: Mutex<Vec<Report>>,
    pause: Mutex<Option<Arc<Pause>>>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(MockApi::default())
    }

    pub fn fail(&self, key: &str, fail: Fail) {
        self.failures.lock().unwrap().insert(key.to_string(), fail);
    }

    pub fn clear_failures(&self) {
        self.failures.lock().unwrap().clear();
    }

    /// Collection returned by `list_reports` and `sync`.
    pub fn set_server_reports(&self, reports: Vec<Report>) {
        *self.server_reports.lock().unwrap() = reports;
    }

    /// Block the next call until `release` is notified.
    pub fn pause_next(&self) -> Arc<Pause> {
        let pause = Arc::new(Pause::default());
        *self.pause.lock().unwrap() = Some(Arc::clone(&pause));
        pause
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn record(&self, call: ApiCall, key: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        let pause = self.pause.lock().unwrap().take();
        if let Some(pause) = pause {
            pause.entered.notify_one();
            pause.release.notified().await;
        }
        match self.failures.lock().unwrap().get(&key) {
            Some(fail) => Err(fail.error(&key)),
            None => Ok(()),
        }
    }
}

impl RemoteApi for MockApi {
    fn create_report(&self, report: NewReport) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let key = format!("create:{}", report.title);
            self.record(ApiCall::Create(report.title), key).await
        })
    }

    fn update_report(&self, patch: ReportPatch) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let key = format!("update:{}", patch.id);
            self.record(ApiCall::Update(patch.id), key).await
        })
    }

    fn delete_report(&self, id: ReportId) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            self.record(ApiCall::Delete(id), format!("delete:{}", id))
                .await
        })
    }

    fn list_reports(&self) -> ApiFuture<'_, Vec<Report>> {
        Box::pin(async move {
            self.record(ApiCall::List, "list".into()).await?;
            Ok(self.server_reports.lock().unwrap().clone())
        })
    }

    fn sync(&self, request: SyncRequest) -> ApiFuture<'_, SyncResponse> {
        Box::pin(async move {
            self.record(ApiCall::Sync(request), "sync".into()).await?;
            Ok(SyncResponse {
                reports: self.server_reports.lock().unwrap().clone(),
            })
        })
    }
}

/// Recording [`LiveChannel`] with a togglable connection.
#[derive(Default)]
pub struct MockChannel {
    connected: AtomicBool,
    fail_send: AtomicBool,
    sent: Mutex<Vec<ChannelMessage>>,
}

impl MockChannel {
    pub fn new(connected: bool) -> Arc<Self> {
        let channel = MockChannel::default();
        channel.connected.store(connected, Ordering::SeqCst);
        Arc::new(channel)
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    pub fn set_fail_send(&self, fail: bool) {
        self.fail_send.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<ChannelMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl LiveChannel for MockChannel {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn send(&self, msg: ChannelMessage) -> ChannelFuture<'_> {
        Box::pin(async move {
            if !self.is_connected() {
                return Err(ChannelError::NotConnected);
            }
            if self.fail_send.load(Ordering::SeqCst) {
                return Err(ChannelError::SendFailed("broken pipe".into()));
            }
            self.sent.lock().unwrap().push(msg);
            Ok(())
        })
    }
}

/// [`OfflineIndicator`] that counts visible transitions.
#[derive(Default)]
pub struct RecordingIndicator {
    visible: AtomicBool,
    shown: AtomicUsize,
}

impl RecordingIndicator {
    /// Number of hidden → visible transitions.
    pub fn times_shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }
}

impl OfflineIndicator for RecordingIndicator {
    fn show(&self) {
        if !self.visible.swap(true, Ordering::SeqCst) {
            self.shown.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn hide(&self) {
        self.visible.store(false, Ordering::SeqCst);
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

/// A manager wired to mocks, with handles to inspect them.
pub struct Harness {
    pub manager: OfflineSyncManager,
    pub api: Arc<MockApi>,
    pub channel: Arc<MockChannel>,
    pub indicator: Arc<RecordingIndicator>,
}

impl Harness {
    pub fn new(initial: ConnectivityState) -> Self {
        Self::with_config(ManagerConfig::default(), initial)
    }

    pub fn with_config(config: ManagerConfig, initial: ConnectivityState) -> Self {
        Self::with_store(config, Some(Store::open_in_memory().unwrap()), initial)
    }

    pub fn with_store(config: ManagerConfig, store: Option<Store>, initial: ConnectivityState) -> Self {
        let api = MockApi::new();
        let channel = MockChannel::new(true);
        let indicator = Arc::new(RecordingIndicator::default());
        let parts = Collaborators {
            api: api.clone(),
            channel: channel.clone(),
            indicator: indicator.clone(),
        };
        let manager = OfflineSyncManager::new(config, store, parts, initial);
        Harness {
            manager,
            api,
            channel,
            indicator,
        }
    }
}
