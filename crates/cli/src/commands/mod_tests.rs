// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

//! Test support for command implementations.
//!
//! Commands are exercised against a manager backed by an in-memory store and
//! a canned API, so no test touches the network or the user's data dir.

use std::sync::{Arc, Mutex};

use rh_core::{
    ConnectivityState, NewReport, Report, ReportId, ReportPatch, Store, SyncRequest, SyncResponse,
};
use rh_sync::{
    ApiError, ApiFuture, Collaborators, LogIndicator, ManagerConfig, NoChannel,
    OfflineSyncManager, RemoteApi,
};

/// A [`RemoteApi`] that answers from a fixed report list.
#[derive(Default)]
pub struct CannedApi {
    pub reports: Mutex<Vec<Report>>,
    pub fail_sync: Mutex<bool>,
    pub synced: Mutex<Vec<SyncRequest>>,
}

impl RemoteApi for CannedApi {
    fn create_report(&self, report: NewReport) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let mut reports = self.reports.lock().unwrap();
            let id = reports.iter().map(|r| r.id).max().unwrap_or(0) + 1;
            reports.push(Report::new(id, report.title));
            Ok(())
        })
    }

    fn update_report(&self, patch: ReportPatch) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let reports = self.reports.lock().unwrap();
            if !reports.iter().any(|r| r.id == patch.id) {
                return Err(ApiError::NotFound(format!("/reports/{}", patch.id)));
            }
            Ok(())
        })
    }

    fn delete_report(&self, id: ReportId) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let mut reports = self.reports.lock().unwrap();
            let before = reports.len();
            reports.retain(|r| r.id != id);
            if reports.len() == before {
                return Err(ApiError::NotFound(format!("/reports/{}", id)));
            }
            Ok(())
        })
    }

    fn list_reports(&self) -> ApiFuture<'_, Vec<Report>> {
        Box::pin(async move { Ok(self.reports.lock().unwrap().clone()) })
    }

    fn sync(&self, request: SyncRequest) -> ApiFuture<'_, SyncResponse> {
        Box::pin(async move {
            if *self.fail_sync.lock().unwrap() {
                return Err(ApiError::Status {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            self.synced.lock().unwrap().push(request);
            Ok(SyncResponse {
                reports: self.reports.lock().unwrap().clone(),
            })
        })
    }
}

/// A manager wired to a [`CannedApi`] and an in-memory store.
pub struct TestContext {
    pub manager: OfflineSyncManager,
    pub api: Arc<CannedApi>,
}

impl TestContext {
    pub fn new(state: ConnectivityState) -> Self {
        let api = Arc::new(CannedApi::default());
        let parts = Collaborators {
            api: api.clone(),
            channel: Arc::new(NoChannel),
            indicator: Arc::new(LogIndicator::new()),
        };
        let store = Store::open_in_memory().unwrap();
        let manager = OfflineSyncManager::new(ManagerConfig::default(), Some(store), parts, state);
        TestContext { manager, api }
    }

    pub fn offline() -> Self {
        Self::new(ConnectivityState::Offline)
    }

    pub fn online() -> Self {
        Self::new(ConnectivityState::Online)
    }

    /// A manager whose store failed to open.
    pub fn without_store() -> Self {
        let api = Arc::new(CannedApi::default());
        let parts = Collaborators {
            api: api.clone(),
            channel: Arc::new(NoChannel),
            indicator: Arc::new(LogIndicator::new()),
        };
        let manager =
            OfflineSyncManager::new(ManagerConfig::default(), None, parts, ConnectivityState::Offline);
        TestContext { manager, api }
    }

    /// Seed the server side.
    pub fn server_has(&self, id: ReportId, title: &str) -> &Self {
        self.api.reports.lock().unwrap().push(Report::new(id, title));
        self
    }
}

#[test]
fn truncate_keeps_short_text() {
    assert_eq!(super::truncate("hello", 10), "hello");
}

#[test]
fn truncate_marks_the_cut() {
    assert_eq!(super::truncate("abcdefghij", 6), "abc...");
}
