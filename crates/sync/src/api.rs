// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote API abstraction for the ReportHub REST backend.
//!
//! Provides a trait-based API layer that enables:
//! - Real HTTP calls for production
//! - Mock APIs for unit testing

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use rh_core::{NewReport, Report, ReportId, ReportPatch, SyncRequest, SyncResponse};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};
use crate::token::TokenSource;

/// Default ReportHub API base URL.
pub const DEFAULT_BASE_URL: &str = "https://reporting-api-uvze.onrender.com";

/// Boxed future returned by [`RemoteApi`] methods.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = ApiResult<T>> + Send + 'a>>;

/// The REST calls the sync layer replays and refreshes through.
pub trait RemoteApi: Send + Sync {
    /// `POST /reports`. Any success status counts, whatever the body.
    fn create_report(&self, report: NewReport) -> ApiFuture<'_, ()>;

    /// `PATCH /reports/{id}`. Any success status counts, whatever the body.
    fn update_report(&self, patch: ReportPatch) -> ApiFuture<'_, ()>;

    /// `DELETE /reports/{id}`
    fn delete_report(&self, id: ReportId) -> ApiFuture<'_, ()>;

    /// `GET /reports`
    fn list_reports(&self) -> ApiFuture<'_, Vec<Report>>;

    /// `POST /sync`
    fn sync(&self, request: SyncRequest) -> ApiFuture<'_, SyncResponse>;
}

/// [`RemoteApi`] over HTTP using reqwest.
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    token: Arc<dyn TokenSource>,
}

impl HttpApi {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(
        base_url: impl Into<String>,
        token: Arc<dyn TokenSource>,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(HttpApi {
            client,
            base_url,
            token,
        })
    }

    /// The normalized base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(&self, req: reqwest::RequestBuilder, path: &str) -> ApiResult<reqwest::Response> {
        let resp = self
            .authorize(req)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(resp, path).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        path: &str,
    ) -> ApiResult<T> {
        let resp = self.send(req, path).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Map a non-success status to an [`ApiError`].
async fn check_status(resp: reqwest::Response, path: &str) -> ApiResult<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let code = status.as_u16();
    tracing::debug!(path, status = code, "request rejected");
    match code {
        401 | 403 => Err(ApiError::Unauthorized(code)),
        404 => Err(ApiError::NotFound(path.to_string())),
        _ => {
            let body = resp.text().await.unwrap_or_default();
            Err(ApiError::Status { status: code, body })
        }
    }
}

impl RemoteApi for HttpApi {
    fn create_report(&self, report: NewReport) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let path = "/reports";
            let req = self.client.post(self.url(path)).json(&report);
            self.send(req, path).await?;
            Ok(())
        })
    }

    fn update_report(&self, patch: ReportPatch) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let path = format!("/reports/{}", patch.id);
            let req = self.client.patch(self.url(&path)).json(&patch);
            self.send(req, &path).await?;
            Ok(())
        })
    }

    fn delete_report(&self, id: ReportId) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let path = format!("/reports/{}", id);
            let req = self.client.delete(self.url(&path));
            self.send(req, &path).await?;
            Ok(())
        })
    }

    fn list_reports(&self) -> ApiFuture<'_, Vec<Report>> {
        Box::pin(async move {
            let path = "/reports";
            let req = self.client.get(self.url(path));
            self.send_json(req, path).await
        })
    }

    fn sync(&self, request: SyncRequest) -> ApiFuture<'_, SyncResponse> {
        Box::pin(async move {
            let path = "/sync";
            let req = self.client.post(self.url(path)).json(&request);
            self.send_json(req, path).await
        })
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
