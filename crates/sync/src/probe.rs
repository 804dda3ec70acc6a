// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reachability probing for hosts without OS connectivity events.
//!
//! The probe issues a lightweight request against the API base URL. Any HTTP
//! response, including an error status, means the server is reachable; only
//! transport failures count as unreachable.

use std::time::Duration;

use rh_core::{ConnectivitySignal, ConnectivityState};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Polls a URL and reports connectivity changes.
#[derive(Clone)]
pub struct ReachabilityProbe {
    client: reqwest::Client,
    url: String,
}

impl ReachabilityProbe {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(ReachabilityProbe {
            client,
            url: url.into(),
        })
    }

    /// Check once.
    pub async fn check(&self) -> ConnectivityState {
        match self.client.head(&self.url).send().await {
            Ok(resp) => {
                tracing::trace!(status = resp.status().as_u16(), "probe answered");
                ConnectivityState::Online
            }
            Err(e) => {
                tracing::debug!(url = %self.url, error = %e, "probe failed");
                ConnectivityState::Offline
            }
        }
    }

    /// Spawn a loop that checks every `period` and sends a signal whenever
    /// the result differs from the previous one. `initial` is the state the
    /// receiver already assumes, so no signal is sent until it changes.
    pub fn spawn(
        self,
        period: Duration,
        initial: ConnectivityState,
        signals: mpsc::Sender<ConnectivitySignal>,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut last = initial;
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {}
                }
                let state = self.check().await;
                if state == last {
                    continue;
                }
                last = state;
                let signal = match state {
                    ConnectivityState::Online => ConnectivitySignal::Reachable,
                    ConnectivityState::Offline => ConnectivitySignal::Unreachable,
                };
                if signals.send(signal).await.is_err() {
                    // Receiver gone
                    break;
                }
            }
            tracing::debug!("probe loop exited");
        })
    }
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
