// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wiring between the config and a running sync manager.

use std::sync::Arc;

use rh_core::ConnectivityState;
use rh_sync::{
    Collaborators, EnvToken, FileIndicator, FileToken, HttpApi, LiveChannel, LogIndicator,
    NoChannel, OfflineIndicator, OfflineSyncManager, ReachabilityProbe, TokenSource,
    WebSocketChannel,
};

use crate::config::Config;
use crate::error::Result;

/// A manager plus the pieces commands need alongside it.
pub struct Host {
    pub config: Config,
    pub manager: OfflineSyncManager,
    pub state: ConnectivityState,
    pub probe: ReachabilityProbe,
    channel: Option<WebSocketChannel>,
}

/// How much of the outside world a command needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    /// Local store only; never probes.
    Local,
    /// Probe the API unless `--offline` was given.
    Network,
}

impl Host {
    /// Build the manager for `config`.
    ///
    /// The chat channel is opened up front only for network commands that
    /// start online. Long-running commands reconnect it later through
    /// [`Host::connect_channel`].
    pub async fn open(config: Config, reach: Reach, force_offline: bool) -> Result<Self> {
        let token: Arc<dyn TokenSource> = match config.token_file() {
            Some(path) => Arc::new(FileToken::new(path)),
            None => Arc::new(EnvToken::new(&config.token_env)),
        };
        let api = HttpApi::new(&config.api_base_url, token, config.request_timeout())?;
        let probe = ReachabilityProbe::new(&config.api_base_url, config.request_timeout())
            .map_err(|e| rh_sync::ApiError::Network(e.to_string()))?;

        let state = match reach {
            _ if force_offline => ConnectivityState::Offline,
            Reach::Local => ConnectivityState::Offline,
            Reach::Network => probe.check().await,
        };
        tracing::debug!(%state, "initial connectivity");

        let ws = config.channel_url.as_ref().map(|_| WebSocketChannel::new());
        let channel: Arc<dyn LiveChannel> = match &ws {
            Some(ws) => Arc::new(ws.clone()),
            None => Arc::new(NoChannel),
        };

        let indicator: Arc<dyn OfflineIndicator> = match config.indicator_file() {
            Some(path) => Arc::new(FileIndicator::new(path)),
            None => Arc::new(LogIndicator::new()),
        };

        let parts = Collaborators {
            api: Arc::new(api),
            channel,
            indicator,
        };
        let manager =
            OfflineSyncManager::open(config.manager_config(), &config.store_path(), parts, state);

        let host = Host {
            config,
            manager,
            state,
            probe,
            channel: ws,
        };
        if reach == Reach::Network && state == ConnectivityState::Online {
            host.connect_channel().await;
        }
        Ok(host)
    }

    /// Open the chat channel if one is configured and not already open.
    ///
    /// Returns true when a new connection was made. A failed connect leaves
    /// messages queued.
    pub async fn connect_channel(&self) -> bool {
        let (Some(ws), Some(url)) = (&self.channel, &self.config.channel_url) else {
            return false;
        };
        if ws.is_connected() {
            return false;
        }
        match ws.connect(url).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    url = %url,
                    error = %e,
                    "chat channel unavailable, messages stay queued"
                );
                false
            }
        }
    }

    /// Stop background work and close the chat channel.
    pub async fn close(self) {
        self.manager.shutdown().await;
        if let Some(ws) = self.channel {
            ws.disconnect().await;
        }
    }
}
