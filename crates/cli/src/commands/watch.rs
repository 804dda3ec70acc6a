// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Foreground mode: follow connectivity and drain on a timer until Ctrl-C.

use std::future::Future;

use rh_core::ConnectivitySignal;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::colors;
use crate::error::{Error, Result};
use crate::host::Host;

/// Buffered connectivity changes. The probe only sends on a change.
const SIGNAL_BUFFER: usize = 8;

pub async fn run(host: &Host, probe_enabled: bool) -> Result<()> {
    let interrupt = async {
        tokio::signal::ctrl_c().await?;
        tracing::info!("interrupted");
        Ok::<(), Error>(())
    };
    watch_until(host, probe_enabled, interrupt).await
}

/// Run until `stop` resolves. Without the probe, connectivity stays where
/// it started.
pub(crate) async fn watch_until<F>(host: &Host, probe_enabled: bool, stop: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    let manager = &host.manager;
    manager.start().await;
    println!(
        "Watching {} ({}), press Ctrl-C to stop",
        host.config.api_base_url,
        colors::state(manager.state())
    );

    let (tx, rx) = mpsc::channel(SIGNAL_BUFFER);
    let cancel = CancellationToken::new();
    let probe = probe_enabled.then(|| {
        host.probe.clone().spawn(
            host.config.probe_interval(),
            manager.state(),
            tx.clone(),
            cancel.clone(),
        )
    });

    let (forward_tx, forward_rx) = mpsc::channel(SIGNAL_BUFFER);
    let result = tokio::select! {
        _ = async {
            tokio::join!(follow(host, rx, forward_tx), manager.run_signals(forward_rx))
        } => Ok(()),
        res = stop => res,
    };

    drop(tx);
    cancel.cancel();
    if let Some(task) = probe {
        if let Err(e) = task.await {
            tracing::warn!(error = %e, "probe task ended abnormally");
        }
    }
    result
}

/// Relay probe signals to the manager, opening the chat channel before a
/// reachable signal triggers a drain. Between signals, a dropped channel is
/// reopened on the probe interval while online.
pub(crate) async fn follow(
    host: &Host,
    mut signals: mpsc::Receiver<ConnectivitySignal>,
    forward: mpsc::Sender<ConnectivitySignal>,
) {
    let mut tick = tokio::time::interval(host.config.probe_interval());
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            signal = signals.recv() => {
                let Some(signal) = signal else { break };
                if signal == ConnectivitySignal::Reachable {
                    host.connect_channel().await;
                }
                if forward.send(signal).await.is_err() {
                    break;
                }
            }
            _ = tick.tick() => {
                if host.manager.is_online() && host.connect_channel().await {
                    let summary = host.manager.drain().await;
                    tracing::debug!(%summary, "drain after chat reconnect");
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
