// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recurring drain task.
//!
//! Ticks on a fixed period and also wakes on demand when an action is queued
//! while online. Ticks that land while a pass is running are skipped rather
//! than queued up behind it.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::manager::Inner;

/// Handle to the running timer task. Dropping it stops the task.
pub(crate) struct DrainTimer {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl DrainTimer {
    /// Spawn the timer. The first tick fires one `period` from now.
    pub(crate) fn spawn(manager: Weak<Inner>, wake: Arc<Notify>, period: Duration) -> Self {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(manager, wake, period, cancel.clone()));
        DrainTimer { cancel, handle }
    }

    /// Stop future ticks. A pass already in flight runs to completion.
    pub(crate) fn stop(self) {
        self.cancel.cancel();
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for DrainTimer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run(manager: Weak<Inner>, wake: Arc<Notify>, period: Duration, cancel: CancellationToken) {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {}
            _ = wake.notified() => {
                tracing::trace!("drain requested");
            }
        }

        let Some(inner) = manager.upgrade() else {
            break;
        };
        let summary = inner.drain().await;
        tracing::trace!(%summary, "timer pass");
    }
    tracing::trace!("drain timer exited");
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
