// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User-visible offline notice.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Text shown while the manager is offline.
pub const OFFLINE_MESSAGE: &str = "You are currently offline. Working in offline mode.";

/// Shows and hides the offline notice. Both calls must be idempotent.
pub trait OfflineIndicator: Send + Sync {
    fn show(&self);
    fn hide(&self);
    fn is_visible(&self) -> bool;
}

/// Emits the notice through tracing on each visible transition.
#[derive(Debug, Default)]
pub struct LogIndicator {
    visible: AtomicBool,
}

impl LogIndicator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OfflineIndicator for LogIndicator {
    fn show(&self) {
        if !self.visible.swap(true, Ordering::SeqCst) {
            tracing::warn!("{}", OFFLINE_MESSAGE);
        }
    }

    fn hide(&self) {
        if self.visible.swap(false, Ordering::SeqCst) {
            tracing::info!("back online");
        }
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

/// Writes the notice to a marker file while offline, for status bars and
/// shell prompts to pick up. The file is removed when back online.
#[derive(Debug)]
pub struct FileIndicator {
    path: PathBuf,
}

impl FileIndicator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileIndicator { path: path.into() }
    }
}

impl OfflineIndicator for FileIndicator {
    fn show(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = std::fs::write(&self.path, format!("{}\n", OFFLINE_MESSAGE)) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write offline marker");
        }
    }

    fn hide(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove offline marker");
            }
        }
    }

    fn is_visible(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
#[path = "indicator_tests.rs"]
mod tests;
