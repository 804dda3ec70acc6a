// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed store for the offline client.
//!
//! The [`Store`] holds two collections:
//! - `pending_actions`: the durable replay queue, ids assigned on insert
//! - `reports`: the snapshot cache of the last server collection

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;

use crate::action::{Action, ActionId, PendingAction};
use crate::error::{Error, Result};
use crate::report::Report;

/// SQL schema for the offline store.
pub const SCHEMA: &str = r#"
-- Replay queue. AUTOINCREMENT keeps ids strictly increasing and never reused.
CREATE TABLE IF NOT EXISTS pending_actions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    kind TEXT NOT NULL,
    payload TEXT NOT NULL,
    enqueued_at TEXT NOT NULL
);

-- Snapshot cache of reports, one JSON document per report
CREATE TABLE IF NOT EXISTS reports (
    id INTEGER PRIMARY KEY,
    status TEXT NOT NULL,
    body TEXT NOT NULL,
    cached_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_reports_status ON reports(status);
"#;

/// Enqueue time is diagnostic only; an unreadable value reads as the epoch.
fn parse_enqueued_at(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Parse a cached report document from the database.
fn parse_report(value: &str) -> std::result::Result<Report, rusqlite::Error> {
    serde_json::from_str(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!("invalid report document: {e}"))),
        )
    })
}

/// Apply the schema to a connection. Idempotent.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// SQLite connection holding the replay queue and the report cache.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open a store at the given path, creating the file and tables if needed.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        run_migrations(&conn)?;
        Ok(Store { conn })
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;
        Ok(Store { conn })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Replay queue
    // ─────────────────────────────────────────────────────────────────────

    /// Append an action to the queue and return its assigned id.
    pub fn add_action(&self, action: &Action) -> Result<ActionId> {
        self.add_action_at(action, Utc::now())
    }

    /// Append an action with an explicit enqueue time.
    pub fn add_action_at(&self, action: &Action, enqueued_at: DateTime<Utc>) -> Result<ActionId> {
        let payload = action.payload_json()?;
        self.conn.execute(
            "INSERT INTO pending_actions (kind, payload, enqueued_at) VALUES (?1, ?2, ?3)",
            params![action.kind_str(), payload, enqueued_at.to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All queued actions in ascending id order.
    ///
    /// Rows that cannot be decoded come back as [`Action::Unrecognized`] so
    /// they stay visible instead of disappearing from the queue.
    pub fn pending_actions(&self) -> Result<Vec<PendingAction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, kind, payload, enqueued_at FROM pending_actions ORDER BY id ASC",
        )?;
        let actions = stmt
            .query_map([], |row| {
                let kind: String = row.get(1)?;
                let payload: String = row.get(2)?;
                let enqueued_str: String = row.get(3)?;
                Ok(PendingAction {
                    id: row.get(0)?,
                    action: Action::decode_lenient(&kind, &payload),
                    enqueued_at: parse_enqueued_at(&enqueued_str),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(actions)
    }

    /// Remove one action. Returns false if it was already gone.
    pub fn delete_action(&self, id: ActionId) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM pending_actions WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    /// Remove every queued action.
    pub fn clear_actions(&self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM pending_actions", [])?)
    }

    /// Number of queued actions.
    pub fn pending_count(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM pending_actions", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Report cache
    // ─────────────────────────────────────────────────────────────────────

    /// Replace the whole cached collection in one transaction.
    ///
    /// Reports absent from `reports` are dropped. If the same id appears
    /// more than once, the last occurrence wins.
    pub fn replace_reports(&mut self, reports: &[Report]) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM reports", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO reports (id, status, body, cached_at)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for report in reports {
                let body = serde_json::to_string(report)?;
                stmt.execute(params![report.id, report.status.as_str(), body, now])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Insert or overwrite a single cached report.
    pub fn put_report(&self, report: &Report) -> Result<()> {
        let body = serde_json::to_string(report)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO reports (id, status, body, cached_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                report.id,
                report.status.as_str(),
                body,
                Utc::now().to_rfc3339()
            ],
        )?;
        Ok(())
    }

    /// All cached reports in ascending id order.
    pub fn reports(&self) -> Result<Vec<Report>> {
        let mut stmt = self
            .conn
            .prepare("SELECT body FROM reports ORDER BY id ASC")?;
        let reports = stmt
            .query_map([], |row| {
                let body: String = row.get(0)?;
                parse_report(&body)
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(reports)
    }

    /// Cached reports still tagged as local-only.
    pub fn local_reports(&self) -> Result<Vec<Report>> {
        let mut stmt = self
            .conn
            .prepare("SELECT body FROM reports WHERE status = 'local' ORDER BY id ASC")?;
        let reports = stmt
            .query_map([], |row| {
                let body: String = row.get(0)?;
                parse_report(&body)
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(reports)
    }

    /// Number of cached reports.
    pub fn report_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM reports", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Drop the cached collection.
    pub fn clear_reports(&self) -> Result<()> {
        self.conn.execute("DELETE FROM reports", [])?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
