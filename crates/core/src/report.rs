// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report types mirrored from the ReportHub API.
//!
//! Only the fields the offline client reasons about are typed. Everything
//! else the server sends is kept in `extra` so a cached snapshot can be
//! handed back to callers unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Server-side report identifier.
pub type ReportId = i64;

/// Review status of a report.
///
/// `Local` is never assigned by the server: it tags reports created on this
/// device that still have to be pushed through a full sync.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportStatus {
    /// Created locally, not yet known to the server.
    Local,
    /// Submitted and awaiting review.
    #[default]
    Pending,
    /// Accepted by a reviewer.
    Approved,
    /// Rejected by a reviewer.
    Rejected,
    /// Any status this client does not know about.
    Other(String),
}

impl ReportStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ReportStatus::Local => "local",
            ReportStatus::Pending => "pending",
            ReportStatus::Approved => "approved",
            ReportStatus::Rejected => "rejected",
            ReportStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for ReportStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "local" => ReportStatus::Local,
            "pending" => ReportStatus::Pending,
            "approved" => ReportStatus::Approved,
            "rejected" => ReportStatus::Rejected,
            _ => ReportStatus::Other(s),
        }
    }
}

impl From<&str> for ReportStatus {
    fn from(s: &str) -> Self {
        ReportStatus::from(s.to_string())
    }
}

impl From<ReportStatus> for String {
    fn from(status: ReportStatus) -> Self {
        status.as_str().to_string()
    }
}

/// A report as stored in the local snapshot cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub status: ReportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    /// Creation time exactly as the server formatted it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_comments: Option<String>,
    /// Server fields without a typed counterpart (attachments, timestamps, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Report {
    /// Creates a report with only an id and a title.
    pub fn new(id: ReportId, title: impl Into<String>) -> Self {
        Report {
            id,
            title: title.into(),
            description: None,
            category: None,
            status: ReportStatus::default(),
            author_name: None,
            created_at: None,
            admin_comments: None,
            extra: Map::new(),
        }
    }

    /// Creates a report tagged as local-only.
    pub fn local(id: ReportId, title: impl Into<String>) -> Self {
        Report {
            status: ReportStatus::Local,
            ..Report::new(id, title)
        }
    }

    /// Returns true if the report was created on this device and never pushed.
    pub fn is_local(&self) -> bool {
        self.status == ReportStatus::Local
    }
}

/// Fields submitted when creating a report.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewReport {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewReport {
    pub fn new(title: impl Into<String>) -> Self {
        NewReport {
            title: title.into(),
            ..NewReport::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// A partial update keyed by report id. Unset fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportPatch {
    pub id: ReportId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReportStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReportPatch {
    pub fn new(id: ReportId) -> Self {
        ReportPatch {
            id,
            ..ReportPatch::default()
        }
    }

    /// Returns true if the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.status.is_none()
            && self.extra.is_empty()
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
