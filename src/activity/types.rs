//! Event type definitions for the activity log
//!
//! Every pipeline stage emits `ActivityEvent`s. Events are append-only and
//! carry a per-reporter sequence number so readers can verify ordering.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of an activity event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    /// A run started
    Start,
    /// Browser navigation, typing, consent handling
    Browser,
    /// Result extraction and page fetching
    Scraping,
    /// Counts and neutral status
    Info,
    /// Non-fatal problem, the stage continues
    Warning,
    /// A stage failed
    Error,
    /// A step succeeded
    Success,
    /// Per-result fetch progress
    Progress,
    /// Summarizer activity
    Ai,
    /// Static catalog fallback in use
    Fallback,
    /// A snapshot was published
    Screenshot,
    /// A run finished
    Complete,
}

impl ActivityKind {
    /// Upper-case label used in rendered logs
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Browser => "BROWSER",
            Self::Scraping => "SCRAPING",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Success => "SUCCESS",
            Self::Progress => "PROGRESS",
            Self::Ai => "AI",
            Self::Fallback => "FALLBACK",
            Self::Screenshot => "SCREENSHOT",
            Self::Complete => "COMPLETE",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single timestamped entry in the activity log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Emission order within the reporter that produced it (0-based)
    pub seq: u64,
    pub timestamp: DateTime<Utc>,
    pub kind: ActivityKind,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ActivityEvent {
    /// Render as `[HH:MM:SS] KIND: description` plus an optional
    /// indented details line
    #[must_use]
    pub fn render(&self) -> String {
        let time = self.timestamp.with_timezone(&Local).format("%H:%M:%S");
        match &self.details {
            Some(details) if !details.is_empty() => format!(
                "[{time}] {}: {}\n    └─ {details}",
                self.kind, self.description
            ),
            _ => format!("[{time}] {}: {}", self.kind, self.description),
        }
    }
}
