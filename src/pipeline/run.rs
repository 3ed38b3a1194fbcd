//! Run state and its export shape

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extractor::SearchResult;
use crate::provider::ProviderKind;

/// Lifecycle of a run: `Idle → Running → (Complete | Error)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Complete,
    Error,
}

impl RunStatus {
    fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running) | (Self::Running, Self::Complete | Self::Error)
        )
    }
}

/// Which stage produced a run's output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunSource {
    Provider(ProviderKind),
    Catalog,
    KnowledgeOnly,
}

/// A search result with its fetched page text
///
/// `content` may be a failure placeholder but is never missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedItem {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub content: String,
}

impl ScrapedItem {
    #[must_use]
    pub fn from_result(result: &SearchResult, content: String) -> Self {
        Self {
            title: result.title.clone(),
            url: result.url.clone(),
            snippet: result.snippet.clone(),
            content,
        }
    }
}

/// One query's unit of work
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRun {
    pub id: Uuid,
    pub query: String,
    status: RunStatus,
    /// Everything extracted by the winning stage; may exceed `items`
    pub results: Vec<SearchResult>,
    pub items: Vec<ScrapedItem>,
    pub summary: Option<String>,
    pub error: Option<String>,
    pub source: Option<RunSource>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl SearchRun {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: query.into(),
            status: RunStatus::Idle,
            results: Vec::new(),
            items: Vec::new(),
            summary: None,
            error: None,
            source: None,
            started_at: None,
            finished_at: None,
        }
    }

    #[must_use]
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Move forward in the lifecycle; backwards or repeated moves are refused
    fn advance(&mut self, next: RunStatus) -> bool {
        if !self.status.can_advance_to(next) {
            tracing::warn!(
                "Refusing run status change {:?} -> {:?}",
                self.status,
                next
            );
            return false;
        }
        self.status = next;
        true
    }

    pub(crate) fn start(&mut self) {
        if self.advance(RunStatus::Running) {
            self.started_at = Some(Utc::now());
        }
    }

    pub(crate) fn complete(&mut self, summary: String) {
        if self.advance(RunStatus::Complete) {
            self.summary = Some(summary);
            self.finished_at = Some(Utc::now());
        }
    }

    /// Terminal failure: no summary survives
    pub(crate) fn fail(&mut self, error: impl Into<String>) {
        if self.advance(RunStatus::Error) {
            self.summary = None;
            self.error = Some(error.into());
            self.finished_at = Some(Utc::now());
        }
    }

    /// Export shape for structured output
    #[must_use]
    pub fn to_record(&self) -> SearchRunRecord {
        SearchRunRecord {
            id: self.id,
            query: self.query.clone(),
            status: self.status,
            source: self.source,
            search_results: self.results.clone(),
            scraped_content: self.items.clone(),
            summary: self.summary.clone(),
            timestamp: self.finished_at.or(self.started_at).unwrap_or_else(Utc::now),
            error: self.error.clone(),
        }
    }
}

/// Serializable snapshot of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRunRecord {
    pub id: Uuid,
    pub query: String,
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<RunSource>,
    pub search_results: Vec<SearchResult>,
    pub scraped_content: Vec<ScrapedItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_only_moves_forward() {
        let mut run = SearchRun::new("q");
        run.complete("too early".to_string());
        assert_eq!(run.status(), RunStatus::Idle);

        run.start();
        run.complete("done".to_string());
        assert_eq!(run.status(), RunStatus::Complete);

        run.fail("late");
        assert_eq!(run.status(), RunStatus::Complete);
        assert_eq!(run.error, None);
    }

    #[test]
    fn failed_record_carries_error_and_no_summary() {
        let mut run = SearchRun::new("q");
        run.start();
        run.fail("boom");
        let json = serde_json::to_value(run.to_record()).expect("serialize");
        assert_eq!(json["error"], "boom");
        assert_eq!(json["status"], "error");
        assert!(json.get("summary").is_none());
        assert!(json["search_results"].as_array().is_some_and(Vec::is_empty));
    }
}
