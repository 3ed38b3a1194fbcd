//! Browser capability seams
//!
//! The search pipeline never talks to chromiumoxide directly. It drives a
//! `PageAccessor` obtained from a `PageSource`, which keeps provider logic
//! testable with in-process fakes and lets the automation engine be swapped.

use async_trait::async_trait;
use std::time::Duration;

/// Error raised by a page capability call
#[derive(Debug, Clone, thiserror::Error)]
pub enum PageError {
    /// The operation exceeded its time budget
    #[error("{operation} timed out after {}ms", .after.as_millis())]
    Timeout {
        operation: String,
        after: Duration,
    },

    /// The requested element does not exist in the current document
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// Any other automation failure (crashed target, protocol error, ...)
    #[error("browser error: {0}")]
    Browser(String),
}

impl PageError {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Document readiness condition to wait for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitMode {
    /// `document.readyState` is at least `interactive`
    DomContentLoaded,
    /// `document.readyState` is `complete`
    Load,
    /// `complete` and no new resource entries for a short quiet window
    NetworkIdle,
}

/// Handle to an element found by [`PageAccessor::locate`]
///
/// Carries the selector that matched so later calls re-resolve the same node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub selector: String,
}

/// A controllable browser tab
#[async_trait]
pub trait PageAccessor: Send + Sync {
    /// Open `url` and wait for `wait` within `timeout`
    async fn navigate(&self, url: &str, wait: WaitMode, timeout: Duration)
    -> Result<(), PageError>;

    /// First candidate selector (in priority order) that is visible within
    /// `timeout`, or `None`
    async fn locate(
        &self,
        candidates: &[String],
        timeout: Duration,
    ) -> Result<Option<Located>, PageError>;

    async fn click(&self, element: &Located) -> Result<(), PageError>;

    /// Remove any pre-filled value from an input
    async fn clear(&self, element: &Located) -> Result<(), PageError>;

    /// Type `text` one key at a time, pausing roughly `key_delay` between keys
    async fn type_text(
        &self,
        element: &Located,
        text: &str,
        key_delay: Duration,
    ) -> Result<(), PageError>;

    /// Submit the form owning `element` (presses Enter)
    async fn submit(&self, element: &Located) -> Result<(), PageError>;

    async fn wait_load_state(&self, mode: WaitMode, timeout: Duration) -> Result<(), PageError>;

    /// Viewport screenshot, PNG-encoded
    async fn screenshot(&self) -> Result<Vec<u8>, PageError>;

    /// Serialized DOM of the current document
    async fn content(&self) -> Result<String, PageError>;

    async fn close(&self) -> Result<(), PageError>;
}

/// Factory of fresh pages, one per provider attempt
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn open_page(&self) -> Result<Box<dyn PageAccessor>, PageError>;
}
