//! Latest-wins snapshot hand-off between the pipeline and an observer
//!
//! Holds at most one undelivered screenshot. Publishing replaces whatever is
//! waiting; taking empties the slot. This is not a history queue.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Image encoding of a snapshot's bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageEncoding {
    Png,
    Jpeg,
}

impl ImageEncoding {
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// A captured viewport image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub bytes: Vec<u8>,
    pub encoding: ImageEncoding,
    /// Which provider page the image shows
    pub source: String,
    pub captured_at: DateTime<Utc>,
}

impl Snapshot {
    #[must_use]
    pub fn png(bytes: Vec<u8>, source: impl Into<String>) -> Self {
        Self {
            bytes,
            encoding: ImageEncoding::Png,
            source: source.into(),
            captured_at: Utc::now(),
        }
    }

    /// Standard base64 of the raw bytes, for inline display
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// `data:` URL suitable for an `<img src>`
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.encoding.mime_type(), self.to_base64())
    }
}

/// Capacity-1 channel with explicit latest-wins semantics
///
/// Cloning yields another handle to the same slot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotChannel {
    slot: Arc<Mutex<Option<Snapshot>>>,
    ready: Arc<Notify>,
}

impl SnapshotChannel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `snapshot`, discarding any undelivered one.
    /// Returns true when a prior snapshot was discarded.
    pub fn publish(&self, snapshot: Snapshot) -> bool {
        let discarded = self.slot.lock().replace(snapshot).is_some();
        if discarded {
            tracing::trace!("Discarded undelivered snapshot");
        }
        self.ready.notify_one();
        discarded
    }

    /// Take the pending snapshot, leaving the slot empty
    #[must_use]
    pub fn take(&self) -> Option<Snapshot> {
        self.slot.lock().take()
    }

    /// Wait up to `timeout` for a snapshot to become available and take it
    pub async fn take_timeout(&self, timeout: Duration) -> Option<Snapshot> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if let Some(snapshot) = self.take() {
                return Some(snapshot);
            }
            // A wakeup may be a permit left by a publish whose snapshot was
            // already taken; keep waiting until the deadline in that case.
            if tokio::time::timeout_at(deadline, self.ready.notified())
                .await
                .is_err()
            {
                return self.take();
            }
        }
    }

    /// True when an undelivered snapshot is waiting
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.slot.lock().is_some()
    }
}
