//! Writer and reader halves of the activity log
//!
//! `ActivityReporter` is handed to every pipeline component; `ActivityFeed` is
//! handed to the observer. The buffer between them is unbounded so emitting
//! never blocks the pipeline. Retention is applied on the reader side by
//! [`ActivityHistory`](super::history::ActivityHistory).

use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use super::types::{ActivityEvent, ActivityKind};
use crate::runtime::{Rx, Tx, unbounded};

/// Create a connected reporter/feed pair
#[must_use]
pub fn activity_channel() -> (ActivityReporter, ActivityFeed) {
    let (tx, rx) = unbounded();
    (
        ActivityReporter {
            inner: Arc::new(Mutex::new(ReporterInner { tx, next_seq: 0 })),
        },
        ActivityFeed { rx },
    )
}

struct ReporterInner {
    tx: Tx<ActivityEvent>,
    next_seq: u64,
}

/// Append-only event sink shared by all pipeline stages
///
/// Clones share one sequence counter; sequence assignment and enqueueing
/// happen under the same lock so sequence order equals delivery order.
#[derive(Clone)]
pub struct ActivityReporter {
    inner: Arc<Mutex<ReporterInner>>,
}

impl ActivityReporter {
    /// Reporter whose feed is already dropped; events are only traced
    #[must_use]
    pub fn detached() -> Self {
        let (reporter, feed) = activity_channel();
        drop(feed);
        reporter
    }

    /// Emit an event without details
    pub fn emit(&self, kind: ActivityKind, description: impl Into<String>) {
        self.push(kind, description.into(), None);
    }

    /// Emit an event with a details line
    pub fn emit_with_details(
        &self,
        kind: ActivityKind,
        description: impl Into<String>,
        details: impl Into<String>,
    ) {
        self.push(kind, description.into(), Some(details.into()));
    }

    fn push(&self, kind: ActivityKind, description: String, details: Option<String>) {
        tracing::debug!(kind = %kind, details = ?details, "{description}");

        let mut inner = self.inner.lock();
        let event = ActivityEvent {
            seq: inner.next_seq,
            timestamp: Utc::now(),
            kind,
            description,
            details,
        };
        inner.next_seq += 1;

        // Observer gone: the run continues, the event is only traced
        if inner.tx.send(event).is_err() {
            log::trace!("Activity feed closed, event dropped");
        }
    }

    /// Number of events emitted so far through this reporter
    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.inner.lock().next_seq
    }
}

impl std::fmt::Debug for ActivityReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityReporter")
            .field("emitted", &self.emitted())
            .finish()
    }
}

/// Observer side of the activity log
#[derive(Debug)]
pub struct ActivityFeed {
    rx: Rx<ActivityEvent>,
}

impl ActivityFeed {
    /// Everything emitted since the last drain, in emission order
    pub fn drain(&mut self) -> Vec<ActivityEvent> {
        self.rx.drain()
    }

    /// Wait for the next event. `None` once all reporters are dropped.
    pub async fn next(&mut self) -> Option<ActivityEvent> {
        self.rx.recv().await
    }

    /// Wait up to `timeout` for the next event
    pub async fn next_timeout(&mut self, timeout: Duration) -> Option<ActivityEvent> {
        self.rx.recv_timeout(timeout).await
    }
}
