//! Ordered activity log for pipeline progress
//!
//! A single writer (the pipeline, through cloned `ActivityReporter`s) appends
//! timestamped events; an observer drains them through `ActivityFeed` and keeps
//! a bounded window in `ActivityHistory` for display.

pub mod history;
pub mod reporter;
pub mod types;

pub use history::ActivityHistory;
pub use reporter::{ActivityFeed, ActivityReporter, activity_channel};
pub use types::{ActivityEvent, ActivityKind};
