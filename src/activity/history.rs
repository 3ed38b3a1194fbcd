//! Bounded retention window kept by an observer

use std::collections::VecDeque;

use super::reporter::ActivityFeed;
use super::types::ActivityEvent;
use crate::utils::DEFAULT_ACTIVITY_RETENTION;

/// The most recent N activity events, oldest first
#[derive(Debug, Clone)]
pub struct ActivityHistory {
    capacity: usize,
    events: VecDeque<ActivityEvent>,
}

impl Default for ActivityHistory {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVITY_RETENTION)
    }
}

impl ActivityHistory {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            events: VecDeque::with_capacity(capacity),
        }
    }

    /// Append events, truncating from the front to the retention window
    pub fn extend(&mut self, events: impl IntoIterator<Item = ActivityEvent>) {
        for event in events {
            if self.events.len() == self.capacity {
                self.events.pop_front();
            }
            self.events.push_back(event);
        }
    }

    /// Pull everything pending from `feed` into the window.
    /// Returns how many new events arrived.
    pub fn absorb(&mut self, feed: &mut ActivityFeed) -> usize {
        let fresh = feed.drain();
        let count = fresh.len();
        self.extend(fresh);
        count
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivityEvent> {
        self.events.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// One rendered line (or two, with details) per retained event
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&event.render());
            out.push('\n');
        }
        out
    }
}
