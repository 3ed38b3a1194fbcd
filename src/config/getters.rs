//! Getter methods for `SearchConfig`

use std::time::Duration;

use super::types::{SearchConfig, SearchMode};
use crate::provider::profile::ProviderProfile;

impl SearchConfig {
    #[must_use]
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    #[must_use]
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    #[must_use]
    pub fn extraction_cap(&self) -> usize {
        self.extraction_cap
    }

    #[must_use]
    pub fn max_content_chars(&self) -> usize {
        self.max_content_chars
    }

    #[must_use]
    pub fn corpus_content_chars(&self) -> usize {
        self.corpus_content_chars
    }

    /// Provider profiles in the order they are attempted
    #[must_use]
    pub fn providers(&self) -> &[ProviderProfile] {
        &self.providers
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    #[must_use]
    pub fn element_timeout(&self) -> Duration {
        Duration::from_secs(self.element_timeout_secs)
    }

    #[must_use]
    pub fn consent_timeout(&self) -> Duration {
        Duration::from_secs(self.consent_timeout_secs)
    }

    #[must_use]
    pub fn load_state_timeout(&self) -> Duration {
        Duration::from_secs(self.load_state_timeout_secs)
    }

    /// Pause after the results page reports loaded
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    #[must_use]
    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    #[must_use]
    pub fn activity_retention(&self) -> usize {
        self.activity_retention
    }

    #[must_use]
    pub fn summary_model(&self) -> &str {
        &self.summary_model
    }

    #[must_use]
    pub fn summary_max_tokens(&self) -> u32 {
        self.summary_max_tokens
    }

    #[must_use]
    pub fn summary_temperature(&self) -> f32 {
        self.summary_temperature
    }

    #[must_use]
    pub fn summary_timeout(&self) -> Duration {
        Duration::from_secs(self.summary_timeout_secs)
    }
}
