//! Fluent setters for `SearchConfigBuilder`

use super::builder::SearchConfigBuilder;
use super::types::SearchMode;
use crate::provider::profile::{ProviderKind, ProviderProfile};

impl SearchConfigBuilder {
    #[must_use]
    pub fn mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Results content-fetched per run (1 to 10)
    #[must_use]
    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    #[must_use]
    pub fn extraction_cap(mut self, cap: usize) -> Self {
        self.extraction_cap = cap;
        self
    }

    #[must_use]
    pub fn max_content_chars(mut self, chars: usize) -> Self {
        self.max_content_chars = chars;
        self
    }

    #[must_use]
    pub fn corpus_content_chars(mut self, chars: usize) -> Self {
        self.corpus_content_chars = chars;
        self
    }

    /// Providers to try, highest priority first
    #[must_use]
    pub fn provider_order(mut self, order: impl IntoIterator<Item = ProviderKind>) -> Self {
        self.provider_order = order.into_iter().collect();
        self
    }

    /// Replace the built-in profile for `profile.kind`
    #[must_use]
    pub fn provider_profile(mut self, profile: ProviderProfile) -> Self {
        self.profile_overrides.push(profile);
        self
    }

    /// Show the browser window (debugging aid)
    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn navigation_timeout_secs(mut self, secs: u64) -> Self {
        self.navigation_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn element_timeout_secs(mut self, secs: u64) -> Self {
        self.element_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn consent_timeout_secs(mut self, secs: u64) -> Self {
        self.consent_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn load_state_timeout_secs(mut self, secs: u64) -> Self {
        self.load_state_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn settle_delay_ms(mut self, ms: u64) -> Self {
        self.settle_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn typing_delay_ms(mut self, ms: u64) -> Self {
        self.typing_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn activity_retention(mut self, events: usize) -> Self {
        self.activity_retention = events;
        self
    }

    #[must_use]
    pub fn summary_model(mut self, model: impl Into<String>) -> Self {
        self.summary_model = model.into();
        self
    }

    #[must_use]
    pub fn summary_max_tokens(mut self, tokens: u32) -> Self {
        self.summary_max_tokens = tokens;
        self
    }

    #[must_use]
    pub fn summary_temperature(mut self, temperature: f32) -> Self {
        self.summary_temperature = temperature;
        self
    }

    #[must_use]
    pub fn summary_timeout_secs(mut self, secs: u64) -> Self {
        self.summary_timeout_secs = secs;
        self
    }
}
