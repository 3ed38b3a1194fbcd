//! Builder for `SearchConfig`
//!
//! All fields have defaults; `build()` validates ranges and resolves the
//! provider order into concrete profiles.

use anyhow::{Result, anyhow, bail};
use std::collections::HashSet;

use super::types::{SearchConfig, SearchMode};
use crate::provider::profile::{ProviderKind, ProviderProfile};
use crate::utils::constants::{
    CONSENT_TIMEOUT_SECS, CORPUS_CONTENT_CHARS, DEFAULT_ACTIVITY_RETENTION,
    DEFAULT_MAX_CONTENT_CHARS, DEFAULT_MAX_RESULTS, DEFAULT_SUMMARY_MAX_TOKENS,
    DEFAULT_SUMMARY_MODEL, DEFAULT_SUMMARY_TEMPERATURE, ELEMENT_TIMEOUT_SECS, EXTRACTION_CAP,
    FETCH_TIMEOUT_SECS, LOAD_STATE_TIMEOUT_SECS, MAX_RESULTS_LIMIT, MAX_TYPING_DELAY_MS,
    NAVIGATION_TIMEOUT_SECS, SETTLE_DELAY_MS, SUMMARY_TIMEOUT_SECS, TYPING_DELAY_MS,
};

#[derive(Debug, Clone)]
pub struct SearchConfigBuilder {
    pub(crate) mode: SearchMode,
    pub(crate) max_results: usize,
    pub(crate) extraction_cap: usize,
    pub(crate) max_content_chars: usize,
    pub(crate) corpus_content_chars: usize,
    pub(crate) provider_order: Vec<ProviderKind>,
    pub(crate) profile_overrides: Vec<ProviderProfile>,
    pub(crate) headless: bool,
    pub(crate) navigation_timeout_secs: u64,
    pub(crate) element_timeout_secs: u64,
    pub(crate) consent_timeout_secs: u64,
    pub(crate) load_state_timeout_secs: u64,
    pub(crate) settle_delay_ms: u64,
    pub(crate) typing_delay_ms: u64,
    pub(crate) fetch_timeout_secs: u64,
    pub(crate) activity_retention: usize,
    pub(crate) summary_model: String,
    pub(crate) summary_max_tokens: u32,
    pub(crate) summary_temperature: f32,
    pub(crate) summary_timeout_secs: u64,
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self {
            mode: SearchMode::default(),
            max_results: DEFAULT_MAX_RESULTS,
            extraction_cap: EXTRACTION_CAP,
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
            corpus_content_chars: CORPUS_CONTENT_CHARS,
            provider_order: vec![ProviderKind::Google, ProviderKind::DuckDuckGo],
            profile_overrides: Vec::new(),
            headless: true,
            navigation_timeout_secs: NAVIGATION_TIMEOUT_SECS,
            element_timeout_secs: ELEMENT_TIMEOUT_SECS,
            consent_timeout_secs: CONSENT_TIMEOUT_SECS,
            load_state_timeout_secs: LOAD_STATE_TIMEOUT_SECS,
            settle_delay_ms: SETTLE_DELAY_MS,
            typing_delay_ms: TYPING_DELAY_MS,
            fetch_timeout_secs: FETCH_TIMEOUT_SECS,
            activity_retention: DEFAULT_ACTIVITY_RETENTION,
            summary_model: DEFAULT_SUMMARY_MODEL.to_string(),
            summary_max_tokens: DEFAULT_SUMMARY_MAX_TOKENS,
            summary_temperature: DEFAULT_SUMMARY_TEMPERATURE,
            summary_timeout_secs: SUMMARY_TIMEOUT_SECS,
        }
    }
}

impl SearchConfig {
    /// Create a builder for configuring a `SearchConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }
}

impl SearchConfigBuilder {
    fn resolve_providers(&self) -> Vec<ProviderProfile> {
        self.provider_order
            .iter()
            .map(|kind| {
                self.profile_overrides
                    .iter()
                    .rev()
                    .find(|profile| profile.kind == *kind)
                    .cloned()
                    .unwrap_or_else(|| kind.profile())
            })
            .collect()
    }

    pub fn build(self) -> Result<SearchConfig> {
        if !(1..=MAX_RESULTS_LIMIT).contains(&self.max_results) {
            bail!(
                "max_results must be between 1 and {MAX_RESULTS_LIMIT}, got {}",
                self.max_results
            );
        }
        if self.extraction_cap == 0 {
            bail!("extraction_cap must be at least 1");
        }
        if self.max_content_chars == 0 {
            bail!("max_content_chars must be at least 1");
        }
        if self.typing_delay_ms > MAX_TYPING_DELAY_MS {
            bail!(
                "typing_delay_ms must be at most {MAX_TYPING_DELAY_MS}, got {}",
                self.typing_delay_ms
            );
        }
        if !(0.0..=2.0).contains(&self.summary_temperature) {
            bail!(
                "summary_temperature must be within 0.0..=2.0, got {}",
                self.summary_temperature
            );
        }
        if self.summary_model.trim().is_empty() {
            return Err(anyhow!("summary_model must not be empty"));
        }

        let mut seen = HashSet::new();
        for kind in &self.provider_order {
            if !seen.insert(*kind) {
                bail!("provider {kind} listed more than once");
            }
        }
        if self.provider_order.is_empty() && self.mode == SearchMode::WebWithFallback {
            tracing::warn!("No search providers configured; runs go straight to the catalog");
        }

        Ok(SearchConfig::from(self))
    }
}

impl From<SearchConfigBuilder> for SearchConfig {
    /// Unvalidated conversion; prefer [`SearchConfigBuilder::build`]
    fn from(builder: SearchConfigBuilder) -> Self {
        let providers = builder.resolve_providers();
        Self {
            mode: builder.mode,
            max_results: builder.max_results,
            extraction_cap: builder.extraction_cap,
            max_content_chars: builder.max_content_chars,
            corpus_content_chars: builder.corpus_content_chars,
            providers,
            headless: builder.headless,
            navigation_timeout_secs: builder.navigation_timeout_secs,
            element_timeout_secs: builder.element_timeout_secs,
            consent_timeout_secs: builder.consent_timeout_secs,
            load_state_timeout_secs: builder.load_state_timeout_secs,
            settle_delay_ms: builder.settle_delay_ms,
            typing_delay_ms: builder.typing_delay_ms,
            fetch_timeout_secs: builder.fetch_timeout_secs,
            activity_retention: builder.activity_retention,
            summary_model: builder.summary_model,
            summary_max_tokens: builder.summary_max_tokens,
            summary_temperature: builder.summary_temperature,
            summary_timeout_secs: builder.summary_timeout_secs,
        }
    }
}
