//! Core configuration types for search runs
//!
//! `SearchConfig` carries every cap, timeout and provider choice a
//! `FallbackChain` needs. Build it with [`SearchConfig::builder`].

use serde::{Deserialize, Serialize};

use crate::provider::profile::ProviderProfile;

/// How a run obtains its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Providers, then the static catalog, then a model-only answer
    #[default]
    WebWithFallback,
    /// Skip retrieval entirely and answer from the model
    KnowledgeOnly,
}

/// Main configuration struct for search runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub(crate) mode: SearchMode,

    /// Results content-fetched per run. **INVARIANT:** `1..=MAX_RESULTS_LIMIT`
    pub(crate) max_results: usize,

    /// Containers walked by the extractor, independent of `max_results`
    pub(crate) extraction_cap: usize,

    pub(crate) max_content_chars: usize,
    pub(crate) corpus_content_chars: usize,

    /// Provider profiles in priority order (resolved from the provider order
    /// plus any overrides at build time)
    pub(crate) providers: Vec<ProviderProfile>,

    pub(crate) headless: bool,
    pub(crate) navigation_timeout_secs: u64,
    pub(crate) element_timeout_secs: u64,
    pub(crate) consent_timeout_secs: u64,
    pub(crate) load_state_timeout_secs: u64,
    pub(crate) settle_delay_ms: u64,
    pub(crate) typing_delay_ms: u64,
    pub(crate) fetch_timeout_secs: u64,

    /// Events an observer keeps on screen
    pub(crate) activity_retention: usize,

    pub(crate) summary_model: String,
    pub(crate) summary_max_tokens: u32,
    pub(crate) summary_temperature: f32,
    pub(crate) summary_timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::from(super::builder::SearchConfigBuilder::default())
    }
}
