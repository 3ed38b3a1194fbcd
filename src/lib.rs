//! Browser-driven web search with fallback chains and AI summaries
//!
//! A query runs through ordered search providers (driven in a real browser),
//! then a small static catalog, then a model-only answer. Whatever stage
//! yields content gets its pages fetched and summarized. Progress events and
//! the latest results-page screenshot are published on side channels while
//! the run executes.

pub mod activity;
pub mod browser;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod pipeline;
pub mod provider;
pub mod runtime;
pub mod snapshot;
pub mod summarizer;
pub mod utils;

use std::sync::Arc;

pub use activity::{ActivityEvent, ActivityFeed, ActivityHistory, ActivityKind, ActivityReporter, activity_channel};
pub use browser::{BrowserManager, LaunchOptions, PageAccessor, PageError, PageSource, WaitMode};
pub use config::{SearchConfig, SearchMode};
pub use extractor::{ResultExtractor, SearchResult};
pub use fetcher::{ContentFetcher, ContentSource};
pub use pipeline::{CancelToken, FallbackChain, RunStatus, ScrapedItem, SearchRun, SearchRunRecord, StaticCatalog};
pub use provider::{ProviderKind, ProviderOutcome, ProviderProfile, SearchError, SearchProvider};
pub use snapshot::{Snapshot, SnapshotChannel};
pub use summarizer::{CompletionRequest, OpenAiSummarizer, Summarizer, SummaryError};

/// Run one query with the default collaborators
///
/// Launches a browser, fetches with reqwest and summarizes through the
/// OpenAI-compatible endpoint configured in the environment. The browser
/// is shut down before returning.
pub async fn search(query: &str, config: SearchConfig) -> anyhow::Result<SearchRun> {
    let summarizer = OpenAiSummarizer::from_env(Some(config.summary_model().to_string()))?
        .with_timeout(config.summary_timeout());
    let browser = BrowserManager::new(LaunchOptions {
        headless: config.headless(),
        ..LaunchOptions::default()
    });
    let fetcher = ContentFetcher::new(config.fetch_timeout())?;
    let max_results = config.max_results();

    let chain = FallbackChain::new(
        config,
        Arc::new(browser.clone()),
        Arc::new(fetcher),
        Arc::new(summarizer),
    );
    let run = chain.run(query, max_results).await;
    browser.shutdown().await;
    Ok(run)
}
