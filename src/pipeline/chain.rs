//! The fallback chain
//!
//! Stages run strictly in order and the first one that yields fetched
//! content wins:
//!
//! 1. each configured provider, in priority order
//! 2. the static catalog
//! 3. a model-only answer, prefixed with a disclaimer
//!
//! `run` never returns an error. Only a summarizer failure in the last
//! stage (or cancellation) ends a run in
//! [`RunStatus::Error`](super::run::RunStatus::Error).

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::cancel::CancelToken;
use super::catalog::StaticCatalog;
use super::run::{RunSource, ScrapedItem, SearchRun};
use crate::activity::{ActivityKind, ActivityReporter};
use crate::browser::PageSource;
use crate::config::{SearchConfig, SearchMode};
use crate::extractor::SearchResult;
use crate::fetcher::ContentSource;
use crate::provider::{Observers, ProviderOutcome, ProviderTimings, SearchProvider};
use crate::snapshot::SnapshotChannel;
use crate::summarizer::{
    CompletionRequest, Summarizer, SummaryError, knowledge_request, summary_request,
    with_disclaimer,
};
use crate::utils::constants::MAX_RESULTS_LIMIT;
use crate::utils::preview;

/// Message stored on a run stopped through its [`CancelToken`]
pub const CANCELLED_MESSAGE: &str = "search cancelled";

const PROGRESS_TITLE_CHARS: usize = 50;

/// Why a stage produced nothing; the chain moves on either way
enum StageMiss {
    Empty,
    Cancelled,
}

/// Orchestrates providers, catalog and model-only fallback for one query
pub struct FallbackChain {
    config: SearchConfig,
    providers: Vec<SearchProvider>,
    pages: Arc<dyn PageSource>,
    content: Arc<dyn ContentSource>,
    summarizer: Arc<dyn Summarizer>,
    catalog: StaticCatalog,
    activity: ActivityReporter,
    snapshots: SnapshotChannel,
    run_lock: Mutex<()>,
}

impl FallbackChain {
    #[must_use]
    pub fn new(
        config: SearchConfig,
        pages: Arc<dyn PageSource>,
        content: Arc<dyn ContentSource>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        let timings = ProviderTimings::from_config(&config);
        let providers = config
            .providers()
            .iter()
            .cloned()
            .map(|profile| SearchProvider::new(profile, timings))
            .collect();

        Self {
            config,
            providers,
            pages,
            content,
            summarizer,
            catalog: StaticCatalog::default(),
            activity: ActivityReporter::detached(),
            snapshots: SnapshotChannel::new(),
            run_lock: Mutex::new(()),
        }
    }

    /// Send progress events to `reporter` instead of only tracing them
    #[must_use]
    pub fn with_activity(mut self, reporter: ActivityReporter) -> Self {
        self.activity = reporter;
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: StaticCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Observer handle for the latest results-page screenshot
    #[must_use]
    pub fn snapshots(&self) -> SnapshotChannel {
        self.snapshots.clone()
    }

    #[must_use]
    pub fn activity(&self) -> &ActivityReporter {
        &self.activity
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run `query` to completion, fetching content for up to `max_results`
    /// extracted results
    pub async fn run(&self, query: &str, max_results: usize) -> SearchRun {
        self.run_with_cancel(query, max_results, &CancelToken::new())
            .await
    }

    /// Like [`run`](Self::run), checking `cancel` between stages
    ///
    /// Concurrent callers are serialised: one run executes at a time.
    pub async fn run_with_cancel(
        &self,
        query: &str,
        max_results: usize,
        cancel: &CancelToken,
    ) -> SearchRun {
        let _running = self.run_lock.lock().await;

        let mut run = SearchRun::new(query.trim());
        run.start();
        info!(run_id = %run.id, "Starting search for: {}", run.query);
        self.activity
            .emit(ActivityKind::Start, format!("Starting search for: {}", run.query));

        if run.query.is_empty() {
            self.activity.emit(ActivityKind::Error, "Search query is empty");
            run.fail("search query is empty");
            return run;
        }

        let max_results = self.clamp_max_results(max_results);

        if self.config.mode() == SearchMode::WebWithFallback {
            match self.retrieve(&mut run, max_results, cancel).await {
                Ok(()) => return self.finish(run),
                Err(StageMiss::Cancelled) => return self.cancelled(run),
                Err(StageMiss::Empty) => {}
            }
        } else {
            self.activity
                .emit(ActivityKind::Info, "AI-only mode, skipping web search");
        }

        if cancel.is_cancelled() {
            return self.cancelled(run);
        }
        self.knowledge_only(&mut run).await;
        self.finish(run)
    }

    fn clamp_max_results(&self, requested: usize) -> usize {
        let clamped = requested.clamp(1, MAX_RESULTS_LIMIT);
        if clamped != requested {
            warn!("max_results {requested} out of range, using {clamped}");
        }
        clamped
    }

    /// Providers then catalog; `Ok` once a stage produced a summary
    async fn retrieve(
        &self,
        run: &mut SearchRun,
        max_results: usize,
        cancel: &CancelToken,
    ) -> Result<(), StageMiss> {
        let observers = Observers {
            activity: &self.activity,
            snapshots: &self.snapshots,
        };

        for provider in &self.providers {
            if cancel.is_cancelled() {
                return Err(StageMiss::Cancelled);
            }

            let name = provider.name();
            self.activity
                .emit(ActivityKind::Info, format!("Trying {name} search..."));

            let results = match provider.search(self.pages.as_ref(), &run.query, observers).await {
                ProviderOutcome::Failed { stage, error } => {
                    self.activity.emit_with_details(
                        ActivityKind::Error,
                        format!("{name} search failed"),
                        format!("{error} (during {stage})"),
                    );
                    continue;
                }
                ProviderOutcome::Results(results) if results.is_empty() => {
                    self.activity.emit(
                        ActivityKind::Warning,
                        format!("{name} returned no results, trying next option"),
                    );
                    continue;
                }
                ProviderOutcome::Results(results) => results,
            };

            match self
                .fetch_and_summarize(run, results, max_results, cancel)
                .await
            {
                Ok(()) => {
                    run.source = Some(RunSource::Provider(provider.profile().kind));
                    return Ok(());
                }
                Err(StageMiss::Cancelled) => return Err(StageMiss::Cancelled),
                Err(StageMiss::Empty) => continue,
            }
        }

        if cancel.is_cancelled() {
            return Err(StageMiss::Cancelled);
        }
        self.activity
            .emit(ActivityKind::Fallback, "Using fallback search results...");
        let results = self.catalog.lookup(&run.query);
        if results.is_empty() {
            self.activity
                .emit(ActivityKind::Warning, "No fallback results match this query");
            return Err(StageMiss::Empty);
        }
        self.activity.emit(
            ActivityKind::Info,
            format!("Found {} fallback results", results.len()),
        );

        self.fetch_and_summarize(run, results, max_results, cancel)
            .await?;
        run.source = Some(RunSource::Catalog);
        Ok(())
    }

    /// Fetch content for the first `max_results` results, then summarize
    async fn fetch_and_summarize(
        &self,
        run: &mut SearchRun,
        results: Vec<SearchResult>,
        max_results: usize,
        cancel: &CancelToken,
    ) -> Result<(), StageMiss> {
        let items = self.fetch_items(&results, max_results, cancel).await?;
        if items.is_empty() {
            return Err(StageMiss::Empty);
        }

        let summary = self.summarize(&run.query, &items).await;
        run.results = results;
        run.items = items;
        run.complete(summary);
        Ok(())
    }

    /// Sequential, in extraction order, so the corpus order is stable
    async fn fetch_items(
        &self,
        results: &[SearchResult],
        max_results: usize,
        cancel: &CancelToken,
    ) -> Result<Vec<ScrapedItem>, StageMiss> {
        let total = results.len().min(max_results);
        let mut items = Vec::with_capacity(total);

        for (index, result) in results.iter().take(total).enumerate() {
            if cancel.is_cancelled() {
                return Err(StageMiss::Cancelled);
            }
            self.activity.emit(
                ActivityKind::Progress,
                format!(
                    "Scraping result {}/{}: {}...",
                    index + 1,
                    total,
                    preview(&result.title, PROGRESS_TITLE_CHARS)
                ),
            );
            let content = self
                .content
                .fetch(&result.url, self.config.max_content_chars())
                .await;
            items.push(ScrapedItem::from_result(result, content));
        }

        self.activity.emit(
            ActivityKind::Success,
            format!("Successfully scraped {} results", items.len()),
        );
        Ok(items)
    }

    async fn complete_bounded(&self, request: &CompletionRequest) -> Result<String, SummaryError> {
        let budget = self.config.summary_timeout();
        match tokio::time::timeout(budget, self.summarizer.complete(request)).await {
            Ok(result) => result,
            Err(_) => Err(SummaryError::Timeout(budget.as_secs())),
        }
    }

    /// Summary failure here is recoverable: the error text becomes the summary
    async fn summarize(&self, query: &str, items: &[ScrapedItem]) -> String {
        self.activity.emit(ActivityKind::Ai, "Generating AI summary...");
        let request = summary_request(query, items, &self.config);

        match self.complete_bounded(&request).await {
            Ok(summary) => {
                self.activity
                    .emit(ActivityKind::Success, "AI summary generated successfully");
                summary
            }
            Err(e) => {
                warn!("Summary generation failed: {e}");
                self.activity.emit_with_details(
                    ActivityKind::Error,
                    "Failed to generate summary",
                    e.to_string(),
                );
                format!("Could not generate summary due to an error: {e}")
            }
        }
    }

    /// Last stage; a summarizer failure here fails the run
    async fn knowledge_only(&self, run: &mut SearchRun) {
        self.activity
            .emit(ActivityKind::Ai, "Generating AI-only response...");
        let request = knowledge_request(&run.query, &self.config);

        match self.complete_bounded(&request).await {
            Ok(answer) => {
                run.source = Some(RunSource::KnowledgeOnly);
                run.complete(with_disclaimer(&answer));
                self.activity
                    .emit(ActivityKind::Success, "AI-only response generated");
            }
            Err(e) => {
                self.activity.emit_with_details(
                    ActivityKind::Error,
                    "All search methods failed",
                    e.to_string(),
                );
                run.fail(format!("Even AI-only response failed: {e}"));
            }
        }
    }

    fn cancelled(&self, mut run: SearchRun) -> SearchRun {
        self.activity.emit(ActivityKind::Error, "Search cancelled");
        run.fail(CANCELLED_MESSAGE);
        run
    }

    fn finish(&self, run: SearchRun) -> SearchRun {
        if run.error.is_none() {
            self.activity
                .emit(ActivityKind::Complete, "Search completed successfully");
        }
        info!(
            run_id = %run.id,
            status = ?run.status(),
            results = run.results.len(),
            items = run.items.len(),
            "Search run finished"
        );
        run
    }
}

impl std::fmt::Debug for FallbackChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackChain")
            .field(
                "providers",
                &self.providers.iter().map(SearchProvider::name).collect::<Vec<_>>(),
            )
            .field("mode", &self.config.mode())
            .finish_non_exhaustive()
    }
}
