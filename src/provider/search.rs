//! Provider attempt state machine
//!
//! One code path drives every provider; what differs lives in its
//! [`ProviderProfile`]. Each attempt walks
//! `Navigate → InterstitialCheck → SubmitQuery → WaitResults →
//! InterstitialRecheck → Capture`, then extracts. Navigation, submission
//! and either interstitial check may end it as [`ProviderOutcome::Failed`];
//! trouble while waiting or capturing is only reported.

use std::time::Duration;
use tracing::{debug, info, warn};

use super::errors::SearchError;
use super::profile::ProviderProfile;
use super::types::{ProviderOutcome, SearchStage};
use crate::activity::{ActivityKind, ActivityReporter};
use crate::browser::{PageAccessor, PageError, PageSource, WaitMode};
use crate::config::SearchConfig;
use crate::extractor::{ResultExtractor, SearchResult};
use crate::snapshot::{Snapshot, SnapshotChannel};

/// Time budgets for one provider attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderTimings {
    pub navigation: Duration,
    pub element: Duration,
    pub consent: Duration,
    pub load_state: Duration,
    pub settle: Duration,
    pub typing: Duration,
    pub extraction_cap: usize,
}

impl ProviderTimings {
    #[must_use]
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            navigation: config.navigation_timeout(),
            element: config.element_timeout(),
            consent: config.consent_timeout(),
            load_state: config.load_state_timeout(),
            settle: config.settle_delay(),
            typing: config.typing_delay(),
            extraction_cap: config.extraction_cap(),
        }
    }
}

impl Default for ProviderTimings {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

type StepResult<T> = Result<T, (SearchStage, SearchError)>;

/// Side channels an attempt reports into
#[derive(Debug, Clone, Copy)]
pub struct Observers<'a> {
    pub activity: &'a ActivityReporter,
    pub snapshots: &'a SnapshotChannel,
}

/// Drives one search engine through a browser page
#[derive(Debug, Clone)]
pub struct SearchProvider {
    profile: ProviderProfile,
    extractor: ResultExtractor,
    timings: ProviderTimings,
}

impl SearchProvider {
    #[must_use]
    pub fn new(profile: ProviderProfile, timings: ProviderTimings) -> Self {
        let extractor = ResultExtractor::new(&profile);
        Self {
            profile,
            extractor,
            timings,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.profile.name()
    }

    #[must_use]
    pub fn profile(&self) -> &ProviderProfile {
        &self.profile
    }

    /// Run one attempt on a fresh page from `pages`
    ///
    /// Never returns an error: every failure becomes
    /// [`ProviderOutcome::Failed`] tagged with the stage it happened in.
    pub async fn search(
        &self,
        pages: &dyn PageSource,
        query: &str,
        observers: Observers<'_>,
    ) -> ProviderOutcome {
        let page = match pages.open_page().await {
            Ok(page) => page,
            Err(e) => {
                return ProviderOutcome::Failed {
                    stage: SearchStage::Init,
                    error: SearchError::from_page(self.name(), e),
                };
            }
        };

        let outcome = match self.drive(page.as_ref(), query, observers).await {
            Ok(results) => ProviderOutcome::Results(results),
            Err((stage, error)) => {
                warn!("{} attempt failed during {stage}: {error}", self.name());
                ProviderOutcome::Failed { stage, error }
            }
        };

        if let Err(e) = page.close().await {
            debug!("Failed to close {} page: {e}", self.name());
        }
        outcome
    }

    fn fail(&self, stage: SearchStage) -> impl Fn(PageError) -> (SearchStage, SearchError) + '_ {
        move |e| (stage, SearchError::from_page(self.name(), e))
    }

    async fn drive(
        &self,
        page: &dyn PageAccessor,
        query: &str,
        observers: Observers<'_>,
    ) -> StepResult<Vec<SearchResult>> {
        let activity = observers.activity;
        let name = self.name();

        // Navigate
        activity.emit(ActivityKind::Browser, format!("Navigating to {name}..."));
        self.navigate(page).await?;

        // InterstitialCheck
        self.check_interstitial(page, SearchStage::InterstitialCheck, activity)
            .await?;

        self.dismiss_consent(page, activity).await;

        // SubmitQuery
        self.submit_query(page, query, activity).await?;

        // WaitResults
        activity.emit(ActivityKind::Browser, "Waiting for search results to load...");
        if let Err(e) = page
            .wait_load_state(WaitMode::NetworkIdle, self.timings.load_state)
            .await
        {
            warn!("{name}: results did not settle: {e}");
            activity.emit_with_details(
                ActivityKind::Warning,
                "Page load timeout, proceeding anyway",
                format!("{e} (during {})", SearchStage::WaitResults),
            );
        }
        tokio::time::sleep(self.timings.settle).await;

        // InterstitialRecheck
        let html = self
            .check_interstitial(page, SearchStage::InterstitialRecheck, activity)
            .await?;

        // Capture
        self.capture(page, observers).await;

        // Extract
        activity.emit(
            ActivityKind::Scraping,
            format!("Extracting search results from {name}..."),
        );
        let results = self.extractor.extract(&html, self.timings.extraction_cap);
        if results.is_empty() {
            activity.emit(ActivityKind::Warning, format!("No results found on {name}"));
        } else {
            activity.emit(
                ActivityKind::Success,
                format!("Found {} search results from {name}", results.len()),
            );
        }
        info!("{name}: extracted {} results", results.len());
        Ok(results)
    }

    /// DOMContentLoaded first; on timeout retry once waiting for network idle
    async fn navigate(&self, page: &dyn PageAccessor) -> StepResult<()> {
        let url = &self.profile.entry_url;
        match page
            .navigate(url, WaitMode::DomContentLoaded, self.timings.navigation)
            .await
        {
            Ok(()) => Ok(()),
            Err(e) if e.is_timeout() => {
                warn!("{}: navigation timed out, retrying with network idle", self.name());
                page.navigate(url, WaitMode::NetworkIdle, self.timings.navigation)
                    .await
                    .map_err(self.fail(SearchStage::Navigate))
            }
            Err(e) => Err(self.fail(SearchStage::Navigate)(e)),
        }
    }

    /// Returns the document HTML when no marker is present
    async fn check_interstitial(
        &self,
        page: &dyn PageAccessor,
        stage: SearchStage,
        activity: &ActivityReporter,
    ) -> StepResult<String> {
        let html = page.content().await.map_err(self.fail(stage))?;
        if let Some(marker) = self.extractor.detect_interstitial(&html) {
            activity.emit_with_details(
                ActivityKind::Error,
                format!("{} is showing an anti-bot challenge", self.name()),
                format!("matched \"{marker}\" during {stage}"),
            );
            return Err((
                stage,
                SearchError::Blocked {
                    provider: self.name().to_string(),
                    marker: marker.to_string(),
                },
            ));
        }
        Ok(html)
    }

    /// Best effort; every failure here is ignored
    async fn dismiss_consent(&self, page: &dyn PageAccessor, activity: &ActivityReporter) {
        if self.profile.consent_selectors.is_empty() {
            return;
        }
        match page
            .locate(&self.profile.consent_selectors, self.timings.consent)
            .await
        {
            Ok(Some(button)) => match page.click(&button).await {
                Ok(()) => {
                    activity.emit(ActivityKind::Browser, "Accepted cookies");
                    tokio::time::sleep(Duration::from_millis(500)).await;
                }
                Err(e) => debug!("{}: consent click failed: {e}", self.name()),
            },
            Ok(None) => debug!("{}: no consent dialog", self.name()),
            Err(e) => debug!("{}: consent probe failed: {e}", self.name()),
        }
    }

    async fn submit_query(
        &self,
        page: &dyn PageAccessor,
        query: &str,
        activity: &ActivityReporter,
    ) -> StepResult<()> {
        let stage = SearchStage::SubmitQuery;
        let input = page
            .locate(&self.profile.query_input_selectors, self.timings.element)
            .await
            .map_err(self.fail(stage))?
            .ok_or_else(|| {
                (
                    stage,
                    SearchError::NotFound {
                        provider: self.name().to_string(),
                        what: "search input".to_string(),
                    },
                )
            })?;
        activity.emit_with_details(
            ActivityKind::Browser,
            "Found search box",
            format!("selector: {}", input.selector),
        );

        page.click(&input).await.map_err(self.fail(stage))?;
        page.clear(&input).await.map_err(self.fail(stage))?;

        activity.emit(ActivityKind::Browser, format!("Typing search query: {query}"));
        page.type_text(&input, query, self.timings.typing)
            .await
            .map_err(self.fail(stage))?;

        activity.emit(ActivityKind::Browser, "Submitting search...");
        page.submit(&input).await.map_err(self.fail(stage))
    }

    /// Screenshot failures are logged and otherwise ignored
    async fn capture(&self, page: &dyn PageAccessor, observers: Observers<'_>) {
        match page.screenshot().await {
            Ok(bytes) => {
                observers
                    .snapshots
                    .publish(Snapshot::png(bytes, self.name()));
                observers.activity.emit(
                    ActivityKind::Screenshot,
                    format!("Captured {} results page", self.name()),
                );
            }
            Err(e) => {
                warn!("{}: screenshot failed: {e}", self.name());
                observers.activity.emit_with_details(
                    ActivityKind::Warning,
                    "Could not capture screenshot",
                    format!("{e} (during {})", SearchStage::Capture),
                );
            }
        }
    }
}
