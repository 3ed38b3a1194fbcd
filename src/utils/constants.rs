//! Shared configuration constants for autosearch
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Default number of extracted results that get content-fetched per run
///
/// Mirrors the "max results to scrape" slider default. Valid range is
/// `1..=MAX_RESULTS_LIMIT`.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Upper bound accepted for `max_results`
pub const MAX_RESULTS_LIMIT: usize = 10;

/// Fixed cap on how many result containers the extractor walks
///
/// Independent of the caller's requested result count: a run may store
/// more `SearchResult`s than it fetches.
pub const EXTRACTION_CAP: usize = 10;

/// Default character budget for a fetched page body
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 2000;

/// Characters of each page body forwarded into the summarization corpus
pub const CORPUS_CONTENT_CHARS: usize = 800;

/// Marker appended to any text cut at its character budget
pub const TRUNCATION_MARKER: &str = "...";

/// Number of activity events an observer keeps on screen
pub const DEFAULT_ACTIVITY_RETENTION: usize = 25;

/// Timeout in seconds for `navigate` calls against a provider entry page
pub const NAVIGATION_TIMEOUT_SECS: u64 = 30;

/// Timeout in seconds for each query-input visibility probe
pub const ELEMENT_TIMEOUT_SECS: u64 = 5;

/// Timeout in seconds for the opportunistic cookie-consent probe
pub const CONSENT_TIMEOUT_SECS: u64 = 3;

/// Timeout in seconds for the post-submit load-state wait
pub const LOAD_STATE_TIMEOUT_SECS: u64 = 30;

/// Fixed settle delay after the results page reports loaded
///
/// Results are often rendered by client-side JS after `DOMContentLoaded`.
pub const SETTLE_DELAY_MS: u64 = 3000;

/// Timeout in seconds for direct HTTP content fetches
pub const FETCH_TIMEOUT_SECS: u64 = 15;

/// Base per-keystroke delay when typing a query
pub const TYPING_DELAY_MS: u64 = 50;

/// Largest accepted per-keystroke delay
pub const MAX_TYPING_DELAY_MS: u64 = 1000;

/// Default chat-completions model for summaries
pub const DEFAULT_SUMMARY_MODEL: &str = "gpt-4o-mini";

/// Default token ceiling for a summary completion
pub const DEFAULT_SUMMARY_MAX_TOKENS: u32 = 1000;

/// Default sampling temperature for summaries
pub const DEFAULT_SUMMARY_TEMPERATURE: f32 = 0.3;

/// Timeout in seconds for a summarizer round trip
pub const SUMMARY_TIMEOUT_SECS: u64 = 60;

/// Chrome user agent string for stealth mode
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
/// Next update: 2025-04-29 (quarterly schedule)
///
/// Reference: https://chromiumdash.appspot.com/schedule
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// Anti-bot interstitial markers, matched case-insensitively against raw HTML
pub const DEFAULT_INTERSTITIAL_MARKERS: &[&str] = &["captcha", "unusual traffic", "not a robot"];
