use std::fmt;

use super::errors::SearchError;
use crate::extractor::SearchResult;

/// Steps of one provider attempt, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchStage {
    Init,
    Navigate,
    InterstitialCheck,
    SubmitQuery,
    WaitResults,
    InterstitialRecheck,
    Capture,
}

impl fmt::Display for SearchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::Navigate => "navigate",
            Self::InterstitialCheck => "interstitial check",
            Self::SubmitQuery => "submit query",
            Self::WaitResults => "wait for results",
            Self::InterstitialRecheck => "interstitial recheck",
            Self::Capture => "capture",
        };
        f.write_str(name)
    }
}

/// Result of one provider attempt
///
/// `Results(vec![])` means the provider answered with nothing usable;
/// `Failed` means it could not be driven at all.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    Results(Vec<SearchResult>),
    Failed {
        stage: SearchStage,
        error: SearchError,
    },
}

impl ProviderOutcome {
    /// Extracted results; empty for a failed attempt
    #[must_use]
    pub fn into_results(self) -> Vec<SearchResult> {
        match self {
            Self::Results(results) => results,
            Self::Failed { .. } => Vec::new(),
        }
    }
}
