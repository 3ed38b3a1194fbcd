use crate::browser::PageError;

/// Why a provider attempt failed
///
/// Recovered at the provider boundary: the chain only sees "this stage
/// failed" and moves on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("{provider} presented an anti-bot interstitial (matched \"{marker}\")")]
    Blocked { provider: String, marker: String },

    #[error("{provider}: {what} not found")]
    NotFound { provider: String, what: String },

    #[error("{provider}: {operation} timed out")]
    Timeout { provider: String, operation: String },

    #[error("{provider}: browser error: {message}")]
    Browser { provider: String, message: String },
}

impl SearchError {
    /// Anti-bot block rather than a flaky page
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }

    pub(crate) fn from_page(provider: &str, error: PageError) -> Self {
        let provider = provider.to_string();
        match error {
            PageError::Timeout { operation, .. } => Self::Timeout {
                provider,
                operation,
            },
            PageError::ElementNotFound(what) => Self::NotFound { provider, what },
            PageError::Browser(message) => Self::Browser { provider, message },
        }
    }
}
