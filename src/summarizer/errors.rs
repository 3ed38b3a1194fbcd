/// Summarizer capability failure
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// No API key (or other required setting) available
    #[error("summarizer not configured: {0}")]
    NotConfigured(String),

    #[error("summarizer request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("summarizer returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("summarizer returned an empty completion")]
    EmptyResponse,

    #[error("summarizer timed out after {0}s")]
    Timeout(u64),
}
