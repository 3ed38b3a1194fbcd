use reqwest::StatusCode;

/// Failure fetching one page
///
/// Never leaves the fetcher: its `Display` text becomes the placeholder
/// content handed downstream.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to fetch {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("Failed to fetch {url}: response body exceeds {limit} bytes")]
    TooLarge { url: String, limit: usize },

    #[error("Could not scrape content from {url}: {reason}")]
    Parse { url: String, reason: String },
}
