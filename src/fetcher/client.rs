//! Direct HTTP content fetching
//!
//! Plain reqwest GET with browser-like headers. No browser, no retries.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{
    ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONNECTION, HeaderMap, HeaderValue, USER_AGENT,
};
use reqwest::{Client, redirect};
use std::time::Duration;
use tracing::{debug, warn};

use super::errors::FetchError;
use super::readable::extract_readable_text;
use crate::utils::constants::{CHROME_USER_AGENT, FETCH_TIMEOUT_SECS};
use crate::utils::{is_valid_url, truncate_chars};

/// Response bodies above this size are not parsed (10 MB)
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

const MAX_REDIRECTS: usize = 10;

/// Page text provider used by the pipeline
///
/// `fetch` never fails: problems come back as a short placeholder that
/// names the cause and is at most `max_chars` plus the truncation marker.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, url: &str, max_chars: usize) -> String;
}

/// reqwest-backed [`ContentSource`]
#[derive(Debug, Clone)]
pub struct ContentFetcher {
    client: Client,
    max_body_bytes: usize,
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(CHROME_USER_AGENT));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

impl ContentFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .default_headers(browser_headers())
            .timeout(timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self {
            client,
            max_body_bytes: MAX_BODY_BYTES,
        })
    }

    /// Lower or raise the response size cap (default [`MAX_BODY_BYTES`])
    #[must_use]
    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    pub fn with_default_timeout() -> anyhow::Result<Self> {
        Self::new(Duration::from_secs(FETCH_TIMEOUT_SECS))
    }

    /// Fetch and extract, surfacing the failure cause as a typed error
    pub async fn try_fetch(&self, url: &str, max_chars: usize) -> Result<String, FetchError> {
        if !is_valid_url(url) {
            return Err(FetchError::InvalidUrl(url.to_string()));
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let too_large = || FetchError::TooLarge {
            url: url.to_string(),
            limit: self.max_body_bytes,
        };

        // Reject on the declared length before reading anything
        let declared = response.content_length().unwrap_or(0);
        if declared > self.max_body_bytes as u64 {
            return Err(too_large());
        }

        let mut body = Vec::with_capacity(usize::try_from(declared).unwrap_or(0));
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| FetchError::Parse {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
            // Checked before accumulating; chunked bodies carry no length
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        let html = String::from_utf8_lossy(&body);
        let text = extract_readable_text(&html, max_chars);
        debug!("Fetched {} chars of readable text from {url}", text.chars().count());
        Ok(text)
    }
}

#[async_trait]
impl ContentSource for ContentFetcher {
    async fn fetch(&self, url: &str, max_chars: usize) -> String {
        match self.try_fetch(url, max_chars).await {
            Ok(text) => text,
            Err(e) => {
                warn!("{e}");
                truncate_chars(&e.to_string(), max_chars)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn non_http_urls_are_rejected_without_network() {
        let fetcher = ContentFetcher::with_default_timeout().expect("client");
        let text = fetcher.fetch("ftp://example.com/file", 2000).await;
        assert_eq!(text, "Invalid URL: ftp://example.com/file");
    }

    #[tokio::test]
    async fn placeholders_respect_the_character_budget() {
        let fetcher = ContentFetcher::with_default_timeout().expect("client");
        let text = fetcher.fetch("not a url at all", 5).await;
        assert_eq!(text, "Inval...");
    }
}
