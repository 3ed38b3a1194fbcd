use serde::{Deserialize, Serialize};

/// Snippet used when a result carries no description
pub const NO_DESCRIPTION: &str = "No description";

/// One organic search result
///
/// `url` is always an absolute `http(s)` address that is not a link back
/// into the provider itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

impl SearchResult {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }
}
