//! Static fallback catalog
//!
//! A tiny keyword-indexed list of curated links, consulted only after every
//! provider has failed.

use std::collections::HashSet;

use crate::extractor::SearchResult;

/// Most results the catalog ever returns for one query
pub const CATALOG_RESULT_CAP: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Lower-case query tokens that select this entry
    pub keywords: Vec<String>,
    pub results: Vec<SearchResult>,
}

/// Keyword → curated results mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCatalog {
    entries: Vec<CatalogEntry>,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new(vec![
            CatalogEntry {
                keywords: vec!["ai".into(), "artificial".into(), "intelligence".into()],
                results: vec![
                    SearchResult::new(
                        "Artificial Intelligence Trends - MIT Technology Review",
                        "https://www.technologyreview.com/topic/artificial-intelligence/",
                        "Latest developments in artificial intelligence research and applications.",
                    ),
                    SearchResult::new(
                        "AI News and Research - OpenAI",
                        "https://openai.com/blog",
                        "Research updates and insights from OpenAI on artificial intelligence.",
                    ),
                ],
            },
            CatalogEntry {
                keywords: vec!["2024".into(), "trends".into(), "latest".into()],
                results: vec![SearchResult::new(
                    "Tech Trends 2024 - Forbes",
                    "https://www.forbes.com/technology/",
                    "Latest technology trends and innovations for 2024.",
                )],
            },
        ])
    }
}

fn tokens(query: &str) -> HashSet<String> {
    query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl StaticCatalog {
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Catalog with no entries; every lookup misses
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Results of every entry sharing a token with `query`, in catalog
    /// order, capped at [`CATALOG_RESULT_CAP`]
    #[must_use]
    pub fn lookup(&self, query: &str) -> Vec<SearchResult> {
        let tokens = tokens(query);
        self.entries
            .iter()
            .filter(|entry| entry.keywords.iter().any(|k| tokens.contains(k)))
            .flat_map(|entry| entry.results.iter().cloned())
            .take(CATALOG_RESULT_CAP)
            .collect()
    }
}
