//! Selector-cascade result extraction
//!
//! Providers reshuffle their markup often. Each field is resolved through
//! its own ordered list of selectors so a change to one class name only
//! loses that field's preferred selector, not the whole result.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use super::interstitial::detect_interstitial;
use super::types::{NO_DESCRIPTION, SearchResult};
use crate::provider::profile::{ProviderProfile, RedirectRule};
use crate::utils::{collapse_whitespace, is_valid_url, resolve_href, unwrap_redirect_param};

fn compile(kind: &str, provider: &str, raw: &[String]) -> Vec<Selector> {
    raw.iter()
        .filter_map(|css| match Selector::parse(css) {
            Ok(selector) => Some(selector),
            Err(e) => {
                warn!("{provider}: skipping invalid {kind} selector '{css}': {e}");
                None
            }
        })
        .collect()
}

fn element_text(element: ElementRef<'_>) -> String {
    let joined = element.text().collect::<Vec<_>>().join(" ");
    collapse_whitespace(&joined)
}

/// Why a container was not turned into a result
#[derive(Debug, Clone, PartialEq, Eq)]
enum Rejection {
    NoTitle,
    NoLink,
    Unresolvable(String),
    RedirectUnwrapFailed(String),
    NotHttp(String),
    Denylisted(String),
}

/// Parses a provider's result page into ordered [`SearchResult`]s
#[derive(Debug, Clone)]
pub struct ResultExtractor {
    provider: &'static str,
    base_url: String,
    containers: Vec<Selector>,
    titles: Vec<Selector>,
    links: Vec<Selector>,
    snippets: Vec<Selector>,
    redirects: Vec<RedirectRule>,
    denylist: Vec<String>,
    markers: Vec<String>,
}

impl ResultExtractor {
    /// Compile a profile's selectors; invalid ones are logged and skipped
    #[must_use]
    pub fn new(profile: &ProviderProfile) -> Self {
        let provider = profile.name();
        Self {
            provider,
            base_url: profile.entry_url.clone(),
            containers: compile("container", provider, &profile.container_selectors),
            titles: compile("title", provider, &profile.title_selectors),
            links: compile("link", provider, &profile.link_selectors),
            snippets: compile("snippet", provider, &profile.snippet_selectors),
            redirects: profile.redirects.clone(),
            denylist: profile
                .denylist
                .iter()
                .map(|entry| entry.to_lowercase())
                .collect(),
            markers: profile.interstitial_markers.clone(),
        }
    }

    /// Interstitial marker present in `html`, if any
    #[must_use]
    pub fn detect_interstitial(&self, html: &str) -> Option<&str> {
        detect_interstitial(html, &self.markers)
    }

    /// Walk result containers in document order, stopping after `cap`
    /// containers, and keep the ones that resolve to a valid result
    ///
    /// Never fails: a document without matching containers yields an empty
    /// list.
    #[must_use]
    pub fn extract(&self, html: &str, cap: usize) -> Vec<SearchResult> {
        let document = Html::parse_document(html);

        let Some(containers) = self
            .containers
            .iter()
            .map(|selector| document.select(selector).collect::<Vec<_>>())
            .find(|found| !found.is_empty())
        else {
            debug!("{}: no result containers in document", self.provider);
            return Vec::new();
        };

        let mut results = Vec::new();
        for (index, container) in containers.into_iter().take(cap).enumerate() {
            match self.extract_one(container) {
                Ok(result) => results.push(result),
                Err(reason) => {
                    warn!(
                        "{}: skipping result container {}: {:?}",
                        self.provider,
                        index + 1,
                        reason
                    );
                }
            }
        }

        debug!(
            "{}: extracted {} results from document",
            self.provider,
            results.len()
        );
        results
    }

    fn extract_one(&self, container: ElementRef<'_>) -> Result<SearchResult, Rejection> {
        let title = self.first_text(container, &self.titles).ok_or(Rejection::NoTitle)?;
        let href = self.first_href(container).ok_or(Rejection::NoLink)?;
        let url = self.destination(&href)?;
        let snippet = self
            .first_text(container, &self.snippets)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        Ok(SearchResult {
            title,
            url,
            snippet,
        })
    }

    fn first_text(&self, container: ElementRef<'_>, selectors: &[Selector]) -> Option<String> {
        selectors.iter().find_map(|selector| {
            container
                .select(selector)
                .map(element_text)
                .find(|text| !text.is_empty())
        })
    }

    fn first_href(&self, container: ElementRef<'_>) -> Option<String> {
        self.links.iter().find_map(|selector| {
            container
                .select(selector)
                .filter_map(|el| el.value().attr("href"))
                .map(str::trim)
                .find(|href| !href.is_empty())
                .map(str::to_string)
        })
    }

    /// Resolve, unwrap, and validate an href into a result URL
    fn destination(&self, href: &str) -> Result<String, Rejection> {
        let resolved =
            resolve_href(href, &self.base_url).ok_or_else(|| Rejection::Unresolvable(href.to_string()))?;

        let target = match self.matching_redirect(&resolved) {
            Some(rule) => unwrap_redirect_param(&resolved, &rule.param)
                .ok_or_else(|| Rejection::RedirectUnwrapFailed(resolved.to_string()))?,
            None => resolved.to_string(),
        };

        if !is_valid_url(&target) {
            return Err(Rejection::NotHttp(target));
        }

        let lowered = target.to_lowercase();
        if self.denylist.iter().any(|entry| lowered.contains(entry)) {
            return Err(Rejection::Denylisted(target));
        }

        Ok(target)
    }

    fn matching_redirect(&self, url: &Url) -> Option<&RedirectRule> {
        let host = url.host_str().unwrap_or_default();
        self.redirects
            .iter()
            .find(|rule| host.contains(&rule.host_contains) && url.path().starts_with(&rule.path_prefix))
    }
}
