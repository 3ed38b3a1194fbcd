//! Versioned provider profiles
//!
//! Everything that differs between search engines lives here as data:
//! entry URL, selector cascades, interstitial markers, redirect wrappers
//! and the self-link denylist. A profile can be replaced from JSON when a
//! provider changes its markup.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::constants::DEFAULT_INTERSTITIAL_MARKERS;

/// Current schema version of built-in profiles
pub const PROFILE_VERSION: u32 = 1;

/// Supported search engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Google,
    #[serde(alias = "ddg")]
    DuckDuckGo,
}

impl ProviderKind {
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::DuckDuckGo => "DuckDuckGo",
        }
    }

    /// Built-in profile for this provider
    #[must_use]
    pub fn profile(self) -> ProviderProfile {
        match self {
            Self::Google => ProviderProfile::google(),
            Self::DuckDuckGo => ProviderProfile::duckduckgo(),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "duckduckgo" | "ddg" => Ok(Self::DuckDuckGo),
            other => Err(anyhow::anyhow!("unknown search provider: {other}")),
        }
    }
}

/// Link wrapper that carries the real destination in a query parameter
///
/// Matches when the resolved link's host contains `host_contains` and its
/// path starts with `path_prefix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRule {
    pub host_contains: String,
    pub path_prefix: String,
    pub param: String,
}

/// Per-provider configuration record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderProfile {
    pub kind: ProviderKind,
    pub version: u32,
    pub entry_url: String,
    /// Query input candidates, highest priority first
    pub query_input_selectors: Vec<String>,
    /// Cookie-consent buttons tried opportunistically
    #[serde(default)]
    pub consent_selectors: Vec<String>,
    /// Case-insensitive substrings that identify an anti-bot page
    pub interstitial_markers: Vec<String>,
    /// Result container groups; the first group with any match is used
    pub container_selectors: Vec<String>,
    pub title_selectors: Vec<String>,
    pub link_selectors: Vec<String>,
    #[serde(default)]
    pub snippet_selectors: Vec<String>,
    #[serde(default)]
    pub redirects: Vec<RedirectRule>,
    /// Substrings marking provider-internal links
    #[serde(default)]
    pub denylist: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl ProviderProfile {
    #[must_use]
    pub fn google() -> Self {
        Self {
            kind: ProviderKind::Google,
            version: PROFILE_VERSION,
            entry_url: "https://www.google.com/".to_string(),
            query_input_selectors: strings(&[
                "textarea[name='q']",
                "input[name='q']",
                "textarea[title='Search']",
                "input[title='Search']",
                "#APjFqb",
                ".gLFyf",
            ]),
            consent_selectors: strings(&[
                "#L2AGLb",
                "button[aria-label='Accept all']",
                "form[action*='consent'] button",
            ]),
            interstitial_markers: strings(DEFAULT_INTERSTITIAL_MARKERS),
            container_selectors: strings(&[
                "div.tF2Cxc",
                "div.g",
                "div.MjjYud",
                "div[data-sokoban-container] div.g",
            ]),
            title_selectors: strings(&["h3", ".LC20lb", ".DKV0Md"]),
            link_selectors: strings(&["a[href]"]),
            snippet_selectors: strings(&[".VwiC3b", ".s3v9rd", ".IsZvec", ".aCOpRe", ".st"]),
            redirects: vec![RedirectRule {
                host_contains: "google.".to_string(),
                path_prefix: "/url".to_string(),
                param: "q".to_string(),
            }],
            denylist: strings(&["google.com", "youtube.com/results"]),
        }
    }

    #[must_use]
    pub fn duckduckgo() -> Self {
        Self {
            kind: ProviderKind::DuckDuckGo,
            version: PROFILE_VERSION,
            entry_url: "https://duckduckgo.com/".to_string(),
            query_input_selectors: strings(&[
                "input[name='q']",
                "#searchbox_input",
                "#search_form_input_homepage",
            ]),
            consent_selectors: Vec::new(),
            interstitial_markers: strings(DEFAULT_INTERSTITIAL_MARKERS),
            container_selectors: strings(&[
                "article[data-testid='result']",
                ".nrn-react-div article",
                ".result",
            ]),
            title_selectors: strings(&[
                "[data-testid='result-title-a']",
                "h2 a",
                ".result__title a",
            ]),
            link_selectors: strings(&[
                "[data-testid='result-title-a']",
                "h2 a",
                ".result__title a",
                ".result__a",
            ]),
            snippet_selectors: strings(&[
                "[data-testid='result-snippet']",
                ".result__snippet",
                ".result__body",
            ]),
            redirects: vec![RedirectRule {
                host_contains: "duckduckgo.com".to_string(),
                path_prefix: "/l/".to_string(),
                param: "uddg".to_string(),
            }],
            denylist: strings(&["duckduckgo.com"]),
        }
    }

    /// Load a profile from JSON, rejecting ones newer than this build understands
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let profile: Self = serde_json::from_str(json)?;
        if profile.version > PROFILE_VERSION {
            anyhow::bail!(
                "{} profile version {} is newer than supported version {}",
                profile.kind,
                profile.version,
                PROFILE_VERSION
            );
        }
        if profile.query_input_selectors.is_empty() || profile.container_selectors.is_empty() {
            anyhow::bail!("{} profile has no input or container selectors", profile.kind);
        }
        Ok(profile)
    }

    /// Human-readable provider name
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.display_name()
    }
}
