//! URL validation and redirect-wrapper utilities.
//!
//! Search providers frequently wrap outbound links in their own click-tracking
//! redirects (`/url?q=...`, `//duckduckgo.com/l/?uddg=...`). These helpers
//! resolve such hrefs to the real destination before validation.

use url::Url;

/// Check if a URL is valid
///
/// Only absolute `http`/`https` URLs with a host are accepted.
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    // Skip data URLs, javascript URLs, and other non-http schemes
    if url.starts_with("data:") || url.starts_with("javascript:") || url.starts_with("mailto:") {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some(),
        Err(_) => false,
    }
}

/// Resolve an href found in a provider page against the provider's base URL
///
/// Handles absolute URLs, scheme-relative (`//host/path`) and path-relative
/// (`/url?q=...`) forms. Fragment-only hrefs resolve to `None`.
#[must_use]
pub fn resolve_href(href: &str, base: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match Url::parse(href) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(base).ok().and_then(|b| b.join(href).ok())
        }
        Err(_) => None,
    }
}

/// Extract the wrapped destination from a redirect URL's query string
///
/// Returns `None` when the parameter is missing or empty. The returned value
/// is percent-decoded.
#[must_use]
pub fn unwrap_redirect_param(url: &Url, param: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_url_requires_http_scheme() {
        assert!(is_valid_url("https://example.com/a"));
        assert!(is_valid_url("http://example.com"));
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("/relative/path"));
        assert!(!is_valid_url("javascript:void(0)"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn resolves_relative_and_scheme_relative_hrefs() {
        let base = "https://www.google.com";
        let url = resolve_href("/url?q=https://rust-lang.org/&sa=U", base).unwrap();
        assert_eq!(url.host_str(), Some("www.google.com"));

        let ddg = resolve_href("//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.org%2F", base)
            .unwrap();
        assert_eq!(ddg.host_str(), Some("duckduckgo.com"));

        assert!(resolve_href("#top", base).is_none());
    }

    #[test]
    fn unwraps_percent_encoded_destination() {
        let url = Url::parse("https://duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.org%2Fdocs&rut=x")
            .unwrap();
        assert_eq!(
            unwrap_redirect_param(&url, "uddg").as_deref(),
            Some("https://example.org/docs")
        );
        assert!(unwrap_redirect_param(&url, "q").is_none());
    }
}
