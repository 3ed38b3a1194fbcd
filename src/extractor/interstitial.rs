//! Anti-bot interstitial detection

/// First marker found in `html`, compared case-insensitively
///
/// Runs over the raw document, not the visible text, so markers hidden in
/// attributes or scripts also count.
#[must_use]
pub fn detect_interstitial<'m, S: AsRef<str>>(html: &str, markers: &'m [S]) -> Option<&'m str> {
    let haystack = html.to_lowercase();
    markers
        .iter()
        .map(AsRef::as_ref)
        .find(|marker| !marker.is_empty() && haystack.contains(&marker.to_lowercase()))
}
