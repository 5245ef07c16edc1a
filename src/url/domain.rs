use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (which shouldn't happen for valid HTTP(S) URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use quest_scribe::url::extract_domain;
///
/// let url = Url::parse("https://GameWith.net/genshin-impact").unwrap();
/// assert_eq!(extract_domain(&url), Some("gamewith.net".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks whether a URL may be fetched under the allowed-domain list
///
/// The host must equal one of the entries (case-insensitive). An empty list
/// allows every host.
pub fn is_allowed_domain(url: &Url, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }

    match extract_domain(url) {
        Some(domain) => allowed.iter().any(|a| a.eq_ignore_ascii_case(&domain)),
        None => false,
    }
}
