//! Utility functions and helpers.

use url::Url;

/// True if `source` parses as an absolute URL with both a scheme and a host.
///
/// Anything else (relative paths, bare words, `mailto:` style URLs without a
/// network location) is treated as a local file path.
pub fn is_url(source: &str) -> bool {
    match Url::parse(source) {
        Ok(parsed) => parsed.has_host(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url_accepts_http_and_https() {
        assert!(is_url("https://example.com/page"));
        assert!(is_url("http://example.com"));
    }

    #[test]
    fn test_is_url_rejects_paths() {
        assert!(!is_url("/local/file.txt"));
        assert!(!is_url("relative/file.txt"));
    }

    #[test]
    fn test_is_url_rejects_non_urls() {
        assert!(!is_url("not a url"));
        assert!(!is_url(""));
    }

    #[test]
    fn test_is_url_requires_a_host() {
        // Scheme alone is not enough.
        assert!(!is_url("mailto:user@example.com"));
        assert!(!is_url("file:///local/file.txt"));
    }
}
