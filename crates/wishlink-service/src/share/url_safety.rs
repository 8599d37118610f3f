//! URL safety validation for item links.
//!
//! Item links arrive through a URL-controlled channel, so every link is
//! normalized and checked here before it is allowed into a payload. The
//! function is total: any input maps to `Some(safe absolute URL)` or
//! `None`, never a panic.

use std::borrow::Cow;

use url::Url;

/// Normalize and validate a single URL string.
///
/// Rules, in order: empty or whitespace-only input is rejected;
/// `javascript:` and `data:` prefixes are rejected case-insensitively;
/// any other explicit scheme that is not http(s) is rejected;
/// protocol-relative input (`//host`) is rejected; schemeless input gets
/// `https://` prepended; the result must parse as an http(s) URL.
///
/// The returned string is the parser's canonical form, which may append
/// a trailing slash for bare-host URLs.
pub fn safe_format_url(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("javascript:") || lower.starts_with("data:") {
        return None;
    }

    let candidate: Cow<'_, str> = match explicit_scheme(trimmed) {
        Some(scheme) => {
            if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
                return None;
            }
            Cow::Borrowed(trimmed)
        }
        None => {
            if trimmed.starts_with("//") {
                return None;
            }
            Cow::Owned(format!("https://{trimmed}"))
        }
    };

    let url = Url::parse(&candidate).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url.to_string()),
        _ => None,
    }
}

/// Return the explicit scheme of `s` (`[A-Za-z]+` directly followed by
/// `:`), if any.
fn explicit_scheme(s: &str) -> Option<&str> {
    let end = s.find(|c: char| !c.is_ascii_alphabetic())?;
    if end > 0 && s.as_bytes()[end] == b':' {
        Some(&s[..end])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_script_and_data_schemes() {
        assert_eq!(safe_format_url(Some("javascript:alert(1)")), None);
        assert_eq!(safe_format_url(Some("JavaScript:alert(1)")), None);
        assert_eq!(safe_format_url(Some("  javascript:alert(1)")), None);
        assert_eq!(safe_format_url(Some("data:text/html;base64,Zg==")), None);
    }

    #[test]
    fn rejects_foreign_schemes_and_protocol_relative() {
        assert_eq!(safe_format_url(Some("ftp://x")), None);
        assert_eq!(safe_format_url(Some("file:///etc/passwd")), None);
        assert_eq!(safe_format_url(Some("//evil.com")), None);
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(safe_format_url(None), None);
        assert_eq!(safe_format_url(Some("")), None);
        assert_eq!(safe_format_url(Some("   ")), None);
    }

    #[test]
    fn prepends_https_to_schemeless_input() {
        assert_eq!(
            safe_format_url(Some("example.com/a")),
            Some("https://example.com/a".to_string())
        );
        assert_eq!(
            safe_format_url(Some("example.com:8080/a")),
            Some("https://example.com:8080/a".to_string())
        );
    }

    #[test]
    fn canonicalizes_bare_hosts_with_trailing_slash() {
        assert_eq!(
            safe_format_url(Some("https://example.com")),
            Some("https://example.com/".to_string())
        );
        assert_eq!(
            safe_format_url(Some("example.com")),
            Some("https://example.com/".to_string())
        );
    }

    #[test]
    fn accepts_http_and_uppercase_schemes() {
        assert_eq!(
            safe_format_url(Some("http://example.com/x")),
            Some("http://example.com/x".to_string())
        );
        assert_eq!(
            safe_format_url(Some("HTTPS://example.com/x")),
            Some("https://example.com/x".to_string())
        );
    }

    #[test]
    fn rejects_unparseable_input() {
        assert_eq!(safe_format_url(Some("https://")), None);
        assert_eq!(safe_format_url(Some("http://[not-a-host")), None);
    }
}
