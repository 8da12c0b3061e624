//! Link-href validation.
//!
//! Hrefs reaching the document or the system opener are restricted to a
//! small allow-list of schemes; schemeless (relative) references are allowed
//! and resolve against the document location.

const ALLOWED_LINK_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// The scheme of an href per RFC 3986 (`[a-z][a-z0-9+.-]*:`), lowercased, or
/// `None` for schemeless references. Unparseable input is treated as
/// schemeless rather than failing.
pub fn parse_scheme(input: &str) -> Option<String> {
    let mut chars = input.char_indices();
    let (_, first) = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    for (index, c) in chars {
        match c {
            ':' => return Some(input[..index].to_ascii_lowercase()),
            c if c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-') => {}
            _ => return None,
        }
    }
    None
}

pub fn has_explicit_scheme(input: &str) -> bool {
    parse_scheme(input.trim()).is_some()
}

/// Whether an href may be written into the document or opened: http, https,
/// mailto, tel, or a schemeless/relative reference. Empty input is not a
/// link.
pub fn is_allowed_link_href(input: &str) -> bool {
    let href = input.trim();
    if href.is_empty() {
        return false;
    }
    match parse_scheme(href) {
        None => true,
        Some(scheme) => ALLOWED_LINK_SCHEMES.contains(&scheme.as_str()),
    }
}

/// Validation message for the link input UI; `None` means the input is
/// acceptable.
pub fn validate_link_href(input: &str) -> Option<&'static str> {
    if input.trim().is_empty() {
        return Some("Link URL is required");
    }
    if is_allowed_link_href(input) {
        return None;
    }
    Some("Only http, https, mailto, and tel links are allowed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_schemes_case_insensitively() {
        assert_eq!(parse_scheme("HTTPS://a.example"), Some("https".to_string()));
        assert_eq!(parse_scheme("mailto:a@b.example"), Some("mailto".to_string()));
        assert_eq!(parse_scheme("docs/readme.md"), None);
        assert_eq!(parse_scheme("./relative"), None);
        assert_eq!(parse_scheme("1337:"), None);
    }

    #[test]
    fn allows_http_https_mailto_tel_and_relative() {
        assert!(is_allowed_link_href("https://a.example"));
        assert!(is_allowed_link_href("http://a.example"));
        assert!(is_allowed_link_href("mailto:a@b.example"));
        assert!(is_allowed_link_href("tel:+15551234"));
        assert!(is_allowed_link_href("docs/readme.md"));
        assert!(is_allowed_link_href("#anchor"));
    }

    #[test]
    fn rejects_dangerous_or_empty_hrefs() {
        assert!(!is_allowed_link_href(""));
        assert!(!is_allowed_link_href("   "));
        assert!(!is_allowed_link_href("javascript:alert(1)"));
        assert!(!is_allowed_link_href("file:///etc/passwd"));
        assert!(!is_allowed_link_href("vscode:extension"));
    }

    #[test]
    fn explicit_scheme_detection() {
        assert!(has_explicit_scheme("https://a.example"));
        assert!(has_explicit_scheme(" mailto:x@y.example "));
        assert!(!has_explicit_scheme("relative/path.md"));
    }

    #[test]
    fn validation_messages() {
        assert_eq!(validate_link_href("  "), Some("Link URL is required"));
        assert_eq!(
            validate_link_href("javascript:alert(1)"),
            Some("Only http, https, mailto, and tel links are allowed")
        );
        assert_eq!(validate_link_href("https://a.example"), None);
    }
}
