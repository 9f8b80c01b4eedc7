//! Shared helpers for HTML output.

/// Escape text for use in HTML element content and attribute values.
///
/// # Examples
///
/// ```
/// use folio_portable_text::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// URL schemes a rendered link may point to.
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Whether `href` is safe to emit as a link target.
///
/// Relative URLs and fragments are allowed; absolute URLs must use one of
/// `http`, `https`, `mailto` or `tel`.
pub fn is_safe_href(href: &str) -> bool {
    let href = href.trim();
    if href.is_empty() {
        return false;
    }
    // Browsers ignore embedded whitespace and control chars inside schemes.
    let compact: String = href
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect();

    let Some(colon) = compact.find(':') else {
        return true;
    };
    if compact[..colon].contains(['/', '?', '#']) {
        return true;
    }
    let scheme = compact[..colon].to_ascii_lowercase();
    SAFE_SCHEMES.contains(&scheme.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_html("hello world"), "hello world");
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_safe_hrefs() {
        assert!(is_safe_href("https://example.com"));
        assert!(is_safe_href("http://example.com/a?b=c"));
        assert!(is_safe_href("mailto:me@example.com"));
        assert!(is_safe_href("tel:+123"));
        assert!(is_safe_href("/blogs/hello"));
        assert!(is_safe_href("#section"));
        assert!(is_safe_href("relative/path:with-colon"));
    }

    #[test]
    fn test_unsafe_hrefs() {
        assert!(!is_safe_href("javascript:alert(1)"));
        assert!(!is_safe_href("JavaScript:alert(1)"));
        assert!(!is_safe_href("java\tscript:alert(1)"));
        assert!(!is_safe_href("data:text/html,<b>x</b>"));
        assert!(!is_safe_href("vbscript:msgbox"));
        assert!(!is_safe_href(""));
        assert!(!is_safe_href("   "));
    }
}
