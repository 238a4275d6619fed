//! HTML escaping for everything the renderer did not produce itself.

use std::borrow::Cow;

/// Escapes `&`, `<`, `>`, `"` and `'`.
///
/// The result is safe as element text and inside a single- or double-quoted
/// attribute value. Borrows when nothing needs escaping.
pub fn escape(s: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(s)
}

/// Appends the escaped form of `s` to `out`.
pub fn escape_into(s: &str, out: &mut String) {
    out.push_str(&escape(s));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape("<script>alert(\"x\")</script> & more"),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; more"
        );
    }

    #[test]
    fn escapes_single_quote() {
        let out = escape("it's");
        assert!(!out.contains('\''));
        assert!(out.starts_with("it&"));
    }

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(escape("nothing to do"), Cow::Borrowed(_)));
    }

    #[test]
    fn escaping_twice_is_visible() {
        // Not idempotent: text must pass through exactly once.
        assert_eq!(escape(&escape("&")), "&amp;amp;");
    }

    #[test]
    fn escape_into_appends() {
        let mut out = String::from("<p>");
        escape_into("a<b", &mut out);
        assert_eq!(out, "<p>a&lt;b");
    }
}
