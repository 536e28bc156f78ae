pub mod audit;
pub mod netscape;
pub mod report;

/// Escape element text for `&`, `<`, `>`. Ampersand first so the others do
/// not get double-escaped.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a quoted attribute value: text escaping plus both quote characters.
pub fn escape_attr(s: &str) -> String {
    escape_text(s)
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_escapes_three_entities() {
        assert_eq!(escape_text("a & b < c > d"), "a &amp; b &lt; c &gt; d");
        assert_eq!(escape_text(r#"say "hi""#), r#"say "hi""#);
    }

    #[test]
    fn attr_escapes_quotes_too() {
        assert_eq!(escape_attr(r#"x="1"&'2'"#), "x=&quot;1&quot;&amp;&#x27;2&#x27;");
    }

    #[test]
    fn no_double_escaping() {
        assert_eq!(escape_text("&lt;"), "&amp;lt;");
    }
}
