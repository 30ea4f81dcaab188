//! HTML escaping and colour-swatch decoration
//!
//! Every character a lexer emits passes through [`escape_html`] first,
//! so highlighted output can be injected into a page without being
//! re-interpreted as live markup.

use once_cell::sync::Lazy;
use regex::Regex;

/// 3- or 6-digit hex colour, not running on into more word characters
static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b").expect("valid hex colour regex"));

/// Escape `& < > " '` as HTML entities.
///
/// Not idempotent: escaping already escaped text escapes the `&` again.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reverse [`escape_html`].
///
/// Only the five entities produced by `escape_html` are recognised;
/// anything else starting with `&` is kept as-is.
pub fn unescape_html(text: &str) -> String {
    const ENTITIES: [(&str, char); 5] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#039;", '\''),
    ];

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, ch)) => {
                out.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Wrap hex colours found in the text content of `html` in a swatch element.
///
/// Matches inside tag markup (`<...>`) and inside character references
/// such as `&#039;` are left alone. Input without any match is returned
/// unchanged.
pub fn decorate_hex_in_html(html: &str) -> String {
    if html.is_empty() || !html.contains('#') {
        return html.to_string();
    }

    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut text_start = 0;

    for (idx, ch) in html.char_indices() {
        match ch {
            '<' if !in_tag => {
                decorate_text(&html[text_start..idx], &mut out);
                in_tag = true;
                text_start = idx;
            }
            '>' if in_tag => {
                out.push_str(&html[text_start..=idx]);
                in_tag = false;
                text_start = idx + 1;
            }
            _ => {}
        }
    }

    let tail = &html[text_start..];
    if in_tag {
        out.push_str(tail);
    } else {
        decorate_text(tail, &mut out);
    }
    out
}

/// Decorate one run of text content (no tag markup inside)
fn decorate_text(text: &str, out: &mut String) {
    let mut last = 0;
    for m in HEX_COLOR.find_iter(text) {
        // `&#039;` and friends are character references, not colours
        if text[..m.start()].ends_with('&') {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        out.push_str("<span class=\"color-preview\" style=\"--swatch-color: ");
        out.push_str(m.as_str());
        out.push_str("\">");
        out.push_str(m.as_str());
        out.push_str("</span>");
        last = m.end();
    }
    out.push_str(&text[last..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_specials() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_is_not_idempotent() {
        assert_eq!(escape_html(&escape_html("&")), "&amp;amp;");
    }

    #[test]
    fn test_escape_empty() {
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_unescape_reverses_escape() {
        let source = "if [ \"$a\" -lt 3 ] && echo '<ok>'; then :; fi";
        assert_eq!(unescape_html(&escape_html(source)), source);
    }

    #[test]
    fn test_unescape_keeps_unknown_entities() {
        assert_eq!(unescape_html("&nbsp; &amp"), "&nbsp; &amp");
    }

    #[test]
    fn test_decorate_wraps_text_colours() {
        let html = r#"<span class="syntax-value">#ff0000</span>; #abc"#;
        let decorated = decorate_hex_in_html(html);
        assert_eq!(
            decorated,
            "<span class=\"syntax-value\"><span class=\"color-preview\" style=\"--swatch-color: #ff0000\">#ff0000</span></span>; \
             <span class=\"color-preview\" style=\"--swatch-color: #abc\">#abc</span>"
        );
    }

    #[test]
    fn test_decorate_skips_tag_markup() {
        let html = r##"<div data-c="#fff">text</div>"##;
        assert_eq!(decorate_hex_in_html(html), html);
    }

    #[test]
    fn test_decorate_skips_character_references() {
        let html = "it&#039;s #123";
        assert_eq!(
            decorate_hex_in_html(html),
            "it&#039;s <span class=\"color-preview\" style=\"--swatch-color: #123\">#123</span>"
        );
    }

    #[test]
    fn test_decorate_ignores_other_lengths() {
        assert_eq!(decorate_hex_in_html("#abcd #1234567 #gg0"), "#abcd #1234567 #gg0");
    }

    #[test]
    fn test_decorate_identity_on_empty() {
        assert_eq!(decorate_hex_in_html(""), "");
        assert_eq!(decorate_hex_in_html("no colours here"), "no colours here");
    }
}
