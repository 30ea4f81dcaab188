//! Property-based tests for the highlighters and the block tokenizer
//!
//! Every highlighter must be lossless (removing the span wrappers and
//! unescaping gives back the input) and must never emit live markup.

use once_cell::sync::Lazy;
use proptest::prelude::*;
use regex::Regex;

use hilite::blocks::{tokenize_block, Tokenized};
use hilite::{
    escape_html, highlight_bash, highlight_css, highlight_html, highlight_javascript,
    highlight_json, unescape_html,
};

static WRAPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<span class="syntax-[a-z-]+">|</span>"#).unwrap());

static ENTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"&(?:amp|lt|gt|quot|#039);").unwrap());

const HIGHLIGHTERS: [(&str, fn(&str) -> String); 5] = [
    ("bash", highlight_bash),
    ("css", highlight_css),
    ("html", highlight_html),
    ("javascript", highlight_javascript),
    ("json", highlight_json),
];

fn strip_wrappers(html: &str) -> String {
    WRAPPER.replace_all(html, "").into_owned()
}

/// Fragments every lexer treats specially
const SPECIAL: [&str; 17] = [
    "<style>",
    "</style>",
    "<script>",
    "</script>",
    "<!--",
    "-->",
    "<!DOCTYPE html>",
    "<![CDATA[",
    "@media",
    "${",
    "$(",
    "&&",
    "/*",
    "*/",
    "`",
    "\\",
    "\n",
];

/// Source-like text built from special fragments and short runs
fn code_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            prop::sample::select(SPECIAL.to_vec()).prop_map(str::to_string),
            "[a-z0-9 <>&\"'#{}():;$=./*,-]{1,8}",
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

fn check_lossless(input: &str) -> Result<(), TestCaseError> {
    for (name, highlight) in HIGHLIGHTERS {
        let html = highlight(input);
        prop_assert_eq!(&unescape_html(&strip_wrappers(&html)), input, "{} is lossy", name);
    }
    Ok(())
}

fn check_no_live_markup(input: &str) -> Result<(), TestCaseError> {
    for (name, highlight) in HIGHLIGHTERS {
        let text = strip_wrappers(&highlight(input));
        prop_assert!(!text.contains('<'), "{} leaked '<'", name);
        prop_assert!(!text.contains('>'), "{} leaked '>'", name);
        let bare = ENTITY.replace_all(&text, "");
        prop_assert!(!bare.contains('&'), "{} leaked '&'", name);
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_highlight_is_lossless(input in code_strategy()) {
        check_lossless(&input)?;
    }

    #[test]
    fn test_highlight_is_lossless_for_any_text(input in any::<String>()) {
        check_lossless(&input)?;
    }

    #[test]
    fn test_highlight_emits_no_live_markup(input in code_strategy()) {
        check_no_live_markup(&input)?;
    }

    #[test]
    fn test_escape_round_trip(input in any::<String>()) {
        prop_assert_eq!(unescape_html(&escape_html(&input)), input);
    }

    #[test]
    fn test_block_tokenizer_progresses(
        lines in prop::collection::vec("[-*+#>|`~:\\[\\] x0-9a-z\t]{0,12}", 0..20)
    ) {
        let mut index = 0;
        while let Some(Tokenized { end_index, .. }) = tokenize_block(&lines, index) {
            prop_assert!(end_index > index);
            prop_assert!(end_index <= lines.len());
            index = end_index;
        }
    }
}
