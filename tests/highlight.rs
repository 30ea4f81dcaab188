//! Integration tests for the public highlighting and tokenizing API

use hilite::blocks::{
    get_indent, parse_pipe_row, parse_task_list, tokenize_text, BlockToken, TaskItem,
};
use hilite::syntax::{builtin, SpanClass};
use hilite::{
    escape_html, highlight_bash, highlight_css, highlight_html, is_nested_json, HighlightError,
    HighlightOptions, Highlighter, Language,
};

#[test]
fn test_css_selector_property_value() {
    let html = highlight_css("a:hover { color: blue; }");
    assert!(html.contains("<span class=\"syntax-selector\">a:hover</span>"));
    assert!(html.contains("<span class=\"syntax-property\">color</span>"));
    assert!(html.contains("<span class=\"syntax-value\">blue</span>"));
}

#[test]
fn test_bash_command_after_and() {
    let html = highlight_bash("echo a && run_tests");
    assert!(html.contains("<span class=\"syntax-keyword\">run_tests</span>"));
    assert!(html.contains("</span> a <span"));
}

#[test]
fn test_escape_is_not_idempotent() {
    assert_eq!(escape_html(&escape_html("&")), "&amp;amp;");
}

#[test]
fn test_nested_json_detection() {
    assert!(!is_nested_json("42"));
    assert!(is_nested_json("{\"a\":1}"));
    assert!(is_nested_json("[1]"));
    let huge = format!("[{}]", "1,".repeat(60_000) + "1");
    assert!(!is_nested_json(&huge));
}

#[test]
fn test_block_utilities() {
    assert_eq!(parse_pipe_row("| A | B |"), vec!["A", "B"]);
    assert_eq!(parse_pipe_row("| A \\| B | C |"), vec!["A | B", "C"]);
    assert_eq!(get_indent("\t  x"), 4);
}

#[test]
fn test_task_list_examples() {
    let tokenized = parse_task_list(&["- [ ] a", "- [x] b"], 0).unwrap();
    assert_eq!(tokenized.end_index, 2);
    assert_eq!(
        tokenized.token,
        BlockToken::TaskList {
            items: vec![
                TaskItem {
                    checked: false,
                    content: "a".to_string()
                },
                TaskItem {
                    checked: true,
                    content: "b".to_string()
                },
            ]
        }
    );

    let tokenized = parse_task_list(&["- [ ] a", "", "not a task"], 0).unwrap();
    assert_eq!(tokenized.end_index, 1);
}

#[test]
fn test_html_page_with_embedded_regions() {
    let page = "<!DOCTYPE html>\n<html>\n<head>\n<style>\nbody { margin: 0 }\n</style>\n\
                <script>let n = 1;</script>\n</head>\n<body class=main>&copy;</body>\n</html>\n";
    let html = highlight_html(page);
    assert!(html.starts_with("<span class=\"syntax-doctype\">&lt;!DOCTYPE html&gt;</span>"));
    assert!(html.contains("<span class=\"syntax-selector\">body</span>"));
    assert!(html.contains("<span class=\"syntax-property\">margin</span>"));
    assert!(html.contains("<span class=\"syntax-keyword\">let</span>"));
    assert!(html.contains("<span class=\"syntax-attribute\">class</span>"));
    assert!(html.contains("&amp;copy;"));
}

#[test]
fn test_facade_resolves_tags_and_fails_on_unknown() {
    let highlighter = Highlighter::new();
    assert_eq!(highlighter.resolve("SCSS").ok(), None);
    assert_eq!(highlighter.resolve(" Shell ").unwrap(), Language::Bash);
    assert!(matches!(
        highlighter.highlight("x", "cobol"),
        Err(HighlightError::UnsupportedLanguage(tag)) if tag == "cobol"
    ));
    assert_eq!(highlighter.highlight_or_escape("a<b", "cobol"), "a&lt;b");
}

#[test]
fn test_facade_options() {
    let highlighter = Highlighter::with_options(HighlightOptions {
        decorate_colors: true,
        wrap_in_pre: false,
    });
    let html = highlighter.highlight("p { color: #abcdef; }", "css").unwrap();
    assert!(html.contains("<span class=\"color-preview\" style=\"--swatch-color: #abcdef\">#abcdef</span>"));
}

#[test]
fn test_lexers_expose_spans() {
    let spans = builtin::json::lex("{\"k\": true}");
    let classes: Vec<SpanClass> = spans.iter().map(|span| span.class).collect();
    assert_eq!(
        classes,
        vec![
            SpanClass::Punctuation,
            SpanClass::Property,
            SpanClass::Punctuation,
            SpanClass::Plain,
            SpanClass::Keyword,
            SpanClass::Punctuation,
        ]
    );
}

#[test]
fn test_tokenize_document() {
    let tokens = tokenize_text("## Setup\n\n```bash\nnpm ci\n```\n");
    assert_eq!(
        tokens,
        vec![
            BlockToken::Heading {
                level: 2,
                text: "Setup".to_string()
            },
            BlockToken::CodeFence {
                info: Some("bash".to_string()),
                code: "npm ci".to_string()
            },
        ]
    );
}
