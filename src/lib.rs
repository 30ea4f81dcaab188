//! hilite - syntax highlighting and Markdown block tokenizing
//!
//! Source text goes in, escaped HTML with `syntax-*` classed spans comes
//! out. Scanning never fails: unknown or malformed input degrades to
//! escaped plain text.

pub mod blocks;
pub mod config;
pub mod error;
pub mod escape;
pub mod json;
pub mod syntax;

pub use error::{HighlightError, Result};
pub use escape::{decorate_hex_in_html, escape_html, unescape_html};
pub use json::{is_nested_json, parse_nested_json};
pub use syntax::{
    highlight_bash, highlight_css, highlight_html, highlight_javascript, highlight_json,
    HighlightOptions, Highlighter, Language,
};
