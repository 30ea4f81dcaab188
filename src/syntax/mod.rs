//! Syntax highlighting module
//!
//! This module turns source text into classified spans:
//! - one hand-written state-machine lexer per language (`builtin`)
//! - the span-class taxonomy and its terminal styles
//! - a facade that maps language tags to lexers

pub mod builtin;
mod language;
mod manager;
mod span;
mod style;
mod tokens;

pub use language::Language;
pub use manager::{
    highlight_bash, highlight_css, highlight_html, highlight_javascript, highlight_json,
    HighlightOptions, Highlighter,
};
pub use span::{render, Span};
pub use style::{Color, Style};
pub use tokens::SpanClass;
