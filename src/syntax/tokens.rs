//! Span classes for syntax highlighting
//!
//! This module defines the fixed taxonomy of semantic classes a lexer
//! can assign to a span, their CSS class names, and their default
//! terminal styles.

use super::style::{Color, Style};

/// Semantic class of a highlighted span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanClass {
    /// Comments (`# ...`, `/* ... */`, `<!-- ... -->`)
    Comment,
    /// String literals and attribute values
    String,
    /// Shell variables, declared script bindings
    Variable,
    /// Keywords, and shell words in command position
    Keyword,
    /// Operators (`&&`, `>>`, `===`, ...)
    Operator,
    /// Numeric literals
    Number,
    /// Brackets, separators
    Punctuation,
    /// CSS selectors
    Selector,
    /// CSS property names, JSON object keys
    Property,
    /// CSS property values
    Value,
    /// CSS at-rules (`@media`)
    AtRule,
    /// HTML tag names and delimiters
    Tag,
    /// HTML attribute names
    Attribute,
    /// HTML doctype declarations
    Doctype,
    /// Unclassified text, emitted without a wrapper
    Plain,
}

impl SpanClass {
    /// All classes, in taxonomy order
    pub const ALL: [SpanClass; 15] = [
        SpanClass::Comment,
        SpanClass::String,
        SpanClass::Variable,
        SpanClass::Keyword,
        SpanClass::Operator,
        SpanClass::Number,
        SpanClass::Punctuation,
        SpanClass::Selector,
        SpanClass::Property,
        SpanClass::Value,
        SpanClass::AtRule,
        SpanClass::Tag,
        SpanClass::Attribute,
        SpanClass::Doctype,
        SpanClass::Plain,
    ];

    /// CSS class of the wrapping `<span>`, `None` for plain text
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            SpanClass::Comment => Some("syntax-comment"),
            SpanClass::String => Some("syntax-string"),
            SpanClass::Variable => Some("syntax-variable"),
            SpanClass::Keyword => Some("syntax-keyword"),
            SpanClass::Operator => Some("syntax-operator"),
            SpanClass::Number => Some("syntax-number"),
            SpanClass::Punctuation => Some("syntax-punctuation"),
            SpanClass::Selector => Some("syntax-selector"),
            SpanClass::Property => Some("syntax-property"),
            SpanClass::Value => Some("syntax-value"),
            SpanClass::AtRule => Some("syntax-at-rule"),
            SpanClass::Tag => Some("syntax-tag"),
            SpanClass::Attribute => Some("syntax-attribute"),
            SpanClass::Doctype => Some("syntax-doctype"),
            SpanClass::Plain => None,
        }
    }

    /// Get the default terminal style for this class
    pub fn default_style(&self) -> Style {
        match self {
            SpanClass::Comment => Style::fg(Color::BrightBlack).with_italic(),
            SpanClass::String => Style::fg(Color::Green),
            SpanClass::Variable => Style::fg(Color::BrightCyan),
            SpanClass::Keyword => Style::fg(Color::Magenta).with_bold(),
            SpanClass::Operator => Style::fg(Color::BrightWhite),
            SpanClass::Number => Style::fg(Color::Cyan),
            SpanClass::Punctuation => Style::default(),
            SpanClass::Selector => Style::fg(Color::Yellow),
            SpanClass::Property => Style::fg(Color::Blue),
            SpanClass::Value => Style::fg(Color::BrightGreen),
            SpanClass::AtRule => Style::fg(Color::BrightMagenta),
            SpanClass::Tag => Style::fg(Color::BrightBlue),
            SpanClass::Attribute => Style::fg(Color::Yellow),
            SpanClass::Doctype => Style::fg(Color::BrightBlack).with_bold(),
            SpanClass::Plain => Style::default(),
        }
    }

    /// Get the configuration name for this class
    pub fn name(&self) -> &'static str {
        match self {
            SpanClass::Comment => "comment",
            SpanClass::String => "string",
            SpanClass::Variable => "variable",
            SpanClass::Keyword => "keyword",
            SpanClass::Operator => "operator",
            SpanClass::Number => "number",
            SpanClass::Punctuation => "punctuation",
            SpanClass::Selector => "selector",
            SpanClass::Property => "property",
            SpanClass::Value => "value",
            SpanClass::AtRule => "at-rule",
            SpanClass::Tag => "tag",
            SpanClass::Attribute => "attribute",
            SpanClass::Doctype => "doctype",
            SpanClass::Plain => "plain",
        }
    }

    /// Parse a class from its configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        SpanClass::ALL.into_iter().find(|class| class.name() == name)
    }
}
