//! Supported languages
//!
//! The language set is fixed at build time. Each language knows its tag
//! aliases, file extensions, and which built-in lexer to run.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{HighlightError, Result};

use super::builtin::{bash, css, html, javascript, json};
use super::span::{render, Span};

/// A language with a built-in lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Bash,
    Css,
    Html,
    JavaScript,
    Json,
}

impl Language {
    /// All supported languages
    pub const ALL: [Language; 5] = [
        Language::Bash,
        Language::Css,
        Language::Html,
        Language::JavaScript,
        Language::Json,
    ];

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Language::Bash => "Bash",
            Language::Css => "CSS",
            Language::Html => "HTML",
            Language::JavaScript => "JavaScript",
            Language::Json => "JSON",
        }
    }

    /// Canonical lowercase tag, as used in `data-language`
    pub fn tag(&self) -> &'static str {
        self.aliases()[0]
    }

    /// Tags accepted for this language; the first is canonical
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Language::Bash => &["bash", "sh", "shell", "zsh", "ksh", "console", "shellscript"],
            Language::Css => &["css"],
            Language::Html => &["html", "htm", "xhtml", "xml", "svg", "vue"],
            Language::JavaScript => &["javascript", "js", "mjs", "cjs", "jsx", "node"],
            Language::Json => &["json", "jsonc", "json5", "geojson", "webmanifest"],
        }
    }

    /// File extensions (without the dot)
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Bash => &["sh", "bash", "zsh", "ksh"],
            Language::Css => &["css"],
            Language::Html => &["html", "htm", "xhtml", "xml", "svg", "vue"],
            Language::JavaScript => &["js", "mjs", "cjs", "jsx"],
            Language::Json => &["json", "jsonc", "json5", "geojson", "webmanifest"],
        }
    }

    /// Resolve a code-block language tag (case-insensitive)
    pub fn from_tag(tag: &str) -> Result<Self> {
        let normalized = tag.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.aliases().contains(&normalized.as_str()))
            .ok_or_else(|| HighlightError::UnsupportedLanguage(tag.trim().to_string()))
    }

    /// Detect language from a file name
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        if matches!(file_name, ".bashrc" | ".bash_profile" | ".profile" | ".zshrc") {
            return Some(Language::Bash);
        }
        let ext = path.extension()?.to_str()?.to_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }

    /// Run this language's lexer
    pub fn lex(&self, source: &str) -> Vec<Span> {
        match self {
            Language::Bash => bash::lex(source),
            Language::Css => css::lex(source),
            Language::Html => html::lex(source),
            Language::JavaScript => javascript::lex(source),
            Language::Json => json::lex(source),
        }
    }

    /// Highlight `source` as an HTML fragment
    pub fn highlight(&self, source: &str) -> String {
        if source.is_empty() {
            return String::new();
        }
        render(&self.lex(source))
    }
}

impl FromStr for Language {
    type Err = HighlightError;

    fn from_str(s: &str) -> Result<Self> {
        Language::from_tag(s)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
