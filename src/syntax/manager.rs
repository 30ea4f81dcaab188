//! Highlight facade
//!
//! The `Highlighter` maps a language tag to the right lexer and applies
//! output options (colour swatches, `<pre>` wrapping). It is the one
//! place where an unsupported tag becomes visible to the caller.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::error::{HighlightError, Result};
use crate::escape::{decorate_hex_in_html, escape_html};

use super::language::Language;

/// Output options for the facade
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightOptions {
    /// Wrap hex colours in swatch elements
    pub decorate_colors: bool,
    /// Wrap output in `<pre class="syntax-block"><code>`
    pub wrap_in_pre: bool,
}

/// Main highlighting entry point
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    options: HighlightOptions,
    /// User-defined tag aliases (lowercase tag -> language)
    aliases: HashMap<String, Language>,
}

impl Highlighter {
    /// Create a highlighter with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a highlighter with the given options
    pub fn with_options(options: HighlightOptions) -> Self {
        Self {
            options,
            aliases: HashMap::new(),
        }
    }

    /// Map an extra tag to a language
    pub fn add_alias(&mut self, tag: &str, language: Language) {
        self.aliases.insert(tag.trim().to_lowercase(), language);
    }

    /// Resolve a tag, consulting user aliases first
    pub fn resolve(&self, tag: &str) -> Result<Language> {
        if let Some(lang) = self.aliases.get(&tag.trim().to_lowercase()) {
            debug!(tag, language = lang.name(), "resolved user alias");
            return Ok(*lang);
        }
        let resolved = Language::from_tag(tag);
        match &resolved {
            Ok(lang) => debug!(tag, language = lang.name(), "resolved language tag"),
            Err(err) => debug!(tag, %err, "cannot resolve language tag"),
        }
        resolved
    }

    /// Detect language from a file name
    ///
    /// A user alias matching the file extension wins over the built-in
    /// extension table, so `bats = "bash"` also covers `suite.bats`.
    pub fn detect_language(&self, path: &Path) -> Option<Language> {
        let alias = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.aliases.get(&ext.to_lowercase()));
        if let Some(lang) = alias {
            debug!(path = %path.display(), language = lang.name(), "extension matched user alias");
            return Some(*lang);
        }
        Language::from_path(path)
    }

    /// Highlight `source` for a language tag
    ///
    /// Fails only when the tag names no supported language.
    pub fn highlight(&self, source: &str, tag: &str) -> Result<String> {
        let language = self.resolve(tag)?;
        Ok(self.highlight_language(source, language))
    }

    /// Highlight `source`, degrading to escaped plain text for an unknown tag
    pub fn highlight_or_escape(&self, source: &str, tag: &str) -> String {
        match self.highlight(source, tag) {
            Ok(html) => html,
            Err(HighlightError::UnsupportedLanguage(_)) => {
                debug!(tag, "falling back to plain text");
                self.finish(escape_html(source), None)
            }
            Err(err) => {
                debug!(%err, "highlighting failed, falling back to plain text");
                self.finish(escape_html(source), None)
            }
        }
    }

    /// Highlight `source` with a known language
    pub fn highlight_language(&self, source: &str, language: Language) -> String {
        self.finish(language.highlight(source), Some(language))
    }

    /// List available language names
    pub fn list_languages(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = Language::ALL.iter().map(|lang| lang.name()).collect();
        names.sort();
        names
    }

    fn finish(&self, mut html: String, language: Option<Language>) -> String {
        if self.options.decorate_colors {
            html = decorate_hex_in_html(&html);
        }
        if self.options.wrap_in_pre {
            let tag = language.map_or("text", |lang| lang.tag());
            html = format!(
                "<pre class=\"syntax-block\" data-language=\"{}\"><code>{}</code></pre>",
                tag, html
            );
        }
        html
    }
}

/// Highlight shell source
pub fn highlight_bash(source: &str) -> String {
    Language::Bash.highlight(source)
}

/// Highlight CSS source
pub fn highlight_css(source: &str) -> String {
    Language::Css.highlight(source)
}

/// Highlight HTML source, including embedded style and script bodies
pub fn highlight_html(source: &str) -> String {
    Language::Html.highlight(source)
}

/// Highlight JavaScript source
pub fn highlight_javascript(source: &str) -> String {
    Language::JavaScript.highlight(source)
}

/// Highlight JSON source
pub fn highlight_json(source: &str) -> String {
    Language::Json.highlight(source)
}
