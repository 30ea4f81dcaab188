//! Configuration file support
//!
//! Loads settings from ~/.hilite.toml (or %USERPROFILE%\.hilite.toml on Windows)
//!
//! Example:
//! ```toml
//! [output]
//! decorate-colors = true
//! wrap = false
//! format = "ansi"
//!
//! [aliases]
//! zsh-theme = "bash"
//!
//! [colors]
//! keyword = "bright-magenta"
//! comment = { fg = "grey", italic = true }
//! ```
//!
//! Unknown keys are ignored. Invalid values keep their default.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::{debug, warn};

use crate::error::{HighlightError, Result};
use crate::syntax::{Color, HighlightOptions, Highlighter, Language, SpanClass, Style};

/// What the CLI prints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Escaped HTML with classed spans
    #[default]
    Html,
    /// Terminal colours
    Ansi,
    /// One `class<TAB>text` line per span
    Spans,
    /// Markdown block tokens
    Blocks,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "html" => Some(OutputFormat::Html),
            "ansi" | "terminal" => Some(OutputFormat::Ansi),
            "spans" => Some(OutputFormat::Spans),
            "blocks" => Some(OutputFormat::Blocks),
            _ => None,
        }
    }
}

/// Configuration settings
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Wrap hex colours in swatch elements
    pub decorate_colors: bool,
    /// Wrap HTML output in `<pre><code>`
    pub wrap_in_pre: bool,
    /// Default output format
    pub format: OutputFormat,
    /// Extra language tags
    pub aliases: HashMap<String, Language>,
    /// Terminal style overrides per span class
    pub palette: HashMap<SpanClass, Style>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".hilite.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".hilite.toml"))
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file");
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        debug!(path = %path.display(), "loading config");
        Self::parse(&contents)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut config = Config::default();
        config.apply(&table)?;
        Ok(config)
    }

    /// Apply settings from a parsed config table
    fn apply(&mut self, table: &Table) -> Result<()> {
        if let Some(output) = section(table, "output")? {
            if let Some(value) = output.get("decorate-colors") {
                match parse_bool(value) {
                    Some(flag) => self.decorate_colors = flag,
                    None => warn!(%value, "ignoring invalid decorate-colors"),
                }
            }

            if let Some(value) = output.get("wrap") {
                match parse_bool(value) {
                    Some(flag) => self.wrap_in_pre = flag,
                    None => warn!(%value, "ignoring invalid wrap"),
                }
            }

            if let Some(value) = output.get("format") {
                match value.as_str().and_then(OutputFormat::from_name) {
                    Some(format) => self.format = format,
                    None => warn!(%value, "ignoring invalid format"),
                }
            }
        }

        if let Some(aliases) = section(table, "aliases")? {
            for (tag, value) in aliases {
                match value.as_str().map(Language::from_tag) {
                    Some(Ok(language)) => {
                        self.aliases.insert(tag.to_lowercase(), language);
                    }
                    _ => warn!(tag = tag.as_str(), %value, "ignoring alias to unknown language"),
                }
            }
        }

        if let Some(colors) = section(table, "colors")? {
            for (name, value) in colors {
                let Some(class) = SpanClass::from_name(name) else {
                    warn!(class = name.as_str(), "ignoring colour for unknown class");
                    continue;
                };
                match parse_style(value) {
                    Some(style) => {
                        self.palette.insert(class, style);
                    }
                    None => warn!(class = name.as_str(), %value, "ignoring invalid colour"),
                }
            }
        }

        Ok(())
    }

    /// Facade options from the `[output]` section
    pub fn options(&self) -> HighlightOptions {
        HighlightOptions {
            decorate_colors: self.decorate_colors,
            wrap_in_pre: self.wrap_in_pre,
        }
    }

    /// A highlighter carrying these options and aliases
    pub fn highlighter(&self) -> Highlighter {
        let mut highlighter = Highlighter::with_options(self.options());
        for (tag, language) in &self.aliases {
            highlighter.add_alias(tag, *language);
        }
        highlighter
    }

    /// Terminal style for a span class, configured or default
    pub fn style_for(&self, class: SpanClass) -> Style {
        self.palette
            .get(&class)
            .copied()
            .unwrap_or_else(|| class.default_style())
    }
}

/// A named sub-table; present with another type is an error
fn section<'a>(table: &'a Table, name: &str) -> Result<Option<&'a Table>> {
    match table.get(name) {
        None => Ok(None),
        Some(Value::Table(section)) => Ok(Some(section)),
        Some(_) => Err(HighlightError::Config(format!("[{}] must be a table", name))),
    }
}

/// Parse a boolean value, accepting the usual string spellings
fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Boolean(flag) => Some(*flag),
        Value::Integer(1) => Some(true),
        Value::Integer(0) => Some(false),
        Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// A colour name, or a table of `fg`, `bg`, `bold`, `italic`, `underline`
fn parse_style(value: &Value) -> Option<Style> {
    match value {
        Value::String(name) => Color::from_name(name).map(Style::fg),
        Value::Table(table) => {
            let mut style = Style::default();
            for (key, value) in table {
                match key.as_str() {
                    "fg" => style.fg = Color::from_name(value.as_str()?)?,
                    "bg" => style.bg = Color::from_name(value.as_str()?)?,
                    "bold" => style.bold = parse_bool(value)?,
                    "italic" => style.italic = parse_bool(value)?,
                    "underline" => style.underline = parse_bool(value)?,
                    _ => {}
                }
            }
            Some(style)
        }
        _ => None,
    }
}
