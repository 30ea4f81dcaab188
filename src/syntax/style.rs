//! Terminal styles for highlighted spans
//!
//! The HTML output only carries class names. These styles are used when
//! spans are printed straight to a terminal.

use crossterm::style::{Attribute, Color as TermColor, ContentStyle};

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// Parse a color name as written in the config file (`bright-blue`)
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name.trim().to_lowercase().replace('_', "-").as_str() {
            "default" => Color::Default,
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "bright-black" | "gray" | "grey" => Color::BrightBlack,
            "bright-red" => Color::BrightRed,
            "bright-green" => Color::BrightGreen,
            "bright-yellow" => Color::BrightYellow,
            "bright-blue" => Color::BrightBlue,
            "bright-magenta" => Color::BrightMagenta,
            "bright-cyan" => Color::BrightCyan,
            "bright-white" => Color::BrightWhite,
            _ => return None,
        };
        Some(color)
    }

    /// Map to the crossterm color, `None` for the terminal default
    fn to_terminal(self) -> Option<TermColor> {
        match self {
            Color::Default => None,
            Color::Black => Some(TermColor::Black),
            Color::Red => Some(TermColor::DarkRed),
            Color::Green => Some(TermColor::DarkGreen),
            Color::Yellow => Some(TermColor::DarkYellow),
            Color::Blue => Some(TermColor::DarkBlue),
            Color::Magenta => Some(TermColor::DarkMagenta),
            Color::Cyan => Some(TermColor::DarkCyan),
            Color::White => Some(TermColor::Grey),
            Color::BrightBlack => Some(TermColor::DarkGrey),
            Color::BrightRed => Some(TermColor::Red),
            Color::BrightGreen => Some(TermColor::Green),
            Color::BrightYellow => Some(TermColor::Yellow),
            Color::BrightBlue => Some(TermColor::Blue),
            Color::BrightMagenta => Some(TermColor::Magenta),
            Color::BrightCyan => Some(TermColor::Cyan),
            Color::BrightWhite => Some(TermColor::White),
        }
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Convert to a crossterm content style
    pub fn to_content_style(&self) -> ContentStyle {
        let mut style = ContentStyle::new();
        style.foreground_color = self.fg.to_terminal();
        style.background_color = self.bg.to_terminal();
        if self.bold {
            style.attributes.set(Attribute::Bold);
        }
        if self.italic {
            style.attributes.set(Attribute::Italic);
        }
        if self.underline {
            style.attributes.set(Attribute::Underlined);
        }
        style
    }
}
