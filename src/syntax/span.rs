//! Highlighted spans and their HTML rendering

use crate::escape::{escape_html, unescape_html};

use super::tokens::SpanClass;

/// A run of escaped source text tagged with one class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// HTML-escaped text
    pub text: String,
    /// Semantic class
    pub class: SpanClass,
}

impl Span {
    /// Create a span from raw (unescaped) source text
    pub fn new(class: SpanClass, raw: &str) -> Self {
        Self {
            text: escape_html(raw),
            class,
        }
    }

    /// The original source text of this span
    pub fn raw_text(&self) -> String {
        unescape_html(&self.text)
    }

    /// Render this span as an HTML fragment
    pub fn write_html(&self, out: &mut String) {
        match self.class.css_class() {
            Some(css) => {
                out.push_str("<span class=\"");
                out.push_str(css);
                out.push_str("\">");
                out.push_str(&self.text);
                out.push_str("</span>");
            }
            None => out.push_str(&self.text),
        }
    }
}

/// Render spans as a flat HTML fragment
pub fn render(spans: &[Span]) -> String {
    let capacity = spans.iter().map(|s| s.text.len() + 36).sum();
    let mut out = String::with_capacity(capacity);
    for span in spans {
        span.write_html(&mut out);
    }
    out
}

/// Span accumulator shared by the lexers
///
/// Empty tokens are dropped and neighbouring plain text is merged, so
/// plain whitespace does not fragment the output.
#[derive(Debug, Default)]
pub(crate) struct SpanSink {
    spans: Vec<Span>,
}

impl SpanSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Emit one complete token
    pub(crate) fn push(&mut self, class: SpanClass, raw: &str) {
        if raw.is_empty() {
            return;
        }
        if class == SpanClass::Plain {
            if let Some(last) = self.spans.last_mut() {
                if last.class == SpanClass::Plain {
                    last.text.push_str(&escape_html(raw));
                    return;
                }
            }
        }
        self.spans.push(Span::new(class, raw));
    }

    /// Emit the contents of `buf` as one token and clear it
    pub(crate) fn flush(&mut self, class: SpanClass, buf: &mut String) {
        self.push(class, buf.as_str());
        buf.clear();
    }

    /// Splice spans produced by another lexer
    pub(crate) fn extend(&mut self, spans: Vec<Span>) {
        for span in spans {
            if span.class == SpanClass::Plain {
                if let Some(last) = self.spans.last_mut() {
                    if last.class == SpanClass::Plain {
                        last.text.push_str(&span.text);
                        continue;
                    }
                }
            }
            self.spans.push(span);
        }
    }

    pub(crate) fn into_spans(self) -> Vec<Span> {
        self.spans
    }
}
