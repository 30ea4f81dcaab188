//! HTML language lexer
//!
//! Tags, attributes, comments, doctypes and CDATA sections are scanned
//! here. The bodies of `<style>` and `<script>` elements are captured
//! verbatim up to their closing tag and handed to the CSS, JavaScript or
//! JSON lexer; the spans those produce are spliced into this stream.

use crate::syntax::span::{render, Span, SpanSink};
use crate::syntax::tokens::SpanClass;

use super::{css, javascript, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Double,
    Single,
    Unquoted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    TagName,
    AttributeName,
    AttributeValue(Quote),
    Comment,
    Doctype,
    Cdata,
}

/// Lexer to run over the body of a raw-text element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Embedded {
    Style,
    Script,
    Json,
    /// `<script type="text/template">` and other non-script payloads
    Opaque,
}

struct HtmlLexer {
    chars: Vec<char>,
    pos: usize,
    state: State,
    buf: String,
    /// Lowercased name of the tag being scanned
    tag: String,
    closing: bool,
    /// Lowercased name of the attribute whose value comes next
    attribute: String,
    /// Value of the current tag's `type` attribute
    type_attr: Option<String>,
    sink: SpanSink,
}

/// Split HTML source into highlighted spans
pub fn lex(source: &str) -> Vec<Span> {
    if source.is_empty() {
        return Vec::new();
    }
    HtmlLexer::new(source).run()
}

/// Highlight HTML source as an HTML fragment
pub fn highlight(source: &str) -> String {
    if source.is_empty() {
        return String::new();
    }
    render(&lex(source))
}

impl HtmlLexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            state: State::Text,
            buf: String::new(),
            tag: String::new(),
            closing: false,
            attribute: String::new(),
            type_attr: None,
            sink: SpanSink::new(),
        }
    }

    fn run(mut self) -> Vec<Span> {
        while self.pos < self.chars.len() {
            self.step();
        }
        let class = self.state_class();
        self.sink.flush(class, &mut self.buf);
        self.sink.into_spans()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn starts_with(&self, text: &str, ignore_case: bool) -> bool {
        text.chars().enumerate().all(|(i, expected)| match self.peek(i) {
            Some(c) if ignore_case => c.eq_ignore_ascii_case(&expected),
            Some(c) => c == expected,
            None => false,
        })
    }

    /// Class used for whatever is pending in the current state
    fn state_class(&self) -> SpanClass {
        match self.state {
            State::Text => SpanClass::Plain,
            State::TagName => SpanClass::Tag,
            State::AttributeName => SpanClass::Attribute,
            State::AttributeValue(_) | State::Cdata => SpanClass::String,
            State::Comment => SpanClass::Comment,
            State::Doctype => SpanClass::Doctype,
        }
    }

    /// Transition function
    fn step(&mut self) {
        let c = self.chars[self.pos];
        match self.state {
            State::Text => self.scan_text(c),
            State::TagName => {
                if c.is_alphanumeric() || matches!(c, '-' | ':' | '_' | '.') {
                    self.buf.push(c);
                    self.tag.extend(c.to_lowercase());
                    self.pos += 1;
                } else {
                    self.sink.flush(SpanClass::Tag, &mut self.buf);
                    self.state = State::AttributeName;
                }
            }
            State::AttributeName => self.scan_attribute_name(c),
            State::AttributeValue(quote) => self.scan_attribute_value(c, quote),
            State::Comment => self.consume_until(c, "-->", 7, SpanClass::Comment),
            State::Cdata => self.consume_until(c, "]]>", 12, SpanClass::String),
            State::Doctype => self.consume_until(c, ">", 3, SpanClass::Doctype),
        }
    }

    fn scan_text(&mut self, c: char) {
        if c != '<' {
            self.buf.push(c);
            self.pos += 1;
            return;
        }

        let (opener, state) = if self.starts_with("<!--", false) {
            ("<!--", State::Comment)
        } else if self.starts_with("<![CDATA[", false) {
            ("<![CDATA[", State::Cdata)
        } else if self.starts_with("<!", false) || self.starts_with("<?", false) {
            (if self.peek(1) == Some('!') { "<!" } else { "<?" }, State::Doctype)
        } else if self.peek(1) == Some('/') && self.peek(2).is_some_and(char::is_alphabetic) {
            ("</", State::TagName)
        } else if self.peek(1).is_some_and(char::is_alphabetic) {
            ("<", State::TagName)
        } else {
            // a bare `<` in text
            self.buf.push(c);
            self.pos += 1;
            return;
        };

        self.sink.flush(SpanClass::Plain, &mut self.buf);
        self.buf.push_str(opener);
        self.pos += opener.chars().count();
        if state == State::TagName {
            self.tag.clear();
            self.type_attr = None;
            self.closing = opener == "</";
        }
        self.state = state;
    }

    fn scan_attribute_name(&mut self, c: char) {
        match c {
            c if c.is_whitespace() => {
                self.flush_attribute_name();
                self.sink.push(SpanClass::Plain, c.encode_utf8(&mut [0; 4]));
                self.pos += 1;
            }
            '>' => {
                self.flush_attribute_name();
                self.sink.push(SpanClass::Tag, ">");
                self.pos += 1;
                self.end_tag(false);
            }
            '/' if self.peek(1) == Some('>') => {
                self.flush_attribute_name();
                self.sink.push(SpanClass::Tag, "/>");
                self.pos += 2;
                self.end_tag(true);
            }
            '=' => {
                self.flush_attribute_name();
                self.sink.push(SpanClass::Punctuation, "=");
                self.pos += 1;
                self.start_attribute_value();
            }
            _ => {
                self.buf.push(c);
                self.pos += 1;
            }
        }
    }

    fn flush_attribute_name(&mut self) {
        if !self.buf.is_empty() {
            self.attribute = self.buf.to_lowercase();
            self.sink.flush(SpanClass::Attribute, &mut self.buf);
        }
    }

    /// After `=`: skip spaces and pick the quoting style of the value
    fn start_attribute_value(&mut self) {
        while let Some(c) = self.peek(0).filter(|c| c.is_whitespace()) {
            self.sink.push(SpanClass::Plain, c.encode_utf8(&mut [0; 4]));
            self.pos += 1;
        }
        self.state = match self.peek(0) {
            Some('"') => {
                self.buf.push('"');
                self.pos += 1;
                State::AttributeValue(Quote::Double)
            }
            Some('\'') => {
                self.buf.push('\'');
                self.pos += 1;
                State::AttributeValue(Quote::Single)
            }
            Some('>') | None => State::AttributeName,
            Some(_) => State::AttributeValue(Quote::Unquoted),
        };
    }

    fn scan_attribute_value(&mut self, c: char, quote: Quote) {
        let closes = match quote {
            Quote::Double => c == '"',
            Quote::Single => c == '\'',
            Quote::Unquoted => {
                if c.is_whitespace() || c == '>' || (c == '/' && self.peek(1) == Some('>')) {
                    // the terminator belongs to the tag, not the value
                    self.end_attribute_value();
                    return;
                }
                false
            }
        };
        self.buf.push(c);
        self.pos += 1;
        if closes {
            self.end_attribute_value();
        }
    }

    fn end_attribute_value(&mut self) {
        if self.attribute == "type" {
            let value = self.buf.trim_matches(|c: char| c == '"' || c == '\'');
            self.type_attr = Some(value.trim().to_lowercase());
        }
        self.sink.flush(SpanClass::String, &mut self.buf);
        self.state = State::AttributeName;
    }

    /// Accumulate until `terminator`; `min_len` keeps the opener from
    /// also counting as the terminator (`<!-->`)
    fn consume_until(&mut self, c: char, terminator: &str, min_len: usize, class: SpanClass) {
        self.buf.push(c);
        self.pos += 1;
        if self.buf.ends_with(terminator) && self.buf.chars().count() >= min_len {
            self.sink.flush(class, &mut self.buf);
            self.state = State::Text;
        }
    }

    fn end_tag(&mut self, self_closing: bool) {
        self.state = State::Text;
        self.attribute.clear();
        if self.closing || self_closing {
            return;
        }
        let embedded = match self.tag.as_str() {
            "style" => Embedded::Style,
            "script" => script_kind(self.type_attr.as_deref()),
            _ => return,
        };
        self.delegate(embedded);
    }

    /// Capture the element body up to its closing tag and highlight it
    /// with the matching lexer
    fn delegate(&mut self, embedded: Embedded) {
        let end = self.find_closing_tag().unwrap_or(self.chars.len());
        let body: String = self.chars[self.pos..end].iter().collect();
        self.pos = end;

        let spans = match embedded {
            Embedded::Style => css::lex(&body),
            Embedded::Script => javascript::lex(&body),
            Embedded::Json => json::lex(&body),
            Embedded::Opaque => vec![Span::new(SpanClass::Plain, &body)],
        };
        self.sink.extend(spans);
    }

    /// Position of `</tag` (any case) that closes the current element
    fn find_closing_tag(&self) -> Option<usize> {
        let name: Vec<char> = self.tag.chars().collect();
        (self.pos..self.chars.len()).find(|&i| {
            let rest = &self.chars[i..];
            rest.len() >= name.len() + 2
                && rest[0] == '<'
                && rest[1] == '/'
                && rest[2..2 + name.len()]
                    .iter()
                    .zip(&name)
                    .all(|(a, b)| a.eq_ignore_ascii_case(b))
                && !rest
                    .get(2 + name.len())
                    .is_some_and(|c| c.is_alphanumeric() || *c == '-')
        })
    }
}

/// Pick the lexer for a `<script>` body from its `type` attribute
fn script_kind(type_attr: Option<&str>) -> Embedded {
    match type_attr {
        None | Some("") => Embedded::Script,
        Some(t) if t.contains("json") || t == "importmap" => Embedded::Json,
        Some(t)
            if t == "module"
                || t.contains("javascript")
                || t.contains("ecmascript")
                || t.contains("jsx")
                || t.contains("babel") =>
        {
            Embedded::Script
        }
        Some(_) => Embedded::Opaque,
    }
}
