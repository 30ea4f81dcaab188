//! JSON language lexer
//!
//! Object keys are told apart from string values by looking past the
//! closing quote for a `:`. Comments are accepted for JSONC.

use crate::syntax::span::{render, Span, SpanSink};
use crate::syntax::tokens::SpanClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Default,
    String,
    LineComment,
    BlockComment,
}

struct JsonLexer {
    chars: Vec<char>,
    pos: usize,
    state: State,
    buf: String,
    sink: SpanSink,
}

/// Split JSON source into highlighted spans
pub fn lex(source: &str) -> Vec<Span> {
    if source.is_empty() {
        return Vec::new();
    }
    JsonLexer::new(source).run()
}

/// Highlight JSON source as an HTML fragment
pub fn highlight(source: &str) -> String {
    if source.is_empty() {
        return String::new();
    }
    render(&lex(source))
}

impl JsonLexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            state: State::Default,
            buf: String::new(),
            sink: SpanSink::new(),
        }
    }

    fn run(mut self) -> Vec<Span> {
        while self.pos < self.chars.len() {
            self.step();
        }
        let class = match self.state {
            State::Default => SpanClass::Plain,
            State::String => SpanClass::String,
            State::LineComment | State::BlockComment => SpanClass::Comment,
        };
        self.sink.flush(class, &mut self.buf);
        self.sink.into_spans()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn step(&mut self) {
        let c = self.chars[self.pos];
        match self.state {
            State::Default => self.scan_default(c),
            State::String => {
                self.buf.push(c);
                self.pos += 1;
                if c == '\\' {
                    if let Some(escaped) = self.peek(0) {
                        self.buf.push(escaped);
                        self.pos += 1;
                    }
                } else if c == '"' {
                    let class = if self.followed_by_colon() {
                        SpanClass::Property
                    } else {
                        SpanClass::String
                    };
                    self.sink.flush(class, &mut self.buf);
                    self.state = State::Default;
                }
            }
            State::LineComment => {
                if c == '\n' {
                    self.sink.flush(SpanClass::Comment, &mut self.buf);
                    self.state = State::Default;
                } else {
                    self.buf.push(c);
                    self.pos += 1;
                }
            }
            State::BlockComment => {
                self.buf.push(c);
                self.pos += 1;
                if c == '/' && self.buf.len() > 3 && self.buf.ends_with("*/") {
                    self.sink.flush(SpanClass::Comment, &mut self.buf);
                    self.state = State::Default;
                }
            }
        }
    }

    fn scan_default(&mut self, c: char) {
        match c {
            '"' => {
                self.buf.push(c);
                self.state = State::String;
                self.pos += 1;
            }
            '/' if matches!(self.peek(1), Some('/') | Some('*')) => {
                self.state = if self.peek(1) == Some('/') {
                    State::LineComment
                } else {
                    State::BlockComment
                };
                self.buf.push_str(if self.state == State::LineComment { "//" } else { "/*" });
                self.pos += 2;
            }
            '{' | '}' | '[' | ']' | ',' | ':' => {
                self.sink.push(SpanClass::Punctuation, c.encode_utf8(&mut [0; 4]));
                self.pos += 1;
            }
            '-' | '0'..='9' => {
                let number = self.take_while(|ch| {
                    ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | 'e' | 'E')
                });
                self.sink.push(SpanClass::Number, &number);
            }
            c if c.is_alphabetic() => {
                let word = self.take_while(char::is_alphanumeric);
                let class = match word.as_str() {
                    "true" | "false" | "null" => SpanClass::Keyword,
                    _ => SpanClass::Plain,
                };
                self.sink.push(class, &word);
            }
            _ => {
                self.sink.push(SpanClass::Plain, c.encode_utf8(&mut [0; 4]));
                self.pos += 1;
            }
        }
    }

    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut taken = String::new();
        while let Some(c) = self.peek(0).filter(|c| accept(*c)) {
            taken.push(c);
            self.pos += 1;
        }
        taken
    }

    /// Is the next non-whitespace character a `:`?
    fn followed_by_colon(&self) -> bool {
        self.chars[self.pos..]
            .iter()
            .find(|c| !c.is_whitespace())
            .is_some_and(|c| *c == ':')
    }
}
