//! JavaScript language lexer

use crate::syntax::span::{render, Span, SpanSink};
use crate::syntax::tokens::SpanClass;

const KEYWORDS: [&str; 44] = [
    "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "export", "extends", "false", "finally", "for", "from",
    "function", "if", "import", "in", "instanceof", "let", "new", "null", "of",
    "return", "static", "super", "switch", "this", "throw", "true", "try", "typeof",
    "undefined", "var", "void", "while", "with", "yield", "as",
];

/// Keywords that introduce a binding name
const DECLARATIONS: [&str; 3] = ["let", "const", "var"];

/// Multi-character operators, longest first
const OPERATORS: [&str; 34] = [
    ">>>=", "===", "!==", "**=", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "...", "=>", "==",
    "!=", "<=", ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "**", "<<", ">>", "=",
];

const OPERATOR_CHARS: &str = "+-*/%=<>!&|^~?:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Default,
    /// `'...'` or `"..."`, holding the quote
    String(char),
    /// `` `...` ``
    Template,
    LineComment,
    BlockComment,
}

struct JsLexer {
    chars: Vec<char>,
    pos: usize,
    state: State,
    buf: String,
    /// The next identifier is a binding introduced by `let`/`const`/`var`
    declaring: bool,
    sink: SpanSink,
}

/// Split JavaScript source into highlighted spans
pub fn lex(source: &str) -> Vec<Span> {
    if source.is_empty() {
        return Vec::new();
    }
    JsLexer::new(source).run()
}

/// Highlight JavaScript source as an HTML fragment
pub fn highlight(source: &str) -> String {
    if source.is_empty() {
        return String::new();
    }
    render(&lex(source))
}

impl JsLexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            state: State::Default,
            buf: String::new(),
            declaring: false,
            sink: SpanSink::new(),
        }
    }

    fn run(mut self) -> Vec<Span> {
        while self.pos < self.chars.len() {
            self.step();
        }
        let class = match self.state {
            State::Default => SpanClass::Plain,
            State::String(_) | State::Template => SpanClass::String,
            State::LineComment | State::BlockComment => SpanClass::Comment,
        };
        self.sink.flush(class, &mut self.buf);
        self.sink.into_spans()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn starts_with(&self, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(i, c)| self.peek(i) == Some(c))
    }

    /// Transition function
    fn step(&mut self) {
        let c = self.chars[self.pos];
        match self.state {
            State::Default => self.scan_default(c),
            State::String(quote) => {
                if c == '\n' {
                    // unterminated at end of line
                    self.finish_token(SpanClass::String);
                    return;
                }
                self.buf.push(c);
                self.pos += 1;
                if c == '\\' {
                    self.take_escaped();
                } else if c == quote {
                    self.finish_token(SpanClass::String);
                }
            }
            State::Template => {
                self.buf.push(c);
                self.pos += 1;
                if c == '\\' {
                    self.take_escaped();
                } else if c == '`' {
                    self.finish_token(SpanClass::String);
                }
            }
            State::LineComment => {
                if c == '\n' {
                    self.finish_token(SpanClass::Comment);
                } else {
                    self.buf.push(c);
                    self.pos += 1;
                }
            }
            State::BlockComment => {
                self.buf.push(c);
                self.pos += 1;
                if c == '/' && self.buf.len() > 3 && self.buf.ends_with("*/") {
                    self.finish_token(SpanClass::Comment);
                }
            }
        }
    }

    fn scan_default(&mut self, c: char) {
        match c {
            c if c.is_whitespace() => {
                self.sink.push(SpanClass::Plain, c.encode_utf8(&mut [0; 4]));
                self.pos += 1;
            }
            '/' if self.peek(1) == Some('/') => self.enter(State::LineComment, "//"),
            '/' if self.peek(1) == Some('*') => self.enter(State::BlockComment, "/*"),
            '"' | '\'' => self.enter(State::String(c), c.encode_utf8(&mut [0; 4])),
            '`' => self.enter(State::Template, "`"),
            c if c.is_alphabetic() || c == '_' || c == '$' => self.scan_identifier(),
            c if c.is_ascii_digit() => self.scan_number(),
            '.' if self.peek(1).is_some_and(|n| n.is_ascii_digit()) => self.scan_number(),
            '.' if self.starts_with("...") => self.emit(SpanClass::Operator, "..."),
            '(' | ')' | '{' | '}' | '[' | ']' | ';' | ',' | '.' => {
                self.emit(SpanClass::Punctuation, c.encode_utf8(&mut [0; 4]))
            }
            c if OPERATOR_CHARS.contains(c) => {
                let op = OPERATORS
                    .iter()
                    .find(|op| self.starts_with(op))
                    .map(|op| op.to_string())
                    .unwrap_or_else(|| c.to_string());
                self.emit(SpanClass::Operator, &op);
            }
            _ => self.emit(SpanClass::Plain, c.encode_utf8(&mut [0; 4])),
        }
    }

    fn scan_identifier(&mut self) {
        let mut word = String::new();
        while let Some(c) = self
            .peek(0)
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
        {
            word.push(c);
            self.pos += 1;
        }
        let class = if KEYWORDS.contains(&word.as_str()) {
            SpanClass::Keyword
        } else if self.declaring {
            SpanClass::Variable
        } else {
            SpanClass::Plain
        };
        self.sink.push(class, &word);
        self.declaring = DECLARATIONS.contains(&word.as_str());
    }

    fn scan_number(&mut self) {
        let mut number = String::new();
        let hex = self.starts_with("0x") || self.starts_with("0X");
        while let Some(c) = self.peek(0) {
            let exponent_sign = !hex
                && (c == '+' || c == '-')
                && number.ends_with(['e', 'E']);
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign {
                number.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        self.sink.push(SpanClass::Number, &number);
        self.declaring = false;
    }

    /// Emit a complete token from the default state
    fn emit(&mut self, class: SpanClass, text: &str) {
        self.sink.push(class, text);
        self.pos += text.chars().count();
        self.declaring = false;
    }

    fn enter(&mut self, state: State, opener: &str) {
        self.buf.push_str(opener);
        self.pos += opener.chars().count();
        self.state = state;
        self.declaring = false;
    }

    fn take_escaped(&mut self) {
        if let Some(escaped) = self.peek(0) {
            self.buf.push(escaped);
            self.pos += 1;
        }
    }

    fn finish_token(&mut self, class: SpanClass) {
        self.sink.flush(class, &mut self.buf);
        self.state = State::Default;
    }
}
