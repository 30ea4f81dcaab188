//! CSS language lexer
//!
//! Context decides what a token means: the same `:` is part of the
//! selector in `a:hover` and a separator in `color: red`. The lexer keeps
//! one of three states and a stack of open blocks so that the context
//! after a closing brace is restored correctly inside nested at-rules.

use crate::syntax::span::{render, Span, SpanSink};
use crate::syntax::tokens::SpanClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before `{`: selectors and at-rule statements
    Selector,
    /// After `{` or `;`, before `:`
    Property,
    /// After `:`, before `;`; also at-rule preludes
    Value,
}

/// What an open `{ ... }` block contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    /// Nested rules (`@media`, `@supports`, `@keyframes`)
    Rules,
    /// Declarations (style rules, `@font-face`, `@page`)
    Declarations,
}

/// At-rules whose block holds rules rather than declarations
const RULE_BLOCK_AT_RULES: [&str; 7] = [
    "media",
    "supports",
    "document",
    "layer",
    "container",
    "scope",
    "starting-style",
];

struct CssLexer {
    chars: Vec<char>,
    pos: usize,
    state: State,
    buf: String,
    /// Open blocks, innermost last; its length is the brace depth
    blocks: Vec<Block>,
    /// Name of the at-rule whose prelude is being scanned
    at_rule: Option<String>,
    /// `[` / `(` nesting inside a selector
    selector_depth: usize,
    /// Index of the next `{`, `;` or `}` and whether it is a `{`
    statement_end: Option<(usize, bool)>,
    sink: SpanSink,
}

/// Split CSS source into highlighted spans
pub fn lex(source: &str) -> Vec<Span> {
    if source.is_empty() {
        return Vec::new();
    }
    CssLexer::new(source).run()
}

/// Highlight CSS source as an HTML fragment
pub fn highlight(source: &str) -> String {
    if source.is_empty() {
        return String::new();
    }
    render(&lex(source))
}

impl CssLexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            state: State::Selector,
            buf: String::new(),
            blocks: Vec::new(),
            at_rule: None,
            selector_depth: 0,
            statement_end: None,
            sink: SpanSink::new(),
        }
    }

    fn run(mut self) -> Vec<Span> {
        while self.pos < self.chars.len() {
            self.step();
        }
        self.flush_buf();
        self.sink.into_spans()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// Transition function
    fn step(&mut self) {
        let c = self.chars[self.pos];
        if c == '/' && self.peek(1) == Some('*') {
            self.flush_buf();
            self.scan_comment();
            return;
        }
        match self.state {
            State::Selector => self.scan_selector(c),
            State::Property => self.scan_property(c),
            State::Value => self.scan_value(c),
        }
    }

    fn scan_selector(&mut self, c: char) {
        if self.selector_depth > 0 {
            match c {
                '"' | '\'' => {
                    let quoted = self.consume_quoted();
                    self.buf.push_str(&quoted);
                    return;
                }
                '[' | '(' => self.selector_depth += 1,
                ']' | ')' => self.selector_depth -= 1,
                _ => {}
            }
            self.buf.push(c);
            self.pos += 1;
            return;
        }

        match c {
            '[' | '(' => {
                self.selector_depth = 1;
                self.buf.push(c);
                self.pos += 1;
            }
            c if c.is_whitespace() => self.whitespace(c),
            ',' | ';' => self.punctuation(c),
            '{' => {
                self.punctuation(c);
                self.blocks.push(Block::Declarations);
                self.state = State::Property;
            }
            '}' => self.close_block(),
            '>' | '+' | '~' => {
                self.flush_buf();
                self.sink.push(SpanClass::Operator, c.encode_utf8(&mut [0; 4]));
                self.pos += 1;
            }
            '@' if self.buf.is_empty() => self.scan_at_rule(),
            _ => {
                self.buf.push(c);
                self.pos += 1;
            }
        }
    }

    fn scan_property(&mut self, c: char) {
        match c {
            c if c.is_whitespace() => self.whitespace(c),
            ':' => {
                self.punctuation(c);
                self.state = State::Value;
            }
            ';' => self.punctuation(c),
            '}' => self.close_block(),
            '@' if self.buf.is_empty() => self.scan_at_rule(),
            _ if self.buf.is_empty() && self.starts_nested_rule() => {
                // `&:hover { ... }` inside a rule: a selector, not a declaration
                self.state = State::Selector;
            }
            '{' => {
                self.sink.flush(SpanClass::Selector, &mut self.buf);
                self.punctuation(c);
                self.blocks.push(Block::Declarations);
            }
            _ => {
                self.buf.push(c);
                self.pos += 1;
            }
        }
    }

    fn scan_value(&mut self, c: char) {
        match c {
            c if c.is_whitespace() => self.whitespace(c),
            ';' => {
                self.punctuation(c);
                self.at_rule = None;
                self.state = self.context_state();
            }
            '{' => {
                self.punctuation(c);
                let block = match self.at_rule.take() {
                    Some(name) if holds_rules(&name) => Block::Rules,
                    _ => Block::Declarations,
                };
                self.blocks.push(block);
                self.state = self.context_state();
            }
            '}' => self.close_block(),
            ',' | '(' | ')' => self.punctuation(c),
            ':' if self.at_rule.is_some() => self.punctuation(c),
            '"' | '\'' => {
                self.flush_buf();
                let quoted = self.consume_quoted();
                self.sink.push(SpanClass::String, &quoted);
            }
            '!' => {
                self.flush_buf();
                let mut word = String::from('!');
                self.pos += 1;
                while let Some(next) = self.peek(0).filter(|ch| ch.is_ascii_alphabetic()) {
                    word.push(next);
                    self.pos += 1;
                }
                self.sink.push(SpanClass::Keyword, &word);
            }
            _ => {
                self.buf.push(c);
                self.pos += 1;
            }
        }
    }

    /// `@name`, then the prelude is scanned in the value state
    fn scan_at_rule(&mut self) {
        let mut word = String::from('@');
        self.pos += 1;
        while let Some(next) = self
            .peek(0)
            .filter(|ch| ch.is_alphanumeric() || *ch == '-' || *ch == '_')
        {
            word.push(next);
            self.pos += 1;
        }
        self.at_rule = Some(word[1..].to_lowercase());
        self.sink.push(SpanClass::AtRule, &word);
        self.state = State::Value;
    }

    fn scan_comment(&mut self) {
        let mut comment = String::from("/*");
        self.pos += 2;
        while let Some(c) = self.peek(0) {
            comment.push(c);
            self.pos += 1;
            if c == '/' && comment.len() > 3 && comment.ends_with("*/") {
                break;
            }
        }
        self.sink.push(SpanClass::Comment, &comment);
    }

    /// Consume a quoted string starting at the current quote character
    fn consume_quoted(&mut self) -> String {
        let quote = self.chars[self.pos];
        let mut quoted = String::from(quote);
        self.pos += 1;
        while let Some(c) = self.peek(0) {
            quoted.push(c);
            self.pos += 1;
            if c == '\\' {
                if let Some(escaped) = self.peek(0) {
                    quoted.push(escaped);
                    self.pos += 1;
                }
            } else if c == quote {
                break;
            }
        }
        quoted
    }

    /// Does the token at the current position open a nested rule?
    ///
    /// Looks for the first `{`, `;` or `}` outside quotes. The answer is
    /// kept until the lexer moves past that delimiter, so each statement
    /// is scanned once.
    fn starts_nested_rule(&mut self) -> bool {
        if let Some((end, nested)) = self.statement_end {
            if self.pos <= end {
                return nested;
            }
        }
        let mut quote = None;
        let mut found = (self.chars.len(), false);
        for (i, &c) in self.chars.iter().enumerate().skip(self.pos) {
            match quote {
                Some(q) if c == q => quote = None,
                Some(_) => {}
                None => match c {
                    '"' | '\'' => quote = Some(c),
                    '{' | ';' | '}' => {
                        found = (i, c == '{');
                        break;
                    }
                    _ => {}
                },
            }
        }
        self.statement_end = Some(found);
        found.1
    }

    fn whitespace(&mut self, c: char) {
        self.flush_buf();
        self.sink.push(SpanClass::Plain, c.encode_utf8(&mut [0; 4]));
        self.pos += 1;
    }

    fn punctuation(&mut self, c: char) {
        self.flush_buf();
        self.sink.push(SpanClass::Punctuation, c.encode_utf8(&mut [0; 4]));
        self.pos += 1;
    }

    fn close_block(&mut self) {
        self.punctuation('}');
        self.blocks.pop();
        self.at_rule = None;
        self.selector_depth = 0;
        self.state = self.context_state();
    }

    /// State for the start of a statement in the innermost block
    fn context_state(&self) -> State {
        match self.blocks.last() {
            Some(Block::Declarations) => State::Property,
            Some(Block::Rules) | None => State::Selector,
        }
    }

    fn flush_buf(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let class = match self.state {
            State::Selector => SpanClass::Selector,
            State::Property => SpanClass::Property,
            State::Value if is_numeric(&self.buf) => SpanClass::Number,
            State::Value => SpanClass::Value,
        };
        self.sink.flush(class, &mut self.buf);
    }
}

fn holds_rules(at_rule: &str) -> bool {
    RULE_BLOCK_AT_RULES.contains(&at_rule) || at_rule.ends_with("keyframes")
}

/// `10px`, `-2em`, `.5`, `+3`, `50%`
fn is_numeric(token: &str) -> bool {
    let unsigned = token.strip_prefix(['-', '+']).unwrap_or(token);
    let digits = unsigned.strip_prefix('.').unwrap_or(unsigned);
    digits.starts_with(|c: char| c.is_ascii_digit())
}
