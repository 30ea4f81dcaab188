//! Bash language lexer

use crate::syntax::span::{render, Span, SpanSink};
use crate::syntax::tokens::SpanClass;

/// Reserved words, matched only as complete tokens
const KEYWORDS: [&str; 21] = [
    "if", "then", "else", "elif", "fi", "for", "while", "until", "do", "done", "case", "esac",
    "in", "function", "return", "local", "export", "source", "eval", "exec", "select",
];

/// Keywords that are followed by another command
const COMMAND_PREFIXES: [&str; 7] = ["if", "then", "else", "elif", "do", "while", "until"];

/// Single-character special parameters (`$?`, `$@`, ...)
const SPECIAL_PARAMS: &str = "@?#$!*-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Default,
    DoubleString,
    SingleString,
    Comment,
    Variable,
}

struct BashLexer {
    chars: Vec<char>,
    pos: usize,
    state: State,
    /// Token under construction
    buf: String,
    /// Open `${` braces while in `State::Variable`, 0 for `$NAME`
    brace_depth: usize,
    /// Next word is a program name
    command_position: bool,
    /// Inside a `NAME=value` prefix; the command is still to come
    assignment: bool,
    /// The last string or expansion ends at the current position
    glued: bool,
    sink: SpanSink,
}

/// Split shell source into highlighted spans
pub fn lex(source: &str) -> Vec<Span> {
    if source.is_empty() {
        return Vec::new();
    }
    BashLexer::new(source).run()
}

/// Highlight shell source as an HTML fragment
pub fn highlight(source: &str) -> String {
    if source.is_empty() {
        return String::new();
    }
    render(&lex(source))
}

impl BashLexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            state: State::Default,
            buf: String::new(),
            brace_depth: 0,
            command_position: true,
            assignment: false,
            glued: false,
            sink: SpanSink::new(),
        }
    }

    fn run(mut self) -> Vec<Span> {
        while self.pos < self.chars.len() {
            self.step();
        }
        self.finish()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// Transition function: consume input according to the current state
    fn step(&mut self) {
        let c = self.chars[self.pos];
        match self.state {
            State::Default => self.scan_default(c),
            State::DoubleString => {
                self.buf.push(c);
                self.pos += 1;
                match c {
                    '\\' => {
                        if let Some(escaped) = self.peek(0) {
                            self.buf.push(escaped);
                            self.pos += 1;
                        }
                    }
                    '"' => self.end_string(),
                    _ => {}
                }
            }
            State::SingleString => {
                self.buf.push(c);
                self.pos += 1;
                if c == '\'' {
                    self.end_string();
                }
            }
            State::Comment => {
                if c == '\n' {
                    // newline is left for the default state
                    self.sink.flush(SpanClass::Comment, &mut self.buf);
                    self.state = State::Default;
                } else {
                    self.buf.push(c);
                    self.pos += 1;
                }
            }
            State::Variable => self.scan_variable(c),
        }
    }

    fn scan_default(&mut self, c: char) {
        let glued = std::mem::take(&mut self.glued);
        match c {
            '\n' => {
                self.flush_word();
                self.sink.push(SpanClass::Plain, "\n");
                self.command_position = true;
                self.assignment = false;
                self.pos += 1;
            }
            c if c.is_whitespace() => {
                self.flush_word();
                self.sink.push(SpanClass::Plain, c.encode_utf8(&mut [0; 4]));
                self.assignment = false;
                self.pos += 1;
            }
            // a comment starts a word; `${x}#y` and `"a"#b` are one word
            '#' if self.buf.is_empty() && !glued => {
                self.buf.push(c);
                self.state = State::Comment;
                self.pos += 1;
            }
            '"' | '\'' => {
                self.flush_word();
                self.buf.push(c);
                self.state = if c == '"' {
                    State::DoubleString
                } else {
                    State::SingleString
                };
                self.pos += 1;
            }
            '$' => {
                self.flush_word();
                self.scan_dollar();
            }
            '\\' => {
                self.buf.push(c);
                self.pos += 1;
                if let Some(escaped) = self.peek(0) {
                    self.buf.push(escaped);
                    self.pos += 1;
                }
            }
            '(' | ')' | '{' | '}' | '[' | ']' => {
                self.flush_word();
                self.sink.push(SpanClass::Punctuation, c.encode_utf8(&mut [0; 4]));
                self.command_position = matches!(c, '(' | '{');
                self.assignment = false;
                self.pos += 1;
            }
            '|' | '&' | ';' | '<' | '>' => {
                self.flush_word();
                self.scan_operator(c);
            }
            c if c.is_ascii_digit() && self.buf.is_empty() && self.peek(1) == Some('>') => {
                // file-descriptor redirection: `2>`
                let op: String = [c, '>'].iter().collect();
                self.sink.push(SpanClass::Operator, &op);
                self.command_position = false;
                self.pos += 2;
            }
            _ => {
                self.buf.push(c);
                self.pos += 1;
            }
        }
    }

    fn scan_operator(&mut self, c: char) {
        let op = match (c, self.peek(1)) {
            ('|', Some('|')) => "||",
            ('&', Some('&')) => "&&",
            (';', Some(';')) => ";;",
            ('>', Some('>')) => ">>",
            ('<', Some('<')) => "<<",
            ('&', Some('>')) => "&>",
            ('|', _) => "|",
            ('&', _) => "&",
            (';', _) => ";",
            ('<', _) => "<",
            _ => ">",
        };
        self.sink.push(SpanClass::Operator, op);
        self.pos += op.len();
        self.command_position = matches!(op, "|" | "||" | "&&" | ";" | ";;");
        self.assignment = false;
    }

    /// Classify a `$` form starting at the current position
    fn scan_dollar(&mut self) {
        match self.peek(1) {
            Some('{') => {
                self.buf.push_str("${");
                self.brace_depth = 1;
                self.state = State::Variable;
                self.pos += 2;
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                self.buf.push('$');
                self.brace_depth = 0;
                self.state = State::Variable;
                self.pos += 1;
            }
            Some(c) if c.is_ascii_digit() || SPECIAL_PARAMS.contains(c) => {
                let var: String = ['$', c].iter().collect();
                self.sink.push(SpanClass::Variable, &var);
                self.end_operand();
                self.pos += 2;
            }
            _ => {
                self.sink.push(SpanClass::Variable, "$");
                self.end_operand();
                self.pos += 1;
            }
        }
    }

    fn scan_variable(&mut self, c: char) {
        if self.brace_depth > 0 {
            self.buf.push(c);
            self.pos += 1;
            match c {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.brace_depth == 0 {
                        self.sink.flush(SpanClass::Variable, &mut self.buf);
                        self.state = State::Default;
                        self.end_operand();
                    }
                }
                _ => {}
            }
        } else if c.is_ascii_alphanumeric() || c == '_' {
            self.buf.push(c);
            self.pos += 1;
        } else {
            // name ended; rescan this character in the default state
            self.sink.flush(SpanClass::Variable, &mut self.buf);
            self.state = State::Default;
            self.end_operand();
        }
    }

    fn end_string(&mut self) {
        self.sink.flush(SpanClass::String, &mut self.buf);
        self.state = State::Default;
        self.end_operand();
    }

    /// A string or expansion was emitted where a word could stand
    fn end_operand(&mut self) {
        self.glued = true;
        if !self.assignment {
            self.command_position = false;
        }
    }

    fn flush_word(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let word = std::mem::take(&mut self.buf);
        let class = self.classify_word(&word);
        self.sink.push(class, &word);

        if self.assignment {
            return;
        }
        if self.command_position && is_assignment(&word) {
            self.assignment = true;
        } else {
            self.command_position = COMMAND_PREFIXES.contains(&word.as_str());
        }
    }

    fn classify_word(&self, word: &str) -> SpanClass {
        if KEYWORDS.contains(&word) {
            SpanClass::Keyword
        } else if self.assignment || (self.command_position && is_assignment(word)) {
            SpanClass::Plain
        } else if is_number(word) {
            SpanClass::Number
        } else if self.command_position {
            SpanClass::Keyword
        } else {
            SpanClass::Plain
        }
    }

    fn finish(mut self) -> Vec<Span> {
        match self.state {
            State::Default => self.flush_word(),
            State::DoubleString | State::SingleString => {
                self.sink.flush(SpanClass::String, &mut self.buf)
            }
            State::Comment => self.sink.flush(SpanClass::Comment, &mut self.buf),
            State::Variable => self.sink.flush(SpanClass::Variable, &mut self.buf),
        }
        self.sink.into_spans()
    }
}

/// `NAME=...` prefix assignment
fn is_assignment(word: &str) -> bool {
    match word.split_once('=') {
        Some((name, _)) => {
            let mut chars = name.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    }
}

fn is_number(word: &str) -> bool {
    let mut seen_dot = false;
    word.starts_with(|c: char| c.is_ascii_digit())
        && word.chars().all(|c| {
            if c == '.' && !seen_dot {
                seen_dot = true;
                true
            } else {
                c.is_ascii_digit()
            }
        })
}
