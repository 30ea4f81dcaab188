use super::{BlockToken, Tokenized};

/// An opening fence line
struct Fence {
    indent: usize,
    marker: char,
    len: usize,
    info: Option<String>,
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn fence_open(line: &str) -> Option<Fence> {
    let indent = leading_spaces(line);
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];
    let marker = rest.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = rest.chars().take_while(|c| *c == marker).count();
    if len < 3 {
        return None;
    }
    let info = rest[len..].trim();
    if marker == '`' && info.contains('`') {
        return None;
    }
    Some(Fence {
        indent,
        marker,
        len,
        info: info.split_whitespace().next().map(str::to_string),
    })
}

pub(crate) fn is_fence_open(line: &str) -> bool {
    fence_open(line).is_some()
}

impl Fence {
    fn is_closed_by(&self, line: &str) -> bool {
        let indent = leading_spaces(line);
        if indent > 3 {
            return false;
        }
        let rest = line[indent..].trim_end();
        rest.len() >= self.len && rest.chars().all(|c| c == self.marker)
    }

    /// Remove up to the opening fence's indentation
    fn dedent<'a>(&self, line: &'a str) -> &'a str {
        let strip = leading_spaces(line).min(self.indent);
        &line[strip..]
    }
}

/// Parse a fenced code block starting at `start`
///
/// An unterminated fence runs to the end of input.
pub fn parse_code_fence<S: AsRef<str>>(lines: &[S], start: usize) -> Option<Tokenized> {
    let fence = fence_open(lines.get(start)?.as_ref())?;

    let mut body = Vec::new();
    let mut index = start + 1;
    let mut closed = false;
    while let Some(line) = lines.get(index).map(AsRef::as_ref) {
        index += 1;
        if fence.is_closed_by(line) {
            closed = true;
            break;
        }
        body.push(fence.dedent(line));
    }
    if !closed {
        tracing::trace!(start, "unterminated code fence");
    }

    Some(Tokenized {
        token: BlockToken::CodeFence {
            info: fence.info,
            code: body.join("\n"),
        },
        end_index: index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fence(lines: &[&str]) -> (Option<String>, String, usize) {
        let tokenized = parse_code_fence(lines, 0).unwrap();
        match tokenized.token {
            BlockToken::CodeFence { info, code } => (info, code, tokenized.end_index),
            other => panic!("expected a code fence, got {:?}", other),
        }
    }

    #[test]
    fn test_backtick_fence() {
        let (info, code, end) = fence(&["```rust", "fn main() {}", "", "let x = 1;", "```", "after"]);
        assert_eq!(info.as_deref(), Some("rust"));
        assert_eq!(code, "fn main() {}\n\nlet x = 1;");
        assert_eq!(end, 5);
    }

    #[test]
    fn test_tilde_fence_with_info_words() {
        let (info, code, end) = fence(&["~~~~ python title=\"x\"", "print(1)", "~~~", "~~~~"]);
        assert_eq!(info.as_deref(), Some("python"));
        assert_eq!(code, "print(1)\n~~~");
        assert_eq!(end, 4);
    }

    #[test]
    fn test_closing_run_must_match_marker() {
        let (_, code, end) = fence(&["```", "~~~", "````"]);
        assert_eq!(code, "~~~");
        assert_eq!(end, 3);
    }

    #[test]
    fn test_unterminated_runs_to_end() {
        let (info, code, end) = fence(&["```", "a", "b"]);
        assert_eq!(info, None);
        assert_eq!(code, "a\nb");
        assert_eq!(end, 3);
    }

    #[test]
    fn test_indentation_removed() {
        let (_, code, _) = fence(&["  ```", "    x", " y", "z", "  ```"]);
        assert_eq!(code, "  x\ny\nz");
    }

    #[test]
    fn test_not_a_fence() {
        assert!(parse_code_fence(&["``not"], 0).is_none());
        assert!(parse_code_fence(&["``` a`b"], 0).is_none());
        assert!(parse_code_fence(&["    ```"], 0).is_none());
        assert!(is_fence_open("~~~ a`b"));
    }
}
