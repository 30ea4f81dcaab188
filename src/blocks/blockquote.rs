use super::{BlockToken, Tokenized};

/// Strip the `>` marker and one optional space
fn quoted(line: &str) -> Option<&str> {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return None;
    }
    let rest = trimmed.strip_prefix('>')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

pub(crate) fn is_blockquote(line: &str) -> bool {
    quoted(line).is_some()
}

/// Parse consecutive `>` lines
pub fn parse_blockquote<S: AsRef<str>>(lines: &[S], start: usize) -> Option<Tokenized> {
    let mut quote = Vec::new();
    let mut index = start;
    while let Some(text) = lines.get(index).and_then(|line| quoted(line.as_ref())) {
        quote.push(text.to_string());
        index += 1;
    }
    if quote.is_empty() {
        return None;
    }
    Some(Tokenized {
        token: BlockToken::Blockquote { lines: quote },
        end_index: index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blockquote_lines() {
        let tokenized = parse_blockquote(&["> one", ">two", ">  three", "", "> four"], 0).unwrap();
        assert_eq!(tokenized.end_index, 3);
        assert_eq!(
            tokenized.token,
            BlockToken::Blockquote {
                lines: vec!["one".into(), "two".into(), " three".into()]
            }
        );
    }

    #[test]
    fn test_empty_quote_line() {
        let tokenized = parse_blockquote(&[">", "> x"], 0).unwrap();
        assert_eq!(
            tokenized.token,
            BlockToken::Blockquote {
                lines: vec![String::new(), "x".into()]
            }
        );
    }

    #[test]
    fn test_not_a_blockquote() {
        assert!(parse_blockquote(&["a > b"], 0).is_none());
        assert!(parse_blockquote(&["    > code"], 0).is_none());
        assert!(parse_blockquote::<&str>(&[], 0).is_none());
    }
}
