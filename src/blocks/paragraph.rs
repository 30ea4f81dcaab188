use super::util::is_blank;
use super::{interrupts_paragraph, BlockToken, Tokenized};

/// Parse a paragraph: the fallback construct
///
/// Consumes the first line unconditionally, then further lines until a
/// blank line or a line that opens another construct.
pub fn parse_paragraph<S: AsRef<str>>(lines: &[S], start: usize) -> Option<Tokenized> {
    let first = lines.get(start)?.as_ref();
    if is_blank(first) {
        return None;
    }
    let mut text = vec![first.trim()];
    let mut index = start + 1;
    while let Some(line) = lines.get(index).map(AsRef::as_ref) {
        if is_blank(line) || interrupts_paragraph(line) {
            break;
        }
        text.push(line.trim());
        index += 1;
    }
    Some(Tokenized {
        token: BlockToken::Paragraph {
            text: text.join("\n"),
        },
        end_index: index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(lines: &[&str]) -> (String, usize) {
        let tokenized = parse_paragraph(lines, 0).unwrap();
        match tokenized.token {
            BlockToken::Paragraph { text } => (text, tokenized.end_index),
            other => panic!("expected a paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_joins_lines() {
        assert_eq!(
            paragraph(&["  one", "two  ", "", "three"]),
            ("one\ntwo".to_string(), 2)
        );
    }

    #[test]
    fn test_interrupted_by_constructs() {
        assert_eq!(paragraph(&["a", "# h"]).1, 1);
        assert_eq!(paragraph(&["a", "```"]).1, 1);
        assert_eq!(paragraph(&["a", "> q"]).1, 1);
        assert_eq!(paragraph(&["a", "***"]).1, 1);
        assert_eq!(paragraph(&["a", "- item"]).1, 1);
        assert_eq!(paragraph(&["a", "#tag", "b"]).1, 3);
    }

    #[test]
    fn test_first_line_always_consumed() {
        assert_eq!(paragraph(&["- not parsed as list here"]).1, 1);
        assert!(parse_paragraph(&[""], 0).is_none());
    }
}
