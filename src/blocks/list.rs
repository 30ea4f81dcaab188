use once_cell::sync::Lazy;
use regex::Regex;

use super::util::{get_indent, is_blank};
use super::{BlockToken, ListItem, Tokenized};

/// Bullet (`-`, `*`, `+`) or ordered (`1.`, `1)`) marker, then a space or end of line
static LIST_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([ \t]*)(?:[-*+]|([0-9]{1,9})[.)])(?:[ \t]+(.*))?$").expect("valid list marker regex")
});

struct Marker {
    indent: usize,
    number: Option<u64>,
    content: String,
}

fn marker(line: &str) -> Option<Marker> {
    let caps = LIST_MARKER.captures(line)?;
    Some(Marker {
        indent: get_indent(&caps[1]),
        number: caps.get(2).and_then(|m| m.as_str().parse().ok()),
        content: caps.get(3).map_or("", |m| m.as_str()).trim().to_string(),
    })
}

pub(crate) fn is_list_item(line: &str) -> bool {
    LIST_MARKER.is_match(line)
}

/// Parse a bullet or ordered list starting at `start`
///
/// Depth comes from an indent stack: a deeper indent opens a level, a
/// shallower one closes levels until it fits. Indented lines without a
/// marker continue the previous item. A marker of the other list kind at
/// the base indent ends the list.
pub fn parse_list<S: AsRef<str>>(lines: &[S], start: usize) -> Option<Tokenized> {
    let first = marker(lines.get(start)?.as_ref())?;
    let ordered = first.number.is_some();
    let base = first.indent;
    let accepts = |m: &Marker| m.indent > base || m.number.is_some() == ordered;

    let mut stack = vec![base];
    let mut items = vec![ListItem {
        depth: 0,
        content: first.content,
    }];
    let mut index = start + 1;

    while let Some(line) = lines.get(index).map(AsRef::as_ref) {
        if let Some(m) = marker(line) {
            if !accepts(&m) {
                break;
            }
            while stack.len() > 1 && m.indent < stack[stack.len() - 1] {
                stack.pop();
            }
            if m.indent > stack[stack.len() - 1] {
                stack.push(m.indent);
            }
            items.push(ListItem {
                depth: stack.len() - 1,
                content: m.content,
            });
            index += 1;
        } else if is_blank(line) {
            let next_is_item = lines
                .get(index + 1)
                .and_then(|next| marker(next.as_ref()))
                .map_or(false, |m| accepts(&m));
            if !next_is_item {
                break;
            }
            index += 1;
        } else if get_indent(line) > base {
            // lazy continuation of the previous item
            if let Some(last) = items.last_mut() {
                if !last.content.is_empty() {
                    last.content.push(' ');
                }
                last.content.push_str(line.trim());
            }
            index += 1;
        } else {
            break;
        }
    }

    Some(Tokenized {
        token: BlockToken::List {
            ordered,
            start: first.number,
            items,
        },
        end_index: index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(tokenized: &Tokenized) -> Vec<(usize, &str)> {
        match &tokenized.token {
            BlockToken::List { items, .. } => items
                .iter()
                .map(|item| (item.depth, item.content.as_str()))
                .collect(),
            other => panic!("expected a list, got {:?}", other),
        }
    }

    #[test]
    fn test_bullet_list() {
        let tokenized = parse_list(&["- a", "* b", "+ c", "after"], 0).unwrap();
        assert_eq!(tokenized.end_index, 3);
        assert_eq!(items(&tokenized), vec![(0, "a"), (0, "b"), (0, "c")]);
    }

    #[test]
    fn test_ordered_list_start() {
        let tokenized = parse_list(&["3. c", "4) d"], 0).unwrap();
        match &tokenized.token {
            BlockToken::List { ordered, start, .. } => {
                assert!(*ordered);
                assert_eq!(*start, Some(3));
            }
            other => panic!("expected a list, got {:?}", other),
        }
        assert_eq!(tokenized.end_index, 2);
    }

    #[test]
    fn test_nesting_with_tabs_and_spaces() {
        let lines = ["- a", "  - b", "\t- c", "    - d", "- e"];
        let tokenized = parse_list(&lines, 0).unwrap();
        assert_eq!(
            items(&tokenized),
            vec![(0, "a"), (1, "b"), (1, "c"), (2, "d"), (0, "e")]
        );
    }

    #[test]
    fn test_dedent_to_intermediate_level() {
        let lines = ["- a", "    - b", "  - c"];
        let tokenized = parse_list(&lines, 0).unwrap();
        assert_eq!(items(&tokenized), vec![(0, "a"), (1, "b"), (1, "c")]);
    }

    #[test]
    fn test_lazy_continuation() {
        let lines = ["- first", "  continued", "- second", "not indented"];
        let tokenized = parse_list(&lines, 0).unwrap();
        assert_eq!(tokenized.end_index, 3);
        assert_eq!(items(&tokenized), vec![(0, "first continued"), (0, "second")]);
    }

    #[test]
    fn test_blank_line_lookahead() {
        let tokenized = parse_list(&["- a", "", "- b", "", "text"], 0).unwrap();
        assert_eq!(tokenized.end_index, 3);
        assert_eq!(items(&tokenized), vec![(0, "a"), (0, "b")]);
    }

    #[test]
    fn test_other_kind_ends_list() {
        let tokenized = parse_list(&["- a", "1. b"], 0).unwrap();
        assert_eq!(tokenized.end_index, 1);
        let tokenized = parse_list(&["- a", "", "1. b"], 0).unwrap();
        assert_eq!(tokenized.end_index, 1);
        let tokenized = parse_list(&["- a", "  1. b"], 0).unwrap();
        assert_eq!(items(&tokenized), vec![(0, "a"), (1, "b")]);
    }

    #[test]
    fn test_not_a_list() {
        assert!(parse_list(&["-a"], 0).is_none());
        assert!(parse_list(&["1.5 million"], 0).is_none());
        assert!(parse_list(&["plain"], 0).is_none());
        assert!(is_list_item("-"));
    }

    #[test]
    fn test_ordered_marker_is_ascii_digits() {
        assert!(parse_list(&["\u{661}. x"], 0).is_none());
        assert!(!is_list_item("\u{661}. x"));
        assert!(!is_list_item("\u{ff11}) x"));
        assert!(is_list_item("1. x"));
    }
}
