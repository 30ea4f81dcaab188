use once_cell::sync::Lazy;
use regex::Regex;

use super::util::is_blank;
use super::{BlockToken, TaskItem, Tokenized};

/// One list marker, one space, a checkbox and a space
static TASK_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*+] \[([ xX])\] (.*)$").expect("valid task item regex"));

pub(crate) fn task_item(line: &str) -> Option<TaskItem> {
    let caps = TASK_ITEM.captures(line)?;
    Some(TaskItem {
        checked: &caps[1] != " ",
        content: caps[2].trim().to_string(),
    })
}

/// Parse a task list starting at `start`
///
/// One blank line between items is allowed when the line after it is
/// another task item; otherwise the list ends before the blank line.
pub fn parse_task_list<S: AsRef<str>>(lines: &[S], start: usize) -> Option<Tokenized> {
    let first = task_item(lines.get(start)?.as_ref())?;
    let mut items = vec![first];
    let mut index = start + 1;

    while index < lines.len() {
        let line = lines[index].as_ref();
        if let Some(item) = task_item(line) {
            items.push(item);
            index += 1;
            continue;
        }
        if is_blank(line) {
            if let Some(item) = lines.get(index + 1).and_then(|next| task_item(next.as_ref())) {
                items.push(item);
                index += 2;
                continue;
            }
        }
        break;
    }

    Some(Tokenized {
        token: BlockToken::TaskList { items },
        end_index: index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(checked: bool, content: &str) -> TaskItem {
        TaskItem {
            checked,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_two_items() {
        let tokenized = parse_task_list(&["- [ ] a", "- [x] b"], 0).unwrap();
        assert_eq!(tokenized.end_index, 2);
        assert_eq!(
            tokenized.token,
            BlockToken::TaskList {
                items: vec![item(false, "a"), item(true, "b")]
            }
        );
    }

    #[test]
    fn test_blank_then_non_task_is_not_consumed() {
        let tokenized = parse_task_list(&["- [ ] a", "", "not a task"], 0).unwrap();
        assert_eq!(tokenized.end_index, 1);
    }

    #[test]
    fn test_single_blank_between_items() {
        let lines = ["* [X] a", "", "+ [ ] b", "", "", "- [ ] c"];
        let tokenized = parse_task_list(&lines, 0).unwrap();
        assert_eq!(tokenized.end_index, 3);
        assert_eq!(
            tokenized.token,
            BlockToken::TaskList {
                items: vec![item(true, "a"), item(false, "b")]
            }
        );
    }

    #[test]
    fn test_trailing_blank_not_consumed() {
        let tokenized = parse_task_list(&["- [ ] a", ""], 0).unwrap();
        assert_eq!(tokenized.end_index, 1);
    }

    #[test]
    fn test_not_a_task_item() {
        assert!(parse_task_list(&["- plain item"], 0).is_none());
        assert!(parse_task_list(&["- [y] a"], 0).is_none());
        assert!(parse_task_list(&["- [ ]"], 0).is_none());
        assert!(parse_task_list(&["-[ ] a"], 0).is_none());
        assert!(parse_task_list(&["- [ ] a"], 1).is_none());
    }

    #[test]
    fn test_starts_mid_array() {
        let lines = ["intro", "- [x] done"];
        let tokenized = parse_task_list(&lines, 1).unwrap();
        assert_eq!(tokenized.end_index, 2);
    }
}
