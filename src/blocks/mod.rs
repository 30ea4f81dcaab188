//! Block tokenizer for Markdown documents
//!
//! Line-oriented rather than character-oriented: every parser looks at a
//! line array starting at some index and either recognises its construct,
//! returning the token and the index one past the last consumed line, or
//! returns `None` having consumed nothing. The dispatcher tries the
//! parsers in a fixed order and falls back to a paragraph.
//!
//! Parsers are also called one at a time by editors that recognise
//! constructs while the user types.

mod blockquote;
mod code_fence;
mod heading;
mod list;
mod paragraph;
mod rule;
mod table;
mod task_list;
mod util;

use tracing::trace;

pub use blockquote::parse_blockquote;
pub use code_fence::parse_code_fence;
pub use heading::parse_heading;
pub use list::parse_list;
pub use paragraph::parse_paragraph;
pub use rule::parse_horizontal_rule;
pub use table::parse_table;
pub use task_list::parse_task_list;
pub use util::{get_indent, parse_pipe_row};

/// One checkbox item of a task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub checked: bool,
    pub content: String,
}

/// One item of a bullet or ordered list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Nesting level, 0 for top-level items
    pub depth: usize,
    pub content: String,
}

/// Column alignment from a table delimiter row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    None,
    Left,
    Center,
    Right,
}

/// A recognised block construct
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockToken {
    TaskList {
        items: Vec<TaskItem>,
    },
    Table {
        header: Vec<String>,
        alignments: Vec<Alignment>,
        rows: Vec<Vec<String>>,
    },
    Heading {
        level: u8,
        text: String,
    },
    CodeFence {
        /// First word of the info string
        info: Option<String>,
        code: String,
    },
    List {
        ordered: bool,
        /// Number of the first item of an ordered list
        start: Option<u64>,
        items: Vec<ListItem>,
    },
    Blockquote {
        lines: Vec<String>,
    },
    HorizontalRule,
    Paragraph {
        text: String,
    },
}

impl BlockToken {
    /// Construct name (`task_list`, `table`, ...)
    pub fn kind(&self) -> &'static str {
        match self {
            BlockToken::TaskList { .. } => "task_list",
            BlockToken::Table { .. } => "table",
            BlockToken::Heading { .. } => "heading",
            BlockToken::CodeFence { .. } => "code_fence",
            BlockToken::List { .. } => "list",
            BlockToken::Blockquote { .. } => "blockquote",
            BlockToken::HorizontalRule => "horizontal_rule",
            BlockToken::Paragraph { .. } => "paragraph",
        }
    }
}

/// A token and the line index one past its last consumed line
///
/// `end_index` is always greater than the start index given to the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    pub token: BlockToken,
    pub end_index: usize,
}

/// Tokenize the block starting at `start`
///
/// Blank lines before the block are skipped and counted in `end_index`.
/// Returns `None` only when no non-blank line remains.
pub fn tokenize_block<S: AsRef<str>>(lines: &[S], start: usize) -> Option<Tokenized> {
    let first = (start..lines.len()).find(|&i| !util::is_blank(lines[i].as_ref()))?;

    let tokenized = parse_code_fence(lines, first)
        .or_else(|| parse_heading(lines, first))
        .or_else(|| parse_horizontal_rule(lines, first))
        .or_else(|| parse_task_list(lines, first))
        .or_else(|| parse_table(lines, first))
        .or_else(|| parse_list(lines, first))
        .or_else(|| parse_blockquote(lines, first))
        .or_else(|| parse_paragraph(lines, first))?;

    trace!(
        kind = tokenized.token.kind(),
        start = first,
        end = tokenized.end_index,
        "block token"
    );
    Some(tokenized)
}

/// Tokenize a whole line array
pub fn tokenize<S: AsRef<str>>(lines: &[S]) -> Vec<BlockToken> {
    let mut tokens = Vec::new();
    let mut index = 0;
    while let Some(Tokenized { token, end_index }) = tokenize_block(lines, index) {
        debug_assert!(end_index > index);
        tokens.push(token);
        index = end_index;
    }
    tokens
}

/// Tokenize a document given as text
pub fn tokenize_text(text: &str) -> Vec<BlockToken> {
    let lines: Vec<&str> = text.lines().collect();
    tokenize(&lines)
}

/// Does `line` open a construct that ends a paragraph?
pub(crate) fn interrupts_paragraph(line: &str) -> bool {
    heading::is_heading(line)
        || code_fence::is_fence_open(line)
        || blockquote::is_blockquote(line)
        || rule::is_horizontal_rule(line)
        || list::is_list_item(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_mixed_document() {
        let text = "# Title\n\nIntro line\ncontinues\n\n- [ ] todo\n- [x] done\n\n| A | B |\n|:--|--:|\n| 1 | 2 |\n\n```sh\necho hi\n```\n> quote\n\n---\n1. one\n2. two\n";
        let kinds: Vec<&str> = tokenize_text(text).iter().map(|t| t.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                "heading",
                "paragraph",
                "task_list",
                "table",
                "code_fence",
                "blockquote",
                "horizontal_rule",
                "list"
            ]
        );
    }

    #[test]
    fn test_tokenize_block_skips_leading_blanks() {
        let lines = ["", "  ", "text"];
        let tokenized = tokenize_block(&lines, 0).unwrap();
        assert_eq!(tokenized.end_index, 3);
        assert_eq!(
            tokenized.token,
            BlockToken::Paragraph {
                text: "text".to_string()
            }
        );
    }

    #[test]
    fn test_tokenize_block_none_at_end() {
        let lines = ["a", "", ""];
        assert!(tokenize_block(&lines, 1).is_none());
        assert!(tokenize_block(&lines, 3).is_none());
        assert!(tokenize::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_dispatcher_always_progresses() {
        let lines = ["***", "* a", "*", "#", "|", "> ", "```", "text |", "|---|"];
        let mut index = 0;
        while let Some(tokenized) = tokenize_block(&lines, index) {
            assert!(tokenized.end_index > index);
            index = tokenized.end_index;
        }
        assert_eq!(index, lines.len());
    }
}
