//! Shared line and table-row helpers

/// Leading whitespace width, counting a tab as 2 columns
///
/// A flat count without tab-stop alignment, used to compare the
/// nesting of list items.
pub fn get_indent(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace() && *c != '\n' && *c != '\r')
        .map(|c| if c == '\t' { 2 } else { 1 })
        .sum()
}

/// Split a pipe-table row into trimmed cells
///
/// One leading and one trailing `|` are optional. `\|` is a literal pipe
/// inside a cell.
pub fn parse_pipe_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = match inner.strip_suffix('|') {
        Some(rest) if !rest.ends_with('\\') => rest,
        _ => inner,
    };

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                cell.push('|');
                chars.next();
            }
            '|' => {
                cells.push(cell.trim().to_string());
                cell.clear();
            }
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());
    cells
}

pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Does the line contain a `|` that is not escaped?
///
/// Same rule as [`parse_pipe_row`]: a `|` right after a `\` is literal.
pub(crate) fn has_unescaped_pipe(line: &str) -> bool {
    let mut prev = None;
    for c in line.chars() {
        if c == '|' && prev != Some('\\') {
            return true;
        }
        prev = Some(c);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_indent_counts_tabs_as_two() {
        assert_eq!(get_indent("\t  x"), 4);
        assert_eq!(get_indent("    x"), 4);
        assert_eq!(get_indent("\t\tx"), 4);
        assert_eq!(get_indent("x"), 0);
        assert_eq!(get_indent(""), 0);
        assert_eq!(get_indent("   "), 3);
    }

    #[test]
    fn test_parse_pipe_row() {
        assert_eq!(parse_pipe_row("| A | B |"), vec!["A", "B"]);
        assert_eq!(parse_pipe_row("A | B"), vec!["A", "B"]);
        assert_eq!(parse_pipe_row("  |A|B  "), vec!["A", "B"]);
    }

    #[test]
    fn test_parse_pipe_row_escaped_pipe() {
        assert_eq!(parse_pipe_row("| A \\| B | C |"), vec!["A | B", "C"]);
        assert_eq!(parse_pipe_row("| x \\|"), vec!["x |"]);
    }

    #[test]
    fn test_parse_pipe_row_empty_cells() {
        assert_eq!(parse_pipe_row("| | b |"), vec!["", "b"]);
        assert!(parse_pipe_row("   ").is_empty());
    }

    #[test]
    fn test_has_unescaped_pipe() {
        assert!(has_unescaped_pipe("a | b"));
        assert!(!has_unescaped_pipe("a \\| b"));
        assert!(!has_unescaped_pipe("a \\\\| b"));
        assert!(has_unescaped_pipe("a \\ | b"));
        assert!(!has_unescaped_pipe("plain"));
    }

    #[test]
    fn test_pipe_detection_agrees_with_row_split() {
        for line in ["a | b", "a \\| b", "a \\\\| b", "a \\ | b"] {
            assert_eq!(has_unescaped_pipe(line), parse_pipe_row(line).len() > 1, "{}", line);
        }
        assert_eq!(parse_pipe_row("a \\\\| b"), vec!["a \\| b"]);
    }
}
