use once_cell::sync::Lazy;
use regex::Regex;

use super::util::{has_unescaped_pipe, is_blank, parse_pipe_row};
use super::{Alignment, BlockToken, Tokenized};

static DELIMITER_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:?-+:?$").expect("valid delimiter cell regex"));

fn alignment(cell: &str) -> Alignment {
    match (cell.starts_with(':'), cell.ends_with(':')) {
        (true, true) => Alignment::Center,
        (true, false) => Alignment::Left,
        (false, true) => Alignment::Right,
        (false, false) => Alignment::None,
    }
}

fn delimiter_row(line: &str, width: usize) -> Option<Vec<Alignment>> {
    let cells = parse_pipe_row(line);
    if cells.len() != width || !cells.iter().all(|cell| DELIMITER_CELL.is_match(cell)) {
        return None;
    }
    Some(cells.iter().map(|cell| alignment(cell)).collect())
}

/// Parse a pipe table starting at `start`
///
/// Needs a header row and a delimiter row with the same number of cells.
/// Body rows are padded or truncated to the header width.
pub fn parse_table<S: AsRef<str>>(lines: &[S], start: usize) -> Option<Tokenized> {
    let header_line = lines.get(start)?.as_ref();
    if !has_unescaped_pipe(header_line) {
        return None;
    }
    let header = parse_pipe_row(header_line);
    let alignments = delimiter_row(lines.get(start + 1)?.as_ref(), header.len())?;

    let mut rows = Vec::new();
    let mut index = start + 2;
    while let Some(line) = lines.get(index).map(AsRef::as_ref) {
        if is_blank(line) || !has_unescaped_pipe(line) {
            break;
        }
        let mut row = parse_pipe_row(line);
        row.resize(header.len(), String::new());
        rows.push(row);
        index += 1;
    }

    Some(Tokenized {
        token: BlockToken::Table {
            header,
            alignments,
            rows,
        },
        end_index: index,
    })
}
