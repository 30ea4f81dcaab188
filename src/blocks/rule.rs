use super::{BlockToken, Tokenized};

/// Three or more of the same `-`, `*` or `_`, with spaces allowed between
pub(crate) fn is_horizontal_rule(line: &str) -> bool {
    let mut marks = line.chars().filter(|c| *c != ' ' && *c != '\t');
    let Some(mark) = marks.next() else {
        return false;
    };
    if !matches!(mark, '-' | '*' | '_') {
        return false;
    }
    let mut count = 1;
    for c in marks {
        if c != mark {
            return false;
        }
        count += 1;
    }
    count >= 3
}

pub fn parse_horizontal_rule<S: AsRef<str>>(lines: &[S], start: usize) -> Option<Tokenized> {
    if !is_horizontal_rule(lines.get(start)?.as_ref()) {
        return None;
    }
    Some(Tokenized {
        token: BlockToken::HorizontalRule,
        end_index: start + 1,
    })
}
