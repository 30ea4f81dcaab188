use once_cell::sync::Lazy;
use regex::Regex;

use super::{BlockToken, Tokenized};

/// ATX heading with an optional closing `#` run
static ATX_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*?))?(?:[ \t]+#+)?[ \t]*$").expect("valid heading regex")
});

pub(crate) fn is_heading(line: &str) -> bool {
    ATX_HEADING.is_match(line)
}

/// Parse an ATX heading; always a single line
pub fn parse_heading<S: AsRef<str>>(lines: &[S], start: usize) -> Option<Tokenized> {
    let caps = ATX_HEADING.captures(lines.get(start)?.as_ref())?;
    let level = caps[1].len() as u8;
    let text = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
    Some(Tokenized {
        token: BlockToken::Heading { level, text },
        end_index: start + 1,
    })
}
