//! Plain-text deck import
//!
//! One card per line: `term, definition, type, example`. No quoting, so a
//! comma always starts a new field.

use crate::NewCard;

/// Lexical type used when a row leaves it out
pub const UNKNOWN_TYPE: &str = "unknown";

/// Parse one import row, `None` when it has fewer than two fields
pub fn parse_row(line: &str) -> Option<NewCard> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() < 2 {
        return None;
    }

    let field = |i: usize| parts.get(i).copied().unwrap_or_default().to_string();
    let lexical_type = match parts.get(2).copied() {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => UNKNOWN_TYPE.to_string(),
    };

    Some(NewCard {
        term: field(0),
        definition: field(1),
        lexical_type,
        example: field(3),
        ..Default::default()
    })
}

/// Parse import text, silently dropping malformed rows
pub fn parse_cards(text: &str) -> Vec<NewCard> {
    text.lines().filter_map(parse_row).collect()
}
