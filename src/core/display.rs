//! Text rendering of draw results, shared by the TUI and the CLI.

use std::fmt;

use crate::core::draw::DrawResult;

impl fmt::Display for DrawResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawResult::Drawn {
                category,
                card_type,
                card,
            } => write!(
                f,
                "{} - {} card:\n\n{}",
                capitalize(category),
                capitalize(card_type),
                card
            ),
            DrawResult::Empty { card_type } => {
                write!(f, "No cards available in {card_type} deck.")
            }
        }
    }
}

/// Upper-case the first character and lower-case the rest ("new YEAR" → "New year").
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Wrap draw text for a plain terminal, keeping the blank line between the
/// heading and the card.
pub fn wrap_text(text: &str, width: usize) -> String {
    text.split('\n')
        .map(|line| textwrap::fill(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}
