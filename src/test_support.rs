//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::deck::Deck;
use crate::core::draw::FixedSource;
use crate::core::state::App;

pub const TEST_DECK: &str = r#"{
    "holidays": {"christmas": ["Gift A", "Gift B"], "easter": ["Egg hunt"]},
    "surprise": {"mystery": []},
    "class": {"math": ["Solve 2 + 2"]}
}"#;

/// Creates a test App over [`TEST_DECK`] that always draws index 0.
pub fn test_app() -> App {
    test_app_with(TEST_DECK)
}

pub fn test_app_with(json: &str) -> App {
    let deck = Deck::from_json_str(json).expect("test deck must parse");
    App::new(deck, Box::new(FixedSource::default()), "test-cards.json".into())
}
