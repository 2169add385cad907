//! # Draw Engine
//!
//! Resolves a card type name to one random card.
//!
//! ```text
//! draw(deck, "christmas", rng)
//!   │
//!   ├── scan categories in deck order
//!   │     first one holding "christmas" with at least one card wins
//!   │
//!   ├── found → Drawn { category, card_type, card = cards[rng.next_index(len)] }
//!   └── none  → Empty { card_type }
//! ```
//!
//! Randomness comes from an [`IndexSource`] passed in by the caller, so
//! draws are reproducible under test and with a fixed seed.

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

use crate::core::deck::Deck;

/// Supplies the index of the next card to draw.
pub trait IndexSource {
    /// Returns an index in `0..len`. Never called with `len == 0`.
    fn next_index(&mut self, len: usize) -> usize;
}

/// Thread-local OS-seeded RNG. The production default.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRngSource;

impl IndexSource for ThreadRngSource {
    fn next_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// ChaCha8 seeded from a `u64`: the same seed draws the same sequence.
#[derive(Clone, Debug)]
pub struct SeededSource {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SeededSource {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl IndexSource for SeededSource {
    fn next_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

/// Replays a scripted list of indices, wrapping each into range.
/// Falls back to index 0 once the script runs out.
#[derive(Clone, Debug, Default)]
pub struct FixedSource {
    script: VecDeque<usize>,
}

impl FixedSource {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl IndexSource for FixedSource {
    fn next_index(&mut self, len: usize) -> usize {
        self.script.pop_front().unwrap_or(0) % len
    }
}

impl<S: IndexSource + ?Sized> IndexSource for Box<S> {
    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}

/// Outcome of a draw. `Empty` is a normal result, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawResult {
    Drawn {
        category: String,
        card_type: String,
        card: String,
    },
    Empty {
        card_type: String,
    },
}

impl DrawResult {
    pub fn card_type(&self) -> &str {
        match self {
            DrawResult::Drawn { card_type, .. } | DrawResult::Empty { card_type } => card_type,
        }
    }

    pub fn card(&self) -> Option<&str> {
        match self {
            DrawResult::Drawn { card, .. } => Some(card),
            DrawResult::Empty { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, DrawResult::Empty { .. })
    }
}

/// Draw one card of `card_type`.
///
/// If several categories hold the same card type, the first one in deck
/// order with a non-empty list is used.
pub fn draw<R: IndexSource + ?Sized>(deck: &Deck, card_type: &str, rng: &mut R) -> DrawResult {
    let found = deck.categories().find_map(|(category, types)| {
        types
            .cards(card_type)
            .filter(|cards| !cards.is_empty())
            .map(|cards| (category, cards))
    });

    match found {
        Some((category, cards)) => {
            let index = rng.next_index(cards.len()) % cards.len();
            debug!(
                "Drew {card_type} card {index}/{} from {category}",
                cards.len()
            );
            DrawResult::Drawn {
                category: category.to_string(),
                card_type: card_type.to_string(),
                card: cards[index].clone(),
            }
        }
        None => {
            debug!("No cards available for {card_type}");
            DrawResult::Empty {
                card_type: card_type.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(json: &str) -> Deck {
        Deck::from_json_str(json).unwrap()
    }

    #[test]
    fn test_single_card_always_drawn() {
        let deck = deck(r#"{"holidays": {"christmas": ["Gift A"]}}"#);
        let mut rng = ThreadRngSource;
        for _ in 0..20 {
            assert_eq!(
                draw(&deck, "christmas", &mut rng),
                DrawResult::Drawn {
                    category: "holidays".into(),
                    card_type: "christmas".into(),
                    card: "Gift A".into(),
                }
            );
        }
    }

    #[test]
    fn test_empty_list_gives_empty() {
        let deck = deck(r#"{"holidays": {"christmas": []}}"#);
        let result = draw(&deck, "christmas", &mut ThreadRngSource);
        assert_eq!(
            result,
            DrawResult::Empty {
                card_type: "christmas".into()
            }
        );
        assert!(result.is_empty());
        assert_eq!(result.card(), None);
    }

    #[test]
    fn test_unknown_card_type_gives_empty_with_name_unchanged() {
        let deck = deck(r#"{"holidays": {"christmas": ["x"]}}"#);
        let result = draw(&deck, "Christmas ", &mut ThreadRngSource);
        assert_eq!(result.card_type(), "Christmas ");
        assert!(result.is_empty());
    }

    #[test]
    fn test_fixed_source_forces_card() {
        let deck = deck(r#"{"class": {"math": ["a", "b", "c"]}}"#);
        let mut rng = FixedSource::new([2, 0, 4]);
        assert_eq!(draw(&deck, "math", &mut rng).card(), Some("c"));
        assert_eq!(draw(&deck, "math", &mut rng).card(), Some("a"));
        // 4 wraps to 1
        assert_eq!(draw(&deck, "math", &mut rng).card(), Some("b"));
        // script exhausted
        assert_eq!(draw(&deck, "math", &mut rng).card(), Some("a"));
    }

    #[test]
    fn test_first_category_wins_for_duplicates() {
        let deck = deck(r#"{"a": {"x": ["from a"]}, "b": {"x": ["from b"]}}"#);
        let result = draw(&deck, "x", &mut ThreadRngSource);
        assert!(matches!(result, DrawResult::Drawn { ref category, .. } if category == "a"));
    }

    #[test]
    fn test_empty_duplicate_does_not_stop_scan() {
        let deck = deck(r#"{"a": {"x": []}, "b": {"x": ["from b"]}}"#);
        let result = draw(&deck, "x", &mut ThreadRngSource);
        assert_eq!(result.card(), Some("from b"));
    }

    #[test]
    fn test_seeded_source_is_deterministic() {
        let deck = deck(r#"{"c": {"t": ["1", "2", "3", "4", "5", "6", "7", "8"]}}"#);
        let mut a = SeededSource::new(42);
        let mut b = SeededSource::new(42);
        let seq_a: Vec<_> = (0..16).map(|_| draw(&deck, "t", &mut a)).collect();
        let seq_b: Vec<_> = (0..16).map(|_| draw(&deck, "t", &mut b)).collect();
        assert_eq!(seq_a, seq_b);
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_draw_through_boxed_source() {
        let deck = deck(r#"{"c": {"t": ["1", "2"]}}"#);
        let mut rng: Box<dyn IndexSource> = Box::new(FixedSource::new([1]));
        assert_eq!(draw(&deck, "t", &mut rng).card(), Some("2"));
    }

    #[test]
    fn test_repeats_allowed() {
        let deck = deck(r#"{"c": {"t": ["only", "other"]}}"#);
        let mut rng = FixedSource::new([0, 0, 0]);
        let cards: Vec<_> = (0..3)
            .map(|_| draw(&deck, "t", &mut rng).card().map(str::to_string))
            .collect();
        assert!(cards.iter().all(|c| c.as_deref() == Some("only")));
    }
}
