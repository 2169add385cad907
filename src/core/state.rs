//! # Application State
//!
//! Core business state for Cardraw. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── deck: Deck                     // read-only after load
//! ├── rng: Box<dyn IndexSource>      // where draws get their randomness
//! ├── deck_path: PathBuf             // shown in the title bar
//! ├── layout: Vec<(category, types)> // one button per card type
//! ├── selection: Selection           // keyboard cursor
//! ├── result: Option<DrawResult>     // last draw
//! ├── draw_count: usize              // draws this session
//! ├── status_message: String         // status bar text
//! └── error: Option<String>          // deck load failure
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::path::PathBuf;

use crate::core::deck::{Deck, LoadError};
use crate::core::draw::{DrawResult, IndexSource};

/// Keyboard cursor: which card type button is highlighted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub category: usize,
    pub card_type: usize,
}

pub struct App {
    pub deck: Deck,
    pub rng: Box<dyn IndexSource>,
    pub deck_path: PathBuf,
    pub layout: Vec<(String, Vec<String>)>,
    pub selection: Selection,
    pub result: Option<DrawResult>,
    pub draw_count: usize,
    pub status_message: String,
    pub error: Option<String>,
}

impl App {
    pub fn new(deck: Deck, rng: Box<dyn IndexSource>, deck_path: PathBuf) -> Self {
        let layout = deck.layout();
        let status_message = format!(
            "{} card types in {} categories",
            deck.card_type_count(),
            deck.len()
        );
        Self {
            deck,
            rng,
            deck_path,
            layout,
            selection: Selection::default(),
            result: None,
            draw_count: 0,
            status_message,
            error: None,
        }
    }

    /// An app whose deck failed to load: empty deck, error shown in place
    /// of the card view.
    pub fn with_load_error(error: &LoadError, rng: Box<dyn IndexSource>, deck_path: PathBuf) -> Self {
        let mut app = Self::new(Deck::default(), rng, deck_path);
        app.error = Some(error.to_string());
        app.status_message = String::from("Deck not loaded");
        app
    }

    /// Name of the highlighted card type, if the highlighted category has any.
    pub fn selected_card_type(&self) -> Option<&str> {
        self.layout
            .get(self.selection.category)
            .and_then(|(_, types)| types.get(self.selection.card_type))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{test_app, test_app_with};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "4 card types in 3 categories");
        assert!(app.result.is_none());
        assert_eq!(app.draw_count, 0);
        assert_eq!(app.selected_card_type(), Some("christmas"));
    }

    #[test]
    fn test_selected_card_type_none_for_empty_category() {
        let app = test_app_with(r#"{"empty": {}}"#);
        assert_eq!(app.selected_card_type(), None);
    }

    #[test]
    fn test_with_load_error() {
        let err = crate::core::deck::Deck::from_json_str("[]").unwrap_err();
        let app = super::App::with_load_error(
            &err,
            Box::new(crate::core::draw::FixedSource::default()),
            "cards.json".into(),
        );
        assert!(app.deck.is_empty());
        assert!(app.error.as_deref().unwrap().contains("wrong shape"));
        assert_eq!(app.selected_card_type(), None);
    }
}
