//! # Actions
//!
//! Everything that can happen in Cardraw becomes an `Action`.
//! User clicks the "christmas" button? That's `Action::Select` then
//! `Action::DrawSelected`. User presses `q`? That's `Action::Quit`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` telling the adapter what to
//! do next. No terminal I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::core::draw::{DrawResult, draw};
use crate::core::state::{App, Selection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Draw one card of the named card type.
    Draw(String),
    /// Draw one card of the highlighted card type.
    DrawSelected,
    MoveUp,
    MoveDown,
    NextCategory,
    PrevCategory,
    /// Highlight a specific button (e.g. from a mouse click).
    Select { category: usize, card_type: usize },
    /// Clear the card view.
    Clear,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Redraw,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Draw(card_type) => {
            perform_draw(app, &card_type);
            Effect::Redraw
        }
        Action::DrawSelected => match app.selected_card_type().map(str::to_string) {
            Some(card_type) => {
                perform_draw(app, &card_type);
                Effect::Redraw
            }
            None => {
                app.status_message = String::from("Nothing to draw here");
                Effect::Redraw
            }
        },
        Action::MoveUp => {
            let sel = &mut app.selection;
            if sel.card_type == 0 {
                return Effect::None;
            }
            sel.card_type -= 1;
            Effect::Redraw
        }
        Action::MoveDown => {
            let len = type_count(app, app.selection.category);
            if app.selection.card_type + 1 >= len {
                return Effect::None;
            }
            app.selection.card_type += 1;
            Effect::Redraw
        }
        Action::NextCategory => {
            let count = app.layout.len();
            if count == 0 {
                return Effect::None;
            }
            move_to_category(app, (app.selection.category + 1) % count);
            Effect::Redraw
        }
        Action::PrevCategory => {
            let count = app.layout.len();
            if count == 0 {
                return Effect::None;
            }
            move_to_category(app, (app.selection.category + count - 1) % count);
            Effect::Redraw
        }
        Action::Select {
            category,
            card_type,
        } => {
            if card_type >= type_count(app, category) {
                return Effect::None;
            }
            app.selection = Selection {
                category,
                card_type,
            };
            Effect::Redraw
        }
        Action::Clear => {
            app.result = None;
            Effect::Redraw
        }
        Action::Quit => {
            info!("Quit after {} draws", app.draw_count);
            Effect::Quit
        }
    }
}

fn perform_draw(app: &mut App, card_type: &str) {
    let result = draw(&app.deck, card_type, &mut *app.rng);
    app.draw_count += 1;
    app.status_message = match &result {
        DrawResult::Drawn { category, .. } => format!("Drew from {category}/{card_type}"),
        DrawResult::Empty { .. } => format!("{card_type} is empty"),
    };
    info!("Draw #{}: {:?}", app.draw_count, result);
    app.result = Some(result);
}

fn type_count(app: &App, category: usize) -> usize {
    app.layout.get(category).map_or(0, |(_, types)| types.len())
}

/// Jump to another category, keeping the row if it exists there.
fn move_to_category(app: &mut App, category: usize) {
    let len = type_count(app, category);
    app.selection = Selection {
        category,
        card_type: app.selection.card_type.min(len.saturating_sub(1)),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::draw::FixedSource;
    use crate::test_support::{test_app, test_app_with};

    #[test]
    fn test_draw_by_name() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Draw("christmas".into()));
        assert_eq!(effect, Effect::Redraw);
        assert_eq!(
            app.result,
            Some(DrawResult::Drawn {
                category: "holidays".into(),
                card_type: "christmas".into(),
                card: "Gift A".into(),
            })
        );
        assert_eq!(app.draw_count, 1);
        assert_eq!(app.status_message, "Drew from holidays/christmas");
    }

    #[test]
    fn test_draw_empty_card_type() {
        let mut app = test_app();
        update(&mut app, Action::Draw("mystery".into()));
        assert_eq!(
            app.result,
            Some(DrawResult::Empty {
                card_type: "mystery".into()
            })
        );
        assert_eq!(app.status_message, "mystery is empty");
    }

    #[test]
    fn test_draw_selected_uses_rng_once_per_action() {
        let mut app = test_app();
        app.rng = Box::new(FixedSource::new([1, 0]));
        update(&mut app, Action::DrawSelected);
        assert_eq!(app.result.as_ref().and_then(DrawResult::card), Some("Gift B"));
        update(&mut app, Action::DrawSelected);
        assert_eq!(app.result.as_ref().and_then(DrawResult::card), Some("Gift A"));
        assert_eq!(app.draw_count, 2);
    }

    #[test]
    fn test_draw_selected_on_empty_category() {
        let mut app = test_app_with(r#"{"nothing": {}}"#);
        let effect = update(&mut app, Action::DrawSelected);
        assert_eq!(effect, Effect::Redraw);
        assert!(app.result.is_none());
        assert_eq!(app.draw_count, 0);
    }

    #[test]
    fn test_move_within_category_is_clamped() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::MoveUp), Effect::None);
        assert_eq!(update(&mut app, Action::MoveDown), Effect::Redraw);
        assert_eq!(app.selected_card_type(), Some("easter"));
        assert_eq!(update(&mut app, Action::MoveDown), Effect::None);
        assert_eq!(app.selection.card_type, 1);
    }

    #[test]
    fn test_category_navigation_wraps_and_clamps_row() {
        let mut app = test_app();
        update(&mut app, Action::MoveDown);
        update(&mut app, Action::NextCategory);
        assert_eq!(app.selection, Selection { category: 1, card_type: 0 });
        update(&mut app, Action::NextCategory);
        update(&mut app, Action::NextCategory);
        assert_eq!(app.selection.category, 0);
        update(&mut app, Action::PrevCategory);
        assert_eq!(app.selected_card_type(), Some("math"));
    }

    #[test]
    fn test_category_navigation_on_empty_deck() {
        let mut app = test_app_with("{}");
        assert_eq!(update(&mut app, Action::NextCategory), Effect::None);
        assert_eq!(update(&mut app, Action::PrevCategory), Effect::None);
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut app = test_app();
        assert_eq!(
            update(&mut app, Action::Select { category: 2, card_type: 5 }),
            Effect::None
        );
        assert_eq!(
            update(&mut app, Action::Select { category: 9, card_type: 0 }),
            Effect::None
        );
        assert_eq!(
            update(&mut app, Action::Select { category: 2, card_type: 0 }),
            Effect::Redraw
        );
        assert_eq!(app.selected_card_type(), Some("math"));
    }

    #[test]
    fn test_clear_and_quit() {
        let mut app = test_app();
        update(&mut app, Action::DrawSelected);
        assert!(app.result.is_some());
        update(&mut app, Action::Clear);
        assert!(app.result.is_none());
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
