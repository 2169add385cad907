//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop only redraws after an event whose action
//! returned `Effect::Redraw`, or after a terminal resize. Between events it
//! blocks in `poll` for up to 500ms.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::state::App;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(500);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse capture)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Map a TUI event to the actions it triggers. A click on a button is a
/// select followed by exactly one draw.
fn actions_for(event: TuiEvent, app: &App, frame_area: ratatui::layout::Rect) -> Vec<Action> {
    match event {
        TuiEvent::Quit | TuiEvent::ForceQuit => vec![Action::Quit],
        TuiEvent::CursorUp => vec![Action::MoveUp],
        TuiEvent::CursorDown => vec![Action::MoveDown],
        TuiEvent::NextCategory => vec![Action::NextCategory],
        TuiEvent::PrevCategory => vec![Action::PrevCategory],
        TuiEvent::Submit => vec![Action::DrawSelected],
        TuiEvent::Clear => vec![Action::Clear],
        TuiEvent::MouseClick(column, row) => {
            match ui::hit_test_button(column, row, frame_area, &app.layout, app.selection) {
                Some((category, card_type)) => vec![
                    Action::Select {
                        category,
                        card_type,
                    },
                    Action::DrawSelected,
                ],
                None => Vec::new(),
            }
        }
        TuiEvent::Resize => Vec::new(),
    }
}

pub fn run(mut app: App) -> std::io::Result<()> {
    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new()
        .inspect_err(|e| warn!("Mouse capture unavailable: {e}"))
        .ok();

    let mut needs_redraw = true; // Force first frame
    let result = loop {
        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let first_event = match poll_event_timeout(IDLE_POLL) {
            Ok(event) => event,
            Err(e) => break Err(e),
        };

        // Process first event + drain ALL pending events before next draw
        let frame_area = terminal.get_frame().area();
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            debug!("TUI event: {:?}", event);
            if event == TuiEvent::Resize {
                needs_redraw = true;
                continue;
            }
            for action in actions_for(event, &app, frame_area) {
                match update(&mut app, action) {
                    Effect::Quit => should_quit = true,
                    Effect::Redraw => needs_redraw = true,
                    Effect::None => {}
                }
            }
        }

        if should_quit {
            break Ok(());
        }
    };

    drop(terminal_mode_guard);
    ratatui::restore();
    info!("Terminal restored");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use ratatui::layout::Rect;

    #[test]
    fn test_click_on_button_selects_then_draws_once() {
        let app = test_app();
        let area = Rect::new(0, 0, 100, 20);
        let actions = actions_for(TuiEvent::MouseClick(3, 3), &app, area);
        assert_eq!(
            actions,
            vec![
                Action::Select {
                    category: 0,
                    card_type: 1
                },
                Action::DrawSelected
            ]
        );
    }

    #[test]
    fn test_click_outside_buttons_does_nothing() {
        let app = test_app();
        let area = Rect::new(0, 0, 100, 20);
        assert!(actions_for(TuiEvent::MouseClick(50, 10), &app, area).is_empty());
    }

    #[test]
    fn test_click_draws_from_clicked_card_type() {
        let mut app = test_app();
        let area = Rect::new(0, 0, 100, 20);
        for action in actions_for(TuiEvent::MouseClick(3, 3), &app, area) {
            update(&mut app, action);
        }
        assert_eq!(app.draw_count, 1);
        assert_eq!(
            app.result.as_ref().map(|r| r.card_type().to_string()),
            Some("easter".to_string())
        );
    }

    #[test]
    fn test_keys_map_to_actions() {
        let app = test_app();
        let area = Rect::new(0, 0, 100, 20);
        assert_eq!(actions_for(TuiEvent::Submit, &app, area), vec![Action::DrawSelected]);
        assert_eq!(actions_for(TuiEvent::ForceQuit, &app, area), vec![Action::Quit]);
        assert!(actions_for(TuiEvent::Resize, &app, area).is_empty());
    }
}
