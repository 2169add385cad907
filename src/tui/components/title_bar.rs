//! # TitleBar Component
//!
//! Top status bar showing the deck file, the status message and how many
//! cards have been drawn.
//!
//! TitleBar is purely presentational: it receives all data as props and
//! has no internal state. The text changes based on state:
//!
//! 1. **Draws made**: `"Cardraw (deck: cards.json) | Drew from holidays/christmas | 3 draws"`
//! 2. **Status only**: `"Cardraw (deck: cards.json) | 4 card types in 3 categories"`
//! 3. **Default**: `"Cardraw (deck: cards.json)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Top status bar component.
pub struct TitleBar {
    /// Deck file name (e.g., "cards.json")
    pub deck_name: String,
    /// Status message (e.g., "Drew from holidays/christmas")
    pub status_message: String,
    /// Draws made this session
    pub draw_count: usize,
}

impl TitleBar {
    pub fn new(deck_name: String, status_message: String, draw_count: usize) -> Self {
        Self {
            deck_name,
            status_message,
            draw_count,
        }
    }

    fn title_text(&self) -> String {
        let mut text = format!("Cardraw (deck: {})", self.deck_name);
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        match self.draw_count {
            0 => {}
            1 => text.push_str(" | 1 draw"),
            n => text.push_str(&format!(" | {n} draws")),
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.title_text(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_draws() {
        let mut title_bar = TitleBar::new(
            "cards.json".to_string(),
            "Drew from holidays/christmas".to_string(),
            3,
        );
        let text = render_text(&mut title_bar);

        assert!(text.contains("Cardraw (deck: cards.json)"));
        assert!(text.contains("Drew from holidays/christmas"));
        assert!(text.contains("3 draws"));
    }

    #[test]
    fn test_title_bar_single_draw_is_singular() {
        let title_bar = TitleBar::new("cards.json".to_string(), String::new(), 1);
        assert_eq!(title_bar.title_text(), "Cardraw (deck: cards.json) | 1 draw");
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new("cards.json".to_string(), String::new(), 0);
        let text = render_text(&mut title_bar);

        assert!(text.contains("Cardraw"));
        assert!(!text.contains('|'));
    }
}
