//! # Card View Component
//!
//! The centre panel: shows the last draw, a hint before the first draw, or
//! the deck load error.
//!
//! Card text is centred vertically. The wrapped line count comes from
//! `textwrap` with the same width the `Paragraph` wraps to, so the top
//! padding can be computed before rendering.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::core::draw::DrawResult;
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 2;
/// Total horizontal space consumed by borders and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

const HINT: &str = "Pick a card type to draw a card.";

pub struct CardView<'a> {
    pub result: Option<&'a DrawResult>,
    pub error: Option<&'a str>,
}

impl<'a> CardView<'a> {
    pub fn new(result: Option<&'a DrawResult>, error: Option<&'a str>) -> Self {
        Self { result, error }
    }

    /// Rendered text lines for a given content width (before padding).
    pub fn wrapped_line_count(text: &str, width: u16) -> u16 {
        if width == 0 {
            return 0;
        }
        text.split('\n')
            .map(|line| textwrap::wrap(line, width as usize).len().max(1))
            .sum::<usize>() as u16
    }

    fn body(&self) -> (String, Style, &'static str) {
        if let Some(error) = self.error {
            return (
                error.to_string(),
                Style::default().fg(Color::Red),
                " Error ",
            );
        }
        match self.result {
            Some(result @ DrawResult::Drawn { .. }) => (
                result.to_string(),
                Style::default().fg(Color::White),
                " Card ",
            ),
            Some(result @ DrawResult::Empty { .. }) => (
                result.to_string(),
                Style::default().fg(Color::Yellow),
                " Card ",
            ),
            None => (
                HINT.to_string(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
                " Card ",
            ),
        }
    }
}

impl Component for CardView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (text, style, title) = self.body();

        let content_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let content_height = area.height.saturating_sub(VERTICAL_OVERHEAD);
        let lines = Self::wrapped_line_count(&text, content_width);
        let top_pad = content_height.saturating_sub(lines) / 2;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .padding(Padding::new(CONTENT_PAD_H, CONTENT_PAD_H, top_pad, 0));

        let body: Vec<Line> = text.split('\n').map(|l| Line::from(l.to_string())).collect();
        let paragraph = Paragraph::new(Text::from(body))
            .style(style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);

        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(view: &mut CardView) -> String {
        let backend = TestBackend::new(50, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| view.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_hint_before_first_draw() {
        let text = render(&mut CardView::new(None, None));
        assert!(text.contains("Pick a card type"));
    }

    #[test]
    fn test_drawn_card_shown() {
        let result = DrawResult::Drawn {
            category: "holidays".into(),
            card_type: "christmas".into(),
            card: "Gift A".into(),
        };
        let text = render(&mut CardView::new(Some(&result), None));
        assert!(text.contains("Holidays - Christmas card:"));
        assert!(text.contains("Gift A"));
    }

    #[test]
    fn test_empty_result_message() {
        let result = DrawResult::Empty {
            card_type: "mystery".into(),
        };
        let text = render(&mut CardView::new(Some(&result), None));
        assert!(text.contains("No cards available in mystery deck."));
    }

    #[test]
    fn test_error_wins_over_result() {
        let result = DrawResult::Empty {
            card_type: "mystery".into(),
        };
        let text = render(&mut CardView::new(Some(&result), Some("cannot read deck")));
        assert!(text.contains("Error"));
        assert!(text.contains("cannot read deck"));
        assert!(!text.contains("mystery"));
    }

    #[test]
    fn test_wrapped_line_count() {
        assert_eq!(CardView::wrapped_line_count("a\n\nb", 10), 3);
        assert_eq!(CardView::wrapped_line_count("one two three", 7), 2);
        assert_eq!(CardView::wrapped_line_count("anything", 0), 0);
    }
}
