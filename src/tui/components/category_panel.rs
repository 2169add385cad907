//! # Category Panel Component
//!
//! One bordered box per category with one button row per card type.
//! Clicking a row (or pressing Enter on the highlighted row) draws a card
//! of that type; the hit testing lives in `ui::hit_test_button` and relies
//! on rows being laid out one per line directly inside the border, starting
//! from [`CategoryPanel::scroll_offset`] when the panel is cut short.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::display::capitalize;
use crate::tui::component::Component;

/// Total vertical space consumed by borders (1 top + 1 bottom).
pub const VERTICAL_OVERHEAD: u16 = 2;

pub struct CategoryPanel<'a> {
    pub category: &'a str,
    pub card_types: &'a [String],
    /// Highlighted row, if the cursor is in this category.
    pub selected: Option<usize>,
}

impl<'a> CategoryPanel<'a> {
    pub fn new(category: &'a str, card_types: &'a [String], selected: Option<usize>) -> Self {
        Self {
            category,
            card_types,
            selected,
        }
    }

    /// Rows plus borders. An empty category still gets one row for its
    /// placeholder.
    pub fn required_height(card_type_count: usize) -> u16 {
        u16::try_from(card_type_count.max(1))
            .unwrap_or(u16::MAX)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    /// First card type row shown when only `visible_rows` fit, chosen so
    /// the selected row stays in view.
    pub fn scroll_offset(selected: Option<usize>, visible_rows: usize) -> usize {
        match selected {
            Some(selected) if visible_rows > 0 => (selected + 1).saturating_sub(visible_rows),
            _ => 0,
        }
    }

    fn button_line(&self, index: usize, card_type: &str, width: usize) -> Line<'static> {
        let is_selected = self.selected == Some(index);
        let marker = if is_selected { "▸ " } else { "  " };
        let label = truncate_to_width(card_type, width.saturating_sub(marker.width()));

        let style = if is_selected {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };

        let padded = format!("{marker}{label}");
        let fill = width.saturating_sub(padded.width());
        Line::from(vec![
            Span::styled(padded, style),
            Span::styled(" ".repeat(fill), style),
        ])
    }
}

impl Component for CategoryPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.selected.is_some() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(
                format!(" {} ", capitalize(self.category)),
                Style::default().add_modifier(Modifier::BOLD),
            ));

        let inner_width = area.width.saturating_sub(2) as usize;
        let visible_rows = usize::from(area.height.saturating_sub(VERTICAL_OVERHEAD));
        let offset = Self::scroll_offset(self.selected, visible_rows);
        let lines: Vec<Line> = if self.card_types.is_empty() {
            vec![Line::from(Span::styled(
                "  (no card types)",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            self.card_types
                .iter()
                .enumerate()
                .skip(offset)
                .map(|(i, card_type)| self.button_line(i, card_type, inner_width))
                .collect()
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Truncate to fit `max_width` terminal columns, adding "…" if needed.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
