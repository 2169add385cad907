//! Screen layout, drawing and mouse hit testing.
//!
//! ```text
//! ┌ title bar ─────────────────────────────────────────────┐
//! │┌ Holidays ─┐ ┌ Card ───────────────────────┐ ┌ Class ─┐│
//! ││▸ christmas│ │                             │ │  math  ││
//! ││  easter   │ │  Holidays - Christmas card: │ └────────┘│
//! │└───────────┘ │                             │           │
//! │┌ Surprise ─┐ │  Gift A                     │           │
//! ││  mystery  │ │                             │           │
//! │└───────────┘ └─────────────────────────────┘           │
//! └ help ──────────────────────────────────────────────────┘
//! ```
//!
//! The left column holds every category but the last; the right column
//! holds the last. Rendering and hit testing share `category_rects` and
//! `CategoryPanel::scroll_offset` so a click always lands on the row that
//! was drawn there. A column too short for its panels scrolls so the
//! selected panel stays in view.

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::state::{App, Selection};
use crate::tui::component::Component;
use crate::tui::components::{CardView, CategoryPanel, TitleBar};

/// Width of each side column of category panels.
pub const PANEL_WIDTH: u16 = 28;

const HELP_TEXT: &str = " ↑↓ Move  ←→/Tab Category  Enter Draw  Click Draw  c Clear  q Quit ";

pub struct ScreenLayout {
    pub title: Rect,
    pub left: Rect,
    pub center: Rect,
    pub right: Rect,
    pub help: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    use Constraint::{Length, Min};

    let [title, body, help] = Layout::vertical([Length(1), Min(0), Length(1)]).areas(area);
    let [left, center, right] =
        Layout::horizontal([Length(PANEL_WIDTH), Min(20), Length(PANEL_WIDTH)]).areas(body);

    ScreenLayout {
        title,
        left,
        center,
        right,
        help,
    }
}

/// Category index ranges for the left and right columns.
pub fn split_columns(category_count: usize) -> (Range<usize>, Range<usize>) {
    if category_count <= 1 {
        (0..category_count, category_count..category_count)
    } else {
        (0..category_count - 1, category_count - 1..category_count)
    }
}

/// Stack panels of the given heights from the top of `column`, starting
/// at the first panel that keeps `focus` in view. Panels scrolled past get
/// an empty rect; panels running off the bottom are cut short.
fn stack(column: Rect, heights: &[u16], focus: Option<usize>) -> Vec<Rect> {
    let first = focus.map_or(0, |focus| first_visible(heights, focus, column.height));
    let mut y = column.y;
    heights
        .iter()
        .enumerate()
        .map(|(index, &height)| {
            if index < first {
                return Rect::default();
            }
            let remaining = column.bottom().saturating_sub(y);
            let rect = Rect::new(column.x, y, column.width, height.min(remaining));
            y += rect.height;
            rect
        })
        .collect()
}

/// Smallest panel index to start from so panels up to `focus` fit in
/// `available` rows. Never past `focus` itself.
fn first_visible(heights: &[u16], focus: usize, available: u16) -> usize {
    let Some(through_focus) = heights.get(..=focus) else {
        return 0;
    };
    let mut used: u32 = through_focus.iter().map(|&h| u32::from(h)).sum();
    let mut first = 0;
    while first < focus && used > u32::from(available) {
        used -= u32::from(heights[first]);
        first += 1;
    }
    first
}

/// One rect per category, in category order.
pub fn category_rects(
    area: Rect,
    layout: &[(String, Vec<String>)],
    selection: Selection,
) -> Vec<Rect> {
    let screen = screen_layout(area);
    let (left, right) = split_columns(layout.len());

    let heights = |range: &Range<usize>| -> Vec<u16> {
        layout[range.clone()]
            .iter()
            .map(|(_, types)| CategoryPanel::required_height(types.len()))
            .collect()
    };
    let focus = |range: &Range<usize>| {
        range
            .contains(&selection.category)
            .then(|| selection.category - range.start)
    };

    let mut rects = stack(screen.left, &heights(&left), focus(&left));
    rects.extend(stack(screen.right, &heights(&right), focus(&right)));
    rects
}

/// Highlighted row of a category's panel, if the cursor is there.
fn selected_in(selection: Selection, category: usize) -> Option<usize> {
    (selection.category == category).then_some(selection.card_type)
}

/// Which card type button (category index, card type index) is at a
/// screen position, if any.
pub fn hit_test_button(
    column: u16,
    row: u16,
    frame_area: Rect,
    layout: &[(String, Vec<String>)],
    selection: Selection,
) -> Option<(usize, usize)> {
    let position = Position::new(column, row);
    category_rects(frame_area, layout, selection)
        .into_iter()
        .enumerate()
        .find_map(|(category, rect)| {
            let inner = rect.inner(Margin::new(1, 1));
            if !inner.contains(position) {
                return None;
            }
            let offset = CategoryPanel::scroll_offset(
                selected_in(selection, category),
                usize::from(inner.height),
            );
            let card_type = offset + usize::from(row - inner.y);
            (card_type < layout[category].1.len()).then_some((category, card_type))
        })
}

pub fn draw_ui(frame: &mut Frame, app: &App) {
    let screen = screen_layout(frame.area());

    let deck_name = app
        .deck_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| app.deck_path.display().to_string());
    TitleBar::new(deck_name, app.status_message.clone(), app.draw_count)
        .render(frame, screen.title);

    let rects = category_rects(frame.area(), &app.layout, app.selection);
    for (index, rect) in rects.into_iter().enumerate() {
        if rect.is_empty() {
            continue;
        }
        let (category, types) = &app.layout[index];
        let selected = selected_in(app.selection, index);
        CategoryPanel::new(category, types, selected).render(frame, rect);
    }

    CardView::new(app.result.as_ref(), app.error.as_deref()).render(frame, screen.center);

    frame.render_widget(
        Line::from(HELP_TEXT).style(Style::default().fg(Color::DarkGray)),
        screen.help,
    );
}
