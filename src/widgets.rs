//! Reusable clickable UI components.
//!
//! Each component renders itself and registers its own click targets, so
//! what the player sees and what they can tap never drift apart.
//!
//! # Components
//!
//! - [`ButtonBar`]: one row of labelled buttons.
//! - [`ClickableList`]: vertical list with per-row click targets.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── ButtonBar ──────────────────────────────────────────────────

/// A single row of buttons separated by a fixed string.
///
/// Targets are computed from the rendered label widths; each button also
/// claims half of the separator on either side, and the outer buttons
/// reach the edges of the bar.
///
/// # Example
/// ```ignore
/// ButtonBar::new(" │ ")
///     .button("[C] Click", hint, CLICK)
///     .button("[R] Reset", hint, RESET)
///     .render(f, area, &mut cs);
/// ```
pub struct ButtonBar<'a> {
    buttons: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> ButtonBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            buttons: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn button(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.buttons.push((label.into(), style, action_id));
        self
    }

    /// Wrap the bar in a [`Block`]. Targets follow `Block::inner()` horizontally.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// `(display_width, action_id)` of each padded label.
    fn widths(&self) -> Vec<(u16, u16)> {
        self.buttons
            .iter()
            .map(|(label, _, id)| (Line::from(format!(" {label} ")).width() as u16, *id))
            .collect()
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let sep_width = Line::from(self.separator).width() as u16;
        let widths = self.widths();

        let mut spans: Vec<Span> = Vec::new();
        for (i, (label, style, _)) in self.buttons.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.separator,
                    Style::default().fg(Color::DarkGray),
                ));
            }
            spans.push(Span::styled(format!(" {label} "), *style));
        }

        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };

        let line = Line::from(spans);
        let paragraph = match self.block {
            Some(block) => Paragraph::new(line).block(block),
            None => Paragraph::new(line),
        };
        f.render_widget(paragraph, area);

        // Full outer height so the border rows are tappable too.
        cs.register_bar_targets(
            &widths,
            sep_width,
            inner.x,
            area.y,
            inner.width,
            area.height.max(1),
        );
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Pairs rendered [`Line`]s with click actions.
///
/// Mark lines clickable as you add them, then call
/// [`register_targets`](ClickableList::register_targets) once with the
/// widget area; rows are worked out from line positions.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)` pairs.
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a non-clickable line.
    #[cfg(test)]
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a line bound to `action_id`, wherever it ends up.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register row targets for every clickable line.
    ///
    /// * `area`: the widget area, borders included.
    /// * `top_offset` / `bottom_offset`: rows taken by borders or padding.
    /// * `scroll`: rows scrolled off the top.
    ///
    /// Lines are assumed not to wrap.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        for &(line_idx, action_id) in &self.actions {
            if line_idx < scroll {
                continue;
            }
            let row = content_y + (line_idx - scroll);
            if row >= content_end {
                continue;
            }
            cs.add_row_target(area, row, action_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ClickState;

    // ── ButtonBar tests ────────────────────────────────────────

    #[test]
    fn button_bar_widths_include_padding() {
        let bar = ButtonBar::new(" │ ")
            .button("[C] Click", Style::default(), 0)
            .button("[R] Reset", Style::default(), 500);
        assert_eq!(bar.widths(), vec![(11, 0), (11, 500)]);
    }

    #[test]
    fn button_bar_widths_count_wide_chars() {
        let bar = ButtonBar::new("|").button("💥", Style::default(), 7);
        assert_eq!(bar.widths(), vec![(4, 7)]);
    }

    // ── ClickableList tests ────────────────────────────────────

    #[test]
    fn clickable_list_basic() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("header"));
        cl.push_clickable(Line::from("item 0"), 10);
        cl.push_clickable(Line::from("item 1"), 11);
        cl.push(Line::from("footer"));

        assert_eq!(cl.len(), 4);

        // area with Borders::ALL → top_offset=1, bottom_offset=1
        let area = Rect::new(0, 5, 80, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0);

        // "item 0" is line 1 → row = 5 + 1 + 1 = 7
        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 7), Some(10));
        assert_eq!(cs.hit_test(10, 8), Some(11));
        assert_eq!(cs.hit_test(10, 6), None);
        assert_eq!(cs.hit_test(10, 9), None);
    }

    #[test]
    fn clickable_list_with_scroll() {
        let mut cl = ClickableList::new();
        cl.push_clickable(Line::from("item 0"), 100);
        cl.push_clickable(Line::from("item 1"), 101);
        cl.push_clickable(Line::from("item 2"), 102);
        cl.push_clickable(Line::from("item 3"), 103);

        let area = Rect::new(0, 10, 80, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 1, 2);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 10), Some(102));
        assert_eq!(cs.hit_test(10, 11), Some(103));
        assert_eq!(cs.hit_test(10, 9), None);
    }

    #[test]
    fn clickable_list_clipped_by_area() {
        let mut cl = ClickableList::new();
        for i in 0..6 {
            cl.push_clickable(Line::from(format!("upgrade {}", i)), 100 + i as u16);
        }

        // Only 3 content rows between the borders.
        let area = Rect::new(0, 0, 40, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(10, 1), Some(100));
        assert_eq!(cs.hit_test(10, 3), Some(102));
        assert_eq!(cs.hit_test(10, 4), None);
    }

    #[test]
    fn clickable_list_empty() {
        let cl: ClickableList = ClickableList::new();
        assert_eq!(cl.len(), 0);

        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 0, 80, 10), &mut cs, 1, 1, 0);
        assert!(cs.targets.is_empty());
    }

    #[test]
    fn clickable_list_insert_line_shifts_targets() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("header 1"));
        cl.push(Line::from("header 2"));
        cl.push_clickable(Line::from("buy"), 42);

        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 0, 80, 10), &mut cs, 1, 1, 0);

        assert_eq!(cs.hit_test(10, 3), Some(42));
        assert_eq!(cs.hit_test(10, 2), None);
        assert_eq!(cl.into_lines().len(), 3);
    }
}
