//! Clickable list builder.
//!
//! Pairs rendered [`Line`]s with click actions so that click target rows
//! follow the lines they belong to, instead of being computed by hand.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;

use crate::input::ClickState;

/// A builder that pairs rendered [`Line`]s with click actions.
///
/// # Example
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from(""));
/// cl.push_clickable(Line::from("Acme"), SELECT_JOB_BASE);
/// cl.register_targets(area, &mut cs, 1, 1, 0);
/// let widget = Paragraph::new(cl.into_lines()).block(block);
/// f.render_widget(widget, area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(index into lines, action_id)`.
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
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a clickable line with a semantic action ID.
    ///
    /// The action is bound to whatever row this line ends up on.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Index of the first line bound to `action_id`.
    pub fn first_line_of(&self, action_id: u16) -> Option<u16> {
        self.actions
            .iter()
            .find(|&&(_, id)| id == action_id)
            .map(|&(idx, _)| idx)
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register click targets for all visible clickable lines.
    ///
    /// * `area`: the widget area (including borders).
    /// * `top_offset` / `bottom_offset`: rows taken by borders above/below content.
    /// * `scroll`: vertical scroll offset in lines. Each line is one row; the
    ///   list is rendered without wrapping.
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

/// Scroll offset that keeps lines `first..first + height` visible in a
/// viewport of `viewport` rows, moving as little as possible from `current`.
pub fn scroll_to_show(current: u16, first: u16, height: u16, viewport: u16) -> u16 {
    if viewport == 0 {
        return current;
    }
    if first < current {
        return first;
    }
    let last = first + height.max(1);
    if last > current + viewport {
        return last.saturating_sub(viewport).min(first);
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two job entries of three lines each with a blank separator.
    fn two_entries() -> ClickableList<'static> {
        let mut cl = ClickableList::new();
        for (i, company) in ["Acme", "Globex"].into_iter().enumerate() {
            if i > 0 {
                cl.push(Line::from(""));
            }
            let id = 100 + i as u16;
            cl.push_clickable(Line::from("2020 - 2021"), id);
            cl.push_clickable(Line::from("1 yr 2 mos"), id);
            cl.push_clickable(Line::from(company), id);
        }
        cl
    }

    #[test]
    fn targets_follow_bordered_block() {
        let cl = two_entries();
        assert_eq!(cl.len(), 7);

        // Borders::ALL at y=3: content starts on row 4.
        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 3, 34, 12), &mut cs, 1, 1, 0);

        assert_eq!(cs.targets.len(), 6);
        assert_eq!(cs.hit_test(5, 3), None);
        assert_eq!(cs.hit_test(5, 4), Some(100));
        assert_eq!(cs.hit_test(5, 6), Some(100));
        assert_eq!(cs.hit_test(5, 7), None);
        assert_eq!(cs.hit_test(5, 8), Some(101));
        assert_eq!(cs.hit_test(34, 8), None);
    }

    #[test]
    fn scrolled_out_lines_lose_targets() {
        let cl = two_entries();
        // Short pane scrolled past the first entry.
        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 0, 40, 6), &mut cs, 1, 1, 4);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(2, 0), None);
        assert_eq!(cs.hit_test(2, 1), Some(101));
        assert_eq!(cs.hit_test(2, 3), Some(101));
    }

    #[test]
    fn lines_below_viewport_lose_targets() {
        let cl = two_entries();
        // Four content rows show the first entry and the separator.
        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 0, 40, 6), &mut cs, 1, 1, 0);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(2, 3), Some(100));
        assert_eq!(cs.hit_test(2, 5), None);
    }

    #[test]
    fn multi_line_entry_shares_action() {
        let mut cl = ClickableList::new();
        for _ in 0..3 {
            cl.push_clickable(Line::from("entry line"), 7);
        }
        cl.push(Line::from(""));
        cl.push_clickable(Line::from("next"), 8);

        let area = Rect::new(0, 0, 30, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0);

        assert_eq!(cs.hit_test(3, 1), Some(7));
        assert_eq!(cs.hit_test(3, 3), Some(7));
        assert_eq!(cs.hit_test(3, 4), None);
        assert_eq!(cs.hit_test(3, 5), Some(8));
        assert_eq!(cl.first_line_of(8), Some(4));
        assert_eq!(cl.first_line_of(9), None);
    }

    #[test]
    fn empty_list_registers_nothing() {
        let cl = ClickableList::new();
        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 0, 34, 10), &mut cs, 1, 1, 0);
        assert!(cs.targets.is_empty());
        assert!(cl.into_lines().is_empty());
    }

    #[test]
    fn scroll_to_show_moves_minimally() {
        // Already visible → unchanged.
        assert_eq!(scroll_to_show(0, 2, 3, 10), 0);
        // Above the viewport → scroll up to it.
        assert_eq!(scroll_to_show(8, 4, 3, 5), 4);
        // Below the viewport → bottom-align it.
        assert_eq!(scroll_to_show(0, 8, 3, 5), 6);
        // Taller than the viewport → top-align it.
        assert_eq!(scroll_to_show(0, 8, 6, 4), 8);
        // No viewport → keep whatever we had.
        assert_eq!(scroll_to_show(3, 8, 3, 0), 3);
    }
}
