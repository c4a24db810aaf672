//! Experience section rendering: job list on one side, detail pane on the other.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;
use tachyonfx::{fx, Duration, Effect, Interpolation};

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{scroll_to_show, ClickableList};

use super::actions::*;
use super::markup;
use super::sanitize::SafeHtml;
use super::state::{JobRecord, JobTable};
use super::tenure::{year_span, Tenure};

/// Lines per list entry (years, tenure, company).
const ENTRY_HEIGHT: u16 = 3;
const LIST_WIDTH: u16 = 34;
const TRANSITION_MS: u32 = 300;

/// Scroll positions and the running transition; owned by the selector,
/// updated on every frame.
pub struct View {
    pub list_scroll: u16,
    pub detail_scroll: u16,
    /// Largest useful `detail_scroll` as of the last frame.
    pub detail_max_scroll: u16,
    pub transition: Option<Effect>,
}

impl View {
    pub fn new() -> Self {
        Self {
            list_scroll: 0,
            detail_scroll: 0,
            detail_max_scroll: 0,
            transition: None,
        }
    }

    /// A different job is on screen: start at its top and fade it in.
    pub fn selection_changed(&mut self) {
        self.detail_scroll = 0;
        self.transition = Some(fx::fade_from_fg(
            Color::Black,
            (TRANSITION_MS, Interpolation::QuadOut),
        ));
    }

    pub fn scroll_detail(&mut self, delta: i32) {
        let next = (self.detail_scroll as i32 + delta).clamp(0, self.detail_max_scroll as i32);
        self.detail_scroll = next as u16;
    }
}

#[allow(clippy::too_many_arguments)]
pub fn render(
    table: &JobTable,
    selected: Option<usize>,
    responsibilities: &SafeHtml,
    view: &mut View,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
    elapsed_ms: u32,
) {
    let is_narrow = is_narrow_layout(area.width);
    let borders = if is_narrow {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };

    let chunks = if is_narrow {
        let entries = u16::try_from(table.len().max(1)).unwrap_or(u16::MAX);
        let wanted = entries.saturating_mul(ENTRY_HEIGHT + 1).saturating_add(1);
        let list_height = wanted.min(area.height / 2).max(ENTRY_HEIGHT + 2);
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(list_height), Constraint::Min(5)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(LIST_WIDTH), Constraint::Min(20)])
            .split(area)
    };

    let job = selected.and_then(|i| table.get(i));
    let mut cs = click_state.borrow_mut();
    render_list(table, selected, view, f, chunks[0], borders, &mut cs);
    render_detail(job, responsibilities, view, f, chunks[1], borders, &mut cs, elapsed_ms);
}

// ── Job list ───────────────────────────────────────────────────────────

/// List lines for every job; each entry's lines share one click action.
pub fn list_lines(table: &JobTable, selected: Option<usize>) -> ClickableList<'static> {
    let mut cl = ClickableList::new();
    if table.is_empty() {
        cl.push(Line::from(Span::styled(
            " No entries.",
            Style::default().fg(Color::DarkGray),
        )));
        return cl;
    }

    for (i, job) in table.iter().enumerate() {
        if i > 0 {
            cl.push(Line::from(""));
        }
        let is_selected = selected == Some(i);
        let (marker, base) = if is_selected {
            ("▶ ", Style::default().fg(Color::Black).bg(Color::Cyan))
        } else {
            ("  ", Style::default().fg(Color::White))
        };
        let action = select_job_action(i);
        let tenure = Tenure::between(job.start_date, job.end_date);

        cl.push_clickable(
            Line::from(vec![
                Span::raw(marker),
                Span::styled(
                    year_span(job.start_date, job.end_date),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ])
            .style(base),
            action,
        );
        cl.push_clickable(
            Line::from(Span::styled(
                format!("  {tenure}"),
                if is_selected { base } else { base.fg(Color::DarkGray) },
            ))
            .style(base),
            action,
        );
        cl.push_clickable(
            Line::from(format!("  {}", job.company)).style(base),
            action,
        );
    }
    cl
}

fn render_list(
    table: &JobTable,
    selected: Option<usize>,
    view: &mut View,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Experience ");
    let inner = block.inner(area);
    let cl = list_lines(table, selected);

    if let Some(first) = selected.and_then(|i| cl.first_line_of(select_job_action(i))) {
        view.list_scroll = scroll_to_show(view.list_scroll, first, ENTRY_HEIGHT, inner.height);
    }
    let max_scroll = (cl.len() as u16).saturating_sub(inner.height);
    view.list_scroll = view.list_scroll.min(max_scroll);

    let top = inner.y - area.y;
    let bottom = (area.y + area.height) - (inner.y + inner.height);
    cl.register_targets(area, cs, top, bottom, view.list_scroll);

    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .scroll((view.list_scroll, 0));
    f.render_widget(widget, area);
}

// ── Detail pane ────────────────────────────────────────────────────────

/// Everything the detail pane shows for `job`, markup already rendered.
pub fn detail_lines(job: Option<&JobRecord>, responsibilities: &SafeHtml) -> Vec<Line<'static>> {
    let Some(job) = job else {
        return vec![Line::from(Span::styled(
            "Select an entry to see details.",
            Style::default().fg(Color::DarkGray),
        ))];
    };

    let mut lines = vec![
        Line::from(Span::styled(
            job.position.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(markup::to_lines(responsibilities));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tech Stacks:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.extend(job.tech_stack.iter().map(|tech| {
        Line::from(Span::styled(
            format!("  • {tech}"),
            Style::default().fg(Color::Gray),
        ))
    }));
    lines
}

#[allow(clippy::too_many_arguments)]
fn render_detail(
    job: Option<&JobRecord>,
    responsibilities: &SafeHtml,
    view: &mut View,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
    elapsed_ms: u32,
) {
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Green))
        .title(" Details ");
    let inner = block.inner(area);

    let paragraph = Paragraph::new(detail_lines(job, responsibilities)).wrap(Wrap { trim: false });
    let total = paragraph.line_count(inner.width) as u16;
    view.detail_max_scroll = total.saturating_sub(inner.height);
    view.detail_scroll = view.detail_scroll.min(view.detail_max_scroll);

    f.render_widget(
        paragraph.block(block).scroll((view.detail_scroll, 0)),
        area,
    );

    if view.detail_max_scroll > 0 {
        let upper = inner.height / 2;
        cs.add_click_target(
            Rect::new(inner.x, inner.y, inner.width, upper),
            SCROLL_DETAIL_UP,
        );
        cs.add_click_target(
            Rect::new(inner.x, inner.y + upper, inner.width, inner.height - upper),
            SCROLL_DETAIL_DOWN,
        );
    }

    if let Some(effect) = view.transition.as_mut() {
        effect.process(Duration::from_millis(elapsed_ms), f.buffer_mut(), inner);
        if effect.done() {
            view.transition = None;
        }
    }
}
