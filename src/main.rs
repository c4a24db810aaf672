mod console;
mod input;
mod jobs;
mod location;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use input::{is_narrow_layout, pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use jobs::state::JobTable;
use jobs::JobSelector;
use location::BrowserLocation;
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::{Frame, Terminal};
use ratzilla::{DomBackend, WebRenderer};
use time::FrameClock;

/// Query the grid container's bounding rect and convert a pointer position
/// to a terminal cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_x = mouse_x as f64 - rect.left();
    let click_y = mouse_y as f64 - rect.top();

    let col = pixel_x_to_col(click_x, rect.width(), cs.terminal_cols);
    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows);

    console::log(&format!(
        "click: pixel=({mouse_x},{mouse_y}), cell=({col:?},{row:?}), targets={}",
        cs.targets.len()
    ));

    Some((col?, row?))
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let table = JobTable::builtin().unwrap_or_else(|e| {
        console::error(&format!("failed to load job data: {e}"));
        JobTable::default()
    });
    let mut selector = JobSelector::new(table, BrowserLocation);
    selector.mount();

    let selector = Rc::new(RefCell::new(selector));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let selector = selector.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }

            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let matched = cs.hit_test(col, row);
            drop(cs);

            if let Some(action_id) = matched {
                selector
                    .borrow_mut()
                    .handle_input(&InputEvent::Click(action_id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let selector = selector.clone();
        move |key_event| {
            let key = match key_event.code {
                KeyCode::Up => 'k',
                KeyCode::Down => 'j',
                KeyCode::PageUp => 'u',
                KeyCode::PageDown => 'd',
                KeyCode::Char(c) => c,
                _ => return,
            };
            selector.borrow_mut().handle_input(&InputEvent::Key(key));
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        let clock = RefCell::new(FrameClock::new());
        move |f| {
            let mut selector = selector.borrow_mut();
            let size = f.area();
            let elapsed_ms = clock.borrow_mut().update(time::now_ms());

            // Update terminal dimensions and clear click targets
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            // The fragment may have changed through a link or the address bar.
            selector.poll_location();

            let main_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(10),
                    Constraint::Length(3),
                ])
                .split(size);

            render_title(f, main_chunks[0]);
            selector.render(f, main_chunks[1], &click_state, elapsed_ms);
            render_help(f, main_chunks[2]);
        }
    });

    Ok(())
}

fn render_title(f: &mut Frame, area: Rect) {
    let title_block = Paragraph::new(Line::from(Span::styled(
        "Tech Stack - Experience",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(title_block, area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let text = if is_narrow_layout(area.width) {
        "j/k:select d/u:scroll"
    } else {
        "j/k ↑/↓: select  1-9: jump  d/u PgDn/PgUp: scroll  tap detail: scroll"
    };
    let help = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(help, area);
}
