//! Question input and Ask button rendering.

use crate::state::AppState;
use crate::ui;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const PROMPT: &str = "Ask: ";
const BUTTON_WIDTH: u16 = 12;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(BUTTON_WIDTH)])
        .split(area);

    render_input(f, chunks[0], app);
    render_button(f, chunks[1], app);
}

fn render_input(f: &mut Frame, area: Rect, app: &AppState) {
    let is_focused = app.is_input_focused();

    let border_style = if is_focused {
        Style::default().fg(ui::BORDER_FOCUS)
    } else {
        Style::default().fg(ui::BORDER_DIM)
    };

    let body = if app.input.text.is_empty() && !is_focused {
        Span::styled(
            "e.g. top 3 most expensive products",
            Style::default().fg(ui::TEXT_MUTED),
        )
    } else {
        Span::styled(&app.input.text, Style::default().fg(ui::TEXT_PRIMARY))
    };

    let input = Paragraph::new(Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(ui::PRIMARY)),
        body,
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(if is_focused {
                Style::default().bg(ui::BG_ELEVATED)
            } else {
                Style::default().bg(ui::BG_SURFACE)
            }),
    );

    f.render_widget(input, area);

    if is_focused {
        // Cursor position: 1 (border) + prompt + text before cursor
        let offset = 1 + PROMPT.width() + app.input.before_cursor().width();
        let cursor_x = (area.x + offset as u16).min(area.right().saturating_sub(2));
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn render_button(f: &mut Frame, area: Rect, app: &AppState) {
    let label = if app.loading {
        format!("{} Asking", ui::spinner_frame())
    } else {
        "Ask".to_string()
    };

    let text_style = if app.submit_enabled {
        Style::default()
            .fg(ui::ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(ui::TEXT_MUTED)
            .add_modifier(Modifier::DIM)
    };

    let border_style = if app.is_button_focused() {
        Style::default().fg(ui::BORDER_FOCUS)
    } else {
        Style::default().fg(ui::BORDER_DIM)
    };

    let button = Paragraph::new(Span::styled(label, text_style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .style(Style::default().bg(ui::BG_SURFACE)),
        );

    f.render_widget(button, area);
}
