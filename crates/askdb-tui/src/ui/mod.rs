//! UI components and rendering.

pub mod footer;
pub mod header;
pub mod overlays;
pub mod question_input;
pub mod result_table;
pub mod sql_box;
pub mod theme;

pub use theme::*;

use crate::state::{AppMode, AppState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Tallest the SQL box grows before it scrolls off.
const MAX_SQL_HEIGHT: u16 = 8;

/// Render the whole screen.
pub fn render(f: &mut Frame, app: &mut AppState) {
    let sql_height = if app.answer.sql.is_some() {
        (app.answer.sql_lines.len() as u16 + 2).min(MAX_SQL_HEIGHT)
    } else {
        0
    };
    let error_height = if app.answer.error.is_some() { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Length(3),            // Question + Ask button
            Constraint::Length(sql_height),   // SQL box
            Constraint::Length(error_height), // Error box
            Constraint::Min(0),               // Result table
            Constraint::Length(1),            // Status bar
        ])
        .split(f.area());

    header::render(f, chunks[0], app);
    question_input::render(f, chunks[1], app);
    if sql_height > 0 {
        sql_box::render(f, chunks[2], app);
    }
    if error_height > 0 {
        footer::render_error(f, chunks[3], app);
    }
    result_table::render(f, chunks[4], app);
    footer::render(f, chunks[5], app);

    if app.mode == AppMode::Help {
        overlays::render_help(f);
    }
}

/// Helper to create centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
