//! Header rendering.

use crate::state::AppState;
use crate::ui;
use askdb_core::HealthStatus;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let (status_text, status_color) = match &app.server_status {
        Some(HealthStatus::Online) => ("online", ui::SUCCESS),
        Some(HealthStatus::Degraded(_)) => ("degraded", ui::WARNING),
        Some(HealthStatus::Offline(_)) => ("offline", ui::ERROR),
        None => ("checking…", ui::TEXT_MUTED),
    };

    let sep = Span::styled(" | ", Style::default().fg(ui::TEXT_MUTED));

    let spans = vec![
        Span::styled(
            "askdb",
            Style::default()
                .fg(ui::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " - ask your database",
            Style::default().fg(ui::TEXT_SECONDARY),
        ),
        sep.clone(),
        Span::styled(&app.server_url, Style::default().fg(ui::TEXT_SECONDARY)),
        sep,
        Span::styled("● ", Style::default().fg(status_color)),
        Span::styled(status_text, Style::default().fg(status_color)),
    ];

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ui::BORDER_DIM))
            .style(Style::default().bg(ui::BG_DARK)),
    );

    f.render_widget(header, area);
}
