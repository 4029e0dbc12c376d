//! Footer / status bar and error box rendering.

use crate::state::AppState;
use crate::ui;
use askdb_core::table::terminal_safe;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans = vec![
        Span::styled("Enter:", Style::default().fg(ui::PRIMARY)),
        Span::styled(" ask  ", Style::default().fg(ui::TEXT_SECONDARY)),
        Span::styled("Tab:", Style::default().fg(ui::PRIMARY)),
        Span::styled(" focus  ", Style::default().fg(ui::TEXT_SECONDARY)),
    ];

    if app.is_results_focused() {
        spans.extend(vec![
            Span::styled("j/k:", Style::default().fg(ui::PRIMARY)),
            Span::styled(" rows  ", Style::default().fg(ui::TEXT_SECONDARY)),
            Span::styled("h/l:", Style::default().fg(ui::PRIMARY)),
            Span::styled(" cols  ", Style::default().fg(ui::TEXT_SECONDARY)),
        ]);
    }

    spans.extend(vec![
        Span::styled("F1:", Style::default().fg(ui::PRIMARY)),
        Span::styled(" help  ", Style::default().fg(ui::TEXT_SECONDARY)),
        Span::styled("Ctrl-C:", Style::default().fg(ui::PRIMARY)),
        Span::styled(" quit", Style::default().fg(ui::TEXT_SECONDARY)),
    ]);

    if app.loading {
        spans.push(Span::styled("  ", Style::default()));
        spans.push(Span::styled(
            format!("{} waiting for server", ui::spinner_frame()),
            Style::default()
                .fg(ui::WARNING)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let hints = Paragraph::new(Line::from(spans)).style(Style::default().bg(ui::BG_SURFACE));
    f.render_widget(hints, area);
}

/// Error region: server errors, "no results", and connection failures.
pub fn render_error(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(message) = &app.answer.error else {
        return;
    };

    let error = Paragraph::new(Span::styled(
        terminal_safe(message, false),
        Style::default().fg(ui::ERROR).add_modifier(Modifier::BOLD),
    ))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ui::ERROR))
            .style(Style::default().bg(ui::BG_SURFACE)),
    );

    f.render_widget(error, area);
}
