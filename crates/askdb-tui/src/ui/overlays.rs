//! Overlay rendering.

use crate::ui;
use ratatui::{
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render_help(f: &mut Frame) {
    let help_text = [
        "askdb-tui - ask your database in plain language",
        "",
        "Focus:",
        "  Tab           Cycle focus (question / Ask / result)",
        "  ↓ (in input)  Move to result table",
        "  ↑ (at top)    Move to question",
        "",
        "Question:",
        "  Enter         Ask",
        "  ←/→ Home/End  Move cursor",
        "  Esc / Ctrl+U  Clear question",
        "",
        "Ask button:",
        "  Enter / Space Ask",
        "",
        "Result table:",
        "  j / ↓         Down",
        "  k / ↑         Up",
        "  g / G         Top / Bottom",
        "  PgUp / PgDn   Page",
        "  h / l         Scroll columns",
        "",
        "  F1 / ?        Toggle this help",
        "  Ctrl+C        Quit",
        "",
        "Press Esc to close",
    ];

    let help = Paragraph::new(help_text.join("\n"))
        .style(Style::default().fg(ui::TEXT_PRIMARY).bg(ui::BG_DARK))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ui::PRIMARY))
                .title(" Help ")
                .style(Style::default().bg(ui::BG_DARK)),
        );

    let area = ui::centered_rect(60, 80, f.area());
    f.render_widget(Clear, area);
    f.render_widget(help, area);
}
