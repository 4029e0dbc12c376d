//! Generated SQL rendering.

use crate::state::{AppState, StyledLine, TextKind, TextStyle};
use crate::ui;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let lines: Vec<Line> = app.answer.sql_lines.iter().map(line_spans).collect();

    let sql = Paragraph::new(lines)
        .style(Style::default().bg(ui::BG_SURFACE))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ui::ACCENT))
                .title(" sql ")
                .style(Style::default().bg(ui::BG_SURFACE)),
        );

    f.render_widget(sql, area);
}

fn line_spans(line: &StyledLine) -> Line<'static> {
    Line::from(
        line.iter()
            .map(|seg| Span::styled(seg.text.clone(), segment_style(seg.style)))
            .collect::<Vec<_>>(),
    )
}

fn segment_style(style: TextStyle) -> Style {
    let mut out = match style.kind {
        TextKind::Normal => Style::default().fg(ui::TEXT_PRIMARY),
        TextKind::Meta => Style::default().fg(ui::TEXT_MUTED),
    };

    if let Some((r, g, b)) = style.fg {
        out = out.fg(Color::Rgb(r, g, b));
    }
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.underline {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    out
}
