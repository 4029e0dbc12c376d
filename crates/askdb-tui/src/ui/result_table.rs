//! Result table rendering.

use crate::state::AppState;
use crate::ui;
use askdb_core::table::{terminal_safe, truncate_to_width};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

/// Space between columns.
const COLUMN_SPACING: u16 = 2;

pub fn render(f: &mut Frame, area: Rect, app: &mut AppState) {
    let border_style = if app.is_results_focused() {
        Style::default().fg(ui::BORDER_FOCUS)
    } else {
        Style::default().fg(ui::BORDER_DIM)
    };

    if !app.answer.table_visible {
        render_placeholder(f, area, app, border_style);
        return;
    }

    // Header row and borders take three lines.
    let viewport_height = area.height.saturating_sub(3) as usize;
    app.answer.viewport_height = viewport_height.max(1);
    app.answer.update_scroll();

    let answer = &app.answer;
    let table = &answer.table;
    let max_width = app.max_cell_width;
    let first_col = answer.column_offset.min(table.columns.len().saturating_sub(1));

    let widths: Vec<Constraint> = table.column_widths(max_width)[first_col..]
        .iter()
        .map(|w| Constraint::Length((*w).max(1) as u16))
        .collect();

    let header = Row::new(
        table.columns[first_col..]
            .iter()
            .map(|name| display_cell(name, max_width)),
    )
    .style(
        Style::default()
            .fg(ui::PRIMARY)
            .add_modifier(Modifier::BOLD),
    );

    let start = answer.scroll_offset.min(table.row_count());
    let end = (start + viewport_height).min(table.row_count());

    let rows: Vec<Row> = table.rows[start..end]
        .iter()
        .enumerate()
        .map(|(i, cells)| {
            let selected = start + i == answer.selected_row && app.is_results_focused();
            let style = if selected {
                Style::default().bg(ui::BG_ELEVATED).fg(ui::TEXT_PRIMARY)
            } else {
                Style::default().fg(ui::TEXT_PRIMARY)
            };
            Row::new(
                cells[first_col.min(cells.len())..]
                    .iter()
                    .map(|cell| display_cell(cell, max_width)),
            )
            .style(style)
        })
        .collect();

    let hidden = if first_col > 0 {
        format!("  ◂ {first_col} cols")
    } else {
        String::new()
    };
    let title = format!(
        "result ({} rows, {} cols){hidden}",
        table.row_count(),
        table.columns.len()
    );

    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title)
                .style(Style::default().bg(ui::BG_SURFACE)),
        );

    f.render_widget(widget, area);
}

fn display_cell(text: &str, max_width: usize) -> Cell<'static> {
    Cell::from(truncate_to_width(&terminal_safe(text, false), max_width))
}

fn render_placeholder(f: &mut Frame, area: Rect, app: &AppState, border_style: Style) {
    let text = if app.loading {
        Line::styled(
            format!("{} asking the server…", ui::spinner_frame()),
            Style::default()
                .fg(ui::TEXT_SECONDARY)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Line::styled(
            "Type a question and press Enter.",
            Style::default().fg(ui::TEXT_MUTED),
        )
    };

    let placeholder = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("result")
            .style(Style::default().bg(ui::BG_SURFACE)),
    );

    f.render_widget(placeholder, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use askdb_core::{QueryController, QueryView, ResultTable};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let mut out = String::new();
        for (i, cell) in buffer.content.iter().enumerate() {
            out.push_str(cell.symbol());
            if (i + 1) % width == 0 {
                out.push('\n');
            }
        }
        out
    }

    #[test]
    fn renders_header_and_cells() {
        let mut app = AppState::new("http://localhost:8000");
        let mut controller = QueryController::new();
        app.input.set("q");
        controller.begin(&mut app);
        app.show_table(&ResultTable {
            columns: vec!["FullName".into(), "Country".into()],
            rows: vec![vec!["Asha Rao".into(), "India".into()]],
        });

        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal
            .draw(|f| render(f, f.area(), &mut app))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("FullName"));
        assert!(text.contains("Asha Rao"));
        assert!(text.contains("result (1 rows, 2 cols)"));
    }

    #[test]
    fn hidden_table_shows_placeholder() {
        let mut app = AppState::new("http://localhost:8000");
        let mut terminal = Terminal::new(TestBackend::new(60, 5)).unwrap();
        terminal
            .draw(|f| render(f, f.area(), &mut app))
            .unwrap();

        assert!(screen_text(&terminal).contains("Type a question"));
    }
}
