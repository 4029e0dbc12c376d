//! Console view: collects what the controller shows and prints it once.

use askdb_core::table::{terminal_safe, truncate_to_width};
use askdb_core::{QueryView, ResultTable};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::{IsTerminal, Write};
use unicode_width::UnicodeWidthStr;

/// Output format for `askdb ask`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Boxed table with the SQL above it
    Table,
    /// One JSON object
    Json,
    /// Tab-separated rows, header first
    Plain,
}

/// Widest a table cell gets before it is cut.
const MAX_CELL_WIDTH: usize = 60;

/// [`QueryView`] for a one-shot terminal run.
pub struct ConsoleView {
    question: String,
    error: Option<String>,
    sql: Option<String>,
    table: Option<ResultTable>,
    /// Print a progress note to stderr while waiting.
    progress: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    sql: Option<&'a str>,
    columns: &'a [String],
    rows: &'a [Vec<String>],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl ConsoleView {
    pub fn new(question: &str) -> Self {
        Self {
            question: question.to_string(),
            error: None,
            sql: None,
            table: None,
            progress: false,
        }
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Render everything shown so far in `format`.
    pub fn render(&self, format: OutputFormat, color: bool) -> String {
        match format {
            OutputFormat::Table => self.render_table(color),
            OutputFormat::Json => self.render_json(),
            OutputFormat::Plain => self.render_plain(),
        }
    }

    fn render_table(&self, color: bool) -> String {
        let mut out = String::new();

        if let Some(sql) = &self.sql {
            let sql = terminal_safe(sql, true);
            if color {
                out.push_str(&format!("{} {}\n", "SQL".bold().magenta(), sql.bright_white()));
            } else {
                out.push_str(&format!("SQL {sql}\n"));
            }
        }

        if let Some(table) = &self.table {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&boxed_table(table, color));
            out.push_str(&format!(
                "({} row{})\n",
                table.row_count(),
                if table.row_count() == 1 { "" } else { "s" }
            ));
        }

        if let Some(error) = &self.error {
            let error = terminal_safe(error, true);
            if color {
                out.push_str(&format!("{}\n", error.red().bold()));
            } else {
                out.push_str(&format!("{error}\n"));
            }
        }

        out
    }

    fn render_json(&self) -> String {
        let empty = ResultTable::default();
        let table = self.table.as_ref().unwrap_or(&empty);
        let output = JsonOutput {
            success: self.sql.is_some(),
            sql: self.sql.as_deref(),
            columns: &table.columns,
            rows: &table.rows,
            error: self.error.as_deref(),
        };
        // Serializing plain strings cannot fail.
        let mut json = serde_json::to_string_pretty(&output).unwrap_or_default();
        json.push('\n');
        json
    }

    fn render_plain(&self) -> String {
        let mut out = String::new();
        if let Some(table) = &self.table {
            let table = safe_table(table);
            out.push_str(&table.columns.join("\t"));
            out.push('\n');
            for row in &table.rows {
                out.push_str(&row.join("\t"));
                out.push('\n');
            }
        }
        out
    }
}

impl QueryView for ConsoleView {
    fn question(&self) -> String {
        self.question.clone()
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn hide_error(&mut self) {
        self.error = None;
    }

    fn show_sql(&mut self, sql: &str) {
        self.sql = Some(sql.to_string());
    }

    fn hide_sql(&mut self) {
        self.sql = None;
    }

    fn show_table(&mut self, table: &ResultTable) {
        self.table = Some(table.clone());
    }

    fn hide_table(&mut self) {
        self.table = None;
    }

    fn clear_table(&mut self) {
        self.table = None;
    }

    // One question per run; there is no control to disable.
    fn set_submit_enabled(&mut self, _enabled: bool) {}

    fn set_loading(&mut self, loading: bool) {
        if !self.progress {
            return;
        }
        let mut stderr = std::io::stderr();
        if !stderr.is_terminal() {
            return;
        }
        // Progress is cosmetic; write failures are ignored.
        if loading {
            let _ = write!(stderr, "{}", "asking…".dimmed());
        } else {
            let _ = write!(stderr, "\r\x1b[2K");
        }
        let _ = stderr.flush();
    }
}

/// Copy of `table` with every header and cell flattened to one safe line.
fn safe_table(table: &ResultTable) -> ResultTable {
    let line = |text: &String| terminal_safe(text, false);
    ResultTable {
        columns: table.columns.iter().map(line).collect(),
        rows: table
            .rows
            .iter()
            .map(|row| row.iter().map(line).collect())
            .collect(),
    }
}

fn boxed_table(table: &ResultTable, color: bool) -> String {
    let table = &safe_table(table);
    let widths = table.column_widths(MAX_CELL_WIDTH);

    let border = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}\n", segments.join(mid))
    };

    let line = |cells: &[String], header: bool| {
        let mut out = String::from("│");
        for (i, width) in widths.iter().enumerate() {
            let text = truncate_to_width(cells.get(i).map(String::as_str).unwrap_or(""), *width);
            let pad = width.saturating_sub(text.width());
            let text = if header && color {
                text.bold().cyan().to_string()
            } else {
                text
            };
            out.push_str(&format!(" {text}{} │", " ".repeat(pad)));
        }
        out.push('\n');
        out
    };

    let mut out = border("┌", "┬", "┐");
    out.push_str(&line(&table.columns, true));
    out.push_str(&border("├", "┼", "┤"));
    for row in &table.rows {
        out.push_str(&line(row, false));
    }
    out.push_str(&border("└", "┴", "┘"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answered() -> ConsoleView {
        let mut view = ConsoleView::new("top products");
        view.show_sql("SELECT ProductName, Price FROM Products");
        view.show_table(&ResultTable {
            columns: vec!["ProductName".into(), "Price".into()],
            rows: vec![
                vec!["Laptop".into(), "1200".into()],
                vec!["Mouse".into(), "25.5".into()],
            ],
        });
        view
    }

    #[test]
    fn table_format_draws_aligned_box() {
        let out = answered().render(OutputFormat::Table, false);
        let expected = "\
SQL SELECT ProductName, Price FROM Products

┌─────────────┬───────┐
│ ProductName │ Price │
├─────────────┼───────┤
│ Laptop      │ 1200  │
│ Mouse       │ 25.5  │
└─────────────┴───────┘
(2 rows)
";
        assert_eq!(out, expected);
    }

    #[test]
    fn table_format_shows_error_only() {
        let mut view = ConsoleView::new("q");
        view.show_error("bad syntax");
        assert_eq!(view.render(OutputFormat::Table, false), "bad syntax\n");
    }

    #[test]
    fn json_format_carries_columns_and_rows() {
        let out = answered().render(OutputFormat::Json, false);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["columns"], serde_json::json!(["ProductName", "Price"]));
        assert_eq!(value["rows"][1][0], "Mouse");
        assert!(value.get("error").is_none());

        let mut failed = ConsoleView::new("q");
        failed.show_error("Failed to connect to server.");
        let value: serde_json::Value =
            serde_json::from_str(&failed.render(OutputFormat::Json, false)).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Failed to connect to server.");
    }

    #[test]
    fn plain_format_is_tab_separated() {
        let mut view = answered();
        view.show_table(&ResultTable {
            columns: vec!["a".into(), "b".into()],
            rows: vec![vec!["x\ty".into(), "z".into()]],
        });
        assert_eq!(view.render(OutputFormat::Plain, false), "a\tb\nx    y\tz\n");
    }

    #[test]
    fn server_text_cannot_reach_the_terminal_raw() {
        let mut view = ConsoleView::new("q");
        view.show_sql("SELECT 1\u{1b}[2J");
        view.show_table(&ResultTable {
            columns: vec!["n".into()],
            rows: vec![vec!["two\nlines".into()], vec!["\u{1b}]0;x\u{7}".into()]],
        });
        view.show_error("boom\u{1b}[31m");

        let out = view.render(OutputFormat::Table, false);
        assert!(!out.contains('\u{1b}'));
        assert!(!out.contains('\u{7}'));
        assert!(out.contains("│ two lines │"));
        assert!(out.contains("boom\u{fffd}[31m"));

        let plain = view.render(OutputFormat::Plain, false);
        assert_eq!(plain, "n\ntwo lines\n\u{fffd}]0;x\u{fffd}\n");
    }
}
