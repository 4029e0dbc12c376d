//! Application state management.

use crate::highlight::SqlHighlighter;
use askdb_core::{HealthStatus, QueryController, QueryRequest, QueryView, ResultTable};

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Main question/answer screen
    Query,
    /// Help overlay
    Help,
}

/// Focus target on the query screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// Question input is focused
    Input,
    /// Ask button is focused
    Button,
    /// Result table is focused
    Results,
}

/// Application state
pub struct AppState {
    /// Current mode
    pub mode: AppMode,
    /// Current focus target
    pub focus: FocusTarget,
    /// Question input
    pub input: InputState,
    /// Rendered answer regions
    pub answer: AnswerState,
    /// Whether the Ask button accepts activation
    pub submit_enabled: bool,
    /// Whether the loading indicator is shown
    pub loading: bool,
    /// Server the worker talks to
    pub server_url: String,
    /// Latest health check, `None` until the first one completes
    pub server_status: Option<HealthStatus>,
    /// Id of the request whose answer is awaited
    pub pending_request: Option<u64>,
    next_request_id: u64,
    /// Whether to quit
    pub should_quit: bool,
    /// Cells wider than this are truncated
    pub max_cell_width: usize,
    highlighter: SqlHighlighter,
}

impl AppState {
    /// Create a new application state
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            mode: AppMode::Query,
            focus: FocusTarget::Input,
            input: InputState::new(),
            answer: AnswerState::new(),
            submit_enabled: true,
            loading: false,
            server_url: server_url.into(),
            server_status: None,
            pending_request: None,
            next_request_id: 0,
            should_quit: false,
            max_cell_width: askdb_core::config::TuiConfig::default().max_cell_width,
            highlighter: SqlHighlighter::new(),
        }
    }

    /// Check if should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            AppMode::Help => AppMode::Query,
            AppMode::Query => AppMode::Help,
        };
    }

    /// Cycle focus: input → button → results → input.
    ///
    /// Results are skipped while no table is shown.
    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusTarget::Input => FocusTarget::Button,
            FocusTarget::Button if self.answer.table_visible => FocusTarget::Results,
            FocusTarget::Button | FocusTarget::Results => FocusTarget::Input,
        };
    }

    pub fn is_input_focused(&self) -> bool {
        self.focus == FocusTarget::Input
    }

    pub fn is_button_focused(&self) -> bool {
        self.focus == FocusTarget::Button
    }

    pub fn is_results_focused(&self) -> bool {
        self.focus == FocusTarget::Results
    }

    /// Start a submission from the current input.
    ///
    /// Honors the disabled Ask button; the controller itself does not guard
    /// against overlapping submissions. Returns the request id and body for
    /// the worker.
    pub fn submit(&mut self, controller: &mut QueryController) -> Option<(u64, QueryRequest)> {
        if !self.submit_enabled {
            tracing::debug!("submit ignored while a question is in flight");
            return None;
        }

        let request = controller.begin(self)?;
        self.next_request_id += 1;
        self.pending_request = Some(self.next_request_id);
        Some((self.next_request_id, request))
    }

    /// Apply an answer from the worker. Answers to superseded requests are
    /// dropped.
    pub fn complete(
        &mut self,
        controller: &mut QueryController,
        id: u64,
        result: askdb_core::Result<askdb_core::QueryResponse>,
    ) -> bool {
        if self.pending_request != Some(id) {
            tracing::debug!(id, pending = ?self.pending_request, "dropping stale answer");
            return false;
        }
        self.pending_request = None;

        let outcome = controller.finish(self, result);
        if outcome.is_failure() && self.focus == FocusTarget::Results {
            self.focus = FocusTarget::Input;
        }
        true
    }
}

impl QueryView for AppState {
    fn question(&self) -> String {
        self.input.text.clone()
    }

    fn show_error(&mut self, message: &str) {
        self.answer.error = Some(message.to_string());
    }

    fn hide_error(&mut self) {
        self.answer.error = None;
    }

    fn show_sql(&mut self, sql: &str) {
        self.answer.sql_lines = self.highlighter.highlight(sql);
        self.answer.sql = Some(sql.to_string());
    }

    fn hide_sql(&mut self) {
        self.answer.sql = None;
        self.answer.sql_lines.clear();
    }

    fn show_table(&mut self, table: &ResultTable) {
        self.answer.table = table.clone();
        self.answer.table_visible = true;
        self.answer.selected_row = 0;
        self.answer.scroll_offset = 0;
        self.answer.column_offset = 0;
    }

    fn hide_table(&mut self) {
        self.answer.table_visible = false;
        if self.focus == FocusTarget::Results {
            self.focus = FocusTarget::Input;
        }
    }

    fn clear_table(&mut self) {
        self.answer.table = ResultTable::default();
        self.answer.selected_row = 0;
        self.answer.scroll_offset = 0;
        self.answer.column_offset = 0;
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

/// Question input with a char-indexed cursor.
pub struct InputState {
    pub text: String,
    /// Cursor position in chars
    pub cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
        }
    }

    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Add character at cursor
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Remove character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.text.remove(at);
            self.cursor -= 1;
        }
    }

    /// Remove character under cursor
    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.text.chars().count() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.text.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    /// Text before the cursor, for placing the terminal cursor.
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.byte_index(self.cursor)]
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Display regions filled in by the controller.
pub struct AnswerState {
    /// Error region text, `None` when hidden
    pub error: Option<String>,
    /// Generated SQL, `None` when the SQL box is hidden
    pub sql: Option<String>,
    /// Highlighted SQL lines
    pub sql_lines: Vec<StyledLine>,
    /// Result table contents
    pub table: ResultTable,
    pub table_visible: bool,
    /// Selected row in the table
    pub selected_row: usize,
    /// First row shown in the viewport
    pub scroll_offset: usize,
    /// First column shown in the viewport
    pub column_offset: usize,
    /// Rows that fit in the viewport (updated on render)
    pub viewport_height: usize,
}

impl AnswerState {
    pub fn new() -> Self {
        Self {
            error: None,
            sql: None,
            sql_lines: Vec::new(),
            table: ResultTable::default(),
            table_visible: false,
            selected_row: 0,
            scroll_offset: 0,
            column_offset: 0,
            viewport_height: 0,
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected_row < self.table.row_count().saturating_sub(1) {
            self.selected_row += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_row = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_row = self.table.row_count().saturating_sub(1);
    }

    pub fn page_down(&mut self) {
        let step = self.viewport_height.max(1);
        self.selected_row =
            (self.selected_row + step).min(self.table.row_count().saturating_sub(1));
    }

    pub fn page_up(&mut self) {
        let step = self.viewport_height.max(1);
        self.selected_row = self.selected_row.saturating_sub(step);
    }

    pub fn scroll_columns_left(&mut self) {
        self.column_offset = self.column_offset.saturating_sub(1);
    }

    pub fn scroll_columns_right(&mut self) {
        if self.column_offset + 1 < self.table.columns.len() {
            self.column_offset += 1;
        }
    }

    /// Update scroll offset to keep selection visible
    pub fn update_scroll(&mut self) {
        let total_rows = self.table.row_count().max(1);
        let selected = self.selected_row.min(total_rows - 1);

        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + self.viewport_height {
            self.scroll_offset = selected + 1 - self.viewport_height.max(1);
        }
    }
}

impl Default for AnswerState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextKind {
    #[default]
    Normal,
    Meta,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextStyle {
    pub kind: TextKind,
    pub fg: Option<(u8, u8, u8)>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

#[derive(Debug, Clone)]
pub struct StyledSegment {
    pub text: String,
    pub style: TextStyle,
}

pub type StyledLine = Vec<StyledSegment>;
