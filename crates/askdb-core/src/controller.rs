//! Query UI controller: one question, one request, one rendered answer.
//!
//! The controller never owns the display. Front ends hand it a [`QueryView`]
//! (the terminal UI state, the CLI console, a test recorder) and a
//! [`QueryTransport`], and it drives a single submission through them:
//!
//! 1. [`QueryController::begin`] reads and trims the question, resets every
//!    display region and enters the loading state.
//! 2. The caller awaits the transport (directly, or on a worker thread).
//! 3. [`QueryController::finish`] renders the outcome and always leaves the
//!    view ready for the next question.

use crate::client::QueryTransport;
use crate::protocol::{QueryRequest, QueryResponse};
use crate::table::ResultTable;
use crate::Error;
use tracing::{debug, info, warn};

/// Shown when the query succeeded but returned no rows.
pub const NO_RESULTS_MESSAGE: &str = "No results found for your query.";

/// Shown when the server reports failure without a message.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred.";

/// Shown for every transport failure.
pub const CONNECT_ERROR_MESSAGE: &str = "Failed to connect to server.";

/// Display surface driven by the controller.
pub trait QueryView {
    /// Current contents of the question input.
    fn question(&self) -> String;

    fn show_error(&mut self, message: &str);
    fn hide_error(&mut self);

    /// Show generated SQL verbatim in the read-only SQL region.
    fn show_sql(&mut self, sql: &str);
    fn hide_sql(&mut self);

    fn show_table(&mut self, table: &ResultTable);
    fn hide_table(&mut self);
    /// Drop any previously rendered header and rows.
    fn clear_table(&mut self);

    fn set_submit_enabled(&mut self, enabled: bool);
    fn set_loading(&mut self, loading: bool);
}

/// Why a submission ended without a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFailure {
    /// The server answered with `success: false`.
    Application(Option<String>),
    /// The request did not complete or the body was not a query response.
    Transport(String),
}

impl QueryFailure {
    /// Text for the error region.
    pub fn user_message(&self) -> &str {
        match self {
            QueryFailure::Application(Some(msg)) if !msg.is_empty() => msg,
            QueryFailure::Application(_) => GENERIC_ERROR_MESSAGE,
            QueryFailure::Transport(_) => CONNECT_ERROR_MESSAGE,
        }
    }
}

/// Result of a finished submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Rows { sql: String, table: ResultTable },
    NoRows { sql: String },
    Failed(QueryFailure),
}

impl QueryOutcome {
    /// Interpret a transport result.
    pub fn classify(result: crate::Result<QueryResponse>) -> Self {
        let response = match result {
            Ok(response) => response,
            Err(Error::Transport(detail)) => {
                return QueryOutcome::Failed(QueryFailure::Transport(detail))
            }
            Err(other) => return QueryOutcome::Failed(QueryFailure::Transport(other.to_string())),
        };

        if !response.success {
            return QueryOutcome::Failed(QueryFailure::Application(response.error));
        }

        let sql = response.sql.unwrap_or_default();
        match response
            .result
            .as_deref()
            .and_then(ResultTable::from_rows)
        {
            Some(table) => QueryOutcome::Rows { sql, table },
            None => QueryOutcome::NoRows { sql },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, QueryOutcome::Failed(_))
    }
}

/// Drives submissions against a [`QueryView`].
#[derive(Debug, Default)]
pub struct QueryController {
    submissions: u64,
}

impl QueryController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests issued so far.
    pub fn submissions(&self) -> u64 {
        self.submissions
    }

    /// Start a submission.
    ///
    /// Returns the request to send, or `None` (leaving the view untouched)
    /// when the trimmed question is empty.
    pub fn begin<V: QueryView + ?Sized>(&mut self, view: &mut V) -> Option<QueryRequest> {
        let request = QueryRequest::from_input(&view.question())?;

        view.hide_error();
        view.hide_sql();
        view.hide_table();
        view.clear_table();

        view.set_submit_enabled(false);
        view.set_loading(true);

        self.submissions += 1;
        info!(question = %request.question, "submitting question");
        Some(request)
    }

    /// Render the result of a submission and return the view to ready.
    pub fn finish<V: QueryView + ?Sized>(
        &mut self,
        view: &mut V,
        result: crate::Result<QueryResponse>,
    ) -> QueryOutcome {
        let outcome = QueryOutcome::classify(result);
        render(view, &outcome);

        view.set_submit_enabled(true);
        view.set_loading(false);

        outcome
    }

    /// Run a full submission: begin, await the transport, finish.
    ///
    /// Returns `None` when nothing was submitted.
    pub async fn submit<V, T>(&mut self, view: &mut V, transport: &T) -> Option<QueryOutcome>
    where
        V: QueryView + ?Sized,
        T: QueryTransport + ?Sized,
    {
        let request = self.begin(view)?;
        let result = transport.ask(&request).await;
        Some(self.finish(view, result))
    }
}

fn render<V: QueryView + ?Sized>(view: &mut V, outcome: &QueryOutcome) {
    match outcome {
        QueryOutcome::Rows { sql, table } => {
            view.show_sql(sql);
            view.show_table(table);
            debug!(
                columns = table.columns.len(),
                rows = table.row_count(),
                "rendered result table"
            );
        }
        QueryOutcome::NoRows { sql } => {
            view.show_sql(sql);
            view.show_error(NO_RESULTS_MESSAGE);
        }
        QueryOutcome::Failed(failure) => {
            match failure {
                QueryFailure::Application(msg) => {
                    warn!(error = ?msg, "server reported query failure")
                }
                QueryFailure::Transport(detail) => warn!(%detail, "query transport failed"),
            }
            view.show_error(failure.user_message());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records every view mutation so tests can assert both final state and
    /// whether anything was touched at all.
    #[derive(Debug)]
    struct RecordingView {
        question: String,
        error: Option<String>,
        sql: Option<String>,
        table_visible: bool,
        header: Vec<String>,
        body: Vec<Vec<String>>,
        submit_enabled: bool,
        loading: bool,
        mutations: usize,
    }

    impl RecordingView {
        fn with_question(question: &str) -> Self {
            Self {
                question: question.to_string(),
                error: None,
                sql: None,
                table_visible: false,
                header: Vec::new(),
                body: Vec::new(),
                submit_enabled: true,
                loading: false,
                mutations: 0,
            }
        }

        fn assert_ready(&self) {
            assert!(self.submit_enabled, "submit control should be re-enabled");
            assert!(!self.loading, "loading indicator should be hidden");
        }
    }

    impl QueryView for RecordingView {
        fn question(&self) -> String {
            self.question.clone()
        }
        fn show_error(&mut self, message: &str) {
            self.mutations += 1;
            self.error = Some(message.to_string());
        }
        fn hide_error(&mut self) {
            self.mutations += 1;
            self.error = None;
        }
        fn show_sql(&mut self, sql: &str) {
            self.mutations += 1;
            self.sql = Some(sql.to_string());
        }
        fn hide_sql(&mut self) {
            self.mutations += 1;
            self.sql = None;
        }
        fn show_table(&mut self, table: &ResultTable) {
            self.mutations += 1;
            self.header = table.columns.clone();
            self.body = table.rows.clone();
            self.table_visible = true;
        }
        fn hide_table(&mut self) {
            self.mutations += 1;
            self.table_visible = false;
        }
        fn clear_table(&mut self) {
            self.mutations += 1;
            self.header.clear();
            self.body.clear();
        }
        fn set_submit_enabled(&mut self, enabled: bool) {
            self.mutations += 1;
            self.submit_enabled = enabled;
        }
        fn set_loading(&mut self, loading: bool) {
            self.mutations += 1;
            self.loading = loading;
        }
    }

    struct FakeTransport {
        reply: fn() -> crate::Result<QueryResponse>,
        calls: AtomicUsize,
    }

    impl FakeTransport {
        fn replying(reply: fn() -> crate::Result<QueryResponse>) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }

        fn json(body: serde_json::Value) -> crate::Result<QueryResponse> {
            Ok(QueryResponse::from_value(body))
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl QueryTransport for FakeTransport {
        async fn ask(&self, request: &QueryRequest) -> crate::Result<QueryResponse> {
            assert_eq!(request.question, request.question.trim());
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.reply)()
        }
    }

    #[tokio::test]
    async fn blank_question_is_a_no_op() {
        let transport = FakeTransport::replying(|| unreachable!("no request expected"));
        let mut controller = QueryController::new();

        for question in ["", "   ", "\t\n"] {
            let mut view = RecordingView::with_question(question);
            view.error = Some("previous error".to_string());

            let outcome = controller.submit(&mut view, &transport).await;

            assert_eq!(outcome, None);
            assert_eq!(view.mutations, 0);
            assert_eq!(view.error.as_deref(), Some("previous error"));
        }
        assert_eq!(transport.calls(), 0);
        assert_eq!(controller.submissions(), 0);
    }

    #[tokio::test]
    async fn rows_render_sql_and_table() {
        let transport = FakeTransport::replying(|| {
            FakeTransport::json(json!({
                "success": true,
                "sql": "SELECT 1",
                "result": [{"a": 1, "b": 2}]
            }))
        });
        let mut controller = QueryController::new();
        let mut view = RecordingView::with_question("  one row please ");

        let outcome = controller.submit(&mut view, &transport).await.unwrap();

        assert!(matches!(outcome, QueryOutcome::Rows { .. }));
        assert_eq!(view.sql.as_deref(), Some("SELECT 1"));
        assert!(view.table_visible);
        assert_eq!(view.header, vec!["a", "b"]);
        assert_eq!(view.body, vec![vec!["1", "2"]]);
        assert_eq!(view.error, None);
        assert_eq!(transport.calls(), 1);
        view.assert_ready();
    }

    #[tokio::test]
    async fn empty_result_shows_no_results_message() {
        let transport =
            FakeTransport::replying(|| FakeTransport::json(json!({"success": true, "result": []})));
        let mut controller = QueryController::new();
        let mut view = RecordingView::with_question("anything");

        controller.submit(&mut view, &transport).await.unwrap();

        assert_eq!(view.error.as_deref(), Some(NO_RESULTS_MESSAGE));
        assert!(!view.table_visible);
        view.assert_ready();
    }

    #[tokio::test]
    async fn absent_result_shows_no_results_message() {
        let transport = FakeTransport::replying(|| {
            FakeTransport::json(json!({"success": true, "sql": "SELECT * FROM Orders WHERE 1=0"}))
        });
        let mut view = RecordingView::with_question("orders from the future");

        QueryController::new()
            .submit(&mut view, &transport)
            .await
            .unwrap();

        assert_eq!(view.sql.as_deref(), Some("SELECT * FROM Orders WHERE 1=0"));
        assert_eq!(view.error.as_deref(), Some(NO_RESULTS_MESSAGE));
        assert!(!view.table_visible);
    }

    #[tokio::test]
    async fn server_error_message_is_shown() {
        let transport = FakeTransport::replying(|| {
            FakeTransport::json(json!({"success": false, "error": "bad syntax"}))
        });
        let mut view = RecordingView::with_question("drop everything");

        let outcome = QueryController::new()
            .submit(&mut view, &transport)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            QueryOutcome::Failed(QueryFailure::Application(Some("bad syntax".to_string())))
        );
        assert_eq!(view.error.as_deref(), Some("bad syntax"));
        assert_eq!(view.sql, None);
        view.assert_ready();
    }

    #[tokio::test]
    async fn server_error_without_message_uses_fallback() {
        let transport = FakeTransport::replying(|| FakeTransport::json(json!({"success": false})));
        let mut view = RecordingView::with_question("?");

        QueryController::new()
            .submit(&mut view, &transport)
            .await
            .unwrap();

        assert_eq!(view.error.as_deref(), Some(GENERIC_ERROR_MESSAGE));
        view.assert_ready();
    }

    #[tokio::test]
    async fn transport_failure_shows_connect_message_and_resets() {
        let transport =
            FakeTransport::replying(|| Err(Error::Transport("connection refused".to_string())));
        let mut view = RecordingView::with_question("how many customers?");

        let outcome = QueryController::new()
            .submit(&mut view, &transport)
            .await
            .unwrap();

        assert!(outcome.is_failure());
        assert_eq!(view.error.as_deref(), Some(CONNECT_ERROR_MESSAGE));
        view.assert_ready();
    }

    #[tokio::test]
    async fn new_submission_clears_previous_table() {
        let mut controller = QueryController::new();
        let mut view = RecordingView::with_question("first");

        let rows = FakeTransport::replying(|| {
            FakeTransport::json(json!({"success": true, "sql": "SELECT x", "result": [{"x": "y"}]}))
        });
        controller.submit(&mut view, &rows).await.unwrap();
        assert!(view.table_visible);

        let failing = FakeTransport::replying(|| FakeTransport::json(json!({"success": false})));
        view.question = "second".to_string();
        controller.submit(&mut view, &failing).await.unwrap();

        assert!(!view.table_visible);
        assert!(view.header.is_empty());
        assert!(view.body.is_empty());
        assert_eq!(view.sql, None);
        assert_eq!(controller.submissions(), 2);
    }

    #[test]
    fn begin_enters_loading_state() {
        let mut controller = QueryController::new();
        let mut view = RecordingView::with_question(" q ");
        view.sql = Some("old".to_string());
        view.table_visible = true;

        let request = controller.begin(&mut view).unwrap();

        assert_eq!(request.question, "q");
        assert!(!view.submit_enabled);
        assert!(view.loading);
        assert_eq!(view.sql, None);
        assert!(!view.table_visible);
    }

    #[test]
    fn classify_treats_other_errors_as_transport() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let outcome = QueryOutcome::classify(Err(Error::Io(io)));
        assert_eq!(
            outcome,
            QueryOutcome::Failed(QueryFailure::Transport("I/O error: eof".to_string()))
        );
        assert_eq!(
            QueryFailure::Transport("x".into()).user_message(),
            CONNECT_ERROR_MESSAGE
        );
    }

    #[tokio::test]
    async fn empty_server_error_uses_fallback() {
        let transport = FakeTransport::replying(|| {
            FakeTransport::json(json!({"success": false, "error": ""}))
        });
        let mut view = RecordingView::with_question("?");

        QueryController::new()
            .submit(&mut view, &transport)
            .await
            .unwrap();

        assert_eq!(view.error.as_deref(), Some(GENERIC_ERROR_MESSAGE));
        assert_eq!(
            QueryFailure::Application(Some(String::new())).user_message(),
            GENERIC_ERROR_MESSAGE
        );
    }

    #[test]
    fn loosely_typed_bodies_are_server_answers() {
        let classify = |body| QueryOutcome::classify(Ok(QueryResponse::from_value(body)));

        let outcome = classify(json!({"success": false, "error": {"code": 1064}}));
        assert_eq!(
            outcome,
            QueryOutcome::Failed(QueryFailure::Application(Some(
                r#"{"code":1064}"#.to_string()
            )))
        );

        match classify(json!({"success": 1, "sql": "SELECT 1", "result": [{"a": 1}]})) {
            QueryOutcome::Rows { sql, table } => {
                assert_eq!(sql, "SELECT 1");
                assert_eq!(table.columns, vec!["a"]);
            }
            other => panic!("expected rows, got {other:?}"),
        }

        assert_eq!(
            classify(json!({"success": true, "sql": "SELECT 1", "result": {}})),
            QueryOutcome::NoRows {
                sql: "SELECT 1".to_string()
            }
        );

        let outcome = classify(json!([1, 2, 3]));
        assert_eq!(outcome, QueryOutcome::Failed(QueryFailure::Application(None)));
        if let QueryOutcome::Failed(failure) = outcome {
            assert_eq!(failure.user_message(), GENERIC_ERROR_MESSAGE);
        }
    }
}
