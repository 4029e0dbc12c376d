//! Wire types for the query server's HTTP API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single result row: column name to JSON scalar, in body key order.
pub type Row = serde_json::Map<String, Value>;

/// Body of `POST /query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub question: String,
}

impl QueryRequest {
    /// Build a request from raw user input.
    ///
    /// Returns `None` when the trimmed question is empty.
    pub fn from_input(input: &str) -> Option<Self> {
        let question = input.trim();
        if question.is_empty() {
            return None;
        }
        Some(Self {
            question: question.to_string(),
        })
    }
}

/// Body returned by `POST /query`, as the front ends interpret it.
///
/// The server's fields are read loosely: `success` by truthiness, a
/// non-string `error` as its JSON text, and a `result` that is not a
/// non-empty array of objects as absent. A body that is not an object is a
/// failed query without a message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResponse {
    pub success: bool,
    pub sql: Option<String>,
    pub result: Option<Vec<Row>>,
    pub error: Option<String>,
}

impl QueryResponse {
    /// Parse a raw body. Only bytes that are not JSON at all are an error.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body).map(Self::from_value)
    }

    pub fn from_value(body: Value) -> Self {
        let Value::Object(mut fields) = body else {
            return Self::default();
        };

        let success = fields.get("success").is_some_and(is_truthy);
        let sql = match fields.remove("sql") {
            None | Some(Value::Null) => None,
            Some(value) => Some(value_text(value)),
        };
        let error = fields.remove("error").filter(is_truthy).map(value_text);
        let result = match fields.remove("result") {
            Some(Value::Array(items)) => {
                let rows: Vec<Row> = items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Object(row) => Some(row),
                        _ => None,
                    })
                    .collect();
                (!rows.is_empty()).then_some(rows)
            }
            _ => None,
        };

        Self {
            success,
            sql,
            result,
            error,
        }
    }
}

/// Truthiness as the server's browser client saw it.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_input_trims_and_rejects_blank() {
        assert_eq!(QueryRequest::from_input(""), None);
        assert_eq!(QueryRequest::from_input(" \t\n "), None);
        assert_eq!(
            QueryRequest::from_input("  top products \n"),
            Some(QueryRequest {
                question: "top products".to_string()
            })
        );
    }

    #[test]
    fn request_body_shape() {
        let req = QueryRequest {
            question: "how many orders?".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"question":"how many orders?"}"#
        );
    }

    #[test]
    fn success_response_keeps_row_key_order() {
        let resp = QueryResponse::from_slice(
            br#"{"success":true,"sql":"SELECT z, a","result":[{"z":1,"a":"x"}]}"#,
        )
        .unwrap();

        assert!(resp.success);
        assert_eq!(resp.sql.as_deref(), Some("SELECT z, a"));
        let rows = resp.result.unwrap();
        let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn failure_response_with_and_without_message() {
        let resp = QueryResponse::from_slice(br#"{"success":false,"error":"bad syntax"}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("bad syntax"));

        let resp = QueryResponse::from_slice(br#"{"success":false}"#).unwrap();
        assert_eq!(resp.error, None);
    }

    #[test]
    fn missing_success_is_failure_and_null_result_is_absent() {
        let resp = QueryResponse::from_slice(br#"{"sql":"SELECT 1","result":null}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.result, None);
    }

    #[test]
    fn only_non_json_fails_to_parse() {
        assert!(QueryResponse::from_slice(b"not json").is_err());

        let resp = QueryResponse::from_slice(b"[1,2,3]").unwrap();
        assert_eq!(resp, QueryResponse::default());
    }

    #[test]
    fn success_uses_truthiness() {
        let resp = QueryResponse::from_value(json!({"success": 1, "result": [{"a": 1}]}));
        assert!(resp.success);
        assert_eq!(resp.result.unwrap()[0]["a"], 1);

        for falsy in [json!(0), json!(""), json!(null), json!(false)] {
            assert!(!QueryResponse::from_value(json!({"success": falsy})).success);
        }
        assert!(QueryResponse::from_value(json!({"success": "yes"})).success);
    }

    #[test]
    fn error_text_is_loose() {
        let resp = QueryResponse::from_value(json!({"success": false, "error": {"code": 1064}}));
        assert_eq!(resp.error.as_deref(), Some(r#"{"code":1064}"#));

        let resp = QueryResponse::from_value(json!({"success": false, "error": ""}));
        assert_eq!(resp.error, None);

        let resp = QueryResponse::from_value(json!({"success": false, "error": 42}));
        assert_eq!(resp.error.as_deref(), Some("42"));
    }

    #[test]
    fn result_must_be_a_non_empty_array_of_objects() {
        for result in [json!({}), json!("rows"), json!([]), json!([1, 2])] {
            let resp = QueryResponse::from_value(json!({"success": true, "result": result}));
            assert_eq!(resp.result, None);
        }

        let resp = QueryResponse::from_value(json!({"success": true, "result": [7, {"n": 1}]}));
        assert_eq!(resp.result.unwrap().len(), 1);
    }

    #[test]
    fn non_string_sql_is_shown_as_json() {
        let resp = QueryResponse::from_value(json!({"success": true, "sql": 5}));
        assert_eq!(resp.sql.as_deref(), Some("5"));
    }

    #[test]
    fn health_status() {
        let health: HealthResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(health.is_ok());
        let health: HealthResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(!health.is_ok());
    }
}
