//! Response side of the ingestion backend contract.
//!
//! Every parser takes the HTTP status and the body text and either yields the
//! typed payload or an [`ApiError`]. Non-2xx statuses are always turned into
//! [`ApiError::Rejected`] carrying the server's own message.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::model::schema::{ColumnDescriptor, TableSchema};

/// Structured error body some endpoints return alongside a non-2xx status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<Value>,
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Builds the error for a non-2xx response.
///
/// The message is taken from a `{message, code?}` body when there is one, then
/// from the raw body text, and finally from the status alone.
pub fn rejection(status: u16, body: &str) -> ApiError {
    if let Ok(err) = serde_json::from_str::<ErrorBody>(body) {
        let code = err.code.map(|c| match c {
            Value::String(s) => s,
            other => other.to_string(),
        });
        return ApiError::Rejected {
            status,
            message: err.message,
            code,
        };
    }
    let text = body.trim();
    ApiError::Rejected {
        status,
        message: if text.is_empty() {
            format!("HTTP {}", status)
        } else {
            text.to_string()
        },
        code: None,
    }
}

pub fn check_status(status: u16, body: &str) -> Result<(), ApiError> {
    if is_success(status) {
        Ok(())
    } else {
        Err(rejection(status, body))
    }
}

fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    check_status(status, body)?;
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TestConnectionBody {
    Flag(bool),
    Report {
        success: bool,
        #[serde(default)]
        message: Option<String>,
    },
}

/// Connection test: `{success}` or a bare boolean. An empty 2xx body counts as
/// success.
pub fn parse_test_connection(status: u16, body: &str) -> Result<(), ApiError> {
    check_status(status, body)?;
    if body.trim().is_empty() {
        return Ok(());
    }
    let parsed: TestConnectionBody =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    let (success, message) = match parsed {
        TestConnectionBody::Flag(success) => (success, None),
        TestConnectionBody::Report { success, message } => (success, message),
    };
    if success {
        Ok(())
    } else {
        Err(ApiError::Rejected {
            status,
            message: message.unwrap_or_else(|| "Failed to connect to ClickHouse".to_string()),
            code: None,
        })
    }
}

pub fn parse_tables(status: u16, body: &str) -> Result<Vec<String>, ApiError> {
    decode(status, body)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColumnsBody {
    Names(Vec<String>),
    Descriptors(Vec<ColumnDescriptor>),
    Typed(Map<String, Value>),
}

/// Columns of a table: a list of names, a list of descriptors, or an object
/// mapping each name to its declared type.
pub fn parse_columns(status: u16, body: &str) -> Result<TableSchema, ApiError> {
    let columns = match decode::<ColumnsBody>(status, body)? {
        ColumnsBody::Names(names) => names.into_iter().map(ColumnDescriptor::named).collect(),
        ColumnsBody::Descriptors(descriptors) => descriptors,
        ColumnsBody::Typed(map) => map
            .into_iter()
            .map(|(name, data_type)| match data_type {
                Value::String(t) => ColumnDescriptor::typed(name, t),
                Value::Null => ColumnDescriptor::named(name),
                other => ColumnDescriptor::typed(name, other.to_string()),
            })
            .collect(),
    };
    Ok(columns)
}

/// Sample rows for an export preview, one object per row.
pub fn parse_preview(status: u16, body: &str) -> Result<Vec<Map<String, Value>>, ApiError> {
    decode(status, body)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IngestBody {
    Count(u64),
    Summary {
        #[serde(alias = "recordCount", alias = "count")]
        records: u64,
    },
}

/// Number of records the backend reports as transferred.
pub fn parse_ingest(status: u16, body: &str) -> Result<u64, ApiError> {
    Ok(match decode::<IngestBody>(status, body)? {
        IngestBody::Count(records) => records,
        IngestBody::Summary { records } => records,
    })
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Value,
}

pub fn parse_login(status: u16, body: &str) -> Result<LoginResponse, ApiError> {
    decode(status, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn structured_rejection_keeps_message_and_code() {
        let err = rejection(400, r#"{"message":"Unknown table","code":"UNKNOWN_TABLE"}"#);
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 400,
                message: "Unknown table".to_string(),
                code: Some("UNKNOWN_TABLE".to_string()),
            }
        );
        assert_eq!(err.to_string(), "Unknown table");
    }

    #[test]
    fn plain_rejection_is_verbatim() {
        let err = rejection(500, "Code: 60. DB::Exception: Table x doesn't exist\n");
        assert_eq!(err.to_string(), "Code: 60. DB::Exception: Table x doesn't exist");
        assert_eq!(rejection(502, "").to_string(), "HTTP 502");
    }

    #[test]
    fn test_connection_shapes() {
        assert_eq!(parse_test_connection(200, r#"{"success":true}"#), Ok(()));
        assert_eq!(parse_test_connection(200, "true"), Ok(()));
        assert_eq!(parse_test_connection(200, ""), Ok(()));
        assert_eq!(
            parse_test_connection(200, "false").unwrap_err().to_string(),
            "Failed to connect to ClickHouse"
        );
        assert_eq!(
            parse_test_connection(200, r#"{"success":false,"message":"bad password"}"#)
                .unwrap_err()
                .to_string(),
            "bad password"
        );
        assert_eq!(parse_test_connection(401, "").unwrap_err().status(), Some(401));
    }

    #[test]
    fn tables_list() {
        assert_eq!(
            parse_tables(200, r#"["events","users"]"#).unwrap(),
            vec!["events", "users"]
        );
        assert!(matches!(parse_tables(200, "{}"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn columns_accept_every_shape() {
        let names = parse_columns(200, r#"["a","b"]"#).unwrap();
        assert_eq!(names, vec![ColumnDescriptor::named("a"), ColumnDescriptor::named("b")]);

        let typed = parse_columns(200, r#"{"id":"UInt32","name":"String"}"#).unwrap();
        assert_eq!(
            typed,
            vec![
                ColumnDescriptor::typed("id", "UInt32"),
                ColumnDescriptor::typed("name", "String"),
            ]
        );

        let described =
            parse_columns(200, r#"[{"name":"email","type":"String","nullable":true}]"#).unwrap();
        assert_eq!(described[0].nullable, Some(true));
        assert_eq!(described[0].data_type.as_deref(), Some("String"));
    }

    #[test]
    fn ingest_count_shapes() {
        assert_eq!(parse_ingest(200, r#"{"records":1}"#), Ok(1));
        assert_eq!(parse_ingest(200, "250"), Ok(250));
        assert_eq!(parse_ingest(200, r#"{"recordCount":7}"#), Ok(7));
        assert_eq!(
            parse_ingest(413, "Payload too large").unwrap_err().to_string(),
            "Payload too large"
        );
    }

    #[test]
    fn login_token() {
        let login = parse_login(200, r#"{"token":"t0k","user":{"id":"1"}}"#).unwrap();
        assert_eq!(login.token, "t0k");
        assert_eq!(login.user["id"], "1");
    }

    #[test]
    fn preview_rows() {
        let rows = parse_preview(200, r#"[{"a":1},{"a":2}]"#).unwrap();
        assert_eq!(rows.len(), 2);
    }
}
