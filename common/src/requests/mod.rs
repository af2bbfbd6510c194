//! Request side of the ingestion backend contract.
//!
//! The browser client turns these into real HTTP calls; keeping the shapes here
//! lets the wizard be tested against exact request bodies without a network.

use serde::Serialize;

use crate::model::connection::ConnectionConfig;

/// Number of sample rows requested for an export preview.
pub const PREVIEW_LIMIT: usize = crate::model::preview::PREVIEW_LINES;

/// Backend operations, relative to the configured base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    TestConnection,
    Tables,
    Columns,
    Preview,
    Ingest,
    Export,
    Login,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::TestConnection => "/test-connection",
            Endpoint::Tables => "/tables",
            Endpoint::Columns => "/columns",
            Endpoint::Preview => "/preview",
            Endpoint::Ingest => "/ingest",
            Endpoint::Export => "/export",
            Endpoint::Login => "/auth/login",
        }
    }
}

/// Everything an outbound call needs besides its body: where to send it and
/// which credential to attach.
///
/// The token is threaded explicitly into every call instead of being looked up
/// from browser storage by the client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestContext {
    base_url: String,
    token: Option<String>,
}

impl RequestContext {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Value of the `Authorization` header, if a token is present.
    pub fn authorization(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }
}

/// Query string of the columns call.
pub fn columns_query(table_name: &str) -> [(&'static str, &str); 1] {
    [("tableName", table_name)]
}

/// Body of the export call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub config: ConnectionConfig,
    pub table_name: String,
    pub columns: Vec<String>,
    pub file_name: String,
}

/// Body of the export preview call: the export request without a file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub config: ConnectionConfig,
    pub table_name: String,
    pub columns: Vec<String>,
}

impl From<&ExportRequest> for PreviewRequest {
    fn from(request: &ExportRequest) -> Self {
        Self {
            config: request.config.clone(),
            table_name: request.table_name.clone(),
            columns: request.columns.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Names of the multipart fields of the ingest call.
pub mod parts {
    pub const CONFIG: &str = "config";
    pub const TABLE_NAME: &str = "tableName";
    pub const COLUMNS: &str = "columns";
    pub const DELIMITER: &str = "delimiter";
    pub const FILE: &str = "file";
}

/// Content of the multipart ingest call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestRequest {
    pub config: ConnectionConfig,
    pub table_name: String,
    pub columns: Vec<String>,
    pub delimiter: char,
    pub file_name: String,
    pub file_bytes: Vec<u8>,
}

impl IngestRequest {
    /// JSON document sent as the `config` part.
    pub fn config_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.config)
    }

    /// JSON array sent as the `columns` part.
    pub fn columns_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.columns)
    }
}

/// The single request a wizard submits once it reaches the preview step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferPlan {
    Ingest(IngestRequest),
    Export(ExportRequest),
}

impl TransferPlan {
    pub fn table_name(&self) -> &str {
        match self {
            TransferPlan::Ingest(request) => &request.table_name,
            TransferPlan::Export(request) => &request.table_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn config() -> ConnectionConfig {
        ConnectionConfig {
            host: "db1".to_string(),
            port: 8123,
            database: "analytics".to_string(),
            username: "u".to_string(),
            password: String::new(),
        }
    }

    #[test]
    fn urls_are_joined_to_the_base() {
        let ctx = RequestContext::new("http://localhost:8081/api/ingestion/");
        assert_eq!(
            ctx.url(Endpoint::TestConnection),
            "http://localhost:8081/api/ingestion/test-connection"
        );
        assert_eq!(
            ctx.url(Endpoint::Login),
            "http://localhost:8081/api/ingestion/auth/login"
        );
    }

    #[test]
    fn bearer_header_only_with_token() {
        let ctx = RequestContext::new("http://h");
        assert_eq!(ctx.authorization(), None);
        let ctx = ctx.with_token(Some("abc".to_string()));
        assert_eq!(ctx.authorization().as_deref(), Some("Bearer abc"));
        let ctx = ctx.with_token(Some(String::new()));
        assert_eq!(ctx.token(), None);
    }

    #[test]
    fn export_body_shape() {
        let request = ExportRequest {
            config: config(),
            table_name: "events".to_string(),
            columns: vec!["a".to_string(), "b".to_string()],
            file_name: "events_export.csv".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "config": {
                    "host": "db1",
                    "port": 8123,
                    "database": "analytics",
                    "username": "u",
                    "password": ""
                },
                "tableName": "events",
                "columns": ["a", "b"],
                "fileName": "events_export.csv"
            })
        );
    }

    #[test]
    fn ingest_parts_are_json() {
        let request = IngestRequest {
            config: config(),
            table_name: "events".to_string(),
            columns: vec!["a".to_string(), "b".to_string()],
            delimiter: ',',
            file_name: "events.csv".to_string(),
            file_bytes: b"a,b\n1,2\n".to_vec(),
        };
        assert_eq!(request.columns_json().unwrap(), r#"["a","b"]"#);
        assert!(request.config_json().unwrap().contains(r#""host":"db1""#));
    }
}
