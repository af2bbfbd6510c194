//! Error taxonomy shared by every wizard step.
//!
//! Each step catches these at its own boundary and renders them inline; nothing
//! is propagated to a global handler.

use thiserror::Error;

/// Failure of a single request/response cycle against the ingestion backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never reached the server or no response came back.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Rejected {
        status: u16,
        message: String,
        code: Option<String>,
    },

    /// The input was rejected locally before any request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A 2xx response whose body had an unexpected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Client-side validation failures. These block forward navigation instead of
/// allowing a speculative submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Port must be a positive number")]
    InvalidPort,

    #[error("Please select at least one column")]
    NoColumnsSelected,

    #[error("Please select a non-empty file")]
    NoFileSelected,

    #[error("Please select a table")]
    NoTableSelected,

    #[error("Connection has not been tested yet")]
    NotConnected,

    #[error("A file name for the export is required")]
    MissingFileName,

    #[error("Delimiter must be a single character")]
    InvalidDelimiter,

    #[error("A transfer is already in progress")]
    TransferInFlight,

    #[error("The wizard is not ready to transfer yet")]
    NotReady,
}
