// File: crates/pie-core/src/error.rs
// Summary: Error types for data acquisition, confirm-time validation, command transitions and link parameters.

use thiserror::Error;

/// Why a dataset could not be resolved. The orchestrator degrades every one of
/// these to an empty dataset; the variants exist so callers can log or inspect.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no {0} configured")]
    MissingIdentifier(&'static str),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl FetchError {
    /// True when the configuration simply has nothing to fetch yet.
    pub fn is_missing_identifier(&self) -> bool {
        matches!(self, FetchError::MissingIdentifier(_))
    }
}

/// Blocks confirmation of a data-source edit; no state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("live mode requires a data source")]
    MissingDataSource,
    #[error("snapshot mode requires a file")]
    MissingFile,
}

/// A command was asked to move in a direction its current state does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("cannot {action} a command that is {status:?}")]
    InvalidTransition { action: &'static str, status: crate::command::CommandStatus },
}

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("link data is not valid percent-encoded UTF-8: {0}")]
    PercentEncoding(#[from] std::str::Utf8Error),
    #[error("link data is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("link data is not a valid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Turning host form data into a command failed.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("form data does not match the action: {0}")]
    Input(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
