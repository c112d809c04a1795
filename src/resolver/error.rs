use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;

/// Errors of a single DoH sub-query.
///
/// Carries message strings instead of error sources, because a failed lookup
/// is kept as a capsule inside the overall result and thus must be `Clone` and
/// `Serialize`.
#[derive(Debug, Clone, Error, Serialize)]
pub enum Error {
    #[error("HTTP request failed: {reason}")]
    HttpError { reason: String },
    #[error("endpoint responded with status code {code}")]
    StatusError { code: u16 },
    #[error("failed to parse response body: {reason}")]
    ParseError { reason: String },
    #[error("query has been cancelled")]
    CancelledError,
    #[error("query execution panicked")]
    RuntimePanicError,
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::HttpError {
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::ParseError {
            reason: error.to_string(),
        }
    }
}

impl From<JoinError> for Error {
    fn from(error: JoinError) -> Self {
        if error.is_cancelled() {
            return Error::CancelledError;
        }
        Error::RuntimePanicError
    }
}
