//! Error types for backend requests.

use thiserror::Error;

/// Errors that can occur during one request/decode cycle against the backend.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("Network failure: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("Backend returned status {0}")]
    Status(u16),

    /// The body is not valid JSON.
    #[error("Response is not valid JSON: {0}")]
    Decode(String),

    /// The body is JSON but does not match the expected shape.
    #[error("Unexpected response shape: {0}")]
    Application(String),

    /// The configured base URL cannot be joined with an API path.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}
