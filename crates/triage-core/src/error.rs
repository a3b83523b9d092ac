//! Error types for inboxtriage.

use thiserror::Error;

/// Result type alias using inboxtriage's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for inboxtriage operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Nothing to submit: trimmed text is empty and no file is selected
    #[error("Empty input: provide text or select a file")]
    EmptyInput,

    /// Invalid input (unsupported file type, bad selection)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network/transport failure before an HTTP status was received
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx HTTP status from the classification service
    #[error("HTTP error: status {0}")]
    Http(u16),

    /// Error message reported by the classification service
    #[error("Server error: {0}")]
    Server(String),

    /// Response body missing the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A submission is already in flight
    #[error("Submission already in flight")]
    Busy,

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Message shown to the user when this error surfaces in a view.
    ///
    /// Transport failures collapse to a generic message; server-reported
    /// errors pass through verbatim; a malformed response reads as a
    /// generic server error.
    pub fn surface_message(&self) -> String {
        match self {
            Error::Network(_) | Error::Http(_) => {
                "The request failed. Check your connection and try again.".to_string()
            }
            Error::Server(msg) => msg.clone(),
            Error::MalformedResponse(_) => "Unexpected response from the server.".to_string(),
            other => other.to_string(),
        }
    }

    /// True for validation errors the user can fix by correcting input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::EmptyInput | Error::InvalidInput(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Network(e.to_string())
    }
}
