//! Transport error types

use std::time::Duration;

/// The response attached to a failed request.
///
/// `data` is the decoded response body. A server reporting validation
/// failures is expected to answer with `{"errors": {"path": ["message"]}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded response body, or `Null` when the body was empty or not JSON.
    pub data: serde_json::Value,
}

impl FailureResponse {
    /// Creates a new failure response.
    pub fn new(status: u16, data: serde_json::Value) -> Self {
        Self { status, data }
    }

    /// Returns the structured `errors` member of the body, if present.
    pub fn errors(&self) -> Option<&serde_json::Value> {
        self.data.get("errors").filter(|errors| !errors.is_null())
    }
}

/// Errors that can occur while a transport sends a submission.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Non-success HTTP response.
    #[error("HTTP {status}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// The response that came back with the failure.
        response: FailureResponse,
    },

    /// Network error during the request.
    #[cfg(feature = "http")]
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A file carries a MIME type the multipart encoder cannot use.
    #[error("Invalid MIME type `{mime}` for file {file}")]
    InvalidMimeType {
        /// Name of the offending file.
        file: String,
        /// The rejected MIME type.
        mime: String,
    },

    /// Failed to parse the response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },

    /// Failure reported by a custom transport.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Creates a new HTTP error carrying the decoded response body.
    pub fn http(status: u16, data: serde_json::Value) -> Self {
        Self::Http {
            status,
            response: FailureResponse::new(status, data),
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the failure response if the server answered.
    pub fn response(&self) -> Option<&FailureResponse> {
        match self {
            Self::Http { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Returns the structured validation errors (`response.data.errors`).
    pub fn validation_errors(&self) -> Option<&serde_json::Value> {
        self.response().and_then(FailureResponse::errors)
    }
}
