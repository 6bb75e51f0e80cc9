//! Error types for the query shim.

use std::fmt;

use serde_json::Value;

/// Rejected client configuration. Raised at construction time, never from a
/// query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The base URL is not an absolute `http`/`https` URL.
    InvalidBaseUrl { url: String, reason: String },
    /// The API key is empty or blank.
    MissingApiKey,
    /// The HTTP client could not be built.
    Http(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidBaseUrl { url, reason } => {
                write!(f, "Invalid base URL '{}': {}", url, reason)
            }
            ClientError::MissingApiKey => write!(f, "API key is missing"),
            ClientError::Http(msg) => write!(f, "HTTP client error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

/// The request never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::new(err.to_string())
    }
}

/// Details of a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub message: String,
    pub code: Option<String>,
    pub details: Option<String>,
    pub hint: Option<String>,
    /// The decoded response body, when it was JSON.
    pub body: Option<Value>,
}

impl ErrorInfo {
    /// Build from a response body, falling back to `status_text` when the
    /// body is not JSON or carries no message.
    pub fn from_body(body: &[u8], status_text: &str) -> Self {
        let body: Option<Value> = serde_json::from_slice(body).ok();
        let field = |key: &str| {
            body.as_ref()
                .and_then(|v| v.get(key))
                .and_then(cabinet_core::row::scalar_text)
        };

        Self {
            message: field("message").unwrap_or_else(|| status_text.to_string()),
            code: field("code"),
            details: field("details"),
            hint: field("hint"),
            body,
        }
    }
}

/// A failed query.
#[derive(Debug, Clone, PartialEq)]
pub enum RestError {
    /// Network failure, timeout, DNS, refused connection.
    Transport { message: String },
    /// The backend answered with a non-2xx status.
    Status { status: u16, info: ErrorInfo },
}

impl RestError {
    /// Human-readable message.
    pub fn message(&self) -> &str {
        match self {
            RestError::Transport { message } => message,
            RestError::Status { info, .. } => &info.message,
        }
    }

    /// HTTP status, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            RestError::Transport { .. } => None,
            RestError::Status { status, .. } => Some(*status),
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::Transport { message } => write!(f, "Transport error: {}", message),
            RestError::Status { status, info } => match &info.code {
                Some(code) => write!(f, "HTTP {} ({}): {}", status, code, info.message),
                None => write!(f, "HTTP {}: {}", status, info.message),
            },
        }
    }
}

impl std::error::Error for RestError {}

impl From<TransportError> for RestError {
    fn from(err: TransportError) -> Self {
        RestError::Transport {
            message: err.message,
        }
    }
}
