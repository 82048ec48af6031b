//! Error type for API operations.

use thiserror::Error;

/// Errors that can occur when talking to the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success HTTP status, with the server's message when one was
    /// decodable from the body.
    #[error("HTTP {}: {}", .status, .message.as_deref().unwrap_or("request failed"))]
    Http {
        status: u16,
        message: Option<String>,
    },

    /// Request timed out.
    #[error("timeout: {0}")]
    Timeout(String),

    /// Connection-level failure.
    #[error("connection error: {0}")]
    Connection(String),

    /// Response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The server accepted the request but reported a failure in the
    /// response envelope.
    #[error("rejected: {0}")]
    Rejected(String),
}

impl ApiError {
    /// The server's human-readable message, when one was provided.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } => message.as_deref(),
            ApiError::Rejected(message) => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err.to_string())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Connection(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display_includes_server_message() {
        let err = ApiError::Http {
            status: 401,
            message: Some("Authentication failed".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP 401: Authentication failed");
        assert_eq!(err.server_message(), Some("Authentication failed"));
    }

    #[test]
    fn test_http_error_display_without_message() {
        let err = ApiError::Http {
            status: 503,
            message: None,
        };
        assert_eq!(err.to_string(), "HTTP 503: request failed");
    }
}
