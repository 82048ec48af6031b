//! Commerce error types.

use thiserror::Error;

/// Errors that can occur when parsing catalog values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Unknown sort key.
    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),

    /// Unknown sort order.
    #[error("unknown sort order: {0}")]
    UnknownSortOrder(String),

    /// Unknown frame size.
    #[error("unknown frame size: {0}")]
    UnknownFrameSize(String),
}
