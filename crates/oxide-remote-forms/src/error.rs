//! Error types for remote form validation.

use thiserror::Error;

/// Errors raised while reading server payloads or building control trees.
///
/// Mapping a payload onto a form never fails on its own: unknown shapes
/// produce no errors and unknown fields land on the fallback control.
#[derive(Debug, Error)]
pub enum FormError {
    /// The server payload was not valid JSON.
    #[error("failed to parse error payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A path segment names a leaf control where a group was expected.
    #[error("control is not a group: {0}")]
    NotAGroup(String),

    /// A control with this key already exists in the group.
    #[error("duplicate control: {0}")]
    DuplicateControl(String),

    /// The configuration could not be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for remote form operations.
pub type Result<T> = std::result::Result<T, FormError>;
