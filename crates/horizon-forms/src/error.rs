//! Error types for Horizon Forms controls.

use horizon_forms_core::DomError;

/// Result type alias for control operations.
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors that can occur while configuring or rendering controls.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// No constructor is registered for the control type.
    #[error("No control registered for type '{0}'")]
    UnknownControlType(String),

    /// The configuration is not valid JSON or lacks a `type`.
    #[error("Invalid control configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A document operation failed.
    #[error("Document error: {0}")]
    Dom(#[from] DomError),
}
