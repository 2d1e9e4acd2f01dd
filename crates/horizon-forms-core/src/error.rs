//! Error types for Horizon Forms core.

/// Result type alias for document operations.
pub type DomResult<T> = std::result::Result<T, DomError>;

/// Errors that can occur while manipulating a [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The node ID is invalid or belongs to another document.
    #[error("Invalid or foreign node ID")]
    InvalidNode,

    /// The operation requires an element but the node is a text node.
    #[error("Node is not an element")]
    NotAnElement,

    /// The insertion would make a node its own ancestor, or append into a text node.
    #[error("Hierarchy request error: {0}")]
    HierarchyRequest(&'static str),
}

/// Errors that can occur while loading a message catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog source is not valid JSON.
    #[error("Failed to parse message catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// The catalog JSON is valid but not a flat object of strings.
    #[error("Message catalog must be a JSON object of strings, found {found}")]
    NotAnObject {
        /// A short description of the JSON value that was found instead.
        found: &'static str,
    },
}
