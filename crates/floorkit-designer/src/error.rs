//! Error types for the plan editor.

use floorkit_core::{ElementKind, PlanError};
use thiserror::Error;

/// Designer error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignerError {
    /// No element with the given id exists in the document
    #[error("Unknown element: {id}")]
    UnknownElement {
        /// The missing identifier.
        id: String,
    },

    /// The element kind has no such dimension
    #[error("Cannot resize {dimension} of a {kind}")]
    NotResizable {
        /// Kind of the element.
        kind: ElementKind,
        /// The requested dimension.
        dimension: &'static str,
    },

    /// A furniture model could not be loaded
    #[error("Failed to load model for {kind}: {message}")]
    AssetLoad {
        /// Furniture type that was requested.
        kind: String,
        /// Loader error, rendered with its causes.
        message: String,
    },

    /// An edit field held something that is not a number
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// The editor has no active document
    #[error("No active document")]
    NoDocument,

    /// Document invariant violated
    #[error(transparent)]
    Plan(#[from] PlanError),
}

impl DesignerError {
    pub fn unknown(id: impl Into<String>) -> Self {
        Self::UnknownElement { id: id.into() }
    }

    pub fn asset_load(kind: impl Into<String>, err: &anyhow::Error) -> Self {
        Self::AssetLoad {
            kind: kind.into(),
            message: format!("{:#}", err),
        }
    }
}

/// Result type for designer operations
pub type Result<T> = std::result::Result<T, DesignerError>;
