//! Error handling for FloorKit
//!
//! Provides error types for the plan model:
//! - Plan errors (document validation)
//! - Unified error wrapping I/O and JSON failures
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Geometry problems that only affect rendering are not errors; the scene
//! builders skip such elements instead.

use thiserror::Error;

/// Plan validation error type
///
/// Represents violations of the plan document invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// Two elements share the same identifier
    #[error("Duplicate element id: {id}")]
    DuplicateId {
        /// The repeated identifier.
        id: String,
    },

    /// A wall has zero or negative thickness
    #[error("Wall {id} has non-positive thickness {thickness}")]
    InvalidThickness {
        /// The wall identifier.
        id: String,
        /// The offending thickness in pixels.
        thickness: f64,
    },

    /// A polygon point list has odd length or fewer than three vertices
    #[error("Zone {id} polygon has {len} coordinates, expected an even count >= 6")]
    InvalidPolygon {
        /// The zone identifier.
        id: String,
        /// Number of coordinates found.
        len: usize,
    },

    /// The plan scale is zero, negative or not finite
    #[error("Invalid scale: {px_per_meter} px/m")]
    InvalidScale {
        /// The offending scale.
        px_per_meter: f64,
    },

    /// An element id was not found in the document
    #[error("Element not found: {id}")]
    ElementNotFound {
        /// The missing identifier.
        id: String,
    },
}

/// Unified error type for FloorKit core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Plan validation error
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error with a message
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Check if this is a plan validation error
    pub fn is_plan_error(&self) -> bool {
        matches!(self, Self::Plan(_))
    }

    /// Check if this is a JSON error
    pub fn is_json_error(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}

/// Result type for FloorKit core operations
pub type Result<T> = std::result::Result<T, Error>;
