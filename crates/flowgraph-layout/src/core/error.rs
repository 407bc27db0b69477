//! Error types for the layout pipeline
//!
//! All hard failures surface synchronously from the single entry point;
//! no partial layout is ever returned alongside an error.

use thiserror::Error;

use super::types::VertexId;

/// Errors produced by the layout pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// An identity was used that is not a member of the graph's vertex set.
    /// The engine's readiness check normally converts this situation into
    /// the soft empty result; seeing this error means the pipeline was
    /// driven below that check with inconsistent inputs.
    #[error("unknown vertex {vertex}")]
    UnknownVertex { vertex: VertexId },

    /// A vertex has no entry in the size table
    #[error("missing size for vertex {vertex}")]
    MissingSize { vertex: VertexId },

    /// An internal invariant was violated; always a bug, never an input
    /// condition
    #[error("layout inconsistency: {message}")]
    Inconsistency { message: String },
}

impl LayoutError {
    /// Create a new unknown-vertex error
    pub fn unknown_vertex(vertex: VertexId) -> Self {
        Self::UnknownVertex { vertex }
    }

    /// Create a new missing-size error
    pub fn missing_size(vertex: VertexId) -> Self {
        Self::MissingSize { vertex }
    }

    /// Create a new internal inconsistency error
    pub fn inconsistency(message: impl Into<String>) -> Self {
        Self::Inconsistency {
            message: message.into(),
        }
    }
}
