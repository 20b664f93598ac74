//! Error types for holedpoly operations.

use thiserror::Error;

/// Errors raised when building geometry or configuration from invalid input.
///
/// Boolean operations never fail; their degenerate conditions are reported
/// as [`DegenerateCondition`](crate::polygon::DegenerateCondition) values instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HoledPolyError {
    /// A polygon ring needs at least three vertices.
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices {
        /// Number of vertices supplied.
        count: usize,
    },

    /// A vertex coordinate is NaN or infinite.
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex {
        /// Index of the offending vertex.
        index: usize,
    },

    /// Grid spacing must be finite and strictly positive.
    #[error("invalid grid size {size}")]
    InvalidGridSize {
        /// The rejected spacing.
        size: f64,
    },

    /// The transform has no inverse.
    #[error("transform is singular (determinant {determinant})")]
    SingularTransform {
        /// Determinant of the linear part.
        determinant: f64,
    },
}
