//! Error types for mesh construction and validation.

use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur when building or validating a mesh.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MeshError {
    /// A triangle references a point index outside the point array.
    #[error("triangle index {index} out of range (mesh has {point_count} points)")]
    InvalidTriangleIndex {
        /// The offending index.
        index: u32,
        /// Total number of points in the mesh.
        point_count: usize,
    },
}
