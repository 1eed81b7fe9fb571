//! Core triangle-mesh types for the NGV geometry workspace.
//!
//! This crate provides the foundational types shared by the collision and
//! endfeet-reconstruction crates:
//!
//! - [`TriMesh`] - A triangle mesh with indexed points
//! - [`Triangle`] - A concrete triangle with vertex positions
//!
//! # Data Model
//!
//! A [`TriMesh`] stores points and triangles separately. Triangles never own
//! points; they reference them by index. The crate enforces the single
//! structural invariant of the model: **every triangle index is smaller than
//! the number of points** (see [`TriMesh::try_from_parts`]).
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//! Downstream crates assume micrometers (vasculature surface scale).
//!
//! # Example
//!
//! ```
//! use mesh_types::{TriMesh, Point3};
//!
//! // A single triangle in the XY plane
//! let mesh = TriMesh::try_from_parts(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![[0, 1, 2]],
//! )
//! .unwrap();
//!
//! assert_eq!(mesh.triangle_count(), 1);
//! assert!((mesh.surface_area() - 0.5).abs() < 1e-10);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod mesh;
mod triangle;

pub use error::{MeshError, MeshResult};
pub use mesh::TriMesh;
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
