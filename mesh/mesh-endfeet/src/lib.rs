//! Endfeet surface-region reconstruction on vasculature meshes.
//!
//! Astrocyte endfeet are the contact patches where astrocytic processes
//! wrap blood vessels. This crate reconstructs them as bounded
//! triangle-mesh regions: fronts grown from per-endfoot seed points label
//! the vasculature surface, labeled triangles are bucketed per endfoot,
//! over-grown regions are shrunk toward a biologically plausible target
//! area, and each region is re-indexed into a compact, self-contained
//! [`EndfootMesh`].
//!
//! # Pipeline
//!
//! ```text
//! seeds ──► front solver (external) ──► FrontField
//!                                          │ label + bucket
//!                                          ▼
//!             triangle areas / travel times, per-group areas
//!                                          │ map to target distribution
//!                                          ▼
//!          shrink over-grown groups ──► remap indices ──► EndfootMesh
//! ```
//!
//! The front-propagation solver, the target-distribution mapping and the
//! thickness sampling are collaborator seams ([`FrontSolver`],
//! [`AreaMapper`], [`TruncatedNormal`]); everything else is pure functions
//! over explicit arrays, independently testable.
//!
//! # Laziness and ordering
//!
//! Reconstruction is a pull-based iterator: records appear in strictly
//! ascending group-id order, gap groups are silently skipped, and a
//! consumer that stops early never pays for unvisited groups.
//!
//! # Example
//!
//! ```
//! use mesh_endfeet::{reconstruct_endfeet, FrontField};
//! use mesh_types::{Point3, TriMesh};
//!
//! // Two disjoint triangles, one per endfoot
//! let mesh = TriMesh::try_from_parts(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!         Point3::new(5.0, 0.0, 0.0),
//!         Point3::new(7.0, 0.0, 0.0),
//!         Point3::new(5.0, 2.0, 0.0),
//!     ],
//!     vec![[0, 1, 2], [3, 4, 5]],
//! )
//! .unwrap();
//!
//! let field = FrontField::new(vec![0.0; 6], vec![0, 0, 0, 1, 1, 1]).unwrap();
//!
//! let endfeet: Vec<_> =
//!     reconstruct_endfeet(&mesh, &field, vec![10.0, 10.0], vec![1.0, 1.0])
//!         .unwrap()
//!         .collect();
//!
//! assert_eq!(endfeet.len(), 2);
//! assert_eq!(endfeet[0].index, 0);
//! assert_eq!(endfeet[1].index, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod field;
mod grouping;
mod metrics;
pub mod pipeline;
mod reconstruct;
mod sampling;
mod shrink;

pub use error::{EndfeetError, EndfeetResult};
pub use field::{FrontField, GroupId, UNASSIGNED};
pub use grouping::{triangle_groups, GroupedTriangles};
pub use metrics::{group_areas, triangle_travel_times};
pub use pipeline::{endfeet_area_generation, FrontSolver, Parameters};
pub use reconstruct::{extract_submesh, reconstruct_endfeet, EndfeetReconstruction, EndfootMesh};
pub use sampling::{AreaMapper, DistributionParams, RankOrderMapper, TruncatedNormal};
pub use shrink::shrink_to_target;

// Re-export the mesh layer for downstream convenience
pub use mesh_types::{Point3, TriMesh, Triangle};
