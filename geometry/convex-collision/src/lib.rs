//! Collision queries between convex shapes.
//!
//! This crate answers one question in two ways: *do these two convex bodies
//! intersect?*
//!
//! - [`collides`] runs the GJK (Gilbert-Johnson-Keerthi) algorithm over any
//!   pair of [`SupportMap`] shapes. It is the general path: anything that
//!   can report a farthest point along a direction can be tested against
//!   anything else.
//! - The [`primitives`] module provides closed-form predicates for the
//!   shape pairs that admit a direct formula (sphere-sphere,
//!   sphere-capsule, convex-polygon vs. point/sphere), including batched
//!   variants for testing one query shape against many targets at once.
//!
//! # Shapes
//!
//! Shapes carry world-space coordinates directly; there are no poses.
//!
//! - [`Sphere`] - center and radius
//! - [`Capsule`] - two endpoint centers with independent radii (a conical
//!   frustum capsule, matching vessel segment geometry)
//! - [`ConvexPolytope`] - a convex point cloud
//!
//! # Numeric policy
//!
//! The GJK refinement loops use strict floating-point sign comparisons with
//! no epsilon; the closed-form primitives use an explicit relative+absolute
//! tolerance at every boundary decision (see [`primitives::is_close`]).
//! This asymmetry is inherited from the system being modeled and is
//! preserved as-is; boundary-touching GJK queries may be nondeterministic
//! near zero. See the module docs of [`gjk`] for details.
//!
//! # Example
//!
//! ```
//! use convex_collision::{collides, Sphere};
//! use nalgebra::Point3;
//!
//! let a = Sphere::new(Point3::new(0.0, 0.0, 0.0), 1.0);
//! let b = Sphere::new(Point3::new(1.5, 0.0, 0.0), 1.0);
//!
//! assert!(collides(&a, &b, 32));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod gjk;
pub mod primitives;
mod shape;

pub use gjk::collides;
pub use shape::{Capsule, ConvexPolytope, Sphere, SupportMap};
