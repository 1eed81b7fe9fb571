//! Closed-form collision predicates.
//!
//! Direct-formula tests for the shape pairs that do not need a full GJK
//! pass: sphere-sphere, sphere-capsule, and convex-polygon vs.
//! point/sphere. All predicates are pure functions over explicit inputs;
//! the batched variants test one query shape against many targets and are
//! embarrassingly parallel across rows for callers that want to chunk
//! them.
//!
//! # Numeric policy
//!
//! Every boundary decision goes through [`is_close`], a relative+absolute
//! tolerance comparison with the standard numerics defaults
//! (`rtol = 1e-5`, `atol = 1e-8`). Two deliberate quirks of the modeled
//! system are preserved exactly:
//!
//! - sphere-sphere counts exact touching as a collision (non-strict),
//! - sphere-capsule counts exact touching as NO collision (strict),
//!
//! expressing a contact-vs-penetration distinction. Do not unify them.

use nalgebra::{Point3, Vector3};

use crate::shape::{Capsule, Sphere};

/// Relative tolerance for boundary comparisons.
const RTOL: f64 = 1e-5;

/// Absolute tolerance for boundary comparisons.
const ATOL: f64 = 1e-8;

/// Tolerance-aware scalar equality: `|a - b| <= atol + rtol * |b|`.
///
/// Matches the default semantics of the standard numerics libraries
/// (`rtol = 1e-5`, `atol = 1e-8`). Note the asymmetry: `b` is the
/// reference value.
#[inline]
#[must_use]
pub fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= ATOL + RTOL * b.abs()
}

/// Test a sphere against a sphere.
///
/// Touching counts as colliding (non-strict inequality).
///
/// # Example
///
/// ```
/// use convex_collision::{primitives::sphere_intersects_sphere, Sphere};
/// use nalgebra::Point3;
///
/// let a = Sphere::new(Point3::new(0.0, 0.0, 0.0), 1.0);
/// let touching = Sphere::new(Point3::new(2.0, 0.0, 0.0), 1.0);
///
/// assert!(sphere_intersects_sphere(&a, &touching));
/// ```
#[inline]
#[must_use]
pub fn sphere_intersects_sphere(a: &Sphere, b: &Sphere) -> bool {
    (b.center - a.center).norm() <= a.radius + b.radius
}

/// Test one sphere against many spheres.
///
/// A row collides when the center distance minus the combined radii is
/// negative or within tolerance of zero (touching counts). `centers` and
/// `radii` are parallel slices and must have equal length.
#[must_use]
pub fn sphere_intersects_spheres(
    center: &Point3<f64>,
    radius: f64,
    centers: &[Point3<f64>],
    radii: &[f64],
) -> Vec<bool> {
    debug_assert_eq!(centers.len(), radii.len());
    centers
        .iter()
        .zip(radii)
        .map(|(other_center, &other_radius)| {
            let separation = (other_center - center).norm() - (radius + other_radius);
            separation < 0.0 || is_close(separation, 0.0)
        })
        .collect()
}

/// Distance from a sphere center to a capsule surface, as the pair
/// `(closest_distance, combined_radius)` used by the strict predicate.
fn capsule_gap(sphere: &Sphere, capsule: &Capsule) -> (f64, f64) {
    let axis = capsule.p1 - capsule.p0;
    let length_sq = axis.norm_squared();

    // Project the center onto the axis segment; a degenerate capsule
    // collapses to its first endpoint sphere.
    let t = if length_sq > 0.0 {
        ((sphere.center - capsule.p0).dot(&axis) / length_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let closest = capsule.p0 + axis * t;
    let distance = (sphere.center - closest).norm();

    // Capsule radius interpolates linearly along the axis parameter
    let radius_at = capsule.radius0 + t * (capsule.radius1 - capsule.radius0);

    (distance, sphere.radius + radius_at)
}

/// Test a sphere against a capsule.
///
/// Touching does NOT count as colliding (strict inequality) — the
/// intentional asymmetry with [`sphere_intersects_sphere`], expressing
/// penetration rather than contact.
///
/// # Example
///
/// ```
/// use convex_collision::{primitives::sphere_intersects_capsule, Capsule, Sphere};
/// use nalgebra::Point3;
///
/// let capsule = Capsule::new(
///     Point3::new(0.0, 0.0, 0.0),
///     1.0,
///     Point3::new(4.0, 0.0, 0.0),
///     1.0,
/// );
///
/// // Exactly touching: not a collision
/// let touching = Sphere::new(Point3::new(2.0, 2.0, 0.0), 1.0);
/// assert!(!sphere_intersects_capsule(&touching, &capsule));
///
/// // Penetrating: a collision
/// let inside = Sphere::new(Point3::new(2.0, 1.5, 0.0), 1.0);
/// assert!(sphere_intersects_capsule(&inside, &capsule));
/// ```
#[must_use]
pub fn sphere_intersects_capsule(sphere: &Sphere, capsule: &Capsule) -> bool {
    let (distance, combined) = capsule_gap(sphere, capsule);
    distance < combined && !is_close(distance, combined)
}

/// Test one sphere against many capsules. Identical math to
/// [`sphere_intersects_capsule`], vectorized over the targets.
#[must_use]
pub fn sphere_intersects_capsules(sphere: &Sphere, capsules: &[Capsule]) -> Vec<bool> {
    capsules
        .iter()
        .map(|capsule| sphere_intersects_capsule(sphere, capsule))
        .collect()
}

/// Test whether a point lies inside (or on) a convex region given by its
/// faces.
///
/// `face_points` and `face_normals` are parallel slices: one sample point
/// and one outward normal per face. The point is inside when its signed
/// distance to every face is non-positive within tolerance.
///
/// # Example
///
/// ```
/// use convex_collision::primitives::convex_contains_point;
/// use nalgebra::{Point3, Vector3};
///
/// // Unit cube faces (sample point + outward normal per face)
/// let face_points = vec![
///     Point3::new(0.0, 0.5, 0.5),
///     Point3::new(1.0, 0.5, 0.5),
///     Point3::new(0.5, 0.0, 0.5),
///     Point3::new(0.5, 1.0, 0.5),
///     Point3::new(0.5, 0.5, 0.0),
///     Point3::new(0.5, 0.5, 1.0),
/// ];
/// let face_normals = vec![
///     -Vector3::x(),
///     Vector3::x(),
///     -Vector3::y(),
///     Vector3::y(),
///     -Vector3::z(),
///     Vector3::z(),
/// ];
///
/// assert!(convex_contains_point(
///     &face_points,
///     &face_normals,
///     &Point3::new(0.5, 0.5, 0.5),
/// ));
/// assert!(!convex_contains_point(
///     &face_points,
///     &face_normals,
///     &Point3::new(1.5, 0.5, 0.5),
/// ));
/// ```
#[must_use]
pub fn convex_contains_point(
    face_points: &[Point3<f64>],
    face_normals: &[Vector3<f64>],
    point: &Point3<f64>,
) -> bool {
    debug_assert_eq!(face_points.len(), face_normals.len());
    face_points
        .iter()
        .zip(face_normals)
        .all(|(face_point, normal)| {
            let signed = normal.dot(&(point - face_point));
            signed <= 0.0 || is_close(signed, 0.0)
        })
}

/// Test many spheres (or points, with `radii = None`) against a convex
/// region given by its faces.
///
/// Per target: the signed distance to each face, optionally deflated by
/// the target's own radius, is snapped to exactly zero when within
/// tolerance of it; the target does not collide iff it ends up strictly
/// outside any single face's outward half-space.
#[must_use]
pub fn convex_intersects_spheres(
    face_points: &[Point3<f64>],
    face_normals: &[Vector3<f64>],
    targets: &[Point3<f64>],
    radii: Option<&[f64]>,
) -> Vec<bool> {
    debug_assert_eq!(face_points.len(), face_normals.len());
    if let Some(radii) = radii {
        debug_assert_eq!(targets.len(), radii.len());
    }

    targets
        .iter()
        .enumerate()
        .map(|(row, target)| {
            let excluded = face_points
                .iter()
                .zip(face_normals)
                .any(|(face_point, normal)| {
                    let mut signed = normal.dot(&(target - face_point));
                    if let Some(radii) = radii {
                        signed -= radii[row];
                    }
                    // Snap near-zero distances to exactly zero for stability
                    if is_close(signed, 0.0) {
                        signed = 0.0;
                    }
                    signed > 0.0
                });
            !excluded
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn unit_cube_faces() -> (Vec<Point3<f64>>, Vec<Vector3<f64>>) {
        let points = vec![
            Point3::new(0.0, 0.5, 0.5),
            Point3::new(1.0, 0.5, 0.5),
            Point3::new(0.5, 0.0, 0.5),
            Point3::new(0.5, 1.0, 0.5),
            Point3::new(0.5, 0.5, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let normals = vec![
            -Vector3::x(),
            Vector3::x(),
            -Vector3::y(),
            Vector3::y(),
            -Vector3::z(),
            Vector3::z(),
        ];
        (points, normals)
    }

    #[test]
    fn is_close_tolerances() {
        assert!(is_close(1.0, 1.0 + 1e-9));
        assert!(is_close(0.0, 1e-9));
        assert!(!is_close(0.0, 1e-3));
        assert!(is_close(1e6, 1e6 + 1.0));
    }

    #[test]
    fn sphere_sphere_touching_collides() {
        // Exactly touching: non-strict inequality must report true
        let a = Sphere::new(Point3::new(0.0, 0.0, 0.0), 1.0);
        let b = Sphere::new(Point3::new(2.0, 0.0, 0.0), 1.0);
        assert!(sphere_intersects_sphere(&a, &b));
    }

    #[test]
    fn sphere_sphere_separated() {
        let a = Sphere::new(Point3::new(0.0, 0.0, 0.0), 1.0);
        let b = Sphere::new(Point3::new(2.1, 0.0, 0.0), 1.0);
        assert!(!sphere_intersects_sphere(&a, &b));
    }

    #[test]
    fn sphere_spheres_batched() {
        let flags = sphere_intersects_spheres(
            &Point3::new(0.0, 0.0, 0.0),
            1.0,
            &[
                Point3::new(1.0, 0.0, 0.0), // overlapping
                Point3::new(2.0, 0.0, 0.0), // touching
                Point3::new(5.0, 0.0, 0.0), // separated
            ],
            &[1.0, 1.0, 1.0],
        );
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn sphere_capsule_touching_does_not_collide() {
        // Exactly touching: strict inequality must report false, the
        // intentional asymmetry with sphere-sphere
        let capsule = Capsule::new(
            Point3::new(0.0, 0.0, 0.0),
            1.0,
            Point3::new(4.0, 0.0, 0.0),
            1.0,
        );
        let touching = Sphere::new(Point3::new(2.0, 2.0, 0.0), 1.0);
        assert!(!sphere_intersects_capsule(&touching, &capsule));
    }

    #[test]
    fn sphere_capsule_penetrating() {
        let capsule = Capsule::new(
            Point3::new(0.0, 0.0, 0.0),
            1.0,
            Point3::new(4.0, 0.0, 0.0),
            1.0,
        );
        let inside = Sphere::new(Point3::new(2.0, 1.5, 0.0), 1.0);
        assert!(sphere_intersects_capsule(&inside, &capsule));
    }

    #[test]
    fn sphere_capsule_interpolated_radius() {
        // Radius tapers 2.0 -> 1.0 along x in [0, 4]; at x = 2 it is 1.5.
        let capsule = Capsule::new(
            Point3::new(0.0, 0.0, 0.0),
            2.0,
            Point3::new(4.0, 0.0, 0.0),
            1.0,
        );
        let just_inside = Sphere::new(Point3::new(2.0, 2.4, 0.0), 1.0);
        let just_outside = Sphere::new(Point3::new(2.0, 2.6, 0.0), 1.0);
        assert!(sphere_intersects_capsule(&just_inside, &capsule));
        assert!(!sphere_intersects_capsule(&just_outside, &capsule));
    }

    #[test]
    fn sphere_capsule_beyond_endpoint_clamps() {
        // Beyond the segment ends, the closest feature is the endpoint
        // sphere; the projection parameter clamps to [0, 1].
        let capsule = Capsule::new(
            Point3::new(0.0, 0.0, 0.0),
            1.0,
            Point3::new(4.0, 0.0, 0.0),
            1.0,
        );
        let near_end = Sphere::new(Point3::new(5.5, 0.0, 0.0), 1.0);
        let far = Sphere::new(Point3::new(7.0, 0.0, 0.0), 1.0);
        assert!(sphere_intersects_capsule(&near_end, &capsule));
        assert!(!sphere_intersects_capsule(&far, &capsule));
    }

    #[test]
    fn sphere_capsules_batched() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, 0.0), 1.0);
        let capsules = vec![
            Capsule::new(
                Point3::new(0.0, 1.0, 0.0),
                0.2,
                Point3::new(4.0, 1.0, 0.0),
                0.2,
            ),
            Capsule::new(
                Point3::new(0.0, 5.0, 0.0),
                0.2,
                Point3::new(4.0, 5.0, 0.0),
                0.2,
            ),
        ];
        let flags = sphere_intersects_capsules(&sphere, &capsules);
        assert_eq!(flags, vec![true, false]);
    }

    #[test]
    fn convex_point_inside_and_on_boundary() {
        let (face_points, face_normals) = unit_cube_faces();

        assert!(convex_contains_point(
            &face_points,
            &face_normals,
            &Point3::new(0.5, 0.5, 0.5),
        ));
        // On a face: within tolerance of zero counts as inside
        assert!(convex_contains_point(
            &face_points,
            &face_normals,
            &Point3::new(1.0, 0.5, 0.5),
        ));
        assert!(!convex_contains_point(
            &face_points,
            &face_normals,
            &Point3::new(1.1, 0.5, 0.5),
        ));
    }

    #[test]
    fn convex_point_idempotent() {
        // Pure function: re-evaluation with identical inputs cannot flip
        let (face_points, face_normals) = unit_cube_faces();
        let point = Point3::new(0.25, 0.75, 0.5);
        let first = convex_contains_point(&face_points, &face_normals, &point);
        for _ in 0..10 {
            assert_eq!(
                first,
                convex_contains_point(&face_points, &face_normals, &point)
            );
        }
    }

    #[test]
    fn convex_spheres_deflated_by_radius() {
        let (face_points, face_normals) = unit_cube_faces();
        let targets = vec![
            Point3::new(0.5, 0.5, 0.5), // center: always inside
            Point3::new(1.4, 0.5, 0.5), // outside as a point, touching as r=0.5
            Point3::new(2.0, 0.5, 0.5), // outside either way
        ];

        let as_points = convex_intersects_spheres(&face_points, &face_normals, &targets, None);
        assert_eq!(as_points, vec![true, false, false]);

        let radii = vec![0.5, 0.5, 0.5];
        let as_spheres =
            convex_intersects_spheres(&face_points, &face_normals, &targets, Some(&radii));
        assert_eq!(as_spheres, vec![true, true, false]);
    }

    #[test]
    fn convex_spheres_snaps_near_zero() {
        // A distance within tolerance of zero snaps to exactly zero and
        // therefore does not exclude the target
        let (face_points, face_normals) = unit_cube_faces();
        let grazing = vec![Point3::new(1.0 + 1e-9, 0.5, 0.5)];
        let flags = convex_intersects_spheres(&face_points, &face_normals, &grazing, None);
        assert_eq!(flags, vec![true]);
    }
}
