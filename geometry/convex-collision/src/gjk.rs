//! GJK (Gilbert-Johnson-Keerthi) intersection testing.
//!
//! GJK works in Minkowski space (the "Minkowski difference" of two shapes).
//! Two convex shapes overlap exactly when their Minkowski difference
//! contains the origin. The algorithm grows a simplex of support points —
//! line, triangle, tetrahedron — that tries to enclose the origin:
//!
//! 1. **Line phase**: seed two points along the initial direction (centroid
//!    difference, or unit X when the centroids coincide exactly) and its
//!    negation.
//! 2. **Triangle phase**: repeatedly pick a support point perpendicular to
//!    the current edge, toward the origin, replacing whichever simplex
//!    vertex the region tests discard, until a triangle brackets the origin
//!    or the iteration budget runs out (no collision).
//! 3. **Tetrahedron phase**: extend to four points and walk the candidate
//!    faces (`abc`, `acd`, `adb`); the shapes collide once no face excludes
//!    the origin. Exhausting the budget reports no collision.
//!
//! # Numeric policy
//!
//! The refinement loops use **strict sign comparisons** (`> 0.0`) with no
//! epsilon, so configurations that touch exactly on the boundary may
//! resolve either way depending on rounding. This matches the system being
//! modeled and is deliberately not "fixed" here; the closed-form
//! [`crate::primitives`] use tolerance-aware comparisons instead. A
//! `max_iterations` that is too small biases hard-to-converge intersecting
//! pairs toward `false` — an accuracy/performance tradeoff owned by the
//! caller, not an error.
//!
//! # References
//!
//! - Gilbert, Johnson, Keerthi: "A Fast Procedure for Computing the
//!   Distance Between Complex Objects in Three-Dimensional Space" (1988)
//! - van den Bergen: "Collision Detection in Interactive 3D Environments"

use nalgebra::{Point3, Vector3};

use crate::shape::SupportMap;

/// A simplex of 1-4 points in Minkowski-difference space.
///
/// Points are pure values; no back-reference to the source shapes is kept.
/// The most recently added point is always at index 0.
#[derive(Debug, Clone)]
struct Simplex {
    points: [Point3<f64>; 4],
    len: usize,
}

impl Simplex {
    fn new() -> Self {
        Self {
            points: [Point3::origin(); 4],
            len: 0,
        }
    }

    /// Push a point, shifting existing points back. Capacity is 4.
    fn push(&mut self, point: Point3<f64>) {
        for i in (1..=self.len.min(3)).rev() {
            self.points[i] = self.points[i - 1];
        }
        self.points[0] = point;
        self.len = (self.len + 1).min(4);
    }

    /// Replace the simplex contents.
    fn set(&mut self, points: &[Point3<f64>]) {
        self.len = points.len().min(4);
        for (i, p) in points.iter().take(4).enumerate() {
            self.points[i] = *p;
        }
    }

    fn len(&self) -> usize {
        self.len
    }
}

/// Support point on the Minkowski difference `A - B` along `direction`.
///
/// The direction is renormalized before each shape query, upholding the
/// unit-length contract of [`SupportMap::support`].
fn minkowski_support<A, B>(shape_a: &A, shape_b: &B, direction: &Vector3<f64>) -> Point3<f64>
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    let unit = direction.normalize();
    let farthest_a = shape_a.support(&unit);
    let farthest_b = shape_b.support(&(-unit));
    Point3::from(farthest_a - farthest_b)
}

/// Triple product: `(a x b) x c = b(a.c) - a(b.c)`.
///
/// Computes a vector perpendicular to `a` pointing toward `c`.
#[inline]
fn triple_product(a: &Vector3<f64>, b: &Vector3<f64>, c: &Vector3<f64>) -> Vector3<f64> {
    b * a.dot(c) - a * b.dot(c)
}

/// Any vector perpendicular to `v` (crosses with the least-aligned axis).
fn any_perpendicular(v: &Vector3<f64>) -> Vector3<f64> {
    let axis = if v.x.abs() <= v.y.abs() && v.x.abs() <= v.z.abs() {
        Vector3::x()
    } else if v.y.abs() <= v.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    v.cross(&axis)
}

/// Direction perpendicular to edge `ab`, toward the origin (`ao`).
///
/// Falls back to an arbitrary perpendicular when the origin sits exactly on
/// the edge's carrier line, keeping search directions non-zero by
/// construction.
fn perpendicular_toward(ab: &Vector3<f64>, ao: &Vector3<f64>) -> Vector3<f64> {
    let direction = triple_product(ab, ao, ab);
    if direction == Vector3::zeros() {
        any_perpendicular(ab)
    } else {
        direction
    }
}

/// Line case: choose the next search direction from a 2-point simplex.
fn do_line(simplex: &mut Simplex, direction: &mut Vector3<f64>) {
    let a = simplex.points[0];
    let b = simplex.points[1];

    let ab = b - a;
    let ao = -a.coords;

    if ab.dot(&ao) > 0.0 {
        *direction = perpendicular_toward(&ab, &ao);
    } else {
        // Origin is beyond `a`; `b` is no longer needed.
        simplex.set(&[a]);
        *direction = ao;
    }
}

/// Shared edge handling for the triangle case.
fn line_case(
    simplex: &mut Simplex,
    direction: &mut Vector3<f64>,
    a: Point3<f64>,
    b: Point3<f64>,
    ab: &Vector3<f64>,
    ao: &Vector3<f64>,
) {
    if ab.dot(ao) > 0.0 {
        simplex.set(&[a, b]);
        *direction = perpendicular_toward(ab, ao);
    } else {
        simplex.set(&[a]);
        *direction = *ao;
    }
}

/// Triangle case: region tests for a 3-point simplex.
///
/// Returns `true` when the origin is bracketed by the triangle's in-plane
/// region, leaving `direction` pointing from the triangle toward the
/// origin (and the winding arranged so the next support extends correctly).
/// Returns `false` after discarding a vertex and updating `direction`.
fn do_triangle(simplex: &mut Simplex, direction: &mut Vector3<f64>) -> bool {
    let a = simplex.points[0];
    let b = simplex.points[1];
    let c = simplex.points[2];

    let ab = b - a;
    let ac = c - a;
    let ao = -a.coords;

    let abc = ab.cross(&ac);

    if abc.cross(&ac).dot(&ao) > 0.0 {
        // Origin outside edge AC
        if ac.dot(&ao) > 0.0 {
            simplex.set(&[a, c]);
            *direction = perpendicular_toward(&ac, &ao);
        } else {
            line_case(simplex, direction, a, b, &ab, &ao);
        }
        false
    } else if ab.cross(&abc).dot(&ao) > 0.0 {
        // Origin outside edge AB
        line_case(simplex, direction, a, b, &ab, &ao);
        false
    } else {
        // Origin bracketed by the in-plane region: search toward it
        if abc.dot(&ao) > 0.0 {
            *direction = abc;
        } else {
            // Below the triangle: flip the winding so the apex extends
            // toward the origin side
            simplex.set(&[a, c, b]);
            *direction = -abc;
        }
        true
    }
}

/// Tetrahedron case: face tests for a 4-point simplex.
///
/// Returns `true` when no candidate face (`abc`, `acd`, `adb`) excludes
/// the origin — the tetrahedron encloses it. Otherwise reduces the simplex
/// to the excluding face and re-runs the triangle tests to pick the next
/// direction.
fn do_tetrahedron(simplex: &mut Simplex, direction: &mut Vector3<f64>) -> bool {
    let a = simplex.points[0];
    let b = simplex.points[1];
    let c = simplex.points[2];
    let d = simplex.points[3];

    let ab = b - a;
    let ac = c - a;
    let ad = d - a;
    let ao = -a.coords;

    let abc = ab.cross(&ac);
    let acd = ac.cross(&ad);
    let adb = ad.cross(&ab);

    if abc.dot(&ao) > 0.0 {
        simplex.set(&[a, b, c]);
        do_triangle(simplex, direction);
        return false;
    }

    if acd.dot(&ao) > 0.0 {
        simplex.set(&[a, c, d]);
        do_triangle(simplex, direction);
        return false;
    }

    if adb.dot(&ao) > 0.0 {
        simplex.set(&[a, d, b]);
        do_triangle(simplex, direction);
        return false;
    }

    // No face excludes the origin: it is inside the tetrahedron
    true
}

/// Test whether two convex shapes intersect.
///
/// `max_iterations` bounds the simplex-refinement steps of the triangle
/// and tetrahedron phases. There is no convergence guarantee beyond this
/// bound: exhaustion is a defined negative result, not an error, and a
/// budget that is too small biases genuinely intersecting but
/// hard-to-converge pairs toward `false`. This function never panics and
/// never allocates.
///
/// # Example
///
/// ```
/// use convex_collision::{collides, Sphere};
/// use nalgebra::Point3;
///
/// let a = Sphere::new(Point3::new(0.0, 0.0, 0.0), 1.0);
/// let near = Sphere::new(Point3::new(1.5, 0.0, 0.0), 1.0);
/// let far = Sphere::new(Point3::new(3.0, 0.0, 0.0), 1.0);
///
/// assert!(collides(&a, &near, 32));
/// assert!(!collides(&a, &far, 32));
/// ```
#[must_use]
pub fn collides<A, B>(shape_a: &A, shape_b: &B, max_iterations: usize) -> bool
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    // Initial direction: from A's centroid toward B's. Coincident
    // centroids (exact equality) fall back to the unit X axis so the
    // support query never sees a zero-length direction.
    let mut direction = shape_b.centroid() - shape_a.centroid();
    if direction == Vector3::zeros() {
        direction = Vector3::x();
    }

    // Line phase: two points along the seed direction and its negation.
    let mut simplex = Simplex::new();
    simplex.push(minkowski_support(shape_a, shape_b, &direction));
    simplex.push(minkowski_support(shape_a, shape_b, &(-direction)));
    do_line(&mut simplex, &mut direction);

    // Triangle phase.
    let mut found_triangle = false;
    for _ in 0..max_iterations {
        if direction == Vector3::zeros() {
            // The origin coincides with a simplex feature: contained.
            return true;
        }
        let point = minkowski_support(shape_a, shape_b, &direction);
        if point.coords.dot(&direction) < 0.0 {
            // The new support cannot pass the origin: the whole Minkowski
            // difference lies on one side of it.
            return false;
        }
        simplex.push(point);
        found_triangle = if simplex.len() == 3 {
            do_triangle(&mut simplex, &mut direction)
        } else {
            do_line(&mut simplex, &mut direction);
            false
        };
        if found_triangle {
            break;
        }
    }
    if !found_triangle {
        return false;
    }

    // Tetrahedron phase.
    for _ in 0..max_iterations {
        if direction == Vector3::zeros() {
            return true;
        }
        let point = minkowski_support(shape_a, shape_b, &direction);
        if point.coords.dot(&direction) < 0.0 {
            return false;
        }
        simplex.push(point);
        let enclosed = match simplex.len() {
            4 => do_tetrahedron(&mut simplex, &mut direction),
            3 => {
                do_triangle(&mut simplex, &mut direction);
                false
            }
            _ => {
                do_line(&mut simplex, &mut direction);
                false
            }
        };
        if enclosed {
            return true;
        }
    }

    false
}
