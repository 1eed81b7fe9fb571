//! Convex shapes and the support-mapping capability.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A convex shape queryable through its support mapping.
///
/// The support mapping returns the point on the shape farthest along a
/// given direction; it is the only geometric capability GJK needs. The
/// trait is deliberately flat: spheres, capsules and polytopes implement it
/// directly, with no shape hierarchy.
///
/// # Contract
///
/// `direction` is unit length. Callers (the GJK driver in this crate)
/// renormalize every direction before querying, so implementations may rely
/// on it without re-checking.
pub trait SupportMap {
    /// The point on the shape farthest along `direction` (unit length).
    fn support(&self, direction: &Vector3<f64>) -> Point3<f64>;

    /// An interior reference point, used to seed search directions.
    fn centroid(&self) -> Point3<f64>;
}

/// A sphere defined by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sphere {
    /// Center in world space.
    pub center: Point3<f64>,
    /// Radius.
    pub radius: f64,
}

impl Sphere {
    /// Create a new sphere.
    #[inline]
    #[must_use]
    pub const fn new(center: Point3<f64>, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl SupportMap for Sphere {
    #[inline]
    fn support(&self, direction: &Vector3<f64>) -> Point3<f64> {
        self.center + direction * self.radius
    }

    #[inline]
    fn centroid(&self) -> Point3<f64> {
        self.center
    }
}

/// A capsule spanned by two endpoint spheres with independent radii.
///
/// With `radius0 == radius1` this is the ordinary capsule; with differing
/// radii it is the convex hull of the two endpoint spheres (a conical
/// frustum with spherical caps), which is how tapering vessel segments are
/// modeled.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Capsule {
    /// First endpoint center.
    pub p0: Point3<f64>,
    /// Radius at the first endpoint.
    pub radius0: f64,
    /// Second endpoint center.
    pub p1: Point3<f64>,
    /// Radius at the second endpoint.
    pub radius1: f64,
}

impl Capsule {
    /// Create a new capsule from two endpoint spheres.
    #[inline]
    #[must_use]
    pub const fn new(p0: Point3<f64>, radius0: f64, p1: Point3<f64>, radius1: f64) -> Self {
        Self {
            p0,
            radius0,
            p1,
            radius1,
        }
    }
}

impl SupportMap for Capsule {
    fn support(&self, direction: &Vector3<f64>) -> Point3<f64> {
        // The hull's support is the better of the two endpoint-sphere
        // supports: extent along the direction = center . d + radius.
        let extent0 = self.p0.coords.dot(direction) + self.radius0;
        let extent1 = self.p1.coords.dot(direction) + self.radius1;
        if extent0 >= extent1 {
            self.p0 + direction * self.radius0
        } else {
            self.p1 + direction * self.radius1
        }
    }

    #[inline]
    fn centroid(&self) -> Point3<f64> {
        Point3::from((self.p0.coords + self.p1.coords) * 0.5)
    }
}

/// An arbitrary convex polytope given as its vertex cloud.
///
/// The vertices must describe a convex body; interior points are harmless
/// but wasted. An empty cloud is not meaningful and queries on it return
/// the origin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConvexPolytope {
    vertices: Vec<Point3<f64>>,
}

impl ConvexPolytope {
    /// Create a polytope from its vertex cloud.
    #[inline]
    #[must_use]
    pub fn new(vertices: Vec<Point3<f64>>) -> Self {
        debug_assert!(!vertices.is_empty(), "polytope needs at least one vertex");
        Self { vertices }
    }

    /// The vertex cloud.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }
}

impl SupportMap for ConvexPolytope {
    fn support(&self, direction: &Vector3<f64>) -> Point3<f64> {
        let mut max_dot = f64::NEG_INFINITY;
        let mut best = Point3::origin();
        for vertex in &self.vertices {
            let dot = vertex.coords.dot(direction);
            if dot > max_dot {
                max_dot = dot;
                best = *vertex;
            }
        }
        best
    }

    #[allow(clippy::cast_precision_loss)]
    fn centroid(&self) -> Point3<f64> {
        if self.vertices.is_empty() {
            return Point3::origin();
        }
        let sum: Vector3<f64> = self.vertices.iter().map(|p| p.coords).sum();
        Point3::from(sum / self.vertices.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sphere_support() {
        let sphere = Sphere::new(Point3::new(1.0, 2.0, 3.0), 0.5);
        let support = sphere.support(&Vector3::x());
        assert_relative_eq!(support.x, 1.5, epsilon = 1e-10);
        assert_relative_eq!(support.y, 2.0, epsilon = 1e-10);
        assert_relative_eq!(support.z, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn capsule_support_picks_better_endpoint() {
        let capsule = Capsule::new(
            Point3::new(0.0, 0.0, 0.0),
            1.0,
            Point3::new(4.0, 0.0, 0.0),
            0.5,
        );

        // +X favors the far endpoint despite its smaller radius
        let support = capsule.support(&Vector3::x());
        assert_relative_eq!(support.x, 4.5, epsilon = 1e-10);

        // -X favors the near, fatter endpoint
        let support = capsule.support(&(-Vector3::x()));
        assert_relative_eq!(support.x, -1.0, epsilon = 1e-10);
    }

    #[test]
    fn capsule_centroid_is_midpoint() {
        let capsule = Capsule::new(
            Point3::new(0.0, 0.0, 0.0),
            1.0,
            Point3::new(2.0, 4.0, 6.0),
            1.0,
        );
        let c = capsule.centroid();
        assert_relative_eq!(c.x, 1.0, epsilon = 1e-10);
        assert_relative_eq!(c.y, 2.0, epsilon = 1e-10);
        assert_relative_eq!(c.z, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn polytope_support_is_extreme_vertex() {
        let cube = ConvexPolytope::new(vec![
            Point3::new(-1.0, -1.0, -1.0),
            Point3::new(1.0, -1.0, -1.0),
            Point3::new(1.0, 1.0, -1.0),
            Point3::new(-1.0, 1.0, -1.0),
            Point3::new(-1.0, -1.0, 1.0),
            Point3::new(1.0, -1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(-1.0, 1.0, 1.0),
        ]);

        let dir = Vector3::new(1.0, 1.0, 1.0).normalize();
        let support = cube.support(&dir);
        assert_relative_eq!(support.x, 1.0, epsilon = 1e-10);
        assert_relative_eq!(support.y, 1.0, epsilon = 1e-10);
        assert_relative_eq!(support.z, 1.0, epsilon = 1e-10);

        let c = cube.centroid();
        assert_relative_eq!(c.x, 0.0, epsilon = 1e-10);
    }
}
