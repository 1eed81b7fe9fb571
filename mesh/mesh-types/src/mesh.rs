//! Indexed triangle mesh.

use crate::{MeshError, MeshResult, Triangle};
use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// Stores points and triangles separately, with triangles referencing
/// points by index.
///
/// # Memory Layout
///
/// - `points`: `Vec<Point3<f64>>` - Point positions
/// - `triangles`: `Vec<[u32; 3]>` - Triangles as point indices
///
/// # Invariant
///
/// Every triangle index is smaller than `points.len()`. The checked
/// constructor [`TriMesh::try_from_parts`] enforces this at the boundary;
/// [`TriMesh::from_parts`] trusts the caller.
///
/// # Example
///
/// ```
/// use mesh_types::{TriMesh, Point3};
///
/// let mut mesh = TriMesh::new();
/// mesh.points.push(Point3::new(0.0, 0.0, 0.0));
/// mesh.points.push(Point3::new(1.0, 0.0, 0.0));
/// mesh.points.push(Point3::new(0.0, 1.0, 0.0));
/// mesh.triangles.push([0, 1, 2]);
///
/// assert_eq!(mesh.point_count(), 3);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriMesh {
    /// Point positions.
    pub points: Vec<Point3<f64>>,

    /// Triangles as indices into the point array.
    pub triangles: Vec<[u32; 3]>,
}

impl TriMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            points: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(point_count: usize, triangle_count: usize) -> Self {
        Self {
            points: Vec::with_capacity(point_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Create a mesh from points and triangles without validation.
    ///
    /// The caller is responsible for the index invariant; prefer
    /// [`TriMesh::try_from_parts`] at trust boundaries.
    #[inline]
    #[must_use]
    pub const fn from_parts(points: Vec<Point3<f64>>, triangles: Vec<[u32; 3]>) -> Self {
        Self { points, triangles }
    }

    /// Create a mesh from points and triangles, validating every index.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidTriangleIndex`] if any triangle
    /// references a point index `>= points.len()`.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{TriMesh, Point3};
    ///
    /// let points = vec![Point3::new(0.0, 0.0, 0.0)];
    /// assert!(TriMesh::try_from_parts(points, vec![[0, 0, 1]]).is_err());
    /// ```
    pub fn try_from_parts(
        points: Vec<Point3<f64>>,
        triangles: Vec<[u32; 3]>,
    ) -> MeshResult<Self> {
        let point_count = points.len();
        for triangle in &triangles {
            for &index in triangle {
                if index as usize >= point_count {
                    return Err(MeshError::InvalidTriangleIndex { index, point_count });
                }
            }
        }
        Ok(Self { points, triangles })
    }

    /// Get the number of points.
    #[inline]
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Get the number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Get a point by index.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<&Point3<f64>> {
        self.points.get(index)
    }

    /// Get a concrete triangle by index.
    #[must_use]
    pub fn triangle(&self, index: usize) -> Option<Triangle> {
        self.triangles.get(index).map(|&[i0, i1, i2]| {
            Triangle::new(
                self.points[i0 as usize],
                self.points[i1 as usize],
                self.points[i2 as usize],
            )
        })
    }

    /// Iterate over concrete triangles.
    pub fn iter_triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.triangles.iter().map(|&[i0, i1, i2]| {
            Triangle::new(
                self.points[i0 as usize],
                self.points[i1 as usize],
                self.points[i2 as usize],
            )
        })
    }

    /// Compute every triangle's area from its edge vectors.
    ///
    /// Degenerate triangles contribute `0.0`.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{TriMesh, Point3};
    ///
    /// let mesh = TriMesh::try_from_parts(
    ///     vec![
    ///         Point3::new(0.0, 0.0, 0.0),
    ///         Point3::new(2.0, 0.0, 0.0),
    ///         Point3::new(0.0, 2.0, 0.0),
    ///     ],
    ///     vec![[0, 1, 2]],
    /// )
    /// .unwrap();
    ///
    /// let areas = mesh.triangle_areas();
    /// assert!((areas[0] - 2.0).abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn triangle_areas(&self) -> Vec<f64> {
        self.iter_triangles().map(|tri| tri.area()).collect()
    }

    /// Compute the total surface area of the mesh.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.iter_triangles().map(|tri| tri.area()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangle_mesh() -> TriMesh {
        // Two disjoint right triangles with legs 1 and 2
        TriMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(5.0, 0.0, 0.0),
                Point3::new(7.0, 0.0, 0.0),
                Point3::new(5.0, 2.0, 0.0),
            ],
            vec![[0, 1, 2], [3, 4, 5]],
        )
    }

    #[test]
    fn empty_mesh() {
        let mesh = TriMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.point_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn invalid_index_rejected() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let result = TriMesh::try_from_parts(points, vec![[0, 1, 3]]);
        assert!(matches!(
            result,
            Err(MeshError::InvalidTriangleIndex {
                index: 3,
                point_count: 3
            })
        ));
    }

    #[test]
    fn valid_mesh_accepted() {
        let mesh = two_triangle_mesh();
        let checked = TriMesh::try_from_parts(mesh.points.clone(), mesh.triangles.clone());
        assert!(checked.is_ok());
    }

    #[test]
    fn triangle_areas() {
        let mesh = two_triangle_mesh();
        let areas = mesh.triangle_areas();
        assert_eq!(areas.len(), 2);
        assert!((areas[0] - 0.5).abs() < 1e-10);
        assert!((areas[1] - 2.0).abs() < 1e-10);
    }

    #[test]
    fn surface_area_sums_triangles() {
        let mesh = two_triangle_mesh();
        assert!((mesh.surface_area() - 2.5).abs() < 1e-10);
    }

    #[test]
    fn concrete_triangle_lookup() {
        let mesh = two_triangle_mesh();
        let tri = mesh.triangle(1);
        assert!(tri.is_some());
        let tri = tri.unwrap_or_else(|| Triangle::new(
            Point3::origin(),
            Point3::origin(),
            Point3::origin(),
        ));
        assert!((tri.v0.x - 5.0).abs() < f64::EPSILON);
        assert!(mesh.triangle(2).is_none());
    }
}
