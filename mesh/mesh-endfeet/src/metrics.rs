//! Per-triangle and per-group metrics.

use mesh_types::TriMesh;

use crate::error::{EndfeetError, EndfeetResult};
use crate::grouping::GroupedTriangles;

/// Travel time of every triangle: the mean of its three vertices' times.
///
/// # Errors
///
/// Returns [`EndfeetError::CountMismatch`] if `vertex_travel_times` is not
/// index-aligned with the mesh's point array.
///
/// # Example
///
/// ```
/// use mesh_endfeet::triangle_travel_times;
/// use mesh_types::{TriMesh, Point3};
///
/// let mesh = TriMesh::try_from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// )
/// .unwrap();
///
/// let times = triangle_travel_times(&mesh, &[0.0, 1.0, 2.0]).unwrap();
/// assert!((times[0] - 1.0).abs() < 1e-10);
/// ```
pub fn triangle_travel_times(
    mesh: &TriMesh,
    vertex_travel_times: &[f64],
) -> EndfeetResult<Vec<f64>> {
    if vertex_travel_times.len() != mesh.point_count() {
        return Err(EndfeetError::CountMismatch {
            what: "vertex travel times",
            expected: mesh.point_count(),
            actual: vertex_travel_times.len(),
        });
    }

    Ok(mesh
        .triangles
        .iter()
        .map(|&[i0, i1, i2]| {
            (vertex_travel_times[i0 as usize]
                + vertex_travel_times[i1 as usize]
                + vertex_travel_times[i2 as usize])
                / 3.0
        })
        .collect())
}

/// Sum the member triangles' areas for every group.
///
/// The result has one entry per seed group; gap groups stay at `0.0` and
/// are skipped downstream.
#[must_use]
pub fn group_areas(grouped: &GroupedTriangles, triangle_areas: &[f64]) -> Vec<f64> {
    let mut areas = vec![0.0; grouped.group_count()];
    for (group, triangle_ids) in grouped.iter_assigned() {
        areas[group] = triangle_ids
            .iter()
            .map(|&t| triangle_areas[t as usize])
            .sum();
    }
    areas
}
