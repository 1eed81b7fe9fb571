//! Per-group endfoot reconstruction.
//!
//! Turns a grouped, travel-time-annotated triangulation into a lazy
//! sequence of [`EndfootMesh`] records: one per non-empty group, in
//! ascending group-id order, shrunk toward its target area where
//! over-grown, and re-indexed into a compact local index space.

use hashbrown::HashMap;
use mesh_types::{Point3, TriMesh, Triangle};
use tracing::debug;

use crate::error::{EndfeetError, EndfeetResult};
use crate::field::FrontField;
use crate::grouping::{triangle_groups, GroupedTriangles};
use crate::metrics::{group_areas, triangle_travel_times};
use crate::shrink::shrink_to_target;

/// A reconstructed endfoot surface region.
///
/// Created once per non-empty group during a reconstruction pass and
/// immutable thereafter. `points` and `triangles` live in a compact local
/// index space; `points` is ordered by ascending *global* point id, so
/// outputs are index-stable regardless of triangle visitation order.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndfootMesh {
    /// Group id this region grew from.
    pub index: usize,
    /// Local-index point array (ascending global id order).
    pub points: Vec<Point3<f64>>,
    /// Local-index triangle array; values refer into `points`.
    pub triangles: Vec<[u32; 3]>,
    /// Surface area after any shrink, recomputed from the local triangles.
    pub area: f64,
    /// Surface area before shrinking.
    pub unreduced_area: f64,
    /// Sampled endfoot thickness.
    pub thickness: f64,
}

/// Remap a triangle subset from the global mesh index space to a compact
/// local one.
///
/// The local point array holds the sorted set of unique global point ids
/// referenced by `triangle_ids` — ascending global id order, not triangle
/// visitation order — and each triangle's indices are rewritten through
/// the global-to-local table. Vertex uniqueness and triangle topology are
/// preserved by construction.
///
/// # Panics
///
/// Panics if a triangle references a point id missing from the remap
/// table. That cannot happen for ids drawn from `mesh` and indicates a bug
/// in the caller, not bad user input.
///
/// # Example
///
/// ```
/// use mesh_endfeet::extract_submesh;
/// use mesh_types::{TriMesh, Point3};
///
/// let mesh = TriMesh::try_from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///         Point3::new(1.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2], [1, 3, 2]],
/// )
/// .unwrap();
///
/// let (points, triangles) = extract_submesh(&mesh, &[1]);
/// // Global ids {1, 2, 3} compact to locals {0, 1, 2}
/// assert_eq!(points.len(), 3);
/// assert_eq!(triangles, vec![[0, 2, 1]]);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
// Truncation: local index spaces are strictly smaller than the global u32 space
pub fn extract_submesh(
    mesh: &TriMesh,
    triangle_ids: &[u32],
) -> (Vec<Point3<f64>>, Vec<[u32; 3]>) {
    // Sorted unique global ids define the local ordering
    let mut globals: Vec<u32> = triangle_ids
        .iter()
        .flat_map(|&t| mesh.triangles[t as usize])
        .collect();
    globals.sort_unstable();
    globals.dedup();

    let global_to_local: HashMap<u32, u32> = globals
        .iter()
        .enumerate()
        .map(|(local, &global)| (global, local as u32))
        .collect();

    let points = globals
        .iter()
        .map(|&global| mesh.points[global as usize])
        .collect();

    let triangles = triangle_ids
        .iter()
        .map(|&t| {
            let [i0, i1, i2] = mesh.triangles[t as usize];
            // Indexing panics on a missing id: remap-table invariant
            [
                global_to_local[&i0],
                global_to_local[&i1],
                global_to_local[&i2],
            ]
        })
        .collect();

    (points, triangles)
}

/// Surface area of a re-indexed submesh, summed from its local triangles.
fn local_area(points: &[Point3<f64>], triangles: &[[u32; 3]]) -> f64 {
    triangles
        .iter()
        .map(|&[i0, i1, i2]| {
            Triangle::new(
                points[i0 as usize],
                points[i1 as usize],
                points[i2 as usize],
            )
            .area()
        })
        .sum()
}

/// Lazy, pull-based producer of [`EndfootMesh`] records.
///
/// Yields one record per non-empty group in strictly ascending group-id
/// order; gap groups are silently skipped, never surfaced as empty records
/// or errors. Consumers may stop early without paying for unvisited
/// groups. Obtained from [`reconstruct_endfeet`] or the
/// [`crate::pipeline::endfeet_area_generation`] driver.
#[derive(Debug)]
pub struct EndfeetReconstruction<'a> {
    mesh: &'a TriMesh,
    grouped: GroupedTriangles,
    triangle_areas: Vec<f64>,
    triangle_times: Vec<f64>,
    group_areas: Vec<f64>,
    target_areas: Vec<f64>,
    thicknesses: Vec<f64>,
    next_group: usize,
}

impl<'a> EndfeetReconstruction<'a> {
    pub(crate) fn from_parts(
        mesh: &'a TriMesh,
        grouped: GroupedTriangles,
        triangle_areas: Vec<f64>,
        triangle_times: Vec<f64>,
        group_areas: Vec<f64>,
        target_areas: Vec<f64>,
        thicknesses: Vec<f64>,
    ) -> Self {
        Self {
            mesh,
            grouped,
            triangle_areas,
            triangle_times,
            group_areas,
            target_areas,
            thicknesses,
            next_group: 0,
        }
    }

    /// Simulated (pre-shrink) area of every group; gaps are `0.0`.
    #[must_use]
    pub fn group_areas(&self) -> &[f64] {
        &self.group_areas
    }

    /// Reconstruct a single group, shrinking if over target.
    fn reconstruct_group(&self, group: usize, triangle_ids: &[u32]) -> EndfootMesh {
        let current_area = self.group_areas[group];
        let target_area = self.target_areas[group];

        let retained: Vec<u32> = if current_area > target_area {
            let row_areas: Vec<f64> = triangle_ids
                .iter()
                .map(|&t| self.triangle_areas[t as usize])
                .collect();
            let row_times: Vec<f64> = triangle_ids
                .iter()
                .map(|&t| self.triangle_times[t as usize])
                .collect();
            let keep = shrink_to_target(&row_areas, &row_times, target_area);
            debug!(
                group,
                current_area,
                target_area,
                retained = keep.len(),
                total = triangle_ids.len(),
                "shrinking over-grown endfoot"
            );
            keep.iter().map(|&row| triangle_ids[row]).collect()
        } else {
            triangle_ids.to_vec()
        };

        let (points, triangles) = extract_submesh(self.mesh, &retained);
        // Recompute from the re-indexed geometry rather than trusting the
        // shrink step's own accounting; guards against drift
        let area = local_area(&points, &triangles);

        EndfootMesh {
            index: group,
            points,
            triangles,
            area,
            unreduced_area: current_area,
            thickness: self.thicknesses[group],
        }
    }
}

impl Iterator for EndfeetReconstruction<'_> {
    type Item = EndfootMesh;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_group < self.grouped.group_count() {
            let group = self.next_group;
            self.next_group += 1;

            let triangle_ids = self.grouped.triangles_of(group);
            if triangle_ids.is_empty() {
                // Gap group: expected, skipped silently
                continue;
            }

            return Some(self.reconstruct_group(group, triangle_ids));
        }
        None
    }
}

/// Grouping and per-triangle metrics shared by [`reconstruct_endfeet`]
/// and the [`crate::pipeline::endfeet_area_generation`] driver.
#[derive(Debug)]
pub(crate) struct PreparedGroups {
    pub grouped: GroupedTriangles,
    pub triangle_areas: Vec<f64>,
    pub triangle_times: Vec<f64>,
    pub group_areas: Vec<f64>,
}

/// Label, bucket and measure the mesh's triangles against a front field.
///
/// Fails fast on every collaborator-contract violation before any
/// reconstruction work starts.
pub(crate) fn prepare_groups(
    mesh: &TriMesh,
    field: &FrontField,
    group_count: usize,
) -> EndfeetResult<PreparedGroups> {
    if field.vertex_count() != mesh.point_count() {
        return Err(EndfeetError::CountMismatch {
            what: "front field vertices",
            expected: mesh.point_count(),
            actual: field.vertex_count(),
        });
    }

    let labels = triangle_groups(field.vertex_groups(), &mesh.triangles);
    let grouped = GroupedTriangles::from_labels(&labels, group_count)?;
    let triangle_areas = mesh.triangle_areas();
    let triangle_times = triangle_travel_times(mesh, field.travel_times())?;
    let areas = group_areas(&grouped, &triangle_areas);

    Ok(PreparedGroups {
        grouped,
        triangle_areas,
        triangle_times,
        group_areas: areas,
    })
}

/// Build the lazy reconstruction sequence from precomputed inputs.
///
/// `target_areas` and `thicknesses` are index-aligned with the seed
/// groups; their shared length defines the number of groups. Groups whose
/// current area exceeds their target are shrunk by travel-time-biased
/// triangle removal; all emitted records are re-indexed into compact local
/// index spaces.
///
/// # Errors
///
/// Fails fast, before any reconstruction, when the field is not aligned
/// with the mesh, the arrays disagree in length, or a group label violates
/// the solver contract.
pub fn reconstruct_endfeet<'a>(
    mesh: &'a TriMesh,
    field: &FrontField,
    target_areas: Vec<f64>,
    thicknesses: Vec<f64>,
) -> EndfeetResult<EndfeetReconstruction<'a>> {
    if thicknesses.len() != target_areas.len() {
        return Err(EndfeetError::CountMismatch {
            what: "thickness samples",
            expected: target_areas.len(),
            actual: thicknesses.len(),
        });
    }

    let prepared = prepare_groups(mesh, field, target_areas.len())?;

    Ok(EndfeetReconstruction::from_parts(
        mesh,
        prepared.grouped,
        prepared.triangle_areas,
        prepared.triangle_times,
        prepared.group_areas,
        target_areas,
        thicknesses,
    ))
}
