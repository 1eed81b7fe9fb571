//! Per-vertex front-propagation output.

use crate::error::{EndfeetError, EndfeetResult};

/// Group label type. Seed groups are `0..n_seeds`; [`UNASSIGNED`] marks
/// vertices no front reached.
pub type GroupId = i32;

/// Label for vertices and triangles not claimed by any seed.
pub const UNASSIGNED: GroupId = -1;

/// Per-vertex output of the external front-propagation solver.
///
/// Stores, for every mesh vertex, the travel time from the nearest seed
/// and the seed group that claimed it. Both arrays are index-aligned with
/// the mesh's point array.
///
/// # Example
///
/// ```
/// use mesh_endfeet::{FrontField, UNASSIGNED};
///
/// let field = FrontField::new(
///     vec![0.0, 1.0, 2.0, f64::INFINITY],
///     vec![0, 0, 1, UNASSIGNED],
/// )
/// .unwrap();
///
/// assert_eq!(field.vertex_count(), 4);
/// assert_eq!(field.group_of(2), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FrontField {
    travel_times: Vec<f64>,
    vertex_groups: Vec<GroupId>,
}

impl FrontField {
    /// Create a field from per-vertex travel times and group labels.
    ///
    /// # Errors
    ///
    /// Returns [`EndfeetError::CountMismatch`] if the arrays differ in
    /// length and [`EndfeetError::NegativeTravelTime`] if any travel time
    /// is negative (`+inf` for unreached vertices is fine).
    pub fn new(travel_times: Vec<f64>, vertex_groups: Vec<GroupId>) -> EndfeetResult<Self> {
        if travel_times.len() != vertex_groups.len() {
            return Err(EndfeetError::CountMismatch {
                what: "vertex group labels",
                expected: travel_times.len(),
                actual: vertex_groups.len(),
            });
        }
        for (vertex, &value) in travel_times.iter().enumerate() {
            if value < 0.0 {
                return Err(EndfeetError::NegativeTravelTime { vertex, value });
            }
        }
        Ok(Self {
            travel_times,
            vertex_groups,
        })
    }

    /// Number of vertices covered by the field.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.travel_times.len()
    }

    /// Per-vertex travel times.
    #[inline]
    #[must_use]
    pub fn travel_times(&self) -> &[f64] {
        &self.travel_times
    }

    /// Per-vertex group labels.
    #[inline]
    #[must_use]
    pub fn vertex_groups(&self) -> &[GroupId] {
        &self.vertex_groups
    }

    /// Group label of a vertex ([`UNASSIGNED`] when out of bounds).
    #[inline]
    #[must_use]
    pub fn group_of(&self, vertex: usize) -> GroupId {
        self.vertex_groups.get(vertex).copied().unwrap_or(UNASSIGNED)
    }

    /// Travel time of a vertex (`f64::INFINITY` when out of bounds).
    #[inline]
    #[must_use]
    pub fn travel_time(&self, vertex: usize) -> f64 {
        self.travel_times
            .get(vertex)
            .copied()
            .unwrap_or(f64::INFINITY)
    }
}
