//! Triangle labeling and grouping.
//!
//! Derives a group label for every triangle from its vertices' labels and
//! buckets triangle ids by group. The buckets are disjoint and together
//! cover every triangle id exactly once; the reserved [`UNASSIGNED`]
//! bucket holds triangles no seed claimed.

use crate::error::{EndfeetError, EndfeetResult};
use crate::field::{GroupId, UNASSIGNED};

/// Derive each triangle's group from its three vertex labels.
///
/// Majority vote: any label shared by at least two of the three vertices
/// (including [`UNASSIGNED`]) wins; three distinct labels resolve to
/// [`UNASSIGNED`]. The function is deterministic and order-free.
///
/// # Example
///
/// ```
/// use mesh_endfeet::{triangle_groups, UNASSIGNED};
///
/// let vertex_groups = vec![0, 0, 0, 1, 1, 2];
/// let triangles = vec![[0, 1, 2], [3, 4, 5], [0, 3, 5]];
///
/// let labels = triangle_groups(&vertex_groups, &triangles);
/// assert_eq!(labels, vec![0, 1, UNASSIGNED]);
/// ```
#[must_use]
pub fn triangle_groups(vertex_groups: &[GroupId], triangles: &[[u32; 3]]) -> Vec<GroupId> {
    triangles
        .iter()
        .map(|&[i0, i1, i2]| {
            let g0 = vertex_groups[i0 as usize];
            let g1 = vertex_groups[i1 as usize];
            let g2 = vertex_groups[i2 as usize];
            if g0 == g1 || g0 == g2 {
                g0
            } else if g1 == g2 {
                g1
            } else {
                UNASSIGNED
            }
        })
        .collect()
}

/// Triangle ids bucketed by group label.
///
/// Gap groups — seed ids that claimed no triangle — keep an empty bucket
/// and are skipped by [`GroupedTriangles::iter_assigned`]; they are an
/// expected condition, not an error.
#[derive(Debug, Clone)]
pub struct GroupedTriangles {
    /// One bucket per seed group, indexed by group id.
    groups: Vec<Vec<u32>>,
    /// Triangles claimed by no seed.
    unassigned: Vec<u32>,
}

impl GroupedTriangles {
    /// Bucket triangle ids by their labels.
    ///
    /// `group_count` is the number of seeds; valid labels are
    /// `[-1, group_count)`.
    ///
    /// # Errors
    ///
    /// Returns [`EndfeetError::GroupOutOfRange`] for any label outside the
    /// valid range — a violated collaborator contract, caught before the
    /// core algorithms run.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_endfeet::{GroupedTriangles, UNASSIGNED};
    ///
    /// let grouped = GroupedTriangles::from_labels(&[1, UNASSIGNED, 1, 0], 3).unwrap();
    ///
    /// assert_eq!(grouped.triangles_of(0), &[3]);
    /// assert_eq!(grouped.triangles_of(1), &[0, 2]);
    /// assert_eq!(grouped.triangles_of(2), &[] as &[u32]);
    /// assert_eq!(grouped.unassigned(), &[1]);
    /// ```
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Truncation: triangle ids are u32 by the mesh data model
    pub fn from_labels(labels: &[GroupId], group_count: usize) -> EndfeetResult<Self> {
        let mut groups = vec![Vec::new(); group_count];
        let mut unassigned = Vec::new();

        for (triangle, &group) in labels.iter().enumerate() {
            if group == UNASSIGNED {
                unassigned.push(triangle as u32);
            } else if group >= 0 && (group as usize) < group_count {
                groups[group as usize].push(triangle as u32);
            } else {
                return Err(EndfeetError::GroupOutOfRange {
                    triangle,
                    group,
                    group_count,
                });
            }
        }

        Ok(Self { groups, unassigned })
    }

    /// Number of seed groups (including gaps).
    #[inline]
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Triangle ids of one group (empty slice for gaps).
    #[inline]
    #[must_use]
    pub fn triangles_of(&self, group: usize) -> &[u32] {
        self.groups.get(group).map_or(&[], Vec::as_slice)
    }

    /// Triangle ids claimed by no seed.
    #[inline]
    #[must_use]
    pub fn unassigned(&self) -> &[u32] {
        &self.unassigned
    }

    /// Iterate `(group_id, triangle_ids)` pairs in ascending group order,
    /// excluding the unassigned bucket and gap groups.
    pub fn iter_assigned(&self) -> impl Iterator<Item = (usize, &[u32])> {
        self.groups
            .iter()
            .enumerate()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(group, ids)| (group, ids.as_slice()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn majority_vote_labeling() {
        let vertex_groups = vec![0, 0, 1, 1, UNASSIGNED, UNASSIGNED];
        let triangles = vec![
            [0, 1, 2], // two zeros -> 0
            [2, 3, 0], // two ones -> 1
            [0, 2, 4], // all distinct -> unassigned
            [4, 5, 0], // two unassigned -> unassigned
        ];
        let labels = triangle_groups(&vertex_groups, &triangles);
        assert_eq!(labels, vec![0, 1, UNASSIGNED, UNASSIGNED]);
    }

    #[test]
    fn buckets_cover_and_are_disjoint() {
        let labels = vec![0, 2, 0, UNASSIGNED, 2, 1];
        let grouped = GroupedTriangles::from_labels(&labels, 3).unwrap();

        let mut seen: Vec<u32> = grouped
            .iter_assigned()
            .flat_map(|(_, ids)| ids.iter().copied())
            .chain(grouped.unassigned().iter().copied())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn iteration_ascending_and_skips_gaps() {
        // Group 1 is a gap: present in the id space, owns no triangle
        let labels = vec![2, 0, 2, 0];
        let grouped = GroupedTriangles::from_labels(&labels, 4).unwrap();

        let order: Vec<usize> = grouped.iter_assigned().map(|(g, _)| g).collect();
        assert_eq!(order, vec![0, 2]);
    }

    #[test]
    fn out_of_range_label_rejected() {
        let result = GroupedTriangles::from_labels(&[0, 5], 3);
        assert!(matches!(
            result,
            Err(EndfeetError::GroupOutOfRange {
                triangle: 1,
                group: 5,
                group_count: 3
            })
        ));

        let result = GroupedTriangles::from_labels(&[-2], 3);
        assert!(matches!(result, Err(EndfeetError::GroupOutOfRange { .. })));
    }
}
