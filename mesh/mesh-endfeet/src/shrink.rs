//! Travel-time-biased region shrinking.

use std::cmp::Ordering;

/// Select the triangle rows to retain so the total area approaches
/// `target_area` without structurally exceeding it.
///
/// Rows are dropped in order of decreasing travel time — the triangles
/// farthest (in front-propagation terms) from the seed go first — until
/// the retained total no longer exceeds the target. At least one row is
/// always retained, so a region never vanishes entirely; an exact match is
/// not guaranteed.
///
/// `areas` and `travel_times` are parallel slices over the group's
/// triangles. The returned indices are input-row indices (not global mesh
/// ids), in ascending row order.
///
/// # Example
///
/// ```
/// use mesh_endfeet::shrink_to_target;
///
/// let areas = [1.0, 1.0, 1.0];
/// let times = [0.5, 2.0, 1.0];
///
/// // Budget of 2.0: the highest-travel-time row (row 1) is dropped
/// assert_eq!(shrink_to_target(&areas, &times, 2.0), vec![0, 2]);
///
/// // A zero budget still retains the closest row
/// assert_eq!(shrink_to_target(&areas, &times, 0.0), vec![0]);
/// ```
#[must_use]
pub fn shrink_to_target(areas: &[f64], travel_times: &[f64], target_area: f64) -> Vec<usize> {
    debug_assert_eq!(areas.len(), travel_times.len());
    if areas.is_empty() {
        return Vec::new();
    }

    // Rows ordered by travel time, farthest first
    let mut by_distance: Vec<usize> = (0..areas.len()).collect();
    by_distance.sort_unstable_by(|&a, &b| {
        travel_times[b]
            .partial_cmp(&travel_times[a])
            .unwrap_or(Ordering::Equal)
    });

    let mut retained_area: f64 = areas.iter().sum();
    let mut dropped = vec![false; areas.len()];
    let mut retained_count = areas.len();

    for &row in &by_distance {
        if retained_area <= target_area || retained_count == 1 {
            break;
        }
        dropped[row] = true;
        retained_area -= areas[row];
        retained_count -= 1;
    }

    (0..areas.len()).filter(|&row| !dropped[row]).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn no_shrink_when_under_target() {
        let retained = shrink_to_target(&[1.0, 2.0], &[0.1, 0.2], 10.0);
        assert_eq!(retained, vec![0, 1]);
    }

    #[test]
    fn drops_farthest_first() {
        let areas = [2.0, 2.0, 2.0, 2.0];
        let times = [0.1, 0.4, 0.2, 0.3];

        // Budget 5.0: drop rows 1 then 3 (times 0.4, 0.3), retaining 4.0
        let retained = shrink_to_target(&areas, &times, 5.0);
        assert_eq!(retained, vec![0, 2]);
    }

    #[test]
    fn retained_total_never_exceeds_target_when_feasible() {
        let areas = [1.0, 0.5, 0.25, 0.125];
        let times = [0.0, 1.0, 2.0, 3.0];
        let retained = shrink_to_target(&areas, &times, 1.2);
        let total: f64 = retained.iter().map(|&r| areas[r]).sum();
        assert!(total <= 1.2);
        assert_eq!(retained, vec![0]);
    }

    #[test]
    fn always_keeps_closest_row() {
        let retained = shrink_to_target(&[3.0, 4.0], &[1.0, 2.0], 0.0);
        assert_eq!(retained, vec![0]);
    }

    #[test]
    fn empty_input() {
        assert!(shrink_to_target(&[], &[], 1.0).is_empty());
    }
}
