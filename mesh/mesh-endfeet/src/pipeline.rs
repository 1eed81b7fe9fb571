//! The endfeet area-generation driver.
//!
//! Wires the external collaborators — front-propagation solver, target
//! area mapper, thickness sampler — around the reconstruction core and
//! returns the lazy [`EndfeetReconstruction`] sequence.

use mesh_types::{Point3, TriMesh};
use rand::Rng;
use tracing::debug;

use crate::error::{EndfeetError, EndfeetResult};
use crate::field::FrontField;
use crate::reconstruct::{prepare_groups, EndfeetReconstruction};
use crate::sampling::{AreaMapper, DistributionParams, TruncatedNormal};

/// Configuration for one endfeet area-generation run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameters {
    /// Maximum travel time the growing fronts may reach.
    pub cutoff_radius: f64,
    /// Target distribution for endfoot surface areas.
    pub area_distribution: DistributionParams,
    /// Distribution for endfoot thicknesses.
    pub thickness_distribution: DistributionParams,
}

/// The external front-propagation (eikonal / fast-marching) solver seam.
///
/// Implementations must guarantee, for every vertex `v`:
/// `vertex_groups[v] ∈ {-1, 0, .., n_seeds - 1}` and
/// `travel_times[v] >= 0`. [`FrontField::new`] and the grouping step
/// re-check both at the boundary, so violations fail fast instead of
/// corrupting the reconstruction.
pub trait FrontSolver {
    /// Grow fronts from `seeds` across `mesh`, up to `cutoff_radius`.
    ///
    /// # Errors
    ///
    /// Implementations surface their own failures as
    /// [`crate::EndfeetError`] values.
    fn solve(
        &self,
        mesh: &TriMesh,
        seeds: &[Point3<f64>],
        cutoff_radius: f64,
    ) -> EndfeetResult<FrontField>;
}

/// Generate the endfeet surface geometry on a vasculature mesh.
///
/// Runs the full pipeline of one invocation:
///
/// 1. grow fronts from `endfeet_points` (external solver),
/// 2. compute per-triangle areas and travel times,
/// 3. label and bucket triangles by group,
/// 4. aggregate per-group areas (gap groups stay zero),
/// 5. map simulated areas onto the target area distribution and sample a
///    thickness per group (one vectorized call),
/// 6. return the lazy per-group reconstruction sequence, ascending by
///    group id.
///
/// # Errors
///
/// Fails fast on solver errors, collaborator contract violations
/// (mismatched array lengths, out-of-range group labels, negative travel
/// times) and unsampleable distribution parameters. The returned iterator
/// itself never fails.
///
/// # Example
///
/// ```
/// use mesh_endfeet::{
///     endfeet_area_generation, DistributionParams, FrontField, FrontSolver,
///     Parameters, RankOrderMapper, EndfeetResult,
/// };
/// use mesh_types::{Point3, TriMesh};
/// use rand::SeedableRng;
///
/// // A stand-in solver: every vertex reached instantly by its own seed.
/// struct NearestSeed;
///
/// impl FrontSolver for NearestSeed {
///     fn solve(
///         &self,
///         mesh: &TriMesh,
///         seeds: &[Point3<f64>],
///         _cutoff_radius: f64,
///     ) -> EndfeetResult<FrontField> {
///         let groups = (0..mesh.point_count())
///             .map(|v| {
///                 (0..seeds.len())
///                     .min_by(|&a, &b| {
///                         let da = (mesh.points[v] - seeds[a]).norm();
///                         let db = (mesh.points[v] - seeds[b]).norm();
///                         da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
///                     })
///                     .map_or(-1, |s| s as i32)
///             })
///             .collect();
///         FrontField::new(vec![0.0; mesh.point_count()], groups)
///     }
/// }
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
/// let parameters = Parameters {
///     cutoff_radius: 10.0,
///     area_distribution: DistributionParams { mean: 1.0, sdev: 0.1, min: 0.5, max: 2.0 },
///     thickness_distribution: DistributionParams { mean: 1.0, sdev: 0.1, min: 0.5, max: 2.0 },
/// };
///
/// let seeds = [Point3::new(0.0, 0.0, 0.0)];
/// let mapper = RankOrderMapper::new(&parameters.area_distribution).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
///
/// let endfeet: Vec<_> =
///     endfeet_area_generation(&mesh, &parameters, &seeds, &NearestSeed, &mapper, &mut rng)
///         .unwrap()
///         .collect();
/// assert_eq!(endfeet.len(), 1);
/// ```
pub fn endfeet_area_generation<'a, S, M, R>(
    mesh: &'a TriMesh,
    parameters: &Parameters,
    endfeet_points: &[Point3<f64>],
    solver: &S,
    area_mapper: &M,
    rng: &mut R,
) -> EndfeetResult<EndfeetReconstruction<'a>>
where
    S: FrontSolver,
    M: AreaMapper,
    R: Rng + ?Sized,
{
    let field = solver.solve(mesh, endfeet_points, parameters.cutoff_radius)?;
    let prepared = prepare_groups(mesh, &field, endfeet_points.len())?;

    let target_areas = area_mapper.map_to_target(&prepared.group_areas, rng);
    if target_areas.len() != prepared.group_areas.len() {
        return Err(EndfeetError::CountMismatch {
            what: "target areas",
            expected: prepared.group_areas.len(),
            actual: target_areas.len(),
        });
    }

    let thickness_distribution = TruncatedNormal::new(&parameters.thickness_distribution)?;
    let thicknesses = thickness_distribution.sample_n(endfeet_points.len(), rng);

    debug!(
        seeds = endfeet_points.len(),
        triangles = mesh.triangle_count(),
        unclaimed = prepared.grouped.unassigned().len(),
        "endfeet area generation prepared"
    );

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
