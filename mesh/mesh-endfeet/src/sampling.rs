//! Distribution sampling collaborators.
//!
//! The reconstruction pipeline needs two stochastic inputs: a target area
//! per group (mapped onto a biological area distribution) and a thickness
//! per group. Both draw from bounded truncated-normal distributions
//! described by [`DistributionParams`].

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::warn;

use crate::error::{EndfeetError, EndfeetResult};

/// Parameters of a truncated normal distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistributionParams {
    /// Mean of the underlying normal.
    pub mean: f64,
    /// Standard deviation of the underlying normal.
    pub sdev: f64,
    /// Lower truncation bound.
    pub min: f64,
    /// Upper truncation bound.
    pub max: f64,
}

/// A normal distribution truncated to `[min, max]`, sampled by rejection.
///
/// # Example
///
/// ```
/// use mesh_endfeet::{DistributionParams, TruncatedNormal};
/// use rand::SeedableRng;
/// use rand_distr::Distribution;
///
/// let dist = TruncatedNormal::new(&DistributionParams {
///     mean: 200.0,
///     sdev: 50.0,
///     min: 100.0,
///     max: 400.0,
/// })
/// .unwrap();
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let value = dist.sample(&mut rng);
/// assert!((100.0..=400.0).contains(&value));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TruncatedNormal {
    normal: Normal<f64>,
    mean: f64,
    min: f64,
    max: f64,
}

impl TruncatedNormal {
    /// Rejection attempts before falling back to the clamped mean.
    const MAX_REJECTIONS: usize = 1024;

    /// Build the distribution, validating the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`EndfeetError::InvalidDistribution`] when the bounds are
    /// inverted or the standard deviation is not a finite non-negative
    /// number.
    pub fn new(params: &DistributionParams) -> EndfeetResult<Self> {
        if params.min > params.max {
            return Err(EndfeetError::InvalidDistribution {
                reason: format!("min {} exceeds max {}", params.min, params.max),
            });
        }
        let normal = Normal::new(params.mean, params.sdev).map_err(|source| {
            EndfeetError::InvalidDistribution {
                reason: source.to_string(),
            }
        })?;
        Ok(Self {
            normal,
            mean: params.mean,
            min: params.min,
            max: params.max,
        })
    }

    /// Draw `count` samples at once.
    #[must_use]
    pub fn sample_n<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<f64> {
        (0..count).map(|_| self.sample(rng)).collect()
    }
}

impl Distribution<f64> for TruncatedNormal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        for _ in 0..Self::MAX_REJECTIONS {
            let value = self.normal.sample(rng);
            if value >= self.min && value <= self.max {
                return value;
            }
        }
        // Bounds far into the distribution tail; settle on the nearest
        // admissible value to the mean
        warn!(
            mean = self.mean,
            min = self.min,
            max = self.max,
            "truncated normal rejection budget exhausted, clamping mean"
        );
        self.mean.clamp(self.min, self.max)
    }
}

/// Maps simulated per-group areas onto a target area distribution.
///
/// This is the seam to the external statistical sampler: implementations
/// must return one target per input row, index-aligned.
pub trait AreaMapper {
    /// Map simulated areas to target areas, preserving length and index
    /// alignment.
    fn map_to_target<R: Rng + ?Sized>(&self, simulated: &[f64], rng: &mut R) -> Vec<f64>;
}

/// Rank-order mapping onto a truncated normal target distribution.
///
/// Draws one target area per non-gap group (simulated area above zero),
/// then matches sorted targets to sorted simulated areas: the largest
/// simulated region receives the largest target. Gap groups keep a target
/// of zero and are skipped downstream anyway.
#[derive(Debug, Clone, Copy)]
pub struct RankOrderMapper {
    distribution: TruncatedNormal,
}

impl RankOrderMapper {
    /// Build a mapper over the given target distribution.
    ///
    /// # Errors
    ///
    /// Propagates [`EndfeetError::InvalidDistribution`] from
    /// [`TruncatedNormal::new`].
    pub fn new(params: &DistributionParams) -> EndfeetResult<Self> {
        Ok(Self {
            distribution: TruncatedNormal::new(params)?,
        })
    }
}

impl AreaMapper for RankOrderMapper {
    fn map_to_target<R: Rng + ?Sized>(&self, simulated: &[f64], rng: &mut R) -> Vec<f64> {
        let mut rows: Vec<usize> = (0..simulated.len())
            .filter(|&row| simulated[row] > 0.0)
            .collect();
        rows.sort_unstable_by(|&a, &b| {
            simulated[a]
                .partial_cmp(&simulated[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut samples = self.distribution.sample_n(rows.len(), rng);
        samples.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mut targets = vec![0.0; simulated.len()];
        for (rank, &row) in rows.iter().enumerate() {
            targets[row] = samples[rank];
        }
        targets
    }
}
