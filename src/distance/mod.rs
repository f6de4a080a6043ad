//! Pairwise distance computation
//!
//! [`DistanceEngine`] turns two [`PointSet`]s into a [`DistanceMatrix`]
//! under a [`Metric`]. Both metrics are built from the same primitives:
//! per-row norms and the `left · rightᵗ` cross term.

pub mod dot;
pub mod primitives;
pub mod euclidean;
pub mod cosine;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::config::DistanceConfig;
use crate::error::{DistanceError, Result};
use crate::types::{DistanceMatrix, PointSet};

pub use dot::{dot, squared_norm};
pub use euclidean::{euclidean_cdist, euclidean_distance, euclidean_distance_squared};
pub use cosine::{cosine_cdist, cosine_cdist_with_policy, cosine_distance, cosine_similarity};

/// Distance metric trait
pub trait DistanceMetric: Send + Sync {
    /// Compute distance between two vectors
    fn distance(&self, a: &[f32], b: &[f32]) -> f32;
}

/// Supported metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Metric {
    #[default]
    Euclidean,
    Cosine,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Euclidean, Metric::Cosine];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Euclidean => "euclidean",
            Metric::Cosine => "cosine",
        }
    }
}

impl DistanceMetric for Metric {
    #[inline]
    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            Metric::Euclidean => euclidean_distance(a, b),
            Metric::Cosine => cosine_distance(a, b),
        }
    }
}

impl FromStr for Metric {
    type Err = DistanceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "euclidean" => Ok(Metric::Euclidean),
            "cosine" => Ok(Metric::Cosine),
            other => Err(DistanceError::UnsupportedMetric(other.to_string())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Metric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Both sets must share D. An empty set has nothing to compare, so it is
/// accepted against any dimensionality.
pub(crate) fn check_dimensions(left: &PointSet, right: &PointSet) -> Result<()> {
    if !left.is_empty() && !right.is_empty() && left.dim() != right.dim() {
        return Err(DistanceError::DimensionMismatch {
            left: left.dim(),
            right: right.dim(),
        });
    }
    Ok(())
}

/// Stateless apart from its configuration; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct DistanceEngine {
    config: DistanceConfig,
}

impl DistanceEngine {
    pub fn new(config: DistanceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DistanceConfig {
        &self.config
    }

    /// Full (N_left, N_right) distance matrix under `metric`.
    ///
    /// # Errors
    /// `DimensionMismatch` when both sets are non-empty and D differs.
    pub fn compute(
        &self,
        left: &PointSet,
        right: &PointSet,
        metric: Metric,
    ) -> Result<DistanceMatrix> {
        let work = left.len() * right.len() * left.dim().max(right.dim());
        let parallel = self.config.is_parallel(work);
        debug!(
            metric = %metric,
            left_rows = left.len(),
            right_rows = right.len(),
            dim = left.dim(),
            parallel,
            "computing distance matrix"
        );

        match metric {
            Metric::Euclidean => euclidean::euclidean_cdist_with(left, right, parallel),
            Metric::Cosine => {
                cosine::cosine_cdist_with(left, right, self.config.zero_norm, parallel)
            }
        }
    }

    /// Like [`compute`](Self::compute) with the metric given by name.
    ///
    /// The name is resolved before anything else, so an unknown metric
    /// fails with `UnsupportedMetric` even if the inputs are also invalid.
    pub fn compute_named(
        &self,
        left: &PointSet,
        right: &PointSet,
        metric: &str,
    ) -> Result<DistanceMatrix> {
        let metric = metric.parse::<Metric>()?;
        self.compute(left, right, metric)
    }

    /// Uses the configured default metric
    pub fn compute_default(&self, left: &PointSet, right: &PointSet) -> Result<DistanceMatrix> {
        self.compute(left, right, self.config.default_metric)
    }
}

/// Pairwise distances with the default engine configuration
pub fn compute_distance(
    left: &PointSet,
    right: &PointSet,
    metric: Metric,
) -> Result<DistanceMatrix> {
    DistanceEngine::default().compute(left, right, metric)
}

/// Pairwise distances with the metric given by name (`"euclidean"` or
/// `"cosine"`).
///
/// ```rust
/// use cdist::{cdist, PointSet};
///
/// let left = PointSet::from_rows(&[[1.0, 2.0], [3.0, 4.0]])?;
/// let right = PointSet::from_rows(&[[10.0, 11.0], [12.0, 13.0]])?;
/// let m = cdist(&left, &right, "euclidean")?;
/// assert_eq!(m.shape(), (2, 2));
/// assert!((m[(0, 0)] - 12.73).abs() < 1e-2);
///
/// assert!(cdist(&left, &right, "manhattan").is_err());
/// # Ok::<(), cdist::DistanceError>(())
/// ```
pub fn cdist(left: &PointSet, right: &PointSet, metric: &str) -> Result<DistanceMatrix> {
    DistanceEngine::default().compute_named(left, right, metric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZeroNormPolicy;

    fn sample() -> (PointSet, PointSet) {
        (
            PointSet::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap(),
            PointSet::from_rows(vec![vec![10, 11], vec![12, 13]]).unwrap(),
        )
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("euclidean".parse::<Metric>().unwrap(), Metric::Euclidean);
        assert_eq!("cosine".parse::<Metric>().unwrap(), Metric::Cosine);
        for bad in ["Euclidean", "l2", "", "cosine "] {
            match bad.parse::<Metric>() {
                Err(DistanceError::UnsupportedMetric(v)) => assert_eq!(v, bad),
                other => panic!("{:?} parsed as {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_metric_display_round_trip() {
        for metric in Metric::ALL {
            assert_eq!(metric.to_string().parse::<Metric>().unwrap(), metric);
        }
        assert_eq!(Metric::default(), Metric::Euclidean);
    }

    #[test]
    fn test_unsupported_metric_message() {
        let err = "minkowski".parse::<Metric>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Metric type not understood: value minkowski is not valid!"
        );
    }

    #[test]
    fn test_euclidean_metric() {
        let dist = Metric::Euclidean.distance(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]);
        assert!((dist - 5.196152).abs() < 0.001);
    }

    #[test]
    fn test_cosine_metric() {
        let dist = Metric::Cosine.distance(&[1.0, 0.0, 0.0], &[1.0, 0.0, 0.0]);
        assert!(dist < 0.01);
    }

    #[test]
    fn test_dispatch_matches_dedicated_routines() {
        let (left, right) = sample();
        assert_eq!(
            cdist(&left, &right, "euclidean").unwrap(),
            euclidean_cdist(&left, &right).unwrap()
        );
        assert_eq!(
            cdist(&left, &right, "cosine").unwrap(),
            cosine_cdist(&left, &right).unwrap()
        );
    }

    #[test]
    fn test_unsupported_metric_checked_before_dimensions() {
        let left = PointSet::from_rows(&[[1.0, 2.0]]).unwrap();
        let right = PointSet::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
        assert!(matches!(
            cdist(&left, &right, "hamming"),
            Err(DistanceError::UnsupportedMetric(_))
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let left = PointSet::from_rows(&[[1.0, 2.0]]).unwrap();
        let right = PointSet::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
        for metric in Metric::ALL {
            match compute_distance(&left, &right, metric) {
                Err(DistanceError::DimensionMismatch { left, right }) => {
                    assert_eq!((left, right), (2, 3));
                }
                other => panic!("{}: {:?}", metric, other),
            }
        }
    }

    #[test]
    fn test_empty_operand_skips_dimension_check() {
        let left: Vec<Vec<f32>> = Vec::new();
        let left = PointSet::from_rows(left).unwrap();
        let right = PointSet::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
        let m = compute_distance(&left, &right, Metric::Cosine).unwrap();
        assert_eq!(m.shape(), (0, 1));
    }

    #[test]
    fn test_parallel_engine_matches_sequential() {
        let (left, right) = sample();
        let parallel = DistanceEngine::new(DistanceConfig::default().with_parallel_threshold(0));
        let sequential = DistanceEngine::new(DistanceConfig::sequential());
        for metric in Metric::ALL {
            assert_eq!(
                parallel.compute(&left, &right, metric).unwrap(),
                sequential.compute(&left, &right, metric).unwrap()
            );
        }
    }

    #[test]
    fn test_compute_default_uses_config_metric() {
        let (left, right) = sample();
        let engine = DistanceEngine::new(DistanceConfig::default().with_metric(Metric::Cosine));
        assert_eq!(
            engine.compute_default(&left, &right).unwrap(),
            cosine_cdist(&left, &right).unwrap()
        );
    }

    #[test]
    fn test_guarded_engine_zero_norm() {
        let left = PointSet::from_rows(&[[0.0, 0.0]]).unwrap();
        let right = PointSet::from_rows(&[[3.0, 4.0]]).unwrap();
        let engine = DistanceEngine::new(DistanceConfig::guarded());
        assert_eq!(engine.config().zero_norm, ZeroNormPolicy::UnitDistance);
        let m = engine.compute(&left, &right, Metric::Cosine).unwrap();
        assert_eq!(m[(0, 0)], 1.0);

        let m = compute_distance(&left, &right, Metric::Cosine).unwrap();
        assert!(m[(0, 0)].is_nan());
    }

    #[test]
    fn test_metric_serde() {
        assert_eq!(serde_json::to_string(&Metric::Cosine).unwrap(), "\"cosine\"");
        let m: Metric = serde_json::from_str("\"euclidean\"").unwrap();
        assert_eq!(m, Metric::Euclidean);
        assert!(serde_json::from_str::<Metric>("\"jaccard\"").is_err());
    }
}
