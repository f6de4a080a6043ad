//! Engine configuration
//!
//! Defaults reproduce the plain `cdist(left, right, "euclidean")` behaviour;
//! everything here is opt-in.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::distance::Metric;
use crate::error::Result;

/// What cosine distance does with an all-zero row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroNormPolicy {
    /// Divide anyway. Affected entries are NaN (0/0) or infinite.
    #[default]
    Propagate,

    /// Any pair involving a zero-norm row has distance exactly 1.0
    /// (similarity 0, same as the single-pair `cosine_similarity`).
    UnitDistance,
}

/// Configuration for [`DistanceEngine`](crate::DistanceEngine)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceConfig {
    /// Metric used by `compute_default`
    pub default_metric: Metric,

    /// Zero-norm handling for cosine distance
    pub zero_norm: ZeroNormPolicy,

    /// N_left × N_right × D at or above which the cross term runs on the
    /// rayon pool
    pub parallel_threshold: usize,
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            default_metric: Metric::Euclidean,
            zero_norm: ZeroNormPolicy::Propagate,
            parallel_threshold: 1 << 16,
        }
    }
}

impl DistanceConfig {
    /// Zero-norm rows give cosine distance 1.0 instead of NaN
    pub fn guarded() -> Self {
        Self {
            zero_norm: ZeroNormPolicy::UnitDistance,
            ..Default::default()
        }
    }

    /// Never use the thread pool
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            ..Default::default()
        }
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.default_metric = metric;
        self
    }

    pub fn with_zero_norm(mut self, policy: ZeroNormPolicy) -> Self {
        self.zero_norm = policy;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Whether a job of `work` multiply-adds should run in parallel
    pub fn is_parallel(&self, work: usize) -> bool {
        work >= self.parallel_threshold
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
