//! Cosine similarity and distance: single pair and full pairwise matrix

use tracing::warn;

use super::dot::{dot, squared_norm};
use super::primitives::{cross_term, row_norms};
use super::check_dimensions;
use crate::config::ZeroNormPolicy;
use crate::error::Result;
use crate::types::{DistanceMatrix, PointSet};

/// Cosine similarity in [-1, 1]. A zero vector on either side gives 0.0.
///
/// # Panics
/// Panics if vectors have different dimensions
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot_product = dot(a, b);
    let norm_a = squared_norm(a);
    let norm_b = squared_norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot_product / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
    }
}

/// Cosine distance (1 - cosine_similarity), in [0, 2]
#[inline]
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    1.0 - cosine_similarity(a, b)
}

/// Pairwise cosine distances with the default `Propagate` policy.
///
/// A zero-norm row divides by zero: its entries come out as NaN or
/// infinite. Use [`cosine_cdist_with_policy`] with
/// `ZeroNormPolicy::UnitDistance` to pin them to 1.0 instead.
pub fn cosine_cdist(left: &PointSet, right: &PointSet) -> Result<DistanceMatrix> {
    cosine_cdist_with(left, right, ZeroNormPolicy::Propagate, false)
}

pub fn cosine_cdist_with_policy(
    left: &PointSet,
    right: &PointSet,
    policy: ZeroNormPolicy,
) -> Result<DistanceMatrix> {
    cosine_cdist_with(left, right, policy, false)
}

pub(crate) fn cosine_cdist_with(
    left: &PointSet,
    right: &PointSet,
    policy: ZeroNormPolicy,
    parallel: bool,
) -> Result<DistanceMatrix> {
    check_dimensions(left, right)?;

    let norm_left = row_norms(left);
    let norm_right = row_norms(right);

    let zero_rows = norm_left.iter().chain(norm_right.iter()).filter(|n| **n == 0.0).count();
    if zero_rows > 0 && policy == ZeroNormPolicy::Propagate {
        warn!(
            zero_norm_rows = zero_rows,
            "cosine distance over zero-norm rows, affected entries will be NaN or infinite"
        );
    }

    let mut dist = cross_term(left, right, parallel);
    let cols = right.len();

    for (i, row) in dist.chunks_mut(cols.max(1)).enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            let (nl, nr) = (norm_left[i], norm_right[j]);
            let zero_norm = nl == 0.0 || nr == 0.0;
            *cell = if zero_norm && policy == ZeroNormPolicy::UnitDistance {
                1.0
            } else {
                let cos = *cell / nl / nr;
                if !cos.is_finite() && !zero_norm {
                    cosine_distance_wide(left.row(i), right.row(j))
                } else {
                    1.0 - clamp_similarity(cos)
                }
            };
        }
    }

    Ok(DistanceMatrix::from_raw(left.len(), cols, dist))
}

/// Cosine distance accumulated in f64, for pairs whose f32 norms overflow
fn cosine_distance_wide(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut na, mut nb) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    (1.0 - (dot / na.sqrt() / nb.sqrt()).clamp(-1.0, 1.0)) as f32
}

/// Round-off can push |cos| just past 1; non-finite values pass through.
#[inline]
fn clamp_similarity(cos: f32) -> f32 {
    if cos.is_finite() {
        cos.clamp(-1.0, 1.0)
    } else {
        cos
    }
}
