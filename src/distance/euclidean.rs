//! Euclidean distance: single pair and full pairwise matrix

use super::primitives::{cross_term, row_squared_norms};
use super::check_dimensions;
use crate::error::Result;
use crate::types::{DistanceMatrix, PointSet};

/// Euclidean distance between two vectors
///
/// # Panics
/// Panics if vectors have different dimensions
#[inline]
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    euclidean_distance_squared(a, b).sqrt()
}

/// Squared Euclidean distance, summed over coordinate differences
#[inline]
pub fn euclidean_distance_squared(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vector dimensions must match");
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Squared distance accumulated in f64, for pairs whose f32 norms overflow
fn euclidean_distance_wide(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = *x as f64 - *y as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt() as f32
}

/// Pairwise Euclidean distances between every row of `left` and `right`.
///
/// Uses `(‖l‖² + ‖r‖²) − 2·l·r` so the heavy work is one cross term. The
/// norms are summed first, so a self-comparison is exactly symmetric.
/// Values that round to zero or below are clamped to exactly `0.0` before
/// the square root. When the f32 squared norms overflow, that entry is
/// recomputed directly in f64; it is only infinite if the true distance
/// exceeds `f32::MAX`.
pub fn euclidean_cdist(left: &PointSet, right: &PointSet) -> Result<DistanceMatrix> {
    euclidean_cdist_with(left, right, false)
}

pub(crate) fn euclidean_cdist_with(
    left: &PointSet,
    right: &PointSet,
    parallel: bool,
) -> Result<DistanceMatrix> {
    check_dimensions(left, right)?;

    let left_sqr = row_squared_norms(left);
    let right_sqr = row_squared_norms(right);
    let mut dist = cross_term(left, right, parallel);
    let cols = right.len();

    for (i, row) in dist.chunks_mut(cols.max(1)).enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            let sqr_sum = (left_sqr[i] + right_sqr[j]) - 2.0 * *cell;
            *cell = if !sqr_sum.is_finite() {
                euclidean_distance_wide(left.row(i), right.row(j))
            } else if sqr_sum > 0.0 {
                sqr_sum.sqrt()
            } else {
                0.0
            };
        }
    }

    Ok(DistanceMatrix::from_raw(left.len(), cols, dist))
}
