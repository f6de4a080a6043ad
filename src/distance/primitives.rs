//! Matrix-level building blocks shared by the Euclidean and cosine routines
//!
//! Norm vectors are kept at length N and broadcast by index when combined
//! with the cross term, which is equivalent to reshaping to a column (or
//! row) vector and tiling it to (N_left, N_right).

use rayon::prelude::*;

use super::dot::{dot, squared_norm};
use crate::types::PointSet;

/// Per-row sum of squares
pub fn row_squared_norms(points: &PointSet) -> Vec<f32> {
    points.rows().map(squared_norm).collect()
}

/// Per-row Euclidean norm (not squared)
pub fn row_norms(points: &PointSet) -> Vec<f32> {
    points.rows().map(|r| squared_norm(r).sqrt()).collect()
}

/// `left · rightᵗ`, row-major (N_left, N_right).
///
/// With `parallel` set, output rows are filled on the rayon pool. Each entry
/// is a single `dot` call either way, so the result does not depend on the
/// flag.
pub fn cross_term(left: &PointSet, right: &PointSet, parallel: bool) -> Vec<f32> {
    let cols = right.len();
    let mut out = vec![0.0f32; left.len() * cols];
    if cols == 0 {
        return out;
    }

    let fill = |(i, out_row): (usize, &mut [f32])| {
        let l = left.row(i);
        for (j, slot) in out_row.iter_mut().enumerate() {
            *slot = dot(l, right.row(j));
        }
    };

    if parallel {
        out.par_chunks_mut(cols).enumerate().for_each(fill);
    } else {
        out.chunks_mut(cols).enumerate().for_each(fill);
    }
    out
}
