//! PointSet: a dense (N, D) matrix of f32 row vectors

use rand::Rng;
use serde::Serialize;

use super::Scalar;
use crate::error::{DistanceError, Result};

/// Ordered collection of N row vectors sharing dimensionality D.
///
/// Stored row-major as f32, the working precision of every distance
/// routine. Construction validates shape and values; a built set is never
/// mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSet {
    rows: usize,
    dim: usize,
    data: Vec<f32>,
}

impl PointSet {
    /// Build from row-like input, coercing every element to f32.
    ///
    /// # Errors
    /// - `RaggedRows` when a row length differs from the first row
    /// - `ZeroDimension` when the rows have no columns
    /// - `NonFiniteValue` when a coerced value is NaN or infinite
    ///
    /// An empty iterator yields an empty set with `dim() == 0`.
    pub fn from_rows<I, R, T>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[T]>,
        T: Scalar,
    {
        let mut data = Vec::new();
        let mut dim = None;
        let mut count = 0usize;

        for (row_idx, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            let expected = *dim.get_or_insert(row.len());
            if expected == 0 {
                return Err(DistanceError::ZeroDimension);
            }
            if row.len() != expected {
                return Err(DistanceError::RaggedRows {
                    row: row_idx,
                    expected,
                    found: row.len(),
                });
            }
            for (col, value) in row.iter().enumerate() {
                let v = value.to_f32();
                if !v.is_finite() {
                    return Err(DistanceError::NonFiniteValue { row: row_idx, col });
                }
                data.push(v);
            }
            count += 1;
        }

        Ok(Self {
            rows: count,
            dim: dim.unwrap_or(0),
            data,
        })
    }

    /// Build from a row-major buffer of `rows * dim` values.
    ///
    /// A `rows * dim` that overflows `usize` is a `ShapeMismatch`.
    pub fn from_flat(data: Vec<f32>, rows: usize, dim: usize) -> Result<Self> {
        let expected = rows.checked_mul(dim).ok_or(DistanceError::ShapeMismatch {
            expected: usize::MAX,
            found: data.len(),
        })?;
        if data.len() != expected {
            return Err(DistanceError::ShapeMismatch {
                expected,
                found: data.len(),
            });
        }
        if rows > 0 && dim == 0 {
            return Err(DistanceError::ZeroDimension);
        }
        if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
            return Err(DistanceError::NonFiniteValue {
                row: pos / dim,
                col: pos % dim,
            });
        }
        Ok(Self { rows, dim, data })
    }

    /// Empty set of the given dimensionality.
    pub fn empty(dim: usize) -> Self {
        Self {
            rows: 0,
            dim,
            data: Vec::new(),
        }
    }

    /// Points drawn uniformly from [0, 1) in every coordinate.
    pub fn random_uniform<G: Rng>(rows: usize, dim: usize, rng: &mut G) -> Self {
        let data = (0..rows * dim).map(|_| rng.gen::<f32>()).collect();
        Self { rows, dim, data }
    }

    /// Number of points (N)
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Dimensionality of every point (D)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Row `i` as a slice.
    ///
    /// # Panics
    /// Panics if `i >= len()`
    #[inline]
    pub fn row(&self, i: usize) -> &[f32] {
        let start = i * self.dim;
        &self.data[start..start + self.dim]
    }

    /// Iterate over rows in order
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f32]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Row-major backing buffer
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}
