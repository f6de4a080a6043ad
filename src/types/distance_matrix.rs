//! DistanceMatrix: dense (N_left, N_right) matrix of pairwise distances

use std::ops::Index;

use serde::Serialize;

/// Entry (i, j) is the distance between row i of the left set and row j of
/// the right set. Stored row-major as f32.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl DistanceMatrix {
    pub(crate) fn from_raw(rows: usize, cols: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    /// (N_left, N_right)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Entry (i, j), or `None` when out of bounds
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    /// Distances from left row `i` to every right row.
    ///
    /// # Panics
    /// Panics if `i` is out of bounds
    pub fn row(&self, i: usize) -> &[f32] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f32]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Nested row vectors, e.g. for JSON output
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    /// Largest absolute entry-wise difference. `None` if shapes differ.
    pub fn max_abs_diff(&self, other: &DistanceMatrix) -> Option<f32> {
        if self.shape() != other.shape() {
            return None;
        }
        Some(
            self.data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0f32, f32::max),
        )
    }

    /// Frobenius norm of the difference. `None` if shapes differ.
    pub fn frobenius_diff(&self, other: &DistanceMatrix) -> Option<f64> {
        if self.shape() != other.shape() {
            return None;
        }
        let sum: f64 = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| {
                let d = *a as f64 - *b as f64;
                d * d
            })
            .sum();
        Some(sum.sqrt())
    }
}

impl Index<(usize, usize)> for DistanceMatrix {
    type Output = f32;

    fn index(&self, (i, j): (usize, usize)) -> &f32 {
        assert!(
            i < self.rows && j < self.cols,
            "index ({}, {}) out of bounds for shape ({}, {})",
            i,
            j,
            self.rows,
            self.cols
        );
        &self.data[i * self.cols + j]
    }
}
