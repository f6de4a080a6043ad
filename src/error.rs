//! Error types for the distance engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DistanceError>;

#[derive(Error, Debug)]
pub enum DistanceError {
    #[error("Metric type not understood: value {0} is not valid!")]
    UnsupportedMetric(String),

    #[error("Dimension mismatch: left has {left} columns, right has {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Ragged input: row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Point set rows must have at least one column")]
    ZeroDimension,

    #[error("Non-finite value at row {row}, column {col}")]
    NonFiniteValue { row: usize, col: usize },

    #[error("Shape mismatch: expected {expected} values, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl DistanceError {
    /// Stable status code for the C ABI. `0` means success, `-1` and `-2`
    /// are reserved for null pointers and invalid strings at the boundary.
    pub fn code(&self) -> i32 {
        match self {
            Self::UnsupportedMetric(_) => -3,
            Self::DimensionMismatch { .. } => -4,
            Self::RaggedRows { .. } => -5,
            Self::ZeroDimension => -6,
            Self::NonFiniteValue { .. } => -7,
            Self::ShapeMismatch { .. } => -8,
            Self::Io(_) => -9,
            Self::Config(_) => -10,
        }
    }
}

impl From<serde_json::Error> for DistanceError {
    fn from(err: serde_json::Error) -> Self {
        DistanceError::Config(err.to_string())
    }
}
