//! cdist: pairwise distance matrices
//!
//! Given a left and a right [`PointSet`] (each an (N, D) matrix of f32 row
//! vectors) computes the (N_left, N_right) [`DistanceMatrix`] under a
//! [`Metric`].
//!
//! ## Metrics
//! - `euclidean`: `sqrt(‖l‖² − 2·l·r + ‖r‖²)`, clamped to 0 where round-off
//!   goes negative
//! - `cosine`: `1 − l·r / (‖l‖·‖r‖)`
//!
//! ## Layout
//! - `types`: validated input and output matrices
//! - `distance`: SIMD dot kernel, shared primitives, metric routines and
//!   the dispatching [`DistanceEngine`]
//! - `config`: engine options (zero-norm policy, parallel threshold)
//! - `ffi`: C ABI for the cdylib / staticlib builds

pub mod config;
pub mod types;
pub mod distance;
pub mod ffi;

mod error;

pub use config::{DistanceConfig, ZeroNormPolicy};
pub use error::{DistanceError, Result};
pub use types::{DistanceMatrix, PointSet, Scalar};
pub use distance::{
    cdist, compute_distance, cosine_cdist, cosine_cdist_with_policy, euclidean_cdist,
    DistanceEngine, DistanceMetric, Metric,
};
