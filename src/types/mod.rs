//! Matrix types exchanged with the distance engine

mod scalar;
mod point_set;
mod distance_matrix;

pub use scalar::Scalar;
pub use point_set::PointSet;
pub use distance_matrix::DistanceMatrix;
