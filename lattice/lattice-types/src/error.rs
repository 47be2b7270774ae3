//! Error types for lattice operations.

use thiserror::Error;

/// Result type for lattice operations.
pub type LatticeResult<T> = Result<T, LatticeError>;

/// Errors that can occur when working with lattice transforms.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LatticeError {
    /// The linear part of the transform cannot be inverted.
    #[error("lattice transform is singular (determinant {determinant:e})")]
    SingularTransform {
        /// Determinant of the 3x3 linear block.
        determinant: f64,
    },

    /// The matrix carries a projective component.
    #[error("matrix bottom row is not (0, 0, 0, 1)")]
    NonAffine,
}
