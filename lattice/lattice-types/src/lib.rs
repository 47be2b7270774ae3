//! Core lattice types for sphere-packing puzzles.
//!
//! This crate provides the foundational types shared by the hull, orientation
//! and assembly crates:
//!
//! - [`LatticeCoord`] - Integer lattice site `(i, j, k)`
//! - [`LatticeTransform`] - Affine map from lattice coordinates to world space
//! - [`Bounds`] - Axis-aligned bounding box in world space
//!
//! Nothing here depends on the other lattice crates, so viewers and solvers
//! can share coordinates without pulling in hull or ordering code.
//!
//! # Coordinate System
//!
//! World space is right-handed with **+Y up**. Lattice sites are placed into
//! world space by a caller-chosen linear basis: identity for plain cubic grids,
//! or [`LatticeTransform::fcc`] for the face-centered-cubic sphere packing.
//!
//! # Example
//!
//! ```
//! use lattice_types::{LatticeCoord, LatticeTransform};
//!
//! let fcc = LatticeTransform::fcc();
//! let p = fcc.to_world(LatticeCoord::new(1, 0, 0));
//! assert!((p.x - 0.5).abs() < 1e-12);
//! assert!((p.y - 0.5).abs() < 1e-12);
//!
//! // Adjacent spheres touch, so the radius is half the neighbor spacing
//! assert!((fcc.sphere_radius() - 0.5_f64.sqrt() / 2.0).abs() < 1e-12);
//! ```
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod bounds;
mod coord;
mod error;
mod transform;

pub use bounds::Bounds;
pub use coord::LatticeCoord;
pub use error::{LatticeError, LatticeResult};
pub use transform::{LatticeTransform, SINGULAR_DETERMINANT, invert_affine, is_finite_matrix};

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix3, Matrix4, Point3, Vector3};
