//! Convex hulls of lattice point sets with coplanar face merging.
//!
//! The hull is the first stage of orienting a puzzle: its largest flat face
//! becomes the base the shape rests on. Construction never fails; degenerate
//! inputs produce a synthetic hull so downstream code always has a face to
//! pick.
//!
//! # Pipeline
//!
//! 1. Round every point to [`HullParams::precision_decimals`] places, drop
//!    duplicates and sort, so the result does not depend on input order
//! 2. Classify the distinct points:
//!    - none: [`HullKind::Empty`]
//!    - fewer than 4: [`HullKind::Sparse`], one face with normal +Y
//!    - collinear or coincident: [`HullKind::BoundingBox`], six box faces
//!    - coplanar: [`HullKind::Planar`], one polygon
//!    - otherwise: [`HullKind::Solid`], an incremental 3D hull
//! 3. Merge triangles whose normals are parallel within
//!    [`HullParams::coplanar_tolerance`]
//!
//! # Example
//!
//! ```
//! use lattice_hull::{build_hull, HullKind, HullParams};
//! use nalgebra::Point3;
//!
//! let cube: Vec<_> = (0..8)
//!     .map(|b| Point3::new(f64::from(b & 1), f64::from((b >> 1) & 1), f64::from(b >> 2)))
//!     .collect();
//!
//! let hull = build_hull(&cube, &HullParams::default());
//! assert_eq!(hull.kind, HullKind::Solid);
//!
//! // Opposite faces are parallel, so the six squares merge into three groups
//! assert_eq!(hull.faces.len(), 3);
//! assert!((hull.total_area() - 6.0).abs() < 1e-9);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod build;
mod face;
mod merge;
mod params;
mod planar;
mod quickhull;

pub use build::{build_hull, build_hull_from_coords, round_point};
pub use face::{Hull, HullFace, HullKind};
pub use merge::merge_coplanar;
pub use params::HullParams;
