//! Canonical orientation of lattice shapes.
//!
//! Given the cells of a puzzle, this crate picks the largest flat face of
//! their convex hull, rotates the shape so that face rests on the floor, and
//! publishes the full set of matrices a renderer needs as one immutable
//! [`ViewTransforms`] snapshot.
//!
//! # Overview
//!
//! - [`rotation_between`] - Minimal (Rodrigues) rotation between two directions
//! - [`orient`] - Rotation, pivot and bounds for a hull
//! - [`ViewTransforms`] - Lattice, rotation and composed world matrices
//! - [`ViewSession`] - Explicit recompute state for an editing session
//!
//! # Example
//!
//! ```
//! use lattice_orient::{ViewParams, ViewTransforms};
//! use lattice_types::{LatticeCoord, LatticeTransform};
//!
//! let cells = [
//!     LatticeCoord::new(0, 0, 0),
//!     LatticeCoord::new(1, 0, 0),
//!     LatticeCoord::new(0, 1, 0),
//!     LatticeCoord::new(0, 0, 1),
//! ];
//! let view = ViewTransforms::compute(&cells, &LatticeTransform::fcc(), &ViewParams::default());
//!
//! // The chosen base face now points straight down
//! let face = view.selected_face.as_ref().unwrap();
//! let down = view.view_rotation * face.normal;
//! assert!((down.y + 1.0).abs() < 1e-6);
//! assert!(view.inverse_is_valid);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod orient;
mod rotation;
mod session;
mod view;

pub use orient::{Orientation, orient};
pub use rotation::{ANTIPARALLEL_TOLERANCE, rotation_between};
pub use session::{ViewSession, ViewUpdate};
pub use view::{ViewParams, ViewTransforms};
