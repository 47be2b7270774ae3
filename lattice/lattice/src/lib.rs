//! Orientation and assembly ordering for sphere-packing lattice puzzles.
//!
//! This umbrella crate re-exports the `lattice-*` crates and adds
//! [`SolutionView`], which runs the whole pipeline for a loaded solution:
//! orient the assembly so its largest face rests on the floor, then plan the
//! reveal order over the oriented positions.
//!
//! # Quick Start
//!
//! ```
//! use lattice::prelude::*;
//!
//! let json = r#"{ "placements": [
//!     { "piece": "floor", "cells_ijk": [[0,0,0],[1,0,0],[0,0,1],[1,0,1]] },
//!     { "piece": "roof",  "cells_ijk": [[0,1,0],[1,1,0],[0,1,1],[1,1,1]] }
//! ] }"#;
//! let pieces = SolutionRecord::from_json(json).unwrap().into_pieces().unwrap();
//!
//! let view = SolutionView::build(
//!     pieces,
//!     &LatticeTransform::identity(),
//!     OrderStrategy::Global,
//!     &ViewParams::default(),
//!     &OrderParams::default(),
//! )
//! .unwrap();
//! assert_eq!(view.order.len(), 2);
//! assert!(view.transforms.inverse_is_valid);
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Lattice coordinates, affine lattice transforms, bounds
//! - [`hull`] - Convex hull with coplanar face merging
//! - [`orient`] - Base-face orientation and view transforms
//! - [`assembly`] - Contact graphs, support layers, reveal ordering

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Lattice coordinates, transforms and bounds.
pub use lattice_types as types;

/// Convex hull construction.
pub use lattice_hull as hull;

/// Orientation and view transforms.
pub use lattice_orient as orient;

/// Reveal ordering.
pub use lattice_assembly as assembly;

mod solution;

pub use solution::SolutionView;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports.
///
/// ```
/// use lattice::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use lattice_types::{Bounds, LatticeCoord, LatticeTransform};

    // Hull
    pub use lattice_hull::{Hull, HullFace, HullParams, build_hull};

    // Orientation
    pub use lattice_orient::{ViewParams, ViewSession, ViewTransforms, ViewUpdate};

    // Ordering
    pub use lattice_assembly::{
        AssemblyLayout, OrderParams, OrderStrategy, Piece, Placement, RevealOrder, SolutionRecord, plan_order,
    };

    pub use crate::SolutionView;
}
