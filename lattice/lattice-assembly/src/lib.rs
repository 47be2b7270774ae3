//! Reveal ordering for assembled lattice puzzles.
//!
//! Given the placed pieces of a solution and the world positions of their
//! cells, this crate decides in which order the pieces should appear during
//! an animated assembly. Three policies are available through
//! [`OrderStrategy`]:
//!
//! - **Global**: lowest pieces first
//! - **Connected**: breadth-first over world-proximity contacts
//! - **Supported**: greedy, only placing pieces whose raised cells rest on
//!   enough spheres in the layer beneath
//!
//! Every policy returns a complete permutation. Pieces a policy cannot reach
//! are appended deterministically and flagged through [`Placement`].
//!
//! # Example
//!
//! ```
//! use lattice_assembly::{plan_order, AssemblyLayout, OrderParams, OrderStrategy, Piece};
//! use lattice_types::{LatticeCoord, LatticeTransform};
//!
//! let slab = |j| vec![
//!     LatticeCoord::new(0, j, 0),
//!     LatticeCoord::new(1, j, 0),
//!     LatticeCoord::new(0, j, 1),
//!     LatticeCoord::new(1, j, 1),
//! ];
//! let pieces = vec![Piece::new("roof", slab(1)), Piece::new("floor", slab(0))];
//! let layout = AssemblyLayout::new(pieces, &LatticeTransform::identity()).unwrap();
//!
//! let order = plan_order(&layout, OrderStrategy::Supported, &OrderParams::default());
//! assert_eq!(order.ids(), vec!["floor", "roof"]);
//! assert_eq!(order.fallback_count(), 0);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod deltas;
mod error;
mod explode;
mod graph;
mod layers;
mod layout;
mod order;
mod params;
mod piece;
mod record;

pub use deltas::SupportDeltas;
pub use error::{AssemblyError, AssemblyResult};
pub use explode::{explosion_offsets, piece_centroid};
pub use graph::ContactGraph;
pub use layers::SupportLayers;
pub use layout::AssemblyLayout;
pub use order::{
    OrderStrategy, Placement, RevealEntry, RevealOrder, SupportAnalysis, connected_order, global_order,
    plan_order, supported_order,
};
pub use params::OrderParams;
pub use piece::{Piece, validate_pieces};
pub use record::SolutionRecord;
