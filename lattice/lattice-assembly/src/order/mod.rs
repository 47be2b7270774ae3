//! Reveal ordering strategies.
//!
//! Every strategy returns a complete permutation of the pieces. When a
//! strategy cannot reach some pieces it appends them in a deterministic
//! fallback order and tags them through [`Placement`].

mod connected;
mod global;
mod supported;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AssemblyError;
use crate::layout::AssemblyLayout;
use crate::params::OrderParams;

pub use connected::connected_order;
pub use global::global_order;
pub use supported::{SupportAnalysis, supported_order};

/// Which ordering policy to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStrategy {
    /// Lowest pieces first.
    #[default]
    Global,
    /// Breadth-first growth over proximity contacts from the lowest piece.
    Connected,
    /// Greedy growth that only places fully supported pieces.
    Supported,
}

impl OrderStrategy {
    /// All strategies.
    pub const ALL: [Self; 3] = [Self::Global, Self::Connected, Self::Supported];

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Connected => "connected",
            Self::Supported => "supported",
        }
    }
}

impl fmt::Display for OrderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStrategy {
    type Err = AssemblyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AssemblyError::UnknownStrategy { name: s.to_owned() })
    }
}

/// How a piece earned its slot in the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Position from the height sort.
    Height,
    /// First piece of a connected or supported run.
    Seed,
    /// Reached through the contact graph.
    Connected,
    /// Not reachable through the contact graph; appended by height.
    Disconnected,
    /// Passed the support test when placed.
    Supported,
    /// Never passed the support test; appended by the deterministic fallback.
    UnsupportedFallback,
}

impl Placement {
    /// Returns `true` for placements appended after the strategy gave up.
    #[must_use]
    pub const fn is_fallback(self) -> bool {
        matches!(self, Self::Disconnected | Self::UnsupportedFallback)
    }
}

/// One slot of a [`RevealOrder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealEntry {
    /// Index into the layout's piece list.
    pub piece_index: usize,
    /// The piece's ID.
    pub piece_id: String,
    /// How this slot was decided.
    pub placement: Placement,
}

/// A permutation of an assembly's pieces for progressive reveal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealOrder {
    /// Strategy that produced the order.
    pub strategy: OrderStrategy,
    /// Pieces in reveal order.
    pub entries: Vec<RevealEntry>,
}

impl RevealOrder {
    pub(crate) fn new(strategy: OrderStrategy, capacity: usize) -> Self {
        Self {
            strategy,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, layout: &AssemblyLayout, piece_index: usize, placement: Placement) {
        self.entries.push(RevealEntry {
            piece_index,
            piece_id: layout.pieces()[piece_index].id.clone(),
            placement,
        });
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Piece indices in order.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.piece_index).collect()
    }

    /// Piece IDs in order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.piece_id.as_str()).collect()
    }

    /// IDs of the first `count` pieces (all of them if `count` is larger).
    #[must_use]
    pub fn visible(&self, count: usize) -> Vec<&str> {
        self.entries.iter().take(count).map(|e| e.piece_id.as_str()).collect()
    }

    /// Per-piece visibility, indexed by piece index, with the first `count` revealed.
    #[must_use]
    pub fn visible_mask(&self, count: usize, piece_count: usize) -> Vec<bool> {
        let mut mask = vec![false; piece_count];
        for entry in self.entries.iter().take(count) {
            if let Some(slot) = mask.get_mut(entry.piece_index) {
                *slot = true;
            }
        }
        mask
    }

    /// Number of entries appended by a fallback path.
    #[must_use]
    pub fn fallback_count(&self) -> usize {
        self.entries.iter().filter(|e| e.placement.is_fallback()).count()
    }

    /// Returns `true` if the entries name each of `0..piece_count` exactly once.
    #[must_use]
    pub fn is_permutation_of(&self, piece_count: usize) -> bool {
        if self.entries.len() != piece_count {
            return false;
        }
        let mut seen = vec![false; piece_count];
        self.entries.iter().all(|e| match seen.get_mut(e.piece_index) {
            Some(slot) if !*slot => {
                *slot = true;
                true
            }
            _ => false,
        })
    }
}

/// Order the pieces of `layout` with `strategy`.
///
/// Never fails. An empty layout gives an empty order.
///
/// # Example
///
/// ```
/// use lattice_assembly::{plan_order, AssemblyLayout, OrderParams, OrderStrategy, Piece};
/// use lattice_types::{LatticeCoord, LatticeTransform};
///
/// let pieces = vec![
///     Piece::new("top", vec![LatticeCoord::new(0, 5, 0)]),
///     Piece::new("bottom", vec![LatticeCoord::new(0, 0, 0)]),
/// ];
/// let layout = AssemblyLayout::new(pieces, &LatticeTransform::identity()).unwrap();
/// let order = plan_order(&layout, OrderStrategy::Global, &OrderParams::default());
/// assert_eq!(order.ids(), vec!["bottom", "top"]);
/// ```
#[must_use]
pub fn plan_order(layout: &AssemblyLayout, strategy: OrderStrategy, params: &OrderParams) -> RevealOrder {
    let order = match strategy {
        OrderStrategy::Global => global_order(layout),
        OrderStrategy::Connected => connected_order(layout, params),
        OrderStrategy::Supported => supported_order(layout, params),
    };
    debug!(
        %strategy,
        pieces = layout.len(),
        fallback = order.fallback_count(),
        "planned reveal order"
    );
    order
}
