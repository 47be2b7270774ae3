//! Lattice offsets observed between occupied cells.

use std::collections::BTreeSet;

use hashbrown::HashSet;
use lattice_types::LatticeCoord;

use crate::piece::Piece;

/// Every small offset that leads from one occupied cell to another.
///
/// Gathered from the assembly itself instead of a fixed neighbor table, so
/// relaxed or non-ideal placements still find their contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportDeltas {
    offsets: Vec<LatticeCoord>,
}

impl SupportDeltas {
    /// Scan all cells for offsets with Chebyshev norm in `1..=radius` that
    /// land on another occupied cell. Offsets come out sorted.
    ///
    /// # Example
    ///
    /// ```
    /// use lattice_assembly::{Piece, SupportDeltas};
    /// use lattice_types::LatticeCoord;
    ///
    /// let piece = Piece::new("A", vec![LatticeCoord::new(0, 0, 0), LatticeCoord::new(1, 1, 0)]);
    /// let deltas = SupportDeltas::from_pieces(&[piece], 1);
    /// assert_eq!(deltas.offsets(), &[LatticeCoord::new(-1, -1, 0), LatticeCoord::new(1, 1, 0)]);
    /// ```
    #[must_use]
    pub fn from_pieces(pieces: &[Piece], radius: u32) -> Self {
        let occupied: HashSet<LatticeCoord> = pieces.iter().flat_map(|p| p.cells.iter().copied()).collect();
        let r = i32::try_from(radius).unwrap_or(i32::MAX);

        let mut found = BTreeSet::new();
        for &cell in &occupied {
            for di in -r..=r {
                for dj in -r..=r {
                    for dk in -r..=r {
                        let delta = LatticeCoord::new(di, dj, dk);
                        if delta == LatticeCoord::origin() || found.contains(&delta) {
                            continue;
                        }
                        if cell.checked_add(delta).is_some_and(|t| occupied.contains(&t)) {
                            found.insert(delta);
                        }
                    }
                }
            }
        }

        Self {
            offsets: found.into_iter().collect(),
        }
    }

    /// The offsets, ascending.
    #[must_use]
    pub fn offsets(&self) -> &[LatticeCoord] {
        &self.offsets
    }

    /// Number of offsets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Returns `true` if no two cells are within the search radius.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Returns `true` if `delta` was observed.
    #[must_use]
    pub fn contains(&self, delta: LatticeCoord) -> bool {
        self.offsets.binary_search(&delta).is_ok()
    }
}
