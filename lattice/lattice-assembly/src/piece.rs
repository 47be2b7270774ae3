//! Pieces and input validation.

use hashbrown::HashMap;
use lattice_types::LatticeCoord;
use serde::{Deserialize, Serialize};

use crate::error::{AssemblyError, AssemblyResult};

/// A named set of lattice cells placed as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// Piece identifier.
    pub id: String,
    /// Occupied cells.
    pub cells: Vec<LatticeCoord>,
}

impl Piece {
    /// Create a piece.
    #[must_use]
    pub fn new(id: impl Into<String>, cells: Vec<LatticeCoord>) -> Self {
        Self {
            id: id.into(),
            cells,
        }
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the piece has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Check that every piece has cells and no cell is claimed twice.
///
/// # Errors
///
/// Returns [`AssemblyError::EmptyPiece`] or [`AssemblyError::OverlappingCell`]
/// for the first problem found, scanning pieces in order.
pub fn validate_pieces(pieces: &[Piece]) -> AssemblyResult<()> {
    let mut owners: HashMap<LatticeCoord, usize> = HashMap::new();
    for (index, piece) in pieces.iter().enumerate() {
        if piece.is_empty() {
            return Err(AssemblyError::EmptyPiece {
                id: piece.id.clone(),
            });
        }
        for &coord in &piece.cells {
            if let Some(&owner) = owners.get(&coord) {
                return Err(AssemblyError::OverlappingCell {
                    coord,
                    first: pieces[owner].id.clone(),
                    second: piece.id.clone(),
                });
            }
            owners.insert(coord, index);
        }
    }
    Ok(())
}
