//! Error types for assembly input.

use lattice_types::LatticeCoord;
use thiserror::Error;

/// Result type for assembly operations.
pub type AssemblyResult<T> = Result<T, AssemblyError>;

/// Errors raised while loading or validating pieces.
///
/// Ordering itself never fails; these only come from the input boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssemblyError {
    /// A piece has no cells.
    #[error("piece '{id}' has no cells")]
    EmptyPiece {
        /// The offending piece ID.
        id: String,
    },

    /// Two pieces (or one piece twice) claim the same cell.
    #[error("cell {coord} is claimed by both '{first}' and '{second}'")]
    OverlappingCell {
        /// The shared cell.
        coord: LatticeCoord,
        /// ID of the piece that claimed it first.
        first: String,
        /// ID of the piece that claimed it again.
        second: String,
    },

    /// Caller-supplied positions do not line up with the piece cells.
    #[error("piece '{id}' has {cells} cells but {positions} positions")]
    PositionMismatch {
        /// The offending piece ID.
        id: String,
        /// Number of cells in the piece.
        cells: usize,
        /// Number of positions supplied.
        positions: usize,
    },

    /// A strategy name that matches none of [`OrderStrategy::ALL`](crate::OrderStrategy::ALL).
    #[error("unknown order strategy '{name}'")]
    UnknownStrategy {
        /// The name as given.
        name: String,
    },

    /// Malformed solution record.
    #[error("invalid solution record: {message}")]
    Json {
        /// Parser message.
        message: String,
    },
}

impl From<serde_json::Error> for AssemblyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
        }
    }
}
