//! Stored solution records.

use lattice_types::LatticeCoord;
use serde::{Deserialize, Serialize};

use crate::error::{AssemblyError, AssemblyResult};
use crate::piece::{Piece, validate_pieces};

/// The placed pieces of a solved puzzle.
///
/// Two JSON layouts are accepted, and unknown fields are ignored:
///
/// ```json
/// { "placements": [{ "piece": "A", "cells_ijk": [[0, 0, 0], [1, 0, 0]] }] }
/// { "placed_pieces": [{ "pieceId": "A", "cells": [{ "i": 0, "j": 0, "k": 0 }] }] }
/// ```
///
/// # Example
///
/// ```
/// use lattice_assembly::SolutionRecord;
///
/// let json = r#"{ "placements": [ { "piece": "A", "cells_ijk": [[0, 0, 0], [1, 0, 0]] } ] }"#;
/// let record = SolutionRecord::from_json(json).unwrap();
/// let pieces = record.into_pieces().unwrap();
/// assert_eq!(pieces[0].id, "A");
/// assert_eq!(pieces[0].cells.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionRecord {
    /// Pieces in record order.
    pub pieces: Vec<Piece>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    placements: Option<Vec<RawPlacement>>,
    placed_pieces: Option<Vec<RawPlacedPiece>>,
}

#[derive(Debug, Deserialize)]
struct RawPlacement {
    piece: String,
    cells_ijk: Vec<[i32; 3]>,
}

#[derive(Debug, Deserialize)]
struct RawPlacedPiece {
    #[serde(rename = "pieceId")]
    piece_id: String,
    cells: Vec<LatticeCoord>,
}

#[derive(Debug, Serialize)]
struct RecordOut<'a> {
    placements: Vec<RawPlacementRef<'a>>,
}

#[derive(Debug, Serialize)]
struct RawPlacementRef<'a> {
    piece: &'a str,
    cells_ijk: Vec<[i32; 3]>,
}

impl SolutionRecord {
    /// Parse either record layout. `placements` wins if both are present.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::Json`] for malformed JSON or when neither
    /// `placements` nor `placed_pieces` is present.
    pub fn from_json(json: &str) -> AssemblyResult<Self> {
        let raw: RawRecord = serde_json::from_str(json)?;

        let pieces = match (raw.placements, raw.placed_pieces) {
            (Some(placements), _) => placements
                .into_iter()
                .map(|p| Piece::new(p.piece, p.cells_ijk.into_iter().map(LatticeCoord::from).collect()))
                .collect(),
            (None, Some(placed)) => placed
                .into_iter()
                .map(|p| Piece::new(p.piece_id, p.cells))
                .collect(),
            (None, None) => {
                return Err(AssemblyError::Json {
                    message: String::from("expected a `placements` or `placed_pieces` array"),
                });
            }
        };
        Ok(Self { pieces })
    }

    /// Serialize in the `placements` layout.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::Json`] if serialization fails.
    pub fn to_json(&self) -> AssemblyResult<String> {
        let out = RecordOut {
            placements: self
                .pieces
                .iter()
                .map(|p| RawPlacementRef {
                    piece: &p.id,
                    cells_ijk: p.cells.iter().map(|c| c.as_array()).collect(),
                })
                .collect(),
        };
        Ok(serde_json::to_string(&out)?)
    }

    /// Validate and hand over the pieces.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::EmptyPiece`] or [`AssemblyError::OverlappingCell`].
    pub fn into_pieces(self) -> AssemblyResult<Vec<Piece>> {
        validate_pieces(&self.pieces)?;
        Ok(self.pieces)
    }
}
