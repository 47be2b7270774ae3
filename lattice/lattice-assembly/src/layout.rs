//! Pieces together with the world positions of their cells.

use std::cmp::Ordering;

use lattice_types::{LatticeTransform, Point3};

use crate::error::{AssemblyError, AssemblyResult};
use crate::piece::{Piece, validate_pieces};

/// A validated assembly in world space.
///
/// Positions are normally produced with the oriented world transform so that
/// world Y is "up" for the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyLayout {
    pieces: Vec<Piece>,
    positions: Vec<Vec<Point3<f64>>>,
    diameter: f64,
}

impl AssemblyLayout {
    /// Place `pieces` with `transform`.
    ///
    /// The sphere diameter is the transform's neighbor spacing.
    ///
    /// # Errors
    ///
    /// Fails if a piece is empty or two pieces overlap.
    ///
    /// # Example
    ///
    /// ```
    /// use lattice_assembly::{AssemblyLayout, Piece};
    /// use lattice_types::{LatticeCoord, LatticeTransform};
    ///
    /// let pieces = vec![Piece::new("A", vec![LatticeCoord::new(0, 2, 0)])];
    /// let layout = AssemblyLayout::new(pieces, &LatticeTransform::identity()).unwrap();
    /// assert_eq!(layout.min_y(0), 2.0);
    /// assert_eq!(layout.diameter(), 1.0);
    /// ```
    pub fn new(pieces: Vec<Piece>, transform: &LatticeTransform) -> AssemblyResult<Self> {
        validate_pieces(&pieces)?;
        let positions = pieces
            .iter()
            .map(|p| p.cells.iter().map(|&c| transform.to_world(c)).collect())
            .collect();
        Ok(Self {
            pieces,
            positions,
            diameter: transform.neighbor_spacing(),
        })
    }

    /// Use caller-supplied world positions, one per cell.
    ///
    /// # Errors
    ///
    /// Fails on empty or overlapping pieces, or when a piece's position count
    /// does not match its cell count.
    pub fn from_positions(
        pieces: Vec<Piece>,
        positions: Vec<Vec<Point3<f64>>>,
        diameter: f64,
    ) -> AssemblyResult<Self> {
        validate_pieces(&pieces)?;
        if positions.len() != pieces.len() {
            return Err(AssemblyError::PositionMismatch {
                id: String::from("<assembly>"),
                cells: pieces.len(),
                positions: positions.len(),
            });
        }
        for (piece, pos) in pieces.iter().zip(&positions) {
            if piece.len() != pos.len() {
                return Err(AssemblyError::PositionMismatch {
                    id: piece.id.clone(),
                    cells: piece.len(),
                    positions: pos.len(),
                });
            }
        }
        Ok(Self {
            pieces,
            positions,
            diameter,
        })
    }

    /// All pieces, in input order.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Number of pieces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Returns `true` if there are no pieces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// World positions of piece `index`'s cells, parallel to its cell list.
    #[must_use]
    pub fn positions(&self, index: usize) -> &[Point3<f64>] {
        &self.positions[index]
    }

    /// Sphere diameter (distance between touching neighbors).
    #[must_use]
    pub const fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Lowest world Y of any cell in piece `index`.
    #[must_use]
    pub fn min_y(&self, index: usize) -> f64 {
        self.positions[index]
            .iter()
            .map(|p| p.y)
            .fold(f64::INFINITY, f64::min)
    }

    /// Mean world Y of piece `index`.
    #[must_use]
    pub fn centroid_y(&self, index: usize) -> f64 {
        self.centroid(index).y
    }

    /// Mean world position of piece `index`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn centroid(&self, index: usize) -> Point3<f64> {
        let pos = &self.positions[index];
        if pos.is_empty() {
            return Point3::origin();
        }
        let sum = pos.iter().fold(Point3::origin().coords, |acc, p| acc + p.coords);
        Point3::from(sum / pos.len() as f64)
    }

    /// Lowest world Y over the whole assembly; `+inf` when empty.
    #[must_use]
    pub fn ground_y(&self) -> f64 {
        (0..self.len()).map(|i| self.min_y(i)).fold(f64::INFINITY, f64::min)
    }

    /// Ordering by (min Y, centroid Y, input index), all ascending.
    #[must_use]
    pub fn height_cmp(&self, a: usize, b: usize) -> Ordering {
        self.min_y(a)
            .total_cmp(&self.min_y(b))
            .then(self.centroid_y(a).total_cmp(&self.centroid_y(b)))
            .then(a.cmp(&b))
    }

    /// Piece indices sorted by [`height_cmp`](Self::height_cmp).
    #[must_use]
    pub fn by_height(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&a, &b| self.height_cmp(a, b));
        order
    }
}
