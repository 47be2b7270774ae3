//! Exploded-view offsets.

use lattice_types::{Point3, Vector3};

use crate::layout::AssemblyLayout;

/// Mean world position of piece `index`'s cells.
#[must_use]
pub fn piece_centroid(layout: &AssemblyLayout, index: usize) -> Point3<f64> {
    layout.centroid(index)
}

/// Per-piece displacement pushing every piece away from the assembly center.
///
/// Offset = (piece centroid - centroid of all cells) * `factor`. A factor of
/// zero collapses the view back to the assembled state.
///
/// # Example
///
/// ```
/// use lattice_assembly::{explosion_offsets, AssemblyLayout, Piece};
/// use lattice_types::{LatticeCoord, LatticeTransform};
///
/// let pieces = vec![
///     Piece::new("L", vec![LatticeCoord::new(-1, 0, 0)]),
///     Piece::new("R", vec![LatticeCoord::new(1, 0, 0)]),
/// ];
/// let layout = AssemblyLayout::new(pieces, &LatticeTransform::identity()).unwrap();
/// let offsets = explosion_offsets(&layout, 2.0);
/// assert_eq!(offsets[0].x, -2.0);
/// assert_eq!(offsets[1].x, 2.0);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn explosion_offsets(layout: &AssemblyLayout, factor: f64) -> Vec<Vector3<f64>> {
    let (sum, count) = (0..layout.len())
        .flat_map(|i| layout.positions(i).iter())
        .fold((Vector3::zeros(), 0_usize), |(sum, n), p| (sum + p.coords, n + 1));
    if count == 0 {
        return Vec::new();
    }
    let center = sum / count as f64;

    (0..layout.len())
        .map(|i| (piece_centroid(layout, i).coords - center) * factor)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;
    use approx::assert_relative_eq;
    use lattice_types::{LatticeCoord, LatticeTransform};

    #[test]
    fn center_is_cell_weighted() {
        let pieces = vec![
            Piece::new("big", vec![LatticeCoord::new(0, 0, 0), LatticeCoord::new(0, 0, 1), LatticeCoord::new(0, 0, 2)]),
            Piece::new("small", vec![LatticeCoord::new(4, 0, 1)]),
        ];
        let layout = AssemblyLayout::new(pieces, &LatticeTransform::identity()).unwrap();
        let offsets = explosion_offsets(&layout, 1.0);
        // Overall center x = 4 / 4 = 1
        assert_relative_eq!(offsets[0], Vector3::new(-1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(offsets[1], Vector3::new(3.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn zero_factor_and_empty_layout() {
        let pieces = vec![Piece::new("A", vec![LatticeCoord::new(3, 3, 3)])];
        let layout = AssemblyLayout::new(pieces, &LatticeTransform::identity()).unwrap();
        assert_eq!(explosion_offsets(&layout, 0.0), vec![Vector3::zeros()]);

        let empty = AssemblyLayout::new(Vec::new(), &LatticeTransform::identity()).unwrap();
        assert!(explosion_offsets(&empty, 1.0).is_empty());
    }
}
