//! Piece adjacency graphs.
//!
//! Two adjacency rules are used and kept apart: lattice contacts (cells at
//! Manhattan distance 1 in index space) and world proximity (sphere centers
//! within a distance threshold). Both weight an edge by the number of cell
//! pairs that satisfy the rule.

use hashbrown::HashMap;
use lattice_types::LatticeCoord;
use tracing::debug;

use crate::layout::AssemblyLayout;
use crate::piece::Piece;

/// Weighted undirected graph over piece indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactGraph {
    weights: HashMap<(usize, usize), u32>,
    neighbors: Vec<Vec<usize>>,
}

impl ContactGraph {
    /// Graph where pieces touch if any of their cells are axis neighbors in
    /// lattice index space.
    ///
    /// # Example
    ///
    /// ```
    /// use lattice_assembly::{ContactGraph, Piece};
    /// use lattice_types::LatticeCoord;
    ///
    /// let pieces = vec![
    ///     Piece::new("A", vec![LatticeCoord::new(0, 0, 0), LatticeCoord::new(0, 1, 0)]),
    ///     Piece::new("B", vec![LatticeCoord::new(1, 0, 0), LatticeCoord::new(1, 1, 0)]),
    /// ];
    /// let graph = ContactGraph::from_lattice(&pieces);
    /// assert_eq!(graph.strength(0, 1), 2);
    /// assert_eq!(graph.neighbors(1), &[0]);
    /// ```
    #[must_use]
    pub fn from_lattice(pieces: &[Piece]) -> Self {
        let occupancy = occupancy(pieces);
        let mut graph = Self::with_pieces(pieces.len());

        for (a, piece) in pieces.iter().enumerate() {
            for cell in &piece.cells {
                for neighbor in cell.axis_neighbors() {
                    if let Some(&b) = occupancy.get(&neighbor) {
                        // Each cell pair is seen from both sides; count it from the lower index.
                        if b > a {
                            graph.add_contact(a, b);
                        }
                    }
                }
            }
        }

        graph.finish();
        debug!(pieces = pieces.len(), edges = graph.edge_count(), "built lattice contact graph");
        graph
    }

    /// Graph where pieces touch if any of their cell centers are within
    /// `threshold` world units.
    #[must_use]
    pub fn from_proximity(layout: &AssemblyLayout, threshold: f64) -> Self {
        let mut graph = Self::with_pieces(layout.len());
        let threshold_sq = threshold * threshold;

        for a in 0..layout.len() {
            for b in a + 1..layout.len() {
                for pa in layout.positions(a) {
                    for pb in layout.positions(b) {
                        if (pa - pb).norm_squared() <= threshold_sq {
                            graph.add_contact(a, b);
                        }
                    }
                }
            }
        }

        graph.finish();
        debug!(
            pieces = layout.len(),
            threshold,
            edges = graph.edge_count(),
            "built proximity contact graph"
        );
        graph
    }

    fn with_pieces(count: usize) -> Self {
        Self {
            weights: HashMap::new(),
            neighbors: vec![Vec::new(); count],
        }
    }

    fn add_contact(&mut self, a: usize, b: usize) {
        let key = (a.min(b), a.max(b));
        let weight = self.weights.entry(key).or_insert(0);
        if *weight == 0 {
            self.neighbors[a].push(b);
            self.neighbors[b].push(a);
        }
        *weight += 1;
    }

    fn finish(&mut self) {
        for list in &mut self.neighbors {
            list.sort_unstable();
        }
    }

    /// Number of cell pairs in contact between pieces `a` and `b`; zero if not adjacent.
    #[must_use]
    pub fn strength(&self, a: usize, b: usize) -> u32 {
        self.weights.get(&(a.min(b), a.max(b))).copied().unwrap_or(0)
    }

    /// Returns `true` if `a` and `b` share at least one contact.
    #[must_use]
    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.strength(a, b) > 0
    }

    /// Neighbors of `piece`, ascending.
    #[must_use]
    pub fn neighbors(&self, piece: usize) -> &[usize] {
        self.neighbors.get(piece).map_or(&[][..], Vec::as_slice)
    }

    /// Sum of contact strengths from `piece` to every piece flagged in `placed`.
    #[must_use]
    pub fn strength_to(&self, piece: usize, placed: &[bool]) -> u32 {
        self.neighbors(piece)
            .iter()
            .filter(|&&n| placed.get(n).copied().unwrap_or(false))
            .map(|&n| self.strength(piece, n))
            .sum()
    }

    /// Number of pieces.
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of adjacent piece pairs.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }
}

/// Map from each occupied cell to the index of the piece holding it.
pub(crate) fn occupancy(pieces: &[Piece]) -> HashMap<LatticeCoord, usize> {
    let mut map = HashMap::with_capacity(pieces.iter().map(Piece::len).sum());
    for (index, piece) in pieces.iter().enumerate() {
        for &cell in &piece.cells {
            map.insert(cell, index);
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_types::LatticeTransform;

    fn c(i: i32, j: i32, k: i32) -> LatticeCoord {
        LatticeCoord::new(i, j, k)
    }

    fn three_in_a_row() -> Vec<Piece> {
        vec![
            Piece::new("A", vec![c(0, 0, 0), c(0, 1, 0)]),
            Piece::new("B", vec![c(1, 0, 0)]),
            Piece::new("C", vec![c(5, 0, 0)]),
        ]
    }

    #[test]
    fn range_edges_are_not_adjacent() {
        let pieces = vec![
            Piece::new("max", vec![c(i32::MAX, 0, 0)]),
            Piece::new("min", vec![c(i32::MIN, 0, 0)]),
        ];
        let graph = ContactGraph::from_lattice(&pieces);
        assert!(!graph.are_adjacent(0, 1));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn lattice_graph_counts_pairs() {
        let graph = ContactGraph::from_lattice(&three_in_a_row());
        assert_eq!(graph.strength(0, 1), 1);
        assert_eq!(graph.strength(1, 0), 1);
        assert!(!graph.are_adjacent(0, 2));
        assert_eq!(graph.neighbors(2), &[] as &[usize]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn diagonal_is_not_a_lattice_contact() {
        let pieces = vec![
            Piece::new("A", vec![c(0, 0, 0)]),
            Piece::new("B", vec![c(1, 1, 0)]),
        ];
        let graph = ContactGraph::from_lattice(&pieces);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn proximity_graph_uses_world_distance() {
        let layout = AssemblyLayout::new(three_in_a_row(), &LatticeTransform::identity()).unwrap();
        // (0,1,0)-(1,0,0) is sqrt(2) apart; only the threshold decides
        let tight = ContactGraph::from_proximity(&layout, 1.1);
        assert_eq!(tight.strength(0, 1), 1);
        let loose = ContactGraph::from_proximity(&layout, 1.5);
        assert_eq!(loose.strength(0, 1), 2);
        assert!(!loose.are_adjacent(1, 2));
    }

    #[test]
    fn strength_to_placed_pieces() {
        let pieces = vec![
            Piece::new("A", vec![c(0, 0, 0)]),
            Piece::new("B", vec![c(1, 0, 0), c(0, 1, 0)]),
            Piece::new("C", vec![c(-1, 0, 0), c(0, 0, 1)]),
        ];
        let graph = ContactGraph::from_lattice(&pieces);
        assert_eq!(graph.strength(0, 1), 2);
        assert_eq!(graph.strength(0, 2), 2);
        assert_eq!(graph.strength_to(0, &[false, true, false]), 2);
        assert_eq!(graph.strength_to(0, &[false, true, true]), 4);
    }
}
