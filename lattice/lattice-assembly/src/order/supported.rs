use std::collections::BTreeSet;

use hashbrown::HashMap;
use lattice_types::LatticeCoord;
use tracing::{debug, warn};

use crate::deltas::SupportDeltas;
use crate::graph::ContactGraph;
use crate::layers::SupportLayers;
use crate::layout::AssemblyLayout;
use crate::order::{OrderStrategy, Placement, RevealOrder};
use crate::params::OrderParams;

/// Precomputed support data for one assembly.
///
/// A cell in layer 0 is always supported. A cell in a higher layer is
/// supported when at least [`OrderParams::min_support_contacts`] of its delta
/// neighbors sit in the layer directly below and are either already placed
/// or part of the same piece. A piece is placeable only when every one of its
/// cells is supported.
#[derive(Debug, Clone)]
pub struct SupportAnalysis<'a> {
    layout: &'a AssemblyLayout,
    params: &'a OrderParams,
    graph: ContactGraph,
    deltas: SupportDeltas,
    layers: SupportLayers,
    owners: HashMap<LatticeCoord, (usize, usize)>,
    grounded: Vec<usize>,
    potential: Vec<usize>,
}

impl<'a> SupportAnalysis<'a> {
    /// Build the contact graph, support deltas, layers and per-piece counts.
    #[must_use]
    pub fn new(layout: &'a AssemblyLayout, params: &'a OrderParams) -> Self {
        let pieces = layout.pieces();
        let graph = ContactGraph::from_lattice(pieces);
        let deltas = SupportDeltas::from_pieces(pieces, params.support_search_radius);
        let layers = SupportLayers::from_layout(layout, params.layer_tolerance, params.layer_split_fraction);

        let mut owners = HashMap::new();
        for (p, piece) in pieces.iter().enumerate() {
            for (c, &cell) in piece.cells.iter().enumerate() {
                owners.insert(cell, (p, c));
            }
        }

        let ground = layout.ground_y();
        let grounded = (0..layout.len())
            .map(|p| {
                layout
                    .positions(p)
                    .iter()
                    .filter(|pos| pos.y - ground <= params.ground_epsilon)
                    .count()
            })
            .collect();

        let potential = pieces
            .iter()
            .enumerate()
            .map(|(p, piece)| {
                piece
                    .cells
                    .iter()
                    .flat_map(|&cell| deltas.offsets().iter().filter_map(move |&d| cell.checked_add(d)))
                    .filter(|target| owners.get(target).is_some_and(|&(q, _)| q != p))
                    .count()
            })
            .collect();

        debug!(
            pieces = layout.len(),
            deltas = deltas.len(),
            layers = layers.len(),
            ground,
            "analyzed assembly support"
        );

        Self {
            layout,
            params,
            graph,
            deltas,
            layers,
            owners,
            grounded,
            potential,
        }
    }

    /// Lattice contact graph.
    #[must_use]
    pub const fn graph(&self) -> &ContactGraph {
        &self.graph
    }

    /// Observed support deltas.
    #[must_use]
    pub const fn deltas(&self) -> &SupportDeltas {
        &self.deltas
    }

    /// Height layers.
    #[must_use]
    pub const fn layers(&self) -> &SupportLayers {
        &self.layers
    }

    /// Cells of `piece` resting on the ground plane.
    #[must_use]
    pub fn grounded_count(&self, piece: usize) -> usize {
        self.grounded[piece]
    }

    /// Delta neighbors of `piece`'s cells that belong to other pieces.
    #[must_use]
    pub fn potential_neighbors(&self, piece: usize) -> usize {
        self.potential[piece]
    }

    /// Delta neighbors of cell `cell` of `piece` that are in the layer below
    /// and either placed or part of `piece`.
    #[must_use]
    pub fn supporting_contacts(&self, piece: usize, cell: usize, placed: &[bool]) -> usize {
        let layer = self.layers.layer_of(piece, cell);
        let Some(below) = layer.checked_sub(1) else {
            return 0;
        };
        let coord = self.layout.pieces()[piece].cells[cell];

        self.deltas
            .offsets()
            .iter()
            .filter_map(|&d| coord.checked_add(d))
            .filter_map(|target| self.owners.get(&target))
            .filter(|&&(q, c)| {
                (q == piece || placed.get(q).copied().unwrap_or(false)) && self.layers.layer_of(q, c) == below
            })
            .count()
    }

    /// Returns `true` if cell `cell` of `piece` would be supported given `placed`.
    #[must_use]
    pub fn is_cell_supported(&self, piece: usize, cell: usize, placed: &[bool]) -> bool {
        self.layers.layer_of(piece, cell) == 0
            || self.supporting_contacts(piece, cell, placed) >= self.params.min_support_contacts
    }

    /// Returns `true` if every cell of `piece` would be supported given `placed`.
    #[must_use]
    pub fn is_placeable(&self, piece: usize, placed: &[bool]) -> bool {
        (0..self.layout.pieces()[piece].len()).all(|cell| self.is_cell_supported(piece, cell, placed))
    }

    /// Greedy score of `piece` given `placed`; higher is better.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score(&self, piece: usize, placed: &[bool]) -> f64 {
        let p = self.params;
        p.grounded_weight * self.grounded[piece] as f64 + p.neighbor_weight * self.potential[piece] as f64
            - p.layer_weight * self.layers.average_layer(piece)
            + p.contact_weight * f64::from(self.graph.strength_to(piece, placed))
    }
}

/// First candidate with the strictly greatest key.
fn first_best(candidates: impl IntoIterator<Item = usize>, key: impl Fn(usize) -> f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for candidate in candidates {
        let k = key(candidate);
        match best {
            Some((_, b)) if k <= b => {}
            _ => best = Some((candidate, k)),
        }
    }
    best.map(|(index, _)| index)
}

/// Grow the assembly greedily, only ever placing fully supported pieces.
///
/// Starts from the placeable piece with the most grounded cells, then
/// repeatedly takes the best-scoring placeable piece adjacent (in the lattice
/// contact graph) to what is already placed. Ties go to the lower index.
/// When nothing adjacent is placeable the growth stops, unless
/// [`OrderParams::reseed_disconnected`] is set, and the remaining pieces are
/// appended by (grounded cells descending, min Y, index) as
/// [`Placement::UnsupportedFallback`].
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn supported_order(layout: &AssemblyLayout, params: &OrderParams) -> RevealOrder {
    let count = layout.len();
    let mut order = RevealOrder::new(OrderStrategy::Supported, count);
    if count == 0 {
        return order;
    }

    let analysis = SupportAnalysis::new(layout, params);
    let mut placed = vec![false; count];
    let mut frontier = BTreeSet::new();

    let seed = |placed: &[bool]| {
        first_best(
            (0..count).filter(|&p| !placed[p] && analysis.is_placeable(p, placed)),
            |p| analysis.grounded_count(p) as f64,
        )
    };

    let mut next = seed(&placed).map(|p| (p, Placement::Seed));
    while let Some((piece, placement)) = next {
        placed[piece] = true;
        frontier.remove(&piece);
        order.push(layout, piece, placement);
        frontier.extend(analysis.graph().neighbors(piece).iter().copied().filter(|&n| !placed[n]));

        next = first_best(
            frontier.iter().copied().filter(|&p| analysis.is_placeable(p, &placed)),
            |p| analysis.score(p, &placed),
        )
        .map(|p| (p, Placement::Supported));

        if next.is_none() && params.reseed_disconnected {
            next = seed(&placed).map(|p| (p, Placement::Seed));
        }
    }

    let mut rest: Vec<usize> = (0..count).filter(|&p| !placed[p]).collect();
    if !rest.is_empty() {
        rest.sort_by(|&a, &b| {
            analysis
                .grounded_count(b)
                .cmp(&analysis.grounded_count(a))
                .then(layout.min_y(a).total_cmp(&layout.min_y(b)))
                .then(a.cmp(&b))
        });
        warn!(
            placed = order.len(),
            remaining = rest.len(),
            "no supported placement left, appending remaining pieces"
        );
        for piece in rest {
            order.push(layout, piece, Placement::UnsupportedFallback);
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;
    use lattice_types::LatticeTransform;

    fn c(i: i32, j: i32, k: i32) -> LatticeCoord {
        LatticeCoord::new(i, j, k)
    }

    fn slab(j: i32) -> Vec<LatticeCoord> {
        vec![c(0, j, 0), c(1, j, 0), c(0, j, 1), c(1, j, 1)]
    }

    fn layout(pieces: Vec<Piece>) -> AssemblyLayout {
        AssemblyLayout::new(pieces, &LatticeTransform::identity()).unwrap()
    }

    #[test]
    fn stacked_slabs_go_bottom_up() {
        // Listed top first so input order cannot explain the result
        let l = layout(vec![Piece::new("top", slab(1)), Piece::new("bottom", slab(0))]);
        let order = supported_order(&l, &OrderParams::default());
        assert_eq!(order.ids(), vec!["bottom", "top"]);
        assert_eq!(order.entries[0].placement, Placement::Seed);
        assert_eq!(order.entries[1].placement, Placement::Supported);
        assert_eq!(order.fallback_count(), 0);
    }

    #[test]
    fn raised_cell_needs_three_contacts() {
        let l = layout(vec![Piece::new("bottom", slab(0)), Piece::new("top", slab(1))]);
        let params = OrderParams::default();
        let analysis = SupportAnalysis::new(&l, &params);
        assert!(!analysis.is_placeable(1, &[false, false]));
        assert!(analysis.is_placeable(1, &[true, false]));
        // Straight down plus two diagonals plus the far corner
        assert_eq!(analysis.supporting_contacts(1, 0, &[true, false]), 4);
        assert_eq!(analysis.grounded_count(0), 4);
        assert_eq!(analysis.grounded_count(1), 0);
    }

    #[test]
    fn floating_piece_is_flagged() {
        // A lone sphere one layer up with nothing beneath it
        let l = layout(vec![Piece::new("bottom", slab(0)), Piece::new("perch", vec![c(5, 1, 5)])]);
        let order = supported_order(&l, &OrderParams::default());
        assert_eq!(order.ids(), vec!["bottom", "perch"]);
        assert_eq!(order.entries[1].placement, Placement::UnsupportedFallback);
    }

    #[test]
    fn higher_contact_sum_wins() {
        let l = layout(vec![
            Piece::new("base", vec![c(0, 0, 0), c(1, 0, 0)]),
            Piece::new("loose", vec![c(3, 0, 0), c(4, 0, 0)]),
            Piece::new("snug", vec![c(0, 0, 1), c(1, 0, 1)]),
            Piece::new("link", vec![c(2, 0, 0)]),
        ]);
        let order = supported_order(&l, &OrderParams::default());
        // base seeds (most grounded, lowest index); snug shares two contacts
        assert_eq!(order.ids()[..2], ["base", "snug"]);
        assert!(order.is_permutation_of(4));
        assert_eq!(order.fallback_count(), 0);
    }

    #[test]
    fn fallback_puts_grounded_pieces_first() {
        let l = layout(vec![
            Piece::new("base", slab(0)),
            Piece::new("kite", vec![c(50, 2, 50)]),
            Piece::new("pole", vec![c(30, 0, 30), c(30, 1, 30), c(30, 2, 30)]),
            Piece::new("post", vec![c(40, 0, 40), c(41, 0, 40), c(40, 1, 40)]),
            Piece::new("perch", vec![c(20, 1, 20)]),
        ]);
        let params = OrderParams::default();
        let analysis = SupportAnalysis::new(&l, &params);
        assert_eq!(analysis.grounded_count(2), 1);
        assert_eq!(analysis.grounded_count(3), 2);

        let order = supported_order(&l, &params);
        // Grounded cells descending, then lowest first
        assert_eq!(order.ids(), vec!["base", "post", "pole", "perch", "kite"]);
        assert_eq!(order.entries[0].placement, Placement::Seed);
        assert_eq!(order.fallback_count(), 4);
    }

    #[test]
    fn potential_neighbors_break_contact_ties() {
        // "left" and "right" each touch "base" once and are grounded once;
        // only "right" has a diagonal neighbor ("tail")
        let l = layout(vec![
            Piece::new("base", vec![c(0, 0, 0), c(1, 0, 0)]),
            Piece::new("left", vec![c(-1, 0, 0)]),
            Piece::new("right", vec![c(2, 0, 0)]),
            Piece::new("tail", vec![c(3, 0, 1)]),
        ]);
        let params = OrderParams::default();
        let analysis = SupportAnalysis::new(&l, &params);
        assert_eq!(analysis.potential_neighbors(1), 1);
        assert_eq!(analysis.potential_neighbors(2), 2);

        let placed = [true, false, false, false];
        assert_eq!(analysis.graph().strength_to(1, &placed), analysis.graph().strength_to(2, &placed));
        assert!(analysis.score(2, &placed) > analysis.score(1, &placed));

        let order = supported_order(&l, &params);
        assert_eq!(order.ids()[..3], ["base", "right", "left"]);
    }

    #[test]
    fn nothing_placeable_falls_back_entirely() {
        let positions = vec![vec![
            lattice_types::Point3::new(0.0, 0.0, 0.0),
            lattice_types::Point3::new(0.0, 1.0, 0.0),
        ]];
        let pieces = vec![Piece::new("pole", vec![c(0, 0, 0), c(0, 1, 0)])];
        let l = AssemblyLayout::from_positions(pieces, positions, 1.0).unwrap();
        let order = supported_order(&l, &OrderParams::default());
        assert_eq!(order.ids(), vec!["pole"]);
        assert_eq!(order.entries[0].placement, Placement::UnsupportedFallback);
    }

    #[test]
    fn reseed_continues_after_gap() {
        let l = layout(vec![
            Piece::new("left", vec![c(0, 0, 0), c(1, 0, 0)]),
            Piece::new("right", vec![c(9, 0, 0), c(10, 0, 0), c(11, 0, 0)]),
        ]);
        let strict = supported_order(&l, &OrderParams::default());
        assert_eq!(strict.ids(), vec!["right", "left"]);
        assert_eq!(strict.entries[1].placement, Placement::UnsupportedFallback);

        let reseeding = supported_order(&l, &OrderParams::default().with_reseed_disconnected(true));
        assert_eq!(reseeding.ids(), vec!["right", "left"]);
        assert_eq!(reseeding.entries[1].placement, Placement::Seed);
        assert_eq!(reseeding.fallback_count(), 0);
    }
}
