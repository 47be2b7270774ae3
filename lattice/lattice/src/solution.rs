//! End-to-end orientation and ordering of a solution.

use lattice_assembly::{AssemblyLayout, AssemblyResult, OrderParams, OrderStrategy, Piece, RevealOrder, plan_order};
use lattice_orient::{ViewParams, ViewTransforms};
use lattice_types::{LatticeCoord, LatticeTransform};
use tracing::info;

/// A solution oriented for display with its reveal order.
#[derive(Debug, Clone)]
pub struct SolutionView {
    /// View transforms computed over every cell of the solution.
    pub transforms: ViewTransforms,
    /// Pieces placed with the oriented world transform.
    pub layout: AssemblyLayout,
    /// Reveal order over `layout`.
    pub order: RevealOrder,
}

impl SolutionView {
    /// Orient all cells, place the pieces with the oriented transform and
    /// plan the order with `strategy`.
    ///
    /// # Errors
    ///
    /// Fails if a piece is empty or two pieces overlap.
    pub fn build(
        pieces: Vec<Piece>,
        lattice: &LatticeTransform,
        strategy: OrderStrategy,
        view_params: &ViewParams,
        order_params: &OrderParams,
    ) -> AssemblyResult<Self> {
        let cells: Vec<LatticeCoord> = pieces.iter().flat_map(|p| p.cells.iter().copied()).collect();
        let transforms = ViewTransforms::compute(&cells, lattice, view_params);
        let layout = AssemblyLayout::new(pieces, &transforms.world)?;
        let order = plan_order(&layout, strategy, order_params);

        info!(
            pieces = layout.len(),
            cells = cells.len(),
            %strategy,
            fallback = order.fallback_count(),
            "prepared solution view"
        );

        Ok(Self {
            transforms,
            layout,
            order,
        })
    }

    /// Re-plan with another strategy, keeping the orientation.
    #[must_use]
    pub fn reorder(&self, strategy: OrderStrategy, params: &OrderParams) -> RevealOrder {
        plan_order(&self.layout, strategy, params)
    }
}
