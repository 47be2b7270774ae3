//! Explicit recompute state for interactive editing.

use lattice_types::{LatticeCoord, LatticeTransform};
use tracing::debug;

use crate::view::{ViewParams, ViewTransforms};

/// What an update did to the published transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewUpdate<'a> {
    /// Cell set unchanged and no reset pending; the old snapshot still holds.
    Unchanged(&'a ViewTransforms),
    /// A new snapshot was computed; the camera should re-target its pivot.
    Recomputed(&'a ViewTransforms),
}

impl<'a> ViewUpdate<'a> {
    /// The current transforms, whichever variant this is.
    #[must_use]
    pub const fn transforms(&self) -> &'a ViewTransforms {
        match *self {
            Self::Unchanged(t) | Self::Recomputed(t) => t,
        }
    }

    /// Returns `true` for [`ViewUpdate::Recomputed`].
    #[must_use]
    pub const fn is_recomputed(&self) -> bool {
        matches!(self, Self::Recomputed(_))
    }
}

/// Owns the lattice transform and the last published [`ViewTransforms`].
///
/// The snapshot is only ever replaced whole. A session starts with a reset
/// pending, so the first [`update`](Self::update) always recomputes.
///
/// # Example
///
/// ```
/// use lattice_orient::{ViewParams, ViewSession};
/// use lattice_types::{LatticeCoord, LatticeTransform};
///
/// let mut session = ViewSession::new(LatticeTransform::fcc(), ViewParams::default());
/// let cells = [LatticeCoord::new(0, 0, 0), LatticeCoord::new(1, 0, 0)];
///
/// assert!(session.update(&cells).is_recomputed());
/// assert!(!session.update(&[cells[1], cells[0]]).is_recomputed());
///
/// session.request_reset();
/// assert!(session.update(&cells).is_recomputed());
/// ```
#[derive(Debug, Clone)]
pub struct ViewSession {
    lattice: LatticeTransform,
    params: ViewParams,
    cells: Vec<LatticeCoord>,
    current: ViewTransforms,
    reset_requested: bool,
}

impl ViewSession {
    /// Start a session with no cells.
    #[must_use]
    pub fn new(lattice: LatticeTransform, params: ViewParams) -> Self {
        let current = ViewTransforms::compute(&[], &lattice, &params);
        Self {
            lattice,
            params,
            cells: Vec::new(),
            current,
            reset_requested: true,
        }
    }

    /// Recompute if the cell set changed (order and duplicates ignored) or a
    /// reset was requested.
    pub fn update(&mut self, cells: &[LatticeCoord]) -> ViewUpdate<'_> {
        let mut normalized = cells.to_vec();
        normalized.sort_unstable();
        normalized.dedup();

        if !self.reset_requested && normalized == self.cells {
            return ViewUpdate::Unchanged(&self.current);
        }

        debug!(
            cells = normalized.len(),
            reset = self.reset_requested,
            "recomputing view transforms"
        );
        self.current = ViewTransforms::compute(&normalized, &self.lattice, &self.params);
        self.cells = normalized;
        self.reset_requested = false;
        ViewUpdate::Recomputed(&self.current)
    }

    /// Force the next [`update`](Self::update) to recompute.
    pub fn request_reset(&mut self) {
        self.reset_requested = true;
    }

    /// Swap the lattice transform; the next update recomputes.
    pub fn set_lattice(&mut self, lattice: LatticeTransform) {
        self.lattice = lattice;
        self.reset_requested = true;
    }

    /// Swap the parameters; the next update recomputes.
    pub fn set_params(&mut self, params: ViewParams) {
        self.params = params;
        self.reset_requested = true;
    }

    /// The last published transforms.
    #[must_use]
    pub const fn current(&self) -> &ViewTransforms {
        &self.current
    }

    /// The lattice transform in use.
    #[must_use]
    pub const fn lattice(&self) -> &LatticeTransform {
        &self.lattice
    }

    /// Cells behind the current snapshot, sorted and de-duplicated.
    #[must_use]
    pub fn cells(&self) -> &[LatticeCoord] {
        &self.cells
    }
}
