//! Discrete height layers.

use tracing::debug;

use crate::layout::AssemblyLayout;

/// Height buckets obtained by clustering world Y values, bottom (0) to top.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportLayers {
    centers: Vec<f64>,
    cell_layers: Vec<Vec<usize>>,
}

impl SupportLayers {
    /// Cluster every cell's world Y.
    ///
    /// Values are snapped to multiples of `tolerance` and de-duplicated. The
    /// sorted distinct values are split wherever the gap to the next one is
    /// larger than `split_fraction` times the smallest gap, each run becomes
    /// one layer at its mean, and every cell takes the nearest layer.
    ///
    /// # Example
    ///
    /// ```
    /// use lattice_assembly::{AssemblyLayout, Piece, SupportLayers};
    /// use lattice_types::{LatticeCoord, LatticeTransform};
    ///
    /// let piece = Piece::new("A", vec![
    ///     LatticeCoord::new(0, 0, 0),
    ///     LatticeCoord::new(0, 1, 0),
    ///     LatticeCoord::new(1, 1, 0),
    /// ]);
    /// let layout = AssemblyLayout::new(vec![piece], &LatticeTransform::identity()).unwrap();
    /// let layers = SupportLayers::from_layout(&layout, 1e-6, 0.5);
    /// assert_eq!(layers.len(), 2);
    /// assert_eq!(layers.piece_layers(0), &[0, 1, 1]);
    /// ```
    #[must_use]
    pub fn from_layout(layout: &AssemblyLayout, tolerance: f64, split_fraction: f64) -> Self {
        let snap = |y: f64| {
            if tolerance > 0.0 {
                (y / tolerance).round() * tolerance
            } else {
                y
            }
        };

        let mut values: Vec<f64> = (0..layout.len())
            .flat_map(|i| layout.positions(i).iter().map(|p| snap(p.y)))
            .filter(|y| y.is_finite())
            .collect();
        values.sort_by(f64::total_cmp);
        values.dedup();

        let centers = cluster_centers(&values, split_fraction);
        let cell_layers = (0..layout.len())
            .map(|i| {
                layout
                    .positions(i)
                    .iter()
                    .map(|p| nearest(&centers, p.y))
                    .collect()
            })
            .collect();

        debug!(distinct = values.len(), layers = centers.len(), "clustered support layers");
        Self {
            centers,
            cell_layers,
        }
    }

    /// Layer centers, ascending.
    #[must_use]
    pub fn centers(&self) -> &[f64] {
        &self.centers
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// Returns `true` if there are no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Layer of cell `cell` of piece `piece`.
    #[must_use]
    pub fn layer_of(&self, piece: usize, cell: usize) -> usize {
        self.cell_layers[piece][cell]
    }

    /// Layers of every cell of `piece`, parallel to its cell list.
    #[must_use]
    pub fn piece_layers(&self, piece: usize) -> &[usize] {
        &self.cell_layers[piece]
    }

    /// Mean layer index over the cells of `piece`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_layer(&self, piece: usize) -> f64 {
        let layers = &self.cell_layers[piece];
        if layers.is_empty() {
            return 0.0;
        }
        layers.iter().sum::<usize>() as f64 / layers.len() as f64
    }
}

#[allow(clippy::cast_precision_loss)]
fn cluster_centers(sorted: &[f64], split_fraction: f64) -> Vec<f64> {
    let Some(&first) = sorted.first() else {
        return Vec::new();
    };

    let min_gap = sorted
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|&g| g > 0.0)
        .fold(f64::INFINITY, f64::min);
    let split = split_fraction * min_gap;

    let mut centers = Vec::new();
    let mut sum = first;
    let mut count = 1_usize;
    for w in sorted.windows(2) {
        if w[1] - w[0] > split {
            centers.push(sum / count as f64);
            sum = 0.0;
            count = 0;
        }
        sum += w[1];
        count += 1;
    }
    centers.push(sum / count as f64);
    centers
}

/// Index of the center closest to `y`; ties go to the lower layer.
fn nearest(centers: &[f64], y: f64) -> usize {
    let above = centers.partition_point(|&c| c < y);
    match (above.checked_sub(1), centers.get(above)) {
        (Some(below), Some(&up)) if (y - centers[below]) <= (up - y) => below,
        (Some(below), None) => below,
        _ => above.min(centers.len().saturating_sub(1)),
    }
}
