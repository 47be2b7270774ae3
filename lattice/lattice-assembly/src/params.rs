//! Ordering configuration.

use serde::{Deserialize, Serialize};

/// Tunable constants for [`plan_order`](crate::plan_order).
///
/// The support thresholds and score weights are heuristics that existing
/// saved playbacks depend on; the defaults reproduce them.
///
/// # Example
///
/// ```
/// use lattice_assembly::OrderParams;
///
/// let params = OrderParams::default()
///     .with_proximity_factor(1.5)
///     .with_reseed_disconnected(true);
/// assert_eq!(params.min_support_contacts, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderParams {
    /// Proximity edges join cells within this many sphere diameters.
    pub proximity_factor: f64,

    /// World Y values are snapped to this grid before layering.
    pub layer_tolerance: f64,

    /// A new layer starts where the gap exceeds this fraction of the smallest gap.
    pub layer_split_fraction: f64,

    /// Chebyshev radius searched for support deltas.
    pub support_search_radius: u32,

    /// Delta neighbors in the layer below needed to support a raised cell.
    pub min_support_contacts: usize,

    /// Cells within this distance of the lowest Y count as grounded.
    pub ground_epsilon: f64,

    /// Score weight per grounded cell.
    pub grounded_weight: f64,

    /// Score weight per potential neighbor contact.
    pub neighbor_weight: f64,

    /// Score penalty per unit of average layer.
    pub layer_weight: f64,

    /// Score weight per contact with already placed pieces.
    pub contact_weight: f64,

    /// Continue from any placeable piece when the frontier runs dry instead
    /// of falling back immediately.
    pub reseed_disconnected: bool,
}

impl Default for OrderParams {
    fn default() -> Self {
        Self {
            proximity_factor: 1.1,
            layer_tolerance: 1e-6,
            layer_split_fraction: 0.5,
            support_search_radius: 1,
            min_support_contacts: 3,
            ground_epsilon: 1e-3,
            grounded_weight: 1000.0,
            neighbor_weight: 100.0,
            layer_weight: 1.0,
            contact_weight: 500.0,
            reseed_disconnected: false,
        }
    }
}

impl OrderParams {
    /// Set the proximity factor.
    #[must_use]
    pub const fn with_proximity_factor(mut self, factor: f64) -> Self {
        self.proximity_factor = factor;
        self
    }

    /// Set layer snapping tolerance and split fraction.
    #[must_use]
    pub const fn with_layering(mut self, tolerance: f64, split_fraction: f64) -> Self {
        self.layer_tolerance = tolerance;
        self.layer_split_fraction = split_fraction;
        self
    }

    /// Set the support delta search radius.
    #[must_use]
    pub const fn with_support_search_radius(mut self, radius: u32) -> Self {
        self.support_search_radius = radius;
        self
    }

    /// Set the number of supporting contacts a raised cell needs.
    #[must_use]
    pub const fn with_min_support_contacts(mut self, contacts: usize) -> Self {
        self.min_support_contacts = contacts;
        self
    }

    /// Set the grounded-cell tolerance.
    #[must_use]
    pub const fn with_ground_epsilon(mut self, epsilon: f64) -> Self {
        self.ground_epsilon = epsilon;
        self
    }

    /// Set all four score weights.
    #[must_use]
    pub const fn with_score_weights(mut self, grounded: f64, neighbor: f64, layer: f64, contact: f64) -> Self {
        self.grounded_weight = grounded;
        self.neighbor_weight = neighbor;
        self.layer_weight = layer;
        self.contact_weight = contact;
        self
    }

    /// Enable or disable reseeding after the frontier is exhausted.
    #[must_use]
    pub const fn with_reseed_disconnected(mut self, reseed: bool) -> Self {
        self.reseed_disconnected = reseed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let params: OrderParams = serde_json::from_str(r#"{ "proximity_factor": 1.5 }"#).unwrap();
        assert!((params.proximity_factor - 1.5).abs() < f64::EPSILON);
        assert_eq!(params.min_support_contacts, 3);
        assert!(!params.reseed_disconnected);
    }
}
