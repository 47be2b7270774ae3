//! Hull construction parameters.

/// Configuration for [`build_hull`](crate::build_hull).
///
/// # Example
///
/// ```
/// use lattice_hull::HullParams;
///
/// let params = HullParams::default()
///     .with_precision_decimals(4)
///     .with_coplanar_tolerance(1e-5);
/// assert_eq!(params.precision_decimals, 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HullParams {
    /// Decimal places input points are rounded to before construction.
    ///
    /// Rounding snaps floating noise from the lattice basis so that coplanar
    /// lattice points are detected as coplanar.
    pub precision_decimals: u32,

    /// Angular tolerance `ε` for merging: two triangles share a face group when
    /// `|n1 · n2| > 1 - ε`.
    pub coplanar_tolerance: f64,

    /// Distance below which a point is considered to lie on a plane or line.
    pub distance_epsilon: f64,
}

impl Default for HullParams {
    fn default() -> Self {
        Self {
            precision_decimals: 3,
            coplanar_tolerance: 1e-6,
            distance_epsilon: 1e-7,
        }
    }
}

impl HullParams {
    /// Set the rounding precision.
    #[must_use]
    pub const fn with_precision_decimals(mut self, decimals: u32) -> Self {
        self.precision_decimals = decimals;
        self
    }

    /// Set the merge tolerance.
    #[must_use]
    pub const fn with_coplanar_tolerance(mut self, tolerance: f64) -> Self {
        self.coplanar_tolerance = tolerance;
        self
    }

    /// Set the plane/line distance tolerance.
    #[must_use]
    pub const fn with_distance_epsilon(mut self, epsilon: f64) -> Self {
        self.distance_epsilon = epsilon;
        self
    }

    /// Scale factor `10^precision_decimals` used for rounding.
    #[must_use]
    pub fn rounding_scale(&self) -> f64 {
        10_f64.powi(i32::try_from(self.precision_decimals).unwrap_or(i32::MAX))
    }
}
