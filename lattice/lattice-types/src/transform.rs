//! Affine maps between lattice coordinates and world space.

use nalgebra::{Matrix3, Matrix4, Point3, Vector3, Vector4};
use tracing::warn;

use crate::coord::LatticeCoord;
use crate::error::{LatticeError, LatticeResult};

/// Determinant magnitude below which a linear block is treated as singular.
pub const SINGULAR_DETERMINANT: f64 = 1e-12;

/// An affine transform from lattice coordinates to world space.
///
/// The wrapped 4x4 matrix always has `(0, 0, 0, 1)` as its bottom row. The
/// upper-left 3x3 block is the lattice basis; the last column is the
/// translation.
///
/// # Example
///
/// ```
/// use lattice_types::{LatticeCoord, LatticeTransform};
///
/// let fcc = LatticeTransform::fcc();
/// let inverse = fcc.try_inverse().unwrap();
///
/// let c = LatticeCoord::new(2, -1, 3);
/// let back = inverse.transform_point(&fcc.to_world(c));
/// assert!((back.x - 2.0).abs() < 1e-9);
/// assert_eq!(inverse.nearest_coord(&fcc.to_world(c)), Some(c));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeTransform {
    matrix: Matrix4<f64>,
}

impl Default for LatticeTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl LatticeTransform {
    /// The identity map (simple cubic grid with unit spacing).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// The face-centered-cubic basis used for the sphere packing.
    ///
    /// Rows are `[.5, .5, 0]`, `[.5, 0, .5]`, `[0, .5, .5]` with zero
    /// translation, so every axis step moves to a touching sphere.
    #[must_use]
    pub fn fcc() -> Self {
        #[rustfmt::skip]
        let basis = Matrix3::new(
            0.5, 0.5, 0.0,
            0.5, 0.0, 0.5,
            0.0, 0.5, 0.5,
        );
        Self::from_basis(basis)
    }

    /// A purely linear transform with the given basis.
    #[must_use]
    pub fn from_basis(basis: Matrix3<f64>) -> Self {
        Self::from_basis_and_translation(basis, Vector3::zeros())
    }

    /// A linear basis followed by a translation.
    #[must_use]
    pub fn from_basis_and_translation(basis: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        let mut matrix = basis.to_homogeneous();
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);
        Self { matrix }
    }

    /// Wrap an existing 4x4 matrix.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::NonAffine`] if the bottom row is not `(0, 0, 0, 1)`.
    pub fn from_matrix(matrix: Matrix4<f64>) -> LatticeResult<Self> {
        let bottom = matrix.row(3);
        if bottom[0] != 0.0 || bottom[1] != 0.0 || bottom[2] != 0.0 || bottom[3] != 1.0 {
            return Err(LatticeError::NonAffine);
        }
        Ok(Self { matrix })
    }

    /// The underlying 4x4 matrix.
    #[must_use]
    pub const fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// The 3x3 linear block.
    #[must_use]
    pub fn linear(&self) -> Matrix3<f64> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// The translation column.
    #[must_use]
    pub fn translation(&self) -> Vector3<f64> {
        self.matrix.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// Determinant of the linear block.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.linear().determinant()
    }

    /// Returns `true` if every matrix entry is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        is_finite_matrix(&self.matrix)
    }

    /// Compose: the result applies `self` first, then `other`.
    #[must_use]
    pub fn then(&self, other: &Self) -> Self {
        Self {
            matrix: other.matrix * self.matrix,
        }
    }

    /// Place a lattice site in world space.
    #[must_use]
    pub fn to_world(&self, coord: LatticeCoord) -> Point3<f64> {
        self.transform_point(&Point3::from(coord.to_vector()))
    }

    /// Continuous lattice position of a world point (no rounding).
    ///
    /// Non-finite for a singular basis.
    #[must_use]
    pub fn to_lattice(&self, point: &Point3<f64>) -> Point3<f64> {
        self.inverse().transform_point(point)
    }

    /// Apply the full affine map to a point.
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        let p = self.matrix * Vector4::new(point.x, point.y, point.z, 1.0);
        Point3::new(p.x, p.y, p.z)
    }

    /// Apply the linear block only.
    #[must_use]
    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.linear() * vector
    }

    /// Best-effort inverse.
    ///
    /// For a singular basis the result contains non-finite entries; check
    /// [`is_finite`](Self::is_finite) before trusting it, or use
    /// [`try_inverse`](Self::try_inverse).
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            matrix: invert_affine(&self.matrix),
        }
    }

    /// Inverse that refuses singular bases.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::SingularTransform`] if the determinant of the
    /// linear block is below [`SINGULAR_DETERMINANT`] or the inverse is not finite.
    pub fn try_inverse(&self) -> LatticeResult<Self> {
        let determinant = self.determinant();
        if determinant.abs() < SINGULAR_DETERMINANT {
            return Err(LatticeError::SingularTransform { determinant });
        }
        let inverse = self.inverse();
        if inverse.is_finite() {
            Ok(inverse)
        } else {
            Err(LatticeError::SingularTransform { determinant })
        }
    }

    /// Round a world-space point to the closest lattice site under this
    /// (inverse) transform. `None` if the result is not finite or out of range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn nearest_coord(&self, point: &Point3<f64>) -> Option<LatticeCoord> {
        let p = self.transform_point(point);
        let round = |v: f64| {
            let r = v.round();
            (r.is_finite() && r >= f64::from(i32::MIN) && r <= f64::from(i32::MAX))
                .then_some(r as i32)
        };
        Some(LatticeCoord::new(round(p.x)?, round(p.y)?, round(p.z)?))
    }

    /// World distance between the images of `(0, 0, 0)` and `(1, 0, 0)`.
    #[must_use]
    pub fn neighbor_spacing(&self) -> f64 {
        (self.to_world(LatticeCoord::new(1, 0, 0)) - self.to_world(LatticeCoord::origin())).norm()
    }

    /// Radius of the spheres sitting on lattice sites (adjacent spheres touch).
    #[must_use]
    pub fn sphere_radius(&self) -> f64 {
        self.neighbor_spacing() * 0.5
    }
}

/// Returns `true` if every entry of `matrix` is finite.
#[must_use]
pub fn is_finite_matrix(matrix: &Matrix4<f64>) -> bool {
    matrix.iter().all(|v| v.is_finite())
}

/// Invert an affine 4x4 matrix whose bottom row is `(0, 0, 0, 1)`.
///
/// The 3x3 block is inverted by cofactors and the translation becomes
/// `-A⁻¹·t`. A near-zero determinant is reported through `tracing` and the
/// division still happens, so an exactly singular block yields non-finite
/// entries instead of a panic.
#[must_use]
#[allow(clippy::many_single_char_names)]
pub fn invert_affine(matrix: &Matrix4<f64>) -> Matrix4<f64> {
    let m = |r: usize, c: usize| matrix[(r, c)];

    let c00 = m(1, 1) * m(2, 2) - m(1, 2) * m(2, 1);
    let c01 = m(1, 2) * m(2, 0) - m(1, 0) * m(2, 2);
    let c02 = m(1, 0) * m(2, 1) - m(1, 1) * m(2, 0);
    let det = m(0, 0) * c00 + m(0, 1) * c01 + m(0, 2) * c02;

    if det.abs() < SINGULAR_DETERMINANT {
        warn!(determinant = det, "inverting a singular lattice transform");
    }

    let inv_det = 1.0 / det;

    #[rustfmt::skip]
    let a = Matrix3::new(
        c00 * inv_det,
        (m(0, 2) * m(2, 1) - m(0, 1) * m(2, 2)) * inv_det,
        (m(0, 1) * m(1, 2) - m(0, 2) * m(1, 1)) * inv_det,
        c01 * inv_det,
        (m(0, 0) * m(2, 2) - m(0, 2) * m(2, 0)) * inv_det,
        (m(0, 2) * m(1, 0) - m(0, 0) * m(1, 2)) * inv_det,
        c02 * inv_det,
        (m(0, 1) * m(2, 0) - m(0, 0) * m(2, 1)) * inv_det,
        (m(0, 0) * m(1, 1) - m(0, 1) * m(1, 0)) * inv_det,
    );

    let t = Vector3::new(m(0, 3), m(1, 3), m(2, 3));
    let t_inv = -(a * t);

    let mut result = a.to_homogeneous();
    result.fixed_view_mut::<3, 1>(0, 3).copy_from(&t_inv);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_maps_coords_directly() {
        let t = LatticeTransform::identity();
        let p = t.to_world(LatticeCoord::new(1, 2, 3));
        assert_eq!(p, Point3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(t.sphere_radius(), 0.5);
    }

    #[test]
    fn fcc_neighbors_touch() {
        let fcc = LatticeTransform::fcc();
        let spacing = 0.5_f64.sqrt();
        assert_relative_eq!(fcc.neighbor_spacing(), spacing, epsilon = 1e-12);

        // All 12 FCC neighbors are at the same distance
        let origin = fcc.to_world(LatticeCoord::origin());
        let offsets = [
            [1, 0, 0],
            [0, 1, 0],
            [0, 0, 1],
            [1, -1, 0],
            [1, 0, -1],
            [0, 1, -1],
        ];
        for o in offsets {
            let c = LatticeCoord::from(o);
            for n in [c, -c] {
                let d = (fcc.to_world(n) - origin).norm();
                assert_relative_eq!(d, spacing, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn fcc_determinant() {
        assert_relative_eq!(LatticeTransform::fcc().determinant(), -0.25, epsilon = 1e-12);
    }

    #[test]
    fn inverse_round_trip_with_translation() {
        #[rustfmt::skip]
        let basis = Matrix3::new(
            2.0, 0.5, 0.0,
            0.0, 1.0, 0.3,
            0.1, 0.0, 3.0,
        );
        let t = LatticeTransform::from_basis_and_translation(basis, Vector3::new(1.0, -2.0, 0.5));
        let inv = t.try_inverse().unwrap();

        let product = inv.matrix() * t.matrix();
        assert_relative_eq!(product, Matrix4::identity(), epsilon = 1e-12);

        let c = LatticeCoord::new(-3, 7, 2);
        assert_eq!(inv.nearest_coord(&t.to_world(c)), Some(c));
        assert_relative_eq!(t.to_lattice(&t.to_world(c)), Point3::new(-3.0, 7.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn invert_affine_matches_nalgebra() {
        let t = LatticeTransform::fcc();
        let ours = invert_affine(t.matrix());
        let theirs = t.matrix().try_inverse().unwrap();
        assert_relative_eq!(ours, theirs, epsilon = 1e-12);
        assert_relative_eq!(ours.row(3).into_owned(), Matrix4::identity().row(3).into_owned());
    }

    #[test]
    fn singular_inverse_is_non_finite_not_panic() {
        #[rustfmt::skip]
        let basis = Matrix3::new(
            1.0, 2.0, 3.0,
            2.0, 4.0, 6.0,
            0.0, 0.0, 1.0,
        );
        let t = LatticeTransform::from_basis(basis);
        assert!(!t.inverse().is_finite());
        assert!(matches!(
            t.try_inverse(),
            Err(LatticeError::SingularTransform { .. })
        ));
        assert_eq!(t.inverse().nearest_coord(&Point3::origin()), None);
    }

    #[test]
    fn from_matrix_rejects_projective() {
        let mut m = Matrix4::identity();
        m[(3, 0)] = 0.5;
        assert!(matches!(
            LatticeTransform::from_matrix(m),
            Err(LatticeError::NonAffine)
        ));
        assert!(LatticeTransform::from_matrix(Matrix4::identity()).is_ok());
    }

    #[test]
    fn then_applies_in_order() {
        let scale = LatticeTransform::from_basis(Matrix3::identity() * 2.0);
        let shift =
            LatticeTransform::from_basis_and_translation(Matrix3::identity(), Vector3::x());
        let p = scale.then(&shift).to_world(LatticeCoord::new(1, 0, 0));
        assert_relative_eq!(p.x, 3.0);
        let q = shift.then(&scale).to_world(LatticeCoord::new(1, 0, 0));
        assert_relative_eq!(q.x, 4.0);
    }
}
