//! Minimal rotation between two directions.

use nalgebra::{Matrix3, Vector3};

/// Cosine below `-1 + ANTIPARALLEL_TOLERANCE` is treated as exactly opposite.
pub const ANTIPARALLEL_TOLERANCE: f64 = 1e-9;

/// Rotation matrix taking the direction of `from` onto the direction of `to`.
///
/// Uses Rodrigues' formula about `from × to`. Zero-length inputs and
/// parallel directions give the identity.
///
/// When the directions are opposite the rotation is a half turn about
/// `normalize(from × e)`, where `e` is the coordinate axis along which `from`
/// has its smallest magnitude component (first of x, y, z on ties). This makes
/// the choice of axis deterministic.
///
/// # Example
///
/// ```
/// use lattice_orient::rotation_between;
/// use nalgebra::Vector3;
///
/// let r = rotation_between(&Vector3::x(), &Vector3::y());
/// let v = r * Vector3::x();
/// assert!((v - Vector3::y()).norm() < 1e-12);
/// ```
#[must_use]
pub fn rotation_between(from: &Vector3<f64>, to: &Vector3<f64>) -> Matrix3<f64> {
    let from_norm = from.norm();
    let to_norm = to.norm();

    if from_norm < f64::EPSILON || to_norm < f64::EPSILON {
        return Matrix3::identity();
    }

    let a = from / from_norm;
    let b = to / to_norm;
    let cos = a.dot(&b);

    if cos < -1.0 + ANTIPARALLEL_TOLERANCE {
        return half_turn(&a);
    }

    let v = a.cross(&b);
    let sin_sq = v.norm_squared();
    if sin_sq < f64::EPSILON * f64::EPSILON {
        return Matrix3::identity();
    }

    // R = I + [v]x + [v]x^2 * (1 - cos) / sin^2
    let k = v.cross_matrix();
    Matrix3::identity() + k + k * k * ((1.0 - cos) / sin_sq)
}

/// Rotation by pi about an axis perpendicular to the unit vector `a`.
fn half_turn(a: &Vector3<f64>) -> Matrix3<f64> {
    let least = a.iamin();
    let mut basis = Vector3::zeros();
    basis[least] = 1.0;

    let axis = a.cross(&basis).normalize();
    // Half turn about unit k: 2kk^T - I
    axis * axis.transpose() * 2.0 - Matrix3::identity()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_orthonormal(r: &Matrix3<f64>) {
        assert_relative_eq!(r * r.transpose(), Matrix3::identity(), epsilon = 1e-12);
        assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_is_identity() {
        let r = rotation_between(&Vector3::new(1.0, 0.0, 0.0), &Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(r, Matrix3::identity());
    }

    #[test]
    fn zero_input_is_identity() {
        assert_eq!(rotation_between(&Vector3::zeros(), &Vector3::y()), Matrix3::identity());
    }

    #[test]
    fn perpendicular() {
        let r = rotation_between(&Vector3::x(), &Vector3::y());
        assert_orthonormal(&r);
        assert_relative_eq!(r * Vector3::x(), Vector3::y(), epsilon = 1e-12);
        // z is the rotation axis and stays put
        assert_relative_eq!(r * Vector3::z(), Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn oblique() {
        let from = Vector3::new(0.3, -0.5, 0.8);
        let to = Vector3::new(-0.2, 0.9, 0.1);
        let r = rotation_between(&from, &to);
        assert_orthonormal(&r);
        assert_relative_eq!(r * from.normalize(), to.normalize(), epsilon = 1e-12);
    }

    #[test]
    fn antiparallel_uses_least_component_axis() {
        // -Y onto +Y: least-magnitude component is x, axis = (-y) × x = +z
        let r = rotation_between(&-Vector3::y(), &Vector3::y());
        assert_orthonormal(&r);
        assert_relative_eq!(r * -Vector3::y(), Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(r * Vector3::z(), Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(r * Vector3::x(), -Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn antiparallel_oblique() {
        let from = Vector3::new(0.1, 0.7, -0.7).normalize();
        let r = rotation_between(&from, &-from);
        assert_orthonormal(&r);
        assert_relative_eq!(r * from, -from, epsilon = 1e-12);
    }
}
