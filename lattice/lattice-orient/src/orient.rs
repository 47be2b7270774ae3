//! Base-face selection and pivot computation.

use lattice_hull::{Hull, HullFace};
use lattice_types::Bounds;
use nalgebra::{Matrix3, Point3, Vector3};
use tracing::debug;

use crate::rotation::rotation_between;

/// How a shape should be turned to rest on its largest face.
#[derive(Debug, Clone, PartialEq)]
pub struct Orientation {
    /// Rotation taking the selected face's outward normal to -Y.
    pub rotation: Matrix3<f64>,
    /// Center of the rotated points' bounds, padded by the sphere radius.
    pub pivot: Point3<f64>,
    /// Rotated point bounds, padded by the sphere radius.
    pub oriented_bounds: Bounds,
    /// The face the shape rests on, if the hull had any faces.
    pub selected_face: Option<HullFace>,
}

/// Choose the largest hull face and the rotation that puts it on the floor.
///
/// `points` are the world-space sphere centers the hull was built from and
/// `sphere_radius` pads their bounds. An empty hull yields the identity
/// rotation; ties on area go to the earlier face.
///
/// # Example
///
/// ```
/// use lattice_hull::{build_hull, HullParams};
/// use lattice_orient::orient;
/// use nalgebra::{Point3, Vector3};
///
/// // Flat square in y = 0: already resting on its face
/// let pts = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 1.0),
///     Point3::new(0.0, 0.0, 1.0),
/// ];
/// let hull = build_hull(&pts, &HullParams::default());
/// let o = orient(&hull, &pts, 0.5);
/// assert!((o.rotation * Vector3::y() - Vector3::y()).norm() < 1e-9);
/// assert!((o.pivot - Point3::new(0.5, 0.0, 0.5)).norm() < 1e-9);
/// ```
#[must_use]
pub fn orient(hull: &Hull, points: &[Point3<f64>], sphere_radius: f64) -> Orientation {
    let selected = hull.largest_face();

    let rotation = match selected {
        Some((index, face)) => {
            debug!(
                face = index,
                area = face.area,
                normal = ?face.normal,
                "selected base face"
            );
            rotation_between(&-face.normal, &Vector3::y())
        }
        None => Matrix3::identity(),
    };

    let rotated: Vec<Point3<f64>> = points.iter().map(|p| Point3::from(rotation * p.coords)).collect();
    let oriented_bounds = Bounds::from_points(rotated.iter()).expanded(sphere_radius);

    Orientation {
        rotation,
        pivot: oriented_bounds.center(),
        oriented_bounds,
        selected_face: selected.map(|(_, face)| face.clone()),
    }
}
