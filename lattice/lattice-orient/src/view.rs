//! Full view transform set for a puzzle.

use lattice_hull::{HullFace, HullKind, HullParams, build_hull};
use lattice_types::{Bounds, LatticeCoord, LatticeTransform};
use nalgebra::{Point3, Rotation3};
use tracing::{debug, warn};

use crate::orient::orient;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for computing [`ViewTransforms`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewParams {
    /// Hull construction parameters.
    pub hull: HullParams,
    /// Multiplier on the lattice sphere radius used to pad the oriented bounds.
    pub sphere_padding: f64,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            hull: HullParams::default(),
            sphere_padding: 1.0,
        }
    }
}

impl ViewParams {
    /// Set hull parameters.
    #[must_use]
    pub fn with_hull(mut self, hull: HullParams) -> Self {
        self.hull = hull;
        self
    }

    /// Set the bounds padding as a multiple of the sphere radius.
    #[must_use]
    pub const fn with_sphere_padding(mut self, padding: f64) -> Self {
        self.sphere_padding = padding;
        self
    }
}

/// Every matrix the renderer needs for one puzzle.
///
/// Computed in one step and never patched afterwards. World placement of a
/// cell is `world * cell`, i.e. the lattice transform first and the view
/// rotation second.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewTransforms {
    /// Lattice indices to world position.
    pub lattice_to_world: LatticeTransform,
    /// Inverse of `lattice_to_world`.
    pub world_to_lattice: LatticeTransform,
    /// Rotation putting the base face on the floor.
    pub view_rotation: Rotation3<f64>,
    /// Transpose of `view_rotation`.
    pub view_rotation_inverse: Rotation3<f64>,
    /// `view_rotation * lattice_to_world`.
    pub world: LatticeTransform,
    /// `world_to_lattice * view_rotation_inverse`.
    pub world_inverse: LatticeTransform,
    /// Center of the padded oriented bounds.
    pub pivot: Point3<f64>,
    /// Bounds of the oriented sphere centers, padded by the sphere radius.
    pub oriented_bounds: Bounds,
    /// Hull face chosen as the base, if any.
    pub selected_face: Option<HullFace>,
    /// How the hull was built.
    pub hull_kind: HullKind,
    /// `false` when the lattice transform is singular and the inverses
    /// contain non-finite values.
    pub inverse_is_valid: bool,
}

impl ViewTransforms {
    /// Compute transforms for the given cells under `lattice`.
    ///
    /// A singular lattice transform does not fail: the inverse matrices are
    /// left non-finite, a warning is logged and `inverse_is_valid` is false.
    #[must_use]
    pub fn compute(cells: &[LatticeCoord], lattice: &LatticeTransform, params: &ViewParams) -> Self {
        let points: Vec<Point3<f64>> = cells.iter().map(|&c| lattice.to_world(c)).collect();
        let hull = build_hull(&points, &params.hull);
        let orientation = orient(&hull, &points, lattice.sphere_radius() * params.sphere_padding);

        let view_rotation = Rotation3::from_matrix_unchecked(orientation.rotation);
        let view_rotation_inverse = view_rotation.inverse();
        let rotation = LatticeTransform::from_basis(*view_rotation.matrix());
        let rotation_inverse = LatticeTransform::from_basis(*view_rotation_inverse.matrix());

        let world_to_lattice = lattice.inverse();
        let world = lattice.then(&rotation);
        let world_inverse = rotation_inverse.then(&world_to_lattice);

        let inverse_is_valid = world_to_lattice.is_finite() && world_inverse.is_finite();
        if !inverse_is_valid {
            warn!(
                determinant = lattice.determinant(),
                "view transforms have no valid inverse"
            );
        }

        debug!(
            cells = cells.len(),
            hull = ?hull.kind,
            faces = hull.faces.len(),
            pivot = ?orientation.pivot,
            "computed view transforms"
        );

        Self {
            lattice_to_world: *lattice,
            world_to_lattice,
            view_rotation,
            view_rotation_inverse,
            world,
            world_inverse,
            pivot: orientation.pivot,
            oriented_bounds: orientation.oriented_bounds,
            selected_face: orientation.selected_face,
            hull_kind: hull.kind,
            inverse_is_valid,
        }
    }

    /// World position of a cell's sphere center in the oriented view.
    #[must_use]
    pub fn place(&self, coord: LatticeCoord) -> Point3<f64> {
        self.world.to_world(coord)
    }

    /// Nearest lattice cell to a point in the oriented view.
    #[must_use]
    pub fn pick(&self, point: &Point3<f64>) -> Option<LatticeCoord> {
        if !self.inverse_is_valid {
            return None;
        }
        self.world_inverse.nearest_coord(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3, Matrix4, Vector3};

    fn tetra() -> Vec<LatticeCoord> {
        vec![
            LatticeCoord::new(0, 0, 0),
            LatticeCoord::new(1, 0, 0),
            LatticeCoord::new(0, 1, 0),
            LatticeCoord::new(0, 0, 1),
        ]
    }

    #[test]
    fn empty_cells_give_identity_rotation() {
        let view = ViewTransforms::compute(&[], &LatticeTransform::fcc(), &ViewParams::default());
        assert_eq!(view.hull_kind, HullKind::Empty);
        assert_eq!(view.view_rotation, Rotation3::identity());
        assert_eq!(view.world, LatticeTransform::fcc());
        assert!(view.selected_face.is_none());
        assert_eq!(view.pivot, Point3::origin());
    }

    #[test]
    fn world_composes_rotation_after_lattice() {
        let fcc = LatticeTransform::fcc();
        let view = ViewTransforms::compute(&tetra(), &fcc, &ViewParams::default());
        let expected = view.view_rotation.to_homogeneous() * fcc.matrix();
        assert_relative_eq!(*view.world.matrix(), expected, epsilon = 1e-12);
    }

    #[test]
    fn world_inverse_round_trips() {
        let view = ViewTransforms::compute(&tetra(), &LatticeTransform::fcc(), &ViewParams::default());
        assert!(view.inverse_is_valid);
        let product = view.world.matrix() * view.world_inverse.matrix();
        assert_relative_eq!(product, Matrix4::identity(), epsilon = 1e-9);

        for cell in tetra() {
            assert_eq!(view.pick(&view.place(cell)), Some(cell));
        }
    }

    #[test]
    fn selected_face_rests_on_floor() {
        let view = ViewTransforms::compute(&tetra(), &LatticeTransform::fcc(), &ViewParams::default());
        let face = view.selected_face.as_ref().unwrap();
        assert_relative_eq!(view.view_rotation * face.normal, -Vector3::y(), epsilon = 1e-9);

        // Every face vertex lands on the bottom of the oriented bounds
        let radius = LatticeTransform::fcc().sphere_radius();
        for v in &face.vertices {
            let y = (view.view_rotation * v.coords).y;
            assert_relative_eq!(y - radius, view.oriented_bounds.min.y, epsilon = 1e-6);
        }
    }

    #[test]
    fn singular_lattice_is_flagged() {
        let flat = LatticeTransform::from_basis(Matrix3::new(
            1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, //
            0.0, 0.0, 1.0,
        ));
        let view = ViewTransforms::compute(&tetra(), &flat, &ViewParams::default());
        assert!(!view.inverse_is_valid);
        assert!(view.world.is_finite());
        assert!(view.pick(&Point3::origin()).is_none());
    }

    #[test]
    fn padding_scales_bounds() {
        let cells = [LatticeCoord::origin()];
        let fcc = LatticeTransform::fcc();
        let tight = ViewTransforms::compute(&cells, &fcc, &ViewParams::default().with_sphere_padding(0.0));
        let loose = ViewTransforms::compute(&cells, &fcc, &ViewParams::default());
        assert_relative_eq!(tight.oriented_bounds.size().norm(), 0.0);
        assert_relative_eq!(loose.oriented_bounds.size().x, 2.0 * fcc.sphere_radius(), epsilon = 1e-12);
    }
}
