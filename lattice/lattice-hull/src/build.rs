//! Hull construction pipeline and degenerate-input fallbacks.

use hashbrown::HashSet;
use lattice_types::{Bounds, LatticeCoord, LatticeTransform};
use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::face::{Hull, HullFace, HullKind};
use crate::merge::merge_coplanar;
use crate::params::HullParams;
use crate::planar::planar_triangles;
use crate::quickhull::{Simplex, convex_hull, find_simplex};

/// Round each component of `point` to `decimals` decimal places.
///
/// # Example
///
/// ```
/// use lattice_hull::round_point;
/// use nalgebra::Point3;
///
/// let p = round_point(&Point3::new(0.70710678, -0.0004, 1.9996), 3);
/// assert_eq!(p, Point3::new(0.707, 0.0, 2.0));
/// ```
#[must_use]
pub fn round_point(point: &Point3<f64>, decimals: u32) -> Point3<f64> {
    let scale = 10_f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    point.map(|v| {
        let r = (v * scale).round() / scale;
        // Normalize -0.0 so equal points compare and print identically
        if r == 0.0 { 0.0 } else { r }
    })
}

/// Round, de-duplicate and lexicographically sort the input.
fn prepare_points(points: &[Point3<f64>], params: &HullParams) -> Vec<Point3<f64>> {
    let scale = params.rounding_scale();
    #[allow(clippy::cast_possible_truncation)]
    let key = |p: &Point3<f64>| {
        (
            (p.x * scale).round() as i64,
            (p.y * scale).round() as i64,
            (p.z * scale).round() as i64,
        )
    };

    let mut seen = HashSet::with_capacity(points.len());
    let mut keyed: Vec<_> = points
        .iter()
        .filter(|p| p.iter().all(|v| v.is_finite()))
        .map(|p| (key(p), round_point(p, params.precision_decimals)))
        .filter(|(k, _)| seen.insert(*k))
        .collect();
    keyed.sort_by_key(|(k, _)| *k);
    keyed.into_iter().map(|(_, p)| p).collect()
}

/// Compute the merged convex hull of a point set.
///
/// Never fails: see the crate documentation for how degenerate inputs are
/// handled. The result depends only on the set of rounded points, not on
/// their order.
#[must_use]
pub fn build_hull(points: &[Point3<f64>], params: &HullParams) -> Hull {
    let points = prepare_points(points, params);

    match points.len() {
        0 => return Hull::empty(),
        1..=3 => return sparse_hull(&points),
        _ => {}
    }

    match find_simplex(&points, params.distance_epsilon) {
        Simplex::Degenerate => {
            debug!(points = points.len(), "collinear or coincident points, using bounding box hull");
            bounding_box_hull(&points)
        }
        Simplex::Planar {
            origin,
            normal,
            axis,
        } => {
            let triangles = planar_triangles(&points, origin, normal, axis);
            if triangles.is_empty() {
                debug!("planar polygon collapsed, using bounding box hull");
                return bounding_box_hull(&points);
            }
            Hull {
                faces: merge_coplanar(&triangles, params.coplanar_tolerance),
                kind: HullKind::Planar,
            }
        }
        Simplex::Solid(simplex) => {
            let Some(indices) = convex_hull(&points, simplex, params.distance_epsilon) else {
                debug!(points = points.len(), "hull failed validation, using bounding box hull");
                return bounding_box_hull(&points);
            };

            let triangles: Vec<HullFace> = indices
                .iter()
                .filter_map(|&[a, b, c]| HullFace::from_triangle(points[a], points[b], points[c]))
                .collect();

            let faces = merge_coplanar(&triangles, params.coplanar_tolerance);
            debug!(
                points = points.len(),
                triangles = triangles.len(),
                faces = faces.len(),
                "built convex hull"
            );
            Hull {
                faces,
                kind: HullKind::Solid,
            }
        }
    }
}

/// Place lattice sites with `transform` and build their hull.
///
/// # Example
///
/// ```
/// use lattice_hull::{build_hull_from_coords, HullKind, HullParams};
/// use lattice_types::{LatticeCoord, LatticeTransform};
///
/// let cells = [
///     LatticeCoord::new(0, 0, 0),
///     LatticeCoord::new(1, 0, 0),
///     LatticeCoord::new(0, 1, 0),
///     LatticeCoord::new(0, 0, 1),
/// ];
/// let hull = build_hull_from_coords(&cells, &LatticeTransform::fcc(), &HullParams::default());
/// assert_eq!(hull.kind, HullKind::Solid);
/// ```
#[must_use]
pub fn build_hull_from_coords(
    coords: &[LatticeCoord],
    transform: &LatticeTransform,
    params: &HullParams,
) -> Hull {
    let points: Vec<Point3<f64>> = coords.iter().map(|&c| transform.to_world(c)).collect();
    build_hull(&points, params)
}

/// One face with normal +Y covering all points.
fn sparse_hull(points: &[Point3<f64>]) -> Hull {
    let area = match points {
        [a, b, c] => (b - a).cross(&(c - a)).norm() * 0.5,
        _ => 0.0,
    };
    Hull {
        faces: vec![HullFace {
            area,
            normal: Vector3::y(),
            vertices: points.to_vec(),
        }],
        kind: HullKind::Sparse,
    }
}

/// Six axis-aligned faces sized from the bounding box.
///
/// Faces are listed -Y first so that when every area ties (a single point or
/// a line) the chosen base is the floor and no rotation is applied.
fn bounding_box_hull(points: &[Point3<f64>]) -> Hull {
    let size = Bounds::from_points(points.iter()).size();
    let (x_area, y_area, z_area) = (size.y * size.z, size.x * size.z, size.x * size.y);
    let faces = vec![
        HullFace::synthetic(-Vector3::y(), y_area),
        HullFace::synthetic(Vector3::y(), y_area),
        HullFace::synthetic(-Vector3::x(), x_area),
        HullFace::synthetic(Vector3::x(), x_area),
        HullFace::synthetic(-Vector3::z(), z_area),
        HullFace::synthetic(Vector3::z(), z_area),
    ];
    Hull {
        faces,
        kind: HullKind::BoundingBox,
    }
}
