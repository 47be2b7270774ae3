//! Convex polygon of coplanar points.

use nalgebra::{Point2, Point3, Vector3};

use crate::face::HullFace;

/// Orient a plane normal so that its largest-magnitude component is negative.
///
/// A flat point set has no inside, so the sign is a convention: a shape lying
/// in `y = 0` gets normal -Y and stays upright after orientation.
pub(crate) fn canonical_plane_normal(normal: Vector3<f64>) -> Vector3<f64> {
    let dominant = normal.iamax();
    if normal[dominant] > 0.0 { -normal } else { normal }
}

/// Fan-triangulate the convex polygon of `points` lying on a plane.
///
/// Every triangle carries the canonical plane normal. Returns an empty list if
/// the polygon has fewer than three corners.
pub(crate) fn planar_triangles(
    points: &[Point3<f64>],
    origin: Point3<f64>,
    normal: Vector3<f64>,
    axis: Vector3<f64>,
) -> Vec<HullFace> {
    let normal = canonical_plane_normal(normal);
    let u = axis;
    let v = normal.cross(&u);

    let projected: Vec<Point2<f64>> = points
        .iter()
        .map(|p| {
            let d = p - origin;
            Point2::new(d.dot(&u), d.dot(&v))
        })
        .collect();

    let polygon = monotone_chain(&projected);
    if polygon.len() < 3 {
        return Vec::new();
    }

    let anchor = points[polygon[0]];
    polygon
        .windows(2)
        .skip(1)
        .filter_map(|pair| {
            let (b, c) = (points[pair[0]], points[pair[1]]);
            let area = (b - anchor).cross(&(c - anchor)).norm() * 0.5;
            (area > 0.0).then(|| HullFace {
                area,
                normal,
                vertices: vec![anchor, b, c],
            })
        })
        .collect()
}

fn cross_2d(o: Point2<f64>, a: Point2<f64>, b: Point2<f64>) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Andrew's monotone chain; returns hull corner indices counter-clockwise,
/// dropping collinear points.
fn monotone_chain(points: &[Point2<f64>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| {
        points[a]
            .x
            .total_cmp(&points[b].x)
            .then(points[a].y.total_cmp(&points[b].y))
    });

    if order.len() < 3 {
        return order;
    }

    let mut hull: Vec<usize> = Vec::with_capacity(order.len() * 2);
    for pass in [order.clone(), order.iter().rev().copied().collect()] {
        let start = hull.len();
        for &i in &pass {
            while hull.len() >= start + 2
                && cross_2d(
                    points[hull[hull.len() - 2]],
                    points[hull[hull.len() - 1]],
                    points[i],
                ) <= 0.0
            {
                hull.pop();
            }
            hull.push(i);
        }
        // The last point of each chain starts the next one.
        hull.pop();
    }
    hull
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn canonical_normal_sign() {
        assert_relative_eq!(canonical_plane_normal(Vector3::y()), -Vector3::y());
        assert_relative_eq!(canonical_plane_normal(-Vector3::y()), -Vector3::y());
        let tilted = Vector3::new(0.6, -0.8, 0.0);
        assert_relative_eq!(canonical_plane_normal(tilted), tilted);
    }

    #[test]
    fn monotone_chain_square_with_interior_and_edge_points() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.5, 0.5),
            Point2::new(0.5, 0.0),
        ];
        let hull = monotone_chain(&pts);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&4));
        assert!(!hull.contains(&5));
    }

    #[test]
    fn unit_square_triangulates_to_area_one() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
        ];
        let normal = Vector3::y();
        let axis = (pts[3] - pts[0]).normalize();
        let tris = planar_triangles(&pts, pts[0], normal, axis);
        assert_eq!(tris.len(), 2);
        let total: f64 = tris.iter().map(|t| t.area).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
        for t in &tris {
            assert_relative_eq!(t.normal, -Vector3::y());
        }
    }
}
