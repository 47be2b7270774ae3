//! Incremental (beneath-beyond) 3D convex hull.
//!
//! Faces are stored as outward-wound index triangles. Each new point removes
//! every face it sees and stitches a fan of new faces onto the horizon.
//!
//! A face counts as visible when the point lies in front of its plane *or on
//! it* (`distance > -epsilon`). Lattice inputs are full of collinear and
//! coplanar points, and with a strict test a point on the extension of a hull
//! edge would create a zero-area triangle. With the inclusive test, any face
//! whose plane contains the point is replaced, so no horizon edge can be
//! collinear with the new point.

use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};

/// Result of searching for an initial tetrahedron.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Simplex {
    /// All points lie on a line or coincide.
    Degenerate,
    /// All points lie on one plane.
    Planar {
        /// A point on the plane.
        origin: Point3<f64>,
        /// Unit plane normal (unoriented).
        normal: Vector3<f64>,
        /// Direction from `origin` to the farthest point, used as the in-plane axis.
        axis: Vector3<f64>,
    },
    /// Four affinely independent points.
    Solid([usize; 4]),
}

/// Find four affinely independent points, or classify the degeneracy.
pub(crate) fn find_simplex(points: &[Point3<f64>], epsilon: f64) -> Simplex {
    let Some(&p0) = points.first() else {
        return Simplex::Degenerate;
    };

    let Some((i1, d1)) = argmax(points, |p| (p - p0).norm()) else {
        return Simplex::Degenerate;
    };
    if d1 <= epsilon {
        return Simplex::Degenerate;
    }
    let axis = (points[i1] - p0) / d1;

    let Some((i2, d2)) = argmax(points, |p| (p - p0).cross(&axis).norm()) else {
        return Simplex::Degenerate;
    };
    if d2 <= epsilon {
        return Simplex::Degenerate;
    }

    let normal = (points[i1] - p0).cross(&(points[i2] - p0)).normalize();
    let Some((i3, d3)) = argmax(points, |p| normal.dot(&(p - p0)).abs()) else {
        return Simplex::Degenerate;
    };
    if d3 <= epsilon {
        return Simplex::Planar {
            origin: p0,
            normal,
            axis,
        };
    }

    Simplex::Solid([0, i1, i2, i3])
}

/// First index maximizing `score`, with its score.
fn argmax(points: &[Point3<f64>], score: impl Fn(&Point3<f64>) -> f64) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, p) in points.iter().enumerate() {
        let s = score(p);
        match best {
            Some((_, b)) if s <= b => {}
            _ => best = Some((index, s)),
        }
    }
    best
}

#[derive(Debug, Clone)]
struct Face {
    vertices: [usize; 3],
    normal: Vector3<f64>,
    alive: bool,
}

/// Incremental hull state over a fixed point slice.
struct HullBuilder<'a> {
    points: &'a [Point3<f64>],
    faces: Vec<Face>,
    interior: Point3<f64>,
    epsilon: f64,
}

impl<'a> HullBuilder<'a> {
    fn new(points: &'a [Point3<f64>], simplex: [usize; 4], epsilon: f64) -> Self {
        let interior = Point3::from(
            simplex
                .iter()
                .map(|&i| points[i].coords)
                .sum::<Vector3<f64>>()
                / 4.0,
        );
        let mut builder = Self {
            points,
            faces: Vec::new(),
            interior,
            epsilon,
        };
        let [a, b, c, d] = simplex;
        for tri in [[a, b, c], [a, b, d], [a, c, d], [b, c, d]] {
            builder.push_face(tri);
        }
        builder
    }

    /// Add a face wound so that its normal points away from the interior.
    fn push_face(&mut self, [a, b, c]: [usize; 3]) {
        let pa = self.points[a];
        let mut normal = (self.points[b] - pa)
            .cross(&(self.points[c] - pa))
            .normalize();
        let mut vertices = [a, b, c];
        if normal.dot(&(self.interior - pa)) > 0.0 {
            vertices.swap(1, 2);
            normal = -normal;
        }
        self.faces.push(Face {
            vertices,
            normal,
            alive: true,
        });
    }

    fn signed_distance(&self, face: &Face, point: &Point3<f64>) -> f64 {
        face.normal.dot(&(point - self.points[face.vertices[0]]))
    }

    fn insert(&mut self, index: usize) {
        let point = self.points[index];

        let visible: Vec<usize> = self
            .faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.alive && self.signed_distance(f, &point) > -self.epsilon)
            .map(|(i, _)| i)
            .collect();
        if visible.is_empty() {
            return;
        }

        let mut edges = HashSet::with_capacity(visible.len() * 3);
        for &f in &visible {
            let [a, b, c] = self.faces[f].vertices;
            edges.insert((a, b));
            edges.insert((b, c));
            edges.insert((c, a));
        }

        // Horizon edges keep the winding of the visible face they came from,
        // so (u, v, point) is already outward. Vec order keeps output deterministic.
        let mut horizon = Vec::new();
        for &f in &visible {
            let [a, b, c] = self.faces[f].vertices;
            for (u, v) in [(a, b), (b, c), (c, a)] {
                if !edges.contains(&(v, u)) {
                    horizon.push((u, v));
                }
            }
            self.faces[f].alive = false;
        }

        for (u, v) in horizon {
            self.push_face([u, v, index]);
        }
    }

    /// Every point lies behind or on every face, and every normal is finite.
    fn is_valid(&self) -> bool {
        let tolerance = self.epsilon * 10.0;
        self.faces.iter().filter(|f| f.alive).all(|f| {
            f.normal.iter().all(|v| v.is_finite())
                && self
                    .points
                    .iter()
                    .all(|p| self.signed_distance(f, p) <= tolerance)
        })
    }

    fn into_triangles(self) -> Vec<[usize; 3]> {
        self.faces
            .into_iter()
            .filter(|f| f.alive)
            .map(|f| f.vertices)
            .collect()
    }
}

/// Compute outward-wound hull triangles of `points`, starting from `simplex`.
///
/// Returns `None` if the finished hull fails the containment check.
pub(crate) fn convex_hull(
    points: &[Point3<f64>],
    simplex: [usize; 4],
    epsilon: f64,
) -> Option<Vec<[usize; 3]>> {
    let mut builder = HullBuilder::new(points, simplex, epsilon);
    for index in 0..points.len() {
        if !simplex.contains(&index) {
            builder.insert(index);
        }
    }
    builder.is_valid().then(|| builder.into_triangles())
}
