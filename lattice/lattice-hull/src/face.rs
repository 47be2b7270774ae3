//! Hull faces and the hull container.

use nalgebra::{Point3, Vector3};

/// A flat boundary region of a hull.
///
/// After merging, `area` is the summed area of the member triangles and
/// `normal` is the unit normal of the largest member.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HullFace {
    /// Face area (never negative).
    pub area: f64,
    /// Unit outward normal.
    pub normal: Vector3<f64>,
    /// Vertices of the member triangles, concatenated. May be empty for
    /// synthetic bounding-box faces.
    pub vertices: Vec<Point3<f64>>,
}

impl HullFace {
    /// Build a face from a triangle, taking the normal and area from the
    /// cross product of its two edges.
    ///
    /// Returns `None` for a zero-area triangle.
    #[must_use]
    pub fn from_triangle(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Option<Self> {
        let cross = (b - a).cross(&(c - a));
        let doubled = cross.norm();
        if doubled <= f64::EPSILON {
            return None;
        }
        Some(Self {
            area: doubled * 0.5,
            normal: cross / doubled,
            vertices: vec![a, b, c],
        })
    }

    /// A face with an explicit normal and area and no vertices.
    #[must_use]
    pub fn synthetic(normal: Vector3<f64>, area: f64) -> Self {
        Self {
            area: area.max(0.0),
            normal,
            vertices: Vec::new(),
        }
    }
}

/// Which construction path produced a [`Hull`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HullKind {
    /// No input points.
    Empty,
    /// Fewer than 4 distinct points; a single face with normal +Y.
    Sparse,
    /// Collinear, coincident, or numerically failed input; six box faces.
    BoundingBox,
    /// All points on one plane; a single polygon face.
    Planar,
    /// A proper 3D convex hull.
    Solid,
}

/// A convex hull as a list of merged faces.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hull {
    /// Merged faces, in first-encountered order.
    pub faces: Vec<HullFace>,
    /// Construction path.
    pub kind: HullKind,
}

impl Hull {
    /// A hull with no faces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            faces: Vec::new(),
            kind: HullKind::Empty,
        }
    }

    /// Returns `true` if the hull has no faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Sum of face areas.
    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.faces.iter().map(|f| f.area).sum()
    }

    /// The face with maximum area and its index.
    ///
    /// Ties go to the first face encountered, so symmetric shapes resolve
    /// deterministically.
    #[must_use]
    pub fn largest_face(&self) -> Option<(usize, &HullFace)> {
        let mut best: Option<(usize, &HullFace)> = None;
        for (index, face) in self.faces.iter().enumerate() {
            match best {
                Some((_, b)) if face.area <= b.area => {}
                _ => best = Some((index, face)),
            }
        }
        best
    }
}
