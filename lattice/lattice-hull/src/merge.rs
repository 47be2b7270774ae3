//! Coplanar triangle merging.

use crate::face::HullFace;

/// Merge faces whose normals are parallel within `tolerance`.
///
/// Faces `a` and `b` share a group when `|a.normal · b.normal| > 1 - tolerance`.
/// The first unvisited face seeds each group and the remaining faces are
/// scanned once. A merged face sums the member areas, concatenates the member
/// vertices, and takes the normal of the largest member rather than an average,
/// which would drift on nearly parallel triangles.
///
/// # Example
///
/// ```
/// use lattice_hull::{merge_coplanar, HullFace};
/// use nalgebra::Point3;
///
/// let a = HullFace::from_triangle(
///     Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 1.0), Point3::new(1.0, 0.0, 1.0),
/// ).unwrap();
/// let b = HullFace::from_triangle(
///     Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 1.0), Point3::new(1.0, 0.0, 0.0),
/// ).unwrap();
///
/// let merged = merge_coplanar(&[a, b], 1e-6);
/// assert_eq!(merged.len(), 1);
/// assert!((merged[0].area - 1.0).abs() < 1e-12);
/// assert_eq!(merged[0].vertices.len(), 6);
/// ```
#[must_use]
pub fn merge_coplanar(faces: &[HullFace], tolerance: f64) -> Vec<HullFace> {
    let mut visited = vec![false; faces.len()];
    let mut merged = Vec::new();

    for seed in 0..faces.len() {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;

        let seed_normal = faces[seed].normal;
        let mut group = vec![seed];
        for (other, face) in faces.iter().enumerate().skip(seed + 1) {
            if !visited[other] && seed_normal.dot(&face.normal).abs() > 1.0 - tolerance {
                visited[other] = true;
                group.push(other);
            }
        }

        let mut largest = seed;
        let mut area = 0.0;
        let mut vertices = Vec::new();
        for &member in &group {
            let face = &faces[member];
            if face.area > faces[largest].area {
                largest = member;
            }
            area += face.area;
            vertices.extend_from_slice(&face.vertices);
        }

        merged.push(HullFace {
            area,
            normal: faces[largest].normal,
            vertices,
        });
    }

    merged
}
