//! API regression tests for the lattice crates.
//!
//! Organized by crate, bottom-up:
//!
//! - Tier 1: Foundation (lattice-types)
//! - Tier 2: Hull construction (lattice-hull)
//! - Tier 3: Orientation (lattice-orient)
//! - Tier 4: Ordering and records (lattice-assembly)
//!
//! A failure here after an API change means the change is breaking.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::float_cmp)]

use lattice::prelude::*;
use lattice::{assembly, hull, orient, types};

// =============================================================================
// TIER 1: Foundation
// =============================================================================

mod tier1_foundation {
    use super::*;

    #[test]
    fn coord_value_semantics() {
        let a = LatticeCoord::new(1, -2, 3);
        let b = LatticeCoord::from([1, -2, 3]);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "(1, -2, 3)");
        assert_eq!(LatticeCoord::unpack(a.pack()), a);
        assert_eq!(a.manhattan_distance(LatticeCoord::origin()), 6);
        assert_eq!(a.axis_neighbors().count(), 6);
    }

    #[test]
    fn transform_constructors() {
        let fcc = LatticeTransform::fcc();
        assert!((fcc.determinant() + 0.25).abs() < 1e-12);
        assert!(fcc.try_inverse().is_ok());

        let singular = LatticeTransform::from_basis(types::Matrix3::zeros());
        assert!(matches!(
            singular.try_inverse(),
            Err(types::LatticeError::SingularTransform { .. })
        ));
        assert!(!singular.inverse().is_finite());

        let projective = types::Matrix4::from_element(1.0);
        assert!(matches!(
            LatticeTransform::from_matrix(projective),
            Err(types::LatticeError::NonAffine)
        ));
    }

    #[test]
    fn invert_affine_is_exposed() {
        let m = *LatticeTransform::fcc().matrix();
        let inv = types::invert_affine(&m);
        assert!(types::is_finite_matrix(&inv));
    }
}

// =============================================================================
// TIER 2: Hull
// =============================================================================

mod tier2_hull {
    use super::*;

    #[test]
    fn hull_kinds() {
        let params = HullParams::default();
        assert_eq!(build_hull(&[], &params).kind, hull::HullKind::Empty);

        let cube: Vec<LatticeCoord> = (0..2)
            .flat_map(|i| (0..2).flat_map(move |j| (0..2).map(move |k| LatticeCoord::new(i, j, k))))
            .collect();
        let solid = hull::build_hull_from_coords(&cube, &LatticeTransform::identity(), &params);
        assert_eq!(solid.kind, hull::HullKind::Solid);
        assert!((solid.total_area() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn merge_is_public() {
        let tri = HullFace::from_triangle(
            types::Point3::origin(),
            types::Point3::new(1.0, 0.0, 0.0),
            types::Point3::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        let merged = hull::merge_coplanar(&[tri.clone(), tri], 1e-6);
        assert_eq!(merged.len(), 1);
        assert!((merged[0].area - 1.0).abs() < 1e-12);
    }

    #[test]
    fn params_builders() {
        let p = HullParams::default()
            .with_precision_decimals(2)
            .with_coplanar_tolerance(1e-4)
            .with_distance_epsilon(1e-6);
        assert_eq!(p.precision_decimals, 2);
        assert_eq!(hull::round_point(&types::Point3::new(0.126, 0.0, 0.0), 2).x, 0.13);
    }
}

// =============================================================================
// TIER 3: Orientation
// =============================================================================

mod tier3_orient {
    use super::*;

    #[test]
    fn rotation_between_is_exposed() {
        let r = orient::rotation_between(&types::Vector3::x(), &types::Vector3::z());
        assert!((r * types::Vector3::x() - types::Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn orient_returns_pivot_and_bounds() {
        let pts = [types::Point3::origin()];
        let h = build_hull(&pts, &HullParams::default());
        let o = orient::orient(&h, &pts, 0.5);
        assert!(o.selected_face.is_some());
        assert!((o.oriented_bounds.size().x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn view_transform_fields() {
        let view = ViewTransforms::compute(
            &[LatticeCoord::origin(), LatticeCoord::new(1, 0, 0)],
            &LatticeTransform::fcc(),
            &ViewParams::default().with_sphere_padding(1.0),
        );
        assert_eq!(view.lattice_to_world, LatticeTransform::fcc());
        assert!(view.world_to_lattice.is_finite());
        assert_eq!(view.view_rotation_inverse, view.view_rotation.inverse());
        assert!(view.inverse_is_valid);
        assert!(!view.oriented_bounds.is_empty());
    }
}

// =============================================================================
// TIER 4: Ordering and records
// =============================================================================

mod tier4_assembly {
    use super::*;

    #[test]
    fn strategy_names_round_trip() {
        for s in OrderStrategy::ALL {
            assert_eq!(s.to_string().parse::<OrderStrategy>().unwrap(), s);
        }
        let err = "sideways".parse::<OrderStrategy>().unwrap_err();
        assert!(matches!(
            &err,
            lattice::assembly::AssemblyError::UnknownStrategy { name } if name == "sideways"
        ));
        assert_eq!(err.to_string(), "unknown order strategy 'sideways'");
    }

    #[test]
    fn records_in_both_layouts() {
        let a = r#"{ "placements": [ { "piece": "A", "cells_ijk": [[0,0,0]] } ] }"#;
        let b = r#"{ "placed_pieces": [ { "pieceId": "A", "cells": [ { "i": 0, "j": 0, "k": 0 } ] } ] }"#;
        assert_eq!(SolutionRecord::from_json(a).unwrap(), SolutionRecord::from_json(b).unwrap());
    }

    #[test]
    fn overlapping_record_rejected() {
        let json = r#"{ "placements": [
            { "piece": "A", "cells_ijk": [[0,0,0]] },
            { "piece": "B", "cells_ijk": [[0,0,0]] }
        ] }"#;
        let err = SolutionRecord::from_json(json).unwrap().into_pieces().unwrap_err();
        assert!(matches!(err, assembly::AssemblyError::OverlappingCell { .. }));
    }

    #[test]
    fn empty_layout_gives_empty_orders() {
        let layout = AssemblyLayout::new(Vec::new(), &LatticeTransform::fcc()).unwrap();
        for s in OrderStrategy::ALL {
            let order = plan_order(&layout, s, &OrderParams::default());
            assert!(order.is_empty());
            assert!(order.is_permutation_of(0));
        }
    }

    #[test]
    fn graphs_and_layers_are_public() {
        let pieces = vec![
            Piece::new("A", vec![LatticeCoord::new(0, 0, 0)]),
            Piece::new("B", vec![LatticeCoord::new(0, 1, 0)]),
        ];
        let graph = assembly::ContactGraph::from_lattice(&pieces);
        assert_eq!(graph.strength(0, 1), 1);

        let layout = AssemblyLayout::new(pieces, &LatticeTransform::identity()).unwrap();
        let layers = assembly::SupportLayers::from_layout(&layout, 1e-6, 0.5);
        assert_eq!(layers.len(), 2);

        let proximity = assembly::ContactGraph::from_proximity(&layout, 1.1);
        assert!(proximity.are_adjacent(0, 1));
    }

    #[test]
    fn reveal_order_serializes() {
        let layout = AssemblyLayout::new(
            vec![Piece::new("A", vec![LatticeCoord::origin()])],
            &LatticeTransform::identity(),
        )
        .unwrap();
        let order = plan_order(&layout, OrderStrategy::Supported, &OrderParams::default());
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains(r#""strategy":"supported""#));
        assert!(json.contains(r#""placement":"seed""#));

        let back: RevealOrder = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }
}
