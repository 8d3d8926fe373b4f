//! Property-based tests for boundary condition computation.
//!
//! These tests use proptest to generate random vertex clouds with handles
//! placed on some of the vertices, and verify the output invariants.
//!
//! Run with: cargo test -p mesh-skinning -- proptest

#![allow(clippy::unwrap_used)]

use mesh_skinning::{
    BoundaryError, BoundaryParams, HandleSet, boundary_conditions, collect_constraints,
};
use nalgebra::Point3;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Generate a random position in a bounded range.
fn arb_point() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(-100.0..100.0f64).prop_map(|[x, y, z]| Point3::new(x, y, z))
}

/// Generate vertices plus handles whose positions are copies of vertices.
///
/// Every handle index is valid. Bones and cage edges may be zero-length.
fn arb_scene() -> impl Strategy<Value = (Vec<Point3<f64>>, HandleSet)> {
    prop::collection::vec(arb_point(), 2..40).prop_flat_map(|vertices| {
        let n = vertices.len();
        let points = prop::collection::vec(0..n, 0..4);
        let bones = prop::collection::vec(prop::array::uniform2(0..n), 0..3);
        (Just(vertices), points, bones).prop_flat_map(|(vertices, points, bones)| {
            let p = points.len();
            let cage = if p >= 2 {
                prop::collection::vec(prop::array::uniform2(0..p), 0..3).boxed()
            } else {
                Just(Vec::new()).boxed()
            };
            (Just(vertices), Just(points), Just(bones), cage).prop_map(
                |(vertices, points, bones, cage_edges)| {
                    let handles = HandleSet {
                        positions: vertices.clone(),
                        points,
                        bones,
                        cage_edges,
                    };
                    (vertices, handles)
                },
            )
        })
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_successful_output_is_well_formed((vertices, handles) in arb_scene()) {
        let params = BoundaryParams::default();
        match boundary_conditions(&vertices, &handles, &params) {
            Ok(bc) => {
                prop_assert!(bc.indices.windows(2).all(|w| w[0] < w[1]));
                prop_assert_eq!(bc.weights.nrows(), bc.indices.len());
                prop_assert_eq!(bc.weights.ncols(), handles.handle_count());

                for sum in &bc.row_sums() {
                    prop_assert!((sum - 1.0).abs() < 1e-9);
                }
                for column in bc.weights.column_iter() {
                    prop_assert!(column.iter().any(|w| w.abs() <= params.tolerance));
                    prop_assert!(column.iter().any(|&w| w >= 1.0 - params.tolerance));
                }

                let triples = collect_constraints(&vertices, &handles, &params).unwrap();
                for v in &bc.indices {
                    prop_assert!(triples.iter().any(|t| t.vertex == *v));
                }
            }
            Err(err) => {
                let expected = matches!(
                    err,
                    BoundaryError::NoHandles
                        | BoundaryError::DegenerateRow { .. }
                        | BoundaryError::HandleMissingZero { .. }
                        | BoundaryError::HandleMissingOne { .. }
                );
                prop_assert!(expected, "unexpected error: {}", err);
            }
        }
    }

    #[test]
    fn proptest_deterministic((vertices, handles) in arb_scene()) {
        let params = BoundaryParams::default();
        let a = boundary_conditions(&vertices, &handles, &params);
        let b = boundary_conditions(&vertices, &handles, &params);
        match (a, b) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            _ => prop_assert!(false, "runs disagree on success"),
        }
    }

    #[test]
    fn proptest_parallel_matches_sequential((vertices, handles) in arb_scene()) {
        let sequential = BoundaryParams::default().with_parallel_threshold(usize::MAX);
        let parallel = BoundaryParams::default().with_parallel_threshold(0);

        let a = collect_constraints(&vertices, &handles, &sequential);
        let b = collect_constraints(&vertices, &handles, &parallel);
        match (a, b) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "parallel and sequential scans disagree"),
        }
    }

    #[test]
    fn proptest_every_point_handle_vertex_is_constrained((vertices, handles) in arb_scene()) {
        let params = BoundaryParams::default();
        if let Ok(triples) = collect_constraints(&vertices, &handles, &params) {
            // Handle positions are copies of vertices, so each point handle hits its vertex
            for &index in &handles.points {
                prop_assert!(triples.iter().any(|t| t.vertex == index));
            }
        }
    }
}
