//! Boundary conditions for skinning-weight solvers.
//!
//! Given a mesh and a set of control handles, this crate decides which mesh
//! vertices are fixed, to which handles, and with what blend weight. The
//! output is the list of fixed vertex indices plus a dense weight matrix with
//! one column per handle, ready for a harmonic or biharmonic weight solve.
//!
//! Three kinds of handle are supported:
//!
//! - **Point handles** - a vertex on the point is fixed to it with weight 1
//! - **Bones** - a vertex on the segment is fixed to the bone with weight 1
//! - **Cage edges** - a vertex on the edge between two point handles gets
//!   weights `1 - t` and `t`, where `t` is its position along the edge
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with zero Bevy dependencies.
//!
//! # Quick Start
//!
//! ```
//! use mesh_skinning::{boundary_conditions, BoundaryParams, HandleSet};
//! use nalgebra::Point3;
//!
//! // A strip of vertices along X
//! let vertices: Vec<_> = (0..=4).map(|i| Point3::new(f64::from(i), 0.0, 0.0)).collect();
//!
//! // Two point handles at the ends, joined by a cage edge
//! let handles = HandleSet::new(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0)])
//!     .with_point(0)
//!     .with_point(1)
//!     .with_cage_edge(0, 1);
//!
//! let bc = boundary_conditions(&vertices, &handles, &BoundaryParams::default()).unwrap();
//!
//! assert_eq!(bc.indices, vec![0, 1, 2, 3, 4]);
//! // Vertex 1 is a quarter of the way along the edge
//! let w = bc.weights_for_vertex(1).unwrap();
//! assert!((w[0] - 0.75).abs() < 1e-12);
//! assert!((w[1] - 0.25).abs() < 1e-12);
//! ```
//!
//! # Pipeline
//!
//! [`boundary_conditions`] runs four stages, each gating the next:
//!
//! 1. **Collect** - [`collect_constraints`] scans vertices against points,
//!    bones and cage edges, emitting sparse [`ConstraintTriple`]s
//! 2. **Assemble** - [`assemble`] builds the sorted index list and dense matrix
//! 3. **Normalize** - [`normalize_rows`] scales every row to sum to one
//! 4. **Validate** - [`validate_columns`] requires every handle to have a
//!    vertex at weight ≈1 and one at weight ≈0
//!
//! The stages are public so they can be run and inspected individually.
//!
//! # Tolerance
//!
//! A single tolerance ([`BoundaryParams::tolerance`], default `1e-7`) is used
//! for squared distances, projection parameters and weight checks alike.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod assemble;
mod boundary;
mod collect;
mod error;
mod handles;
mod normalize;
mod params;
mod projection;
mod result;

pub use assemble::assemble;
pub use boundary::boundary_conditions;
pub use collect::{
    ConstraintTriple, collect_bone_constraints, collect_cage_constraints, collect_constraints,
    collect_point_constraints,
};
pub use error::{BoundaryError, BoundaryResult, HandleKind};
pub use handles::{HandleSet, points_from_matrix};
pub use normalize::{normalize_rows, validate_columns};
pub use params::{BoundaryParams, DEFAULT_PARALLEL_THRESHOLD, DEFAULT_TOLERANCE, OverlapPolicy};
pub use projection::{LineProjection, project_to_line};
pub use result::BoundaryConditions;
