//! Constraint collection.
//!
//! Scans mesh vertices against each handle kind and emits sparse
//! `(vertex, handle, weight)` triples. The three phases are independent and
//! can be run on their own; [`collect_constraints`] runs all of them in
//! order after validating the handles.

use crate::{BoundaryParams, BoundaryResult, HandleSet, project_to_line};
use nalgebra::Point3;
use rayon::prelude::*;
use tracing::debug;

/// A raw constraint on one mesh vertex toward one handle column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintTriple {
    /// Mesh vertex index.
    pub vertex: usize,
    /// Handle column in `0..handle_count`.
    pub handle: usize,
    /// Raw weight, before row normalization.
    pub weight: f64,
}

impl ConstraintTriple {
    /// Creates a constraint triple.
    #[must_use]
    pub const fn new(vertex: usize, handle: usize, weight: f64) -> Self {
        Self {
            vertex,
            handle,
            weight,
        }
    }
}

/// Collects constraints from every handle kind.
///
/// Emission order is point handles, then bones, then cage edges; within a
/// phase it is handle-major and vertex-minor.
///
/// # Errors
///
/// Returns [`BoundaryError::NoHandles`] before any scan when there are no
/// point handles or bones, and the other [`HandleSet::validate`] errors for
/// out-of-range indices.
///
/// [`BoundaryError::NoHandles`]: crate::BoundaryError::NoHandles
pub fn collect_constraints(
    vertices: &[Point3<f64>],
    handles: &HandleSet,
    params: &BoundaryParams,
) -> BoundaryResult<Vec<ConstraintTriple>> {
    handles.validate()?;

    let mut triples = collect_point_constraints(vertices, handles, params);
    let point_count = triples.len();
    debug!(
        handles = handles.points.len(),
        constraints = point_count,
        "Collected point handle constraints"
    );

    triples.extend(collect_bone_constraints(vertices, handles, params));
    let bone_count = triples.len() - point_count;
    debug!(
        handles = handles.bones.len(),
        constraints = bone_count,
        "Collected bone constraints"
    );

    triples.extend(collect_cage_constraints(vertices, handles, params));
    debug!(
        edges = handles.cage_edges.len(),
        constraints = triples.len() - point_count - bone_count,
        "Collected cage edge constraints"
    );

    Ok(triples)
}

/// Constrains vertices that coincide with a point handle.
///
/// A vertex within squared distance `tolerance` of point handle `p` gets
/// weight 1 toward column `p`.
///
/// # Panics
///
/// Panics if a point handle indexes past `handles.positions`. Handles that
/// passed [`HandleSet::validate`] never do.
#[must_use]
pub fn collect_point_constraints(
    vertices: &[Point3<f64>],
    handles: &HandleSet,
    params: &BoundaryParams,
) -> Vec<ConstraintTriple> {
    let tolerance = params.tolerance;
    let parallel = params.use_parallel(vertices.len());
    let mut triples = Vec::new();

    for (p, &index) in handles.points.iter().enumerate() {
        let pos = handles.positions[index];
        let hits = matching_vertices(vertices, parallel, |v| {
            ((v - pos).norm_squared() <= tolerance).then_some(0.0)
        });
        triples.extend(hits.into_iter().map(|(i, _)| ConstraintTriple::new(i, p, 1.0)));
    }

    triples
}

/// Constrains vertices lying on a bone segment.
///
/// A vertex whose projection onto bone `e` falls within the segment extent
/// and within squared distance `tolerance` of it gets weight 1 toward the
/// bone's column, `points.len() + e`.
///
/// # Panics
///
/// Panics if a bone endpoint indexes past `handles.positions`. Handles that
/// passed [`HandleSet::validate`] never do.
#[must_use]
pub fn collect_bone_constraints(
    vertices: &[Point3<f64>],
    handles: &HandleSet,
    params: &BoundaryParams,
) -> Vec<ConstraintTriple> {
    let tolerance = params.tolerance;
    let parallel = params.use_parallel(vertices.len());
    let mut triples = Vec::new();

    for (e, &[tip, tail]) in handles.bones.iter().enumerate() {
        let tip = handles.positions[tip];
        let tail = handles.positions[tail];
        let column = handles.bone_column(e);

        let hits = matching_vertices(vertices, parallel, |v| {
            let proj = project_to_line(v, &tip, &tail);
            proj.is_on_segment(tolerance).then_some(proj.t)
        });
        triples.extend(
            hits.into_iter()
                .map(|(i, _)| ConstraintTriple::new(i, column, 1.0)),
        );
    }

    triples
}

/// Constrains vertices lying on a cage edge.
///
/// Cage edges have no column of their own. A vertex on edge `[a, b]` at
/// parameter `t` gets weight `1 - t` toward point handle `a` and `t` toward
/// point handle `b`.
///
/// # Panics
///
/// Panics if a cage edge indexes past `handles.points`, or a point handle
/// past `handles.positions`. Handles that passed [`HandleSet::validate`]
/// never do.
#[must_use]
pub fn collect_cage_constraints(
    vertices: &[Point3<f64>],
    handles: &HandleSet,
    params: &BoundaryParams,
) -> Vec<ConstraintTriple> {
    let tolerance = params.tolerance;
    let parallel = params.use_parallel(vertices.len());
    let mut triples = Vec::new();

    for &[a, b] in &handles.cage_edges {
        let start = handles.positions[handles.points[a]];
        let end = handles.positions[handles.points[b]];

        let hits = matching_vertices(vertices, parallel, |v| {
            let proj = project_to_line(v, &start, &end);
            proj.is_on_segment(tolerance).then_some(proj.t)
        });
        for (i, t) in hits {
            triples.push(ConstraintTriple::new(i, a, 1.0 - t));
            triples.push(ConstraintTriple::new(i, b, t));
        }
    }

    triples
}

/// Returns `(vertex, parameter)` for every vertex accepted by `test`, in
/// vertex order.
fn matching_vertices<F>(vertices: &[Point3<f64>], parallel: bool, test: F) -> Vec<(usize, f64)>
where
    F: Fn(&Point3<f64>) -> Option<f64> + Sync,
{
    if parallel {
        vertices
            .par_iter()
            .enumerate()
            .filter_map(|(i, v)| test(v).map(|t| (i, t)))
            .collect()
    } else {
        vertices
            .iter()
            .enumerate()
            .filter_map(|(i, v)| test(v).map(|t| (i, t)))
            .collect()
    }
}
