//! Main boundary condition function.
//!
//! This module provides [`boundary_conditions`], which chains collection,
//! assembly, normalization and validation.

use crate::{
    BoundaryConditions, BoundaryParams, BoundaryResult, HandleSet, assemble, collect_constraints,
    normalize_rows, validate_columns,
};
use nalgebra::Point3;
use tracing::{info, warn};

/// Computes boundary conditions for a skinning-weight solve.
///
/// Mesh vertices lying on a handle (within `params.tolerance`) become fixed:
/// - on a point handle, with weight 1 toward that handle
/// - on a bone segment, with weight 1 toward that bone
/// - on a cage edge, with weight split linearly between its two point
///   handles
///
/// The weights are then normalized per vertex and every handle is checked
/// for at least one vertex at weight ≈1 and one at weight ≈0.
///
/// # Arguments
///
/// * `vertices` - Mesh vertex positions
/// * `handles` - Handle positions and point, bone and cage handles
/// * `params` - Tolerance and assembly options
///
/// # Errors
///
/// Returns an error if:
/// - The tolerance is invalid
/// - There are no point handles or bones, or a handle index is out of range
/// - A constrained vertex carries zero total weight
/// - Some handle has no vertex at weight ≈0 or none at weight ≈1
///
/// No partial output is produced on failure.
///
/// # Examples
///
/// A bone with a point handle at each end of a strip of vertices:
///
/// ```
/// use mesh_skinning::{boundary_conditions, BoundaryParams, HandleSet};
/// use nalgebra::Point3;
///
/// let vertices: Vec<_> = (0..5).map(|i| Point3::new(f64::from(i), 0.0, 0.0)).collect();
///
/// let handles = HandleSet::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(4.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(3.0, 0.0, 0.0),
/// ])
/// .with_point(0)
/// .with_point(1)
/// .with_bone(2, 3);
///
/// let bc = boundary_conditions(&vertices, &handles, &BoundaryParams::default()).unwrap();
///
/// assert_eq!(bc.indices, vec![0, 1, 2, 3, 4]);
/// assert_eq!(bc.handle_count(), 3);
/// // Vertex 2 is on the bone only
/// assert_eq!(bc.weights_for_vertex(2).unwrap()[2], 1.0);
/// ```
pub fn boundary_conditions(
    vertices: &[Point3<f64>],
    handles: &HandleSet,
    params: &BoundaryParams,
) -> BoundaryResult<BoundaryConditions> {
    params.validate()?;

    info!(
        vertices = vertices.len(),
        points = handles.points.len(),
        bones = handles.bones.len(),
        cage_edges = handles.cage_edges.len(),
        "Computing boundary conditions"
    );

    let result = run_pipeline(vertices, handles, params);

    match &result {
        Ok(bc) => info!(
            constrained = bc.len(),
            handles = bc.handle_count(),
            "Boundary conditions complete"
        ),
        Err(err) => warn!(error = %err, "Boundary conditions rejected"),
    }

    result
}

fn run_pipeline(
    vertices: &[Point3<f64>],
    handles: &HandleSet,
    params: &BoundaryParams,
) -> BoundaryResult<BoundaryConditions> {
    let triples = collect_constraints(vertices, handles, params)?;

    let mut bc = assemble(&triples, handles.handle_count(), params)?;
    if bc.is_empty() {
        warn!("No mesh vertex lies on any handle");
    }

    normalize_rows(&mut bc)?;
    validate_columns(&bc, params.tolerance)?;

    Ok(bc)
}
