//! Sparse-to-dense assembly of constraint triples.

use crate::{
    BoundaryConditions, BoundaryError, BoundaryParams, BoundaryResult, ConstraintTriple,
    HandleKind, OverlapPolicy,
};
use nalgebra::DMatrix;
use std::collections::BTreeMap;
use tracing::trace;

/// Assembles constraint triples into a dense boundary condition matrix.
///
/// The constrained vertex list is the sorted, deduplicated set of triple
/// vertices. Each triple writes its weight into the row of its vertex and the
/// column of its handle; cells no triple touches stay zero. When two triples
/// hit the same cell, `params.overlap` decides between overwriting and
/// failing.
///
/// Rows are not normalized here.
///
/// # Errors
///
/// - [`BoundaryError::InvalidHandleIndex`] if a triple's handle column is not
///   below `handle_count`
/// - [`BoundaryError::ConflictingWeights`] under [`OverlapPolicy::Reject`]
///   when two weights for one cell differ by more than the tolerance
///
/// # Examples
///
/// ```
/// use mesh_skinning::{assemble, BoundaryParams, ConstraintTriple};
///
/// let triples = [
///     ConstraintTriple::new(7, 1, 1.0),
///     ConstraintTriple::new(2, 0, 0.25),
///     ConstraintTriple::new(2, 1, 0.75),
/// ];
///
/// let bc = assemble(&triples, 2, &BoundaryParams::default()).unwrap();
/// assert_eq!(bc.indices, vec![2, 7]);
/// assert_eq!(bc.weights[(0, 1)], 0.75);
/// assert_eq!(bc.weights[(1, 0)], 0.0);
/// ```
pub fn assemble(
    triples: &[ConstraintTriple],
    handle_count: usize,
    params: &BoundaryParams,
) -> BoundaryResult<BoundaryConditions> {
    // Ordered vertex -> row map; its key order is the boundary index list
    let mut rows: BTreeMap<usize, usize> = triples.iter().map(|t| (t.vertex, 0)).collect();
    for (row, slot) in rows.values_mut().enumerate() {
        *slot = row;
    }
    let indices: Vec<usize> = rows.keys().copied().collect();

    let mut weights = DMatrix::<f64>::zeros(indices.len(), handle_count);
    let mut written = DMatrix::from_element(indices.len(), handle_count, false);

    for (position, triple) in triples.iter().enumerate() {
        if triple.handle >= handle_count {
            return Err(BoundaryError::InvalidHandleIndex {
                kind: HandleKind::Column,
                handle: position,
                index: triple.handle,
                len: handle_count,
            });
        }

        let row = rows[&triple.vertex];
        let cell = (row, triple.handle);

        if written[cell] {
            let previous = weights[cell];
            if params.overlap == OverlapPolicy::Reject
                && (previous - triple.weight).abs() > params.tolerance
            {
                return Err(BoundaryError::ConflictingWeights {
                    vertex: triple.vertex,
                    handle: triple.handle,
                    previous,
                    current: triple.weight,
                });
            }
            trace!(
                vertex = triple.vertex,
                handle = triple.handle,
                previous,
                current = triple.weight,
                "Overwriting boundary weight"
            );
        }

        weights[cell] = triple.weight;
        written[cell] = true;
    }

    Ok(BoundaryConditions { indices, weights })
}
