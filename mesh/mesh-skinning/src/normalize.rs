//! Row normalization and per-handle validation.

use crate::{BoundaryConditions, BoundaryError, BoundaryResult};

/// Scales every row of the weight matrix to sum to one.
///
/// # Errors
///
/// Returns [`BoundaryError::DegenerateRow`] for the first constrained vertex
/// whose weights sum to zero. The matrix may be partially normalized when
/// this happens.
///
/// # Examples
///
/// ```
/// use mesh_skinning::{assemble, normalize_rows, BoundaryParams, ConstraintTriple};
///
/// let triples = [ConstraintTriple::new(0, 0, 2.0), ConstraintTriple::new(0, 1, 6.0)];
/// let mut bc = assemble(&triples, 2, &BoundaryParams::default()).unwrap();
///
/// normalize_rows(&mut bc).unwrap();
/// assert!((bc.weights[(0, 0)] - 0.25).abs() < 1e-12);
/// assert!((bc.weights[(0, 1)] - 0.75).abs() < 1e-12);
/// ```
pub fn normalize_rows(bc: &mut BoundaryConditions) -> BoundaryResult<()> {
    for (mut row, &vertex) in bc.weights.row_iter_mut().zip(&bc.indices) {
        let sum = row.sum();
        if sum.abs() <= f64::EPSILON {
            return Err(BoundaryError::DegenerateRow { vertex });
        }
        row /= sum;
    }
    Ok(())
}

/// Checks that every handle has a clean zero and a clean one among the
/// constrained vertices.
///
/// For each column the smallest absolute weight must be at most `tolerance`
/// and the largest weight at least `1 - tolerance`. A column with no rows
/// fails the zero check.
///
/// # Errors
///
/// - [`BoundaryError::HandleMissingZero`] if no vertex gives the handle a
///   weight near 0
/// - [`BoundaryError::HandleMissingOne`] if no vertex gives the handle a
///   weight near 1
///
/// The first failing column is reported, zero check before one check.
pub fn validate_columns(bc: &BoundaryConditions, tolerance: f64) -> BoundaryResult<()> {
    for (handle, column) in bc.weights.column_iter().enumerate() {
        let min_abs = column.iter().fold(f64::INFINITY, |acc, w| acc.min(w.abs()));
        let max = column.iter().fold(f64::NEG_INFINITY, |acc, &w| acc.max(w));

        if min_abs > tolerance {
            return Err(BoundaryError::HandleMissingZero { handle });
        }
        if max < 1.0 - tolerance {
            return Err(BoundaryError::HandleMissingOne { handle });
        }
    }
    Ok(())
}
