//! Error types for boundary condition computation.

use thiserror::Error;

/// The kind of handle index that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    /// A point handle indexing into the handle positions.
    Point,
    /// A bone endpoint indexing into the handle positions.
    Bone,
    /// A cage edge endpoint indexing into the point handles.
    CageEdge,
    /// A handle column referenced by a constraint triple.
    Column,
}

impl std::fmt::Display for HandleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Point => "point handle",
            Self::Bone => "bone",
            Self::CageEdge => "cage edge",
            Self::Column => "handle column",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while computing boundary conditions.
///
/// Every variant is a deterministic function of the inputs and the
/// tolerance; none of them is worth retrying.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BoundaryError {
    /// Neither point handles nor bone handles were supplied.
    #[error("no handles found (need at least one point handle or bone)")]
    NoHandles,

    /// A handle references an index outside the array it indexes into.
    #[error("{kind} {handle} references index {index} (only {len} available)")]
    InvalidHandleIndex {
        /// Which handle array the bad index belongs to.
        kind: HandleKind,
        /// Position of the offending handle in its array.
        handle: usize,
        /// The out-of-range index.
        index: usize,
        /// Length of the array being indexed.
        len: usize,
    },

    /// A constrained vertex carries zero total weight.
    #[error("constrained vertex {vertex} has zero total weight")]
    DegenerateRow {
        /// The mesh vertex whose row sums to zero.
        vertex: usize,
    },

    /// No constrained vertex gives this handle a weight of zero.
    #[error("handle {handle} does not receive 0 weight")]
    HandleMissingZero {
        /// The handle column that failed.
        handle: usize,
    },

    /// No constrained vertex gives this handle a weight of one.
    #[error("handle {handle} does not receive 1 weight")]
    HandleMissingOne {
        /// The handle column that failed.
        handle: usize,
    },

    /// Two constraints assign different weights to the same cell.
    #[error(
        "vertex {vertex} receives conflicting weights for handle {handle}: {previous} then {current}"
    )]
    ConflictingWeights {
        /// The mesh vertex.
        vertex: usize,
        /// The handle column.
        handle: usize,
        /// Weight written first.
        previous: f64,
        /// Weight written second.
        current: f64,
    },

    /// A point matrix does not have three columns.
    #[error("point matrix must have 3 columns, got {columns}")]
    InvalidMatrixShape {
        /// Number of columns found.
        columns: usize,
    },

    /// The proximity tolerance is negative or not finite.
    #[error("invalid tolerance: {0} (must be finite and non-negative)")]
    InvalidTolerance(f64),
}

/// Result type for boundary condition operations.
pub type BoundaryResult<T> = Result<T, BoundaryError>;
