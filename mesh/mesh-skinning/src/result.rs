//! Boundary condition output.
//!
//! This module provides [`BoundaryConditions`], the constrained vertex list
//! and weight matrix handed to a downstream weight solver.

use nalgebra::{DMatrix, DVector, RowDVector};

/// Fixed vertices and their per-handle weights.
///
/// Row `i` of `weights` belongs to mesh vertex `indices[i]`; column `j` is
/// handle `j` (point handles first, then bones). After a successful
/// [`boundary_conditions`] call every row sums to one.
///
/// [`boundary_conditions`]: crate::boundary_conditions
///
/// # Examples
///
/// ```
/// use mesh_skinning::{boundary_conditions, BoundaryParams, HandleSet};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let handles = HandleSet::new(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)])
///     .with_point(0)
///     .with_point(1);
///
/// let bc = boundary_conditions(&vertices, &handles, &BoundaryParams::default()).unwrap();
///
/// assert_eq!(bc.indices, vec![0, 1]);
/// assert!(!bc.is_constrained(2));
/// println!("{bc}");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryConditions {
    /// Constrained mesh vertices, strictly increasing.
    pub indices: Vec<usize>,
    /// Weight matrix, one row per constrained vertex and one column per handle.
    pub weights: DMatrix<f64>,
}

impl BoundaryConditions {
    /// Number of constrained vertices.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns whether no vertex is constrained.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of handle columns.
    #[inline]
    #[must_use]
    pub fn handle_count(&self) -> usize {
        self.weights.ncols()
    }

    /// Row index of mesh vertex `vertex`, if it is constrained.
    #[must_use]
    pub fn row_of(&self, vertex: usize) -> Option<usize> {
        self.indices.binary_search(&vertex).ok()
    }

    /// Returns whether mesh vertex `vertex` is constrained.
    #[must_use]
    pub fn is_constrained(&self, vertex: usize) -> bool {
        self.row_of(vertex).is_some()
    }

    /// Per-handle weights of mesh vertex `vertex`, if it is constrained.
    #[must_use]
    pub fn weights_for_vertex(&self, vertex: usize) -> Option<RowDVector<f64>> {
        self.row_of(vertex).map(|row| self.weights.row(row).into_owned())
    }

    /// Sum of each row of the weight matrix.
    #[must_use]
    pub fn row_sums(&self) -> DVector<f64> {
        DVector::from_iterator(
            self.weights.nrows(),
            self.weights.row_iter().map(|row| row.sum()),
        )
    }

    /// Constrained vertices that weigh at least `1 - tolerance` toward
    /// `handle`.
    ///
    /// These are the vertices that move rigidly with the handle.
    #[must_use]
    pub fn core_vertices(&self, handle: usize, tolerance: f64) -> Vec<usize> {
        if handle >= self.handle_count() {
            return Vec::new();
        }
        self.indices
            .iter()
            .zip(self.weights.column(handle).iter())
            .filter(|&(_, &w)| w >= 1.0 - tolerance)
            .map(|(&v, _)| v)
            .collect()
    }
}

impl std::fmt::Display for BoundaryConditions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Boundary conditions: {} constrained vertices, {} handles",
            self.len(),
            self.handle_count()
        )
    }
}
