//! Handle definitions for boundary condition computation.
//!
//! A [`HandleSet`] bundles the pool of handle positions with the three kinds
//! of handle that reference it:
//! - Point handles (one column each)
//! - Bone segments (one column each, numbered after the point handles)
//! - Cage edges (no column of their own; they split weight between two
//!   point handles)

use crate::{BoundaryError, BoundaryResult, HandleKind};
use nalgebra::{DMatrix, Point3};

/// Control handles that mesh vertices are classified against.
///
/// Handle columns are numbered `0..points.len()` for point handles followed
/// by `points.len()..points.len() + bones.len()` for bones.
///
/// # Examples
///
/// ```
/// use mesh_skinning::HandleSet;
/// use nalgebra::Point3;
///
/// let handles = HandleSet::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 2.0, 0.0),
/// ])
/// .with_point(0)
/// .with_point(1)
/// .with_bone(1, 2)
/// .with_cage_edge(0, 1);
///
/// // Two point handles plus one bone; the cage edge adds no column
/// assert_eq!(handles.handle_count(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandleSet {
    /// Pool of handle positions referenced by points and bones.
    pub positions: Vec<Point3<f64>>,
    /// Point handles, as indices into `positions`.
    pub points: Vec<usize>,
    /// Bone segments as `[tip, tail]` indices into `positions`.
    pub bones: Vec<[usize; 2]>,
    /// Cage edges as `[start, end]` indices into `points`.
    pub cage_edges: Vec<[usize; 2]>,
}

impl HandleSet {
    /// Creates a handle set over the given positions with no handles yet.
    #[must_use]
    pub const fn new(positions: Vec<Point3<f64>>) -> Self {
        Self {
            positions,
            points: Vec::new(),
            bones: Vec::new(),
            cage_edges: Vec::new(),
        }
    }

    /// Adds a point handle at `positions[index]`.
    #[must_use]
    pub fn with_point(mut self, index: usize) -> Self {
        self.points.push(index);
        self
    }

    /// Adds a bone running from `positions[tip]` to `positions[tail]`.
    #[must_use]
    pub fn with_bone(mut self, tip: usize, tail: usize) -> Self {
        self.bones.push([tip, tail]);
        self
    }

    /// Adds a cage edge between point handles `start` and `end`.
    ///
    /// Note these are indices into the point handles, not into `positions`.
    #[must_use]
    pub fn with_cage_edge(mut self, start: usize, end: usize) -> Self {
        self.cage_edges.push([start, end]);
        self
    }

    /// Total number of handle columns: point handles plus bones.
    #[inline]
    #[must_use]
    pub fn handle_count(&self) -> usize {
        self.points.len() + self.bones.len()
    }

    /// Returns whether there is nothing to constrain against.
    ///
    /// Cage edges alone do not count, since they only split weight between
    /// point handles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handle_count() == 0
    }

    /// Column index of bone `bone`.
    #[inline]
    #[must_use]
    pub fn bone_column(&self, bone: usize) -> usize {
        self.points.len() + bone
    }

    /// Checks that handles exist and every index is in range.
    ///
    /// # Errors
    ///
    /// - [`BoundaryError::NoHandles`] if there are no point handles or bones
    /// - [`BoundaryError::InvalidHandleIndex`] for any out-of-range index
    ///
    /// Zero-length bones and cage edges are accepted; they constrain nothing.
    pub fn validate(&self) -> BoundaryResult<()> {
        if self.is_empty() {
            return Err(BoundaryError::NoHandles);
        }

        let position_count = self.positions.len();
        for (handle, &index) in self.points.iter().enumerate() {
            check_index(HandleKind::Point, handle, index, position_count)?;
        }
        for (handle, bone) in self.bones.iter().enumerate() {
            for &index in bone {
                check_index(HandleKind::Bone, handle, index, position_count)?;
            }
        }

        let point_count = self.points.len();
        for (edge, &[start, end]) in self.cage_edges.iter().enumerate() {
            check_index(HandleKind::CageEdge, edge, start, point_count)?;
            check_index(HandleKind::CageEdge, edge, end, point_count)?;
        }

        Ok(())
    }
}

fn check_index(kind: HandleKind, handle: usize, index: usize, len: usize) -> BoundaryResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(BoundaryError::InvalidHandleIndex {
            kind,
            handle,
            index,
            len,
        })
    }
}

/// Converts an `n × 3` matrix of coordinates into points.
///
/// Useful when vertex or handle positions arrive as a dense matrix with one
/// point per row.
///
/// # Errors
///
/// Returns [`BoundaryError::InvalidMatrixShape`] if the matrix does not have
/// exactly three columns.
///
/// # Examples
///
/// ```
/// use mesh_skinning::points_from_matrix;
/// use nalgebra::DMatrix;
///
/// let m = DMatrix::from_row_slice(2, 3, &[0.0, 0.0, 0.0, 1.0, 2.0, 3.0]);
/// let points = points_from_matrix(&m).unwrap();
/// assert_eq!(points[1].z, 3.0);
/// ```
pub fn points_from_matrix(matrix: &DMatrix<f64>) -> BoundaryResult<Vec<Point3<f64>>> {
    if matrix.ncols() != 3 {
        return Err(BoundaryError::InvalidMatrixShape {
            columns: matrix.ncols(),
        });
    }

    Ok(matrix
        .row_iter()
        .map(|row| Point3::new(row[0], row[1], row[2]))
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn three_positions() -> Vec<Point3<f64>> {
        vec![
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_columns() {
        let handles = HandleSet::new(three_positions())
            .with_point(0)
            .with_point(2)
            .with_bone(0, 1);

        assert_eq!(handles.handle_count(), 3);
        assert_eq!(handles.bone_column(0), 2);
    }

    #[test]
    fn test_no_handles() {
        // Cage edges alone are not handles
        let handles = HandleSet::new(three_positions()).with_cage_edge(0, 1);
        assert!(handles.is_empty());
        assert!(matches!(handles.validate(), Err(BoundaryError::NoHandles)));
    }

    #[test]
    fn test_invalid_point_index() {
        let handles = HandleSet::new(three_positions()).with_point(3);
        let err = handles.validate().unwrap_err();
        assert!(matches!(
            err,
            BoundaryError::InvalidHandleIndex {
                kind: HandleKind::Point,
                handle: 0,
                index: 3,
                len: 3,
            }
        ));
    }

    #[test]
    fn test_invalid_bone_index() {
        let handles = HandleSet::new(three_positions()).with_bone(0, 7);
        assert!(matches!(
            handles.validate(),
            Err(BoundaryError::InvalidHandleIndex {
                kind: HandleKind::Bone,
                index: 7,
                ..
            })
        ));
    }

    #[test]
    fn test_cage_edge_indexes_points_not_positions() {
        // Position index 2 exists, but there are only two point handles
        let handles = HandleSet::new(three_positions())
            .with_point(0)
            .with_point(1)
            .with_cage_edge(0, 2);
        assert!(matches!(
            handles.validate(),
            Err(BoundaryError::InvalidHandleIndex {
                kind: HandleKind::CageEdge,
                len: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_zero_length_segments_validate() {
        let handles = HandleSet::new(three_positions())
            .with_point(0)
            .with_point(1)
            .with_bone(2, 2)
            .with_cage_edge(1, 1);
        assert!(handles.validate().is_ok());
    }

    #[test]
    fn test_points_from_matrix() {
        let m = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let points = points_from_matrix(&m).unwrap();
        assert_eq!(points, vec![Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0)]);

        let bad = DMatrix::<f64>::zeros(4, 2);
        assert!(matches!(
            points_from_matrix(&bad),
            Err(BoundaryError::InvalidMatrixShape { columns: 2 })
        ));
    }
}
