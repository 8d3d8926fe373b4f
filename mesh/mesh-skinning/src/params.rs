//! Boundary condition parameters and configuration.
//!
//! This module provides the [`BoundaryParams`] struct for configuring the
//! proximity tolerance and assembly behavior of [`boundary_conditions`].
//!
//! [`boundary_conditions`]: crate::boundary_conditions

use crate::{BoundaryError, BoundaryResult};

/// Default proximity tolerance, the `FLOAT_EPS` value (`1.0e-7`) used by libigl.
pub const DEFAULT_TOLERANCE: f64 = 1.0e-7;

/// Vertex count at which the collection scans switch to rayon.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// How the assembler treats two constraints that target the same cell.
///
/// A cell is a (vertex, handle) pair. Overlaps happen when a vertex sits on a
/// point handle that is also the endpoint of a cage edge, or on two collinear
/// cage edges sharing a point handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OverlapPolicy {
    /// The later write replaces the earlier one.
    #[default]
    Overwrite,
    /// Fail when the two weights differ by more than the tolerance.
    Reject,
}

/// Parameters for boundary condition computation.
///
/// # Examples
///
/// ```
/// use mesh_skinning::{BoundaryParams, OverlapPolicy};
///
/// let params = BoundaryParams::default()
///     .with_tolerance(1e-6)
///     .with_overlap_policy(OverlapPolicy::Reject);
///
/// assert!((params.tolerance - 1e-6).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryParams {
    /// Tolerance used for every proximity and validity comparison.
    ///
    /// Squared distances, projection parameters and weights are all compared
    /// against this single value. Default: `1e-7`
    pub tolerance: f64,

    /// Behavior when two constraints write the same (vertex, handle) cell.
    /// Default: [`OverlapPolicy::Overwrite`]
    pub overlap: OverlapPolicy,

    /// Minimum vertex count for running the collection scans in parallel.
    /// Results are identical either way. Default: 1000
    pub parallel_threshold: usize,
}

impl Default for BoundaryParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            overlap: OverlapPolicy::Overwrite,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl BoundaryParams {
    /// Creates parameters with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates parameters that reject conflicting overlapping constraints.
    ///
    /// # Examples
    ///
    /// ```
    /// use mesh_skinning::{BoundaryParams, OverlapPolicy};
    ///
    /// assert_eq!(BoundaryParams::strict().overlap, OverlapPolicy::Reject);
    /// ```
    #[must_use]
    pub fn strict() -> Self {
        Self {
            overlap: OverlapPolicy::Reject,
            ..Default::default()
        }
    }

    /// Set the proximity tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the overlap policy.
    #[must_use]
    pub const fn with_overlap_policy(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// Set the vertex count above which scans run in parallel.
    ///
    /// Use `usize::MAX` to force sequential scans.
    #[must_use]
    pub const fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Checks that the tolerance is usable.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError::InvalidTolerance`] if the tolerance is
    /// negative, infinite or NaN.
    pub fn validate(&self) -> BoundaryResult<()> {
        if self.tolerance.is_finite() && self.tolerance >= 0.0 {
            Ok(())
        } else {
            Err(BoundaryError::InvalidTolerance(self.tolerance))
        }
    }

    /// Returns whether a scan over `vertex_count` vertices should use rayon.
    #[inline]
    #[must_use]
    pub const fn use_parallel(&self, vertex_count: usize) -> bool {
        vertex_count >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = BoundaryParams::default();
        assert!((params.tolerance - 1e-7).abs() < f64::EPSILON);
        assert_eq!(params.overlap, OverlapPolicy::Overwrite);
        assert_eq!(params.parallel_threshold, 1000);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_default_tolerance_is_float_eps() {
        // 1e-7 exactly, slightly tighter than f32::EPSILON (~1.19e-7)
        assert!((DEFAULT_TOLERANCE - 1.0e-7).abs() < f64::EPSILON);
        assert!(DEFAULT_TOLERANCE < f64::from(f32::EPSILON));
    }

    #[test]
    fn test_builder() {
        let params = BoundaryParams::new()
            .with_tolerance(0.01)
            .with_parallel_threshold(usize::MAX);
        assert!((params.tolerance - 0.01).abs() < f64::EPSILON);
        assert!(!params.use_parallel(1_000_000));
    }

    #[test]
    fn test_invalid_tolerance() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let params = BoundaryParams::default().with_tolerance(bad);
            assert!(matches!(
                params.validate(),
                Err(BoundaryError::InvalidTolerance(_))
            ));
        }
        assert!(BoundaryParams::default().with_tolerance(0.0).validate().is_ok());
    }
}
