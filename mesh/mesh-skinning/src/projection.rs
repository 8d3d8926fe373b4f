//! Point-to-line projection.
//!
//! Projects a query point onto the infinite line through two segment
//! endpoints, reporting the line parameter and squared perpendicular
//! distance. Both bone and cage handles are tested with this primitive.

use nalgebra::Point3;

/// The projection of a point onto the line through a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineProjection {
    /// Line parameter of the foot point: 0 at the start, 1 at the end.
    ///
    /// Not clamped; values outside `[0, 1]` lie on the extension of the
    /// segment.
    pub t: f64,
    /// Squared distance from the point to its foot on the line.
    pub sqr_distance: f64,
}

impl LineProjection {
    /// Returns whether the point lies on the segment within `tolerance`.
    ///
    /// Accepts `t` in `[-tolerance, 1 + tolerance]` and a squared distance of
    /// at most `tolerance`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mesh_skinning::project_to_line;
    /// use nalgebra::Point3;
    ///
    /// let a = Point3::new(0.0, 0.0, 0.0);
    /// let b = Point3::new(10.0, 0.0, 0.0);
    ///
    /// assert!(project_to_line(&Point3::new(5.0, 0.0, 0.0), &a, &b).is_on_segment(1e-7));
    /// assert!(!project_to_line(&Point3::new(20.0, 0.0, 0.0), &a, &b).is_on_segment(1e-7));
    /// ```
    #[inline]
    #[must_use]
    pub fn is_on_segment(&self, tolerance: f64) -> bool {
        self.t >= -tolerance && self.t <= 1.0 + tolerance && self.sqr_distance <= tolerance
    }
}

/// Projects `point` onto the line through `start` and `end`.
///
/// A zero-length segment has no parameterization, so `t` is NaN and
/// [`LineProjection::is_on_segment`] is false for every point.
///
/// # Examples
///
/// ```
/// use mesh_skinning::project_to_line;
/// use nalgebra::Point3;
///
/// let proj = project_to_line(
///     &Point3::new(2.5, 3.0, 0.0),
///     &Point3::new(0.0, 0.0, 0.0),
///     &Point3::new(10.0, 0.0, 0.0),
/// );
///
/// assert!((proj.t - 0.25).abs() < 1e-12);
/// assert!((proj.sqr_distance - 9.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn project_to_line(
    point: &Point3<f64>,
    start: &Point3<f64>,
    end: &Point3<f64>,
) -> LineProjection {
    let axis = end - start;
    let to_point = point - start;
    let axis_len_sq = axis.norm_squared();

    if axis_len_sq <= f64::MIN_POSITIVE {
        return LineProjection {
            t: f64::NAN,
            sqr_distance: to_point.norm_squared(),
        };
    }

    let t = to_point.dot(&axis) / axis_len_sq;
    let foot = start + axis * t;

    LineProjection {
        t,
        sqr_distance: (point - foot).norm_squared(),
    }
}
