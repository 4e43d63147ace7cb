use crate::error::Result;
use crate::geometry::Segment;
use crate::math::{Point2, TOLERANCE};

/// Builds the outline of a straight wall around its centreline.
///
/// `left_width` is the offset distance to the left of the segment direction;
/// `right_width` is the offset distance to the right. Pass equal values for a
/// centred wall; pass `(0, thickness)` or `(thickness, 0)` for a wall that
/// extends only to one side of the baseline.
///
/// The band is returned counter-clockwise as
/// `[right_start, right_end, left_end, left_start]`.
#[derive(Debug)]
pub struct WallBand2D {
    centreline: Segment,
    left_width: f64,
    right_width: f64,
}

impl WallBand2D {
    /// Creates a new wall band operation.
    #[must_use]
    pub fn new(centreline: Segment, left_width: f64, right_width: f64) -> Self {
        Self {
            centreline,
            left_width,
            right_width,
        }
    }

    /// Creates a band of total `thickness` centred on the centreline.
    #[must_use]
    pub fn centred(centreline: Segment, thickness: f64) -> Self {
        Self::new(centreline, thickness / 2.0, thickness / 2.0)
    }

    /// Executes the band construction.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if the centreline has zero length.
    pub fn execute(&self) -> Result<Vec<Point2>> {
        let normal = self.centreline.left_normal()?;
        let Segment { start, end } = self.centreline;
        if (self.left_width + self.right_width).abs() < TOLERANCE {
            return Ok(vec![start, end]);
        }
        let left = normal * self.left_width;
        let right = normal * self.right_width;
        Ok(vec![start - right, end - right, end + left, start + left])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::signed_area_2d;
    use approx::assert_relative_eq;

    #[test]
    fn centred_band() {
        let seg = Segment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let band = WallBand2D::centred(seg, 0.5).execute().unwrap();
        assert_eq!(band.len(), 4);
        assert_relative_eq!(band[0].y, -0.25);
        assert_relative_eq!(band[2].y, 0.25);
        assert_relative_eq!(signed_area_2d(&band), 5.0);
    }

    #[test]
    fn one_sided_band() {
        let seg = Segment::new(Point2::new(0.0, 0.0), Point2::new(0.0, 4.0));
        let band = WallBand2D::new(seg, 0.0, 1.0).execute().unwrap();
        // Right of an upward segment is +x.
        assert_relative_eq!(band[0].x, 1.0);
        assert_relative_eq!(band[3].x, 0.0);
        assert_relative_eq!(signed_area_2d(&band), 4.0);
    }

    #[test]
    fn zero_length_centreline_fails() {
        let p = Point2::new(2.0, 2.0);
        assert!(WallBand2D::centred(Segment::new(p, p), 1.0).execute().is_err());
    }
}
