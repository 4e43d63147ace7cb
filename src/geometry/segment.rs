use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::math::intersect_2d::collinear_overlap_2d;
use crate::math::polygon_2d::{left_normal, segment_direction};
use crate::math::{Point2, Vector2};

/// A straight line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    /// Creates a segment from `start` to `end`.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        nalgebra::center(&self.start, &self.end)
    }

    /// Unit direction from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` for a zero-length segment.
    pub fn direction(&self) -> Result<Vector2, GeometryError> {
        segment_direction(&self.start, &self.end)
    }

    /// Unit normal pointing to the left of the walking direction.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` for a zero-length segment.
    pub fn left_normal(&self) -> Result<Vector2, GeometryError> {
        Ok(left_normal(self.direction()?))
    }

    /// Point at parameter `t` (0 = start, 1 = end).
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.start + (self.end - self.start) * t
    }

    /// Parallel copy shifted perpendicular by `distance` (positive = left).
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` for a zero-length segment.
    pub fn offset(&self, distance: f64) -> Result<Self, GeometryError> {
        let shift = self.left_normal()? * distance;
        Ok(Self::new(self.start + shift, self.end + shift))
    }

    /// Shared sub-segment with a collinear `other`, oriented along `self`.
    #[must_use]
    pub fn overlap(&self, other: &Self, tol: f64) -> Option<Self> {
        collinear_overlap_2d(&self.start, &self.end, &other.start, &other.end, tol)
            .map(|(s, e)| Self::new(s, e))
    }
}
