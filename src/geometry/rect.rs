use serde::{Deserialize, Serialize};

use super::Segment;
use crate::math::Point2;

/// An axis-aligned rectangle given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point2,
    pub max: Point2,
}

impl Rect {
    /// Creates a rectangle from two opposite corners in any order.
    #[must_use]
    pub fn from_corners(a: Point2, b: Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates a rectangle from its lower-left corner and size.
    #[must_use]
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_corners(Point2::new(x, y), Point2::new(x + width, y + height))
    }

    /// Smallest rectangle enclosing all points; `None` for an empty slice.
    #[must_use]
    pub fn enclosing(points: &[Point2]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self { min, max })
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        nalgebra::center(&self.min, &self.max)
    }

    #[must_use]
    pub fn min_side(&self) -> f64 {
        self.width().min(self.height())
    }

    /// Long side over short side; infinite for a degenerate rectangle.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        let short = self.min_side();
        if short <= 0.0 {
            return f64::INFINITY;
        }
        self.width().max(self.height()) / short
    }

    /// Overlapping region, or `None` if the interiors are disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let min = Point2::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = Point2::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));
        (max.x > min.x && max.y > min.y).then_some(Self { min, max })
    }

    #[must_use]
    pub fn overlap_area(&self, other: &Self) -> f64 {
        self.intersection(other).map_or(0.0, |r| r.area())
    }

    /// True when the rectangles touch or overlap within `tol`.
    #[must_use]
    pub fn touches(&self, other: &Self, tol: f64) -> bool {
        self.min.x <= other.max.x + tol
            && other.min.x <= self.max.x + tol
            && self.min.y <= other.max.y + tol
            && other.min.y <= self.max.y + tol
    }

    /// Common boundary portion with an abutting rectangle.
    ///
    /// Vertical edges run bottom to top, horizontal edges left to right.
    /// Returns `None` when the rectangles do not share a side over more than
    /// `tol`.
    #[must_use]
    pub fn shared_edge(&self, other: &Self, tol: f64) -> Option<Segment> {
        let vertical = if (self.max.x - other.min.x).abs() <= tol {
            Some(self.max.x)
        } else if (self.min.x - other.max.x).abs() <= tol {
            Some(self.min.x)
        } else {
            None
        };
        if let Some(x) = vertical {
            let lo = self.min.y.max(other.min.y);
            let hi = self.max.y.min(other.max.y);
            if hi - lo > tol {
                return Some(Segment::new(Point2::new(x, lo), Point2::new(x, hi)));
            }
        }
        let horizontal = if (self.max.y - other.min.y).abs() <= tol {
            Some(self.max.y)
        } else if (self.min.y - other.max.y).abs() <= tol {
            Some(self.min.y)
        } else {
            None
        };
        if let Some(y) = horizontal {
            let lo = self.min.x.max(other.min.x);
            let hi = self.max.x.min(other.max.x);
            if hi - lo > tol {
                return Some(Segment::new(Point2::new(lo, y), Point2::new(hi, y)));
            }
        }
        None
    }

    /// Point containment, boundary inclusive.
    #[must_use]
    pub fn contains_point(&self, p: &Point2, tol: f64) -> bool {
        p.x >= self.min.x - tol
            && p.x <= self.max.x + tol
            && p.y >= self.min.y - tol
            && p.y <= self.max.y + tol
    }

    /// Corners in counter-clockwise order, starting at `min`.
    #[must_use]
    pub fn to_polygon(&self) -> Vec<Point2> {
        vec![
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }

    /// Sides in counter-clockwise order: bottom, right, top, left.
    #[must_use]
    pub fn edges(&self) -> [Segment; 4] {
        let ring = self.to_polygon();
        [
            Segment::new(ring[0], ring[1]),
            Segment::new(ring[1], ring[2]),
            Segment::new(ring[2], ring[3]),
            Segment::new(ring[3], ring[0]),
        ]
    }
}
