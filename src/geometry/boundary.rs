use serde::Serialize;

use super::{Rect, Segment};
use crate::error::{BoundaryError, GeometryError};
use crate::math::clip_2d::intersection_area_2d;
use crate::math::intersect_2d::{collinear_overlap_2d, segment_segment_intersect_2d};
use crate::math::polygon_2d::{
    centroid_2d, contains_point_2d, longest_edge, normalize_ccw, open_ring, signed_area_2d,
};
use crate::math::{Point2, LINEAR_TOLERANCE};

/// A validated plot outline: simple, non-degenerate, counter-clockwise.
///
/// Edge `i` runs from vertex `i` to vertex `i + 1` (wrapping).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Boundary {
    points: Vec<Point2>,
}

impl Boundary {
    /// Accepts an open or explicitly closed ring.
    ///
    /// # Errors
    ///
    /// - `BoundaryError::NonFinite` for NaN or infinite coordinates
    /// - `BoundaryError::TooFewVertices` for fewer than 3 distinct vertices
    /// - `BoundaryError::ZeroArea` when the ring encloses no area
    /// - `BoundaryError::SelfIntersecting` when two edges cross or fold back
    pub fn new(points: &[Point2]) -> Result<Self, BoundaryError> {
        if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(BoundaryError::NonFinite);
        }
        let ring = open_ring(points);
        if ring.len() < 3 {
            return Err(BoundaryError::TooFewVertices { count: ring.len() });
        }
        if signed_area_2d(&ring).abs() < LINEAR_TOLERANCE {
            return Err(BoundaryError::ZeroArea);
        }
        if let Some((first, second)) = find_self_intersection(&ring) {
            return Err(BoundaryError::SelfIntersecting { first, second });
        }
        Ok(Self {
            points: normalize_ccw(&ring),
        })
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn vertex(&self, i: usize) -> Point2 {
        self.points[i % self.points.len()]
    }

    /// Edge `i`, from vertex `i` to vertex `i + 1`.
    #[must_use]
    pub fn edge(&self, i: usize) -> Segment {
        Segment::new(self.vertex(i), self.vertex(i + 1))
    }

    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.points.len()).map(|i| self.edge(i))
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.edges().map(|e| e.length()).sum()
    }

    /// Area centroid.
    ///
    /// # Errors
    ///
    /// Never fails for an accepted boundary; kept fallible for the kernel call.
    pub fn centroid(&self) -> Result<Point2, GeometryError> {
        centroid_2d(&self.points)
    }

    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        Rect::enclosing(&self.points).unwrap_or(Rect {
            min: Point2::origin(),
            max: Point2::origin(),
        })
    }

    /// Index of the longest edge, lowest index on ties.
    #[must_use]
    pub fn longest_edge(&self) -> usize {
        longest_edge(&self.points).unwrap_or(0)
    }

    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        contains_point_2d(&self.points, p)
    }

    /// Area of `rect` lying inside the boundary.
    #[must_use]
    pub fn covered_area(&self, rect: &Rect) -> f64 {
        intersection_area_2d(&self.points, &rect.to_polygon())
    }

    /// True when `rect` lies inside the boundary up to `tol` square units.
    #[must_use]
    pub fn contains_rect(&self, rect: &Rect, tol: f64) -> bool {
        self.covered_area(rect) >= rect.area() - tol
    }

    /// Boundary scaled uniformly about its centroid by `factor`.
    ///
    /// # Errors
    ///
    /// Returns a `BoundaryError` if the scaled ring is no longer valid.
    pub fn scaled(&self, factor: f64) -> Result<Self, BoundaryError> {
        let c = centroid_2d(&self.points).map_err(|_| BoundaryError::ZeroArea)?;
        let scaled: Vec<Point2> = self.points.iter().map(|p| c + (p - c) * factor).collect();
        Self::new(&scaled)
    }
}

fn find_self_intersection(ring: &[Point2]) -> Option<(usize, usize)> {
    let n = ring.len();
    for i in 0..n {
        let (a0, a1) = (ring[i], ring[(i + 1) % n]);
        for j in (i + 1)..n {
            let (b0, b1) = (ring[j], ring[(j + 1) % n]);
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            // Adjacent edges meet at a vertex; only a fold-back counts.
            if collinear_overlap_2d(&a0, &a1, &b0, &b1, LINEAR_TOLERANCE).is_some() {
                return Some((i, j));
            }
            if !adjacent && segment_segment_intersect_2d(&a0, &a1, &b0, &b1).is_some() {
                return Some((i, j));
            }
        }
    }
    None
}
