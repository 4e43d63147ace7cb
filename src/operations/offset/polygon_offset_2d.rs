use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::{line_line_intersect_2d, point_at};
use crate::math::polygon_2d::{left_normal, segment_direction, signed_area_2d};
use crate::math::{Point2, Vector2, TOLERANCE};

/// Maximum miter distance as a multiple of `|distance|`. When the miter
/// extends further than this, a bevel (two points) is used instead.
const MITER_LIMIT: f64 = 4.0;

/// Offsets a closed polygon by a signed distance.
///
/// # Sign Convention
///
/// - Positive distance: left offset (inward for a counter-clockwise ring)
/// - Negative distance: right offset (outward for a counter-clockwise ring)
///
/// Corners use miter joins, falling back to a bevel when the miter would
/// exceed [`MITER_LIMIT`] times the distance.
#[derive(Debug)]
pub struct PolygonOffset2D {
    points: Vec<Point2>,
    distance: f64,
}

impl PolygonOffset2D {
    /// Creates a new polygon offset operation.
    #[must_use]
    pub fn new(points: Vec<Point2>, distance: f64) -> Self {
        Self { points, distance }
    }

    /// Executes the offset.
    ///
    /// # Errors
    ///
    /// - `GeometryError::Degenerate` if fewer than 3 points are provided or
    ///   the whole ring collapses (fewer than 3 edges survive, or the area
    ///   vanishes, flips sign or grows on an inward offset)
    /// - `GeometryError::ZeroVector` if the ring has a zero-length edge
    pub fn execute(&self) -> Result<Vec<Point2>> {
        let n = self.points.len();
        if n < 3 {
            return Err(GeometryError::Degenerate(format!(
                "polygon offset needs at least 3 points, got {n}"
            ))
            .into());
        }
        if self.distance.abs() < TOLERANCE {
            return Ok(self.points.clone());
        }

        // Offset each edge along its left normal.
        let mut offset_segments: Vec<(Point2, Point2)> = Vec::with_capacity(n);
        let mut directions: Vec<Vector2> = Vec::with_capacity(n);
        let mut lengths: Vec<f64> = Vec::with_capacity(n);
        for i in 0..n {
            let j = (i + 1) % n;
            let dir = segment_direction(&self.points[i], &self.points[j])?;
            let shift = left_normal(dir) * self.distance;
            offset_segments.push((self.points[i] + shift, self.points[j] + shift));
            directions.push(dir);
            lengths.push((self.points[j] - self.points[i]).norm());
        }

        // Edges shorter than the join consumes drop out; their neighbours are
        // joined directly until every remaining edge runs forwards.
        let mut active: Vec<usize> = (0..n).collect();
        let corners = loop {
            if active.len() < 3 {
                return Err(GeometryError::Degenerate(format!(
                    "offset by {} collapsed the polygon",
                    self.distance
                ))
                .into());
            }
            let corners = join_corners(&active, &offset_segments, &self.points, self.distance);
            match consumed_edge(&active, &corners, &directions, &lengths) {
                Some(k) => {
                    active.remove(k);
                }
                None => break corners,
            }
        };

        let result: Vec<Point2> = corners.into_iter().flatten().collect();
        let original_area = signed_area_2d(&self.points);
        let result_area = signed_area_2d(&result);
        let is_inward = original_area * self.distance > 0.0;
        if result_area.abs() < TOLERANCE
            || result_area * original_area < 0.0
            || (is_inward && result_area.abs() > original_area.abs())
        {
            return Err(GeometryError::Degenerate(format!(
                "offset by {} collapsed the polygon",
                self.distance
            ))
            .into());
        }
        Ok(result)
    }
}

/// Joins each surviving offset edge to the previous one.
fn join_corners(
    active: &[usize],
    offset_segments: &[(Point2, Point2)],
    points: &[Point2],
    distance: f64,
) -> Vec<Vec<Point2>> {
    let m = active.len();
    (0..m)
        .map(|k| {
            let prev = active[(k + m - 1) % m];
            let cur = active[k];
            corner_points(&offset_segments[prev], &offset_segments[cur], &points[cur], distance)
        })
        .collect()
}

/// Position in `active` of the edge to drop: among the edges whose offset
/// runs backwards between its two corners, the shortest (lowest index on
/// ties).
fn consumed_edge(
    active: &[usize],
    corners: &[Vec<Point2>],
    directions: &[Vector2],
    lengths: &[f64],
) -> Option<usize> {
    let m = active.len();
    let mut best: Option<usize> = None;
    for k in 0..m {
        let (Some(start), Some(end)) = (corners[k].last(), corners[(k + 1) % m].first()) else {
            continue;
        };
        if (end - start).dot(&directions[active[k]]) >= -TOLERANCE {
            continue;
        }
        if best.is_none_or(|b| lengths[active[k]] < lengths[active[b]]) {
            best = Some(k);
        }
    }
    best
}

/// Corner between two consecutive offset edges: one miter point, or two
/// bevel points when the miter is too long.
fn corner_points(
    seg_prev: &(Point2, Point2),
    seg_next: &(Point2, Point2),
    original_corner: &Point2,
    distance: f64,
) -> Vec<Point2> {
    let d_prev = seg_prev.1 - seg_prev.0;
    let d_next = seg_next.1 - seg_next.0;
    let Some((t, _)) = line_line_intersect_2d(&seg_prev.1, &d_prev, &seg_next.0, &d_next) else {
        // Collinear continuation: both offset edges already meet.
        return vec![seg_next.0];
    };
    let corner = point_at(&seg_prev.1, &d_prev, t);
    let limit = MITER_LIMIT * distance.abs();
    if (corner - original_corner).norm_squared() > limit * limit {
        vec![seg_prev.1, seg_next.0]
    } else {
        vec![corner]
    }
}
