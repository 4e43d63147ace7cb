use super::{Point2, Vector2, LINEAR_TOLERANCE, TOLERANCE};
use crate::error::GeometryError;

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns the ring in counter-clockwise order.
#[must_use]
pub fn normalize_ccw(points: &[Point2]) -> Vec<Point2> {
    if signed_area_2d(points) < 0.0 {
        points.iter().rev().copied().collect()
    } else {
        points.to_vec()
    }
}

/// Drops an explicit closing vertex and consecutive duplicates.
#[must_use]
pub fn open_ring(points: &[Point2]) -> Vec<Point2> {
    let mut ring: Vec<Point2> = Vec::with_capacity(points.len());
    for &pt in points {
        if ring
            .last()
            .is_some_and(|last| (pt - *last).norm() < LINEAR_TOLERANCE)
        {
            continue;
        }
        ring.push(pt);
    }
    while ring.len() > 1 {
        let first = ring[0];
        let last = ring[ring.len() - 1];
        if (last - first).norm() < LINEAR_TOLERANCE {
            ring.pop();
        } else {
            break;
        }
    }
    ring
}

/// Area centroid of a simple polygon.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` if the polygon has (almost) no area.
pub fn centroid_2d(points: &[Point2]) -> Result<Point2, GeometryError> {
    let area = signed_area_2d(points);
    if area.abs() < TOLERANCE {
        return Err(GeometryError::Degenerate(format!(
            "centroid of a polygon with area {area}"
        )));
    }
    let n = points.len();
    let (mut cx, mut cy) = (0.0, 0.0);
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        let cross = p.x * q.y - q.x * p.y;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    Ok(Point2::new(cx / (6.0 * area), cy / (6.0 * area)))
}

/// Point-in-polygon test. Points on the boundary count as inside.
#[must_use]
pub fn contains_point_2d(points: &[Point2], p: &Point2) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        if super::distance_2d::point_to_segment_dist(p, &a, &b) < LINEAR_TOLERANCE {
            return true;
        }
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

/// Index of the longest edge (edge `i` runs from vertex `i` to `i + 1`).
///
/// Ties keep the lowest index.
#[must_use]
pub fn longest_edge(points: &[Point2]) -> Option<usize> {
    let n = points.len();
    let mut best: Option<(usize, f64)> = None;
    for i in 0..n {
        let len = (points[(i + 1) % n] - points[i]).norm();
        match best {
            Some((_, best_len)) if len <= best_len + LINEAR_TOLERANCE => {}
            _ => best = Some((i, len)),
        }
    }
    best.map(|(i, _)| i)
}

/// Computes the normalized direction from point `a` to point `b`.
///
/// # Errors
///
/// Returns `GeometryError::ZeroVector` if the segment has zero length.
pub fn segment_direction(a: &Point2, b: &Point2) -> Result<Vector2, GeometryError> {
    (b - a)
        .try_normalize(TOLERANCE)
        .ok_or(GeometryError::ZeroVector)
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// 2D cross product `a × b`.
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
