use super::polygon_2d::cross_2d;
use super::{Point2, Vector2, LINEAR_TOLERANCE, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = cross_2d(d1, d2);
    if cross.abs() < TOLERANCE {
        return None;
    }
    let delta = p2 - p1;
    let t = cross_2d(&delta, d2) / cross;
    let u = cross_2d(&delta, d1) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
/// Parallel (including collinear) segments report no intersection; use
/// [`collinear_overlap_2d`] for those.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        Some((point_at(a0, &da, t_clamped), t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Overlapping part of two collinear segments.
///
/// Returns the shared sub-segment oriented along `a0 → a1`, or `None` if the
/// segments are not collinear within `tol` or overlap in less than `tol`.
#[must_use]
pub fn collinear_overlap_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    tol: f64,
) -> Option<(Point2, Point2)> {
    let da = a1 - a0;
    let len_a = da.norm();
    if len_a < LINEAR_TOLERANCE {
        return None;
    }
    let dir = da / len_a;
    let off0 = cross_2d(&dir, &(b0 - a0));
    let off1 = cross_2d(&dir, &(b1 - a0));
    if off0.abs() > tol || off1.abs() > tol {
        return None;
    }
    let s0 = (b0 - a0).dot(&dir);
    let s1 = (b1 - a0).dot(&dir);
    let lo = s0.min(s1).max(0.0);
    let hi = s0.max(s1).min(len_a);
    if hi - lo < tol {
        return None;
    }
    Some((point_at(a0, &dir, lo), point_at(a0, &dir, hi)))
}

/// Linear interpolation: `origin + dir * t`.
#[must_use]
pub fn point_at(origin: &Point2, dir: &Vector2, t: f64) -> Point2 {
    origin + dir * t
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn crossing_segments() {
        let (pt, t, u) =
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0))
                .unwrap();
        assert_relative_eq!(pt.x, 1.0);
        assert_relative_eq!(pt.y, 1.0);
        assert_relative_eq!(t, 0.5);
        assert_relative_eq!(u, 0.5);
    }

    #[test]
    fn disjoint_segments() {
        assert!(segment_segment_intersect_2d(
            &p(0.0, 0.0),
            &p(1.0, 0.0),
            &p(2.0, -1.0),
            &p(2.0, 1.0)
        )
        .is_none());
    }

    #[test]
    fn parallel_lines_do_not_intersect() {
        let d = Vector2::new(1.0, 0.0);
        assert!(line_line_intersect_2d(&p(0.0, 0.0), &d, &p(0.0, 1.0), &d).is_none());
    }

    #[test]
    fn collinear_overlap_partial() {
        let (s, e) =
            collinear_overlap_2d(&p(0.0, 0.0), &p(10.0, 0.0), &p(12.0, 0.0), &p(6.0, 0.0), 1e-6)
                .unwrap();
        assert_relative_eq!(s.x, 6.0);
        assert_relative_eq!(e.x, 10.0);
    }

    #[test]
    fn collinear_overlap_rejects_offset_lines() {
        assert!(
            collinear_overlap_2d(&p(0.0, 0.0), &p(10.0, 0.0), &p(0.0, 1.0), &p(10.0, 1.0), 1e-6)
                .is_none()
        );
    }

    #[test]
    fn collinear_overlap_rejects_point_contact() {
        assert!(
            collinear_overlap_2d(&p(0.0, 0.0), &p(5.0, 0.0), &p(5.0, 0.0), &p(9.0, 0.0), 1e-6)
                .is_none()
        );
    }
}
