use super::polygon_2d::{cross_2d, signed_area_2d};
use super::{Point2, TOLERANCE};

/// Clips `subject` against a convex, counter-clockwise `clip` polygon
/// (Sutherland–Hodgman).
///
/// `subject` may be concave; the result then contains zero-width bridges
/// between its pieces, which do not contribute area.
#[must_use]
pub fn clip_convex_2d(subject: &[Point2], clip: &[Point2]) -> Vec<Point2> {
    let mut output = subject.to_vec();
    let m = clip.len();
    for i in 0..m {
        if output.is_empty() {
            break;
        }
        let edge_a = clip[i];
        let edge_b = clip[(i + 1) % m];
        let input = std::mem::take(&mut output);
        let n = input.len();
        for j in 0..n {
            let current = input[j];
            let previous = input[(j + n - 1) % n];
            let cur_in = is_inside(&current, &edge_a, &edge_b);
            let prev_in = is_inside(&previous, &edge_a, &edge_b);
            if cur_in {
                if !prev_in {
                    output.push(edge_crossing(&previous, &current, &edge_a, &edge_b));
                }
                output.push(current);
            } else if prev_in {
                output.push(edge_crossing(&previous, &current, &edge_a, &edge_b));
            }
        }
    }
    output
}

/// Area of the intersection of `subject` with a convex CCW `clip` polygon.
#[must_use]
pub fn intersection_area_2d(subject: &[Point2], clip: &[Point2]) -> f64 {
    signed_area_2d(&clip_convex_2d(subject, clip)).abs()
}

fn is_inside(p: &Point2, a: &Point2, b: &Point2) -> bool {
    cross_2d(&(b - a), &(p - a)) >= -TOLERANCE
}

fn edge_crossing(p: &Point2, q: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let edge = b - a;
    let seg = q - p;
    let denom = cross_2d(&edge, &seg);
    if denom.abs() < TOLERANCE {
        return *q;
    }
    let t = cross_2d(&edge, &(a - p)) / denom;
    p + seg * t.clamp(0.0, 1.0)
}
