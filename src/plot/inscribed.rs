use crate::geometry::{Boundary, Rect};
use crate::math::{Point2, LINEAR_TOLERANCE};

/// Largest axis-aligned rectangle inside `boundary`, searched over the
/// vertex coordinates plus `samples` evenly spaced coordinates per axis.
///
/// For every pair of x coordinates the horizontal strips between consecutive
/// y coordinates are tested for containment; the longest run of contained
/// strips gives the tallest rectangle over that x span.
#[must_use]
pub fn largest_inscribed_rect(boundary: &Boundary, samples: usize) -> Option<Rect> {
    let bbox = boundary.bounding_box();
    let xs = candidate_coords(boundary.points().iter().map(|p| p.x), bbox.min.x, bbox.max.x, samples);
    let ys = candidate_coords(boundary.points().iter().map(|p| p.y), bbox.min.y, bbox.max.y, samples);

    let mut best: Option<Rect> = None;
    for (i, &x0) in xs.iter().enumerate() {
        for &x1 in &xs[i + 1..] {
            let mut run_start: Option<f64> = None;
            for pair in ys.windows(2) {
                let strip = Rect::from_corners(
                    Point2::new(x0, pair[0]),
                    Point2::new(x1, pair[1]),
                );
                if boundary.contains_rect(&strip, LINEAR_TOLERANCE * strip.area().max(1.0)) {
                    let y0 = *run_start.get_or_insert(pair[0]);
                    let candidate = Rect::from_corners(
                        Point2::new(x0, y0),
                        Point2::new(x1, pair[1]),
                    );
                    if best.is_none_or(|b| candidate.area() > b.area() + LINEAR_TOLERANCE) {
                        best = Some(candidate);
                    }
                } else {
                    run_start = None;
                }
            }
        }
    }
    best
}

fn candidate_coords(
    vertex_coords: impl Iterator<Item = f64>,
    lo: f64,
    hi: f64,
    samples: usize,
) -> Vec<f64> {
    let mut coords: Vec<f64> = vertex_coords.collect();
    #[allow(clippy::cast_precision_loss)]
    let step = (hi - lo) / (samples + 1) as f64;
    #[allow(clippy::cast_precision_loss)]
    coords.extend((1..=samples).map(|k| lo + step * k as f64));
    coords.sort_by(f64::total_cmp);
    coords.dedup_by(|a, b| (*a - *b).abs() < LINEAR_TOLERANCE);
    coords
}
