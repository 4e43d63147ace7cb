use serde::Serialize;

use crate::catalog::AnchorRule;
use crate::geometry::{Boundary, Rect, Segment};
use crate::math::distance_2d::point_to_segment_dist;
use crate::math::{Point2, LINEAR_TOLERANCE};
use crate::plot::PlotMetadata;

/// Where a room is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    /// Flush against a boundary edge.
    Edge(usize),
    /// Flush against an already placed room.
    Interior,
}

/// Axis-aligned frame of a boundary edge: rooms are laid along the edge's
/// dominant axis and grow along the inward normal.
#[derive(Debug, Clone, Copy)]
pub struct EdgeFrame {
    pub edge: usize,
    segment: Segment,
    horizontal: bool,
    /// +1 when the interior lies towards increasing normal coordinate.
    inward: f64,
    pub lo: f64,
    pub hi: f64,
}

impl EdgeFrame {
    /// Frame of boundary edge `edge`; `None` for a zero-length edge.
    #[must_use]
    pub fn new(boundary: &Boundary, edge: usize) -> Option<Self> {
        let segment = boundary.edge(edge);
        let d = segment.direction().ok()?;
        let horizontal = d.x.abs() >= d.y.abs();
        let (inward, a, b) = if horizontal {
            (d.x.signum(), segment.start.x, segment.end.x)
        } else {
            (-d.y.signum(), segment.start.y, segment.end.y)
        };
        Some(Self {
            edge,
            segment,
            horizontal,
            inward,
            lo: a.min(b),
            hi: a.max(b),
        })
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.hi - self.lo
    }

    /// Normal-axis coordinate of the edge line at along-axis coordinate `s`.
    fn normal_at(&self, s: f64) -> f64 {
        let (a, b) = (self.segment.start, self.segment.end);
        let (a_s, a_n, b_s, b_n) = if self.horizontal {
            (a.x, a.y, b.x, b.y)
        } else {
            (a.y, a.x, b.y, b.x)
        };
        if (b_s - a_s).abs() < LINEAR_TOLERANCE {
            return a_n;
        }
        a_n + (b_n - a_n) * (s - a_s) / (b_s - a_s)
    }

    /// Rectangle spanning `[start, start + along]` on the edge, `depth` deep,
    /// flush with the innermost point of the edge over that span.
    #[must_use]
    pub fn rect_at(&self, start: f64, along: f64, depth: f64) -> Rect {
        let n0 = self.normal_at(start);
        let n1 = self.normal_at(start + along);
        let base = if self.inward > 0.0 { n0.max(n1) } else { n0.min(n1) };
        let far = base + self.inward * depth;
        if self.horizontal {
            Rect::from_corners(Point2::new(start, base), Point2::new(start + along, far))
        } else {
            Rect::from_corners(Point2::new(base, start), Point2::new(far, start + along))
        }
    }

    /// Projection of `rect` onto the along axis.
    #[must_use]
    pub fn project(&self, rect: &Rect) -> (f64, f64) {
        if self.horizontal {
            (rect.min.x, rect.max.x)
        } else {
            (rect.min.y, rect.max.y)
        }
    }

    /// True when a side of `rect` lies on this edge.
    #[must_use]
    pub fn is_touched_by(&self, rect: &Rect) -> bool {
        let on_edge = rect
            .to_polygon()
            .iter()
            .filter(|c| point_to_segment_dist(c, &self.segment.start, &self.segment.end) < LINEAR_TOLERANCE)
            .count();
        on_edge >= 2
    }

    /// Along-axis length not yet covered by rooms touching this edge.
    #[must_use]
    pub fn free_span(&self, placed: &[Rect]) -> f64 {
        let mut covered: Vec<(f64, f64)> = placed
            .iter()
            .filter(|r| self.is_touched_by(r))
            .map(|r| {
                let (a, b) = self.project(r);
                (a.max(self.lo), b.min(self.hi))
            })
            .filter(|(a, b)| b > a)
            .collect();
        covered.sort_by(|x, y| x.0.total_cmp(&y.0));
        let mut total = 0.0;
        let mut reach = f64::NEG_INFINITY;
        for (a, b) in covered {
            let start = a.max(reach);
            if b > start {
                total += b - start;
            }
            reach = reach.max(b);
        }
        self.span() - total
    }

    /// Candidate start positions for a room `along` long.
    ///
    /// Always includes both ends of the edge. `snap` adds positions flush
    /// with or aligned to placed rooms; `step` adds evenly spaced positions.
    #[must_use]
    pub fn positions(&self, along: f64, placed: &[Rect], snap: bool, step: Option<f64>) -> Vec<f64> {
        let last = self.hi - along;
        if last < self.lo - LINEAR_TOLERANCE {
            return Vec::new();
        }
        let mut out = vec![self.lo, last];
        if snap {
            for r in placed {
                let (a, b) = self.project(r);
                out.extend([b, a - along, a, b - along]);
            }
        }
        if let Some(step) = step.filter(|s| *s > LINEAR_TOLERANCE) {
            let mut s = self.lo + step;
            while s < last {
                out.push(s);
                s += step;
            }
        }
        let mut out: Vec<f64> = out
            .into_iter()
            .filter(|s| *s >= self.lo - LINEAR_TOLERANCE && *s <= last + LINEAR_TOLERANCE)
            .map(|s| s.clamp(self.lo, last.max(self.lo)))
            .collect();
        out.sort_by(f64::total_cmp);
        out.dedup_by(|a, b| (*a - *b).abs() < LINEAR_TOLERANCE);
        out
    }
}

/// Rectangles flush against the free sides of a placed room.
#[must_use]
pub fn interior_candidates(host: &Rect, along: f64, depth: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(12);
    let xs = [host.min.x, host.max.x - along, host.center().x - along / 2.0];
    let ys = [host.min.y, host.max.y - along, host.center().y - along / 2.0];
    for x in xs {
        out.push(Rect::from_origin_size(x, host.max.y, along, depth));
        out.push(Rect::from_origin_size(x, host.min.y - depth, along, depth));
    }
    for y in ys {
        out.push(Rect::from_origin_size(host.max.x, y, depth, along));
        out.push(Rect::from_origin_size(host.min.x - depth, y, depth, along));
    }
    out
}

/// Orders the sites for an anchor rule, most preferred first.
#[must_use]
pub fn rank_sites(
    rule: AnchorRule,
    boundary: &Boundary,
    metadata: &PlotMetadata,
    frames: &[EdgeFrame],
    placed: &[Rect],
    needs_exterior: bool,
) -> Vec<Site> {
    let road = metadata.road_edge;
    let entry = metadata.entry_point;
    let n = boundary.len();
    let mid_dist = |f: &EdgeFrame| (boundary.edge(f.edge).midpoint() - entry).norm();
    let by = |key: &dyn Fn(&EdgeFrame) -> f64, descending: bool| {
        let mut edges: Vec<&EdgeFrame> = frames.iter().collect();
        edges.sort_by(|a, b| {
            let ord = key(a).total_cmp(&key(b));
            let ord = if descending { ord.reverse() } else { ord };
            ord.then(a.edge.cmp(&b.edge))
        });
        edges.into_iter().map(|f| f.edge).collect::<Vec<_>>()
    };

    let mut edges: Vec<usize> = match rule {
        AnchorRule::RoadEdge | AnchorRule::NearPublic => {
            let mut order = vec![road];
            if matches!(rule, AnchorRule::NearPublic) {
                order.extend([(road + 1) % n, (road + n - 1) % n]);
            }
            order.extend(by(&mid_dist, false));
            order
        }
        AnchorRule::FarFromEntry => by(&mid_dist, true),
        AnchorRule::AnyExterior | AnchorRule::Corner | AnchorRule::Interior => {
            by(&|f: &EdgeFrame| f.free_span(placed), true)
        }
        AnchorRule::Orientation(quadrant) => {
            let facing = quadrant.direction(metadata.north_angle_deg.unwrap_or(0.0));
            by(
                &|f: &EdgeFrame| {
                    boundary
                        .edge(f.edge)
                        .left_normal()
                        .map_or(f64::NEG_INFINITY, |n| -n.dot(&facing))
                },
                true,
            )
        }
    };
    let mut seen = vec![false; n];
    edges.retain(|e| {
        let keep = frames.iter().any(|f| f.edge == *e) && !seen[*e];
        seen[*e] = true;
        keep
    });

    let mut sites: Vec<Site> = Vec::with_capacity(edges.len() + 1);
    if matches!(rule, AnchorRule::Interior) {
        sites.push(Site::Interior);
    }
    sites.extend(edges.into_iter().map(Site::Edge));
    if !needs_exterior && !sites.contains(&Site::Interior) {
        sites.push(Site::Interior);
    }
    sites
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::PlotConfig;
    use crate::plot::PlotAnalyzer;
    use approx::assert_relative_eq;

    fn plot(points: Vec<Point2>) -> (Boundary, PlotMetadata) {
        let config = PlotConfig::default();
        let analyzed = PlotAnalyzer::new(points, None, &config).execute().unwrap();
        (analyzed.buildable, analyzed.metadata)
    }

    fn rect_60x40() -> (Boundary, PlotMetadata) {
        plot(vec![
            Point2::new(0.0, 0.0),
            Point2::new(60.0, 0.0),
            Point2::new(60.0, 40.0),
            Point2::new(0.0, 40.0),
        ])
    }

    #[test]
    fn frames_grow_inward() {
        let (b, _) = rect_60x40();
        let bottom = EdgeFrame::new(&b, 0).unwrap();
        let r = bottom.rect_at(5.0, 10.0, 18.0);
        assert_relative_eq!(r.min.y, 0.0);
        assert_relative_eq!(r.max.y, 18.0);
        let top = EdgeFrame::new(&b, 2).unwrap();
        let r = top.rect_at(5.0, 10.0, 8.0);
        assert_relative_eq!(r.max.y, 40.0);
        assert_relative_eq!(r.min.y, 32.0);
        let right = EdgeFrame::new(&b, 1).unwrap();
        let r = right.rect_at(0.0, 12.0, 10.0);
        assert_relative_eq!(r.max.x, 60.0);
        assert_relative_eq!(r.min.x, 50.0);
        assert_relative_eq!(r.height(), 12.0);
    }

    #[test]
    fn slanted_edge_uses_innermost_point() {
        let (b, _) = plot(vec![
            Point2::new(0.0, 0.0),
            Point2::new(40.0, 10.0),
            Point2::new(40.0, 40.0),
            Point2::new(0.0, 40.0),
        ]);
        let frame = EdgeFrame::new(&b, 0).unwrap();
        let r = frame.rect_at(0.0, 20.0, 10.0);
        assert_relative_eq!(r.min.y, 5.0);
        assert!(b.contains_rect(&r, 1e-6));
    }

    #[test]
    fn positions_include_snaps() {
        let (b, _) = rect_60x40();
        let bottom = EdgeFrame::new(&b, 0).unwrap();
        let placed = [Rect::from_origin_size(0.0, 0.0, 10.0, 18.0)];
        let pos = bottom.positions(10.0, &placed, true, None);
        assert!(pos.iter().any(|p| (p - 10.0).abs() < 1e-9));
        assert!(pos.iter().all(|p| *p >= 0.0 && *p <= 50.0));
    }

    #[test]
    fn free_span_subtracts_touching_rooms() {
        let (b, _) = rect_60x40();
        let bottom = EdgeFrame::new(&b, 0).unwrap();
        let placed = [
            Rect::from_origin_size(0.0, 0.0, 10.0, 18.0),
            Rect::from_origin_size(5.0, 0.0, 10.0, 8.0),
            Rect::from_origin_size(30.0, 20.0, 10.0, 8.0),
        ];
        assert_relative_eq!(bottom.free_span(&placed), 45.0);
    }

    #[test]
    fn far_from_entry_prefers_back_edge() {
        let (b, m) = rect_60x40();
        let frames: Vec<EdgeFrame> = (0..b.len()).filter_map(|i| EdgeFrame::new(&b, i)).collect();
        let sites = rank_sites(AnchorRule::FarFromEntry, &b, &m, &frames, &[], true);
        assert_eq!(sites[0], Site::Edge(2));
        assert_eq!(sites.len(), 4);
        let sites = rank_sites(AnchorRule::Interior, &b, &m, &frames, &[], false);
        assert_eq!(sites[0], Site::Interior);
        assert_eq!(sites.len(), 5);
    }

    #[test]
    fn orientation_faces_quadrant() {
        let (b, m) = rect_60x40();
        let frames: Vec<EdgeFrame> = (0..b.len()).filter_map(|i| EdgeFrame::new(&b, i)).collect();
        let rule = AnchorRule::Orientation(crate::catalog::Quadrant::NorthEast);
        let sites = rank_sites(rule, &b, &m, &frames, &[], true);
        // North-east with north up: the right edge (index 1) ties with the
        // top edge (index 2); the lower index wins.
        assert_eq!(sites[0], Site::Edge(1));
        assert_eq!(sites[1], Site::Edge(2));
    }
}
