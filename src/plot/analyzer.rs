use crate::config::PlotConfig;
use crate::error::Result;
use crate::geometry::{Boundary, Segment};
use crate::math::polygon_2d::{contains_point_2d, cross_2d, left_normal};
use crate::math::clip_2d::intersection_area_2d;
use crate::math::{Point2, LINEAR_TOLERANCE};
use crate::operations::PolygonOffset2D;

use super::{
    largest_inscribed_rect, ColumnGrid, Corner, CornerKind, PlotMetadata, VentilationAxis,
};

/// Number of positions tried along the road edge for the parking slot.
const PARKING_POSITIONS: u32 = 16;

/// A plot after validation, optional rescaling and setback.
#[derive(Debug, Clone)]
pub struct AnalyzedPlot {
    /// The accepted plot outline (after any rescaling).
    pub plot: Boundary,
    /// The buildable footprint rooms are placed in.
    pub buildable: Boundary,
    pub metadata: PlotMetadata,
}

/// Validates a plot outline and derives its [`PlotMetadata`].
#[derive(Debug)]
pub struct PlotAnalyzer<'a> {
    points: Vec<Point2>,
    area_hint: Option<f64>,
    config: &'a PlotConfig,
}

impl<'a> PlotAnalyzer<'a> {
    /// Creates a new plot analysis.
    #[must_use]
    pub fn new(points: Vec<Point2>, area_hint: Option<f64>, config: &'a PlotConfig) -> Self {
        Self {
            points,
            area_hint,
            config,
        }
    }

    /// Runs the analysis.
    ///
    /// # Errors
    ///
    /// - `FloorgenError::InvalidBoundary` if the outline is not a simple
    ///   polygon with at least 3 distinct vertices and positive area
    /// - `FloorgenError::DegenerateGeometry` if the setback collapses the plot
    pub fn execute(&self) -> Result<AnalyzedPlot> {
        let mut plot = Boundary::new(&self.points)?;

        if self.config.scale_to_area_hint {
            if let Some(hint) = self.area_hint.filter(|h| *h > 0.0) {
                let area = plot.area();
                if (area - hint).abs() > 1.0 {
                    tracing::debug!(area, hint, "scaling plot to the area hint");
                    plot = plot.scaled((hint / area).sqrt())?;
                }
            }
        }

        let buildable = if self.config.setback > LINEAR_TOLERANCE {
            let ring = PolygonOffset2D::new(plot.points().to_vec(), self.config.setback).execute()?;
            Boundary::new(&ring)?
        } else {
            plot.clone()
        };

        let metadata = self.analyze(&buildable)?;
        tracing::debug!(
            road_edge = metadata.road_edge,
            grid_feasible = metadata.grid_feasible,
            parking_feasible = metadata.parking_feasible,
            ventilation_axes = metadata.ventilation_axes.len(),
            "plot analyzed"
        );
        Ok(AnalyzedPlot {
            plot,
            buildable,
            metadata,
        })
    }

    fn analyze(&self, boundary: &Boundary) -> Result<PlotMetadata> {
        let road_edge = boundary.longest_edge();
        let corners = classify_corners(boundary, self.config);
        let inscribed_rect = largest_inscribed_rect(boundary, self.config.inscribed_samples);
        let column_grid = inscribed_rect.and_then(|r| {
            column_grid(
                r.width(),
                r.height(),
                self.config.grid_spacing_min,
                self.config.grid_spacing_max,
            )
        });
        let ventilation_axes =
            ventilation_axes(boundary, self.config.ventilation_tolerance_deg);
        let parking_slot = find_parking_slot(boundary, road_edge, &corners, self.config);

        Ok(PlotMetadata {
            area: boundary.area(),
            perimeter: boundary.perimeter(),
            bounding_box: boundary.bounding_box(),
            centroid: boundary.centroid()?,
            road_edge,
            entry_point: boundary.edge(road_edge).midpoint(),
            corners,
            inscribed_rect,
            grid_feasible: column_grid.is_some(),
            column_grid,
            ventilation_axes,
            parking_feasible: parking_slot.is_some(),
            parking_slot,
            area_hint: self.area_hint,
            north_angle_deg: self.config.north_angle_deg,
        })
    }
}

fn classify_corners(boundary: &Boundary, config: &PlotConfig) -> Vec<Corner> {
    let n = boundary.len();
    (0..n)
        .map(|i| {
            let incoming = boundary.edge(i + n - 1);
            let outgoing = boundary.edge(i);
            let d_in = incoming.end - incoming.start;
            let d_out = outgoing.end - outgoing.start;
            let turn = cross_2d(&d_in, &d_out).atan2(d_in.dot(&d_out));
            let interior_angle_deg = 180.0 - turn.to_degrees();
            let (a, b) = (incoming.length(), outgoing.length());
            let edge_ratio = a.min(b) / a.max(b);
            let kind = if interior_angle_deg < config.narrow_corner_angle_deg
                || edge_ratio < config.narrow_edge_ratio
            {
                CornerKind::Narrow
            } else {
                CornerKind::Wide
            };
            Corner {
                vertex: i,
                point: boundary.vertex(i),
                interior_angle_deg,
                edge_ratio,
                kind,
            }
        })
        .collect()
}

/// Widest column spacing within `[min, max]` that divides both sides into
/// whole bays.
fn column_grid(width: f64, height: f64, min: f64, max: f64) -> Option<ColumnGrid> {
    let (spacing_x, bays_x) = bays(width, min, max)?;
    let (spacing_y, bays_y) = bays(height, min, max)?;
    Some(ColumnGrid {
        spacing_x,
        spacing_y,
        bays_x,
        bays_y,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bays(length: f64, min: f64, max: f64) -> Option<(f64, u32)> {
    let fewest = (length / max - LINEAR_TOLERANCE).ceil().max(1.0);
    let most = (length / min + LINEAR_TOLERANCE).floor();
    (fewest <= most).then(|| (length / fewest, fewest as u32))
}

fn ventilation_axes(boundary: &Boundary, tolerance_deg: f64) -> Vec<VentilationAxis> {
    let threshold = -tolerance_deg.to_radians().cos();
    let normals: Vec<_> = boundary
        .edges()
        .map(|e| e.left_normal().map(|n| -n).ok())
        .collect();
    let mut axes = Vec::new();
    for (i, ni) in normals.iter().enumerate() {
        for (j, nj) in normals.iter().enumerate().skip(i + 1) {
            if let (Some(ni), Some(nj)) = (ni, nj) {
                if ni.dot(nj) <= threshold {
                    axes.push(VentilationAxis {
                        first: i,
                        second: j,
                    });
                }
            }
        }
    }
    axes
}

/// First parking rectangle flush against the road edge that lies inside the
/// boundary and covers no narrow corner. Both orientations are tried.
fn find_parking_slot(
    boundary: &Boundary,
    road_edge: usize,
    corners: &[Corner],
    config: &PlotConfig,
) -> Option<Vec<Point2>> {
    let edge: Segment = boundary.edge(road_edge);
    let dir = edge.direction().ok()?;
    let inward = left_normal(dir);
    let len = edge.length();

    for (along, depth) in [
        (config.parking_width, config.parking_depth),
        (config.parking_depth, config.parking_width),
    ] {
        if along > len + LINEAR_TOLERANCE {
            continue;
        }
        for k in 0..=PARKING_POSITIONS {
            let t = (len - along) * f64::from(k) / f64::from(PARKING_POSITIONS);
            let p0 = edge.start + dir * t;
            let slot = vec![
                p0,
                p0 + dir * along,
                p0 + dir * along + inward * depth,
                p0 + inward * depth,
            ];
            let area = along * depth;
            if intersection_area_2d(boundary.points(), &slot) < area - LINEAR_TOLERANCE * area {
                continue;
            }
            let blocks_corner = corners
                .iter()
                .any(|c| c.kind == CornerKind::Narrow && contains_point_2d(&slot, &c.point));
            if !blocks_corner {
                return Some(slot);
            }
        }
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rect_plot(w: f64, h: f64) -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(w, 0.0),
            Point2::new(w, h),
            Point2::new(0.0, h),
        ]
    }

    #[test]
    fn rectangle_metadata() {
        let config = PlotConfig::default();
        let analyzed = PlotAnalyzer::new(rect_plot(60.0, 40.0), Some(2400.0), &config)
            .execute()
            .unwrap();
        let m = &analyzed.metadata;
        assert_eq!(m.road_edge, 0);
        assert_relative_eq!(m.entry_point.x, 30.0);
        assert!(m.corners.iter().all(|c| c.kind == CornerKind::Wide));
        assert_relative_eq!(m.corners[0].interior_angle_deg, 90.0, epsilon = 1e-9);
        assert!(m.grid_feasible);
        let grid = m.column_grid.unwrap();
        assert_relative_eq!(grid.spacing_x, 15.0, epsilon = 1e-9);
        assert_eq!(grid.bays_y, 3);
        assert_eq!(
            m.ventilation_axes,
            vec![
                VentilationAxis { first: 0, second: 2 },
                VentilationAxis { first: 1, second: 3 }
            ]
        );
        assert!(m.parking_feasible);
        let slot = m.parking_slot.as_ref().unwrap();
        assert!(slot.iter().all(|p| p.y <= 18.0 + 1e-9));
    }

    #[test]
    fn two_point_boundary_is_invalid() {
        let config = PlotConfig::default();
        let err = PlotAnalyzer::new(vec![Point2::new(0.0, 0.0), Point2::new(5.0, 0.0)], None, &config)
            .execute()
            .unwrap_err();
        assert!(matches!(err, crate::error::FloorgenError::InvalidBoundary(_)));
    }

    #[test]
    fn shallow_plot_has_no_parking() {
        let config = PlotConfig::default();
        let analyzed = PlotAnalyzer::new(rect_plot(8.0, 8.0), None, &config)
            .execute()
            .unwrap();
        assert!(!analyzed.metadata.parking_feasible);
    }

    #[test]
    fn grid_infeasible_between_ranges() {
        // 17 is too long for one 15-unit bay and too short for two 10-unit bays.
        assert!(bays(17.0, 10.0, 15.0).is_none());
        let (spacing, count) = bays(40.0, 10.0, 15.0).unwrap();
        assert_eq!(count, 3);
        assert_relative_eq!(spacing, 40.0 / 3.0);
    }

    #[test]
    fn sharp_triangle_corner_is_narrow() {
        let config = PlotConfig::default();
        let analyzed = PlotAnalyzer::new(
            vec![Point2::new(0.0, 0.0), Point2::new(60.0, 0.0), Point2::new(0.0, 20.0)],
            None,
            &config,
        )
        .execute()
        .unwrap();
        let m = &analyzed.metadata;
        assert_eq!(m.corners[1].kind, CornerKind::Narrow);
        assert_eq!(m.corners[0].kind, CornerKind::Wide);
    }

    #[test]
    fn setback_shrinks_buildable_area() {
        let config = PlotConfig {
            setback: 2.0,
            ..PlotConfig::default()
        };
        let analyzed = PlotAnalyzer::new(rect_plot(60.0, 40.0), None, &config)
            .execute()
            .unwrap();
        assert_relative_eq!(analyzed.plot.area(), 2400.0);
        assert_relative_eq!(analyzed.buildable.area(), 56.0 * 36.0, epsilon = 1e-9);
    }

    #[test]
    fn hint_scaling_is_opt_in() {
        let config = PlotConfig::default();
        let kept = PlotAnalyzer::new(rect_plot(60.0, 40.0), Some(600.0), &config)
            .execute()
            .unwrap();
        assert_relative_eq!(kept.buildable.area(), 2400.0);
        assert_eq!(kept.metadata.area_hint, Some(600.0));

        let config = PlotConfig {
            scale_to_area_hint: true,
            ..PlotConfig::default()
        };
        let scaled = PlotAnalyzer::new(rect_plot(60.0, 40.0), Some(600.0), &config)
            .execute()
            .unwrap();
        assert_relative_eq!(scaled.buildable.area(), 600.0, epsilon = 1e-6);
    }
}
