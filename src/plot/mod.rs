//! Plot analysis: derived, read-only facts about a boundary.

mod analyzer;
mod inscribed;

pub use analyzer::{AnalyzedPlot, PlotAnalyzer};
pub use inscribed::largest_inscribed_rect;

use serde::Serialize;

use crate::geometry::Rect;
use crate::math::Point2;

/// Corner classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerKind {
    Narrow,
    Wide,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Corner {
    pub vertex: usize,
    pub point: Point2,
    /// Interior angle in degrees (above 180 for reflex corners).
    pub interior_angle_deg: f64,
    /// Shorter over longer adjacent edge length.
    pub edge_ratio: f64,
    pub kind: CornerKind,
}

/// Structural column grid over the inscribed rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnGrid {
    pub spacing_x: f64,
    pub spacing_y: f64,
    pub bays_x: u32,
    pub bays_y: u32,
}

/// Two boundary edges whose outward normals are (nearly) opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct VentilationAxis {
    pub first: usize,
    pub second: usize,
}

/// Facts derived from one boundary; recomputed per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotMetadata {
    pub area: f64,
    pub perimeter: f64,
    pub bounding_box: Rect,
    pub centroid: Point2,
    /// Longest edge, lowest index on ties.
    pub road_edge: usize,
    /// Midpoint of the road edge.
    pub entry_point: Point2,
    pub corners: Vec<Corner>,
    pub inscribed_rect: Option<Rect>,
    pub grid_feasible: bool,
    pub column_grid: Option<ColumnGrid>,
    pub ventilation_axes: Vec<VentilationAxis>,
    pub parking_feasible: bool,
    /// Parking slot found flush against the road edge.
    pub parking_slot: Option<Vec<Point2>>,
    pub area_hint: Option<f64>,
    pub north_angle_deg: Option<f64>,
}

impl PlotMetadata {
    /// Edges paired with `edge` for cross-ventilation.
    pub fn opposite_edges(&self, edge: usize) -> impl Iterator<Item = usize> + '_ {
        self.ventilation_axes.iter().filter_map(move |axis| {
            if axis.first == edge {
                Some(axis.second)
            } else if axis.second == edge {
                Some(axis.first)
            } else {
                None
            }
        })
    }
}
