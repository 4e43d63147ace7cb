use serde::Serialize;

use crate::geometry::Boundary;
use crate::layout::PlacedRoom;
use crate::math::Point2;
use crate::openings::{DimensionLine, Door, WallSegment, Window};
use crate::plot::PlotMetadata;
use crate::validate::PlanSummary;

/// A generated floor plan: the aggregate handed to export, preview and
/// extrusion consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorPlan {
    /// The accepted plot outline.
    pub boundary: Boundary,
    /// The footprint rooms are placed in (after any setback).
    pub buildable: Boundary,
    pub metadata: PlotMetadata,
    /// Placed rooms in placement order.
    pub rooms: Vec<PlacedRoom>,
    pub exterior_outer: Vec<Point2>,
    pub exterior_inner: Vec<Point2>,
    pub walls: Vec<WallSegment>,
    pub doors: Vec<Door>,
    pub windows: Vec<Window>,
    pub dimensions: Vec<DimensionLine>,
    pub summary: PlanSummary,
}

impl FloorPlan {
    /// Serializes the plan as a pretty-printed JSON document.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    #[must_use]
    pub fn room(&self, label: &str) -> Option<&PlacedRoom> {
        self.rooms.iter().find(|r| r.label == label)
    }
}
