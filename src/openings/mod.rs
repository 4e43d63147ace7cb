//! Walls, doors, windows and dimension lines derived from placed rooms.

mod dimensions;
mod doors;
mod walls;
mod windows;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::geometry::{Boundary, Rect, Segment};
use crate::layout::PlacedRoom;
use crate::math::{Point2, Vector2};
use crate::plot::PlotMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WallKind {
    /// Along a boundary edge.
    Exterior,
    /// Between two rooms.
    Interior,
    /// Between a room and unallocated space.
    Partition,
}

/// A straight wall: centreline, thickness and outline band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WallSegment {
    pub kind: WallKind,
    pub start: Point2,
    pub end: Point2,
    /// Nominal thickness in millimetres.
    pub thickness_mm: f64,
    /// Thickness in plan units.
    pub width: f64,
    /// Counter-clockwise band around the centreline.
    pub outline: Vec<Point2>,
    /// Indices of the rooms the wall bounds.
    pub rooms: Vec<usize>,
}

/// What a door connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DoorConnection {
    Rooms { a: usize, b: usize },
    Entry { room: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Door {
    pub hinge: Point2,
    pub door_end: Point2,
    pub centre: Point2,
    pub width: f64,
    /// Unit vector pointing into the room the door swings into.
    pub swing: Vector2,
    /// Direction of the closed leaf, in degrees from the +x axis.
    pub arc_start_deg: f64,
    /// Signed sweep of the swing arc: +90 counter-clockwise, -90 clockwise.
    pub sweep_deg: f64,
    /// Room the door swings into.
    pub opens_into: usize,
    pub connection: DoorConnection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Window {
    pub room: usize,
    /// Boundary edge the window sits on.
    pub edge: usize,
    pub start: Point2,
    pub end: Point2,
    pub centre: Point2,
    pub width: f64,
    /// Centre line followed by its two offset frame lines.
    pub frame_lines: [Segment; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionAxis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionLine {
    pub room: usize,
    pub axis: DimensionAxis,
    pub line: Segment,
    pub length: f64,
}

/// Everything derived from one placed-room set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Openings {
    /// Boundary offset outward by half the exterior thickness.
    pub exterior_outer: Vec<Point2>,
    /// Boundary offset inward by half the exterior thickness.
    pub exterior_inner: Vec<Point2>,
    pub walls: Vec<WallSegment>,
    pub doors: Vec<Door>,
    pub windows: Vec<Window>,
    pub dimensions: Vec<DimensionLine>,
}

/// Derives walls, doors, windows and dimension lines from placed rooms.
///
/// Pure: the same rooms always yield the same output, and the rooms are
/// never modified.
#[derive(Debug)]
pub struct OpeningsGenerator<'a> {
    boundary: &'a Boundary,
    metadata: &'a PlotMetadata,
    rooms: &'a [PlacedRoom],
    config: &'a EngineConfig,
}

impl<'a> OpeningsGenerator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(
        boundary: &'a Boundary,
        metadata: &'a PlotMetadata,
        rooms: &'a [PlacedRoom],
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            boundary,
            metadata,
            rooms,
            config,
        }
    }

    /// Runs the generator.
    ///
    /// # Errors
    ///
    /// Returns `FloorgenError::DegenerateGeometry` if the exterior wall rings
    /// cannot be offset from the boundary.
    pub fn execute(&self) -> Result<Openings> {
        let tol = self.config.validation.tolerance;
        let (exterior_outer, exterior_inner) =
            walls::exterior_rings(self.boundary, &self.config.walls)?;

        let mut walls = walls::exterior_walls(self.boundary, &self.config.walls)?;
        walls.extend(walls::interior_walls(self.rooms, &self.config.walls, tol)?);
        walls.extend(walls::partition_walls(self.boundary, self.rooms, &self.config.walls, tol)?);

        let mut doors = doors::room_doors(self.rooms, &self.config.doors, tol)?;
        if let Some(entry) = doors::entry_door(self.boundary, self.metadata, self.rooms, &self.config.doors, tol)? {
            doors.push(entry);
        }

        let windows = windows::room_windows(self.boundary, self.metadata, self.rooms, &self.config.windows, tol)?;
        let dimensions = dimensions::room_dimensions(self.rooms, &self.config.dimensions)?;

        tracing::debug!(
            walls = walls.len(),
            doors = doors.len(),
            windows = windows.len(),
            "openings generated"
        );
        Ok(Openings {
            exterior_outer,
            exterior_inner,
            walls,
            doors,
            windows,
            dimensions,
        })
    }
}

/// Room sides lying on the boundary, with the boundary edge they lie on.
#[must_use]
pub fn exterior_spans(rect: &Rect, boundary: &Boundary, tol: f64) -> Vec<(usize, Segment)> {
    let mut spans = Vec::new();
    for side in rect.edges() {
        for (k, edge) in boundary.edges().enumerate() {
            if let Some(span) = side.overlap(&edge, tol) {
                if span.length() > tol {
                    spans.push((k, span));
                }
            }
        }
    }
    spans
}

/// The room the main entry opens into: the first porch, else the first
/// living room, else the first public room, else the first room.
#[must_use]
pub fn entry_room(rooms: &[PlacedRoom]) -> Option<usize> {
    use crate::catalog::{RoomType, Zone};
    rooms
        .iter()
        .position(|r| r.room_type == RoomType::Porch)
        .or_else(|| rooms.iter().position(|r| r.room_type == RoomType::Living))
        .or_else(|| rooms.iter().position(|r| r.zone == Zone::Public))
        .or((!rooms.is_empty()).then_some(0))
}
