//! Room placement: request expansion, anchor sites and the sequencer.

mod relax;
mod request;
mod sequencer;
mod site;

pub use relax::RelaxState;
pub use request::{expand_requests, RoomInstance, RoomRequest};
pub use sequencer::PlacementSequencer;
pub use site::Site;

use serde::Serialize;

use crate::catalog::{RoomType, Zone};
use crate::geometry::Rect;
use crate::math::Point2;

/// A room instance after successful placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedRoom {
    /// Placement-order index.
    pub index: usize,
    pub label: String,
    pub room_type: RoomType,
    pub zone: Zone,
    pub rect: Rect,
    /// Counter-clockwise outline of `rect`.
    pub polygon: Vec<Point2>,
    pub centroid: Point2,
    pub area: f64,
    pub target_area: f64,
    /// Relaxation stage the room was placed in.
    pub relaxation: RelaxState,
    pub site: Site,
    pub needs_exterior: bool,
    pub wet: bool,
    /// Unrequested room filling leftover space.
    pub implicit: bool,
    /// Cleared by validation when the room breaks a hard invariant.
    pub success: bool,
}

/// A room instance the sequencer could not fit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnplacedRoom {
    pub label: String,
    pub room_type: RoomType,
    pub zone: Zone,
    pub target_area: f64,
    pub reason: String,
}

/// Output of one sequencer run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Placement {
    pub rooms: Vec<PlacedRoom>,
    pub unplaced: Vec<UnplacedRoom>,
}
