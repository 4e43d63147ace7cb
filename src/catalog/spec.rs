use serde::{Deserialize, Serialize};

use super::room::{Quadrant, RoomType, Zone};

/// Where the sequencer looks first when placing a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorRule {
    /// Flush against the road-facing edge.
    RoadEdge,
    /// Next to the edges already used by public rooms.
    NearPublic,
    /// The exterior edge farthest from the entry point.
    FarFromEntry,
    /// Any exterior edge, most free span first.
    AnyExterior,
    /// A plot corner, most free span first.
    Corner,
    /// Against already placed rooms, away from the boundary.
    Interior,
    /// The exterior edge facing the given compass quadrant.
    Orientation(Quadrant),
}

impl AnchorRule {
    /// Default anchor rule of each zone.
    #[must_use]
    pub fn zone_default(zone: Zone) -> Self {
        match zone {
            Zone::Public => Self::RoadEdge,
            Zone::SemiPrivate => Self::NearPublic,
            Zone::Private => Self::FarFromEntry,
            Zone::Service => Self::AnyExterior,
            Zone::Circulation => Self::Interior,
        }
    }
}

/// Catalog entry describing one room type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomSpec {
    pub room_type: RoomType,
    pub label: String,
    /// Target size along the anchor edge.
    pub width: f64,
    /// Target size perpendicular to the anchor edge.
    pub depth: f64,
    pub min_area: f64,
    pub zone: Zone,
    /// Requires an exterior wall (and gets windows).
    #[serde(default)]
    pub needs_exterior: bool,
    /// Has plumbing; prefers to touch other wet rooms.
    #[serde(default)]
    pub wet: bool,
    /// Zone this room prefers to share a door-width edge with.
    #[serde(default)]
    pub adjacent_zone: Option<Zone>,
    #[serde(default)]
    pub orientation: Option<Quadrant>,
    /// Overrides the zone's anchor rule.
    #[serde(default)]
    pub anchor: Option<AnchorRule>,
}

impl RoomSpec {
    #[must_use]
    pub fn target_area(&self) -> f64 {
        self.width * self.depth
    }
}
