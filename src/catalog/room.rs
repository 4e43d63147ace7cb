use std::fmt;

use serde::{Deserialize, Serialize};

/// Privacy zone of a room type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Public,
    SemiPrivate,
    Private,
    Service,
    Circulation,
}

impl Zone {
    pub const ALL: [Self; 5] = [
        Self::Public,
        Self::SemiPrivate,
        Self::Private,
        Self::Service,
        Self::Circulation,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::SemiPrivate => "semi_private",
            Self::Private => "private",
            Self::Service => "service",
            Self::Circulation => "circulation",
        }
    }

    /// Doors between a private room and a room of this zone swing into this one.
    #[must_use]
    pub fn is_shared(self) -> bool {
        matches!(self, Self::Public | Self::SemiPrivate)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Room vocabulary understood by the engine.
///
/// Variant order is the default architectural placement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Parking,
    Porch,
    Living,
    Dining,
    Kitchen,
    Utility,
    MasterBedroom,
    Bedroom,
    Study,
    Bathroom,
    Toilet,
    Staircase,
    Pooja,
    Store,
    Balcony,
    Hallway,
}

impl RoomType {
    pub const ALL: [Self; 16] = [
        Self::Parking,
        Self::Porch,
        Self::Living,
        Self::Dining,
        Self::Kitchen,
        Self::Utility,
        Self::MasterBedroom,
        Self::Bedroom,
        Self::Study,
        Self::Bathroom,
        Self::Toilet,
        Self::Staircase,
        Self::Pooja,
        Self::Store,
        Self::Balcony,
        Self::Hallway,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parking => "parking",
            Self::Porch => "porch",
            Self::Living => "living",
            Self::Dining => "dining",
            Self::Kitchen => "kitchen",
            Self::Utility => "utility",
            Self::MasterBedroom => "master_bedroom",
            Self::Bedroom => "bedroom",
            Self::Study => "study",
            Self::Bathroom => "bathroom",
            Self::Toilet => "toilet",
            Self::Staircase => "staircase",
            Self::Pooja => "pooja",
            Self::Store => "store",
            Self::Balcony => "balcony",
            Self::Hallway => "hallway",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compass quadrant used as a soft orientation hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Quadrant {
    /// Unit direction of the quadrant for a north bearing given in degrees
    /// counter-clockwise from +y.
    #[must_use]
    pub fn direction(self, north_angle_deg: f64) -> crate::math::Vector2 {
        let a = north_angle_deg.to_radians();
        let north = crate::math::Vector2::new(-a.sin(), a.cos());
        let east = crate::math::Vector2::new(north.y, -north.x);
        let v = match self {
            Self::NorthEast => north + east,
            Self::NorthWest => north - east,
            Self::SouthEast => east - north,
            Self::SouthWest => -north - east,
        };
        v / std::f64::consts::SQRT_2
    }
}
