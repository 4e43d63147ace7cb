use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;

use super::room::{Quadrant, RoomType, Zone};
use super::spec::{AnchorRule, RoomSpec};
use crate::error::ConfigError;

/// The injectable room-type table: placement order, zone anchor rules and
/// per-type specs.
///
/// Read-only after construction, so one catalog can be shared by reference
/// across concurrent generations.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneCatalog {
    order: Vec<RoomType>,
    anchors: BTreeMap<Zone, AnchorRule>,
    specs: BTreeMap<RoomType, RoomSpec>,
}

/// On-disk form of a catalog.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    order: Vec<RoomType>,
    #[serde(default)]
    zones: BTreeMap<Zone, AnchorRule>,
    rooms: Vec<RoomSpec>,
}

impl ZoneCatalog {
    /// Builds a catalog, filling missing zone anchors with their defaults.
    ///
    /// # Errors
    ///
    /// - `ConfigError::MissingSpec` if the order names a type without a spec
    /// - `ConfigError::Invalid` for duplicate entries or non-positive sizes
    pub fn new(
        order: Vec<RoomType>,
        mut anchors: BTreeMap<Zone, AnchorRule>,
        rooms: Vec<RoomSpec>,
    ) -> Result<Self, ConfigError> {
        let mut specs = BTreeMap::new();
        for spec in rooms {
            if spec.width <= 0.0 || spec.depth <= 0.0 || spec.min_area <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must have a positive size and minimum area",
                    spec.room_type
                )));
            }
            if spec.min_area > spec.target_area() {
                return Err(ConfigError::Invalid(format!(
                    "{} minimum area {} exceeds its target {}",
                    spec.room_type,
                    spec.min_area,
                    spec.target_area()
                )));
            }
            let room_type = spec.room_type;
            if specs.insert(room_type, spec).is_some() {
                return Err(ConfigError::Invalid(format!("duplicate spec for {room_type}")));
            }
        }
        let mut seen = BTreeSet::new();
        for rt in &order {
            if !seen.insert(*rt) {
                return Err(ConfigError::Invalid(format!("{rt} appears twice in the order")));
            }
            if !specs.contains_key(rt) {
                return Err(ConfigError::MissingSpec(*rt));
            }
        }
        for zone in Zone::ALL {
            anchors
                .entry(zone)
                .or_insert_with(|| AnchorRule::zone_default(zone));
        }
        Ok(Self {
            order,
            anchors,
            specs,
        })
    }

    /// Parses a catalog from TOML.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` on malformed input, otherwise as
    /// [`ZoneCatalog::new`].
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::new(file.order, file.zones, file.rooms)
    }

    /// Loads a catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`ZoneCatalog::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Built-in residential catalog (sizes in feet).
    #[must_use]
    pub fn residential() -> Self {
        use RoomType as R;
        use Zone as Z;

        let rooms = vec![
            base(R::Parking, "Parking", 10.0, 18.0, 150.0, Z::Public),
            RoomSpec {
                adjacent_zone: Some(Z::Public),
                ..base(R::Porch, "Porch", 10.0, 8.0, 48.0, Z::Public)
            },
            RoomSpec {
                needs_exterior: true,
                adjacent_zone: Some(Z::Public),
                ..base(R::Living, "Living Room", 16.0, 15.0, 120.0, Z::Public)
            },
            RoomSpec {
                needs_exterior: true,
                adjacent_zone: Some(Z::Public),
                ..base(R::Dining, "Dining Room", 12.0, 10.0, 80.0, Z::SemiPrivate)
            },
            RoomSpec {
                needs_exterior: true,
                wet: true,
                adjacent_zone: Some(Z::SemiPrivate),
                ..base(R::Kitchen, "Kitchen", 10.0, 12.0, 80.0, Z::SemiPrivate)
            },
            RoomSpec {
                wet: true,
                adjacent_zone: Some(Z::SemiPrivate),
                ..base(R::Utility, "Utility", 6.0, 6.0, 24.0, Z::Service)
            },
            RoomSpec {
                needs_exterior: true,
                ..base(R::MasterBedroom, "Master Bedroom", 14.0, 14.0, 120.0, Z::Private)
            },
            RoomSpec {
                needs_exterior: true,
                adjacent_zone: Some(Z::Private),
                ..base(R::Bedroom, "Bedroom", 12.0, 12.0, 100.0, Z::Private)
            },
            RoomSpec {
                needs_exterior: true,
                adjacent_zone: Some(Z::Private),
                ..base(R::Study, "Study", 10.0, 10.0, 64.0, Z::Private)
            },
            RoomSpec {
                wet: true,
                adjacent_zone: Some(Z::Private),
                ..base(R::Bathroom, "Bathroom", 8.0, 6.0, 35.0, Z::Service)
            },
            RoomSpec {
                wet: true,
                ..base(R::Toilet, "Toilet", 5.0, 4.0, 15.0, Z::Service)
            },
            RoomSpec {
                adjacent_zone: Some(Z::Public),
                ..base(R::Staircase, "Staircase", 10.0, 8.0, 60.0, Z::Circulation)
            },
            RoomSpec {
                orientation: Some(Quadrant::NorthEast),
                anchor: Some(AnchorRule::Corner),
                ..base(R::Pooja, "Pooja Room", 6.0, 5.0, 16.0, Z::Private)
            },
            RoomSpec {
                adjacent_zone: Some(Z::Service),
                ..base(R::Store, "Store Room", 6.0, 6.0, 20.0, Z::Service)
            },
            RoomSpec {
                adjacent_zone: Some(Z::Private),
                anchor: Some(AnchorRule::AnyExterior),
                ..base(R::Balcony, "Balcony", 10.0, 4.0, 24.0, Z::Private)
            },
            base(R::Hallway, "Hallway", 12.0, 4.0, 30.0, Z::Circulation),
        ];

        let specs = rooms.into_iter().map(|s| (s.room_type, s)).collect();
        let anchors = Zone::ALL
            .into_iter()
            .map(|z| (z, AnchorRule::zone_default(z)))
            .collect();
        Self {
            order: RoomType::ALL[..=RoomType::Store as usize].to_vec(),
            anchors,
            specs,
        }
    }

    #[must_use]
    pub fn spec(&self, room_type: RoomType) -> Option<&RoomSpec> {
        self.specs.get(&room_type)
    }

    #[must_use]
    pub fn order(&self) -> &[RoomType] {
        &self.order
    }

    pub fn specs(&self) -> impl Iterator<Item = &RoomSpec> {
        self.specs.values()
    }

    /// Position of `room_type` in the placement sequence: the configured
    /// order first, then the remaining catalog types in their natural order.
    #[must_use]
    pub fn placement_rank(&self, room_type: RoomType) -> usize {
        if let Some(pos) = self.order.iter().position(|rt| *rt == room_type) {
            return pos;
        }
        self.order.len()
            + self
                .specs
                .keys()
                .filter(|rt| !self.order.contains(rt))
                .position(|rt| *rt == room_type)
                .unwrap_or(self.specs.len())
    }

    /// Anchor rule for a spec. An orientation hint only applies when the
    /// plot's north bearing is known.
    #[must_use]
    pub fn anchor_rule(&self, spec: &RoomSpec, orientation_known: bool) -> AnchorRule {
        if let (Some(quadrant), true) = (spec.orientation, orientation_known) {
            return AnchorRule::Orientation(quadrant);
        }
        spec.anchor.unwrap_or_else(|| {
            self.anchors
                .get(&spec.zone)
                .copied()
                .unwrap_or_else(|| AnchorRule::zone_default(spec.zone))
        })
    }
}

impl Default for ZoneCatalog {
    fn default() -> Self {
        Self::residential()
    }
}

fn base(
    room_type: RoomType,
    label: &str,
    width: f64,
    depth: f64,
    min_area: f64,
    zone: Zone,
) -> RoomSpec {
    RoomSpec {
        room_type,
        label: label.to_owned(),
        width,
        depth,
        min_area,
        zone,
        needs_exterior: false,
        wet: false,
        adjacent_zone: None,
        orientation: None,
        anchor: None,
    }
}
