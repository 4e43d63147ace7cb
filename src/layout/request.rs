use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{RoomSpec, RoomType, ZoneCatalog};
use crate::error::RequestError;

/// A requested room type, as received from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRequest {
    pub room_type: RoomType,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Overrides the catalog's target area for every instance.
    #[serde(default)]
    pub desired_area: Option<f64>,
}

fn default_quantity() -> u32 {
    1
}

impl RoomRequest {
    #[must_use]
    pub fn new(room_type: RoomType, quantity: u32) -> Self {
        Self {
            room_type,
            quantity,
            desired_area: None,
        }
    }

    #[must_use]
    pub fn with_area(mut self, desired_area: f64) -> Self {
        self.desired_area = Some(desired_area);
        self
    }

    /// Checks the request against the catalog.
    ///
    /// # Errors
    ///
    /// - `RequestError::UnknownRoomType` if the catalog has no spec
    /// - `RequestError::ZeroQuantity` for a quantity of 0
    /// - `RequestError::AreaBelowMinimum` if the desired area is below the
    ///   catalog minimum (or not a positive number)
    pub fn validate(&self, catalog: &ZoneCatalog) -> Result<(), RequestError> {
        let spec = catalog
            .spec(self.room_type)
            .ok_or(RequestError::UnknownRoomType(self.room_type))?;
        if self.quantity == 0 {
            return Err(RequestError::ZeroQuantity {
                room_type: self.room_type,
            });
        }
        if let Some(desired) = self.desired_area {
            if !desired.is_finite() || desired < spec.min_area {
                return Err(RequestError::AreaBelowMinimum {
                    room_type: self.room_type,
                    desired,
                    minimum: spec.min_area,
                });
            }
        }
        Ok(())
    }
}

/// One unit of a request, ready for placement.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomInstance {
    pub label: String,
    pub spec: RoomSpec,
    /// Target size along the anchor edge.
    pub width: f64,
    /// Target size away from the anchor edge.
    pub depth: f64,
    pub implicit: bool,
}

impl RoomInstance {
    fn new(spec: &RoomSpec, label: String, desired_area: Option<f64>) -> Self {
        let k = desired_area.map_or(1.0, |a| (a / spec.target_area()).sqrt());
        Self {
            label,
            spec: spec.clone(),
            width: spec.width * k,
            depth: spec.depth * k,
            implicit: false,
        }
    }

    /// Unrequested room filling leftover space.
    #[must_use]
    pub fn implicit(spec: &RoomSpec) -> Self {
        Self {
            implicit: true,
            ..Self::new(spec, spec.label.clone(), None)
        }
    }

    #[must_use]
    pub fn target_area(&self) -> f64 {
        self.width * self.depth
    }

    /// Candidate `(width, depth)` sizes from the target down to the
    /// catalog minimum area, preserving the aspect ratio.
    #[must_use]
    pub fn sizes(&self, shrink_steps: usize) -> Vec<(f64, f64)> {
        let target = self.target_area();
        let floor = self.spec.min_area.min(target);
        let mut sizes = vec![(self.width, self.depth)];
        #[allow(clippy::cast_precision_loss)]
        for k in 1..=shrink_steps {
            let area = target - (target - floor) * k as f64 / shrink_steps as f64;
            let s = (area / target).sqrt();
            sizes.push((self.width * s, self.depth * s));
        }
        sizes.dedup_by(|a, b| (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9);
        sizes
    }
}

/// Validates requests and expands them into placement instances in
/// placement order. Requests for the same type are merged; duplicate
/// labels are numbered.
///
/// # Errors
///
/// Returns the first `RequestError` found.
pub fn expand_requests(
    requests: &[RoomRequest],
    catalog: &ZoneCatalog,
) -> Result<Vec<RoomInstance>, RequestError> {
    let mut merged: BTreeMap<(usize, RoomType), (u32, Option<f64>)> = BTreeMap::new();
    for request in requests {
        request.validate(catalog)?;
        let key = (catalog.placement_rank(request.room_type), request.room_type);
        let entry = merged.entry(key).or_insert((0, None));
        entry.0 += request.quantity;
        entry.1 = entry.1.or(request.desired_area);
    }

    let mut instances = Vec::new();
    for ((_, room_type), (quantity, desired_area)) in merged {
        let spec = catalog
            .spec(room_type)
            .ok_or(RequestError::UnknownRoomType(room_type))?;
        for i in 1..=quantity {
            let label = if quantity > 1 {
                format!("{} {i}", spec.label)
            } else {
                spec.label.clone()
            };
            instances.push(RoomInstance::new(spec, label, desired_area));
        }
    }
    Ok(instances)
}
