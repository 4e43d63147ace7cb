//! Room vocabulary, per-type specs and the zone catalog.

mod room;
mod spec;
mod zone_catalog;

pub use room::{Quadrant, RoomType, Zone};
pub use spec::{AnchorRule, RoomSpec};
pub use zone_catalog::ZoneCatalog;
