pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod math;
pub mod openings;
pub mod operations;
pub mod plan;
pub mod plot;
pub mod validate;

pub use catalog::{RoomType, Zone, ZoneCatalog};
pub use config::EngineConfig;
pub use engine::{generate, FloorPlanEngine};
pub use error::{FloorgenError, Result};
pub use layout::RoomRequest;
pub use math::Point2;
pub use plan::FloorPlan;
