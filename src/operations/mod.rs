pub mod offset;

pub use offset::{PolygonOffset2D, WallBand2D};
