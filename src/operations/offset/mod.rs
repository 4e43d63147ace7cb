mod polygon_offset_2d;
mod wall_band_2d;

pub use polygon_offset_2d::PolygonOffset2D;
pub use wall_band_2d::WallBand2D;
