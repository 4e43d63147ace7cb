pub mod boundary;
pub mod rect;
pub mod segment;

pub use boundary::Boundary;
pub use rect::Rect;
pub use segment::Segment;
