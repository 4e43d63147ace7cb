use crate::config::DimensionConfig;
use crate::error::Result;
use crate::geometry::Segment;
use crate::layout::PlacedRoom;
use crate::math::Point2;

use super::{DimensionAxis, DimensionLine};

/// A horizontal and a vertical dimension line per room, drawn inside it.
pub(super) fn room_dimensions(rooms: &[PlacedRoom], config: &DimensionConfig) -> Result<Vec<DimensionLine>> {
    let mut lines = Vec::with_capacity(rooms.len() * 2);
    for room in rooms {
        let r = room.rect;
        // Keep the line inside narrow rooms.
        let inset = config.offset.min(r.min_side() / 2.0);

        let bottom = Segment::new(r.min, Point2::new(r.max.x, r.min.y));
        lines.push(DimensionLine {
            room: room.index,
            axis: DimensionAxis::Horizontal,
            line: bottom.offset(inset)?,
            length: r.width(),
        });

        let left = Segment::new(r.min, Point2::new(r.min.x, r.max.y));
        lines.push(DimensionLine {
            room: room.index,
            axis: DimensionAxis::Vertical,
            line: left.offset(-inset)?,
            length: r.height(),
        });
    }
    Ok(lines)
}
