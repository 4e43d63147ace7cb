use crate::config::WindowConfig;
use crate::error::Result;
use crate::geometry::{Boundary, Segment};
use crate::layout::PlacedRoom;
use crate::plot::PlotMetadata;

use super::{exterior_spans, Window};

/// Windows for rooms that need exterior exposure and reach the boundary.
pub(super) fn room_windows(
    boundary: &Boundary,
    metadata: &PlotMetadata,
    rooms: &[PlacedRoom],
    config: &WindowConfig,
    tol: f64,
) -> Result<Vec<Window>> {
    let mut windows = Vec::new();
    for room in rooms.iter().filter(|r| r.needs_exterior) {
        let spans = exterior_spans(&room.rect, boundary, tol);
        let frontage: f64 = spans.iter().map(|(_, s)| s.length()).sum();
        let Some(&(edge, span)) = longest(spans.iter()) else {
            continue;
        };
        let width = (frontage * config.frontage_fraction).clamp(config.min_width, config.max_width);
        windows.push(window(room.index, edge, span, width, config)?);

        if config.cross_ventilation {
            let opposite: Vec<usize> = metadata.opposite_edges(edge).collect();
            let across = longest(spans.iter().filter(|(k, _)| opposite.contains(k)));
            if let Some(&(edge, span)) = across {
                windows.push(window(room.index, edge, span, width, config)?);
            }
        }
    }
    Ok(windows)
}

/// Longest span, the first one on ties.
fn longest<'s>(spans: impl Iterator<Item = &'s (usize, Segment)>) -> Option<&'s (usize, Segment)> {
    spans.fold(None, |best, s| match best {
        Some(b) if b.1.length() >= s.1.length() => Some(b),
        _ => Some(s),
    })
}

/// Window centred on `span`, no wider than the span itself.
fn window(room: usize, edge: usize, span: Segment, width: f64, config: &WindowConfig) -> Result<Window> {
    let width = width.min(span.length());
    let u = span.direction()?;
    let centre = span.midpoint();
    let start = centre - u * (width / 2.0);
    let end = centre + u * (width / 2.0);
    let line = Segment::new(start, end);
    Ok(Window {
        room,
        edge,
        start,
        end,
        centre,
        width,
        frame_lines: [
            line,
            line.offset(config.frame_offset)?,
            line.offset(-config.frame_offset)?,
        ],
    })
}
