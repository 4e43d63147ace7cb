use crate::config::DoorConfig;
use crate::error::Result;
use crate::geometry::{Boundary, Segment};
use crate::layout::PlacedRoom;
use crate::math::polygon_2d::cross_2d;
use crate::math::{Point2, Vector2};
use crate::plot::PlotMetadata;

use super::{entry_room, exterior_spans, Door, DoorConnection};

/// One door per pair of rooms sharing an edge at least `min_door_span` long.
pub(super) fn room_doors(rooms: &[PlacedRoom], config: &DoorConfig, tol: f64) -> Result<Vec<Door>> {
    let mut doors = Vec::new();
    for (i, a) in rooms.iter().enumerate() {
        for b in &rooms[i + 1..] {
            let Some(shared) = a.rect.shared_edge(&b.rect, tol) else {
                continue;
            };
            if shared.length() + tol < config.min_door_span {
                continue;
            }
            let into = swing_target(a, b);
            doors.push(door(
                shared,
                into.centroid,
                into.index,
                DoorConnection::Rooms {
                    a: a.index,
                    b: b.index,
                },
                config,
            )?);
        }
    }
    Ok(doors)
}

/// The main entry door, on the entry room's exterior span nearest the road
/// edge. `None` when the entry room has no exterior span wide enough.
pub(super) fn entry_door(
    boundary: &Boundary,
    metadata: &PlotMetadata,
    rooms: &[PlacedRoom],
    config: &DoorConfig,
    tol: f64,
) -> Result<Option<Door>> {
    let Some(room) = entry_room(rooms).map(|i| &rooms[i]) else {
        return Ok(None);
    };
    let best = exterior_spans(&room.rect, boundary, tol)
        .into_iter()
        .filter(|(_, span)| span.length() + tol >= config.min_door_span)
        .min_by(|(ka, a), (kb, b)| {
            let da = road_distance(*ka, a, metadata);
            let db = road_distance(*kb, b, metadata);
            da.total_cmp(&db).then(ka.cmp(kb))
        });
    let Some((_, span)) = best else {
        tracing::debug!(room = %room.label, "entry room has no exterior span for a door");
        return Ok(None);
    };
    door(span, room.centroid, room.index, DoorConnection::Entry { room: room.index }, config).map(Some)
}

/// Spans on the road edge come first, then by distance to the entry point.
fn road_distance(edge: usize, span: &Segment, metadata: &PlotMetadata) -> f64 {
    if edge == metadata.road_edge {
        -1.0
    } else {
        (span.midpoint() - metadata.entry_point).norm()
    }
}

/// A door swings into the shared-zone room when the other side is private,
/// otherwise into the larger room (the earlier one on ties).
fn swing_target<'r>(a: &'r PlacedRoom, b: &'r PlacedRoom) -> &'r PlacedRoom {
    use crate::catalog::Zone;
    match (a.zone, b.zone) {
        (Zone::Private, z) if z.is_shared() => b,
        (z, Zone::Private) if z.is_shared() => a,
        _ if b.area > a.area => b,
        _ => a,
    }
}

/// Door centred on `edge`, swinging towards `target`.
fn door(edge: Segment, target: Point2, opens_into: usize, connection: DoorConnection, config: &DoorConfig) -> Result<Door> {
    let u = edge.direction()?;
    let width = (edge.length() * config.width_fraction).min(config.standard_width);
    let centre = edge.midpoint();
    let hinge = centre - u * (width / 2.0);
    let door_end = hinge + u * width;

    let left: Vector2 = edge.left_normal()?;
    let swing = if (target - centre).dot(&left) >= 0.0 { left } else { -left };
    let sweep_deg = if cross_2d(&u, &swing) > 0.0 { 90.0 } else { -90.0 };

    Ok(Door {
        hinge,
        door_end,
        centre,
        width,
        swing,
        arc_start_deg: u.y.atan2(u.x).to_degrees(),
        sweep_deg,
        opens_into,
        connection,
    })
}
