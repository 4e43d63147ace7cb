use crate::config::WallConfig;
use crate::error::Result;
use crate::geometry::{Boundary, Segment};
use crate::layout::PlacedRoom;
use crate::math::Point2;
use crate::operations::{PolygonOffset2D, WallBand2D};

use super::{WallKind, WallSegment};

/// Outer and inner rings of the exterior wall.
pub(super) fn exterior_rings(boundary: &Boundary, config: &WallConfig) -> Result<(Vec<Point2>, Vec<Point2>)> {
    let half = config.exterior_thickness() / 2.0;
    let ring = boundary.points().to_vec();
    let outer = PolygonOffset2D::new(ring.clone(), -half).execute()?;
    let inner = PolygonOffset2D::new(ring, half).execute()?;
    Ok((outer, inner))
}

/// One exterior wall per boundary edge.
pub(super) fn exterior_walls(boundary: &Boundary, config: &WallConfig) -> Result<Vec<WallSegment>> {
    boundary
        .edges()
        .map(|edge| {
            wall(
                WallKind::Exterior,
                edge,
                config.exterior_thickness_mm,
                config.exterior_thickness(),
                Vec::new(),
            )
        })
        .collect()
}

/// One interior wall per pair of rooms sharing an edge.
pub(super) fn interior_walls(rooms: &[PlacedRoom], config: &WallConfig, tol: f64) -> Result<Vec<WallSegment>> {
    let mut walls = Vec::new();
    for (i, a) in rooms.iter().enumerate() {
        for b in &rooms[i + 1..] {
            let Some(shared) = a.rect.shared_edge(&b.rect, tol) else {
                continue;
            };
            if shared.length() > config.min_wall_span {
                walls.push(wall(
                    WallKind::Interior,
                    shared,
                    config.interior_thickness_mm,
                    config.interior_thickness(),
                    vec![a.index, b.index],
                )?);
            }
        }
    }
    Ok(walls)
}

/// Walls on the parts of room sides that face neither the boundary nor
/// another room.
pub(super) fn partition_walls(
    boundary: &Boundary,
    rooms: &[PlacedRoom],
    config: &WallConfig,
    tol: f64,
) -> Result<Vec<WallSegment>> {
    let mut walls = Vec::new();
    for room in rooms {
        for side in room.rect.edges() {
            let len = side.length();
            let mut covered: Vec<(f64, f64)> = boundary
                .edges()
                .chain(
                    rooms
                        .iter()
                        .filter(|other| other.index != room.index)
                        .flat_map(|other| other.rect.edges()),
                )
                .filter_map(|other| side.overlap(&other, tol))
                .map(|span| {
                    let a = (span.start - side.start).norm();
                    let b = (span.end - side.start).norm();
                    (a.min(b), a.max(b))
                })
                .collect();
            covered.sort_by(|x, y| x.0.total_cmp(&y.0));

            let mut cursor = 0.0;
            for (a, b) in covered.into_iter().chain([(len, len)]) {
                if a - cursor > config.min_wall_span {
                    let piece = Segment::new(side.point_at(cursor / len), side.point_at(a / len));
                    walls.push(wall(
                        WallKind::Partition,
                        piece,
                        config.interior_thickness_mm,
                        config.interior_thickness(),
                        vec![room.index],
                    )?);
                }
                cursor = f64::max(cursor, b);
            }
        }
    }
    Ok(walls)
}

fn wall(kind: WallKind, centreline: Segment, thickness_mm: f64, width: f64, rooms: Vec<usize>) -> Result<WallSegment> {
    let outline = WallBand2D::centred(centreline, width).execute()?;
    Ok(WallSegment {
        kind,
        start: centreline.start,
        end: centreline.end,
        thickness_mm,
        width,
        outline,
        rooms,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{RoomType, Zone};
    use crate::geometry::Rect;
    use crate::math::polygon_2d::signed_area_2d;
    use crate::openings::test_support::room;
    use approx::assert_relative_eq;

    fn square_plot() -> Boundary {
        Boundary::new(&[
            Point2::new(0.0, 0.0),
            Point2::new(30.0, 0.0),
            Point2::new(30.0, 30.0),
            Point2::new(0.0, 30.0),
        ])
        .unwrap()
    }

    #[test]
    fn exterior_rings_straddle_the_boundary() {
        let config = WallConfig::default();
        let (outer, inner) = exterior_rings(&square_plot(), &config).unwrap();
        let t = config.exterior_thickness();
        assert_relative_eq!(signed_area_2d(&outer), (30.0 + t).powi(2), epsilon = 1e-9);
        assert_relative_eq!(signed_area_2d(&inner), (30.0 - t).powi(2), epsilon = 1e-9);
    }

    #[test]
    fn shared_edges_get_interior_walls() {
        let config = WallConfig::default();
        let rooms = vec![
            room(0, RoomType::Living, Zone::Public, Rect::from_origin_size(0.0, 0.0, 16.0, 15.0)),
            room(1, RoomType::Kitchen, Zone::SemiPrivate, Rect::from_origin_size(16.0, 0.0, 10.0, 12.0)),
        ];
        let walls = interior_walls(&rooms, &config, 1e-6).unwrap();
        assert_eq!(walls.len(), 1);
        assert_relative_eq!((walls[0].end - walls[0].start).norm(), 12.0);
        assert_relative_eq!(walls[0].thickness_mm, 115.0);
        assert_eq!(walls[0].rooms, vec![0, 1]);
        assert_eq!(walls[0].outline.len(), 4);
    }

    #[test]
    fn open_sides_get_partitions() {
        let config = WallConfig::default();
        let rooms = vec![
            room(0, RoomType::Living, Zone::Public, Rect::from_origin_size(0.0, 0.0, 16.0, 15.0)),
            room(1, RoomType::Kitchen, Zone::SemiPrivate, Rect::from_origin_size(16.0, 0.0, 10.0, 12.0)),
        ];
        let walls = partition_walls(&square_plot(), &rooms, &config, 1e-6).unwrap();
        let total: f64 = walls.iter().map(|w| (w.end - w.start).norm()).sum();
        // Living: top side 16 plus the 3 units of its right side above the
        // kitchen. Kitchen: top side 10 plus its free right side 12.
        assert_relative_eq!(total, 16.0 + 3.0 + 10.0 + 12.0, epsilon = 1e-9);
        assert!(walls.iter().all(|w| w.kind == WallKind::Partition));
    }
}
