//! End-to-end generation scenarios.
//!
//! Each test drives the public engine API with a plot outline and a room
//! list, then checks the plan-level guarantees:
//! - rooms stay inside the buildable footprint and never overlap
//! - generation is deterministic
//! - wall, door and window derivation is idempotent

use std::path::Path;
use std::sync::Arc;

use floorgen::catalog::Zone;
use floorgen::config::EngineConfig;
use floorgen::error::BoundaryError;
use floorgen::layout::{PlacedRoom, RelaxState, Site};
use floorgen::openings::{DoorConnection, OpeningsGenerator};
use floorgen::{generate, FloorPlan, FloorPlanEngine, FloorgenError, Point2, RoomRequest, RoomType, ZoneCatalog};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn rectangle(w: f64, h: f64) -> Vec<Point2> {
    vec![
        Point2::new(0.0, 0.0),
        Point2::new(w, 0.0),
        Point2::new(w, h),
        Point2::new(0.0, h),
    ]
}

fn family_home() -> Vec<RoomRequest> {
    vec![
        RoomRequest::new(RoomType::Living, 1),
        RoomRequest::new(RoomType::Dining, 1),
        RoomRequest::new(RoomType::Kitchen, 1),
        RoomRequest::new(RoomType::MasterBedroom, 1),
        RoomRequest::new(RoomType::Bedroom, 2),
        RoomRequest::new(RoomType::Bathroom, 1),
        RoomRequest::new(RoomType::Toilet, 1),
        RoomRequest::new(RoomType::Porch, 1),
        RoomRequest::new(RoomType::Parking, 1),
    ]
}

fn assert_contained_and_disjoint(plan: &FloorPlan) {
    for room in &plan.rooms {
        let covered = plan.buildable.covered_area(&room.rect);
        assert!(
            (covered - room.area).abs() < 1e-5,
            "{} is not inside the buildable footprint",
            room.label
        );
    }
    for (i, a) in plan.rooms.iter().enumerate() {
        for b in &plan.rooms[i + 1..] {
            assert!(a.rect.overlap_area(&b.rect) < 1e-6, "{} overlaps {}", a.label, b.label);
        }
    }
}

// ============================================================================
// Scenario A: a 60 x 40 plot with a family home
// ============================================================================

#[test]
fn family_home_on_a_60_by_40_plot() {
    init_tracing();
    let plan = generate(&rectangle(60.0, 40.0), &family_home(), Some(2400.0)).unwrap();

    assert!(plan.summary.valid);
    assert_eq!(plan.summary.rooms_requested, 10);
    assert!(plan.summary.rooms_placed >= 9);
    assert_eq!(plan.summary.area_hint, Some(2400.0));
    assert_contained_and_disjoint(&plan);

    // Parking sits on the longest (road-facing) edge.
    assert_eq!(plan.metadata.road_edge, 0);
    let parking = plan.room("Parking").unwrap();
    assert!(parking.rect.min.y.abs() < 1e-9);
    assert_eq!(parking.site, Site::Edge(0));

    assert!(plan.summary.issues.iter().all(|i| i.category != "connectivity"));
    assert!(plan
        .doors
        .iter()
        .any(|d| matches!(d.connection, DoorConnection::Entry { .. })));
    assert!(plan.summary.zones_used.contains(&Zone::Private));
    assert!(plan.summary.scores.adjacency > 0.0);
    assert!(plan.summary.scores.adjacency <= 1.0);
}

#[test]
fn family_home_labels_are_numbered() {
    let plan = generate(&rectangle(60.0, 40.0), &family_home(), None).unwrap();
    assert!(plan.room("Bedroom 1").is_some());
    assert!(plan.room("Bedroom 2").is_some());
    assert!(plan.room("Bedroom").is_none());
}

// ============================================================================
// Scenario B: not everything fits
// ============================================================================

#[test]
fn undersized_plot_reports_unplaced_rooms() {
    init_tracing();
    let everything: Vec<RoomRequest> = RoomType::ALL
        .iter()
        .map(|rt| RoomRequest::new(*rt, 1))
        .collect();
    let plan = generate(&rectangle(20.0, 20.0), &everything, None).unwrap();

    assert!(plan.summary.rooms_unplaced >= 1);
    assert_eq!(plan.summary.unplaced.len(), plan.summary.rooms_unplaced);
    assert_eq!(
        plan.summary.rooms_placed + plan.summary.rooms_unplaced,
        plan.summary.rooms_requested
    );
    assert!(plan.summary.issues.iter().any(|i| i.category == "unplaced"));
    assert_contained_and_disjoint(&plan);
}

// ============================================================================
// Scenario C: degenerate boundary
// ============================================================================

#[test]
fn two_point_boundary_is_rejected() {
    let err = generate(
        &[Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)],
        &family_home(),
        None,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        FloorgenError::InvalidBoundary(BoundaryError::TooFewVertices { .. })
    ));
}

#[test]
fn bow_tie_boundary_is_rejected() {
    let bow_tie = [
        Point2::new(0.0, 0.0),
        Point2::new(10.0, 10.0),
        Point2::new(10.0, 0.0),
        Point2::new(0.0, 5.0),
    ];
    let err = generate(&bow_tie, &family_home(), None).unwrap_err();
    assert!(matches!(
        err,
        FloorgenError::InvalidBoundary(BoundaryError::SelfIntersecting { .. })
    ));
}

#[test]
fn short_chamfer_keeps_generation_alive() {
    let chamfered = [
        Point2::new(0.0, 0.0),
        Point2::new(59.8, 0.0),
        Point2::new(60.0, 0.2),
        Point2::new(60.0, 40.0),
        Point2::new(0.0, 40.0),
    ];
    let rooms = [
        RoomRequest::new(RoomType::Living, 1),
        RoomRequest::new(RoomType::Kitchen, 1),
    ];
    let plan = generate(&chamfered, &rooms, None).unwrap();
    assert_eq!(plan.exterior_inner.len(), 4);
    assert_eq!(plan.exterior_outer.len(), 5);
    assert_contained_and_disjoint(&plan);

    let config = EngineConfig::from_toml_str(
        r"
        [plot]
        setback = 1.0
        ",
    )
    .unwrap();
    let engine = FloorPlanEngine::new(Arc::new(ZoneCatalog::residential()), config);
    let plan = engine.generate(&chamfered, &rooms, None).unwrap();
    assert_eq!(plan.buildable.points().len(), 4);
    assert_contained_and_disjoint(&plan);
}

// ============================================================================
// Scenario D: edge too short for a door
// ============================================================================

fn placed(index: usize, room_type: RoomType, zone: Zone, x: f64, y: f64, w: f64, h: f64) -> PlacedRoom {
    let rect = floorgen::geometry::Rect::from_origin_size(x, y, w, h);
    PlacedRoom {
        index,
        label: room_type.to_string(),
        room_type,
        zone,
        rect,
        polygon: rect.to_polygon(),
        centroid: rect.center(),
        area: rect.area(),
        target_area: rect.area(),
        relaxation: RelaxState::Anchored,
        site: Site::Interior,
        needs_exterior: false,
        wet: false,
        implicit: false,
        success: true,
    }
}

#[test]
fn short_shared_edge_gets_no_door() {
    let plan = generate(&rectangle(40.0, 30.0), &[RoomRequest::new(RoomType::Living, 1)], None).unwrap();
    let rooms = vec![
        placed(0, RoomType::Living, Zone::Public, 0.0, 0.0, 16.0, 15.0),
        // Shares only 2 units of the living room's right side.
        placed(1, RoomType::Toilet, Zone::Service, 16.0, 13.0, 5.0, 4.0),
    ];
    let config = EngineConfig::default();
    let openings = OpeningsGenerator::new(&plan.buildable, &plan.metadata, &rooms, &config)
        .execute()
        .unwrap();
    assert!(openings
        .doors
        .iter()
        .all(|d| !matches!(d.connection, DoorConnection::Rooms { .. })));
    assert!(openings.doors.iter().all(|d| d.width > 0.0));
}

// ============================================================================
// Determinism and idempotence
// ============================================================================

#[test]
fn generation_is_byte_identical() {
    let a = generate(&rectangle(60.0, 40.0), &family_home(), Some(2400.0)).unwrap();
    let b = generate(&rectangle(60.0, 40.0), &family_home(), Some(2400.0)).unwrap();
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

#[test]
fn openings_regenerate_identically() {
    let plan = generate(&rectangle(60.0, 40.0), &family_home(), None).unwrap();
    let config = EngineConfig::default();
    let openings = OpeningsGenerator::new(&plan.buildable, &plan.metadata, &plan.rooms, &config)
        .execute()
        .unwrap();
    assert_eq!(openings.walls, plan.walls);
    assert_eq!(openings.doors, plan.doors);
    assert_eq!(openings.windows, plan.windows);
    assert_eq!(openings.dimensions, plan.dimensions);
}

// ============================================================================
// Configuration and catalog substitution
// ============================================================================

#[test]
fn setback_shrinks_the_footprint() {
    let config = EngineConfig::from_toml_str(
        r"
        [plot]
        setback = 3.0
        ",
    )
    .unwrap();
    let engine = FloorPlanEngine::new(Arc::new(ZoneCatalog::residential()), config);
    let plan = engine.generate(&rectangle(60.0, 40.0), &family_home(), None).unwrap();
    assert!((plan.buildable.area() - 54.0 * 34.0).abs() < 1e-6);
    assert!((plan.boundary.area() - 2400.0).abs() < 1e-6);
    assert_contained_and_disjoint(&plan);
    assert!(plan.rooms.iter().all(|r| r.rect.min.x >= 3.0 - 1e-9 && r.rect.min.y >= 3.0 - 1e-9));
}

#[test]
fn catalog_file_drives_the_engine() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/residential_catalog.toml");
    let catalog = ZoneCatalog::load(&path).unwrap();
    assert_eq!(catalog, ZoneCatalog::residential());
    let engine = FloorPlanEngine::with_catalog(Arc::new(catalog));
    let from_file = engine.generate(&rectangle(60.0, 40.0), &family_home(), None).unwrap();
    let built_in = generate(&rectangle(60.0, 40.0), &family_home(), None).unwrap();
    assert_eq!(from_file, built_in);
}

#[test]
fn l_shaped_plot_stays_valid() {
    let l_shape = [
        Point2::new(0.0, 0.0),
        Point2::new(50.0, 0.0),
        Point2::new(50.0, 25.0),
        Point2::new(25.0, 25.0),
        Point2::new(25.0, 50.0),
        Point2::new(0.0, 50.0),
    ];
    let plan = generate(&l_shape, &family_home(), None).unwrap();
    assert!(plan.summary.valid);
    assert!(plan.summary.rooms_placed >= 5);
    assert_contained_and_disjoint(&plan);
}

#[test]
fn engine_serves_threads_concurrently() {
    let engine = Arc::new(FloorPlanEngine::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                engine
                    .generate(&rectangle(60.0, 40.0), &family_home(), None)
                    .map(|plan| plan.to_json().unwrap_or_default())
            })
        })
        .collect();
    let outputs: Vec<String> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();
    assert!(outputs.windows(2).all(|w| w[0] == w[1]));
}
