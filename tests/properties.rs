//! Property tests over random plots and room mixes.

use proptest::prelude::*;

use floorgen::validate::reachable_from_entry;
use floorgen::{generate, FloorPlan, Point2, RoomRequest, RoomType};

fn rectangle(w: f64, h: f64) -> Vec<Point2> {
    vec![
        Point2::new(0.0, 0.0),
        Point2::new(w, 0.0),
        Point2::new(w, h),
        Point2::new(0.0, h),
    ]
}

/// L-shaped plot: a `w` x `h` rectangle with the top-right `cw` x `ch`
/// corner removed.
fn l_shape(w: f64, h: f64, cw: f64, ch: f64) -> Vec<Point2> {
    vec![
        Point2::new(0.0, 0.0),
        Point2::new(w, 0.0),
        Point2::new(w, h - ch),
        Point2::new(w - cw, h - ch),
        Point2::new(w - cw, h),
        Point2::new(0.0, h),
    ]
}

fn plot_strategy() -> impl Strategy<Value = Vec<Point2>> {
    prop_oneof![
        (20.0..80.0f64, 20.0..80.0f64).prop_map(|(w, h)| rectangle(w, h)),
        (30.0..80.0f64, 30.0..80.0f64, 0.2..0.6f64, 0.2..0.6f64)
            .prop_map(|(w, h, fx, fy)| l_shape(w, h, w * fx, h * fy)),
    ]
}

fn rooms_strategy() -> impl Strategy<Value = Vec<RoomRequest>> {
    prop::collection::vec((0..RoomType::ALL.len(), 1u32..3), 1..8).prop_map(|picks| {
        picks
            .into_iter()
            .map(|(i, quantity)| RoomRequest::new(RoomType::ALL[i], quantity))
            .collect()
    })
}

fn contained_and_disjoint(plan: &FloorPlan) -> bool {
    let contained = plan
        .rooms
        .iter()
        .all(|r| (plan.buildable.covered_area(&r.rect) - r.area).abs() < 1e-5);
    let disjoint = plan.rooms.iter().enumerate().all(|(i, a)| {
        plan.rooms[i + 1..]
            .iter()
            .all(|b| a.rect.overlap_area(&b.rect) < 1e-6)
    });
    contained && disjoint
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn rooms_are_contained_and_disjoint(plot in plot_strategy(), rooms in rooms_strategy()) {
        let plan = generate(&plot, &rooms, None);
        prop_assert!(plan.is_ok(), "generation failed: {:?}", plan.as_ref().err());
        if let Ok(plan) = plan {
            prop_assert!(contained_and_disjoint(&plan));
            prop_assert_eq!(
                plan.summary.rooms_placed + plan.summary.rooms_unplaced,
                plan.summary.rooms_requested
            );
        }
    }

    #[test]
    fn generation_is_deterministic(plot in plot_strategy(), rooms in rooms_strategy()) {
        let a = generate(&plot, &rooms, None).map(|p| p.to_json().unwrap_or_default());
        let b = generate(&plot, &rooms, None).map(|p| p.to_json().unwrap_or_default());
        prop_assert_eq!(a.ok(), b.ok());
    }

    #[test]
    fn every_room_is_reachable_from_the_entry(plot in plot_strategy(), rooms in rooms_strategy()) {
        if let Ok(plan) = generate(&plot, &rooms, None) {
            if plan.rooms.len() >= 2 {
                let reachable = reachable_from_entry(&plan.rooms, &plan.doors, 1e-6);
                prop_assert_eq!(reachable.len(), plan.rooms.len());
                prop_assert!(plan.summary.issues.iter().all(|i| i.category != "connectivity"));
            }
        }
    }
}
