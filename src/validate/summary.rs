use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::{Zone, ZoneCatalog};
use crate::layout::{PlacedRoom, RoomInstance, UnplacedRoom};

use super::ValidationIssue;

/// Plan quality scores, each in `0..=1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Scores {
    /// One minus the mean relative area error, capped per room.
    pub area_accuracy: f64,
    /// Fraction of adjacency hints met by a shared edge: a room touching its
    /// catalog `adjacent_zone`, a wet room touching another wet room. Zero
    /// when some room is unreachable from the entry, one when no hint applies.
    pub adjacency: f64,
    /// Fraction of the buildable area covered by rooms.
    pub coverage: f64,
}

impl Scores {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(
        rooms: &[PlacedRoom],
        reachable: usize,
        plot_area: f64,
        catalog: &ZoneCatalog,
        tol: f64,
    ) -> Self {
        if rooms.is_empty() {
            return Self::default();
        }
        let n = rooms.len() as f64;
        let error: f64 = rooms
            .iter()
            .map(|r| ((r.area - r.target_area).abs() / r.target_area).min(1.0))
            .sum();
        let covered: f64 = rooms.iter().map(|r| r.area).sum();
        let adjacency = if reachable < rooms.len() {
            0.0
        } else {
            adjacency_satisfaction(rooms, catalog, tol)
        };
        Self {
            area_accuracy: 1.0 - error / n,
            adjacency,
            coverage: if plot_area > 0.0 { (covered / plot_area).clamp(0.0, 1.0) } else { 0.0 },
        }
    }
}

/// Met hints over applicable hints. A hint applies when the plan holds a
/// room it could be met by.
#[allow(clippy::cast_precision_loss)]
fn adjacency_satisfaction(rooms: &[PlacedRoom], catalog: &ZoneCatalog, tol: f64) -> f64 {
    let mut applicable = 0usize;
    let mut met = 0usize;
    for (i, room) in rooms.iter().enumerate() {
        let others = || rooms.iter().enumerate().filter(move |(j, _)| *j != i).map(|(_, r)| r);
        let touches = |other: &PlacedRoom| room.rect.shared_edge(&other.rect, tol).is_some();

        if let Some(zone) = catalog.spec(room.room_type).and_then(|s| s.adjacent_zone) {
            if others().any(|o| o.zone == zone) {
                applicable += 1;
                if others().any(|o| o.zone == zone && touches(o)) {
                    met += 1;
                }
            }
        }
        if room.wet && others().any(|o| o.wet) {
            applicable += 1;
            if others().any(|o| o.wet && touches(o)) {
                met += 1;
            }
        }
    }
    if applicable == 0 {
        1.0
    } else {
        met as f64 / applicable as f64
    }
}

/// Aggregate metrics of a generated plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    /// Requested room instances (implicit rooms excluded).
    pub rooms_requested: usize,
    /// Requested room instances that were placed.
    pub rooms_placed: usize,
    pub rooms_unplaced: usize,
    pub unplaced: Vec<UnplacedRoom>,
    /// Area of every placed room, implicit ones included.
    pub total_area: f64,
    pub requested_area: f64,
    /// Buildable area.
    pub plot_area: f64,
    pub area_hint: Option<f64>,
    pub utilization_pct: f64,
    /// Buildable area left to circulation.
    pub circulation_slack: f64,
    pub zones_used: BTreeSet<Zone>,
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
    pub scores: Scores,
}

impl PlanSummary {
    #[must_use]
    pub fn build(
        requested: &[RoomInstance],
        rooms: &[PlacedRoom],
        unplaced: &[UnplacedRoom],
        plot_area: f64,
        area_hint: Option<f64>,
        issues: Vec<ValidationIssue>,
        scores: Scores,
    ) -> Self {
        let total_area: f64 = rooms.iter().map(|r| r.area).sum();
        let utilization_pct = if plot_area > 0.0 {
            total_area / plot_area * 100.0
        } else {
            0.0
        };
        Self {
            rooms_requested: requested.len(),
            rooms_placed: rooms.iter().filter(|r| !r.implicit).count(),
            rooms_unplaced: unplaced.len(),
            unplaced: unplaced.to_vec(),
            total_area,
            requested_area: requested.iter().map(RoomInstance::target_area).sum(),
            plot_area,
            area_hint,
            utilization_pct,
            circulation_slack: (plot_area - total_area).max(0.0),
            zones_used: rooms.iter().map(|r| r.zone).collect(),
            valid: !issues.iter().any(ValidationIssue::is_hard),
            issues,
            scores,
        }
    }

    /// Number of issues that break a plan invariant.
    #[must_use]
    pub fn hard_violation_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_hard()).count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::RoomType;
    use crate::geometry::Rect;
    use crate::openings::test_support::room;
    use crate::validate::Severity;
    use approx::assert_relative_eq;

    #[test]
    fn adjacency_counts_met_hints() {
        let rect = Rect::from_origin_size;
        let living = room(0, RoomType::Living, Zone::Public, rect(0.0, 0.0, 10.0, 10.0));
        let dining = room(1, RoomType::Dining, Zone::SemiPrivate, rect(10.0, 0.0, 10.0, 10.0));
        let mut kitchen = room(2, RoomType::Kitchen, Zone::SemiPrivate, rect(20.0, 0.0, 10.0, 10.0));
        kitchen.wet = true;
        let mut toilet = room(3, RoomType::Toilet, Zone::Service, rect(40.0, 0.0, 5.0, 4.0));
        toilet.wet = true;
        let rooms = vec![living, dining, kitchen, toilet];

        // Dining meets public, kitchen meets semi-private; the two wet rooms
        // are apart.
        let scores = Scores::compute(&rooms, 4, 2000.0, &ZoneCatalog::residential(), 1e-6);
        assert_relative_eq!(scores.adjacency, 0.5);
    }

    #[test]
    fn scores_and_totals() {
        let mut living = room(0, RoomType::Living, Zone::Public, Rect::from_origin_size(0.0, 0.0, 10.0, 10.0));
        living.target_area = 200.0;
        let kitchen = room(1, RoomType::Kitchen, Zone::SemiPrivate, Rect::from_origin_size(10.0, 0.0, 10.0, 10.0));
        let rooms = vec![living, kitchen];
        let catalog = ZoneCatalog::residential();
        let scores = Scores::compute(&rooms, 2, 400.0, &catalog, 1e-6);
        assert_relative_eq!(scores.area_accuracy, 0.75);
        assert_relative_eq!(scores.adjacency, 1.0);
        assert_relative_eq!(scores.coverage, 0.5);

        let disconnected = Scores::compute(&rooms, 1, 400.0, &catalog, 1e-6);
        assert_relative_eq!(disconnected.adjacency, 0.0);

        let issue = ValidationIssue {
            category: "overlap",
            severity: Severity::Error,
            message: String::new(),
            rooms: vec![0],
        };
        let summary = PlanSummary::build(&[], &rooms, &[], 400.0, Some(420.0), vec![issue], scores);
        assert_relative_eq!(summary.total_area, 200.0);
        assert_relative_eq!(summary.utilization_pct, 50.0);
        assert_relative_eq!(summary.circulation_slack, 200.0);
        assert_eq!(summary.zones_used.len(), 2);
        assert!(!summary.valid);
        assert_eq!(summary.hard_violation_count(), 1);
    }
}
