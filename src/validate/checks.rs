use std::collections::{BTreeSet, VecDeque};

use crate::catalog::{RoomType, Zone, ZoneCatalog};
use crate::config::ValidationConfig;
use crate::geometry::Boundary;
use crate::layout::{PlacedRoom, UnplacedRoom};
use crate::openings::{entry_room, Door, DoorConnection};

use super::{Severity, ValidationInput, ValidationIssue};

// ── Hard invariants ────────────────────────────────────────────────────

/// Every room must lie inside the buildable boundary.
#[must_use]
pub fn check_containment(boundary: &Boundary, rooms: &[PlacedRoom], tol: f64) -> Vec<ValidationIssue> {
    rooms
        .iter()
        .filter(|r| !boundary.contains_rect(&r.rect, tol))
        .map(|r| ValidationIssue {
            category: "containment",
            severity: Severity::Error,
            message: format!(
                "{} extends {:.3} square units outside the boundary",
                r.label,
                r.area - boundary.covered_area(&r.rect)
            ),
            rooms: vec![r.index],
        })
        .collect()
}

/// No two rooms may share interior area.
#[must_use]
pub fn check_overlaps(rooms: &[PlacedRoom], tol: f64) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for (i, a) in rooms.iter().enumerate() {
        for b in &rooms[i + 1..] {
            let overlap = a.rect.overlap_area(&b.rect);
            if overlap > tol {
                issues.push(ValidationIssue {
                    category: "overlap",
                    severity: Severity::Error,
                    message: format!("{} and {} overlap by {overlap:.3} square units", a.label, b.label),
                    rooms: vec![a.index, b.index],
                });
            }
        }
    }
    issues
}

// ── Soft checks ────────────────────────────────────────────────────────

/// Rooms smaller than their catalog minimum.
#[must_use]
pub fn check_min_area(rooms: &[PlacedRoom], catalog: &ZoneCatalog, tol: f64) -> Vec<ValidationIssue> {
    rooms
        .iter()
        .filter_map(|r| {
            let minimum = catalog.spec(r.room_type)?.min_area;
            (r.area < minimum - tol).then(|| ValidationIssue {
                category: "area",
                severity: Severity::Warning,
                message: format!("{} is {:.1} square units, below the minimum {minimum}", r.label, r.area),
                rooms: vec![r.index],
            })
        })
        .collect()
}

/// Rooms that are too elongated or too narrow.
#[must_use]
pub fn check_proportions(rooms: &[PlacedRoom], config: &ValidationConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for r in rooms {
        let aspect = r.rect.aspect_ratio();
        if aspect > config.max_aspect_ratio + config.tolerance {
            issues.push(ValidationIssue {
                category: "proportion",
                severity: Severity::Warning,
                message: format!("{} has aspect ratio {aspect:.2}", r.label),
                rooms: vec![r.index],
            });
        }
        let side = r.rect.min_side();
        if side < config.min_room_side - config.tolerance {
            issues.push(ValidationIssue {
                category: "proportion",
                severity: Severity::Warning,
                message: format!("{} is only {side:.2} units wide", r.label),
                rooms: vec![r.index],
            });
        }
    }
    issues
}

/// Total room area above the plot area.
#[must_use]
pub fn check_overflow(rooms: &[PlacedRoom], plot_area: f64, tol: f64) -> Vec<ValidationIssue> {
    let total: f64 = rooms.iter().map(|r| r.area).sum();
    if total > plot_area + tol {
        vec![ValidationIssue {
            category: "area",
            severity: Severity::Warning,
            message: format!("rooms cover {total:.1} square units of a {plot_area:.1} plot"),
            rooms: Vec::new(),
        }]
    } else {
        Vec::new()
    }
}

#[must_use]
pub fn check_unplaced(unplaced: &[UnplacedRoom]) -> Vec<ValidationIssue> {
    unplaced
        .iter()
        .map(|u| ValidationIssue {
            category: "unplaced",
            severity: Severity::Warning,
            message: format!("{} was not placed: {}", u.label, u.reason),
            rooms: Vec::new(),
        })
        .collect()
}

/// Rooms reachable from the entry room through doors and shared edges.
#[must_use]
pub fn reachable_from_entry(rooms: &[PlacedRoom], doors: &[Door], tol: f64) -> BTreeSet<usize> {
    let mut reached = BTreeSet::new();
    let Some(entry) = entry_room(rooms) else {
        return reached;
    };
    let n = rooms.len();
    let mut adjacency: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
    for door in doors {
        if let DoorConnection::Rooms { a, b } = door.connection {
            if a < n && b < n {
                adjacency[a].insert(b);
                adjacency[b].insert(a);
            }
        }
    }
    for (i, a) in rooms.iter().enumerate() {
        for (j, b) in rooms.iter().enumerate().skip(i + 1) {
            if a.rect.shared_edge(&b.rect, tol).is_some() {
                adjacency[i].insert(j);
                adjacency[j].insert(i);
            }
        }
    }

    let mut queue = VecDeque::from([entry]);
    reached.insert(entry);
    while let Some(current) = queue.pop_front() {
        for &next in &adjacency[current] {
            if reached.insert(next) {
                queue.push_back(next);
            }
        }
    }
    reached
}

#[must_use]
pub fn check_connectivity(rooms: &[PlacedRoom], doors: &[Door], tol: f64) -> Vec<ValidationIssue> {
    if rooms.len() < 2 {
        return Vec::new();
    }
    let reached = reachable_from_entry(rooms, doors, tol);
    rooms
        .iter()
        .enumerate()
        .filter(|(i, _)| !reached.contains(i))
        .map(|(_, r)| ValidationIssue {
            category: "connectivity",
            severity: Severity::Warning,
            message: format!("{} is not reachable from the entry", r.label),
            rooms: vec![r.index],
        })
        .collect()
}

/// Private rooms opening straight into the kitchen.
#[must_use]
pub fn check_zoning(rooms: &[PlacedRoom], doors: &[Door]) -> Vec<ValidationIssue> {
    doors
        .iter()
        .filter_map(|door| match door.connection {
            DoorConnection::Rooms { a, b } => Some((rooms.get(a)?, rooms.get(b)?)),
            DoorConnection::Entry { .. } => None,
        })
        .filter_map(|(a, b)| {
            let (private, kitchen) = match (a.zone, b.room_type, b.zone, a.room_type) {
                (Zone::Private, RoomType::Kitchen, _, _) => (a, b),
                (_, _, Zone::Private, RoomType::Kitchen) => (b, a),
                _ => return None,
            };
            Some(ValidationIssue {
                category: "zoning",
                severity: Severity::Warning,
                message: format!("{} opens directly into {}", private.label, kitchen.label),
                rooms: vec![private.index, kitchen.index],
            })
        })
        .collect()
}

#[must_use]
pub fn check_entry(rooms: &[PlacedRoom], doors: &[Door]) -> Vec<ValidationIssue> {
    let has_entry = doors
        .iter()
        .any(|d| matches!(d.connection, DoorConnection::Entry { .. }));
    if rooms.is_empty() || has_entry {
        return Vec::new();
    }
    vec![ValidationIssue {
        category: "entry",
        severity: Severity::Warning,
        message: "no exterior span is wide enough for the entry door".to_string(),
        rooms: entry_room(rooms).into_iter().collect(),
    }]
}

/// Runs every check.
#[must_use]
pub fn validate_all(input: &ValidationInput<'_>) -> Vec<ValidationIssue> {
    let tol = input.config.validation.tolerance;
    let mut issues = Vec::new();
    issues.extend(check_containment(input.boundary, input.rooms, tol));
    issues.extend(check_overlaps(input.rooms, tol));
    issues.extend(check_min_area(input.rooms, input.catalog, tol));
    issues.extend(check_proportions(input.rooms, &input.config.validation));
    issues.extend(check_overflow(input.rooms, input.boundary.area(), tol));
    issues.extend(check_unplaced(input.unplaced));
    issues.extend(check_connectivity(input.rooms, input.doors, tol));
    issues.extend(check_zoning(input.rooms, input.doors));
    issues.extend(check_entry(input.rooms, input.doors));
    for issue in &issues {
        match issue.severity {
            Severity::Error => tracing::warn!(category = issue.category, "{}", issue.message),
            Severity::Warning => tracing::debug!(category = issue.category, "{}", issue.message),
        }
    }
    issues
}
