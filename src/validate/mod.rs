//! Post-placement validation and scoring.

mod checks;
mod summary;

pub use checks::{
    check_connectivity, check_containment, check_entry, check_min_area, check_overflow,
    check_overlaps, check_proportions, check_unplaced, check_zoning, reachable_from_entry,
    validate_all,
};
pub use summary::{PlanSummary, Scores};

use serde::Serialize;

use crate::catalog::ZoneCatalog;
use crate::config::EngineConfig;
use crate::geometry::Boundary;
use crate::layout::{PlacedRoom, UnplacedRoom};
use crate::openings::Door;

/// Issue severity. `Error` issues break a plan invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
    /// Indices of the rooms involved.
    pub rooms: Vec<usize>,
}

impl ValidationIssue {
    #[must_use]
    pub fn is_hard(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Everything the checks look at.
#[derive(Debug, Clone, Copy)]
pub struct ValidationInput<'a> {
    /// Buildable boundary the rooms must lie in.
    pub boundary: &'a Boundary,
    pub rooms: &'a [PlacedRoom],
    pub unplaced: &'a [UnplacedRoom],
    pub doors: &'a [Door],
    pub catalog: &'a ZoneCatalog,
    pub config: &'a EngineConfig,
}
