use std::sync::Arc;

use crate::catalog::ZoneCatalog;
use crate::config::EngineConfig;
use crate::error::{FloorgenError, Result};
use crate::layout::{expand_requests, PlacementSequencer, RoomRequest};
use crate::math::Point2;
use crate::openings::OpeningsGenerator;
use crate::plan::FloorPlan;
use crate::plot::PlotAnalyzer;
use crate::validate::{reachable_from_entry, validate_all, PlanSummary, Scores, ValidationInput};

/// Floor-plan generator over a shared, read-only zone catalog.
///
/// Holds no per-request state; one engine can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct FloorPlanEngine {
    catalog: Arc<ZoneCatalog>,
    config: EngineConfig,
}

impl FloorPlanEngine {
    #[must_use]
    pub fn new(catalog: Arc<ZoneCatalog>, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// Engine over `catalog` with the default configuration.
    #[must_use]
    pub fn with_catalog(catalog: Arc<ZoneCatalog>) -> Self {
        Self::new(catalog, EngineConfig::default())
    }

    #[must_use]
    pub fn catalog(&self) -> &ZoneCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generates a floor plan for a plot outline and a room list.
    ///
    /// Rooms that do not fit are reported in the summary, not as errors.
    ///
    /// # Errors
    ///
    /// - `FloorgenError::Config` if the configuration is inconsistent
    /// - `FloorgenError::InvalidBoundary` if the outline is not a simple
    ///   polygon with positive area
    /// - `FloorgenError::InvalidRequest` for a zero quantity, an area below
    ///   the catalog minimum or a room type missing from the catalog
    /// - `FloorgenError::DegenerateGeometry` if a kernel operation collapses
    /// - `FloorgenError::PlacementInvariantViolated` carrying the flagged
    ///   plan when a room leaves the boundary or overlaps another
    pub fn generate(
        &self,
        boundary: &[Point2],
        rooms: &[RoomRequest],
        total_area_hint: Option<f64>,
    ) -> Result<FloorPlan> {
        self.config.validate()?;
        let analyzed = PlotAnalyzer::new(boundary.to_vec(), total_area_hint, &self.config.plot).execute()?;
        let instances = expand_requests(rooms, &self.catalog)?;

        let placement = PlacementSequencer::new(
            &analyzed.buildable,
            &analyzed.metadata,
            &self.catalog,
            &self.config,
        )
        .execute(&instances);
        let mut placed = placement.rooms;
        let unplaced = placement.unplaced;

        let openings = OpeningsGenerator::new(&analyzed.buildable, &analyzed.metadata, &placed, &self.config)
            .execute()?;

        let tol = self.config.validation.tolerance;
        let issues = validate_all(&ValidationInput {
            boundary: &analyzed.buildable,
            rooms: &placed,
            unplaced: &unplaced,
            doors: &openings.doors,
            catalog: &self.catalog,
            config: &self.config,
        });
        for index in issues.iter().filter(|i| i.is_hard()).flat_map(|i| i.rooms.iter()) {
            if let Some(room) = placed.get_mut(*index) {
                room.success = false;
            }
        }
        let reachable = reachable_from_entry(&placed, &openings.doors, tol).len();
        let scores = Scores::compute(&placed, reachable, analyzed.metadata.area, &self.catalog, tol);
        let summary = PlanSummary::build(
            &instances,
            &placed,
            &unplaced,
            analyzed.metadata.area,
            total_area_hint,
            issues,
            scores,
        );

        tracing::info!(
            requested = summary.rooms_requested,
            placed = summary.rooms_placed,
            unplaced = summary.rooms_unplaced,
            utilization_pct = summary.utilization_pct,
            valid = summary.valid,
            "floor plan generated"
        );

        let plan = FloorPlan {
            boundary: analyzed.plot,
            buildable: analyzed.buildable,
            metadata: analyzed.metadata,
            rooms: placed,
            exterior_outer: openings.exterior_outer,
            exterior_inner: openings.exterior_inner,
            walls: openings.walls,
            doors: openings.doors,
            windows: openings.windows,
            dimensions: openings.dimensions,
            summary,
        };
        if !plan.summary.valid {
            tracing::warn!(
                violations = plan.summary.hard_violation_count(),
                "floor plan violates placement invariants"
            );
            return Err(FloorgenError::PlacementInvariantViolated(Box::new(plan)));
        }
        Ok(plan)
    }
}

impl Default for FloorPlanEngine {
    fn default() -> Self {
        Self::with_catalog(Arc::new(ZoneCatalog::residential()))
    }
}

/// Generates a plan with the built-in residential catalog and default
/// configuration.
///
/// # Errors
///
/// See [`FloorPlanEngine::generate`].
pub fn generate(boundary: &[Point2], rooms: &[RoomRequest], total_area_hint: Option<f64>) -> Result<FloorPlan> {
    FloorPlanEngine::default().generate(boundary, rooms, total_area_hint)
}
