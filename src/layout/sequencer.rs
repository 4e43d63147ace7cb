use crate::catalog::{AnchorRule, RoomType, ZoneCatalog};
use crate::config::EngineConfig;
use crate::geometry::{Boundary, Rect};
use crate::plot::PlotMetadata;

use super::site::{interior_candidates, rank_sites, EdgeFrame, Site};
use super::{Placement, PlacedRoom, RelaxState, RoomInstance, UnplacedRoom};

/// Connection rank of a candidate: lower is better.
const RANK_PREFERRED: u8 = 0;
const RANK_DOORWAY: u8 = 1;
const RANK_TOUCHING: u8 = 2;
const RANK_ISOLATED: u8 = 3;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    rect: Rect,
    site: Site,
    rank: u8,
}

/// What one relaxation stage searches.
struct Stage<'s> {
    sites: &'s [Site],
    sizes: &'s [(f64, f64)],
    snap: bool,
    step: Option<f64>,
}

/// Places room instances one by one, in order, inside a buildable boundary.
///
/// Each instance walks the [`RelaxState`] chain until a candidate rectangle
/// is found that lies inside the boundary, overlaps no earlier room and
/// (once a room exists) shares a doorway-sized edge with one.
pub struct PlacementSequencer<'a> {
    boundary: &'a Boundary,
    metadata: &'a PlotMetadata,
    catalog: &'a ZoneCatalog,
    config: &'a EngineConfig,
    frames: Vec<EdgeFrame>,
}

impl<'a> PlacementSequencer<'a> {
    /// Creates a new sequencer over an analyzed buildable boundary.
    #[must_use]
    pub fn new(
        boundary: &'a Boundary,
        metadata: &'a PlotMetadata,
        catalog: &'a ZoneCatalog,
        config: &'a EngineConfig,
    ) -> Self {
        let frames = (0..boundary.len())
            .filter_map(|i| EdgeFrame::new(boundary, i))
            .collect();
        Self {
            boundary,
            metadata,
            catalog,
            config,
            frames,
        }
    }

    /// Places `instances` in the given order.
    ///
    /// Never fails: instances that cannot be fitted are reported in
    /// [`Placement::unplaced`]. When leftover absorption is enabled and no
    /// store room was requested, an implicit store room is added if it can be
    /// attached to the plan.
    #[must_use]
    pub fn execute(&self, instances: &[RoomInstance]) -> Placement {
        let mut placement = Placement::default();

        for instance in instances {
            match self.place(instance, &placement.rooms) {
                Some((candidate, state)) => {
                    let room = record(instance, candidate, state, placement.rooms.len());
                    tracing::debug!(
                        room = %room.label,
                        state = ?state,
                        site = ?candidate.site,
                        area = room.area,
                        "room placed"
                    );
                    placement.rooms.push(room);
                }
                None => {
                    tracing::warn!(room = %instance.label, "room could not be placed");
                    placement.unplaced.push(UnplacedRoom {
                        label: instance.label.clone(),
                        room_type: instance.spec.room_type,
                        zone: instance.spec.zone,
                        target_area: instance.target_area(),
                        reason: "no free position with a doorway to the placed rooms".to_string(),
                    });
                }
            }
        }

        self.absorb_leftover(instances, &mut placement);
        placement
    }

    fn absorb_leftover(&self, instances: &[RoomInstance], placement: &mut Placement) {
        if !self.config.placement.absorb_leftover
            || instances.iter().any(|i| i.spec.room_type == RoomType::Store)
        {
            return;
        }
        let Some(spec) = self.catalog.spec(RoomType::Store) else {
            return;
        };
        let instance = RoomInstance::implicit(spec);
        match self.place(&instance, &placement.rooms) {
            Some((candidate, state)) if candidate.rank <= RANK_DOORWAY => {
                let room = record(&instance, candidate, state, placement.rooms.len());
                tracing::debug!(room = %room.label, area = room.area, "leftover absorbed");
                placement.rooms.push(room);
            }
            _ => tracing::debug!("no attached space left for an implicit store room"),
        }
    }

    /// Runs the relaxation chain for one instance. After the first room, only
    /// positions sharing a doorway-length edge with a placed room are taken.
    fn place(&self, instance: &RoomInstance, placed: &[PlacedRoom]) -> Option<(Candidate, RelaxState)> {
        let rule = self
            .catalog
            .anchor_rule(&instance.spec, self.metadata.north_angle_deg.is_some());
        let rects: Vec<Rect> = placed.iter().map(|r| r.rect).collect();
        let sites = rank_sites(
            rule,
            self.boundary,
            self.metadata,
            &self.frames,
            &rects,
            instance.spec.needs_exterior,
        );
        let (primary, others) = sites.split_at(sites.len().min(1));
        let sizes = instance.sizes(self.config.placement.shrink_steps);
        let (target, smaller) = sizes.split_at(1);
        let step = Some(self.config.placement.slide_step);
        let snap_ends = !matches!(rule, AnchorRule::Corner);

        let mut state = RelaxState::Anchored;
        while !state.is_terminal() {
            let stage = match state {
                RelaxState::Anchored => Stage { sites: primary, sizes: target, snap: snap_ends, step: None },
                RelaxState::Shrinking => Stage { sites: primary, sizes: smaller, snap: snap_ends, step: None },
                RelaxState::Sliding => Stage { sites: primary, sizes: &sizes, snap: true, step },
                RelaxState::FallbackZone | RelaxState::Unplaced => {
                    Stage { sites: others, sizes: &sizes, snap: true, step }
                }
            };
            if let Some(best) = self.search(instance, &stage, placed) {
                if placed.is_empty() || best.rank <= RANK_DOORWAY {
                    return Some((best, state));
                }
            }
            let next = state.next();
            tracing::debug!(room = %instance.label, from = ?state, to = ?next, "relaxing placement");
            state = next;
        }
        None
    }

    /// Best feasible candidate of a stage: lowest rank, first found on ties.
    fn search(&self, instance: &RoomInstance, stage: &Stage<'_>, placed: &[PlacedRoom]) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for &site in stage.sites {
            for &(width, depth) in stage.sizes {
                for (along, deep) in orientations(width, depth) {
                    for rect in self.candidates(site, along, deep, placed, stage) {
                        if !self.is_feasible(&rect, placed) {
                            continue;
                        }
                        let rank = self.connection_rank(instance, &rect, placed);
                        if best.is_none_or(|b| rank < b.rank) {
                            best = Some(Candidate { rect, site, rank });
                            if rank == RANK_PREFERRED {
                                return best;
                            }
                        }
                    }
                }
            }
        }
        best
    }

    fn candidates(
        &self,
        site: Site,
        along: f64,
        deep: f64,
        placed: &[PlacedRoom],
        stage: &Stage<'_>,
    ) -> Vec<Rect> {
        match site {
            Site::Edge(edge) => {
                let Some(frame) = self.frames.iter().find(|f| f.edge == edge) else {
                    return Vec::new();
                };
                let rects: Vec<Rect> = placed.iter().map(|r| r.rect).collect();
                frame
                    .positions(along, &rects, stage.snap, stage.step)
                    .into_iter()
                    .map(|s| frame.rect_at(s, along, deep))
                    .collect()
            }
            Site::Interior => placed
                .iter()
                .flat_map(|host| interior_candidates(&host.rect, along, deep))
                .collect(),
        }
    }

    fn is_feasible(&self, rect: &Rect, placed: &[PlacedRoom]) -> bool {
        let tol = self.config.validation.tolerance;
        self.boundary.contains_rect(rect, tol)
            && placed.iter().all(|p| p.rect.overlap_area(rect) <= tol)
    }

    fn connection_rank(&self, instance: &RoomInstance, rect: &Rect, placed: &[PlacedRoom]) -> u8 {
        let tol = self.config.validation.tolerance;
        let min_span = self.config.doors.min_door_span;
        let mut rank = RANK_ISOLATED;
        for other in placed {
            match rect.shared_edge(&other.rect, tol) {
                Some(edge) if edge.length() + tol >= min_span => {
                    let preferred = instance.spec.adjacent_zone == Some(other.zone)
                        || (instance.spec.wet && other.wet);
                    if preferred {
                        return RANK_PREFERRED;
                    }
                    rank = rank.min(RANK_DOORWAY);
                }
                _ if rect.touches(&other.rect, tol) => rank = rank.min(RANK_TOUCHING),
                _ => {}
            }
        }
        rank
    }
}

fn record(instance: &RoomInstance, candidate: Candidate, state: RelaxState, index: usize) -> PlacedRoom {
    let rect = candidate.rect;
    PlacedRoom {
        index,
        label: instance.label.clone(),
        room_type: instance.spec.room_type,
        zone: instance.spec.zone,
        rect,
        polygon: rect.to_polygon(),
        centroid: rect.center(),
        area: rect.area(),
        target_area: instance.target_area(),
        relaxation: state,
        site: candidate.site,
        needs_exterior: instance.spec.needs_exterior,
        wet: instance.spec.wet,
        implicit: instance.implicit,
        success: true,
    }
}

/// The size as given, then rotated when it is not square.
fn orientations(width: f64, depth: f64) -> Vec<(f64, f64)> {
    if (width - depth).abs() < 1e-9 {
        vec![(width, depth)]
    } else {
        vec![(width, depth), (depth, width)]
    }
}
