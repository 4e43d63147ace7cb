use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::RoomType;
use crate::plan::FloorPlan;

/// Top-level error type for the floor-plan engine.
#[derive(Debug, Error)]
pub enum FloorgenError {
    #[error("invalid boundary: {0}")]
    InvalidBoundary(#[from] BoundaryError),

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(#[from] GeometryError),

    #[error(
        "placement invariant violated: {} hard violation(s)",
        .0.summary.hard_violation_count()
    )]
    PlacementInvariantViolated(Box<FloorPlan>),

    #[error("invalid room request: {0}")]
    InvalidRequest(#[from] RequestError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while accepting a plot boundary.
#[derive(Debug, Error, PartialEq)]
pub enum BoundaryError {
    #[error("{count} distinct vertices, at least 3 are required")]
    TooFewVertices { count: usize },

    #[error("boundary encloses zero area")]
    ZeroArea,

    #[error("edges {first} and {second} intersect")]
    SelfIntersecting { first: usize, second: usize },

    #[error("boundary contains a non-finite coordinate")]
    NonFinite,
}

/// Errors raised by kernel operations on degenerate input.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("{0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised while validating room requests.
#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("{room_type} requested with quantity 0")]
    ZeroQuantity { room_type: RoomType },

    #[error("{room_type} desired area {desired} is below the minimum {minimum}")]
    AreaBelowMinimum {
        room_type: RoomType,
        desired: f64,
        minimum: f64,
    },

    #[error("no catalog entry for {0}")]
    UnknownRoomType(RoomType),
}

/// Errors raised while loading configuration or a zone catalog.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("placement order names {0} but the catalog has no spec for it")]
    MissingSpec(RoomType),

    #[error("{0}")]
    Invalid(String),
}

/// Convenience type alias for results using [`FloorgenError`].
pub type Result<T> = std::result::Result<T, FloorgenError>;
