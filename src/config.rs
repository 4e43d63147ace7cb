//! Engine configuration.
//!
//! Every numeric threshold used by the analyzer, sequencer, generator and
//! validator lives here. A TOML document only needs to name the values it
//! overrides; everything else keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub plot: PlotConfig,
    pub placement: PlacementConfig,
    pub walls: WallConfig,
    pub doors: DoorConfig,
    pub windows: WindowConfig,
    pub validation: ValidationConfig,
    pub dimensions: DimensionConfig,
}

impl EngineConfig {
    /// Parses a (possibly partial) TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` on malformed TOML or unknown keys, and
    /// `ConfigError::Invalid` when a value is out of range.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`EngineConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks ranges that the type system does not.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let plot = &self.plot;
        if plot.grid_spacing_min <= 0.0 || plot.grid_spacing_min > plot.grid_spacing_max {
            return Err(ConfigError::Invalid(format!(
                "grid spacing range {}..{} is empty",
                plot.grid_spacing_min, plot.grid_spacing_max
            )));
        }
        if plot.parking_width <= 0.0 || plot.parking_depth <= 0.0 {
            return Err(ConfigError::Invalid("parking slot must have a positive size".into()));
        }
        if plot.setback < 0.0 {
            return Err(ConfigError::Invalid(format!("negative setback {}", plot.setback)));
        }
        if self.placement.slide_step <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "slide step must be positive, got {}",
                self.placement.slide_step
            )));
        }
        if self.walls.mm_per_unit <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "mm_per_unit must be positive, got {}",
                self.walls.mm_per_unit
            )));
        }
        if !(0.0..=1.0).contains(&self.doors.width_fraction) {
            return Err(ConfigError::Invalid(format!(
                "door width fraction {} outside 0..1",
                self.doors.width_fraction
            )));
        }
        if self.windows.min_width > self.windows.max_width {
            return Err(ConfigError::Invalid(format!(
                "window width clamp {}..{} is empty",
                self.windows.min_width, self.windows.max_width
            )));
        }
        Ok(())
    }
}

/// Plot analysis thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    /// Interior angles below this (degrees) make a narrow corner.
    pub narrow_corner_angle_deg: f64,
    /// Shorter/longer adjacent edge ratio below this makes a narrow corner.
    pub narrow_edge_ratio: f64,
    /// Maximum deviation from exactly opposite outward normals (degrees).
    pub ventilation_tolerance_deg: f64,
    pub grid_spacing_min: f64,
    pub grid_spacing_max: f64,
    /// Parking slot size along the road edge.
    pub parking_width: f64,
    /// Parking slot size perpendicular to the road edge.
    pub parking_depth: f64,
    /// Extra sample coordinates per axis for the inscribed rectangle search.
    pub inscribed_samples: usize,
    /// Inward offset applied to the plot before analysis.
    pub setback: f64,
    /// Rescale the plot about its centroid to match the area hint.
    pub scale_to_area_hint: bool,
    /// Bearing of north, in degrees counter-clockwise from +y. Enables
    /// orientation anchoring when set.
    pub north_angle_deg: Option<f64>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            narrow_corner_angle_deg: 60.0,
            narrow_edge_ratio: 0.2,
            ventilation_tolerance_deg: 10.0,
            grid_spacing_min: 10.0,
            grid_spacing_max: 15.0,
            parking_width: 10.0,
            parking_depth: 18.0,
            inscribed_samples: 12,
            setback: 0.0,
            scale_to_area_hint: false,
            north_angle_deg: None,
        }
    }
}

/// Placement relaxation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlacementConfig {
    /// Distance between sliding positions along an edge.
    pub slide_step: f64,
    /// Number of intermediate sizes between target and minimum area.
    pub shrink_steps: usize,
    /// Fill leftover space with an implicit store room.
    pub absorb_leftover: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            slide_step: 1.0,
            shrink_steps: 4,
            absorb_leftover: true,
        }
    }
}

/// Wall thickness, in nominal millimetres, and the drawing scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WallConfig {
    pub exterior_thickness_mm: f64,
    pub interior_thickness_mm: f64,
    /// Millimetres per plan unit (304.8 for feet).
    pub mm_per_unit: f64,
    /// Shared edges shorter than this get no interior wall.
    pub min_wall_span: f64,
}

impl WallConfig {
    #[must_use]
    pub fn exterior_thickness(&self) -> f64 {
        self.exterior_thickness_mm / self.mm_per_unit
    }

    #[must_use]
    pub fn interior_thickness(&self) -> f64 {
        self.interior_thickness_mm / self.mm_per_unit
    }
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            exterior_thickness_mm: 230.0,
            interior_thickness_mm: 115.0,
            mm_per_unit: 304.8,
            min_wall_span: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DoorConfig {
    /// Shared edges shorter than this get no door.
    pub min_door_span: f64,
    /// Door width as a fraction of the shared edge length.
    pub width_fraction: f64,
    /// Upper bound on the door width.
    pub standard_width: f64,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            min_door_span: 3.0,
            width_fraction: 0.8,
            standard_width: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    /// Window width as a fraction of the room's exterior frontage.
    pub frontage_fraction: f64,
    pub min_width: f64,
    pub max_width: f64,
    /// Offset of the two frame lines from the window centre line.
    pub frame_offset: f64,
    /// Add a second window on an opposite-facing exterior edge.
    pub cross_ventilation: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            frontage_fraction: 0.4,
            min_width: 2.0,
            max_width: 6.0,
            frame_offset: 0.25,
            cross_ventilation: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    pub max_aspect_ratio: f64,
    pub min_room_side: f64,
    /// Area tolerance for containment and overlap checks.
    pub tolerance: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_aspect_ratio: 3.0,
            min_room_side: 4.0,
            tolerance: 1e-6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DimensionConfig {
    /// Distance of dimension lines inside the room edge.
    pub offset: f64,
}

impl Default for DimensionConfig {
    fn default() -> Self {
        Self { offset: 1.0 }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_wall_thickness_in_feet() {
        let walls = WallConfig::default();
        assert_relative_eq!(walls.exterior_thickness(), 0.7546, epsilon = 1e-4);
        assert_relative_eq!(walls.interior_thickness(), 0.3773, epsilon = 1e-4);
    }

    #[test]
    fn partial_toml_overrides_only_named_values() {
        let config = EngineConfig::from_toml_str(
            r"
            [doors]
            min_door_span = 4.0

            [plot]
            north_angle_deg = 0.0
            ",
        )
        .unwrap();
        assert_relative_eq!(config.doors.min_door_span, 4.0);
        assert_relative_eq!(config.doors.standard_width, 3.0);
        assert_eq!(config.plot.north_angle_deg, Some(0.0));
        assert_eq!(config.placement, PlacementConfig::default());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = EngineConfig::from_toml_str("[doors]\nwidth = 3.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_grid_range_is_invalid() {
        let err = EngineConfig::from_toml_str("[plot]\ngrid_spacing_min = 20.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = EngineConfig::load(Path::new("/nonexistent/floorgen.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/floorgen.toml"));
    }
}
