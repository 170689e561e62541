//! Session constants and the file-backed configuration
//!
//! Defaults live here as constants; [`SignalGridConfig`] gathers the values a
//! session may override from a TOML file. Missing keys fall back to the
//! defaults.

use std::path::Path;

use glam::Vec3;
use serde::Deserialize;

use crate::io::error::{Result, SignalGridError, WithPath};
use crate::math::interpolation::HeightMapping;
use crate::scan::display::DisplayConfig;
use crate::spatial::grid::SpatialGrid;

// Grid geometry
/// Edge length of one tile in meters
pub const DEFAULT_TILE_SIZE: f32 = 0.5;
/// Tile rings added around the play area
pub const DEFAULT_GRID_MARGIN: u32 = 1;
/// Play-area width used when tracking bounds are unavailable
pub const FALLBACK_AREA_WIDTH: f32 = 2.0;
/// Play-area depth used when tracking bounds are unavailable
pub const FALLBACK_AREA_DEPTH: f32 = 2.0;

// Per-tile storage
/// Upper bound on access points expected in a single scan
pub const DEFAULT_MAX_EMITTERS: usize = 64;

// Visual encoding
/// Sphere diameter in meters
pub const DEFAULT_SPHERE_SIZE: f32 = 0.1;
/// Measured line thickness in meters
pub const DEFAULT_LINE_SIZE: f32 = 0.02;
/// Level drawn at the lowest height
pub const DEFAULT_LOW_LEVEL: i32 = -90;
/// Level drawn at the highest height
pub const DEFAULT_HIGH_LEVEL: i32 = -30;
/// Height of the weakest levels in meters
pub const DEFAULT_LOW_HEIGHT: f32 = 0.2;
/// Height of the strongest levels in meters
pub const DEFAULT_HIGH_HEIGHT: f32 = 1.8;

// Models
/// Distance exponent for inverse-distance weighting
pub const DEFAULT_IDW_POWER: f32 = 2.0;
/// Indoor path loss exponent
pub const DEFAULT_PATH_LOSS_EXPONENT: f32 = 3.0;
/// Distance in meters at which a reference level applies
pub const DEFAULT_REFERENCE_DISTANCE: f32 = 1.0;
/// Uniform noise amplitude of synthetic readings
pub const DEFAULT_READING_NOISE: f32 = 2.0;
/// Weakest level a synthetic scan still reports
pub const HEARING_FLOOR: i32 = -95;

// Persistence
/// Snapshot format version written by this crate
pub const SNAPSHOT_VERSION: u32 = 1;
/// Pixels per tile edge in heat-map exports
pub const DEFAULT_HEATMAP_SCALE: u32 = 16;
/// Largest heat map rendered, in pixels
pub const MAX_HEATMAP_PIXELS: u64 = 1 << 28;

// Offline sessions
/// Fixed seed for reproducible simulated sessions
pub const DEFAULT_SEED: u64 = 42;
/// Random scan positions visited by a simulated session
pub const DEFAULT_SIMULATION_STEPS: usize = 200;
/// Synthetic access points placed by a simulated session
pub const DEFAULT_SIMULATED_EMITTERS: usize = 4;

/// Session configuration, deserializable from TOML
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignalGridConfig {
    /// Edge length of one tile
    pub tile_size: f32,
    /// Tile rings added around the play area
    pub margin: u32,
    /// Per-tile capacity hint
    pub max_emitters: usize,
    /// Sphere diameter
    pub sphere_size: f32,
    /// Measured line thickness
    pub line_size: f32,
    /// Level drawn at `low_height`
    pub low_level: i32,
    /// Level drawn at `high_height`
    pub high_level: i32,
    /// Height of weak levels
    pub low_height: f32,
    /// Height of strong levels
    pub high_height: f32,
    /// Maximum planar distance for nearest-tile snapping
    pub snap_radius: Option<f32>,
    /// Play area `[width, depth]` used when bounds are unavailable
    pub fallback_area: [f32; 2],
    /// Distance exponent for inverse-distance weighting
    pub idw_power: f32,
}

impl Default for SignalGridConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            margin: DEFAULT_GRID_MARGIN,
            max_emitters: DEFAULT_MAX_EMITTERS,
            sphere_size: DEFAULT_SPHERE_SIZE,
            line_size: DEFAULT_LINE_SIZE,
            low_level: DEFAULT_LOW_LEVEL,
            high_level: DEFAULT_HIGH_LEVEL,
            low_height: DEFAULT_LOW_HEIGHT,
            high_height: DEFAULT_HIGH_HEIGHT,
            snap_radius: None,
            fallback_area: [FALLBACK_AREA_WIDTH, FALLBACK_AREA_DEPTH],
            idw_power: DEFAULT_IDW_POWER,
        }
    }
}

impl SignalGridConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML for this struct or
    /// fails [`SignalGridConfig::validate`]
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|error| SignalGridError::InvalidConfiguration {
                reason: error.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_path(path, "read configuration")?;
        Self::from_toml_str(&content).map_err(|error| match error {
            SignalGridError::InvalidConfiguration { reason } => {
                SignalGridError::InvalidConfiguration {
                    reason: format!("{}: {reason}", path.display()),
                }
            }
            other => other,
        })
    }

    /// Check value domains
    ///
    /// # Errors
    ///
    /// Returns an error if a size is negative, the tile size is not positive,
    /// the level thresholds are inverted or the fallback area is degenerate
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Err(SignalGridError::InvalidConfiguration { reason });

        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return invalid(format!("tile_size must be positive, got {}", self.tile_size));
        }
        if self.sphere_size < 0.0 || self.line_size < 0.0 {
            return invalid("sphere_size and line_size must not be negative".to_string());
        }
        if self.low_level > self.high_level {
            return invalid(format!(
                "low_level ({}) exceeds high_level ({})",
                self.low_level, self.high_level
            ));
        }
        if self.snap_radius.is_some_and(|radius| radius < 0.0) {
            return invalid("snap_radius must not be negative".to_string());
        }
        if self
            .fallback_area
            .iter()
            .any(|extent| !extent.is_finite() || *extent <= 0.0)
        {
            return invalid("fallback_area extents must be positive".to_string());
        }
        Ok(())
    }

    /// Level-to-height mapping
    pub const fn height_mapping(&self) -> HeightMapping {
        HeightMapping::new(
            self.low_level,
            self.high_level,
            self.low_height,
            self.high_height,
        )
    }

    /// Visual configuration for a scan grid
    pub const fn display_config(&self) -> DisplayConfig {
        DisplayConfig {
            sphere_size: self.sphere_size,
            line_size: self.line_size,
            heights: self.height_mapping(),
        }
    }

    /// Play area to grid: tracked bounds when usable, otherwise the fallback
    ///
    /// Bounds are unusable when absent or when width or depth is not a
    /// positive finite number.
    pub fn play_area(&self, bounds: Option<Vec3>) -> Vec3 {
        let usable = |extent: f32| extent.is_finite() && extent > 0.0;
        match bounds {
            Some(extent) if usable(extent.x) && usable(extent.z) => extent,
            _ => Vec3::new(self.fallback_area[0], 0.0, self.fallback_area[1]),
        }
    }

    /// Grid over the tracked bounds, or over the fallback area
    ///
    /// # Errors
    ///
    /// Returns an error if the configured tile size is invalid
    pub fn build_grid(&self, bounds: Option<Vec3>) -> Result<SpatialGrid> {
        SpatialGrid::new(self.play_area(bounds), self.tile_size, self.margin)
    }
}
