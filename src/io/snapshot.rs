//! Session snapshots: the exported level slice plus the grid it belongs to
//!
//! The payload is the flat row-major level list produced by
//! [`ScanGrid::export_displayed_levels`]; the surrounding fields let a loader
//! refuse a snapshot taken on a grid of different geometry.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::io::configuration::SNAPSHOT_VERSION;
use crate::io::error::{Result, SignalGridError, WithPath};
use crate::scan::grid::ScanGrid;
use crate::scan::reading::{EmitterId, LEVEL_SENTINEL, Level};
use crate::spatial::grid::{GridSize, SpatialGrid};

/// Serialized form of one scan session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Format version
    pub version: u32,
    /// Tiles along world x
    pub width: usize,
    /// Tiles along world z
    pub height: usize,
    /// Tile edge length of the source grid
    pub tile_size: f32,
    /// Margin of the source grid
    pub margin: u32,
    /// Emitter the levels belong to
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub emitter: Option<EmitterId>,
    /// Row-major levels, `i32::MIN` where absent
    pub levels: Vec<Level>,
}

/// Summary of the non-sentinel levels in a snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelStats {
    /// Tiles holding a level
    pub count: usize,
    /// Weakest level
    pub min: Level,
    /// Strongest level
    pub max: Level,
    /// Average level
    pub mean: f64,
}

impl SessionSnapshot {
    /// Capture the selected emitter's levels from a scan grid
    pub fn capture(scan: &ScanGrid) -> Self {
        let grid = scan.grid();
        let GridSize { width, height } = grid.size();
        Self {
            version: SNAPSHOT_VERSION,
            width,
            height,
            tile_size: grid.tile_size(),
            margin: grid.margin(),
            emitter: scan.selected_emitter(),
            levels: scan.export_displayed_levels(),
        }
    }

    /// Grid dimensions recorded in the snapshot
    pub const fn size(&self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Check the version and that the level count matches the dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if the version is unsupported or the level list does
    /// not hold `width * height` entries
    pub fn validate(&self) -> Result<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SignalGridError::InvalidSnapshot {
                reason: format!(
                    "unsupported version {} (expected {SNAPSHOT_VERSION})",
                    self.version
                ),
            });
        }
        let Some(expected) = self.size().checked_point_count() else {
            return Err(SignalGridError::InvalidSnapshot {
                reason: format!("{}x{} grid is too large", self.width, self.height),
            });
        };
        if self.levels.len() != expected {
            return Err(SignalGridError::InvalidSnapshot {
                reason: format!(
                    "{}x{} grid needs {expected} levels, found {}",
                    self.width,
                    self.height,
                    self.levels.len()
                ),
            });
        }
        Ok(())
    }

    /// Whether the snapshot was taken on a grid of the same geometry
    ///
    /// Dimensions, margin and the exact tile size must all agree.
    pub fn matches(&self, grid: &SpatialGrid) -> bool {
        self.size() == grid.size()
            && self.margin == grid.margin()
            && self.tile_size.to_bits() == grid.tile_size().to_bits()
    }

    /// Import the levels into `scan`'s saved table
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot is invalid or its geometry differs
    /// from the scan grid's
    pub fn restore_into(&self, scan: &mut ScanGrid) -> Result<()> {
        self.validate()?;
        let grid = scan.grid();
        if !self.matches(grid) {
            let size = grid.size();
            warn!(
                snapshot_width = self.width,
                snapshot_height = self.height,
                snapshot_tile_size = self.tile_size,
                snapshot_margin = self.margin,
                grid_width = size.width,
                grid_height = size.height,
                grid_tile_size = grid.tile_size(),
                grid_margin = grid.margin(),
                "snapshot belongs to a different grid"
            );
            return Err(SignalGridError::InvalidSnapshot {
                reason: format!(
                    "snapshot is {}x{} tiles of {} with margin {} but the grid is {}x{} tiles of {} with margin {}",
                    self.width,
                    self.height,
                    self.tile_size,
                    self.margin,
                    size.width,
                    size.height,
                    grid.tile_size(),
                    grid.margin()
                ),
            });
        }
        scan.import_displayed_levels(&self.levels)
    }

    /// Statistics over tiles that hold a level
    pub fn level_stats(&self) -> Option<LevelStats> {
        let present = self
            .levels
            .iter()
            .copied()
            .filter(|&level| level != LEVEL_SENTINEL);

        let mut count = 0_usize;
        let mut min = Level::MAX;
        let mut max = Level::MIN;
        let mut sum = 0_i64;
        for level in present {
            count += 1;
            min = min.min(level);
            max = max.max(level);
            sum += i64::from(level);
        }

        (count > 0).then(|| LevelStats {
            count,
            min,
            max,
            mean: sum as f64 / count as f64,
        })
    }

    /// Encode as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|source| SignalGridError::Serialization {
            path: "<memory>".into(),
            source,
        })
    }

    /// Decode and validate a JSON snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the snapshot is invalid
    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(content).map_err(|source| SignalGridError::Serialization {
                path: "<memory>".into(),
                source,
            })?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Write the snapshot as JSON, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created or written
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
        }

        let file = File::create(path).with_path(path, "create snapshot")?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|source| {
            SignalGridError::Serialization {
                path: path.to_path_buf(),
                source,
            }
        })?;
        writer.flush().with_path(path, "write snapshot")?;

        debug!(path = %path.display(), tiles = self.levels.len(), "saved snapshot");
        Ok(())
    }

    /// Read and validate a JSON snapshot file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, decoded or validated
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_path(path, "open snapshot")?;
        let snapshot: Self = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            SignalGridError::Serialization {
                path: path.to_path_buf(),
                source,
            }
        })?;
        snapshot.validate()?;

        debug!(path = %path.display(), width = snapshot.width, height = snapshot.height, "loaded snapshot");
        Ok(snapshot)
    }
}
