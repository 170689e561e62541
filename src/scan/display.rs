//! Display categories and the transform lists projected from the tables
//!
//! Lists are rebuilt from scratch whenever their source table or the
//! selected emitter changes. Each rebuild fills fresh vectors and only then
//! replaces the published ones, so a reader never sees a half-built frame.

use glam::Vec3;
use ndarray::Array2;
use tracing::trace;

use crate::io::configuration::{DEFAULT_LINE_SIZE, DEFAULT_SPHERE_SIZE};
use crate::math::interpolation::HeightMapping;
use crate::scan::cell::CellReadings;
use crate::scan::grid::has_computed_value;
use crate::scan::reading::{EmitterId, LEVEL_SENTINEL, Level};
use crate::spatial::grid::{SpatialGrid, TileCoord};
use crate::spatial::transform::Transform;

/// What a transform list depicts; the renderer pairs each with a mesh and material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayCategory {
    /// Tile never scanned
    NotScanned,
    /// Tile scanned without hearing the selected emitter
    ScannedEmpty,
    /// Sphere at the height of the selected emitter's measured level
    MeasuredSphere,
    /// Line joining a measured sphere to its tile
    MeasuredLine,
    /// Sphere at the height of the modeled level
    Computed,
    /// Sphere at the height of a level restored from a snapshot
    Saved,
}

impl DisplayCategory {
    /// Every category in draw order
    pub const ALL: [Self; 6] = [
        Self::NotScanned,
        Self::ScannedEmpty,
        Self::MeasuredSphere,
        Self::MeasuredLine,
        Self::Computed,
        Self::Saved,
    ];
}

/// Visual sizes and the height encoding used by every list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayConfig {
    /// Diameter of every sphere
    pub sphere_size: f32,
    /// Thickness of measured lines
    pub line_size: f32,
    /// Level-to-height mapping
    pub heights: HeightMapping,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            sphere_size: DEFAULT_SPHERE_SIZE,
            line_size: DEFAULT_LINE_SIZE,
            heights: HeightMapping::default(),
        }
    }
}

/// Categorized draw transforms, one list per [`DisplayCategory`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayLists {
    not_scanned: Vec<Transform>,
    scanned_empty: Vec<Transform>,
    measured_spheres: Vec<Transform>,
    measured_lines: Vec<Transform>,
    computed: Vec<Transform>,
    saved: Vec<Transform>,
}

impl DisplayLists {
    /// Transforms of one category in row-major tile order
    pub fn get(&self, category: DisplayCategory) -> &[Transform] {
        match category {
            DisplayCategory::NotScanned => &self.not_scanned,
            DisplayCategory::ScannedEmpty => &self.scanned_empty,
            DisplayCategory::MeasuredSphere => &self.measured_spheres,
            DisplayCategory::MeasuredLine => &self.measured_lines,
            DisplayCategory::Computed => &self.computed,
            DisplayCategory::Saved => &self.saved,
        }
    }

    /// Total transforms across all categories
    pub fn total(&self) -> usize {
        DisplayCategory::ALL
            .iter()
            .map(|&category| self.get(category).len())
            .sum()
    }

    /// Rebuild the three scan categories and measured lines
    pub(crate) fn rebuild_scans(
        &mut self,
        grid: &SpatialGrid,
        scans: &Array2<CellReadings>,
        selected: Option<EmitterId>,
        config: &DisplayConfig,
    ) {
        let mut not_scanned = Vec::new();
        let mut scanned_empty = Vec::new();
        let mut measured_spheres = Vec::new();
        let mut measured_lines = Vec::new();

        for ((x, y), cell) in scans.indexed_iter() {
            let tile = grid.to_world(TileCoord::new(x as i32, y as i32));
            if cell.is_empty() {
                not_scanned.push(Transform::sphere(tile, config.sphere_size));
                continue;
            }
            match selected.and_then(|emitter| cell.get(emitter)) {
                Some(level) => {
                    let height = config.heights.level_height(level);
                    measured_spheres.push(Transform::sphere(
                        tile + Vec3::Y * height,
                        config.sphere_size,
                    ));
                    measured_lines.push(Transform::line(tile, height, config.line_size));
                }
                None => scanned_empty.push(Transform::sphere(tile, config.sphere_size)),
            }
        }

        trace!(
            not_scanned = not_scanned.len(),
            scanned_empty = scanned_empty.len(),
            measured = measured_spheres.len(),
            "rebuilt scan display"
        );

        self.not_scanned = not_scanned;
        self.scanned_empty = scanned_empty;
        self.measured_spheres = measured_spheres;
        self.measured_lines = measured_lines;
    }

    /// Rebuild the computed category; cells holding the sentinel are skipped
    pub(crate) fn rebuild_computed(
        &mut self,
        grid: &SpatialGrid,
        computed: Option<&Array2<f32>>,
        config: &DisplayConfig,
    ) {
        let mut spheres = Vec::new();
        if let Some(table) = computed {
            for ((x, y), &value) in table.indexed_iter() {
                if !has_computed_value(value) {
                    continue;
                }
                let tile = grid.to_world(TileCoord::new(x as i32, y as i32));
                let height = config.heights.height(value);
                spheres.push(Transform::sphere(
                    tile + Vec3::Y * height,
                    config.sphere_size,
                ));
            }
        }
        self.computed = spheres;
    }

    /// Rebuild the saved category; sentinel cells are skipped
    pub(crate) fn rebuild_saved(
        &mut self,
        grid: &SpatialGrid,
        saved: Option<&Array2<Level>>,
        config: &DisplayConfig,
    ) {
        let mut spheres = Vec::new();
        if let Some(table) = saved {
            for ((x, y), &level) in table.indexed_iter() {
                if level == LEVEL_SENTINEL {
                    continue;
                }
                let tile = grid.to_world(TileCoord::new(x as i32, y as i32));
                let height = config.heights.level_height(level);
                spheres.push(Transform::sphere(
                    tile + Vec3::Y * height,
                    config.sphere_size,
                ));
            }
        }
        self.saved = spheres;
    }

    /// Drop the saved category
    pub(crate) fn clear_saved(&mut self) {
        self.saved.clear();
    }
}
