//! Scan grid: per-tile scan, computed and saved tables plus their display lists
//!
//! Every tile is in exactly one scan state, derived on each rebuild:
//! - unscanned: no readings at all
//! - scanned-absent: readings exist but none from the selected emitter
//! - scanned-present: the selected emitter was heard; its level sets a height
//!
//! Mutations run to completion and rebuild the affected display lists before
//! returning. Tables are `(width, height)` arrays, so their flat order is
//! `x * height + y`, the same order used by exported level snapshots.

use std::collections::BTreeSet;
use std::sync::Arc;

use glam::Vec3;
use ndarray::Array2;
use tracing::{debug, trace, warn};

use crate::io::error::{Result, SignalGridError, computation_error};
use crate::model::SignalModel;
use crate::scan::cell::CellReadings;
use crate::scan::display::{DisplayCategory, DisplayConfig, DisplayLists};
use crate::scan::reading::{EmitterId, LEVEL_SENTINEL, Level, Reading};
use crate::spatial::grid::{SpatialGrid, TileCoord};
use crate::spatial::transform::Transform;

/// Marks a computed cell that holds no value
pub const COMPUTED_SENTINEL: f32 = f32::MIN;

/// Whether a computed value is real data rather than the sentinel (or NaN)
pub fn has_computed_value(value: f32) -> bool {
    value > COMPUTED_SENTINEL
}

/// Everything known about one tile; absent values hold their sentinel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileQuery {
    /// Selected emitter's measured level, or [`LEVEL_SENTINEL`]
    pub scanned: Level,
    /// Modeled level, or [`COMPUTED_SENTINEL`]
    pub computed: f32,
    /// Restored level, or [`LEVEL_SENTINEL`]
    pub saved: Level,
}

impl TileQuery {
    /// Query result for a position with no data
    pub const EMPTY: Self = Self {
        scanned: LEVEL_SENTINEL,
        computed: COMPUTED_SENTINEL,
        saved: LEVEL_SENTINEL,
    };

    /// Measured level if present
    pub const fn scanned_level(&self) -> Option<Level> {
        if self.scanned == LEVEL_SENTINEL {
            None
        } else {
            Some(self.scanned)
        }
    }

    /// Modeled level if present
    pub fn computed_level(&self) -> Option<f32> {
        has_computed_value(self.computed).then_some(self.computed)
    }

    /// Saved level if present
    pub const fn saved_level(&self) -> Option<Level> {
        if self.saved == LEVEL_SENTINEL {
            None
        } else {
            Some(self.saved)
        }
    }
}

/// Owner of every per-tile table and the display lists derived from them
#[derive(Debug, Clone)]
pub struct ScanGrid {
    grid: Arc<SpatialGrid>,
    display: DisplayConfig,
    snap_radius: Option<f32>,
    max_emitters: usize,
    selected: Option<EmitterId>,
    scans: Array2<CellReadings>,
    computed: Option<Array2<f32>>,
    saved: Option<Array2<Level>>,
    lists: DisplayLists,
}

impl ScanGrid {
    /// Create an initialized scan grid over `grid`
    ///
    /// `max_emitters` bounds the per-tile capacity reserved when a scan is
    /// recorded.
    pub fn new(grid: Arc<SpatialGrid>, display: DisplayConfig, max_emitters: usize) -> Self {
        let shape = grid.size().shape();
        let mut scan_grid = Self {
            grid,
            display,
            snap_radius: None,
            max_emitters,
            selected: None,
            scans: Array2::default(shape),
            computed: None,
            saved: None,
            lists: DisplayLists::default(),
        };
        scan_grid.initialize(max_emitters);
        scan_grid
    }

    /// Limit [`ScanGrid::nearest_tile`] to tiles within `radius` (planar distance)
    #[must_use]
    pub fn with_snap_radius(mut self, radius: Option<f32>) -> Self {
        self.snap_radius = radius;
        self
    }

    /// Reset every table to the grid size, discarding all recorded data
    ///
    /// The selected emitter is kept.
    pub fn initialize(&mut self, max_emitters: usize) {
        self.max_emitters = max_emitters;
        self.scans = Array2::default(self.grid.size().shape());
        self.computed = None;
        self.saved = None;
        self.rebuild_scan_display();
        self.lists
            .rebuild_computed(&self.grid, None, &self.display);
        self.lists.rebuild_saved(&self.grid, None, &self.display);

        debug!(
            tiles = self.grid.point_count(),
            max_emitters, "initialized scan grid"
        );
    }

    /// Shared coordinate transform
    pub const fn grid(&self) -> &Arc<SpatialGrid> {
        &self.grid
    }

    /// Visual configuration
    pub const fn display_config(&self) -> &DisplayConfig {
        &self.display
    }

    /// Emitter whose level drives the measured category
    pub const fn selected_emitter(&self) -> Option<EmitterId> {
        self.selected
    }

    /// Per-tile capacity hint
    pub const fn max_emitters(&self) -> usize {
        self.max_emitters
    }

    /// Select the displayed emitter and rebuild the scan categories
    pub fn set_selected_emitter(&mut self, emitter: EmitterId) {
        self.selected = Some(emitter);
        self.rebuild_scan_display();
    }

    /// Tile under `position` and whether a scan may be recorded there
    ///
    /// Allowed only for in-bounds tiles that hold no readings, whichever
    /// emitter is selected.
    pub fn can_scan_at(&self, position: Vec3) -> (TileCoord, bool) {
        let (coord, inside) = self.grid.to_grid(position);
        let allowed = inside
            && self
                .grid
                .slot(coord)
                .and_then(|slot| self.scans.get(slot))
                .is_some_and(CellReadings::is_empty);
        (coord, allowed)
    }

    /// Record a batch of readings captured at `position`
    ///
    /// Positions outside the grid or with non-finite coordinates are ignored
    /// and return `None`. An emitter already present in the tile keeps its
    /// first level. The scan categories are rebuilt after insertion.
    pub fn record_scan(&mut self, position: Vec3, readings: &[Reading]) -> Option<TileCoord> {
        let (coord, inside) = self.grid.to_grid(position);
        let Some(cell) = self
            .grid
            .slot(coord)
            .filter(|_| inside)
            .and_then(|slot| self.scans.get_mut(slot))
        else {
            trace!(x = coord.x, y = coord.y, "ignoring scan outside grid");
            return None;
        };

        let room = self.max_emitters.saturating_sub(cell.len());
        cell.reserve(readings.len().min(room));
        let stored = readings
            .iter()
            .filter(|&&reading| cell.insert(reading))
            .count();

        trace!(
            x = coord.x,
            y = coord.y,
            stored,
            dropped = readings.len() - stored,
            "recorded scan"
        );

        self.rebuild_scan_display();
        Some(coord)
    }

    /// Scanned, computed and saved values at the tile under `position`
    ///
    /// Positions outside the grid yield [`TileQuery::EMPTY`].
    pub fn query_at(&self, position: Vec3) -> TileQuery {
        let (coord, inside) = self.grid.to_grid(position);
        let Some(slot) = self.grid.slot(coord).filter(|_| inside) else {
            return TileQuery::EMPTY;
        };

        let scanned = self
            .scans
            .get(slot)
            .and_then(|cell| self.selected.and_then(|emitter| cell.get(emitter)))
            .unwrap_or(LEVEL_SENTINEL);
        let computed = self
            .computed
            .as_ref()
            .and_then(|table| table.get(slot).copied())
            .unwrap_or(COMPUTED_SENTINEL);
        let saved = self
            .saved
            .as_ref()
            .and_then(|table| table.get(slot).copied())
            .unwrap_or(LEVEL_SENTINEL);

        TileQuery {
            scanned,
            computed,
            saved,
        }
    }

    /// Evaluate `model` once per tile at the tile's world position
    ///
    /// Replaces the whole computed table and rebuilds the computed category
    /// only. Return [`COMPUTED_SENTINEL`] for tiles without an estimate.
    pub fn compute_grid<F>(&mut self, mut model: F)
    where
        F: FnMut(Vec3) -> f32,
    {
        let grid = Arc::clone(&self.grid);
        let table = Array2::from_shape_fn(grid.size().shape(), |(x, y)| {
            model(grid.to_world(TileCoord::new(x as i32, y as i32)))
        });

        self.computed = Some(table);
        self.lists
            .rebuild_computed(&self.grid, self.computed.as_ref(), &self.display);

        debug!(
            shown = self.lists.get(DisplayCategory::Computed).len(),
            "computed grid"
        );
    }

    /// [`ScanGrid::compute_grid`] driven by a [`SignalModel`]
    pub fn compute_with<M: SignalModel + ?Sized>(&mut self, model: &M) {
        self.compute_grid(|position| model.level_at(position));
    }

    /// Row-major snapshot of the selected emitter's levels
    ///
    /// Tiles without a level for the selected emitter hold [`LEVEL_SENTINEL`].
    pub fn export_displayed_levels(&self) -> Vec<Level> {
        self.scans
            .iter()
            .map(|cell| {
                self.selected
                    .and_then(|emitter| cell.get(emitter))
                    .unwrap_or(LEVEL_SENTINEL)
            })
            .collect()
    }

    /// Restore a row-major level snapshot into the saved table
    ///
    /// Sentinel entries mean "no saved value" and are not displayed.
    ///
    /// # Errors
    ///
    /// Returns an error if `levels` does not hold exactly one entry per tile;
    /// nothing is changed in that case
    pub fn import_displayed_levels(&mut self, levels: &[Level]) -> Result<()> {
        let expected = self.grid.point_count();
        if levels.len() != expected {
            warn!(expected, actual = levels.len(), "rejected level import");
            return Err(SignalGridError::InvalidArgument {
                argument: "levels",
                expected,
                actual: levels.len(),
            });
        }

        let table = Array2::from_shape_vec(self.grid.size().shape(), levels.to_vec())
            .map_err(|error| computation_error("import_displayed_levels", &error))?;

        self.saved = Some(table);
        self.lists
            .rebuild_saved(&self.grid, self.saved.as_ref(), &self.display);

        debug!(
            shown = self.lists.get(DisplayCategory::Saved).len(),
            "imported saved levels"
        );
        Ok(())
    }

    /// Hide the saved category; the saved table itself is kept
    pub fn discard_saved(&mut self) {
        self.lists.clear_saved();
    }

    /// World position of the tile nearest to `position`
    ///
    /// Returns `(Vec3::ZERO, false)` when the nearest tile is outside the grid
    /// or farther than the configured snap radius.
    pub fn nearest_tile(&self, position: Vec3) -> (Vec3, bool) {
        let (coord, distance) = self.grid.to_grid_with_distance(position);
        let within_radius = distance.is_finite()
            && self.snap_radius.is_none_or(|radius| distance <= radius);
        if self.grid.contains(coord) && within_radius {
            (self.grid.to_world(coord), true)
        } else {
            (Vec3::ZERO, false)
        }
    }

    /// Transforms of one display category
    pub fn display(&self, category: DisplayCategory) -> &[Transform] {
        self.lists.get(category)
    }

    /// Every display list
    pub const fn display_lists(&self) -> &DisplayLists {
        &self.lists
    }

    /// Readings recorded at a tile
    pub fn readings_at(&self, coord: TileCoord) -> Option<&CellReadings> {
        self.grid.slot(coord).and_then(|slot| self.scans.get(slot))
    }

    /// Number of tiles holding at least one reading
    pub fn scanned_tile_count(&self) -> usize {
        self.scans.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Every emitter heard anywhere, ascending
    pub fn known_emitters(&self) -> Vec<EmitterId> {
        self.scans
            .iter()
            .flat_map(CellReadings::iter)
            .map(|reading| reading.emitter)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Emitter with the single highest recorded level; ties go to the smaller id
    pub fn strongest_emitter(&self) -> Option<EmitterId> {
        self.scans
            .iter()
            .filter_map(CellReadings::strongest)
            .fold(None, |best: Option<Reading>, reading| match best {
                Some(current)
                    if current.level > reading.level
                        || (current.level == reading.level
                            && current.emitter <= reading.emitter) =>
                {
                    Some(current)
                }
                _ => Some(reading),
            })
            .map(|reading| reading.emitter)
    }

    /// Tile positions and levels of every tile holding the selected emitter
    pub fn measured_samples(&self) -> Vec<(Vec3, Level)> {
        let Some(emitter) = self.selected else {
            return Vec::new();
        };
        self.scans
            .indexed_iter()
            .filter_map(|((x, y), cell)| {
                cell.get(emitter)
                    .map(|level| (self.grid.to_world(TileCoord::new(x as i32, y as i32)), level))
            })
            .collect()
    }

    fn rebuild_scan_display(&mut self) {
        self.lists
            .rebuild_scans(&self.grid, &self.scans, self.selected, &self.display);
    }
}
