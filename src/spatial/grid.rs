//! Tile grid over the tracked play area with exact world/grid conversion
//!
//! The grid is centered on the play area and padded by `margin` tiles on
//! every side. Tile `(0, 0)` sits at the minimum corner; grid `x` runs along
//! world x and grid `y` along world z. The vertical axis is ignored by every
//! conversion.

use glam::{Vec2, Vec3};
use tracing::debug;

use crate::io::error::{Result, invalid_parameter};

/// Largest tile count per axis; tile coordinates are `i32`
const MAX_AXIS_TILES: usize = i32::MAX as usize;

/// Integer tile coordinates, possibly outside the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileCoord {
    /// Column along world x
    pub x: i32,
    /// Row along world z
    pub y: i32,
}

impl TileCoord {
    /// Create a tile coordinate
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Tile counts along each horizontal axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    /// Tiles along world x
    pub width: usize,
    /// Tiles along world z
    pub height: usize,
}

impl GridSize {
    /// Total number of tiles, saturating at `usize::MAX`
    pub const fn point_count(self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Total number of tiles, or `None` if it does not fit in `usize`
    pub const fn checked_point_count(self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// Array shape `(width, height)` used by every per-tile table
    pub const fn shape(self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// Immutable coordinate transform between tiles and world space
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialGrid {
    origin: Vec3,
    tile_size: f32,
    margin: u32,
    size: GridSize,
}

impl SpatialGrid {
    /// Build a grid covering `area` (x = width, z = depth; y is ignored)
    ///
    /// Each axis gets `round(extent / tile_size) + 2 * margin + 1` tiles so
    /// both boundary lines of the area carry a tile. Negative or non-finite
    /// extents count as zero.
    ///
    /// # Errors
    ///
    /// Returns an error if `tile_size` is not a positive finite number, or if
    /// the area needs more tiles than a [`TileCoord`] can address
    pub fn new(area: Vec3, tile_size: f32, margin: u32) -> Result<Self> {
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(invalid_parameter(
                "tile_size",
                &tile_size,
                &"must be a positive finite number",
            ));
        }

        let width_extent = usable_extent(area.x);
        let depth_extent = usable_extent(area.z);
        let margin_extent = margin as f32 * tile_size;

        let origin = Vec3::new(
            -width_extent / 2.0 - margin_extent,
            0.0,
            -depth_extent / 2.0 - margin_extent,
        );
        let (Some(width), Some(height)) = (
            axis_tiles(width_extent, tile_size, margin),
            axis_tiles(depth_extent, tile_size, margin),
        ) else {
            return Err(invalid_parameter(
                "area",
                &area,
                &format!("needs more than {MAX_AXIS_TILES} tiles along an axis"),
            ));
        };
        let size = GridSize { width, height };
        if !origin.is_finite() || size.checked_point_count().is_none() {
            return Err(invalid_parameter(
                "area",
                &area,
                &format!("{width}x{height} tiles cannot be addressed"),
            ));
        }

        debug!(
            width = size.width,
            height = size.height,
            tile_size,
            margin,
            "built spatial grid"
        );

        Ok(Self {
            origin,
            tile_size,
            margin,
            size,
        })
    }

    /// World position of tile `(0, 0)`
    pub const fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Edge length of one tile in world units
    pub const fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Tile rings added outside the play area
    pub const fn margin(&self) -> u32 {
        self.margin
    }

    /// Tile counts per axis
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Total number of tiles
    pub const fn point_count(&self) -> usize {
        self.size.point_count()
    }

    /// Check whether a coordinate lies inside the grid
    pub const fn contains(&self, coord: TileCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.size.width
            && (coord.y as usize) < self.size.height
    }

    /// Array index `[x, y]` for an in-bounds coordinate
    pub const fn slot(&self, coord: TileCoord) -> Option<[usize; 2]> {
        if self.contains(coord) {
            Some([coord.x as usize, coord.y as usize])
        } else {
            None
        }
    }

    /// Flat row-major index (`x * height + y`) for an in-bounds coordinate
    pub const fn index_of(&self, coord: TileCoord) -> Option<usize> {
        match self.slot(coord) {
            Some([x, y]) => Some(x * self.size.height + y),
            None => None,
        }
    }

    /// Coordinate for a flat row-major index
    pub const fn coord_of(&self, index: usize) -> Option<TileCoord> {
        if index >= self.point_count() {
            return None;
        }
        Some(TileCoord::new(
            (index / self.size.height) as i32,
            (index % self.size.height) as i32,
        ))
    }

    /// Every in-bounds coordinate in row-major order
    pub fn coords(&self) -> impl Iterator<Item = TileCoord> {
        let GridSize { width, height } = self.size;
        (0..width).flat_map(move |x| (0..height).map(move |y| TileCoord::new(x as i32, y as i32)))
    }

    /// World position of a tile center: `origin + (x, 0, y) * tile_size`
    pub fn to_world(&self, coord: TileCoord) -> Vec3 {
        self.origin + Vec3::new(coord.x as f32, 0.0, coord.y as f32) * self.tile_size
    }

    /// Nearest tile to a world position and whether it lies inside the grid
    ///
    /// Non-finite positions are never inside the grid.
    pub fn to_grid(&self, position: Vec3) -> (TileCoord, bool) {
        let (coord, finite) = self.nearest_coord(position);
        (coord, finite && self.contains(coord))
    }

    /// Nearest tile plus the planar distance from `position` to its center
    ///
    /// The coordinate may lie outside the grid; callers use the distance to
    /// reject snaps that land too far from any tile. Non-finite positions
    /// report an infinite distance.
    pub fn to_grid_with_distance(&self, position: Vec3) -> (TileCoord, f32) {
        let (coord, finite) = self.nearest_coord(position);
        if !finite {
            return (coord, f32::INFINITY);
        }
        let tile = self.to_world(coord);
        let distance = Vec2::new(position.x, position.z).distance(Vec2::new(tile.x, tile.z));
        (coord, distance)
    }

    /// World-space tile centers at the minimum and maximum corners
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let far = TileCoord::new(
            self.size.width.saturating_sub(1) as i32,
            self.size.height.saturating_sub(1) as i32,
        );
        (self.origin, self.to_world(far))
    }

    fn nearest_coord(&self, position: Vec3) -> (TileCoord, bool) {
        let local = (position - self.origin) / self.tile_size;
        let coord = TileCoord::new(local.x.round() as i32, local.z.round() as i32);
        (coord, local.x.is_finite() && local.z.is_finite())
    }
}

fn usable_extent(extent: f32) -> f32 {
    if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        0.0
    }
}

fn axis_tiles(extent: f32, tile_size: f32, margin: u32) -> Option<usize> {
    let span = (extent / tile_size).round();
    if !(span.is_finite() && span < MAX_AXIS_TILES as f32) {
        return None;
    }
    (margin as usize)
        .checked_mul(2)?
        .checked_add(span as usize)?
        .checked_add(1)
        .filter(|&tiles| tiles <= MAX_AXIS_TILES)
}
