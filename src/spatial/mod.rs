//! Spatial data structures for the tile grid
//!
//! This module contains spatial-related functionality including:
//! - The world-space tile grid and its coordinate transforms
//! - Draw transform records handed to the renderer

/// Tile grid construction and world/grid conversion
pub mod grid;
/// Translation-rotation-scale draw records
pub mod transform;

pub use grid::{GridSize, SpatialGrid, TileCoord};
pub use transform::Transform;
