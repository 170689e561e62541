//! Spatial data model and draw-state manager for VR Wi-Fi signal mapping
//!
//! The tracked play area is discretized into a tile grid. Each tile collects
//! per-access-point signal readings, modeled estimates and previously saved
//! levels, and the crate projects those tables into categorized lists of
//! instanced draw transforms for a renderer to consume once per frame.

#![forbid(unsafe_code)]

/// Input/output operations, configuration and error handling
pub mod io;
/// Interpolation helpers and the level-to-height encoding
pub mod math;
/// Signal models that can populate the computed table
pub mod model;
/// Per-tile scan storage and display-state projection
pub mod scan;
/// Tile grid coordinate system and draw transforms
pub mod spatial;

pub use io::error::{Result, SignalGridError};
pub use scan::grid::ScanGrid;
pub use spatial::grid::SpatialGrid;
