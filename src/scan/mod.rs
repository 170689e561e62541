//! Per-tile scan aggregation and display projection
//!
//! This module contains:
//! - Emitter identities and signal readings
//! - The per-tile emitter-to-level map
//! - Display categories and transform list building
//! - The scan grid owning every per-tile table

/// Per-tile ordered map from emitter to level
pub mod cell;
/// Display categories, configuration and transform lists
pub mod display;
/// Scan grid state and operations
pub mod grid;
/// Emitter identities and readings
pub mod reading;

pub use cell::CellReadings;
pub use display::{DisplayCategory, DisplayConfig, DisplayLists};
pub use grid::{ScanGrid, TileQuery};
pub use reading::{EmitterId, Level, Reading};
