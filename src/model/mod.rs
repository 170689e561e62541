//! Signal models for populating the computed table
//!
//! Any [`SignalModel`] can feed [`crate::ScanGrid::compute_with`]; plain
//! closures go through [`crate::ScanGrid::compute_grid`] directly.

use glam::Vec3;

/// Inverse-distance-weighted interpolation of measured samples
pub mod idw;
/// Log-distance path loss from a single source
pub mod path_loss;
/// Seeded synthetic access points for offline sessions
pub mod synthetic;

pub use idw::InverseDistanceModel;
pub use path_loss::LogDistanceModel;
pub use synthetic::SyntheticSite;

/// Estimates a signal level at any world position
pub trait SignalModel {
    /// Estimated level at `position`, or [`crate::scan::grid::COMPUTED_SENTINEL`] when unknown
    fn level_at(&self, position: Vec3) -> f32;
}
