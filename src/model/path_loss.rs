//! Log-distance path loss
//!
//! `level(d) = reference_level - 10 * exponent * log10(d / reference_distance)`,
//! with `d` clamped to at least the reference distance so levels never exceed
//! the reference level near the source.

use glam::{Vec2, Vec3};

use crate::io::configuration::{DEFAULT_PATH_LOSS_EXPONENT, DEFAULT_REFERENCE_DISTANCE};
use crate::model::SignalModel;

/// Single-source propagation model measured on the horizontal plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogDistanceModel {
    /// Emitter position
    pub source: Vec3,
    /// Level heard at the reference distance
    pub reference_level: f32,
    /// Distance at which `reference_level` applies
    pub reference_distance: f32,
    /// Path loss exponent (2 in free space, 3 to 4 indoors)
    pub exponent: f32,
}

impl LogDistanceModel {
    /// Model with the default reference distance and exponent
    pub const fn new(source: Vec3, reference_level: f32) -> Self {
        Self {
            source,
            reference_level,
            reference_distance: DEFAULT_REFERENCE_DISTANCE,
            exponent: DEFAULT_PATH_LOSS_EXPONENT,
        }
    }

    /// Replace the path loss exponent
    #[must_use]
    pub const fn with_exponent(mut self, exponent: f32) -> Self {
        self.exponent = exponent;
        self
    }
}

impl SignalModel for LogDistanceModel {
    fn level_at(&self, position: Vec3) -> f32 {
        let distance =
            Vec2::new(position.x, position.z).distance(Vec2::new(self.source.x, self.source.z));
        let reference = self.reference_distance.max(f32::EPSILON);
        let ratio = distance.max(reference) / reference;
        (-10.0 * self.exponent).mul_add(ratio.log10(), self.reference_level)
    }
}
