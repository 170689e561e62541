//! Shepard interpolation over measured tiles
//!
//! Each estimate is the average of every sample weighted by
//! `1 / distance^power` on the horizontal plane. A query that coincides with
//! a sample returns that sample exactly.

use glam::{Vec2, Vec3};

use crate::io::configuration::DEFAULT_IDW_POWER;
use crate::model::SignalModel;
use crate::scan::grid::COMPUTED_SENTINEL;
use crate::scan::reading::Level;

const COINCIDENT_DISTANCE: f32 = 1e-4;

/// Interpolates a level field from scattered samples
#[derive(Debug, Clone, PartialEq)]
pub struct InverseDistanceModel {
    samples: Vec<(Vec2, f32)>,
    power: f32,
}

impl InverseDistanceModel {
    /// Build from `(position, level)` samples with the default power
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = (Vec3, Level)>,
    {
        Self {
            samples: samples
                .into_iter()
                .map(|(position, level)| (Vec2::new(position.x, position.z), level as f32))
                .collect(),
            power: DEFAULT_IDW_POWER,
        }
    }

    /// Replace the distance exponent
    #[must_use]
    pub fn with_power(mut self, power: f32) -> Self {
        self.power = power;
        self
    }

    /// Number of samples
    pub const fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether there are no samples
    pub const fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl SignalModel for InverseDistanceModel {
    fn level_at(&self, position: Vec3) -> f32 {
        if self.samples.is_empty() {
            return COMPUTED_SENTINEL;
        }

        let query = Vec2::new(position.x, position.z);
        let mut weighted_sum = 0.0_f32;
        let mut weight_total = 0.0_f32;

        for &(sample, level) in &self.samples {
            let distance = query.distance(sample);
            if distance < COINCIDENT_DISTANCE {
                return level;
            }
            let weight = distance.powf(self.power).recip();
            weighted_sum = weight.mul_add(level, weighted_sum);
            weight_total += weight;
        }

        weighted_sum / weight_total
    }
}
