//! Seeded synthetic access points for exercising a session without hardware

use glam::Vec3;
use rand::Rng;

use crate::io::configuration::{DEFAULT_READING_NOISE, HEARING_FLOOR};
use crate::model::SignalModel;
use crate::model::path_loss::LogDistanceModel;
use crate::scan::reading::{EmitterId, Level, Reading, emitter_id};

/// One virtual access point
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticEmitter {
    /// Hardware identifier the key was derived from
    pub hardware_id: String,
    /// Emitter key
    pub id: EmitterId,
    /// Propagation from the emitter's position
    pub model: LogDistanceModel,
}

impl SyntheticEmitter {
    /// Emitter whose key is derived from `hardware_id`
    pub fn new(hardware_id: impl Into<String>, model: LogDistanceModel) -> Self {
        let hardware_id = hardware_id.into();
        let id = emitter_id(&hardware_id);
        Self {
            hardware_id,
            id,
            model,
        }
    }
}

/// A set of virtual access points producing noisy readings
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticSite {
    emitters: Vec<SyntheticEmitter>,
    noise: f32,
    floor: Level,
}

impl SyntheticSite {
    /// Site with the given emitters, default noise and hearing floor
    pub const fn new(emitters: Vec<SyntheticEmitter>) -> Self {
        Self {
            emitters,
            noise: DEFAULT_READING_NOISE,
            floor: HEARING_FLOOR,
        }
    }

    /// Place `count` emitters uniformly over `area`, centered on the origin
    pub fn random<R: Rng + ?Sized>(rng: &mut R, area: Vec3, count: usize) -> Self {
        let half_width = area.x.max(0.0) / 2.0;
        let half_depth = area.z.max(0.0) / 2.0;

        let emitters = (0..count)
            .map(|index| {
                let source = Vec3::new(
                    rng.random_range(-half_width..=half_width),
                    0.0,
                    rng.random_range(-half_depth..=half_depth),
                );
                let reference_level = rng.random_range(-45.0_f32..=-30.0);
                SyntheticEmitter::new(
                    format!("02:00:5e:00:{:02x}:{:02x}", (index >> 8) & 0xff, index & 0xff),
                    LogDistanceModel::new(source, reference_level),
                )
            })
            .collect();

        Self::new(emitters)
    }

    /// Replace the uniform noise amplitude added to every reading
    #[must_use]
    pub fn with_noise(mut self, noise: f32) -> Self {
        self.noise = noise.abs();
        self
    }

    /// Virtual access points
    pub fn emitters(&self) -> &[SyntheticEmitter] {
        &self.emitters
    }

    /// Readings heard at `position`; emitters below the hearing floor are omitted
    pub fn readings_at<R: Rng + ?Sized>(&self, position: Vec3, rng: &mut R) -> Vec<Reading> {
        self.emitters
            .iter()
            .filter_map(|emitter| {
                let jitter = if self.noise > 0.0 {
                    rng.random_range(-self.noise..=self.noise)
                } else {
                    0.0
                };
                let level = (emitter.model.level_at(position) + jitter).round() as Level;
                (level >= self.floor).then_some(Reading::new(emitter.id, level))
            })
            .collect()
    }
}
