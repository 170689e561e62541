//! Renderer-agnostic draw transforms
//!
//! Display lists carry plain translation/rotation/scale records; each
//! renderer builds its own matrix type from them.

use glam::{Mat4, Quat, Vec3};

/// Translation, rotation and non-uniform scale of one instanced draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space position of the primitive's pivot
    pub translation: Vec3,
    /// Orientation, identity for every display primitive
    pub rotation: Quat,
    /// Per-axis scale
    pub scale: Vec3,
}

impl Transform {
    /// No translation, no rotation, unit scale
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Unrotated transform from a translation and a scale
    pub const fn new(translation: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
            scale,
        }
    }

    /// Uniformly scaled sphere centered at `center`
    pub fn sphere(center: Vec3, diameter: f32) -> Self {
        Self::new(center, Vec3::splat(diameter))
    }

    /// Vertical line from `base` up to `base + height`
    ///
    /// Assumes a unit primitive spanning `y ∈ [-1, 1]`, so the scale is
    /// `(thickness, height / 2, thickness)` and the pivot sits halfway up.
    pub fn line(base: Vec3, height: f32, thickness: f32) -> Self {
        let half = height / 2.0;
        Self::new(
            base + Vec3::Y * half,
            Vec3::new(thickness, half, thickness),
        )
    }

    /// Column-major 4x4 matrix (scale, then rotate, then translate)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
