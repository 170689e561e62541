//! Mathematical utilities for value encoding

/// Linear interpolation and the level-to-height mapping
pub mod interpolation;

pub use interpolation::HeightMapping;
