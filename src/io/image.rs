//! Top-down heat-map export of a level slice

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};
use tracing::debug;

use crate::io::configuration::MAX_HEATMAP_PIXELS;
use crate::io::error::{Result, SignalGridError, WithPath, invalid_parameter};
use crate::math::interpolation::HeightMapping;
use crate::scan::reading::{LEVEL_SENTINEL, Level};
use crate::spatial::grid::GridSize;

const ABSENT_COLOR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Color for one level: red for weak, green for strong, transparent if absent
pub fn level_color(level: Level, heights: &HeightMapping) -> Rgba<u8> {
    if level == LEVEL_SENTINEL {
        return ABSENT_COLOR;
    }
    let strength = heights.fraction(level as f32);
    Rgba([
        (255.0 * (1.0 - strength)).round() as u8,
        (255.0 * strength).round() as u8,
        64,
        255,
    ])
}

/// Render a row-major level slice, one `scale`×`scale` block per tile
///
/// Image columns follow grid `x` and image rows follow grid `y`.
///
/// # Errors
///
/// Returns an error if `levels` does not match `size`, `scale` is zero or
/// the image would exceed [`MAX_HEATMAP_PIXELS`]
pub fn render_levels(
    levels: &[Level],
    size: GridSize,
    heights: &HeightMapping,
    scale: u32,
) -> Result<RgbaImage> {
    if levels.len() != size.point_count() {
        return Err(SignalGridError::InvalidArgument {
            argument: "levels",
            expected: size.point_count(),
            actual: levels.len(),
        });
    }
    if scale == 0 {
        return Err(invalid_parameter(
            "scale",
            &scale,
            &"must be at least one pixel per tile",
        ));
    }

    let pixels = |tiles: usize| {
        u32::try_from(tiles)
            .ok()
            .and_then(|tiles| tiles.checked_mul(scale))
    };
    let (Some(width), Some(height)) = (pixels(size.width), pixels(size.height)) else {
        return Err(invalid_parameter(
            "scale",
            &scale,
            &format!(
                "{}x{} tiles overflow the image dimensions",
                size.width, size.height
            ),
        ));
    };
    if u64::from(width) * u64::from(height) > MAX_HEATMAP_PIXELS {
        return Err(invalid_parameter(
            "scale",
            &scale,
            &format!("{width}x{height} image exceeds {MAX_HEATMAP_PIXELS} pixels"),
        ));
    }

    Ok(ImageBuffer::from_fn(width, height, |px, py| {
        let x = (px / scale) as usize;
        let y = (py / scale) as usize;
        levels
            .get(x * size.height + y)
            .map_or(ABSENT_COLOR, |&level| level_color(level, heights))
    }))
}

/// Render a level slice and write it as PNG
///
/// # Errors
///
/// Returns an error if rendering fails, the parent directory cannot be
/// created or the image cannot be saved
pub fn export_levels_as_png(
    levels: &[Level],
    size: GridSize,
    heights: &HeightMapping,
    scale: u32,
    output_path: &Path,
) -> Result<()> {
    let img = render_levels(levels, size, heights, scale)?;

    if let Some(parent) = output_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }

    img.save(output_path)
        .map_err(|source| SignalGridError::ImageExport {
            path: output_path.to_path_buf(),
            source,
        })?;

    debug!(path = %output_path.display(), width = img.width(), height = img.height(), "exported heat map");
    Ok(())
}
