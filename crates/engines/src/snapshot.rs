//! PNG snapshots of a frame.
//!
//! Feature-gated behind `png` (default on) so embedders that only need the
//! RGBA buffer from [`crate::pixel`] avoid the `image` dependency.

use pattern_studio_core::color::Srgb;
use pattern_studio_core::error::StudioError;
use pattern_studio_core::frame::ElementDescriptor;
use std::path::Path;

use crate::pixel::{frame_to_rgba, RasterOptions};

/// Rasterizes `elements` and writes the result as a PNG at `path`.
///
/// Returns `StudioError::InvalidConfig` if [`RasterOptions::validate`]
/// rejects the surface, or `StudioError::Io` on write failure.
pub fn write_png(
    elements: &[ElementDescriptor],
    color: Srgb,
    options: &RasterOptions,
    path: &Path,
) -> Result<(), StudioError> {
    options.validate()?;
    let w = surface_dimension("width", options.width)?;
    let h = surface_dimension("height", options.height)?;
    let rgba = frame_to_rgba(elements, color, options);
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| StudioError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| StudioError::Io(e.to_string()))?;
    tracing::debug!(path = %path.display(), width = w, height = h, "wrote snapshot");
    Ok(())
}

fn surface_dimension(name: &str, value: usize) -> Result<u32, StudioError> {
    match u32::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(StudioError::InvalidConfig {
            name: name.to_string(),
            reason: format!("surface {name} {value} does not fit an image dimension"),
        }),
    }
}
