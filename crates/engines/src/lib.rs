#![deny(unsafe_code)]
//! Frame rendering for pattern-studio: CPU rasterization and PNG snapshots.
//!
//! This crate sits between `pattern-studio-core` (which produces element
//! descriptors) and consumers that need pixels, such as the CLI. It resolves
//! each request's pattern to its display color so callers only pass the
//! request.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use pattern_studio_core::error::StudioError;
use pattern_studio_core::frame::{FrameGenerator, FrameRequest};
use pattern_studio_core::math::MathKernel;

pub use pixel::{frame_to_rgba, RasterOptions, MAX_SURFACE_PIXELS};

/// Generates the frame for `request` and rasterizes it in the pattern's color.
///
/// Returns `StudioError::InvalidConfig` if `options` describes an empty or
/// oversized surface.
pub fn render_request<M: MathKernel>(
    generator: &mut FrameGenerator<M>,
    request: &FrameRequest,
    options: &RasterOptions,
) -> Result<Vec<u8>, StudioError> {
    options.validate()?;
    let elements = generator.generate(request);
    Ok(frame_to_rgba(&elements, request.pattern.color(), options))
}

/// Generates the frame for `request` and writes it as a PNG.
#[cfg(feature = "png")]
pub fn write_request_png<M: MathKernel>(
    generator: &mut FrameGenerator<M>,
    request: &FrameRequest,
    options: &RasterOptions,
    path: &std::path::Path,
) -> Result<(), StudioError> {
    let elements = generator.generate(request);
    snapshot::write_png(&elements, request.pattern.color(), options, path)
}
