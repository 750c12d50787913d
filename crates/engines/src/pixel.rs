//! Pure-computation rasterization of a frame into an RGBA8 buffer.
//!
//! Always available (no feature gate) so hosts without the `png` feature can
//! still draw a frame into their own surfaces.
//!
//! Each element becomes a square of side `ELEMENT_SIZE * scale`, rotated by
//! its rotation, pushed towards the viewer by its height through a fixed
//! perspective, and alpha-blended with its opacity. Elements are painted
//! back to front by height.

use pattern_studio_core::color::Srgb;
use pattern_studio_core::error::StudioError;
use pattern_studio_core::frame::ElementDescriptor;
use serde::{Deserialize, Serialize};

/// Edge length of an unscaled element, in display units.
pub const ELEMENT_SIZE: f64 = 8.0;
/// Viewer distance used for the perspective divide, in display units.
pub const PERSPECTIVE: f64 = 1000.0;
/// Largest accepted surface, in pixels.
pub const MAX_SURFACE_PIXELS: usize = 4096 * 4096;
/// Share of white blended into the far corner of each element.
const GLOSS: f64 = 0.8;

/// Output surface for [`frame_to_rgba`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterOptions {
    pub width: usize,
    pub height: usize,
    /// Pixels per display unit.
    pub zoom: f64,
    pub background: Srgb,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            zoom: 1.0,
            background: Srgb::from_rgb8(0x12, 0x11, 0x10),
        }
    }
}

impl RasterOptions {
    /// Checks the surface is non-empty, at most [`MAX_SURFACE_PIXELS`], and
    /// that `zoom` is finite and positive.
    pub fn validate(&self) -> Result<(), StudioError> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid("surface", format!("{}x{} has no pixels", self.width, self.height)));
        }
        match self.width.checked_mul(self.height) {
            Some(pixels) if pixels <= MAX_SURFACE_PIXELS => {}
            _ => {
                return Err(invalid(
                    "surface",
                    format!(
                        "{}x{} exceeds {MAX_SURFACE_PIXELS} pixels",
                        self.width, self.height
                    ),
                ))
            }
        }
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(invalid("zoom", format!("must be finite and positive, got {}", self.zoom)));
        }
        Ok(())
    }
}

fn invalid(name: &str, reason: String) -> StudioError {
    StudioError::InvalidConfig {
        name: name.to_string(),
        reason,
    }
}

/// Draws `elements` in `color` and returns `width * height * 4` bytes.
///
/// Allocates the whole surface up front; run [`RasterOptions::validate`]
/// first on sizes that come from user input.
///
/// Alpha is always 255; opacity is resolved against the background.
pub fn frame_to_rgba(elements: &[ElementDescriptor], color: Srgb, options: &RasterOptions) -> Vec<u8> {
    let (w, h) = (options.width, options.height);
    let mut rgb = vec![options.background; w * h];

    let mut order: Vec<&ElementDescriptor> = elements.iter().collect();
    order.sort_by(|a, b| a.height.total_cmp(&b.height));

    for element in order {
        paint_element(&mut rgb, w, h, element, color, options.zoom);
    }

    rgb.into_iter()
        .flat_map(|c| {
            let [r, g, b] = c.to_rgb8();
            [r, g, b, 255u8]
        })
        .collect()
}

fn paint_element(rgb: &mut [Srgb], w: usize, h: usize, e: &ElementDescriptor, color: Srgb, zoom: f64) {
    let depth = PERSPECTIVE - e.height;
    if depth <= 1.0 {
        return;
    }
    let alpha = e.opacity.clamp(0.0, 1.0);
    if alpha == 0.0 {
        return;
    }
    let p = PERSPECTIVE / depth * zoom;
    let half = ELEMENT_SIZE * e.scale.abs() * p / 2.0;
    if half <= 0.0 || !half.is_finite() {
        return;
    }
    let cx = w as f64 / 2.0 + e.x * p;
    let cy = h as f64 / 2.0 + e.y * p;
    let (sin, cos) = e.rotation.to_radians().sin_cos();
    let white = Srgb::from_rgb8(255, 255, 255);

    let reach = half * std::f64::consts::SQRT_2;
    let x0 = (cx - reach).floor().max(0.0) as usize;
    let y0 = (cy - reach).floor().max(0.0) as usize;
    let x1 = ((cx + reach).ceil().max(0.0) as usize).min(w);
    let y1 = ((cy + reach).ceil().max(0.0) as usize).min(h);

    for py in y0..y1 {
        for px in x0..x1 {
            let dx = px as f64 + 0.5 - cx;
            let dy = py as f64 + 0.5 - cy;
            let u = dx * cos + dy * sin;
            let v = -dx * sin + dy * cos;
            if u.abs() > half || v.abs() > half {
                continue;
            }
            let along = ((u + v) / (2.0 * half) + 1.0) / 2.0;
            let shade = color.mix(white, along * GLOSS);
            let dst = &mut rgb[py * w + px];
            *dst = dst.mix(shade, alpha);
        }
    }
}
