//! Pointer state and the pointer-influence modulator.
//!
//! The pointer arrives normalized to [0, 1] over the visualization bounds and
//! is mapped to the grid's [-1, 1] space before measuring distance. Influence
//! decays as `exp(-2 d)` and is amplified four-fold while hovering.

use crate::error::StudioError;
use crate::grid::GridPoint;
use crate::math::MathKernel;
use crate::pattern::RawAttributes;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Influence multiplier while the pointer is over the visualization.
pub const HOVER_MULTIPLIER: f64 = 2.0;
/// Influence multiplier while the pointer is outside.
pub const IDLE_MULTIPLIER: f64 = 0.5;
/// Upper bound for opacity after modulation.
pub const OPACITY_CEILING: f64 = 0.9;

/// Snapshot of the pointer, normalized to the visualization bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub is_hovering: bool,
}

impl Default for PointerState {
    /// Centred and not hovering, as before the first pointer event.
    fn default() -> Self {
        Self {
            x: 0.5,
            y: 0.5,
            is_hovering: false,
        }
    }
}

/// Screen-space rectangle the pointer is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PointerState {
    pub fn new(x: f64, y: f64, is_hovering: bool) -> Self {
        Self { x, y, is_hovering }
    }

    /// Normalizes a raw client coordinate against `bounds`.
    ///
    /// Coordinates outside the rectangle produce values outside [0, 1]; they
    /// are not clamped. Returns `StudioError::InvalidBounds` when the
    /// rectangle has no positive, finite extent.
    pub fn from_client(
        client_x: f64,
        client_y: f64,
        bounds: Bounds,
        is_hovering: bool,
    ) -> Result<Self, StudioError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(bounds.width) || !valid(bounds.height) {
            return Err(StudioError::InvalidBounds {
                width: bounds.width,
                height: bounds.height,
            });
        }
        Ok(Self {
            x: (client_x - bounds.left) / bounds.width,
            y: (client_y - bounds.top) / bounds.height,
            is_hovering,
        })
    }

    /// The pointer mapped from [0, 1] into grid space [-1, 1].
    pub fn grid_position(&self) -> DVec2 {
        DVec2::new(self.x, self.y) * 2.0 - DVec2::ONE
    }

    fn multiplier(&self) -> f64 {
        if self.is_hovering {
            HOVER_MULTIPLIER
        } else {
            IDLE_MULTIPLIER
        }
    }
}

/// Influence strength of `pointer` on `point`, in (0, 2].
pub fn influence<M: MathKernel + ?Sized>(math: &mut M, point: &GridPoint, pointer: &PointerState) -> f64 {
    let delta = point.position() - pointer.grid_position();
    let dist = math.distance(delta.x, delta.y);
    math.exp(-dist * 2.0) * pointer.multiplier()
}

/// Applies pointer influence to raw pattern output.
///
/// Height, rotation and scale are left unclamped so elements near the pointer
/// can exceed their nominal ranges; only opacity is capped.
pub fn modulate<M: MathKernel + ?Sized>(math: &mut M, raw: RawAttributes, influence: f64, t: f64) -> RawAttributes {
    RawAttributes {
        height: raw.height + influence * math.sin(t * 3.0) * 0.8,
        rotation: raw.rotation + influence * 80.0,
        scale: raw.scale + influence * 0.4,
        opacity: (raw.opacity + influence * 0.3).min(OPACITY_CEILING),
    }
}
