//! Per-tick frame generation.
//!
//! [`FrameGenerator`] owns the precomputed grid and a [`MathKernel`]. Each
//! call to [`FrameGenerator::generate_frame`] evaluates the selected pattern
//! at every grid point, applies pointer influence, projects the result into
//! display units and returns a fresh element list in grid order.

use crate::config::{FrameConfig, DEFAULT_INTENSITY};
use crate::error::StudioError;
use crate::grid::Grid;
use crate::math::{CachedMath, DirectMath, MathKernel};
use crate::pattern::PatternKind;
use crate::pointer::{influence, modulate, PointerState};
use serde::{Deserialize, Serialize};

/// Display units of height per unit of raw pattern height.
pub const HEIGHT_SCALE: f64 = 40.0;

/// One projected element of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementDescriptor {
    pub x: f64,
    pub y: f64,
    pub height: f64,
    pub rotation: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl ElementDescriptor {
    /// True when every animated attribute differs from `other` by at most `eps`.
    ///
    /// Renderers may skip repainting an element for which this holds.
    pub fn approx_eq(&self, other: &ElementDescriptor, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.height - other.height).abs() <= eps
            && (self.rotation - other.rotation).abs() <= eps
            && (self.scale - other.scale).abs() <= eps
            && (self.opacity - other.opacity).abs() <= eps
    }
}

/// The per-tick inputs of a frame, as a host would publish them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRequest {
    pub frame: u64,
    pub pattern: PatternKind,
    pub intensity: f64,
    pub pointer: PointerState,
}

impl Default for FrameRequest {
    fn default() -> Self {
        Self {
            frame: 0,
            pattern: PatternKind::default(),
            intensity: DEFAULT_INTENSITY,
            pointer: PointerState::default(),
        }
    }
}

/// Evaluates full frames over a fixed grid.
#[derive(Debug, Clone)]
pub struct FrameGenerator<M = CachedMath> {
    config: FrameConfig,
    grid: Grid,
    /// `(x, y)` of each grid point scaled by the display radius.
    base_positions: Vec<(f64, f64)>,
    math: M,
}

impl FrameGenerator<CachedMath> {
    /// Creates a generator with a bounded [`CachedMath`] kernel.
    pub fn new(config: FrameConfig) -> Result<Self, StudioError> {
        let math = CachedMath::with_capacity(config.cache_capacity);
        Self::with_kernel(config, math)
    }
}

impl FrameGenerator<DirectMath> {
    /// Creates a generator that evaluates every transcendental call exactly.
    pub fn uncached(config: FrameConfig) -> Result<Self, StudioError> {
        Self::with_kernel(config, DirectMath)
    }
}

impl<M: MathKernel> FrameGenerator<M> {
    /// Creates a generator with an arbitrary kernel.
    ///
    /// Returns a configuration error if `config` fails validation.
    pub fn with_kernel(config: FrameConfig, math: M) -> Result<Self, StudioError> {
        config.validate()?;
        let grid = Grid::new(config.grid_size)?;
        let radius = config.display_radius;
        let base_positions = grid
            .points()
            .iter()
            .map(|p| (p.x * radius, p.y * radius))
            .collect();
        tracing::debug!(
            grid_size = config.grid_size,
            display_radius = radius,
            "frame generator ready"
        );
        Ok(Self {
            config,
            grid,
            base_positions,
            math,
        })
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of elements in every frame.
    pub fn element_count(&self) -> usize {
        self.grid.len()
    }

    pub fn kernel(&self) -> &M {
        &self.math
    }

    pub fn kernel_mut(&mut self) -> &mut M {
        &mut self.math
    }

    /// Generates the element list for `frame`.
    ///
    /// Intensity scales height and scale linearly; values outside the
    /// nominal [0.3, 1.5] range are accepted as-is.
    pub fn generate_frame(
        &mut self,
        frame: u64,
        pattern: PatternKind,
        intensity: f64,
        pointer: PointerState,
    ) -> Vec<ElementDescriptor> {
        let t = self.config.time_at(frame);
        let math = &mut self.math;

        self.grid
            .points()
            .iter()
            .zip(&self.base_positions)
            .map(|(point, &(x, y))| {
                let raw = pattern.evaluate(math, point.x, point.y, t);
                let strength = influence(math, point, &pointer);
                let attrs = modulate(math, raw, strength, t);
                ElementDescriptor {
                    x,
                    y,
                    height: attrs.height * HEIGHT_SCALE * intensity,
                    rotation: attrs.rotation,
                    scale: attrs.scale * intensity,
                    opacity: attrs.opacity,
                }
            })
            .collect()
    }

    /// Generates the frame described by `request`.
    pub fn generate(&mut self, request: &FrameRequest) -> Vec<ElementDescriptor> {
        self.generate_frame(
            request.frame,
            request.pattern,
            request.intensity,
            request.pointer,
        )
    }

    /// Like [`generate_frame`](Self::generate_frame) with a numeric selector.
    ///
    /// Returns `StudioError::InvalidPattern` for selectors outside `0..=3`.
    pub fn generate_frame_by_index(
        &mut self,
        frame: u64,
        selector: usize,
        intensity: f64,
        pointer: PointerState,
    ) -> Result<Vec<ElementDescriptor>, StudioError> {
        let pattern = PatternKind::from_index(selector)?;
        Ok(self.generate_frame(frame, pattern, intensity, pointer))
    }
}
