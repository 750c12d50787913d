//! Host-facing session state.
//!
//! A [`Studio`] keeps what an interactive host mutates between ticks: the
//! animation clock, the selected pattern, the intensity control and the
//! latest pointer snapshot. It also keeps the last good frame so a bad
//! selector degrades to re-emitting it instead of interrupting the loop.

use crate::config::{FrameConfig, MAX_INTENSITY, MIN_INTENSITY};
use crate::error::StudioError;
use crate::frame::{ElementDescriptor, FrameGenerator};
use crate::math::{CachedMath, MathKernel};
use crate::pattern::PatternKind;
use crate::pointer::PointerState;
use crate::view::ViewTilt;

/// Animation session over a [`FrameGenerator`].
#[derive(Debug, Clone)]
pub struct Studio<M = CachedMath> {
    generator: FrameGenerator<M>,
    frame: u64,
    pattern: PatternKind,
    intensity: f64,
    pointer: PointerState,
    elements: Vec<ElementDescriptor>,
}

impl Studio<CachedMath> {
    /// Creates a session with a cached generator and renders frame 0.
    pub fn new(config: FrameConfig) -> Result<Self, StudioError> {
        Ok(Self::from_generator(FrameGenerator::new(config)?))
    }
}

impl<M: MathKernel> Studio<M> {
    /// Wraps an existing generator; starts at frame 0 with Equilibrium.
    pub fn from_generator(generator: FrameGenerator<M>) -> Self {
        let intensity = generator
            .config()
            .default_intensity
            .clamp(MIN_INTENSITY, MAX_INTENSITY);
        let mut studio = Self {
            generator,
            frame: 0,
            pattern: PatternKind::default(),
            intensity,
            pointer: PointerState::default(),
            elements: Vec::new(),
        };
        studio.refresh();
        studio
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn pattern(&self) -> PatternKind {
        self.pattern
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// The most recently generated frame.
    pub fn elements(&self) -> &[ElementDescriptor] {
        &self.elements
    }

    pub fn generator(&self) -> &FrameGenerator<M> {
        &self.generator
    }

    /// Container tilt for the current frame and pointer.
    pub fn tilt(&self) -> ViewTilt {
        ViewTilt::compute(self.frame, &self.pointer)
    }

    /// Selects a pattern by numeric selector.
    ///
    /// On `StudioError::InvalidPattern` the current pattern is kept.
    pub fn select_pattern(&mut self, selector: usize) -> Result<(), StudioError> {
        self.pattern = PatternKind::from_index(selector)?;
        Ok(())
    }

    pub fn set_pattern(&mut self, pattern: PatternKind) {
        self.pattern = pattern;
    }

    /// Sets intensity, clamped to the control's [0.3, 1.5] range.
    ///
    /// Non-finite values are ignored. Returns the intensity now in effect.
    pub fn set_intensity(&mut self, value: f64) -> f64 {
        if value.is_finite() {
            self.intensity = value.clamp(MIN_INTENSITY, MAX_INTENSITY);
        } else {
            tracing::warn!(value, "ignoring non-finite intensity");
        }
        self.intensity
    }

    /// Records a pointer move, keeping the hover flag.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.x = x;
        self.pointer.y = y;
    }

    pub fn pointer_entered(&mut self) {
        self.pointer.is_hovering = true;
    }

    pub fn pointer_left(&mut self) {
        self.pointer.is_hovering = false;
    }

    pub fn set_pointer(&mut self, pointer: PointerState) {
        self.pointer = pointer;
    }

    /// Advances the clock by one frame and regenerates.
    pub fn tick(&mut self) -> &[ElementDescriptor] {
        self.frame += 1;
        self.refresh();
        &self.elements
    }

    /// Advances the clock and regenerates with a numeric selector.
    ///
    /// An invalid selector logs a warning and re-emits the previous frame;
    /// the clock still advances.
    pub fn tick_with_selector(&mut self, selector: usize) -> &[ElementDescriptor] {
        match self.select_pattern(selector) {
            Ok(()) => self.tick(),
            Err(err) => {
                tracing::warn!(%err, frame = self.frame, "reusing previous frame");
                self.frame += 1;
                &self.elements
            }
        }
    }

    /// Regenerates the current frame without advancing the clock.
    pub fn refresh(&mut self) -> &[ElementDescriptor] {
        self.elements =
            self.generator
                .generate_frame(self.frame, self.pattern, self.intensity, self.pointer);
        &self.elements
    }
}
