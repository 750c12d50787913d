//! Whole-scene tilt derived from the pointer and the frame counter.
//!
//! Renderers rotate the element container by these angles (degrees) so the
//! grid leans towards the pointer and sways slowly over time.

use crate::pointer::PointerState;
use serde::Serialize;

/// Container rotation in degrees, applied in x, y, z order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ViewTilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub rotate_z: f64,
}

impl ViewTilt {
    pub fn compute(frame: u64, pointer: &PointerState) -> Self {
        Self {
            rotate_x: 15.0 + pointer.y * 25.0,
            rotate_y: pointer.x * 30.0 - 15.0,
            rotate_z: (frame as f64 * 0.01).sin() * 2.0,
        }
    }
}
