#![deny(unsafe_code)]
//! Core pattern engine for pattern-studio.
//!
//! Maps (frame, pattern, intensity, pointer) to a flat list of projected
//! element descriptors over a fixed grid. Provides the `Grid`, the
//! `MathKernel` abstraction with a bounded memoizing implementation, the four
//! pattern functions, the pointer-influence modulator, the `FrameGenerator`
//! and a `Studio` session that tracks clock, pointer and controls.

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod grid;
pub mod math;
pub mod params;
pub mod pattern;
pub mod pointer;
pub mod studio;
pub mod view;

pub use color::Srgb;
pub use config::FrameConfig;
pub use error::StudioError;
pub use frame::{ElementDescriptor, FrameGenerator, FrameRequest};
pub use grid::{Grid, GridPoint};
pub use math::{CacheStats, CachedMath, DirectMath, MathKernel};
pub use pattern::{PatternInfo, PatternKind, RawAttributes};
pub use pointer::{Bounds, PointerState};
pub use studio::Studio;
pub use view::ViewTilt;
