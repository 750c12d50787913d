//! Error types for the pattern-studio core.

use thiserror::Error;

/// Errors produced by grid construction, configuration and pattern selection.
#[derive(Debug, Error)]
pub enum StudioError {
    /// Grid resolution outside `2..=MAX_GRID_SIZE` points per axis.
    #[error("invalid grid size {0}: between 2 and {max} points per axis are required", max = crate::grid::MAX_GRID_SIZE)]
    InvalidGridSize(usize),

    /// A configuration value was out of its accepted domain.
    #[error("invalid config value for '{name}': {reason}")]
    InvalidConfig { name: String, reason: String },

    /// A numeric pattern selector outside `0..=3`.
    #[error("invalid pattern selector {0}: expected 0, 1, 2 or 3")]
    InvalidPattern(usize),

    /// A pattern name that matches none of the known patterns.
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A pointer bounding rectangle had zero or negative extent.
    #[error("invalid pointer bounds: width {width}, height {height}")]
    InvalidBounds { width: f64, height: f64 },

    /// Snapshot or file output failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl StudioError {
    /// Whether this error belongs to the configuration class (fatal at startup).
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            StudioError::InvalidGridSize(_)
                | StudioError::InvalidConfig { .. }
                | StudioError::InvalidBounds { .. }
        )
    }
}
