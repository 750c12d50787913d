//! Frame generation constants.
//!
//! [`FrameConfig`] bundles the build-time constants of the pattern engine.
//! [`Default`] gives the studio's stock values: a 20x20 grid, 0.015 time
//! units per frame, a 180px display radius and intensity 0.7.

use crate::error::StudioError;
use crate::grid::MAX_GRID_SIZE;
use crate::math::DEFAULT_CACHE_CAPACITY;
use crate::params::{param_f64, param_usize};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_GRID_SIZE: usize = 20;
pub const DEFAULT_ANIMATION_SPEED: f64 = 0.015;
pub const DEFAULT_DISPLAY_RADIUS: f64 = 180.0;
pub const DEFAULT_INTENSITY: f64 = 0.7;
/// Lower end of the intensity control.
pub const MIN_INTENSITY: f64 = 0.3;
/// Upper end of the intensity control.
pub const MAX_INTENSITY: f64 = 1.5;

/// Constants fixed for the lifetime of a frame generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Points per grid axis; the frame has `grid_size²` elements.
    pub grid_size: usize,
    /// Continuous time advanced per frame.
    pub animation_speed: f64,
    /// Scale from grid space [-1, 1] to display units.
    pub display_radius: f64,
    /// Intensity used until the host picks another.
    pub default_intensity: f64,
    /// Hot entries per cached math function.
    pub cache_capacity: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            animation_speed: DEFAULT_ANIMATION_SPEED,
            display_radius: DEFAULT_DISPLAY_RADIUS,
            default_intensity: DEFAULT_INTENSITY,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl FrameConfig {
    /// Reads overrides from a JSON object, falling back to defaults per key.
    ///
    /// Does not validate; call [`FrameConfig::validate`] before use.
    pub fn from_json(params: &Value) -> Self {
        Self {
            grid_size: param_usize(params, "grid_size", DEFAULT_GRID_SIZE),
            animation_speed: param_f64(params, "animation_speed", DEFAULT_ANIMATION_SPEED),
            display_radius: param_f64(params, "display_radius", DEFAULT_DISPLAY_RADIUS),
            default_intensity: param_f64(params, "default_intensity", DEFAULT_INTENSITY),
            cache_capacity: param_usize(params, "cache_capacity", DEFAULT_CACHE_CAPACITY),
        }
    }

    /// Checks every field against its accepted domain.
    pub fn validate(&self) -> Result<(), StudioError> {
        if !(2..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(StudioError::InvalidGridSize(self.grid_size));
        }
        check_finite("animation_speed", self.animation_speed)?;
        check_finite("display_radius", self.display_radius)?;
        check_finite("default_intensity", self.default_intensity)?;
        if self.display_radius <= 0.0 {
            return Err(invalid("display_radius", "must be positive"));
        }
        if self.cache_capacity == 0 {
            return Err(invalid("cache_capacity", "must be at least 1"));
        }
        Ok(())
    }

    /// Continuous time for a frame index.
    pub fn time_at(&self, frame: u64) -> f64 {
        frame as f64 * self.animation_speed
    }

    /// Current values as a JSON object.
    pub fn params(&self) -> Value {
        json!({
            "grid_size": self.grid_size,
            "animation_speed": self.animation_speed,
            "display_radius": self.display_radius,
            "default_intensity": self.default_intensity,
            "cache_capacity": self.cache_capacity,
        })
    }

    /// Schema describing each key's type, default and constraints.
    pub fn param_schema() -> Value {
        json!({
            "grid_size": {
                "type": "integer",
                "min": 2,
                "max": MAX_GRID_SIZE,
                "default": DEFAULT_GRID_SIZE,
                "description": "Points per grid axis"
            },
            "animation_speed": {
                "type": "number",
                "default": DEFAULT_ANIMATION_SPEED,
                "description": "Time units advanced per frame"
            },
            "display_radius": {
                "type": "number",
                "min": 0.0,
                "exclusive_min": true,
                "default": DEFAULT_DISPLAY_RADIUS,
                "description": "Display units per grid unit"
            },
            "default_intensity": {
                "type": "number",
                "min": MIN_INTENSITY,
                "max": MAX_INTENSITY,
                "default": DEFAULT_INTENSITY,
                "description": "Initial displacement and scale multiplier"
            },
            "cache_capacity": {
                "type": "integer",
                "min": 1,
                "default": DEFAULT_CACHE_CAPACITY,
                "description": "Hot entries per cached math function"
            }
        })
    }
}

fn invalid(name: &str, reason: &str) -> StudioError {
    StudioError::InvalidConfig {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

fn check_finite(name: &str, value: f64) -> Result<(), StudioError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, "must be finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_studio_constants() {
        let c = FrameConfig::default();
        assert_eq!(c.grid_size, 20);
        assert_eq!(c.animation_speed, 0.015);
        assert_eq!(c.display_radius, 180.0);
        assert_eq!(c.default_intensity, 0.7);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn from_json_empty_object_is_default() {
        assert_eq!(FrameConfig::from_json(&json!({})), FrameConfig::default());
    }

    #[test]
    fn from_json_applies_overrides() {
        let c = FrameConfig::from_json(&json!({"grid_size": 9, "display_radius": 90}));
        assert_eq!(c.grid_size, 9);
        assert_eq!(c.display_radius, 90.0);
        assert_eq!(c.animation_speed, DEFAULT_ANIMATION_SPEED);
    }

    #[test]
    fn validate_rejects_small_grid() {
        let c = FrameConfig {
            grid_size: 1,
            ..FrameConfig::default()
        };
        assert!(matches!(c.validate(), Err(StudioError::InvalidGridSize(1))));
    }

    #[test]
    fn validate_rejects_grid_above_max() {
        let c = FrameConfig::from_json(&json!({"grid_size": 100_000_000u64}));
        assert_eq!(c.grid_size, 100_000_000);
        assert!(matches!(c.validate(), Err(StudioError::InvalidGridSize(100_000_000))));

        let edge = FrameConfig {
            grid_size: MAX_GRID_SIZE,
            ..FrameConfig::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_finite_and_non_positive_values() {
        let nan_speed = FrameConfig {
            animation_speed: f64::NAN,
            ..FrameConfig::default()
        };
        assert!(matches!(
            nan_speed.validate(),
            Err(StudioError::InvalidConfig { ref name, .. }) if name == "animation_speed"
        ));
        let zero_radius = FrameConfig {
            display_radius: 0.0,
            ..FrameConfig::default()
        };
        assert!(zero_radius.validate().is_err());
        let no_cache = FrameConfig {
            cache_capacity: 0,
            ..FrameConfig::default()
        };
        assert!(no_cache.validate().is_err());
    }

    #[test]
    fn time_at_scales_frame_index() {
        let c = FrameConfig::default();
        assert_eq!(c.time_at(0), 0.0);
        assert!((c.time_at(200) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn params_round_trip_through_from_json() {
        let c = FrameConfig {
            grid_size: 5,
            animation_speed: 0.03,
            display_radius: 50.0,
            default_intensity: 1.2,
            cache_capacity: 128,
        };
        assert_eq!(FrameConfig::from_json(&c.params()), c);
    }

    #[test]
    fn schema_lists_every_key() {
        let schema = FrameConfig::param_schema();
        for key in [
            "grid_size",
            "animation_speed",
            "display_radius",
            "default_intensity",
            "cache_capacity",
        ] {
            assert!(schema.get(key).is_some(), "schema missing {key}");
        }
        assert_eq!(schema["grid_size"]["min"], 2);
        assert_eq!(schema["grid_size"]["max"], MAX_GRID_SIZE);
    }

    #[test]
    fn serde_fills_missing_fields_with_defaults() {
        let c: FrameConfig = serde_json::from_str(r#"{"grid_size": 4}"#).unwrap();
        assert_eq!(c.grid_size, 4);
        assert_eq!(c.display_radius, DEFAULT_DISPLAY_RADIUS);
    }
}
