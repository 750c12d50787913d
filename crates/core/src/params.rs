//! Lenient typed lookups into a JSON override object.
//!
//! A missing key or a value of the wrong type yields the supplied default.
//! Range validation happens afterwards, in [`FrameConfig::validate`](crate::config::FrameConfig::validate).

use serde_json::Value;

/// Reads `params[name]` as `f64` (integers included), else `default`.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Reads `params[name]` as a non-negative integer, else `default`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}
