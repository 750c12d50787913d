//! Display colors for patterns.
//!
//! The core does not shade elements; it only carries each pattern's display
//! color so renderers and the CLI agree on it. Colors serialize as `"#rrggbb"`.

use crate::error::StudioError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    /// Builds a color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Srgb {
        Srgb {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `StudioError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, StudioError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(StudioError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| StudioError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Srgb::from_rgb8(
            channel(0..2, "red")?,
            channel(2..4, "green")?,
            channel(4..6, "blue")?,
        ))
    }

    /// Quantizes to 8-bit channels with rounding, clamping out-of-range values.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Linear interpolation towards `other` by `t` in [0, 1].
    pub fn mix(self, other: Srgb, t: f64) -> Srgb {
        let t = t.clamp(0.0, 1.0);
        Srgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_parses_with_and_without_hash() {
        let a = Srgb::from_hex("#E8E2DB").unwrap();
        let b = Srgb::from_hex("e8e2db").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_rgb8(), [0xe8, 0xe2, 0xdb]);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(matches!(
            Srgb::from_hex("#fff"),
            Err(StudioError::InvalidColor(_))
        ));
    }

    #[test]
    fn from_hex_rejects_non_hex_digits() {
        let err = Srgb::from_hex("#gg0000").unwrap_err();
        assert!(err.to_string().contains("red"), "got: {err}");
    }

    #[test]
    fn from_hex_rejects_multibyte_input() {
        assert!(Srgb::from_hex("ééé").is_err());
    }

    #[test]
    fn to_hex_is_lowercase_and_prefixed() {
        assert_eq!(Srgb::from_rgb8(0xB8, 0xA0, 0x82).to_hex(), "#b8a082");
    }

    #[test]
    fn to_rgb8_clamps() {
        let c = Srgb {
            r: -0.5,
            g: 2.0,
            b: 0.5,
        };
        assert_eq!(c.to_rgb8(), [0, 255, 128]);
    }

    #[test]
    fn mix_endpoints() {
        let black = Srgb::from_rgb8(0, 0, 0);
        let white = Srgb::from_rgb8(255, 255, 255);
        assert_eq!(black.mix(white, 0.0), black);
        assert_eq!(black.mix(white, 1.0), white);
        assert_eq!(black.mix(white, 0.5).to_rgb8(), [128, 128, 128]);
    }

    #[test]
    fn serde_uses_hex_string() {
        let c = Srgb::from_rgb8(0xD4, 0xC5, 0xB9);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#d4c5b9\"");
        let back: Srgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn deserialize_rejects_bad_hex() {
        assert!(serde_json::from_str::<Srgb>("\"#12\"").is_err());
    }
}
