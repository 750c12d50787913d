//! The four pattern functions.
//!
//! Each pattern maps a normalized coordinate `(x, y)` and continuous time `t`
//! to [`RawAttributes`]. The coefficients are the visual identity of each
//! pattern and must not drift.

use crate::color::Srgb;
use crate::error::StudioError;
use crate::math::MathKernel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Degrees per radian as used by the resonance rotation term.
const RESONANCE_DEG_PER_RAD: f64 = 57.3;

/// Pattern output before pointer influence and intensity scaling.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RawAttributes {
    pub height: f64,
    pub rotation: f64,
    pub scale: f64,
    pub opacity: f64,
}

/// The four selectable patterns, in selector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    /// Radial standing wave.
    #[default]
    Equilibrium,
    /// Angular/radial standing wave with exponential radial decay.
    Resonance,
    /// Weighted sum of three traveling waves.
    Metamorphosis,
    /// Product-of-sinusoid noise with a slow chaos term.
    Synthesis,
}

/// Display metadata for a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PatternInfo {
    pub index: usize,
    pub name: &'static str,
    pub subtitle: &'static str,
    pub color: Srgb,
}

impl PatternKind {
    /// All patterns in selector order.
    pub const ALL: [PatternKind; 4] = [
        PatternKind::Equilibrium,
        PatternKind::Resonance,
        PatternKind::Metamorphosis,
        PatternKind::Synthesis,
    ];

    /// Resolves a numeric selector.
    ///
    /// Returns `StudioError::InvalidPattern` for anything outside `0..=3`.
    pub fn from_index(index: usize) -> Result<Self, StudioError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(StudioError::InvalidPattern(index))
    }

    /// Resolves a selector by case-insensitive name or by decimal index.
    pub fn from_name(name: &str) -> Result<Self, StudioError> {
        let trimmed = name.trim();
        if let Ok(index) = trimmed.parse::<usize>() {
            return Self::from_index(index);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| StudioError::UnknownPattern(name.to_string()))
    }

    /// Selector index of this pattern.
    pub fn index(self) -> usize {
        match self {
            PatternKind::Equilibrium => 0,
            PatternKind::Resonance => 1,
            PatternKind::Metamorphosis => 2,
            PatternKind::Synthesis => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PatternKind::Equilibrium => "Equilibrium",
            PatternKind::Resonance => "Resonance",
            PatternKind::Metamorphosis => "Metamorphosis",
            PatternKind::Synthesis => "Synthesis",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            PatternKind::Equilibrium => "Balance in Motion",
            PatternKind::Resonance => "Harmonic Convergence",
            PatternKind::Metamorphosis => "Endless Transformation",
            PatternKind::Synthesis => "Unity from Chaos",
        }
    }

    /// Display color used by renderers for this pattern's elements.
    pub fn color(self) -> Srgb {
        match self {
            PatternKind::Equilibrium => Srgb::from_rgb8(0xE8, 0xE2, 0xDB),
            PatternKind::Resonance => Srgb::from_rgb8(0xD4, 0xC5, 0xB9),
            PatternKind::Metamorphosis => Srgb::from_rgb8(0xC7, 0xB2, 0x99),
            PatternKind::Synthesis => Srgb::from_rgb8(0xB8, 0xA0, 0x82),
        }
    }

    pub fn info(self) -> PatternInfo {
        PatternInfo {
            index: self.index(),
            name: self.name(),
            subtitle: self.subtitle(),
            color: self.color(),
        }
    }

    /// Evaluates this pattern at `(x, y)` and time `t`.
    pub fn evaluate<M: MathKernel + ?Sized>(self, math: &mut M, x: f64, y: f64, t: f64) -> RawAttributes {
        match self {
            PatternKind::Equilibrium => equilibrium(math, x, y, t),
            PatternKind::Resonance => resonance(math, x, y, t),
            PatternKind::Metamorphosis => metamorphosis(math, x, y, t),
            PatternKind::Synthesis => synthesis(math, x, y, t),
        }
    }
}

impl TryFrom<usize> for PatternKind {
    type Error = StudioError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index)
    }
}

impl FromStr for PatternKind {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Radial standing wave: two axis-aligned sinusoids times a radial one.
pub fn equilibrium<M: MathKernel + ?Sized>(math: &mut M, x: f64, y: f64, t: f64) -> RawAttributes {
    let dist = math.distance(x, y);
    let height = math.sin(x * 2.5 + t * 0.8)
        * math.cos(y * 2.5 + t * 0.6)
        * math.sin(dist * 3.0 - t * 1.2);
    RawAttributes {
        height,
        rotation: t * 15.0 + height * 60.0,
        scale: 0.6 + height.abs() * 0.8,
        opacity: 0.3 + height.abs() * 0.6,
    }
}

/// Angular/radial standing wave fading from the centre as `exp(-0.3 d)`.
pub fn resonance<M: MathKernel + ?Sized>(math: &mut M, x: f64, y: f64, t: f64) -> RawAttributes {
    let angle = math.atan2(y, x);
    let dist = math.distance(x, y);
    let height = math.sin(angle * 4.0 + dist * 6.0 - t * 2.0)
        * math.cos(dist * 3.0 + t * 1.5)
        * math.exp(-dist * 0.3);
    RawAttributes {
        height,
        rotation: angle * RESONANCE_DEG_PER_RAD + t * 25.0,
        scale: 0.5 + height.abs() * 1.2,
        opacity: 0.2 + height.abs() * 0.7,
    }
}

/// Three traveling waves along x, y and the diagonal, normalized by 2.2.
pub fn metamorphosis<M: MathKernel + ?Sized>(math: &mut M, x: f64, y: f64, t: f64) -> RawAttributes {
    let wave1 = math.sin(x * 3.0 + t * 1.2);
    let wave2 = math.cos(y * 4.0 - t * 0.9);
    let wave3 = math.sin((x + y) * 2.0 + t * 1.6);
    let height = (wave1 + wave2 * 0.7 + wave3 * 0.5) / 2.2;
    RawAttributes {
        height,
        rotation: height * 90.0 + t * 20.0,
        scale: 0.4 + height.abs() * 1.1,
        opacity: 0.25 + height.abs() * 0.65,
    }
}

/// Two product-of-sinusoid noise terms plus a slow chaos term, normalized by 1.8.
pub fn synthesis<M: MathKernel + ?Sized>(math: &mut M, x: f64, y: f64, t: f64) -> RawAttributes {
    let noise1 = math.sin(x * 4.0 + t * 0.7) * math.cos(y * 3.0 - t * 0.5);
    let noise2 = math.sin(y * 5.0 + t * 1.1) * math.cos(x * 2.0 + t * 0.8);
    let chaos = math.sin(t * 0.3) * 0.4;
    let height = (noise1 + noise2 * 0.8 + chaos) / 1.8;
    RawAttributes {
        height,
        rotation: t * 35.0 + (x + y) * 30.0,
        scale: 0.3 + height.abs() * 1.3,
        opacity: 0.2 + height.abs() * 0.75,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{CachedMath, DirectMath};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn from_index_accepts_zero_through_three() {
        for (i, kind) in PatternKind::ALL.iter().enumerate() {
            assert_eq!(PatternKind::from_index(i).unwrap(), *kind);
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn from_index_rejects_out_of_range() {
        assert!(matches!(
            PatternKind::from_index(4),
            Err(StudioError::InvalidPattern(4))
        ));
        assert!(PatternKind::try_from(usize::MAX).is_err());
    }

    #[test]
    fn from_name_is_case_insensitive_and_accepts_indices() {
        assert_eq!(
            PatternKind::from_name("resonance").unwrap(),
            PatternKind::Resonance
        );
        assert_eq!(
            " SYNTHESIS ".parse::<PatternKind>().unwrap(),
            PatternKind::Synthesis
        );
        assert_eq!(
            PatternKind::from_name("2").unwrap(),
            PatternKind::Metamorphosis
        );
        assert!(matches!(
            PatternKind::from_name("9"),
            Err(StudioError::InvalidPattern(9))
        ));
        assert!(matches!(
            PatternKind::from_name("vortex"),
            Err(StudioError::UnknownPattern(_))
        ));
    }

    #[test]
    fn default_is_equilibrium() {
        assert_eq!(PatternKind::default(), PatternKind::Equilibrium);
    }

    #[test]
    fn info_carries_display_metadata() {
        let info = PatternKind::Metamorphosis.info();
        assert_eq!(info.index, 2);
        assert_eq!(info.name, "Metamorphosis");
        assert_eq!(info.subtitle, "Endless Transformation");
        assert_eq!(info.color.to_hex(), "#c7b299");
        assert_eq!(PatternKind::Equilibrium.color().to_hex(), "#e8e2db");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&PatternKind::Resonance).unwrap();
        assert_eq!(json, "\"resonance\"");
        let back: PatternKind = serde_json::from_str("\"synthesis\"").unwrap();
        assert_eq!(back, PatternKind::Synthesis);
    }

    #[test]
    fn equilibrium_at_origin_and_time_zero_is_flat() {
        let raw = equilibrium(&mut DirectMath, 0.0, 0.0, 0.0);
        assert_eq!(raw.height, 0.0);
        assert_eq!(raw.rotation, 0.0);
        assert!(close(raw.scale, 0.6));
        assert!(close(raw.opacity, 0.3));
    }

    #[test]
    fn equilibrium_matches_closed_form() {
        let (x, y, t): (f64, f64, f64) = (0.4, -0.2, 2.0);
        let d = x.hypot(y);
        let h = (x * 2.5 + t * 0.8).sin() * (y * 2.5 + t * 0.6).cos() * (d * 3.0 - t * 1.2).sin();
        let raw = equilibrium(&mut DirectMath, x, y, t);
        assert!(close(raw.height, h));
        assert!(close(raw.rotation, t * 15.0 + h * 60.0));
    }

    #[test]
    fn resonance_matches_closed_form() {
        let (x, y, t): (f64, f64, f64) = (-0.5, 0.7, 1.3);
        let a = y.atan2(x);
        let d = x.hypot(y);
        let h = (a * 4.0 + d * 6.0 - t * 2.0).sin() * (d * 3.0 + t * 1.5).cos() * (-d * 0.3).exp();
        let raw = resonance(&mut DirectMath, x, y, t);
        assert!(close(raw.height, h));
        assert!(close(raw.rotation, a * 57.3 + t * 25.0));
        assert!(close(raw.scale, 0.5 + h.abs() * 1.2));
        assert!(close(raw.opacity, 0.2 + h.abs() * 0.7));
    }

    #[test]
    fn metamorphosis_matches_closed_form() {
        let (x, y, t): (f64, f64, f64) = (0.1, 0.9, 4.0);
        let h = ((x * 3.0 + t * 1.2).sin()
            + (y * 4.0 - t * 0.9).cos() * 0.7
            + ((x + y) * 2.0 + t * 1.6).sin() * 0.5)
            / 2.2;
        let raw = metamorphosis(&mut DirectMath, x, y, t);
        assert!(close(raw.height, h));
        assert!(close(raw.rotation, h * 90.0 + t * 20.0));
        assert!(close(raw.scale, 0.4 + h.abs() * 1.1));
        assert!(close(raw.opacity, 0.25 + h.abs() * 0.65));
    }

    #[test]
    fn synthesis_matches_closed_form() {
        let (x, y, t): (f64, f64, f64) = (-0.3, 0.6, 7.5);
        let n1 = (x * 4.0 + t * 0.7).sin() * (y * 3.0 - t * 0.5).cos();
        let n2 = (y * 5.0 + t * 1.1).sin() * (x * 2.0 + t * 0.8).cos();
        let chaos = (t * 0.3).sin() * 0.4;
        let h = (n1 + n2 * 0.8 + chaos) / 1.8;
        let raw = synthesis(&mut DirectMath, x, y, t);
        assert!(close(raw.height, h));
        assert!(close(raw.rotation, t * 35.0 + (x + y) * 30.0));
        assert!(close(raw.scale, 0.3 + h.abs() * 1.3));
        assert!(close(raw.opacity, 0.2 + h.abs() * 0.75));
    }

    #[test]
    fn patterns_produce_distinct_heights() {
        let heights: Vec<f64> = PatternKind::ALL
            .iter()
            .map(|k| k.evaluate(&mut DirectMath, 0.3, 0.3, 1.0).height)
            .collect();
        for i in 0..heights.len() {
            for j in (i + 1)..heights.len() {
                assert!(
                    (heights[i] - heights[j]).abs() > 1e-3,
                    "patterns {i} and {j} alias: {heights:?}"
                );
            }
        }
    }

    #[test]
    fn evaluate_dispatches_to_named_function() {
        let mut m = DirectMath;
        assert_eq!(
            PatternKind::Resonance.evaluate(&mut m, 0.2, 0.5, 3.0),
            resonance(&mut m, 0.2, 0.5, 3.0)
        );
        assert_eq!(
            PatternKind::Synthesis.evaluate(&mut m, 0.2, 0.5, 3.0),
            synthesis(&mut m, 0.2, 0.5, 3.0)
        );
    }

    #[test]
    fn cached_kernel_tracks_direct_kernel() {
        let mut cached = CachedMath::default();
        for kind in PatternKind::ALL {
            for step in 0..50 {
                let t = step as f64 * 0.015;
                let a = kind.evaluate(&mut cached, 0.35, -0.6, t);
                let b = kind.evaluate(&mut DirectMath, 0.35, -0.6, t);
                assert!((a.height - b.height).abs() < 5e-3, "{kind} at t={t}");
                assert!((a.opacity - b.opacity).abs() < 5e-3, "{kind} at t={t}");
            }
        }
    }

    #[test]
    fn opacity_and_scale_floors_hold_for_all_patterns() {
        let floors = [(0.6, 0.3), (0.5, 0.2), (0.4, 0.25), (0.3, 0.2)];
        for (kind, (scale_floor, opacity_floor)) in PatternKind::ALL.into_iter().zip(floors) {
            for i in 0..40 {
                let x = -1.0 + i as f64 * 0.05;
                let raw = kind.evaluate(&mut DirectMath, x, -x * 0.5, i as f64 * 0.2);
                assert!(raw.scale >= scale_floor - 1e-12);
                assert!(raw.opacity >= opacity_floor - 1e-12);
            }
        }
    }
}
