// SPDX-License-Identifier: MIT
//! # Profiles, Scale Presets and Snapping
//!
//! This module holds the arithmetic every strategy is built from: flooring a dimension to
//! a multiple of the model granularity, and scaling a size before snapping it.
//!
//! ## Snapping Rules
//!
//! - Results are floored to the nearest multiple of the granularity
//! - A result is never smaller than one granularity unit (0 snaps to the unit itself)
//! - A scaled result is never larger than the input on either axis, as long as the input
//!   is at least one unit wide
//!
//! ## Selectors
//!
//! Host applications pass profiles and presets as fixed display strings. Both enums match
//! those strings exactly (plus their short CLI names) and never by prefix, so labels can
//! be reworded without one selector silently shadowing another.

use clap::ValueEnum;
use serde::Serialize;

/// Represents a 2D size with width and height in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// True when both sides are non-zero.
    pub fn is_valid(&self) -> bool {
        self.w > 0 && self.h > 0
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// Model profile selecting the snap granularity.
///
/// Diffusion and video models need latent-friendly sizes; the granularity is the divisor
/// both output sides must share.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize)]
pub enum ModelProfile {
    /// Stable Diffusion and most general-purpose models.
    #[value(name = "sd8")]
    Sd8,
    /// WAN 2.2 and other strict video models.
    #[value(name = "strict16")]
    Strict16,
    #[value(name = "video32")]
    Video32,
    /// Older pipelines that only accept 64-aligned sizes.
    #[value(name = "legacy64")]
    Legacy64,
}

impl ModelProfile {
    pub const ALL: [ModelProfile; 4] = [
        ModelProfile::Sd8,
        ModelProfile::Strict16,
        ModelProfile::Video32,
        ModelProfile::Legacy64,
    ];

    /// Profile preselected by host interfaces.
    pub const HOST_DEFAULT: ModelProfile = ModelProfile::Strict16;

    pub fn multiple_of(self) -> u32 {
        match self {
            ModelProfile::Sd8 => 8,
            ModelProfile::Strict16 => 16,
            ModelProfile::Video32 => 32,
            ModelProfile::Legacy64 => 64,
        }
    }

    /// Human-readable profile name shown in the info string.
    pub fn label(self) -> &'static str {
        match self {
            ModelProfile::Sd8 => "SD / General (8)",
            ModelProfile::Strict16 => "WAN 2.2 / Strict (16)",
            ModelProfile::Video32 => "Video / Advanced (32)",
            ModelProfile::Legacy64 => "Legacy / Extra Safe (64)",
        }
    }

    /// Fixed selector string offered by host dropdowns.
    pub fn selector(self) -> &'static str {
        match self {
            ModelProfile::Sd8 => "multiple_of: 8 (SD / General (8))",
            ModelProfile::Strict16 => "multiple_of: 16 (WAN 2.2 / Strict (16))",
            ModelProfile::Video32 => "multiple_of: 32 (Video / Advanced (32))",
            ModelProfile::Legacy64 => "multiple_of: 64 (Legacy / Extra Safe (64))",
        }
    }

    /// Strict match against a selector string or a short CLI name.
    pub fn from_selector(selector: &str) -> Option<Self> {
        let selector = selector.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.selector() == selector)
            .or_else(|| <Self as ValueEnum>::from_str(selector, true).ok())
    }

    /// Permissive match: unknown selectors fall back to the 8 profile.
    pub fn resolve(selector: &str) -> Self {
        Self::from_selector(selector).unwrap_or_else(|| {
            tracing::warn!(selector, "unknown model profile, falling back to multiple_of 8");
            ModelProfile::Sd8
        })
    }
}

/// Resolve a profile selector to `(multiple_of, label)`.
pub fn resolve_profile(selector: &str) -> (u32, &'static str) {
    let profile = ModelProfile::resolve(selector);
    (profile.multiple_of(), profile.label())
}

/// The two families a [`ScalePreset`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresetKind {
    /// Flat reduction in percent (0..=60, steps of 10).
    Percentage(u8),
    /// Suggestion rank, 1 being closest to the original size.
    Suggestion(u8),
}

/// Scaling strategy chosen by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize)]
pub enum ScalePreset {
    #[value(name = "keep")]
    Keep,
    #[value(name = "pct10")]
    Smaller10,
    #[value(name = "pct20")]
    Smaller20,
    #[value(name = "pct30")]
    Smaller30,
    #[value(name = "pct40")]
    Smaller40,
    #[value(name = "pct50")]
    Smaller50,
    #[value(name = "pct60")]
    Smaller60,
    /// Highest curated alternative from the table.
    #[value(name = "suggest1")]
    Suggestion1,
    #[value(name = "suggest2")]
    Suggestion2,
    /// Lowest curated alternative from the table.
    #[value(name = "suggest3")]
    Suggestion3,
    /// Fixed 50% for very low VRAM, table ignored.
    #[value(name = "suggest4")]
    Suggestion4,
}

impl ScalePreset {
    pub const ALL: [ScalePreset; 11] = [
        ScalePreset::Keep,
        ScalePreset::Smaller10,
        ScalePreset::Smaller20,
        ScalePreset::Smaller30,
        ScalePreset::Smaller40,
        ScalePreset::Smaller50,
        ScalePreset::Smaller60,
        ScalePreset::Suggestion1,
        ScalePreset::Suggestion2,
        ScalePreset::Suggestion3,
        ScalePreset::Suggestion4,
    ];

    /// Preset preselected by host interfaces.
    pub const HOST_DEFAULT: ScalePreset = ScalePreset::Smaller30;

    pub fn kind(self) -> PresetKind {
        match self {
            ScalePreset::Keep => PresetKind::Percentage(0),
            ScalePreset::Smaller10 => PresetKind::Percentage(10),
            ScalePreset::Smaller20 => PresetKind::Percentage(20),
            ScalePreset::Smaller30 => PresetKind::Percentage(30),
            ScalePreset::Smaller40 => PresetKind::Percentage(40),
            ScalePreset::Smaller50 => PresetKind::Percentage(50),
            ScalePreset::Smaller60 => PresetKind::Percentage(60),
            ScalePreset::Suggestion1 => PresetKind::Suggestion(1),
            ScalePreset::Suggestion2 => PresetKind::Suggestion(2),
            ScalePreset::Suggestion3 => PresetKind::Suggestion(3),
            ScalePreset::Suggestion4 => PresetKind::Suggestion(4),
        }
    }

    /// Fixed selector string offered by host dropdowns. The examples in parentheses
    /// are the unsnapped results for two common inputs.
    pub fn selector(self) -> &'static str {
        match self {
            ScalePreset::Keep => {
                "0% smaller (keep original) (1920x1080→1920x1080, 1280x720→1280x720)"
            }
            ScalePreset::Smaller10 => "10% smaller (1920x1080→1728x972, 1280x720→1152x648)",
            ScalePreset::Smaller20 => "20% smaller (1920x1080→1536x864, 1280x720→1024x576)",
            ScalePreset::Smaller30 => "30% smaller (1920x1080→1344x756, 1280x720→896x504)",
            ScalePreset::Smaller40 => "40% smaller (1920x1080→1152x648, 1280x720→768x432)",
            ScalePreset::Smaller50 => "50% smaller (1920x1080→960x540, 1280x720→640x360)",
            ScalePreset::Smaller60 => "60% smaller (1920x1080→768x432, 1280x720→512x288)",
            ScalePreset::Suggestion1 => "Resolution suggestion 1 (highest from table)",
            ScalePreset::Suggestion2 => "Resolution suggestion 2 (lower from table)",
            ScalePreset::Suggestion3 => "Resolution suggestion 3 (lowest from table)",
            ScalePreset::Suggestion4 => "Resolution suggestion 4 (very low VRAM)",
        }
    }

    /// Short name used in the info string, without the parenthesised examples.
    pub fn short_name(self) -> &'static str {
        match self {
            ScalePreset::Keep => "0% smaller",
            ScalePreset::Smaller10 => "10% smaller",
            ScalePreset::Smaller20 => "20% smaller",
            ScalePreset::Smaller30 => "30% smaller",
            ScalePreset::Smaller40 => "40% smaller",
            ScalePreset::Smaller50 => "50% smaller",
            ScalePreset::Smaller60 => "60% smaller",
            ScalePreset::Suggestion1 => "Resolution suggestion 1",
            ScalePreset::Suggestion2 => "Resolution suggestion 2",
            ScalePreset::Suggestion3 => "Resolution suggestion 3",
            ScalePreset::Suggestion4 => "Resolution suggestion 4",
        }
    }

    /// Strict match against a selector string or a short CLI name.
    pub fn from_selector(selector: &str) -> Option<Self> {
        let selector = selector.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.selector() == selector)
            .or_else(|| <Self as ValueEnum>::from_str(selector, true).ok())
    }

    /// Permissive match: unknown selectors fall back to keeping the original size.
    pub fn resolve(selector: &str) -> Self {
        Self::from_selector(selector).unwrap_or_else(|| {
            tracing::warn!(selector, "unknown scale preset, falling back to 0% smaller");
            ScalePreset::Keep
        })
    }
}

/// Scales below this would collapse most inputs to a single granularity unit.
pub const MIN_SCALE: f64 = 0.1;

/// Floor `value` to a multiple of `multiple`, never going below one unit.
pub fn snap_dim(value: u32, multiple: u32) -> u32 {
    if value == 0 {
        return multiple;
    }
    ((value / multiple) * multiple).max(multiple)
}

/// Convert a reduction percentage into a scale factor, clamped to [`MIN_SCALE`].
pub fn percentage_to_scale(reduction_percent: f64) -> f64 {
    (1.0 - reduction_percent / 100.0).max(MIN_SCALE)
}

/// Round half-way values to the even neighbour, matching the rounding the preset
/// examples were computed with.
pub(crate) fn round_dim(value: f64) -> u32 {
    value.round_ties_even().max(0.0) as u32
}

/// Snap `target` to the granularity without exceeding `limit`.
///
/// If flooring still lands above the limit (targets larger than the input), the limit
/// itself is snapped instead.
pub fn snap_within(target: Size, limit: Size, multiple_of: u32) -> Size {
    let mut w = snap_dim(target.w, multiple_of);
    let mut h = snap_dim(target.h, multiple_of);
    if w > limit.w {
        w = snap_dim(limit.w, multiple_of);
    }
    if h > limit.h {
        h = snap_dim(limit.h, multiple_of);
    }
    Size { w, h }
}

/// Scale `input` by `scale` and snap both sides.
///
/// # Returns
/// `(snapped, raw)` where `raw` is the rounded but unsnapped scaled size. Only `snapped`
/// should be used for resizing; `raw` is reported for diagnostics.
pub fn scale_and_snap(input: Size, scale: f64, multiple_of: u32) -> (Size, Size) {
    let raw = Size {
        w: round_dim(f64::from(input.w) * scale),
        h: round_dim(f64::from(input.h) * scale),
    };
    (snap_within(raw, input, multiple_of), raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_floors_to_multiple() {
        assert_eq!(snap_dim(1080, 16), 1072);
        assert_eq!(snap_dim(1080, 8), 1080);
        assert_eq!(snap_dim(900, 64), 896);
    }

    #[test]
    fn snap_never_returns_zero() {
        assert_eq!(snap_dim(0, 8), 8);
        assert_eq!(snap_dim(5, 32), 32);
    }

    #[test]
    fn scale_floor_is_ten_percent() {
        assert!((percentage_to_scale(30.0) - 0.7).abs() < 1e-12);
        assert!((percentage_to_scale(95.0) - MIN_SCALE).abs() < 1e-12);
        assert_eq!(percentage_to_scale(0.0), 1.0);
    }

    #[test]
    fn scale_and_snap_reports_raw() {
        let (out, raw) = scale_and_snap(Size::new(1280, 720), 0.7, 16);
        assert_eq!(raw, Size::new(896, 504));
        assert_eq!(out, Size::new(896, 496));
    }

    #[test]
    fn rounding_is_ties_to_even() {
        // 405 * 0.5 = 202.5
        let (_, raw) = scale_and_snap(Size::new(720, 405), 0.5, 8);
        assert_eq!(raw, Size::new(360, 202));
    }

    #[test]
    fn tiny_input_clamps_to_unit() {
        let (out, _) = scale_and_snap(Size::new(20, 12), 0.5, 8);
        assert_eq!(out, Size::new(8, 8));
    }

    #[test]
    fn profile_selectors_match_exactly() {
        for p in ModelProfile::ALL {
            assert_eq!(ModelProfile::from_selector(p.selector()), Some(p));
        }
        assert_eq!(ModelProfile::from_selector("strict16"), Some(ModelProfile::Strict16));
        assert_eq!(ModelProfile::from_selector("multiple_of: 16"), None);
        assert_eq!(resolve_profile("nonsense"), (8, "SD / General (8)"));
    }

    #[test]
    fn preset_selectors_match_exactly() {
        for p in ScalePreset::ALL {
            assert_eq!(ScalePreset::from_selector(p.selector()), Some(p));
            assert!(p.selector().starts_with(p.short_name()));
        }
        assert_eq!(ScalePreset::from_selector("PCT30"), Some(ScalePreset::Smaller30));
        assert_eq!(ScalePreset::from_selector("30%"), None);
        assert_eq!(ScalePreset::resolve("30%"), ScalePreset::Keep);
    }
}
