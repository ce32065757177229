// SPDX-License-Identifier: MIT
//! # Suggestion Targets and Plan Computation
//!
//! Ties profiles, presets and the resolution table together into a single
//! [`ResolutionPlan`].
//!
//! ## Suggestion Precedence
//!
//! 1. Rank 4 is always a 50% scale; the table is not consulted
//! 2. Ranks 1-3 on an exact table hit use the curated entry for that rank
//! 3. Ranks 1-3 on a miss scale by 0.8 / 0.7 / 0.6
//!
//! Curated entries are snapped the same way scaled sizes are, and report the literal
//! table value as their raw size.

use serde::Serialize;
use tracing::debug;

use crate::presets::{
    percentage_to_scale, scale_and_snap, snap_within, ModelProfile, PresetKind, ScalePreset,
    Size,
};
use crate::table;

/// Message returned in place of the info string for empty inputs.
pub const INVALID_SIZE_MESSAGE: &str = "Invalid image size – cannot calculate.";

/// Scale used by rank 4 and by the "less common lower resolution" hint.
pub const LOW_VRAM_SCALE: f64 = 0.5;

/// Scale applied by ranks 1-3 when the input is not in the table.
pub fn fallback_scale(rank: u8) -> f64 {
    match rank {
        1 => 0.8,
        2 => 0.7,
        3 => 0.6,
        _ => LOW_VRAM_SCALE,
    }
}

/// Compute the `(snapped, raw)` target for a suggestion rank.
pub fn suggestion_target(input: Size, multiple_of: u32, rank: u8) -> (Size, Size) {
    if rank >= 4 {
        debug!(%input, "very low VRAM suggestion, scaling by 0.5");
        return scale_and_snap(input, LOW_VRAM_SCALE, multiple_of);
    }

    if let Some(list) = table::lookup(input) {
        let idx = usize::from(rank.max(1) - 1).min(list.len() - 1);
        let target = list[idx];
        debug!(%input, %target, rank, "suggestion taken from resolution table");
        return (snap_within(target, input, multiple_of), target);
    }

    let scale = fallback_scale(rank);
    debug!(%input, rank, scale, "no table entry, using dynamic suggestion");
    scale_and_snap(input, scale, multiple_of)
}

/// Complete result of planning a downscale.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolutionPlan {
    /// Original input dimensions
    pub input: Size,
    pub profile: ModelProfile,
    pub preset: ScalePreset,
    /// Granularity both output sides are a multiple of
    pub multiple_of: u32,
    /// Rounded but unsnapped target, for diagnostics only
    pub raw: Size,
    /// Final snapped dimensions to resize to
    pub out: Size,
    /// Effective scale; for suggestions derived from the output width
    pub scale: f64,
    pub reduction_percent: f64,
    /// Pipe-delimited summary of the decision
    pub info: String,
}

impl ResolutionPlan {
    /// True when the plan degraded to the input size because the input was empty.
    pub fn is_invalid(&self) -> bool {
        self.info == INVALID_SIZE_MESSAGE
    }
}

/// Plan a downscale of `input` for the given profile and preset.
///
/// Never fails: an input with a zero side comes back unchanged with
/// [`INVALID_SIZE_MESSAGE`] as its info string.
pub fn plan(input: Size, profile: ModelProfile, preset: ScalePreset) -> ResolutionPlan {
    let multiple_of = profile.multiple_of();

    if !input.is_valid() {
        tracing::warn!(%input, "invalid image size, returning input unchanged");
        return ResolutionPlan {
            input,
            profile,
            preset,
            multiple_of,
            raw: input,
            out: input,
            scale: 1.0,
            reduction_percent: 0.0,
            info: INVALID_SIZE_MESSAGE.to_string(),
        };
    }

    let (out, raw, scale, reduction_percent) = match preset.kind() {
        PresetKind::Percentage(reduction) => {
            let reduction = f64::from(reduction);
            let scale = percentage_to_scale(reduction);
            let (out, raw) = scale_and_snap(input, scale, multiple_of);
            (out, raw, scale, reduction)
        }
        PresetKind::Suggestion(rank) => {
            let (out, raw) = suggestion_target(input, multiple_of, rank);
            // Width-derived; height may have snapped by a different ratio.
            let scale = f64::from(out.w) / f64::from(input.w);
            (out, raw, scale, (1.0 - scale) * 100.0)
        }
    };

    let info = [
        format!("multiple_of: {} ({})", multiple_of, profile.label()),
        format!(
            "scale_preset={}, reduction≈{:.1}% (scale≈{:.4})",
            preset.short_name(),
            reduction_percent,
            scale
        ),
        format!("input image: {}", input),
        format!("result: raw {} -> snapped {}", raw, out),
        common_resolutions_line(input, multiple_of),
    ]
    .join(" | ");

    ResolutionPlan {
        input,
        profile,
        preset,
        multiple_of,
        raw,
        out,
        scale,
        reduction_percent,
        info,
    }
}

/// Plan from host selector strings, falling back permissively on unknown selectors.
pub fn plan_from_selectors(input: Size, profile: &str, preset: &str) -> ResolutionPlan {
    plan(input, ModelProfile::resolve(profile), ScalePreset::resolve(preset))
}

/// Table suggestions for the input plus a generic half-size hint.
///
/// Independent of the chosen preset.
pub fn common_resolutions_line(input: Size, multiple_of: u32) -> String {
    let base = match table::lookup(input) {
        Some(list) => format!(
            "suggested/common resolutions: {}",
            table::format_res_list(list)
        ),
        None => {
            "suggested/common resolutions: (no static entries for this input size)".to_string()
        }
    };
    let (low, _) = scale_and_snap(input, LOW_VRAM_SCALE, multiple_of);
    format!(
        "{} | less common lower resolution (same aspect ratio): {}",
        base, low
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sz(w: u32, h: u32) -> Size {
        Size::new(w, h)
    }

    #[test]
    fn keep_preset_is_identity_on_aligned_input() {
        let p = plan(sz(1920, 1080), ModelProfile::Sd8, ScalePreset::Keep);
        assert_eq!(p.out, sz(1920, 1080));
        assert_eq!(p.raw, sz(1920, 1080));
    }

    #[test]
    fn thirty_percent_on_720p() {
        let p = plan(sz(1280, 720), ModelProfile::Sd8, ScalePreset::Smaller30);
        assert_eq!(p.out, sz(896, 504));
        let p = plan(sz(1280, 720), ModelProfile::Strict16, ScalePreset::Smaller30);
        assert_eq!(p.raw, sz(896, 504));
        assert_eq!(p.out, sz(896, 496));
    }

    #[test]
    fn rank_four_ignores_table() {
        let input = sz(1920, 1080);
        let (out, raw) = suggestion_target(input, 16, 4);
        assert_eq!((out, raw), scale_and_snap(input, 0.5, 16));
        assert_eq!(out, sz(960, 528));
    }

    #[test]
    fn rank_one_uses_table_entry() {
        let (out, raw) = suggestion_target(sz(1920, 1080), 8, 1);
        assert_eq!(raw, sz(1600, 900));
        assert_eq!(out, sz(1600, 896));
    }

    #[test]
    fn ranks_pick_successive_entries() {
        assert_eq!(suggestion_target(sz(1280, 720), 8, 2).1, sz(1024, 576));
        assert_eq!(suggestion_target(sz(1280, 720), 8, 3).1, sz(960, 540));
    }

    #[test]
    fn table_target_never_exceeds_input() {
        // 3440x1440 lists 2560x1440 second; height stays within the input
        let (out, _) = suggestion_target(sz(3440, 1440), 64, 2);
        assert_eq!(out, sz(2560, 1408));
        // 720x1280 lists 640x1138; 1138 floors to 1136 with multiple_of 8
        let (out, raw) = suggestion_target(sz(720, 1280), 8, 1);
        assert_eq!(raw, sz(640, 1138));
        assert_eq!(out, sz(640, 1136));
    }

    #[test]
    fn unknown_size_falls_back_to_dynamic_scale() {
        let input = sz(1234, 987);
        let (out, raw) = suggestion_target(input, 8, 2);
        assert_eq!((out, raw), scale_and_snap(input, 0.7, 8));
        assert_eq!(raw, sz(864, 691));
        assert_eq!(out, sz(864, 688));
    }

    #[test]
    fn suggestion_reduction_is_width_derived() {
        let p = plan(sz(1920, 1080), ModelProfile::Sd8, ScalePreset::Suggestion1);
        assert!((p.scale - 1600.0 / 1920.0).abs() < 1e-12);
        assert!(p.info.contains("scale_preset=Resolution suggestion 1, reduction≈16.7% (scale≈0.8333)"));
    }

    #[test]
    fn invalid_input_passes_through() {
        let p = plan(sz(0, 720), ModelProfile::Strict16, ScalePreset::Smaller50);
        assert_eq!(p.out, sz(0, 720));
        assert!(p.is_invalid());
        assert!(p.info.contains("Invalid image size"));
    }

    #[test]
    fn info_string_layout() {
        let p = plan(sz(1280, 720), ModelProfile::Strict16, ScalePreset::Smaller30);
        assert_eq!(
            p.info,
            "multiple_of: 16 (WAN 2.2 / Strict (16)) \
             | scale_preset=30% smaller, reduction≈30.0% (scale≈0.7000) \
             | input image: 1280x720 \
             | result: raw 896x504 -> snapped 896x496 \
             | suggested/common resolutions: 1152x648, 1024x576, 960x540 \
             | less common lower resolution (same aspect ratio): 640x352"
        );
    }

    #[test]
    fn info_without_table_entry() {
        let line = common_resolutions_line(sz(1234, 987), 8);
        assert_eq!(
            line,
            "suggested/common resolutions: (no static entries for this input size) \
             | less common lower resolution (same aspect ratio): 616x488"
        );
    }

    #[test]
    fn selector_plan_falls_back() {
        let p = plan_from_selectors(sz(1920, 1080), "bogus", "bogus");
        assert_eq!(p.multiple_of, 8);
        assert_eq!(p.preset, ScalePreset::Keep);
        assert_eq!(p.out, sz(1920, 1080));
    }
}
