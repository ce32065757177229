// SPDX-License-Identifier: MIT
//! # Common Resolution Table
//!
//! Curated downscale alternatives for well-known input sizes: 4K and ultrawide screens,
//! SDXL/Civitai training buckets, classic 16:9 steps, squares and phone portraits.
//! Lists are ordered largest first. Lookups are exact; a size that is not in the table
//! gets no entries, never the closest neighbour.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::presets::Size;

/// Raw table rows as `(width, height, "WxH, WxH, ...")`.
const COMMON_RESOLUTIONS: &[(u32, u32, &str)] = &[
    // 4K and high resolutions
    (3840, 2160, "2560x1440, 1920x1080, 1280x720, 960x540, 854x480"),
    (3440, 1440, "2560x1080, 2560x1440, 1920x810, 1600x720, 1280x540"),
    (2560, 1440, "1920x1080, 1600x900, 1280x720, 1024x576, 960x540"),
    (2560, 1080, "1920x810, 1920x800, 1600x900, 1280x720, 1024x576"),
    (2048, 1152, "1920x1080, 1600x900, 1280x720, 1024x576, 960x540"),
    // SDXL / Civitai buckets
    (1152, 896, "1024x800, 960x768, 896x672"),
    (896, 1152, "768x992, 672x864, 576x736"),
    (1216, 832, "1152x768, 1024x704, 896x640"),
    (832, 1216, "768x1120, 704x1024, 640x928"),
    (1344, 768, "1216x704, 1152x672, 1024x576"),
    (768, 1344, "704x1216, 672x1152, 576x1024"),
    (1536, 640, "1344x576, 1216x512, 1024x448"),
    (640, 1536, "576x1344, 512x1216, 448x1024"),
    (640, 960, "576x864, 512x768, 480x720"),
    (768, 1152, "704x1056, 640x960, 576x864"),
    (800, 1200, "704x1056, 640x960, 576x864"),
    // Classic 16:9 landscape
    (1920, 1080, "1600x900, 1536x864, 1280x720, 1024x576, 960x540"),
    (1720, 720, "1600x720, 1280x720, 1024x576, 960x540, 854x480"),
    (1680, 1050, "1600x900, 1440x900, 1280x800, 1280x720, 1024x640"),
    (1600, 900, "1440x810, 1280x720, 1024x576"),
    (1536, 864, "1440x810, 1280x720, 1024x576"),
    (1366, 768, "1280x720, 1152x648, 1024x576"),
    (1360, 768, "1280x720, 1152x648, 1024x576"),
    (1280, 720, "1152x648, 1024x576, 960x540"),
    (1270, 720, "1152x648, 1024x576, 960x540"),
    (1024, 576, "960x540, 854x480, 768x432"),
    (960, 540, "854x480, 848x480, 800x450"),
    (854, 480, "800x450, 768x432, 640x360"),
    (848, 480, "800x450, 768x432, 640x360"),
    (800, 450, "768x432, 720x405, 640x360"),
    (720, 405, "640x360, 576x324, 512x288"),
    (640, 360, "576x324, 512x288, 426x240"),
    (426, 240, "400x225, 384x216, 320x180"),
    // Square / near-square
    (2048, 2048, "1536x1536, 1024x1024, 768x768"),
    (1536, 1536, "1280x1280, 1024x1024, 768x768"),
    (1280, 1280, "1024x1024, 896x896, 768x768"),
    (1024, 1024, "896x896, 768x768, 640x640"),
    (896, 896, "768x768, 704x704, 640x640"),
    (768, 768, "640x640, 576x576, 512x512"),
    (640, 640, "576x576, 512x512, 480x480"),
    (512, 512, "448x448, 384x384, 320x320"),
    // Portrait
    (1080, 1920, "900x1600, 720x1280, 540x960"),
    (720, 1280, "640x1138, 540x960, 480x853"),
    (640, 1136, "576x1024, 540x960, 480x853"),
];

static TABLE: Lazy<HashMap<Size, Vec<Size>>> = Lazy::new(|| {
    COMMON_RESOLUTIONS
        .iter()
        .map(|&(w, h, list)| (Size::new(w, h), parse_res_list(list)))
        .collect()
});

/// Parse a comma separated `WxH` list.
///
/// Entries without an `x` or with non-numeric sides are skipped rather than rejected.
pub fn parse_res_list(text: &str) -> Vec<Size> {
    text.split(',').filter_map(parse_res).collect()
}

/// Parse a single `WxH` entry.
pub fn parse_res(text: &str) -> Option<Size> {
    let (w, h) = text.trim().split_once('x')?;
    Some(Size {
        w: w.trim().parse().ok()?,
        h: h.trim().parse().ok()?,
    })
}

/// Curated alternatives for an exact size match, largest first.
pub fn lookup(size: Size) -> Option<&'static [Size]> {
    TABLE
        .get(&size)
        .map(Vec::as_slice)
        .filter(|list| !list.is_empty())
}

/// All table keys with their alternatives, in declaration order.
pub fn entries() -> impl Iterator<Item = (Size, &'static [Size])> {
    COMMON_RESOLUTIONS.iter().filter_map(|&(w, h, _)| {
        let key = Size::new(w, h);
        lookup(key).map(|list| (key, list))
    })
}

/// Render a list back to the `WxH, WxH` form used in the info string.
pub fn format_res_list(list: &[Size]) -> String {
    list.iter()
        .map(Size::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
