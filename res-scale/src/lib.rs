// SPDX-License-Identifier: MIT
//! # res-scale: Snap-to-Multiple Resolution Planning
//!
//! This crate computes a downscaled width/height for an image so that both sides are a
//! multiple of the granularity a generation model expects (8, 16, 32 or 64 pixels).
//! It never touches pixel data: the output is a pair of numbers plus a diagnostic string
//! meant to be fed into a separate resize step.
//!
//! ## Key Components
//!
//! - [`presets`]: Sizes, model profiles, scale presets and the snapping arithmetic
//! - [`table`]: Static table of well-known resolutions and their curated alternatives
//! - [`suggest`]: Suggestion targets and the top-level [`suggest::plan`] entry point
//!
//! ## Strategies
//!
//! Two families of presets are supported:
//! - **Percentage**: 0% to 60% smaller in steps of 10, applied to both axes
//! - **Suggestion 1-3**: curated alternatives for exact table hits, falling back to
//!   0.8 / 0.7 / 0.6 scaling for unknown sizes
//! - **Suggestion 4**: always 50%, for very low VRAM setups
//!
//! Every result is floored to the profile granularity and never exceeds the input.
//!
//! ## Usage Example
//!
//! ```rust
//! use res_scale::presets::{ModelProfile, ScalePreset, Size};
//! use res_scale::suggest::plan;
//!
//! let out = plan(Size { w: 1920, h: 1080 }, ModelProfile::Sd8, ScalePreset::Suggestion1);
//! assert_eq!((out.out.w, out.out.h), (1600, 896));
//! assert!(out.info.starts_with("multiple_of: 8 (SD / General (8))"));
//! ```

pub mod presets;
pub mod suggest;
pub mod table;
