//! # Resolution Suggest Library
//!
//! Plans a downscaled width/height for images feeding diffusion and video models, whose
//! inputs must be a multiple of 8, 16, 32 or 64 pixels. The arithmetic lives in the
//! `res_scale` crate; this crate wraps it for hosts:
//!
//! - `node`: the node-graph surface (image tensor in, image/width/height/info out)
//! - `config`: request configuration and validation for the CLI
//! - `error`: error types for everything around the planner
//!
//! ## Example
//!
//! ```rust
//! use resolution_suggest::node::{ImageTensor, ResolutionSuggestNode};
//!
//! let image = ImageTensor::empty(720, 1280);
//! let out = ResolutionSuggestNode::calc(
//!     &image,
//!     "multiple_of: 8 (SD / General (8))",
//!     "30% smaller (1920x1080→1344x756, 1280x720→896x504)",
//! );
//! assert_eq!((out.width, out.height), (896, 504));
//! ```

use serde::Serialize;

pub mod config;
pub mod error;
pub mod node;

pub use config::{InputSource, OutputFormat, PlannerConfig};
pub use error::{HasRecoverySuggestion, HasSeverity, PlannerError, PlannerResult};
pub use res_scale::presets::{ModelProfile, ScalePreset, Size};
pub use res_scale::suggest::ResolutionPlan;

/// Flat, serializable view of a plan for JSON output.
#[derive(Debug, Serialize)]
pub struct PlanReport<'a> {
    pub width: u32,
    pub height: u32,
    pub raw_width: u32,
    pub raw_height: u32,
    pub input_width: u32,
    pub input_height: u32,
    pub multiple_of: u32,
    pub profile: &'static str,
    pub preset: &'static str,
    pub info: &'a str,
}

impl<'a> From<&'a ResolutionPlan> for PlanReport<'a> {
    fn from(plan: &'a ResolutionPlan) -> Self {
        Self {
            width: plan.out.w,
            height: plan.out.h,
            raw_width: plan.raw.w,
            raw_height: plan.raw.h,
            input_width: plan.input.w,
            input_height: plan.input.h,
            multiple_of: plan.multiple_of,
            profile: plan.profile.label(),
            preset: plan.preset.short_name(),
            info: &plan.info,
        }
    }
}

/// Validate `config`, resolve its input size and plan the downscale.
pub fn run(config: &PlannerConfig) -> PlannerResult<ResolutionPlan> {
    config.validate()?;
    let input = config.resolve_size()?;
    Ok(res_scale::suggest::plan(input, config.profile, config.preset))
}

/// Render a plan in the requested output format.
pub fn render(plan: &ResolutionPlan, format: OutputFormat) -> PlannerResult<String> {
    match format {
        OutputFormat::Text => Ok(format!("{} {}\n{}", plan.out.w, plan.out.h, plan.info)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&PlanReport::from(plan))?),
    }
}

/// One line per table entry: `WxH: WxH, WxH, ...`.
pub fn table_listing() -> String {
    res_scale::table::entries()
        .map(|(key, list)| format!("{}: {}", key, res_scale::table::format_res_list(list)))
        .collect::<Vec<_>>()
        .join("\n")
}
