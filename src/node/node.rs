//! # Resolution Suggest & Downscale Node
//!
//! Node-graph surface of the planner. A host wires an image in, picks a model profile and
//! a scale preset from two dropdowns, and receives the untouched image plus the planned
//! width, height and an info string:
//!
//! ```text
//!   Load Image ──(image)──► Resolution Suggest & Downscale ──► width/height ──► Resize
//!                                        │
//!                                        └──► info (STRING)
//! ```
//!
//! Selectors are the fixed dropdown strings in [`ResolutionSuggestNode::profile_options`]
//! and [`ResolutionSuggestNode::preset_options`]. Anything else falls back to the first
//! option of each list rather than failing the graph.

use res_scale::presets::{ModelProfile, ScalePreset, Size};
use res_scale::suggest::{ResolutionPlan, plan_from_selectors};

use super::tensor::ImageTensor;

/// Outputs in the host's declared order: image, width, height, info.
#[derive(Clone, Debug)]
pub struct NodeOutput {
    pub image: ImageTensor,
    pub width: u32,
    pub height: u32,
    pub info: String,
    pub plan: ResolutionPlan,
}

/// Registration metadata and entry point of the node.
pub struct ResolutionSuggestNode;

impl ResolutionSuggestNode {
    pub const CLASS_NAME: &'static str = "TuonoResolutionSuggestDownscale";
    pub const DISPLAY_NAME: &'static str = "Resolution Suggest & Downscale";
    pub const CATEGORY: &'static str = "Resolution/Utilities";
    pub const RETURN_NAMES: [&'static str; 4] = ["image", "width", "height", "info"];
    pub const RETURN_TYPES: [&'static str; 4] = ["IMAGE", "INT", "INT", "STRING"];

    /// Dropdown entries for `model_profile`, in display order.
    pub fn profile_options() -> Vec<&'static str> {
        ModelProfile::ALL.iter().map(|p| p.selector()).collect()
    }

    /// Dropdown entries for `scale_preset`, in display order.
    pub fn preset_options() -> Vec<&'static str> {
        ScalePreset::ALL.iter().map(|p| p.selector()).collect()
    }

    pub fn default_profile() -> &'static str {
        ModelProfile::HOST_DEFAULT.selector()
    }

    pub fn default_preset() -> &'static str {
        ScalePreset::HOST_DEFAULT.selector()
    }

    /// Plan a downscale for `image`.
    ///
    /// Height and width are read from shape indices 1 and 2. The image is returned as
    /// given; only the numbers and the info string are computed.
    pub fn calc(image: &ImageTensor, model_profile: &str, scale_preset: &str) -> NodeOutput {
        let input = Size {
            w: u32::try_from(image.width()).unwrap_or(u32::MAX),
            h: u32::try_from(image.height()).unwrap_or(u32::MAX),
        };
        let plan = plan_from_selectors(input, model_profile, scale_preset);
        tracing::info!(
            input = %plan.input,
            output = %plan.out,
            multiple_of = plan.multiple_of,
            preset = plan.preset.short_name(),
            "planned resolution"
        );

        NodeOutput {
            image: image.clone(),
            width: plan.out.w,
            height: plan.out.h,
            info: plan.info.clone(),
            plan,
        }
    }
}
