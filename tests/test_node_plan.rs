//! Integration tests for the node surface and the config-driven planner.

use std::sync::Arc;

use image::{DynamicImage, Rgb, RgbImage};
use resolution_suggest::config::{InputSource, OutputFormat, PlannerConfig};
use resolution_suggest::node::{ImageTensor, ResolutionSuggestNode};
use resolution_suggest::{ModelProfile, ScalePreset, Size};

fn calc(w: usize, h: usize, profile: ModelProfile, preset: ScalePreset) -> (u32, u32, String) {
    let out = ResolutionSuggestNode::calc(
        &ImageTensor::empty(h, w),
        profile.selector(),
        preset.selector(),
    );
    (out.width, out.height, out.info)
}

#[test]
fn keep_original_on_1080p() {
    let (w, h, _) = calc(1920, 1080, ModelProfile::Sd8, ScalePreset::Keep);
    assert_eq!((w, h), (1920, 1080));
}

#[test]
fn preset_examples_hold_for_multiple_of_8() {
    let cases = [
        (ScalePreset::Smaller10, (1728, 968), (1152, 648)),
        (ScalePreset::Smaller20, (1536, 864), (1024, 576)),
        (ScalePreset::Smaller30, (1344, 752), (896, 504)),
        (ScalePreset::Smaller40, (1152, 648), (768, 432)),
        (ScalePreset::Smaller50, (960, 536), (640, 360)),
        (ScalePreset::Smaller60, (768, 432), (512, 288)),
    ];
    for (preset, full_hd, hd) in cases {
        let (w, h, _) = calc(1920, 1080, ModelProfile::Sd8, preset);
        assert_eq!((w, h), full_hd, "{preset:?} on 1920x1080");
        let (w, h, _) = calc(1280, 720, ModelProfile::Sd8, preset);
        assert_eq!((w, h), hd, "{preset:?} on 1280x720");
    }
}

#[test]
fn suggestion_one_on_table_key() {
    let (w, h, info) = calc(1920, 1080, ModelProfile::Sd8, ScalePreset::Suggestion1);
    assert_eq!((w, h), (1600, 896));
    assert!(info.contains("result: raw 1600x900 -> snapped 1600x896"));
}

#[test]
fn suggestion_two_off_table_scales_by_070() {
    let (w, h, info) = calc(1234, 987, ModelProfile::Sd8, ScalePreset::Suggestion2);
    assert_eq!((w, h), (864, 688));
    assert!(info.contains("(no static entries for this input size)"));
}

#[test]
fn suggestion_four_is_half_size() {
    let (w, h, _) = calc(3840, 2160, ModelProfile::Legacy64, ScalePreset::Suggestion4);
    assert_eq!((w, h), (1920, 1024));
}

#[test]
fn zero_sized_image_is_reported_not_failed() {
    let out = ResolutionSuggestNode::calc(
        &ImageTensor::empty(720, 0),
        ResolutionSuggestNode::default_profile(),
        ResolutionSuggestNode::default_preset(),
    );
    assert_eq!((out.width, out.height), (0, 720));
    assert!(out.info.contains("Invalid image size"));
}

#[test]
fn unknown_selectors_fall_back_to_first_option() {
    let out = ResolutionSuggestNode::calc(&ImageTensor::empty(1080, 1920), "?", "?");
    assert_eq!(out.plan.multiple_of, 8);
    assert_eq!((out.width, out.height), (1920, 1080));
    assert!(out.info.starts_with("multiple_of: 8 (SD / General (8)) | scale_preset=0% smaller"));
}

#[test]
fn decoded_image_passes_through() {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 48, Rgb([10, 20, 30])));
    let tensor = ImageTensor::from_dynamic(&img);
    let out = ResolutionSuggestNode::calc(
        &tensor,
        ModelProfile::Strict16.selector(),
        ScalePreset::Smaller50.selector(),
    );
    assert!(Arc::ptr_eq(&out.image.data, &tensor.data));
    assert_eq!((out.width, out.height), (32, 16));
}

#[test]
fn run_reads_image_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    RgbImage::new(1280, 720).save(&path).unwrap();

    let config = PlannerConfig::new(
        InputSource::Image(path),
        ModelProfile::Strict16,
        ScalePreset::Suggestion1,
        OutputFormat::Text,
    );
    let plan = resolution_suggest::run(&config).unwrap();
    assert_eq!(plan.input, Size::new(1280, 720));
    assert_eq!(plan.out, Size::new(1152, 640));

    let text = resolution_suggest::render(&plan, OutputFormat::Text).unwrap();
    assert!(text.starts_with("1152 640\nmultiple_of: 16"));
}

#[test]
fn run_rejects_unreadable_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"not an image").unwrap();

    let config = PlannerConfig::new(
        InputSource::Image(path),
        ModelProfile::Sd8,
        ScalePreset::Keep,
        OutputFormat::Text,
    );
    let err = resolution_suggest::run(&config).unwrap_err();
    assert_eq!(err.category(), "image_load");
}

#[test]
fn json_report_fields() {
    let config = PlannerConfig::new(
        InputSource::Size(Size::new(1280, 720)),
        ModelProfile::Strict16,
        ScalePreset::Smaller30,
        OutputFormat::Json,
    );
    let plan = resolution_suggest::run(&config).unwrap();
    let json = resolution_suggest::render(&plan, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["width"], 896);
    assert_eq!(value["height"], 496);
    assert_eq!(value["raw_height"], 504);
    assert_eq!(value["multiple_of"], 16);
    assert_eq!(value["preset"], "30% smaller");
}
