//! # Configuration Module
//!
//! Configuration structures and validation for a planning request. This is the common
//! interface between the CLI and the library: the CLI fills a [`PlannerConfig`], the
//! library validates it and resolves the input size.
//!
//! ## Configuration Parameters
//!
//! | Parameter | Type | Default | Description |
//! |-----------|------|---------|-------------|
//! | `source` | `Option<InputSource>` | none | Image path or literal `WxH` size |
//! | `profile` | `ModelProfile` | `strict16` | Snap granularity |
//! | `preset` | `ScalePreset` | `pct30` | Percentage or suggestion strategy |
//! | `format` | `OutputFormat` | `text` | Plain text or JSON output |
//!
//! ## Examples
//!
//! ```rust
//! use resolution_suggest::config::config::{InputSource, PlannerConfig};
//! use res_scale::presets::Size;
//!
//! let mut config = PlannerConfig::default();
//! assert!(config.validate().is_err()); // no source yet
//!
//! config.source = Some(InputSource::Size(Size { w: 1920, h: 1080 }));
//! assert!(config.validate().is_ok());
//! assert_eq!(config.resolve_size().unwrap(), Size { w: 1920, h: 1080 });
//! ```

use std::path::PathBuf;

use res_scale::presets::{ModelProfile, ScalePreset, Size};

use crate::error::{PlannerError, PlannerResult};

/// Where the input dimensions come from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// Read the dimensions from an image file header.
    Image(PathBuf),
    /// Use literal dimensions.
    Size(Size),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `width height` on one line, the info string on the next.
    Text,
    Json,
}

/// Configuration for a single planning request.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub source: Option<InputSource>,
    pub profile: ModelProfile,
    pub preset: ScalePreset,
    pub format: OutputFormat,
}

impl Default for PlannerConfig {
    /// Defaults mirror the preselected dropdown values of the host node:
    /// the 16 profile and the 30% preset.
    fn default() -> Self {
        Self {
            source: None,
            profile: ModelProfile::HOST_DEFAULT,
            preset: ScalePreset::HOST_DEFAULT,
            format: OutputFormat::Text,
        }
    }
}

impl PlannerConfig {
    pub fn new(
        source: InputSource,
        profile: ModelProfile,
        preset: ScalePreset,
        format: OutputFormat,
    ) -> Self {
        Self {
            source: Some(source),
            profile,
            preset,
            format,
        }
    }

    /// Validates the configuration parameters.
    ///
    /// A zero-sized literal is accepted on purpose: the planner reports it as an invalid
    /// size instead of failing.
    pub fn validate(&self) -> PlannerResult<()> {
        match &self.source {
            None => Err(PlannerError::config(
                "source",
                "",
                "an image path or --size WIDTHxHEIGHT is required",
            )),
            Some(InputSource::Image(path)) if !path.is_file() => Err(PlannerError::config(
                "image",
                path.display().to_string(),
                "file does not exist",
            )),
            Some(_) => Ok(()),
        }
    }

    /// Resolve the input dimensions, reading only the image header for file sources.
    pub fn resolve_size(&self) -> PlannerResult<Size> {
        match &self.source {
            Some(InputSource::Size(size)) => Ok(*size),
            Some(InputSource::Image(path)) => {
                let (w, h) = image::image_dimensions(path)
                    .map_err(|e| PlannerError::image_load(path, e.to_string()))?;
                tracing::debug!(path = %path.display(), w, h, "read image dimensions");
                Ok(Size { w, h })
            }
            None => Err(PlannerError::config("source", "", "no input configured")),
        }
    }
}

/// Parse a `WIDTHxHEIGHT` literal such as `1920x1080`.
pub fn parse_size(text: &str) -> PlannerResult<Size> {
    res_scale::table::parse_res(text).ok_or_else(|| {
        PlannerError::config("size", text, "expected WIDTHxHEIGHT")
            .with_recovery_suggestion("Pass the size as WIDTHxHEIGHT, e.g. 1920x1080")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert!(config.source.is_none());
        assert_eq!(config.profile, ModelProfile::Strict16);
        assert_eq!(config.preset, ScalePreset::Smaller30);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_config_validation() {
        let mut config = PlannerConfig::default();
        assert!(config.validate().is_err());

        config.source = Some(InputSource::Image(PathBuf::from("/definitely/not/here.png")));
        let err = config.validate().unwrap_err();
        assert_eq!(err.category(), "config");

        config.source = Some(InputSource::Size(Size { w: 0, h: 720 }));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1280x720").unwrap(), Size { w: 1280, h: 720 });
        assert_eq!(parse_size(" 640 x 360 ").unwrap(), Size { w: 640, h: 360 });
        assert!(parse_size("1280").is_err());
        assert!(parse_size("axb").is_err());
    }
}
