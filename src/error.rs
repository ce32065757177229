//! # Error Handling
//!
//! The planner itself never fails: empty images and unknown selectors degrade to a safe
//! default. Errors only appear around it, when reading an image from disk, validating a
//! configuration or writing structured output.
//!
//! ## Error Classification
//!
//! Every error carries:
//!
//! - a short category string (`config`, `image_load`, ...)
//! - an [`ErrorSeverity`]
//! - an optional recovery suggestion, exposed through [`HasRecoverySuggestion`]
//!
//! ## Usage
//!
//! ```rust
//! use resolution_suggest::error::{HasRecoverySuggestion, PlannerError};
//!
//! let error = PlannerError::config("size", "0x720", "both sides must be greater than 0")
//!     .with_context("parsing --size")
//!     .with_recovery_suggestion("Pass the size as WIDTHxHEIGHT, e.g. 1920x1080");
//!
//! assert_eq!(error.category(), "config");
//! assert!(error.recovery_suggestion().is_some());
//! ```

use std::{error::Error as StdError, fmt, path::PathBuf};

/// Severity levels for errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Warnings that may indicate potential issues
    Warning,
    /// Errors that stop the current request
    Error,
    /// Errors that cannot be recovered from without user intervention
    Fatal,
}

/// Metadata attached to every error
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Additional context about the error
    pub context: Option<String>,
    /// Suggested recovery action
    pub recovery_suggestion: Option<String>,
    pub severity: ErrorSeverity,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            context: None,
            recovery_suggestion: None,
            severity: ErrorSeverity::Error,
        }
    }
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_recovery_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.recovery_suggestion = Some(suggestion.into());
        self
    }
}

/// Base error type for the resolution suggest host
#[derive(Debug)]
pub enum PlannerError {
    /// Configuration validation errors
    Config {
        field: String,
        value: String,
        reason: String,
        context: ErrorContext,
    },
    /// The image could not be opened or its header could not be decoded
    ImageLoad {
        path: PathBuf,
        reason: String,
        context: ErrorContext,
    },
    /// Image shape does not describe a planable image
    InvalidSize {
        width: usize,
        height: usize,
        context: ErrorContext,
    },
    /// I/O errors
    Io {
        operation: String,
        source: std::io::Error,
        context: ErrorContext,
    },
    /// Structured output could not be produced
    Json {
        source: serde_json::Error,
        context: ErrorContext,
    },
}

impl PlannerError {
    /// Create a configuration error
    pub fn config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Config {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
            context: ErrorContext::new()
                .with_severity(ErrorSeverity::Fatal)
                .with_recovery_suggestion("Run with --help to see accepted values"),
        }
    }

    /// Create an image load error
    pub fn image_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ImageLoad {
            path: path.into(),
            reason: reason.into(),
            context: ErrorContext::new().with_recovery_suggestion(
                "Check that the file exists and is a PNG, JPEG, WebP or other supported format",
            ),
        }
    }

    /// Create an invalid size error
    pub fn invalid_size(width: usize, height: usize) -> Self {
        Self::InvalidSize {
            width,
            height,
            context: ErrorContext::new().with_severity(ErrorSeverity::Warning),
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
            context: ErrorContext::new(),
        }
    }

    /// Short machine-friendly category name
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::ImageLoad { .. } => "image_load",
            Self::InvalidSize { .. } => "invalid_size",
            Self::Io { .. } => "io",
            Self::Json { .. } => "json",
        }
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Config { context, .. }
            | Self::ImageLoad { context, .. }
            | Self::InvalidSize { context, .. }
            | Self::Io { context, .. }
            | Self::Json { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::Config { context, .. }
            | Self::ImageLoad { context, .. }
            | Self::InvalidSize { context, .. }
            | Self::Io { context, .. }
            | Self::Json { context, .. } => context,
        }
    }

    /// Add context describing what was being done
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context_mut().context = Some(context.into());
        self
    }

    /// Replace the recovery suggestion
    pub fn with_recovery_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context_mut().recovery_suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::Config {
                field,
                value,
                reason,
                ..
            } => {
                write!(
                    f,
                    "Configuration error in '{}': {} (value: {})",
                    field, reason, value
                )?;
            }
            PlannerError::ImageLoad { path, reason, .. } => {
                write!(f, "Failed to read image {}: {}", path.display(), reason)?;
            }
            PlannerError::InvalidSize { width, height, .. } => {
                write!(f, "Invalid image size {}x{}", width, height)?;
            }
            PlannerError::Io {
                operation, source, ..
            } => {
                write!(f, "I/O error during {}: {}", operation, source)?;
            }
            PlannerError::Json { source, .. } => {
                write!(f, "Failed to serialize output: {}", source)?;
            }
        }
        if let Some(context) = &self.context().context {
            write!(f, " (while {})", context)?;
        }
        Ok(())
    }
}

impl StdError for PlannerError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias using our custom error type
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Trait for errors that carry a severity level
pub trait HasSeverity {
    fn severity(&self) -> ErrorSeverity;
}

impl HasSeverity for PlannerError {
    fn severity(&self) -> ErrorSeverity {
        self.context().severity
    }
}

/// Trait for errors that provide recovery suggestions
pub trait HasRecoverySuggestion {
    fn recovery_suggestion(&self) -> Option<&str>;
}

impl HasRecoverySuggestion for PlannerError {
    fn recovery_suggestion(&self) -> Option<&str> {
        self.context().recovery_suggestion.as_deref()
    }
}

impl From<std::io::Error> for PlannerError {
    fn from(error: std::io::Error) -> Self {
        Self::io("unknown", error)
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            source: error,
            context: ErrorContext::new(),
        }
    }
}

impl From<image::ImageError> for PlannerError {
    fn from(error: image::ImageError) -> Self {
        match error {
            image::ImageError::IoError(source) => Self::io("reading image", source),
            other => Self::image_load(PathBuf::new(), other.to_string()),
        }
    }
}
