//! # Configuration Module
//!
//! This module provides the validated configuration for planning requests.

pub mod config;

pub use config::{InputSource, OutputFormat, PlannerConfig, parse_size};
