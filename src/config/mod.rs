//! Configuration module for esg-report
//!
//! This module provides configuration management including:
//! - Base directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ReportPaths;
pub use settings::Settings;
