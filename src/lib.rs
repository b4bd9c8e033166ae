//! esg-report - ESG report wizard and production data export
//!
//! This library provides the core functionality for the `esgreport` binary:
//! a three-step wizard that configures and generates environmental, ESG,
//! carbon, sustainability and compliance reports from facility production
//! records, and an export pipeline that delivers records and reports as
//! CSV, JSON, Excel or PDF artifacts.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Report configuration, templates and production records
//! - `wizard`: The wizard state machine and report generation
//! - `export`: Artifact building for every output format
//! - `storage`: JSON file storage, chunked loading and sample data
//! - `history`: Append-only log of generated reports and exports
//! - `services`: Import and delivery
//! - `cli`, `display`, `tui`: The command-line and dashboard front ends
//! - `logging`, `monitor`: Tracing setup and operation timing
//!
//! # Example
//!
//! ```rust,ignore
//! use esg_report::config::{paths::ReportPaths, settings::Settings};
//!
//! let paths = ReportPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod history;
pub mod logging;
pub mod models;
pub mod monitor;
pub mod services;
pub mod storage;
pub mod tui;
pub mod wizard;

pub use error::{ReportError, ReportResult};
