//! Input/output operations and error handling
//!
//! This module contains the process boundary:
//! - TIFF loading and label map export
//! - Command-line parsing, logging setup and the console report
//! - The crate error type

/// Command-line parsing and run orchestration
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types and path context
pub mod error;
/// PNG label map export
pub mod image;
/// TIFF decoding into intensity grids
pub mod loader;
/// Logger setup
pub mod logging;
/// Progress display for batches
pub mod progress;
/// Console report formatting
pub mod report;
