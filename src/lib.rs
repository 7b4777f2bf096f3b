//! Cluster multiplicity analysis for thresholded grayscale TIFF images
//!
//! Every image of a folder is thresholded, its foreground split into
//! 8-connected regions, and the pixel count of each region recorded. The
//! multiplicities of all images are then pooled into a mean and a standard
//! error of the mean.

#![forbid(unsafe_code)]

/// Region labeling, folder batches and summary statistics
pub mod analysis;
/// Input/output operations and error handling
pub mod io;

pub use io::error::{AnalysisError, Result};
