//! Analysis modules for region extraction and statistical aggregation

/// Folder discovery and per-image processing
pub mod batch;
/// Thresholded foreground bitsets
pub mod mask;
/// Connected region labeling and multiplicity counting
pub mod regions;
/// Mean and standard error over pooled multiplicities
pub mod statistics;
