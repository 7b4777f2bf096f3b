//! PNG export of region label maps for visual inspection

use crate::analysis::regions::RegionLabels;
use crate::io::configuration::{LABEL_EXTENSION, LABEL_SUFFIX};
use crate::io::error::{AnalysisError, Result, file_system_error};
use image::{ImageBuffer, Rgb};
use std::path::{Path, PathBuf};

// Golden ratio conjugate spreads consecutive hues far apart
const HUE_STEP: f64 = 0.618_033_988_749_895;

/// Distinct colour for a region label; background (0) is black
pub fn label_color(label: u32) -> Rgb<u8> {
    if label == 0 {
        return Rgb([0, 0, 0]);
    }
    let hue = (f64::from(label) * HUE_STEP).fract() * 6.0;
    let sector = hue.floor();
    let rising = ((hue - sector) * 255.0).round() as u8;
    let falling = 255 - rising;
    match sector as u8 {
        0 => Rgb([255, rising, 0]),
        1 => Rgb([falling, 255, 0]),
        2 => Rgb([0, 255, rising]),
        3 => Rgb([0, falling, 255]),
        4 => Rgb([rising, 0, 255]),
        _ => Rgb([255, 0, falling]),
    }
}

/// Path of the label map written for an input image
pub fn label_map_path(output_dir: &Path, input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    output_dir.join(format!(
        "{}{LABEL_SUFFIX}.{LABEL_EXTENSION}",
        stem.to_string_lossy()
    ))
}

/// Export a label image as a PNG with one colour per region
///
/// # Errors
///
/// Returns an error if:
/// - The label image is larger than a PNG can hold
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_label_map(regions: &RegionLabels, output_path: &Path) -> Result<()> {
    let (rows, cols) = regions.labels.dim();
    let (Ok(width), Ok(height)) = (u32::try_from(cols), u32::try_from(rows)) else {
        return Err(AnalysisError::InvalidSourceData {
            reason: format!("label map of {rows}x{cols} exceeds PNG dimensions"),
        });
    };

    let img = ImageBuffer::from_fn(width, height, |x, y| {
        regions
            .labels
            .get((y as usize, x as usize))
            .copied()
            .map_or(Rgb([0, 0, 0]), label_color)
    });

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }

    img.save(output_path)
        .map_err(|e| AnalysisError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
