//! Console report of per-image and overall multiplicities

use crate::analysis::batch::ImageMultiplicities;
use crate::analysis::statistics::{Summary, image_mean};
use crate::io::configuration::SUMMARY_DECIMALS;
use std::io::{self, Write};

/// Line written when a run produced no results
pub const NO_IMAGES_NOTICE: &str = "No images processed.";

/// Write the report for a finished batch
///
/// Each image gets its 1-based index, its multiplicities, its cluster count
/// and its average multiplicity, followed by the overall mean (rounded) and
/// SEM (unrounded). An empty batch writes only [`NO_IMAGES_NOTICE`].
///
/// # Errors
///
/// Returns an error if writing to `out` fails
pub fn write_report<W: Write>(
    out: &mut W,
    results: &[ImageMultiplicities],
    summary: &Summary,
) -> io::Result<()> {
    if results.is_empty() {
        return writeln!(out, "{NO_IMAGES_NOTICE}");
    }

    for (index, image) in results.iter().enumerate() {
        writeln!(out, "Image {}:", index + 1)?;
        writeln!(out, "  Multiplicities: {:?}", image.multiplicities)?;
        writeln!(out, "  Number of clusters: {}", image.multiplicities.len())?;
        writeln!(
            out,
            "  Average Multiplicity: {}",
            image_mean(&image.multiplicities)
        )?;
    }

    writeln!(
        out,
        "Overall Average Multiplicity across all images: {:.prec$}",
        summary.mean,
        prec = SUMMARY_DECIMALS
    )?;
    writeln!(out, "Standard Error of the Mean (SEM): {}", summary.sem)
}
