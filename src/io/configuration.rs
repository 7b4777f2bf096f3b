//! Analysis constants and runtime configuration defaults

// Default values for configurable parameters
/// Minimum intensity counted as foreground when none is given
pub const DEFAULT_THRESHOLD: i64 = 1;

/// Logger specification used when neither `--log-level` nor `RUST_LOG` is set
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Discovery is case-sensitive; `.tif` and `.TIFF` are not matched
/// File extension of images picked up from a folder
pub const IMAGE_EXTENSION: &str = "tiff";

/// Prompt shown when no folder is given on the command line
pub const FOLDER_PROMPT: &str = "Enter the folder path containing TIFF images: ";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Suffix added to label map filenames
pub const LABEL_SUFFIX: &str = "_labels";
/// Extension of exported label maps
pub const LABEL_EXTENSION: &str = "png";
/// Decimal places of the overall average multiplicity in the report
pub const SUMMARY_DECIMALS: usize = 2;
