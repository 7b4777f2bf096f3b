//! Error types and path context for image analysis operations

use std::fmt;
use std::path::{Path, PathBuf};

const UNKNOWN_PATH: &str = "<unknown>";

/// Main error type for all analysis operations
#[derive(Debug)]
pub enum AnalysisError {
    /// Loaded image data is not a single two-dimensional plane
    ///
    /// Raised for multi-page stacks and for multi-sample pixels such as RGB
    /// before any thresholding takes place.
    Shape {
        /// Path to the offending image
        path: PathBuf,
        /// Shape of the decoded data, outermost axis first
        shape: Vec<usize>,
    },

    /// TIFF container or pixel data could not be decoded
    TiffDecode {
        /// Path to the image file
        path: PathBuf,
        /// Underlying decoder error
        source: tiff::TiffError,
    },

    /// Decoded data doesn't meet analysis requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Failed to save a label map to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Runtime parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Logger could not be initialized
    Logging {
        /// Underlying logger error
        source: flexi_logger::FlexiLoggerError,
    },
}

impl AnalysisError {
    /// Attach a path to errors that were created without one
    #[must_use]
    pub fn at_path(mut self, location: &Path) -> Self {
        match &mut self {
            Self::Shape { path, .. }
            | Self::TiffDecode { path, .. }
            | Self::ImageExport { path, .. }
            | Self::FileSystem { path, .. } => {
                if path.as_os_str() == UNKNOWN_PATH {
                    *path = location.to_path_buf();
                }
            }
            _ => {}
        }
        self
    }

    /// Check whether the error is a rejected image shape
    pub const fn is_shape(&self) -> bool {
        matches!(self, Self::Shape { .. })
    }
}

// Formats a shape the way array libraries print tuples: (5, 100, 100)
fn format_shape(shape: &[usize]) -> String {
    let axes = shape
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if shape.len() == 1 {
        format!("({axes},)")
    } else {
        format!("({axes})")
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape { path, shape } => {
                write!(
                    f,
                    "Expected a 2D grayscale image in '{}', but got shape {}",
                    path.display(),
                    format_shape(shape)
                )
            }
            Self::TiffDecode { path, source } => {
                write!(f, "Failed to decode TIFF '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Logging { source } => {
                write!(f, "Failed to initialize logging: {source}")
            }
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TiffDecode { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Logging { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for analysis results
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Enriches error messages with the file being processed
pub trait WithPath<T> {
    /// Attach the path to an error that was converted without one
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<AnalysisError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| e.into().at_path(path))
    }
}

impl From<tiff::TiffError> for AnalysisError {
    fn from(err: tiff::TiffError) -> Self {
        Self::TiffDecode {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<image::ImageError> for AnalysisError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageExport {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<flexi_logger::FlexiLoggerError> for AnalysisError {
    fn from(err: flexi_logger::FlexiLoggerError) -> Self {
        Self::Logging { source: err }
    }
}

/// Create a shape error for an image whose path is not yet known
pub fn shape_error(shape: Vec<usize>) -> AnalysisError {
    AnalysisError::Shape {
        path: PathBuf::from(UNKNOWN_PATH),
        shape,
    }
}

/// Create a file system error for a specific path and operation
pub fn file_system_error(
    path: &Path,
    operation: &'static str,
    source: std::io::Error,
) -> AnalysisError {
    AnalysisError::FileSystem {
        path: path.to_path_buf(),
        operation,
        source,
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AnalysisError {
    AnalysisError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
