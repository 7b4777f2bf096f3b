//! Folder discovery and per-image region counting

use crate::analysis::regions::label_grid;
use crate::io::configuration::{DEFAULT_THRESHOLD, IMAGE_EXTENSION};
use crate::io::error::{Result, file_system_error};
use crate::io::image::{export_label_map, label_map_path};
use crate::io::loader::load_grid;
use crate::io::progress::ProgressManager;
use std::path::{Path, PathBuf};

/// What to do with an image that is not a single 2D plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidImagePolicy {
    /// Abort the whole batch on the first rejected image
    #[default]
    FailFast,
    /// Log the rejected image and continue with the next one
    Skip,
}

/// Settings for one batch run
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Minimum intensity counted as foreground
    pub threshold: i64,
    /// Handling of images rejected for their shape
    pub invalid_images: InvalidImagePolicy,
    /// Directory receiving one PNG label map per image
    pub label_dir: Option<PathBuf>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            invalid_images: InvalidImagePolicy::default(),
            label_dir: None,
        }
    }
}

/// Region multiplicities found in one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMultiplicities {
    /// Source image
    pub path: PathBuf,
    /// Pixel count of every region in discovery order
    pub multiplicities: Vec<usize>,
}

/// List the `*.tiff` files directly inside a folder, sorted by path
///
/// Matching is case-sensitive and does not descend into subdirectories.
///
/// # Errors
///
/// Returns an error if the folder cannot be read
pub fn discover_images(folder: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(folder).map_err(|e| file_system_error(folder, "read", e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| file_system_error(folder, "read entry", e))?
            .path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some(IMAGE_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Count region multiplicities for every TIFF image in a folder
///
/// Stops at the first image that fails. An empty folder logs a notice and
/// yields an empty list.
///
/// # Errors
///
/// Returns an error if the folder cannot be read or any image fails to load
pub fn process_folder(folder: &Path, threshold: i64) -> Result<Vec<Vec<usize>>> {
    let mut processor = BatchProcessor::new(BatchOptions {
        threshold,
        ..BatchOptions::default()
    });
    let results = processor.run(folder)?;
    Ok(results
        .into_iter()
        .map(|image| image.multiplicities)
        .collect())
}

/// Runs loading, thresholding and labeling over a folder of images
pub struct BatchProcessor {
    options: BatchOptions,
    progress_manager: Option<ProgressManager>,
}

impl BatchProcessor {
    /// Create a processor without progress display
    pub const fn new(options: BatchOptions) -> Self {
        Self {
            options,
            progress_manager: None,
        }
    }

    /// Report progress through the given manager
    #[must_use]
    pub fn with_progress(mut self, progress_manager: ProgressManager) -> Self {
        self.progress_manager = Some(progress_manager);
        self
    }

    /// Options this processor was created with
    pub const fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Process every discovered image of `folder`
    ///
    /// # Errors
    ///
    /// Returns an error if the folder cannot be read, or if an image fails
    /// and the failure is not skipped by the invalid-image policy
    pub fn run(&mut self, folder: &Path) -> Result<Vec<ImageMultiplicities>> {
        let files = discover_images(folder)?;

        if files.is_empty() {
            log::warn!("No TIFF files found in folder: {}", folder.display());
            return Ok(Vec::new());
        }

        log::info!(
            "Processing {} images with threshold {}",
            files.len(),
            self.options.threshold
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut results = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            match self.process_file(file, index) {
                Ok(multiplicities) => {
                    results.push(ImageMultiplicities {
                        path: file.clone(),
                        multiplicities,
                    });
                }
                Err(error)
                    if error.is_shape()
                        && self.options.invalid_images == InvalidImagePolicy::Skip =>
                {
                    log::warn!("Skipping image: {error}");
                    if let Some(ref mut pm) = self.progress_manager {
                        pm.skip_file(index);
                    }
                }
                Err(error) => {
                    if let Some(ref pm) = self.progress_manager {
                        pm.finish();
                    }
                    return Err(error);
                }
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(results)
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<Vec<usize>> {
        if let Some(ref pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }

        let grid = load_grid(input_path)?;
        let regions = label_grid(&grid.view(), &(self.options.threshold as f64));

        if let Some(ref dir) = self.options.label_dir {
            export_label_map(&regions, &label_map_path(dir, input_path))?;
        }

        let multiplicities = regions.into_multiplicities();
        log::debug!(
            "{}: {} clusters {:?}",
            input_path.display(),
            multiplicities.len(),
            multiplicities
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, multiplicities.len());
        }

        Ok(multiplicities)
    }
}
