//! Command-line interface for folder-wide multiplicity analysis

use crate::analysis::batch::{BatchOptions, BatchProcessor, InvalidImagePolicy};
use crate::analysis::statistics::summarize;
use crate::io::configuration::{DEFAULT_LOG_LEVEL, DEFAULT_THRESHOLD, FOLDER_PROMPT};
use crate::io::error::{Result, file_system_error, invalid_parameter};
use crate::io::progress::ProgressManager;
use crate::io::report::write_report;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "multiplicity")]
#[command(
    author,
    version,
    about = "Measure cluster multiplicities of thresholded TIFF images"
)]
/// Command-line arguments for the multiplicity tool
pub struct Cli {
    /// Folder containing the TIFF images (prompted for when omitted)
    #[arg(value_name = "FOLDER")]
    pub folder: Option<PathBuf>,

    /// Minimum pixel intensity counted as part of a cluster
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD, allow_negative_numbers = true)]
    pub threshold: i64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Skip images that are not 2D grayscale instead of aborting
    #[arg(short, long)]
    pub skip_invalid: bool,

    /// Write a PNG label map per image into this directory
    #[arg(short, long, value_name = "DIR")]
    pub labels: Option<PathBuf>,

    /// Log level specification (overridden by `RUST_LOG`)
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Policy for images rejected by the shape check
    pub const fn invalid_image_policy(&self) -> InvalidImagePolicy {
        if self.skip_invalid {
            InvalidImagePolicy::Skip
        } else {
            InvalidImagePolicy::FailFast
        }
    }

    /// Batch settings derived from the arguments
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            threshold: self.threshold,
            invalid_images: self.invalid_image_policy(),
            label_dir: self.labels.clone(),
        }
    }

    /// Folder to analyse, asking on `input` when none was given
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be written, the answer cannot
    /// be read, or the answer is empty
    pub fn resolve_folder<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        prompt: &mut W,
    ) -> Result<PathBuf> {
        if let Some(ref folder) = self.folder {
            return Ok(folder.clone());
        }

        let stdin = Path::new("<stdin>");
        write!(prompt, "{FOLDER_PROMPT}")
            .and_then(|()| prompt.flush())
            .map_err(|e| file_system_error(Path::new("<stdout>"), "write prompt", e))?;

        let mut answer = String::new();
        input
            .read_line(&mut answer)
            .map_err(|e| file_system_error(stdin, "read folder path", e))?;

        let folder = answer.trim();
        if folder.is_empty() {
            return Err(invalid_parameter(
                "folder",
                &folder,
                &"a folder path is required",
            ));
        }
        Ok(PathBuf::from(folder))
    }
}

/// Orchestrates one analysis run: folder resolution, batch, report
pub struct FolderAnalysis {
    cli: Cli,
}

impl FolderAnalysis {
    /// Create a new analysis with the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Arguments this analysis runs with
    pub const fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Run against the process's stdin and stdout
    ///
    /// # Errors
    ///
    /// Returns an error if folder resolution, image processing or writing
    /// the report fails
    pub fn process(&self) -> Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.process_with(&mut stdin.lock(), &mut stdout.lock())
    }

    /// Run with explicit input and output streams
    ///
    /// # Errors
    ///
    /// Returns an error if folder resolution, image processing or writing
    /// the report fails
    pub fn process_with<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<()> {
        let folder = self.cli.resolve_folder(input, out)?;

        let mut processor = BatchProcessor::new(self.cli.batch_options());
        if self.cli.should_show_progress() {
            processor = processor.with_progress(ProgressManager::new());
        }

        let results = processor.run(&folder)?;
        let summary = summarize(
            &results
                .iter()
                .map(|image| image.multiplicities.as_slice())
                .collect::<Vec<_>>(),
        );

        log::info!(
            "Analysed {} images, {} clusters in total",
            results.len(),
            summary.count
        );

        write_report(out, &results, &summary)
            .map_err(|e| file_system_error(Path::new("<stdout>"), "write report", e))?;
        Ok(())
    }
}
