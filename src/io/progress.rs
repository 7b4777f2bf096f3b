//! Progress display for folder batches

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Images: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates the progress bar of one batch run
///
/// Before [`ProgressManager::initialize`] every call is a no-op, so a batch
/// can report unconditionally.
pub struct ProgressManager {
    bar: Option<ProgressBar>,
    file_count: usize,
    completed: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub const fn new() -> Self {
        Self {
            bar: None,
            file_count: 0,
            completed: 0,
        }
    }

    /// Create the progress bar for a batch of `file_count` images
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;
        self.completed = 0;

        if file_count == 0 {
            return;
        }

        let bar = ProgressBar::new(file_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        self.bar = Some(bar);
    }

    /// Show the image currently being processed
    pub fn start_file(&self, index: usize, path: &Path) {
        if let Some(ref bar) = self.bar {
            let display_name = path.file_name().unwrap_or_default().to_string_lossy();
            bar.set_message(format!("{}: {display_name}", index + 1));
        }
    }

    /// Mark an image as finished with the number of regions found
    pub fn complete_file(&mut self, index: usize, clusters: usize) {
        if index >= self.file_count {
            return;
        }
        self.completed += 1;
        if let Some(ref bar) = self.bar {
            bar.inc(1);
            bar.set_message(format!("{}: {clusters} clusters", index + 1));
        }
    }

    /// Mark an image as skipped without counting regions
    pub fn skip_file(&mut self, index: usize) {
        if index >= self.file_count {
            return;
        }
        self.completed += 1;
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Number of images completed or skipped so far
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Clean up the progress display
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
