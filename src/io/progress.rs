//! Progress display for batch image loading and evaluation

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

use crate::io::configuration::PROGRESS_FINISH_MESSAGE;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Images: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress display for batch evaluation
pub struct ProgressManager {
    bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no active bar
    pub const fn new() -> Self {
        Self { bar: None }
    }

    /// Start a bar sized to the number of images in the batch
    pub fn initialize(&mut self, image_count: usize) {
        let bar = ProgressBar::new(image_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        self.bar = Some(bar);
    }

    /// Show the image currently being loaded
    pub fn start_image(&self, name: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(name.to_string());
        }
    }

    /// Advance the bar past a completed image
    pub fn complete_image(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// Finish and clear the display
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(PROGRESS_FINISH_MESSAGE);
        }
    }
}
