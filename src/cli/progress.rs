//! Terminal progress bar

use crate::engine::ProgressSink;
use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str = "{spinner} [{bar:40}] {pos}/{len} rows ({elapsed})";
const SPINNER_TEMPLATE: &str = "{spinner} {pos} rows ({elapsed})";

/// Progress sink drawing an `indicatif` bar on stderr
#[derive(Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new_spinner())
    }

    /// A reporter that never draws
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        bar.set_style(style(SPINNER_TEMPLATE));
        bar.set_message("Fetching market history");
        Self { bar }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("position", &self.position())
            .field("length", &self.length())
            .finish()
    }
}

impl ProgressSink for ProgressReporter {
    fn on_progress(&self, processed: u32, total: Option<u32>) {
        if let Some(total) = total {
            if self.bar.length() != Some(u64::from(total)) {
                self.bar.set_length(u64::from(total));
                self.bar.set_style(style(BAR_TEMPLATE).progress_chars("=> "));
            }
        }
        self.bar.set_position(u64::from(processed));
    }

    fn on_finish(&self) {
        self.bar.finish_and_clear();
    }
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_bar())
}
