//! Console progress reporting for aggregation runs.

use indicatif::{ProgressBar, ProgressStyle};
use xliff_extract::Reporter;

/// Shows a spinner while locales are parsed and a summary line at the end.
/// Clones share the underlying spinner.
#[derive(Clone)]
pub struct ConsoleReporter {
    spinner: ProgressBar,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {wide_msg}")
                .unwrap(),
        );
        ConsoleReporter { spinner }
    }

    /// Clears the spinner without a summary, for aborted runs.
    pub fn clear(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn locale_started(&self, locale: &str) {
        self.spinner.set_message(format!("Parsing {locale}..."));
        self.spinner.tick();
    }

    fn run_finished(&self, locale_count: usize) {
        self.spinner
            .finish_with_message(format!("✅ Parsed {locale_count} locale files"));
    }
}
