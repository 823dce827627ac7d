use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::cell::RefCell;
use std::time::Duration;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr so it doesn't interfere with report output on stdout.
/// Long-running steps (HTTP requests, rpm/dnf runs) get an indicatif spinner.
pub struct StderrProgressReporter {
    spinner: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: RefCell::new(None),
        }
    }

    fn start_spinner(&self, message: &str) {
        self.finish_spinner();

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("   {spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        *self.spinner.borrow_mut() = Some(spinner);
    }

    fn finish_spinner(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.finish_spinner();
        eprintln!("{}", message);
    }

    fn report_step(&self, message: &str) {
        self.start_spinner(message);
    }

    fn report_warning(&self, message: &str) {
        self.finish_spinner();
        eprintln!("{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    fn report_error(&self, message: &str) {
        self.finish_spinner();
        eprintln!("{} {}", "❌".red(), message.red());
    }

    fn report_completion(&self, message: &str) {
        self.finish_spinner();
        eprintln!("{} {}", "✅".green(), message);
    }
}

impl Drop for StderrProgressReporter {
    fn drop(&mut self) {
        self.finish_spinner();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_lifecycle() {
        let reporter = StderrProgressReporter::new();
        // Can't easily test stderr output, but verify it doesn't panic
        reporter.report("Loading dataset");
        reporter.report_step("Querying rpm database...");
        assert!(reporter.spinner.borrow().is_some());
        reporter.report_warning("record skipped");
        assert!(reporter.spinner.borrow().is_none());
        reporter.report_error("Test error");
        reporter.report_completion("Done");
    }

    #[test]
    fn test_new_step_replaces_spinner() {
        let reporter = StderrProgressReporter::default();
        reporter.report_step("first");
        reporter.report_step("second");
        assert!(reporter.spinner.borrow().is_some());
    }
}
