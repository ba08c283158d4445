use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// StderrProgressReporter adapter for reporting collection progress to stderr
///
/// Messages go to stderr so they never mix with a caller's stdout output.
/// Level progress is drawn with an indicatif bar whose length grows as new
/// levels are discovered.
pub struct StderrProgressReporter {
    progress_bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: Mutex::new(None),
            quiet: false,
        }
    }

    /// Reporter that only prints errors and warnings
    pub fn quiet() -> Self {
        Self {
            progress_bar: Mutex::new(None),
            quiet: true,
        }
    }

    fn progress_bar(&self, total: usize) -> Option<ProgressBar> {
        let mut slot = self.progress_bar.lock().ok()?;
        let pb = slot.get_or_insert_with(|| {
            let pb = ProgressBar::new(total as u64);
            let style = ProgressStyle::with_template(
                "   {spinner:.green} [{bar:40.cyan/blue}] level {pos}/{len} - {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
            pb.set_style(style);
            pb
        });
        pb.set_length(total as u64);
        Some(pb.clone())
    }

    fn finish_progress_bar(&self) {
        if let Ok(mut slot) = self.progress_bar.lock() {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
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
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        if self.quiet {
            return;
        }
        if let Some(pb) = self.progress_bar(total) {
            pb.set_position(current as u64);
            if let Some(msg) = message {
                pb.set_message(msg.to_string());
            }
        }
    }

    fn report_error(&self, message: &str) {
        self.finish_progress_bar();
        eprintln!("{}", message);
    }

    fn report_completion(&self, message: &str) {
        self.finish_progress_bar();
        if !self.quiet {
            eprintln!();
            eprintln!("{}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_creation() {
        let reporter = StderrProgressReporter::new();
        // Can't easily test stderr output, but verify it doesn't panic
        reporter.report("📦 Level 1: 2 dependenc(ies)");
        reporter.report_progress(1, 2, Some("3 dependenc(ies) queued"));
        reporter.report_progress(2, 2, None);
        reporter.report_error("⚠️  Warning: test");
        reporter.report_completion("✅ Collected 3 node(s)");
    }

    #[test]
    fn test_quiet_reporter_has_no_progress_bar() {
        let reporter = StderrProgressReporter::quiet();
        reporter.report_progress(1, 1, Some("level"));
        assert!(reporter.progress_bar.lock().unwrap().is_none());
    }
}
