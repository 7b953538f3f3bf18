//! Progress reporting for report runs.
//!
//! This module provides two modes of progress reporting:
//! - Interactive mode (TTY): Animated progress bars using indicatif
//! - Logging mode (non-TTY): Structured logging using tracing

mod interactive;
mod logging;

use std::sync::Arc;

use console::Term;
use ghrepos::report::{ProgressCallback, ReportProgress};

pub use interactive::InteractiveReporter;
pub use logging::LoggingReporter;

/// Progress reporter that handles both interactive and logging modes.
pub enum ProgressReporter {
    /// Interactive progress bars for TTY.
    Interactive(InteractiveReporter),
    /// Structured logging for non-TTY (CI, pipes).
    Logging(LoggingReporter),
}

impl ProgressReporter {
    /// Create a new progress reporter, auto-detecting TTY mode.
    pub fn new() -> Self {
        if Term::stdout().is_term() {
            Self::Interactive(InteractiveReporter::new())
        } else {
            Self::Logging(LoggingReporter::new())
        }
    }

    /// Handle a progress event.
    pub fn handle(&self, event: ReportProgress) {
        match self {
            Self::Interactive(r) => r.handle(event),
            Self::Logging(r) => r.handle(event),
        }
    }

    /// Convert to a ProgressCallback for the library.
    pub fn as_callback(self: &Arc<Self>) -> ProgressCallback {
        let reporter = Arc::clone(self);
        Box::new(move |event| {
            reporter.handle(event);
        })
    }

    /// Mark the run as successful.
    pub fn succeed(&self, message: &str) {
        match self {
            Self::Interactive(r) => r.succeed(message),
            Self::Logging(r) => r.succeed(message),
        }
    }

    /// Mark the run as failed and show the error.
    pub fn fail(&self, message: &str) {
        match self {
            Self::Interactive(r) => r.fail(message),
            Self::Logging(r) => r.fail(message),
        }
    }

    /// Print an informational line.
    pub fn println(&self, line: &str) {
        match self {
            Self::Interactive(r) => r.println(line),
            Self::Logging(r) => r.println(line),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_forwards_to_logging_reporter() {
        let reporter = Arc::new(ProgressReporter::Logging(LoggingReporter::new()));
        let callback = reporter.as_callback();
        callback(ReportProgress::FilterComplete {
            matched: 1,
            total: 2,
        });
        assert_eq!(Arc::strong_count(&reporter), 2);
    }
}
