use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use console::style;
use ghrepos::report::ReportProgress;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Consolidated progress state to avoid multiple mutex locks.
#[derive(Default)]
struct ProgressState {
    /// Listing spinners by org name.
    fetch_bars: HashMap<String, ProgressBar>,
    /// Single bar for commit lookups.
    enrich_bar: Option<ProgressBar>,
}

/// Interactive progress reporter using indicatif.
///
/// One spinner per organization while listing, a one-line filter summary and
/// a single bar for commit lookups.
pub struct InteractiveReporter {
    multi: MultiProgress,
    state: Mutex<ProgressState>,
}

impl InteractiveReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            state: Mutex::new(ProgressState::default()),
        }
    }

    pub fn handle(&self, event: ReportProgress) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        match event {
            ReportProgress::FetchingRepos { org } => {
                let pb = self.multi.add(ProgressBar::new_spinner());
                pb.set_style(Self::spinner_style());
                pb.enable_steady_tick(Duration::from_millis(100));
                pb.set_prefix(format!("{:12}", org));
                pb.set_message("Fetching repositories...");
                state.fetch_bars.insert(org, pb);
            }

            ReportProgress::FetchedPage {
                org,
                page,
                total_so_far,
                ..
            } => {
                if let Some(pb) = state.fetch_bars.get(&org)
                    && !pb.is_finished()
                {
                    pb.set_message(format!("Page {} ({} repos)", page, total_so_far));
                }
            }

            ReportProgress::FetchComplete { org, total } => {
                if let Some(pb) = state.fetch_bars.get(&org) {
                    pb.finish_with_message(format!("✓ {} repos fetched", total));
                }
            }

            ReportProgress::FilterComplete { matched, total } => {
                let pb = self.multi.add(ProgressBar::new_spinner());
                pb.set_style(Self::spinner_style());
                pb.set_prefix(format!("{:12}", "Filter"));
                pb.finish_with_message(format!("✓ {}/{} included", matched, total));
            }

            ReportProgress::EnrichingRepos { count, concurrency } => {
                let pb = self.multi.add(ProgressBar::new(count as u64));
                pb.set_style(Self::bar_style());
                pb.set_prefix(format!("{:12}", "Commits"));
                pb.set_message(format!("{} at a time", concurrency));
                state.enrich_bar = Some(pb);
            }

            ReportProgress::EnrichedRepo { full_name, .. } => {
                if let Some(ref pb) = state.enrich_bar {
                    pb.inc(1);
                    pb.set_message(full_name);
                }
            }

            ReportProgress::CommitLookupSkipped { full_name, reason } => {
                if let Some(ref pb) = state.enrich_bar {
                    pb.set_message(format!("{} ({})", full_name, reason));
                }
            }

            ReportProgress::EnrichmentComplete { dated, undated } => {
                match state.enrich_bar {
                    Some(ref pb) => {
                        pb.finish_with_message(format!(
                            "✓ {} dated, {} without a date",
                            dated, undated
                        ));
                    }
                    None => {
                        let pb = self.multi.add(ProgressBar::new_spinner());
                        pb.set_style(Self::spinner_style());
                        pb.set_prefix(format!("{:12}", "Commits"));
                        pb.finish_with_message("✓ nothing to look up");
                    }
                }
            }

            _ => {}
        }
    }

    /// Show a final success line below the bars.
    pub fn succeed(&self, message: &str) {
        self.finish();
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(format!("{:12}", "Report"));
        pb.finish_with_message(format!("{} {}", style("✓").green(), message));
    }

    /// Leave every unfinished bar in a failed state and print the error.
    pub fn fail(&self, message: &str) {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        for pb in state.fetch_bars.values() {
            if !pb.is_finished() {
                pb.abandon_with_message(format!("{} failed", style("✗").red()));
            }
        }
        if let Some(ref pb) = state.enrich_bar
            && !pb.is_finished()
        {
            pb.abandon_with_message(format!("{} failed", style("✗").red()));
        }
        drop(state);

        eprintln!("{} {}", style("Error:").red().bold(), message);
    }

    /// Print a line above the bars.
    pub fn println(&self, line: &str) {
        if self.multi.println(line).is_err() {
            println!("{}", line);
        }
    }

    pub fn finish(&self) {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        for pb in state.fetch_bars.values() {
            if !pb.is_finished() {
                pb.finish();
            }
        }
        if let Some(ref pb) = state.enrich_bar
            && !pb.is_finished()
        {
            pb.finish();
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{prefix:.bold.cyan} {spinner:.green} {msg}")
            .expect("Invalid template")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos:>3}/{len:3} {msg}")
            .expect("Invalid template")
            .progress_chars("█▓░")
    }
}

impl Default for InteractiveReporter {
    fn default() -> Self {
        Self::new()
    }
}
