use ghrepos::report::ReportProgress;

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, event: ReportProgress) {
        match event {
            ReportProgress::FetchingRepos { org } => {
                tracing::info!(org = %org, "Fetching repositories");
            }

            ReportProgress::FetchedPage {
                org,
                page,
                count,
                total_so_far,
            } => {
                tracing::debug!(org = %org, page, count, total_so_far, "Fetched page");
            }

            ReportProgress::FetchComplete { org, total } => {
                tracing::info!(org = %org, total, "Fetch complete");
            }

            ReportProgress::FilterComplete { matched, total } => {
                tracing::info!(matched, total, "Filtered by inclusion set");
            }

            ReportProgress::EnrichingRepos { count, concurrency } => {
                tracing::info!(count, concurrency, "Looking up last commits");
            }

            ReportProgress::EnrichedRepo {
                full_name,
                last_commit_date,
            } => {
                tracing::debug!(
                    repo = %full_name,
                    last_commit_date = ?last_commit_date,
                    "Last commit"
                );
            }

            ReportProgress::CommitLookupSkipped { full_name, reason } => {
                tracing::warn!(repo = %full_name, reason = %reason, "No commit date");
            }

            ReportProgress::EnrichmentComplete { dated, undated } => {
                tracing::info!(dated, undated, "Commit lookups complete");
            }

            _ => {}
        }
    }

    pub fn succeed(&self, message: &str) {
        tracing::info!("{}", message);
    }

    pub fn fail(&self, message: &str) {
        tracing::error!(error = %message, "Report failed");
        eprintln!("Error: {}", message);
    }

    pub fn println(&self, line: &str) {
        tracing::info!("{}", line);
    }
}

impl Default for LoggingReporter {
    fn default() -> Self {
        Self::new()
    }
}
