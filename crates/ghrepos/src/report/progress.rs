//! Progress events for report runs.
//!
//! The library never draws anything itself. Frontends pass a callback and
//! render these events however they like.

use chrono::{DateTime, Utc};

/// Progress events emitted while a report is built.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ReportProgress {
    /// Starting to list an organization's repositories.
    FetchingRepos {
        /// The organization being listed.
        org: String,
    },

    /// Fetched a page of repositories.
    FetchedPage {
        org: String,
        /// Page number (1-indexed).
        page: u32,
        /// Number of repos on this page.
        count: usize,
        /// Running total for this organization.
        total_so_far: usize,
    },

    /// Finished listing an organization.
    FetchComplete { org: String, total: usize },

    /// Inclusion filter applied.
    FilterComplete {
        /// Records that passed.
        matched: usize,
        /// Records before filtering.
        total: usize,
    },

    /// Starting commit lookups.
    EnrichingRepos { count: usize, concurrency: usize },

    /// A commit lookup finished without a fatal error.
    EnrichedRepo {
        full_name: String,
        last_commit_date: Option<DateTime<Utc>>,
    },

    /// A commit lookup returned a client error; the record stays undated.
    CommitLookupSkipped { full_name: String, reason: String },

    /// All commit lookups finished.
    EnrichmentComplete { dated: usize, undated: usize },
}

/// Callback for progress updates during a report run.
pub type ProgressCallback = Box<dyn Fn(ReportProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: ReportProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}
