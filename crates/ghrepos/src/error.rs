//! Top-level error type for a report run.

use std::path::PathBuf;

use thiserror::Error;

use crate::github::GitHubError;

/// Every way a report run can fail. All variants are fatal: the run stops and
/// no output file is written.
#[derive(Debug, Error)]
pub enum ReportError {
    /// No credential source produced a token.
    #[error(
        "Could not load GitHub token from any source (--token argument, GITHUB_TOKEN env var, ~/.github-token file)"
    )]
    MissingCredential,

    /// Listing an organization's repositories failed.
    #[error("Failed to list repositories for {org} (page {page}): {source}")]
    PaginationFailure {
        org: String,
        page: u32,
        #[source]
        source: GitHubError,
    },

    /// A commit lookup failed with a server-side or transport error.
    #[error("Failed to fetch last commit for {repo}: {source}")]
    EnrichmentFailure {
        repo: String,
        #[source]
        source: GitHubError,
    },

    /// An enrichment task panicked or was cancelled.
    #[error("Enrichment task failed: {0}")]
    TaskFailed(String),

    /// The report could not be serialized or written.
    #[error("Failed to write {}: {source}", path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
