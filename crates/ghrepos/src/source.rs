//! The seam between the report pipeline and the remote API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::github::{GitHubError, PageCursor};
use crate::repo::RepoRecord;

/// Anything that can list an organization's repositories page by page and
/// look up a repository's newest commit.
///
/// [`crate::github::GitHubClient`] is the production implementation. The
/// pipeline only ever calls through this trait, so tests substitute fakes.
#[async_trait]
pub trait RepoSource: Send + Sync {
    /// Fetch one page of an organization's repositories, in server order.
    async fn list_org_repos_page(
        &self,
        org: &str,
        cursor: PageCursor,
    ) -> Result<Vec<RepoRecord>, GitHubError>;

    /// Committer date of the newest commit of `full_name` (`owner/name`).
    ///
    /// `Ok(None)` means the repository has no commits to report. Error
    /// responses are returned as-is; classifying them is the caller's job.
    async fn latest_commit_date(
        &self,
        full_name: &str,
    ) -> Result<Option<DateTime<Utc>>, GitHubError>;
}
