use crate::error::{ReportError, Result};
use crate::github::{PageError, Paginator};
use crate::repo::RepoRecord;
use crate::source::RepoSource;

use super::super::progress::{ProgressCallback, ReportProgress, emit};

/// List every repository of one organization, pages concatenated in request
/// order.
pub async fn fetch_org_repos<S: RepoSource + ?Sized>(
    source: &S,
    org: &str,
    page_size: u32,
    on_progress: Option<&ProgressCallback>,
) -> Result<Vec<RepoRecord>> {
    emit(
        on_progress,
        ReportProgress::FetchingRepos {
            org: org.to_string(),
        },
    );

    let mut repos = Vec::new();
    let mut pager = Paginator::new(source, org, page_size);

    while let Some(page) = pager.next_page().await {
        let page = page.map_err(|PageError { page, source }| ReportError::PaginationFailure {
            org: org.to_string(),
            page,
            source,
        })?;

        let count = page.items.len();
        repos.extend(page.items);
        tracing::debug!(org, page = page.cursor.page, count, "Fetched page");
        emit(
            on_progress,
            ReportProgress::FetchedPage {
                org: org.to_string(),
                page: page.cursor.page,
                count,
                total_so_far: repos.len(),
            },
        );
    }

    emit(
        on_progress,
        ReportProgress::FetchComplete {
            org: org.to_string(),
            total: repos.len(),
        },
    );

    Ok(repos)
}

/// List repositories for each organization in turn.
///
/// One organization's listing finishes before the next one starts. The first
/// failure stops the walk and names that organization.
pub async fn fetch_orgs<S: RepoSource + ?Sized>(
    source: &S,
    orgs: &[String],
    page_size: u32,
    on_progress: Option<&ProgressCallback>,
) -> Result<Vec<RepoRecord>> {
    let mut all = Vec::new();
    for org in orgs {
        let repos = fetch_org_repos(source, org, page_size, on_progress).await?;
        all.extend(repos);
    }
    Ok(all)
}
