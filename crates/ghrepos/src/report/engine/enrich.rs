use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::{ReportError, Result};
use crate::github::{GitHubError, short_error_message};
use crate::repo::RepoRecord;
use crate::source::RepoSource;

use super::super::progress::{ProgressCallback, ReportProgress, emit};

/// What one commit lookup produced.
#[derive(Debug)]
pub(super) enum LookupOutcome {
    /// The newest commit's committer date.
    Dated(DateTime<Utc>),
    /// No date: no commits, or a 4xx response (kept for reporting).
    Undated(Option<GitHubError>),
    /// Any other failure, such as a 5xx, a transport error or an undecodable body.
    /// Aborts the run.
    Fatal(GitHubError),
}

impl LookupOutcome {
    pub(super) fn classify(
        result: std::result::Result<Option<DateTime<Utc>>, GitHubError>,
    ) -> Self {
        match result {
            Ok(Some(date)) => Self::Dated(date),
            Ok(None) => Self::Undated(None),
            Err(e) if e.is_client_error() => Self::Undated(Some(e)),
            Err(e) => Self::Fatal(e),
        }
    }
}

async fn lookup_with_permit<S: RepoSource>(
    source: S,
    semaphore: Arc<Semaphore>,
    index: usize,
    full_name: String,
) -> Result<(usize, LookupOutcome)> {
    let _permit = semaphore
        .acquire()
        .await
        .map_err(|_| ReportError::TaskFailed("semaphore closed".to_string()))?;
    let outcome = LookupOutcome::classify(source.latest_commit_date(&full_name).await);
    Ok((index, outcome))
}

/// Fill in `last_commit_date` for every record.
///
/// At most `concurrency` lookups run at once. Records come back in input
/// order. The first fatal lookup aborts the stage; dropping the task set
/// cancels whatever is still running.
///
/// Returns the enriched records and how many of them stayed undated.
pub async fn enrich_repos<S: RepoSource + Clone + 'static>(
    source: &S,
    repos: Vec<RepoRecord>,
    concurrency: usize,
    on_progress: Option<&ProgressCallback>,
) -> Result<(Vec<RepoRecord>, usize)> {
    if repos.is_empty() {
        emit(
            on_progress,
            ReportProgress::EnrichmentComplete {
                dated: 0,
                undated: 0,
            },
        );
        return Ok((repos, 0));
    }

    let concurrency = concurrency.clamp(1, repos.len());
    let semaphore = Arc::new(Semaphore::new(concurrency));

    emit(
        on_progress,
        ReportProgress::EnrichingRepos {
            count: repos.len(),
            concurrency,
        },
    );

    let mut join_set: JoinSet<Result<(usize, LookupOutcome)>> = JoinSet::new();
    for (index, repo) in repos.iter().enumerate() {
        join_set.spawn(lookup_with_permit(
            source.clone(),
            Arc::clone(&semaphore),
            index,
            repo.full_name.clone(),
        ));
    }

    let mut dates: Vec<Option<DateTime<Utc>>> = vec![None; repos.len()];
    let mut dated = 0usize;
    let mut undated = 0usize;

    while let Some(joined) = join_set.join_next().await {
        let (index, outcome) = joined.map_err(|e| ReportError::TaskFailed(e.to_string()))??;
        let full_name = &repos[index].full_name;

        match outcome {
            LookupOutcome::Dated(date) => {
                dated += 1;
                dates[index] = Some(date);
            }
            LookupOutcome::Undated(reason) => {
                undated += 1;
                if let Some(err) = reason {
                    tracing::debug!(
                        repo = %full_name,
                        error = %err,
                        "Commit lookup returned client error"
                    );
                    emit(
                        on_progress,
                        ReportProgress::CommitLookupSkipped {
                            full_name: full_name.clone(),
                            reason: short_error_message(&err),
                        },
                    );
                }
            }
            LookupOutcome::Fatal(source) => {
                return Err(ReportError::EnrichmentFailure {
                    repo: full_name.clone(),
                    source,
                });
            }
        }

        emit(
            on_progress,
            ReportProgress::EnrichedRepo {
                full_name: full_name.clone(),
                last_commit_date: dates[index],
            },
        );
    }

    emit(
        on_progress,
        ReportProgress::EnrichmentComplete { dated, undated },
    );

    let enriched = repos
        .into_iter()
        .zip(dates)
        .map(|(mut repo, date)| {
            repo.last_commit_date = date;
            repo
        })
        .collect();

    Ok((enriched, undated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpError;

    fn api(status: u16) -> GitHubError {
        GitHubError::Api {
            status,
            message: "x".to_string(),
        }
    }

    #[test]
    fn test_classify_success() {
        let date = DateTime::from_timestamp(1_700_000_000, 0).expect("timestamp");
        assert!(matches!(
            LookupOutcome::classify(Ok(Some(date))),
            LookupOutcome::Dated(d) if d == date
        ));
        assert!(matches!(
            LookupOutcome::classify(Ok(None)),
            LookupOutcome::Undated(None)
        ));
    }

    #[test]
    fn test_classify_client_errors_are_soft() {
        for status in [401, 403, 404, 409, 422, 451] {
            assert!(
                matches!(
                    LookupOutcome::classify(Err(api(status))),
                    LookupOutcome::Undated(Some(_))
                ),
                "status {status}"
            );
        }
    }

    #[test]
    fn test_classify_server_and_transport_errors_are_fatal() {
        for status in [304, 500, 502, 503, 504] {
            assert!(matches!(
                LookupOutcome::classify(Err(api(status))),
                LookupOutcome::Fatal(_)
            ));
        }
        assert!(matches!(
            LookupOutcome::classify(Err(GitHubError::Http(HttpError::Transport(
                "reset".to_string()
            )))),
            LookupOutcome::Fatal(_)
        ));
        let json_err = serde_json::from_str::<Vec<u8>>("nope").expect_err("invalid json");
        assert!(matches!(
            LookupOutcome::classify(Err(GitHubError::Json(json_err))),
            LookupOutcome::Fatal(_)
        ));
    }
}
