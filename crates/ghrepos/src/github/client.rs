//! GitHub REST client.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use url::Url;

use super::convert::to_repo_record;
use super::error::GitHubError;
use super::pagination::PageCursor;
use super::types::{ApiCommitEntry, ApiRepository, RateLimitInfo};
use crate::credentials::Credential;
use crate::http::{HttpHeaders, HttpRequest, HttpTransport, ReqwestTransport, header_get};
use crate::repo::{RepoRecord, split_full_name};
use crate::source::RepoSource;

/// Media type requested on every call.
const ACCEPT: &str = "application/vnd.github+json";

/// `User-Agent` sent on every call. GitHub rejects requests without one.
const USER_AGENT: &str = "ghrepos";

/// GitHub API client.
///
/// Cheap to clone; clones share the transport and the last observed rate limit.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    api_url: String,
    credential: Arc<Credential>,
    rate_limit: Arc<Mutex<Option<RateLimitInfo>>>,
}

impl GitHubClient {
    /// Create a client backed by reqwest.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let token = Credential::new("ghp_...");
    /// let client = GitHubClient::new(GITHUB_API_URL, &token, Duration::from_secs(30))?;
    /// ```
    pub fn new(
        api_url: &str,
        credential: &Credential,
        timeout: Duration,
    ) -> Result<Self, GitHubError> {
        let transport = ReqwestTransport::with_timeout(timeout)?;
        Ok(Self::new_with_transport(
            api_url,
            credential,
            Arc::new(transport),
        ))
    }

    pub fn new_with_transport(
        api_url: &str,
        credential: &Credential,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            transport,
            api_url: api_url.trim_end_matches('/').to_string(),
            credential: Arc::new(credential.clone()),
            rate_limit: Arc::new(Mutex::new(None)),
        }
    }

    /// Get the API base URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Rate limit state from the most recent response that carried it.
    pub fn last_rate_limit(&self) -> Option<RateLimitInfo> {
        self.rate_limit.lock().ok().and_then(|guard| guard.clone())
    }

    fn update_rate_limit(&self, headers: &HttpHeaders) {
        if let Some(info) = Self::parse_rate_limit_headers(headers)
            && let Ok(mut guard) = self.rate_limit.lock()
        {
            *guard = Some(info);
        }
    }

    /// Extract rate limit info from GitHub response headers.
    fn parse_rate_limit_headers(headers: &HttpHeaders) -> Option<RateLimitInfo> {
        let limit = header_get(headers, "x-ratelimit-limit")?
            .parse::<usize>()
            .ok()?;
        let remaining = header_get(headers, "x-ratelimit-remaining")?
            .parse::<usize>()
            .ok()?;
        let reset_epoch = header_get(headers, "x-ratelimit-reset")?
            .parse::<i64>()
            .ok()?;
        let reset_at = DateTime::from_timestamp(reset_epoch, 0).unwrap_or_else(Utc::now);
        Some(RateLimitInfo {
            limit,
            remaining,
            reset_at,
        })
    }

    /// Build `{api_url}/{segments...}?{query...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url, GitHubError> {
        let mut url =
            Url::parse(&self.api_url).map_err(|_| GitHubError::InvalidUrl(self.api_url.clone()))?;
        url.path_segments_mut()
            .map_err(|_| GitHubError::InvalidUrl(self.api_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Make an authenticated GET request and decode the JSON body.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, GitHubError> {
        let request = HttpRequest::get(url.as_str())
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT)
            .header(
                "Authorization",
                format!("Bearer {}", self.credential.expose()),
            );

        tracing::debug!(url = %url, "GET");
        let response = self.transport.send(request).await?;

        self.update_rate_limit(&response.headers);

        if !response.is_success() {
            return Err(GitHubError::Api {
                status: response.status,
                message: api_error_message(&response.body),
            });
        }

        serde_json::from_slice(&response.body).map_err(GitHubError::Json)
    }

    /// Fetch one page of `GET /orgs/{org}/repos`.
    pub async fn list_org_repos(
        &self,
        org: &str,
        cursor: PageCursor,
    ) -> Result<Vec<ApiRepository>, GitHubError> {
        let url = self.endpoint(
            &["orgs", org, "repos"],
            &[
                ("per_page", cursor.per_page.to_string()),
                ("page", cursor.page.to_string()),
            ],
        )?;
        self.get(url).await
    }

    /// Fetch the newest entry of `GET /repos/{owner}/{repo}/commits`.
    pub async fn latest_commit(
        &self,
        full_name: &str,
    ) -> Result<Option<ApiCommitEntry>, GitHubError> {
        let (owner, name) = split_full_name(full_name)
            .ok_or_else(|| GitHubError::InvalidUrl(full_name.to_string()))?;
        let url = self.endpoint(
            &["repos", owner, name, "commits"],
            &[("per_page", "1".to_string())],
        )?;
        let commits: Vec<ApiCommitEntry> = self.get(url).await?;
        Ok(commits.into_iter().next())
    }
}

/// GitHub error bodies are `{"message": "..."}`; fall back to the raw text.
fn api_error_message(body: &[u8]) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    }
}

#[async_trait]
impl RepoSource for GitHubClient {
    async fn list_org_repos_page(
        &self,
        org: &str,
        cursor: PageCursor,
    ) -> Result<Vec<RepoRecord>, GitHubError> {
        let repos = self.list_org_repos(org, cursor).await?;
        Ok(repos.iter().map(to_repo_record).collect())
    }

    async fn latest_commit_date(
        &self,
        full_name: &str,
    ) -> Result<Option<DateTime<Utc>>, GitHubError> {
        Ok(self
            .latest_commit(full_name)
            .await?
            .and_then(|entry| entry.committer_date()))
    }
}
