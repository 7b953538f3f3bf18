//! GitHub API data types.
//!
//! Only the fields the report reads are modelled; serde ignores the rest.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Default GitHub REST API base URL.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// One element of `GET /orgs/{org}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRepository {
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One element of `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCommitEntry {
    pub commit: ApiCommit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCommit {
    #[serde(default)]
    pub committer: Option<ApiSignature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSignature {
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl ApiCommitEntry {
    /// The committer timestamp, when GitHub reports one.
    pub fn committer_date(&self) -> Option<DateTime<Utc>> {
        self.commit.committer.as_ref().and_then(|c| c.date)
    }
}

/// Rate limit state from `x-ratelimit-*` response headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Maximum requests allowed per period.
    pub limit: usize,
    /// Remaining requests in current period.
    pub remaining: usize,
    /// When the rate limit resets.
    pub reset_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_ignores_unknown_fields_and_nulls() {
        let json = serde_json::json!({
            "id": 1,
            "name": "cargo",
            "full_name": "rust-lang/cargo",
            "html_url": "https://github.com/rust-lang/cargo",
            "private": false,
            "fork": true,
            "language": null,
            "description": null,
            "stargazers_count": 12000
        });
        let repo: ApiRepository = serde_json::from_value(json).expect("repository");
        assert_eq!(repo.full_name, "rust-lang/cargo");
        assert!(repo.fork);
        assert!(!repo.private);
        assert!(repo.language.is_none());
        assert!(repo.description.is_none());
    }

    #[test]
    fn test_commit_committer_date() {
        let json = serde_json::json!([{
            "sha": "abc",
            "commit": {
                "author": { "name": "a", "date": "2023-05-01T10:00:00Z" },
                "committer": { "name": "c", "date": "2023-05-02T11:12:13Z" },
                "message": "fix"
            }
        }]);
        let commits: Vec<ApiCommitEntry> = serde_json::from_value(json).expect("commits");
        let date = commits[0].committer_date().expect("date");
        assert_eq!(date.to_rfc3339(), "2023-05-02T11:12:13+00:00");
    }

    #[test]
    fn test_commit_without_committer() {
        let json = serde_json::json!([{ "commit": { "committer": null } }]);
        let commits: Vec<ApiCommitEntry> = serde_json::from_value(json).expect("commits");
        assert!(commits[0].committer_date().is_none());
    }
}
