//! ghrepos - An inventory of GitHub organization repositories.
//!
//! Lists every repository of one or more organizations, keeps the ones that
//! match an inclusion set, looks up each one's last commit date and produces a
//! CSV report sorted by repository name.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//!
//! use ghrepos::credentials::TokenSources;
//! use ghrepos::github::{GITHUB_API_URL, GitHubClient};
//! use ghrepos::report::{ReportOptions, run_report, write_report};
//!
//! let (token, _) = TokenSources::from_env(None, None).resolve()?;
//! let client = GitHubClient::new(GITHUB_API_URL, &token, Duration::from_secs(30))?;
//! let report = run_report(&client, &ReportOptions::new(["rust-lang"]), None).await?;
//! write_report("github-repos.csv", &report.records)?;
//! ```

pub mod credentials;
pub mod error;
pub mod github;
pub mod http;
pub mod repo;
pub mod report;
pub mod source;

pub use credentials::{Credential, TokenSource, TokenSources};
pub use error::{ReportError, Result};
pub use repo::{RepoRecord, Visibility};
pub use source::RepoSource;
