//! GitHub REST API access.
//!
//! # Module Structure
//!
//! - [`error`] - Error type for GitHub API operations
//! - [`types`] - Wire types and rate limit info
//! - [`client`] - Authenticated client and endpoint calls
//! - [`pagination`] - Page cursor and the lazy page walker
//! - [`convert`] - Wire type to report record conversion
//!
//! ```ignore
//! use ghrepos::github::{GitHubClient, GITHUB_API_URL};
//!
//! let client = GitHubClient::new(GITHUB_API_URL, &token, Duration::from_secs(30))?;
//! let report = ghrepos::report::run_report(&client, &options, None).await?;
//! ```

mod client;
mod convert;
mod error;
mod pagination;
mod types;

pub use client::GitHubClient;
pub use convert::to_repo_record;
pub use error::{GitHubError, short_error_message};
pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageCursor, PageError, Paginator};
pub use types::{ApiCommitEntry, ApiRepository, GITHUB_API_URL, RateLimitInfo};
