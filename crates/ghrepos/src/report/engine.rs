//! The report pipeline.
//!
//! Organizations are listed one after another, the combined listing is
//! filtered, surviving records are enriched with their last commit date under
//! a concurrency cap, and the result is sorted by full name.
//!
//! Any fatal error unwinds the whole run. Nothing is written by this module.
//!
//! ```ignore
//! use ghrepos::report::{ReportOptions, run_report};
//!
//! let options = ReportOptions::new(["rust-lang", "tokio-rs"]);
//! let report = run_report(&client, &options, Some(&progress)).await?;
//! ghrepos::report::write_report("github-repos.csv", &report.records)?;
//! ```

mod enrich;
mod fetch;
mod filter;
mod order;

use crate::error::Result;
use crate::source::RepoSource;

use super::progress::{ProgressCallback, ReportProgress, emit};
use super::types::{Report, ReportOptions};

pub use enrich::enrich_repos;
pub use fetch::{fetch_org_repos, fetch_orgs};
pub use filter::filter_repos;
pub use order::{compare_full_names, sort_repos};

/// Build a report: fetch, filter, enrich, order.
pub async fn run_report<S: RepoSource + Clone + 'static>(
    source: &S,
    options: &ReportOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<Report> {
    let listed = fetch_orgs(source, &options.orgs, options.page_size, on_progress).await?;
    let fetched = listed.len();

    let filtered = filter_repos(listed, &options.include);
    tracing::info!(
        matched = filtered.len(),
        total = fetched,
        include = %options.include,
        "Filtered repositories"
    );
    emit(
        on_progress,
        ReportProgress::FilterComplete {
            matched: filtered.len(),
            total: fetched,
        },
    );

    let (mut records, undated) =
        enrich_repos(source, filtered, options.concurrency, on_progress).await?;

    sort_repos(&mut records);

    Ok(Report {
        records,
        fetched,
        undated,
    })
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::*;
    use crate::repo::{RepoRecord, Visibility};
    use crate::report::types::{IncludeTag, InclusionSet};

    fn record(full_name: &str, private: bool, fork: bool) -> RepoRecord {
        RepoRecord {
            full_name: full_name.to_string(),
            html_url: format!("https://github.com/{full_name}"),
            visibility: Visibility::from_private_flag(private),
            is_fork: fork,
            language: None,
            description: None,
            last_commit_date: None,
        }
    }

    fn names(repos: &[RepoRecord]) -> Vec<&str> {
        repos.iter().map(|r| r.full_name.as_str()).collect()
    }

    fn sample() -> Vec<RepoRecord> {
        vec![
            record("acme/pub-src", false, false),
            record("acme/pub-fork", false, true),
            record("acme/priv-src", true, false),
            record("acme/priv-fork", true, true),
        ]
    }

    #[test]
    fn test_filter_default_drops_forks() {
        let kept = filter_repos(sample(), &InclusionSet::default());
        assert_eq!(names(&kept), vec!["acme/pub-src", "acme/priv-src"]);
    }

    #[test]
    fn test_filter_matches_predicate_for_every_tag_subset() {
        for mask in 0u8..16 {
            let set = InclusionSet::new(
                IncludeTag::ALL
                    .into_iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, tag)| tag),
            );

            let kept = filter_repos(sample(), &set);
            let expected: Vec<RepoRecord> = sample()
                .into_iter()
                .filter(|r| {
                    let fork_tag = if r.is_fork { "fork" } else { "nonfork" };
                    let vis_tag = if r.is_private() { "private" } else { "public" };
                    set.iter().any(|t| t.as_str() == fork_tag)
                        && set.iter().any(|t| t.as_str() == vis_tag)
                })
                .collect();
            assert_eq!(kept, expected, "set {set}");
        }
    }

    #[test]
    fn test_filter_empty_set_keeps_nothing() {
        assert!(filter_repos(sample(), &InclusionSet::new(Vec::<IncludeTag>::new())).is_empty());
    }

    #[test]
    fn test_compare_full_names_ignores_case_first() {
        assert_eq!(compare_full_names("acme/Beta", "acme/alpha"), Ordering::Greater);
        assert_eq!(compare_full_names("Acme/alpha", "acme/beta"), Ordering::Less);
        assert_eq!(compare_full_names("acme/x", "acme/x"), Ordering::Equal);
    }

    #[test]
    fn test_compare_full_names_total_on_case_variants() {
        assert_ne!(compare_full_names("acme/Repo", "acme/repo"), Ordering::Equal);
        assert_eq!(
            compare_full_names("acme/Repo", "acme/repo"),
            compare_full_names("acme/repo", "acme/Repo").reverse()
        );
    }

    #[test]
    fn test_compare_full_names_follows_root_collation() {
        let mut names = vec![
            "acme/Widgets",
            "acme/widgets",
            "acme/a_1",
            "acme/a1",
            "acme/a-b",
            "acme/a_b",
            "acme/ab",
            "acme/a.b",
        ];
        names.sort_by(|a, b| compare_full_names(a, b));
        assert_eq!(
            names,
            vec![
                "acme/a_1",
                "acme/a_b",
                "acme/a-b",
                "acme/a.b",
                "acme/a1",
                "acme/ab",
                "acme/widgets",
                "acme/Widgets",
            ]
        );
        assert_eq!(compare_full_names("acme/a_b", "acme/a-b"), Ordering::Less);
    }

    #[test]
    fn test_sort_repos_is_idempotent() {
        let mut repos = vec![
            record("globex/zeta", false, false),
            record("acme/Widgets", false, false),
            record("acme/anvil", false, false),
            record("acme/widgets", false, false),
            record("Acme/rockets", false, false),
        ];
        sort_repos(&mut repos);
        let once = repos.clone();
        sort_repos(&mut repos);
        assert_eq!(repos, once);
        assert_eq!(
            names(&repos),
            vec![
                "acme/anvil",
                "Acme/rockets",
                "acme/widgets",
                "acme/Widgets",
                "globex/zeta"
            ]
        );
    }
}
