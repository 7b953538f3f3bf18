use crate::repo::RepoRecord;

use super::super::types::InclusionSet;

/// Keep the records admitted by `include`, preserving their order.
pub fn filter_repos(repos: Vec<RepoRecord>, include: &InclusionSet) -> Vec<RepoRecord> {
    repos.into_iter().filter(|repo| include.admits(repo)).collect()
}
