use super::types::ApiRepository;
use crate::repo::{RepoRecord, Visibility};

/// Convert a listing entry into a report record (not yet enriched).
pub fn to_repo_record(repo: &ApiRepository) -> RepoRecord {
    RepoRecord {
        full_name: repo.full_name.clone(),
        html_url: repo.html_url.clone(),
        visibility: Visibility::from_private_flag(repo.private),
        is_fork: repo.fork,
        language: repo.language.clone(),
        description: repo.description.clone(),
        last_commit_date: None,
    }
}
