//! Report options, inclusion tags and the run summary.

use std::collections::BTreeSet;

use crate::github::DEFAULT_PAGE_SIZE;
use crate::repo::{RepoRecord, Visibility};

/// Maximum number of commit lookups in flight at once.
pub const DEFAULT_ENRICH_CONCURRENCY: usize = 5;

/// One symbolic tag of an [`InclusionSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IncludeTag {
    Public,
    Private,
    Fork,
    Nonfork,
}

impl IncludeTag {
    pub const ALL: [IncludeTag; 4] = [Self::Public, Self::Private, Self::Fork, Self::Nonfork];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Fork => "fork",
            Self::Nonfork => "nonfork",
        }
    }

    /// The visibility tag a repository carries.
    pub fn for_visibility(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Public => Self::Public,
            Visibility::Private => Self::Private,
        }
    }

    /// The fork-status tag a repository carries.
    pub fn for_fork(is_fork: bool) -> Self {
        if is_fork { Self::Fork } else { Self::Nonfork }
    }
}

impl std::fmt::Display for IncludeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IncludeTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| format!("unknown include tag '{s}'"))
    }
}

/// Which repositories the report keeps.
///
/// A repository passes when both its visibility tag and its fork-status tag
/// are members. Built once from arguments and never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionSet {
    tags: BTreeSet<IncludeTag>,
}

impl InclusionSet {
    pub fn new(tags: impl IntoIterator<Item = IncludeTag>) -> Self {
        Self {
            tags: tags.into_iter().collect(),
        }
    }

    pub fn contains(&self, tag: IncludeTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Whether `repo` satisfies the inclusion predicate.
    pub fn admits(&self, repo: &RepoRecord) -> bool {
        self.contains(IncludeTag::for_fork(repo.is_fork))
            && self.contains(IncludeTag::for_visibility(repo.visibility))
    }

    pub fn iter(&self) -> impl Iterator<Item = IncludeTag> + '_ {
        self.tags.iter().copied()
    }
}

impl Default for InclusionSet {
    /// `{public, private, nonfork}`: everything except forks.
    fn default() -> Self {
        Self::new([IncludeTag::Public, IncludeTag::Private, IncludeTag::Nonfork])
    }
}

impl std::fmt::Display for InclusionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tags: Vec<&str> = self.iter().map(IncludeTag::as_str).collect();
        f.write_str(&tags.join(","))
    }
}

/// Options for a report run.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Organizations to list, in the order they are traversed.
    pub orgs: Vec<String>,
    pub include: InclusionSet,
    /// Items requested per listing page.
    pub page_size: u32,
    /// Commit lookups allowed in flight at once.
    pub concurrency: usize,
}

impl ReportOptions {
    /// Options for `orgs` with the default inclusion set and limits.
    pub fn new(orgs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            orgs: orgs.into_iter().map(Into::into).collect(),
            include: InclusionSet::default(),
            page_size: DEFAULT_PAGE_SIZE,
            concurrency: DEFAULT_ENRICH_CONCURRENCY,
        }
    }
}

/// Result of a completed report run.
#[derive(Debug, Default)]
pub struct Report {
    /// Filtered, enriched records sorted by full name.
    pub records: Vec<RepoRecord>,
    /// Repositories listed across all organizations, before filtering.
    pub fetched: usize,
    /// Records left without a last commit date.
    pub undated: usize,
}
