use std::cmp::Ordering;
use std::sync::LazyLock;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};

use crate::repo::RepoRecord;

/// Root-locale collator with compiled data. `None` only if the baked data
/// fails to load, in which case names compare byte-wise.
static ROOT_COLLATOR: LazyLock<Option<CollatorBorrowed<'static>>> = LazyLock::new(|| {
    Collator::try_new(Default::default(), CollatorOptions::default())
        .inspect_err(|e| tracing::warn!("Failed to load root collator: {}", e))
        .ok()
});

/// Compare repository names with root-locale collation.
///
/// Punctuation sorts before digits and letters, and lowercase before
/// uppercase on case-only differences. Names the collator considers equal
/// fall back to a byte-wise compare so the order is total.
pub fn compare_full_names(a: &str, b: &str) -> Ordering {
    ROOT_COLLATOR
        .as_ref()
        .map_or(Ordering::Equal, |collator| collator.compare(a, b))
        .then_with(|| a.cmp(b))
}

/// Sort records ascending by full name.
pub fn sort_repos(repos: &mut [RepoRecord]) {
    repos.sort_by(|a, b| compare_full_names(&a.full_name, &b.full_name));
}
