//! The repository record carried through the report pipeline.

use chrono::{DateTime, Utc};

/// Repository visibility as reported by GitHub.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    pub fn from_private_flag(private: bool) -> Self {
        if private { Self::Private } else { Self::Public }
    }

    pub fn is_private(self) -> bool {
        matches!(self, Self::Private)
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// One row of the report.
///
/// Built from the organization listing; `last_commit_date` is filled in
/// exactly once by the enrichment stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRecord {
    /// `owner/name`, the sort key.
    pub full_name: String,
    /// Canonical web URL.
    pub html_url: String,
    pub visibility: Visibility,
    pub is_fork: bool,
    /// Primary language.
    pub language: Option<String>,
    pub description: Option<String>,
    /// Committer date of the newest commit; `None` when unknown.
    pub last_commit_date: Option<DateTime<Utc>>,
}

impl RepoRecord {
    #[inline]
    pub fn is_private(&self) -> bool {
        self.visibility.is_private()
    }

}

/// Split an `owner/name` string on its first slash.
pub fn split_full_name(full_name: &str) -> Option<(&str, &str)> {
    full_name.split_once('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(full_name: &str) -> RepoRecord {
        RepoRecord {
            full_name: full_name.to_string(),
            html_url: format!("https://github.com/{full_name}"),
            visibility: Visibility::Public,
            is_fork: false,
            language: None,
            description: None,
            last_commit_date: None,
        }
    }

    #[test]
    fn default_visibility_is_public() {
        assert_eq!(Visibility::default(), Visibility::Public);
    }

    #[test]
    fn visibility_from_flag_and_display() {
        assert_eq!(Visibility::from_private_flag(true), Visibility::Private);
        assert_eq!(Visibility::from_private_flag(false), Visibility::Public);
        assert_eq!(Visibility::Private.to_string(), "private");
        assert_eq!(Visibility::Public.to_string(), "public");
    }

    #[test]
    fn split_full_name_on_first_slash() {
        assert_eq!(
            split_full_name(&record("rust-lang/cargo").full_name),
            Some(("rust-lang", "cargo"))
        );
        assert_eq!(split_full_name("a/b/c"), Some(("a", "b/c")));
        assert_eq!(split_full_name("no-slash"), None);
    }
}
