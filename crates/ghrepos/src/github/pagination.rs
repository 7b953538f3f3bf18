//! Page-number pagination for list endpoints.
//!
//! GitHub list endpoints take `page` and `per_page` query parameters. A page
//! holding fewer than `per_page` items is the last one. `Link` headers are not
//! consulted, so a listing whose size is an exact multiple of `per_page` ends
//! with one extra request that returns no items.

use crate::repo::RepoRecord;
use crate::source::RepoSource;

use super::error::GitHubError;

/// Page size used for listing requests.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Largest `per_page` GitHub honours. Larger values are served 100 at a time.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Position in a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// 1-indexed page number.
    pub page: u32,
    pub per_page: u32,
}

impl PageCursor {
    /// The first page. `per_page` is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn first(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// The cursor for the following page.
    #[must_use]
    pub fn advance(self) -> Self {
        Self {
            page: self.page + 1,
            ..self
        }
    }

    /// Decide what follows a page that returned `count` items: the next
    /// cursor, or `None` when this was the final page.
    pub fn after(self, count: usize) -> Option<Self> {
        if count < self.per_page as usize {
            None
        } else {
            Some(self.advance())
        }
    }
}

/// One fetched page.
#[derive(Debug)]
pub struct Page {
    pub cursor: PageCursor,
    pub items: Vec<RepoRecord>,
}

/// A failed page request.
#[derive(Debug)]
pub struct PageError {
    pub page: u32,
    pub source: GitHubError,
}

#[derive(Debug, Clone, Copy)]
enum PagerState {
    Pending(PageCursor),
    Exhausted,
}

/// Lazily walks an organization's repository listing.
///
/// Each call to [`Paginator::next_page`] issues exactly one request. The
/// sequence is finite and cannot be restarted: after the short page, or after
/// an error, every further call returns `None`.
pub struct Paginator<'a, S: RepoSource + ?Sized> {
    source: &'a S,
    org: &'a str,
    state: PagerState,
}

impl<'a, S: RepoSource + ?Sized> Paginator<'a, S> {
    pub fn new(source: &'a S, org: &'a str, per_page: u32) -> Self {
        Self {
            source,
            org,
            state: PagerState::Pending(PageCursor::first(per_page)),
        }
    }

    /// Whether another request remains to be made.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, PagerState::Exhausted)
    }

    /// Fetch the next page, or `None` once the listing is exhausted.
    pub async fn next_page(&mut self) -> Option<Result<Page, PageError>> {
        let PagerState::Pending(cursor) = self.state else {
            return None;
        };

        match self.source.list_org_repos_page(self.org, cursor).await {
            Ok(items) => {
                self.state = match cursor.after(items.len()) {
                    Some(next) => PagerState::Pending(next),
                    None => PagerState::Exhausted,
                };
                Some(Ok(Page { cursor, items }))
            }
            Err(source) => {
                self.state = PagerState::Exhausted;
                Some(Err(PageError {
                    page: cursor.page,
                    source,
                }))
            }
        }
    }
}
