//! Feed queries - one configurable listing for the global, category and profile feeds.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Comment, Location, Post, User};
use crate::error::DomainError;
use crate::viewer::Viewer;
use crate::visibility::Visibility;

/// Which posts a feed is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedScope {
    All,
    Category(Uuid),
    Author(Uuid),
}

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page,
            per_page: per_page.max(1),
        }
    }

    /// Zero-based index of the requested page.
    pub fn index(&self) -> u64 {
        self.page.saturating_sub(1)
    }

    pub fn offset(&self) -> u64 {
        self.index().saturating_mul(self.per_page)
    }

    /// True when the page cannot contain any of `total_items` rows.
    pub fn is_past_end(&self, total_items: u64) -> bool {
        self.page == 0 || self.offset() >= total_items
    }
}

/// A listing query: scope, visibility mode, reference time and page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedQuery {
    pub scope: FeedScope,
    pub visibility: Visibility,
    pub now: DateTime<Utc>,
    pub page: PageRequest,
}

impl FeedQuery {
    /// Everything visible to the public.
    pub fn global(now: DateTime<Utc>, page: PageRequest) -> Self {
        Self {
            scope: FeedScope::All,
            visibility: Visibility::Public,
            now,
            page,
        }
    }

    /// Posts of an already-resolved, published category.
    pub fn category(category_id: Uuid, now: DateTime<Utc>, page: PageRequest) -> Self {
        Self {
            scope: FeedScope::Category(category_id),
            visibility: Visibility::CategoryListing,
            now,
            page,
        }
    }

    /// Posts of `author_id`; unrestricted when the author looks at their own profile.
    pub fn profile(
        author_id: Uuid,
        viewer: &Viewer,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Self {
        let visibility = if viewer.is(author_id) {
            Visibility::Unrestricted
        } else {
            Visibility::Public
        };
        Self {
            scope: FeedScope::Author(author_id),
            visibility,
            now,
            page,
        }
    }

    /// Whether `post` belongs to this feed's scope.
    pub fn in_scope(&self, post: &Post) -> bool {
        match self.scope {
            FeedScope::All => true,
            FeedScope::Category(id) => post.category_id == Some(id),
            FeedScope::Author(id) => post.author_id == id,
        }
    }
}

/// One page of results plus the totals needed for navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.page,
            per_page: request.per_page,
            total_items,
            total_pages: total_items.div_ceil(request.per_page),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Page 1 always exists; any other page must fall within the results.
    pub fn ensure_exists(self) -> Result<Self, DomainError> {
        if self.page == 0 || (self.page > 1 && self.page > self.total_pages) {
            return Err(DomainError::not_found("page", self.page));
        }
        Ok(self)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// A post with its related records and comment count, as shown in feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub post: Post,
    pub author: User,
    pub category: Option<Category>,
    pub location: Option<Location>,
    pub comment_count: u64,
}

/// A comment together with its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: User,
}

/// The post detail page: the post and its comments, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetail {
    pub summary: PostSummary,
    pub comments: Vec<CommentWithAuthor>,
}

/// A category feed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFeed {
    pub category: Category,
    pub posts: Page<PostSummary>,
}

/// A profile feed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFeed {
    pub profile: User,
    pub posts: Page<PostSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_totals() {
        let page = Page::new(vec![1, 2, 3], PageRequest::new(1, 3), 7);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_empty_first_page_exists() {
        let page: Page<u8> = Page::new(vec![], PageRequest::new(1, 10), 0);
        assert!(page.ensure_exists().is_ok());
    }

    #[test]
    fn test_out_of_range_page_is_not_found() {
        let past_end: Page<u8> = Page::new(vec![], PageRequest::new(3, 10), 15);
        assert!(matches!(
            past_end.ensure_exists(),
            Err(DomainError::NotFound { .. })
        ));

        let zero: Page<u8> = Page::new(vec![], PageRequest::new(0, 10), 15);
        assert!(zero.ensure_exists().is_err());
    }

    #[test]
    fn test_huge_page_offset_saturates() {
        let request = PageRequest::new(u64::MAX, 10);
        assert_eq!(request.offset(), u64::MAX);
        assert!(request.is_past_end(1_000));

        let last = PageRequest::new(2, 10);
        assert_eq!(last.offset(), 10);
        assert!(!last.is_past_end(15));
        assert!(last.is_past_end(10));
        assert!(PageRequest::new(1, 10).is_past_end(0));
    }

    #[test]
    fn test_profile_visibility_depends_on_viewer() {
        let author = Uuid::new_v4();
        let now = Utc::now();
        let page = PageRequest::new(1, 10);

        let own = FeedQuery::profile(author, &Viewer::User(author), now, page);
        let other = FeedQuery::profile(author, &Viewer::Anonymous, now, page);

        assert_eq!(own.visibility, Visibility::Unrestricted);
        assert_eq!(other.visibility, Visibility::Public);
        assert_eq!(own.scope, FeedScope::Author(author));
    }

    #[test]
    fn test_page_request_offset() {
        let request = PageRequest::new(3, 10);
        assert_eq!(request.index(), 2);
        assert_eq!(request.offset(), 20);
        assert_eq!(PageRequest::new(1, 0).per_page, 1);
    }
}
