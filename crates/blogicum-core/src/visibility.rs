//! Visibility policy for posts and categories.
//!
//! Everything here is a pure function of the records, the viewer and the
//! current time, so the same rules back both the in-memory store and the
//! SQL filters built by the PostgreSQL adapter.

use chrono::{DateTime, Utc};

use crate::domain::{Category, Post};
use crate::viewer::Viewer;

/// Which posts a listing admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Published, already dated, and not in an unpublished category.
    Public,
    /// Published and already dated. The category gate is checked separately.
    CategoryListing,
    /// No filtering. Only used for an author looking at their own posts.
    Unrestricted,
}

impl Visibility {
    /// Whether `post` (with its resolved `category`) passes this mode at `now`.
    pub fn admits(&self, post: &Post, category: Option<&Category>, now: DateTime<Utc>) -> bool {
        match self {
            Self::Public => is_publicly_visible(post, category, now),
            Self::CategoryListing => is_released(post, now),
            Self::Unrestricted => true,
        }
    }
}

/// Published and with a publication date that has passed.
pub fn is_released(post: &Post, now: DateTime<Utc>) -> bool {
    post.is_published && post.pub_date <= now
}

/// Visible to someone other than the author.
pub fn is_publicly_visible(post: &Post, category: Option<&Category>, now: DateTime<Utc>) -> bool {
    is_released(post, now) && category.is_none_or(|c| c.is_published)
}

/// Visible to `viewer`. Authors always see their own posts.
pub fn is_visible(
    post: &Post,
    category: Option<&Category>,
    viewer: &Viewer,
    now: DateTime<Utc>,
) -> bool {
    viewer.is(post.author_id) || is_publicly_visible(post, category, now)
}

/// Whether a category feed may be shown at all.
pub fn is_category_listed(category: &Category) -> bool {
    category.is_published
}
