use chrono::Utc;
use uuid::Uuid;

use super::BlogService;
use crate::error::DomainError;
use crate::feed::{CategoryFeed, FeedQuery, Page, PostDetail, PostSummary, ProfileFeed};
use crate::viewer::Viewer;
use crate::visibility;

impl BlogService {
    /// The index page: every publicly visible post.
    pub async fn global_feed(&self, page: u64) -> Result<Page<PostSummary>, DomainError> {
        let query = FeedQuery::global(Utc::now(), self.page(page));
        let posts = self.repos.posts.list(&query).await?;
        posts.ensure_exists()
    }

    /// A single post with its comments. Hidden posts are reported as missing.
    pub async fn post_detail(
        &self,
        post_id: Uuid,
        viewer: &Viewer,
    ) -> Result<PostDetail, DomainError> {
        let summary = self.visible_post(post_id, viewer).await?;
        let comments = self.repos.comments.list_for_post(post_id).await?;
        Ok(PostDetail { summary, comments })
    }

    /// Posts of a published category.
    pub async fn category_feed(&self, slug: &str, page: u64) -> Result<CategoryFeed, DomainError> {
        let category = self
            .repos
            .categories
            .find_by_slug(slug)
            .await?
            .filter(visibility::is_category_listed)
            .ok_or_else(|| DomainError::not_found("category", slug))?;

        let query = FeedQuery::category(category.id, Utc::now(), self.page(page));
        let posts = self.repos.posts.list(&query).await?.ensure_exists()?;
        Ok(CategoryFeed { category, posts })
    }

    /// Posts of one author; the author also sees drafts and scheduled posts.
    pub async fn profile_feed(
        &self,
        username: &str,
        viewer: &Viewer,
        page: u64,
    ) -> Result<ProfileFeed, DomainError> {
        let profile = self
            .repos
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("user", username))?;

        let query = FeedQuery::profile(profile.id, viewer, Utc::now(), self.page(page));
        let posts = self.repos.posts.list(&query).await?.ensure_exists()?;
        Ok(ProfileFeed { profile, posts })
    }

    pub(super) async fn visible_post(
        &self,
        post_id: Uuid,
        viewer: &Viewer,
    ) -> Result<PostSummary, DomainError> {
        let summary = self
            .repos
            .posts
            .find_summary(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))?;

        if !visibility::is_visible(&summary.post, summary.category.as_ref(), viewer, Utc::now()) {
            tracing::debug!(post_id = %post_id, "Post hidden from viewer");
            return Err(DomainError::not_found("post", post_id));
        }
        Ok(summary)
    }
}
