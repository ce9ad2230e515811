use uuid::Uuid;

use super::BlogService;
use crate::access::{Outcome, Route, Saved, authorize_owner};
use crate::domain::{Post, PostDraft};
use crate::error::DomainError;
use crate::feed::PostSummary;
use crate::viewer::Viewer;

impl BlogService {
    /// Publish a new post. The author is always the authenticated actor.
    pub async fn create_post(
        &self,
        actor_id: Uuid,
        draft: PostDraft,
    ) -> Result<Outcome<Saved<Post>>, DomainError> {
        let author = self.user(actor_id).await?;
        self.check_references(&draft).await?;

        let post = self.repos.posts.save(Post::new(author.id, draft)?).await?;
        tracing::info!(post_id = %post.id, author = %author.username, "Post created");

        Ok(Outcome::Completed(Saved {
            record: post,
            next: Route::Profile(author.username),
        }))
    }

    /// The post as shown on its edit or delete page. Owner only.
    pub async fn owned_post(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
    ) -> Result<Outcome<PostSummary>, DomainError> {
        let summary = self
            .repos
            .posts
            .find_summary(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))?;

        if let Err(route) = authorize_owner(&summary.post, viewer, Route::PostDetail(post_id)) {
            return Ok(Outcome::Redirected(route));
        }
        Ok(Outcome::Completed(summary))
    }

    pub async fn update_post(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        draft: PostDraft,
    ) -> Result<Outcome<Saved<Post>>, DomainError> {
        let mut post = self.find_post(post_id).await?;
        if let Err(route) = authorize_owner(&post, viewer, Route::PostDetail(post_id)) {
            tracing::warn!(post_id = %post_id, "Post edit by non-owner redirected");
            return Ok(Outcome::Redirected(route));
        }

        self.check_references(&draft).await?;
        post.apply(draft)?;
        let post = self.repos.posts.save(post).await?;

        Ok(Outcome::Completed(Saved {
            record: post,
            next: Route::PostDetail(post_id),
        }))
    }

    /// Delete a post and, by cascade, its comments.
    pub async fn delete_post(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
    ) -> Result<Outcome<Route>, DomainError> {
        let post = self.find_post(post_id).await?;
        if let Err(route) = authorize_owner(&post, viewer, Route::PostDetail(post_id)) {
            tracing::warn!(post_id = %post_id, "Post delete by non-owner redirected");
            return Ok(Outcome::Redirected(route));
        }

        let author = self.user(post.author_id).await?;
        self.repos.posts.delete(post_id).await?;
        tracing::info!(post_id = %post_id, "Post deleted");

        Ok(Outcome::Completed(Route::Profile(author.username)))
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.repos
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))
    }
}
