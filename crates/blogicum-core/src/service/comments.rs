use uuid::Uuid;

use super::BlogService;
use crate::access::{Outcome, Route, Saved, authorize_owner};
use crate::domain::Comment;
use crate::error::DomainError;
use crate::viewer::Viewer;

impl BlogService {
    /// Comment on a post the actor can see.
    pub async fn create_comment(
        &self,
        actor_id: Uuid,
        post_id: Uuid,
        text: String,
    ) -> Result<Outcome<Saved<Comment>>, DomainError> {
        self.user(actor_id).await?;
        self.visible_post(post_id, &Viewer::User(actor_id)).await?;

        let comment = self
            .repos
            .comments
            .save(Comment::new(post_id, actor_id, text)?)
            .await?;
        tracing::info!(comment_id = %comment.id, post_id = %post_id, "Comment created");

        Ok(Outcome::Completed(Saved {
            record: comment,
            next: Route::PostDetail(post_id),
        }))
    }

    /// The comment as shown on its edit or delete page. Owner only.
    pub async fn owned_comment(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Outcome<Comment>, DomainError> {
        let comment = self.find_comment(post_id, comment_id).await?;
        if let Err(route) = authorize_owner(&comment, viewer, Route::PostDetail(post_id)) {
            return Ok(Outcome::Redirected(route));
        }
        Ok(Outcome::Completed(comment))
    }

    pub async fn update_comment(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        comment_id: Uuid,
        text: String,
    ) -> Result<Outcome<Saved<Comment>>, DomainError> {
        let mut comment = self.find_comment(post_id, comment_id).await?;
        if let Err(route) = authorize_owner(&comment, viewer, Route::PostDetail(post_id)) {
            tracing::warn!(comment_id = %comment_id, "Comment edit by non-owner redirected");
            return Ok(Outcome::Redirected(route));
        }

        Comment::validate_text(&text)?;
        comment.text = text;
        let comment = self.repos.comments.save(comment).await?;

        Ok(Outcome::Completed(Saved {
            record: comment,
            next: Route::PostDetail(post_id),
        }))
    }

    pub async fn delete_comment(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Outcome<Route>, DomainError> {
        let comment = self.find_comment(post_id, comment_id).await?;
        if let Err(route) = authorize_owner(&comment, viewer, Route::PostDetail(post_id)) {
            tracing::warn!(comment_id = %comment_id, "Comment delete by non-owner redirected");
            return Ok(Outcome::Redirected(route));
        }

        self.repos.comments.delete(comment_id).await?;
        Ok(Outcome::Completed(Route::PostDetail(post_id)))
    }

    /// A comment addressed through the post it belongs to.
    async fn find_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<Comment, DomainError> {
        self.repos
            .comments
            .find_by_id(comment_id)
            .await?
            .filter(|c| c.post_id == post_id)
            .ok_or_else(|| DomainError::not_found("comment", comment_id))
    }
}
