//! Comment endpoints, always addressed through their post.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blogicum_shared::dto::CommentRequest;

use super::{respond, views};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /posts/{id}/comment/
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .blog
        .create_comment(identity.user_id, path.into_inner(), body.into_inner().text)
        .await?;
    Ok(respond::saved(outcome, views::comment))
}

/// GET /posts/{id}/comment/{cid}/edit/ and GET /posts/{id}/comment/{cid}/delete/
pub async fn owned(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let outcome = state
        .blog
        .owned_comment(&identity.viewer(), post_id, comment_id)
        .await?;
    Ok(respond::context(outcome, views::comment))
}

/// POST /posts/{id}/comment/{cid}/edit/
pub async fn update(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let outcome = state
        .blog
        .update_comment(&identity.viewer(), post_id, comment_id, body.into_inner().text)
        .await?;
    Ok(respond::saved(outcome, views::comment))
}

/// POST /posts/{id}/comment/{cid}/delete/
pub async fn delete(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let outcome = state
        .blog
        .delete_comment(&identity.viewer(), post_id, comment_id)
        .await?;
    Ok(respond::redirect(outcome))
}
