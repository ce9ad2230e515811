//! Post feed, detail and authoring endpoints.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blogicum_core::domain::PostDraft;
use blogicum_shared::dto::{PageQuery, PostDetailResponse, PostRequest};

use super::{respond, views};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn draft(req: PostRequest) -> PostDraft {
    PostDraft {
        title: req.title,
        text: req.text,
        pub_date: req.pub_date,
        category_id: req.category_id,
        location_id: req.location_id,
        image: req.image,
        is_published: req.is_published,
    }
}

/// GET /
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state.blog.global_feed(query.number()).await?;
    Ok(HttpResponse::Ok().json(views::page(page)))
}

/// POST /posts/create/
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .blog
        .create_post(identity.user_id, draft(body.into_inner()))
        .await?;
    Ok(respond::saved(outcome, views::post_record))
}

/// GET /posts/{id}/
pub async fn detail(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let detail = state
        .blog
        .post_detail(path.into_inner(), &identity.viewer())
        .await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: views::post(detail.summary),
        comments: detail
            .comments
            .into_iter()
            .map(views::comment_with_author)
            .collect(),
    }))
}

/// GET /posts/{id}/edit/ and GET /posts/{id}/delete/
pub async fn owned(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .blog
        .owned_post(&identity.viewer(), path.into_inner())
        .await?;
    Ok(respond::context(outcome, views::post))
}

/// POST /posts/{id}/edit/
pub async fn update(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .blog
        .update_post(&identity.viewer(), path.into_inner(), draft(body.into_inner()))
        .await?;
    Ok(respond::saved(outcome, views::post_record))
}

/// POST /posts/{id}/delete/
pub async fn delete(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .blog
        .delete_post(&identity.viewer(), path.into_inner())
        .await?;
    Ok(respond::redirect(outcome))
}
