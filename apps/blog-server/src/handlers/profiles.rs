//! Public profiles and editing one's own.

use actix_web::{HttpResponse, web};

use blogicum_core::domain::ProfileUpdate;
use blogicum_shared::dto::{PageQuery, ProfileFeedResponse, ProfileRequest};

use super::{respond, views};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /profile/{username}/
pub async fn profile(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let feed = state
        .blog
        .profile_feed(&path, &identity.viewer(), query.number())
        .await?;

    Ok(HttpResponse::Ok().json(ProfileFeedResponse {
        profile: views::user(&feed.profile),
        page: views::page(feed.posts),
    }))
}

/// GET /profile/{username}/edit/
///
/// The path segment is ignored; the form always shows the signed-in user.
pub async fn edit_form(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let user = state.blog.own_profile(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(views::profile(&user)))
}

/// POST /profile/{username}/edit/
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let saved = state
        .blog
        .edit_profile(
            identity.user_id,
            ProfileUpdate {
                username: req.username,
                email: req.email,
                first_name: req.first_name,
                last_name: req.last_name,
            },
        )
        .await?;

    Ok(respond::see_other(&saved.next, Some(views::profile(&saved.record))))
}
