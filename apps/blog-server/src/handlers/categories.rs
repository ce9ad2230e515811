//! Category feed endpoint.

use actix_web::{HttpResponse, web};

use blogicum_shared::dto::{CategoryFeedResponse, PageQuery};

use super::views;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /category/{slug}/
pub async fn category_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let feed = state.blog.category_feed(&path, query.number()).await?;

    Ok(HttpResponse::Ok().json(CategoryFeedResponse {
        category: views::category(&feed.category),
        page: views::page(feed.posts),
    }))
}
