//! Registration and login.

use actix_web::{HttpResponse, web};

use blogicum_core::service::Registration;
use blogicum_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest};

use super::{respond, views};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /registration/
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let saved = state
        .blog
        .register(Registration {
            username: req.username,
            password: req.password,
            password_confirmation: req.password_confirmation,
        })
        .await?;

    Ok(respond::see_other(&saved.next, Some(views::user(&saved.record))))
}

/// POST /auth/login/
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user = state.blog.authenticate(&req.username, &req.password).await?;

    let token = state
        .tokens
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
        user: views::user(&user),
    }))
}
