//! HTTP handlers and route configuration.

mod accounts;
mod categories;
mod comments;
mod health;
mod posts;
mod profiles;
mod respond;
mod views;


use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .route("/health", web::get().to(health::health_check))
    .route("/", web::get().to(posts::index))
    .route("/registration/", web::post().to(accounts::register))
    .route("/auth/login/", web::post().to(accounts::login))
    .route("/category/{slug}/", web::get().to(categories::category_posts))
    .service(
        web::scope("/posts")
            .route("/create/", web::post().to(posts::create))
            .route("/{id}/", web::get().to(posts::detail))
            .service(
                web::resource("/{id}/edit/")
                    .route(web::get().to(posts::owned))
                    .route(web::post().to(posts::update)),
            )
            .service(
                web::resource("/{id}/delete/")
                    .route(web::get().to(posts::owned))
                    .route(web::post().to(posts::delete)),
            )
            .route("/{id}/comment/", web::post().to(comments::create))
            .service(
                web::resource("/{id}/comment/{comment_id}/edit/")
                    .route(web::get().to(comments::owned))
                    .route(web::post().to(comments::update)),
            )
            .service(
                web::resource("/{id}/comment/{comment_id}/delete/")
                    .route(web::get().to(comments::owned))
                    .route(web::post().to(comments::delete)),
            ),
    )
    .service(
        web::scope("/profile/{username}")
            .route("/", web::get().to(profiles::profile))
            .service(
                web::resource("/edit/")
                    .route(web::get().to(profiles::edit_form))
                    .route(web::post().to(profiles::update)),
            ),
    );
}
