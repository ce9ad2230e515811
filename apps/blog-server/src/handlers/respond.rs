//! Turning service outcomes into HTTP responses.

use actix_web::{HttpResponse, http::header};
use serde::Serialize;

use blogicum_core::{Outcome, Route, Saved};
use blogicum_shared::RedirectResponse;

/// `303 See Other` to `route`, optionally carrying the written record.
pub fn see_other<T: Serialize>(route: &Route, data: Option<T>) -> HttpResponse {
    let location = route.path();
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.clone()))
        .json(RedirectResponse { location, data })
}

/// A completed write redirects to its next page; a denied one to the fallback.
pub fn saved<T, D: Serialize>(outcome: Outcome<Saved<T>>, view: impl FnOnce(T) -> D) -> HttpResponse {
    match outcome {
        Outcome::Completed(saved) => see_other(&saved.next, Some(view(saved.record))),
        Outcome::Redirected(route) => see_other::<D>(&route, None),
    }
}

/// Deletes carry no record either way.
pub fn redirect(outcome: Outcome<Route>) -> HttpResponse {
    match outcome {
        Outcome::Completed(route) | Outcome::Redirected(route) => see_other::<()>(&route, None),
    }
}

/// Form and confirmation pages: the context, or a redirect for non-owners.
pub fn context<T, D: Serialize>(outcome: Outcome<T>, view: impl FnOnce(T) -> D) -> HttpResponse {
    match outcome {
        Outcome::Completed(record) => HttpResponse::Ok().json(view(record)),
        Outcome::Redirected(route) => see_other::<D>(&route, None),
    }
}
