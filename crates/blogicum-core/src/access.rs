//! Access control for mutations of owned records.

use uuid::Uuid;

use crate::domain::{Comment, Post};
use crate::viewer::Viewer;

/// A navigational target in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Index,
    PostDetail(Uuid),
    Profile(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Index => "/".to_string(),
            Self::PostDetail(id) => format!("/posts/{id}/"),
            Self::Profile(username) => format!("/profile/{username}/"),
        }
    }
}

/// Result of a guarded operation. A denial is a redirect, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Completed(T),
    Redirected(Route),
}

/// A completed write and where to navigate next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved<T> {
    pub record: T,
    pub next: Route,
}

impl<T> Outcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Completed(value) => Outcome::Completed(f(value)),
            Self::Redirected(route) => Outcome::Redirected(route),
        }
    }
}

/// Records that have a single owning user.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

impl Owned for Post {
    fn owner_id(&self) -> Uuid {
        self.author_id
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> Uuid {
        self.author_id
    }
}

/// Allow only the owner of `record`; everyone else is sent to `fallback`.
pub fn authorize_owner<R: Owned>(record: &R, viewer: &Viewer, fallback: Route) -> Result<(), Route> {
    if viewer.is(record.owner_id()) {
        Ok(())
    } else {
        Err(fallback)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::PostDraft;

    fn post_by(author: Uuid) -> Post {
        Post::new(
            author,
            PostDraft {
                title: "Title".to_string(),
                text: "Text".to_string(),
                pub_date: Utc::now(),
                category_id: None,
                location_id: None,
                image: None,
                is_published: true,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_owner_is_allowed() {
        let author = Uuid::new_v4();
        let post = post_by(author);
        assert!(authorize_owner(&post, &Viewer::User(author), Route::PostDetail(post.id)).is_ok());
    }

    #[test]
    fn test_others_are_redirected() {
        let post = post_by(Uuid::new_v4());
        let fallback = Route::PostDetail(post.id);

        assert_eq!(
            authorize_owner(&post, &Viewer::User(Uuid::new_v4()), fallback.clone()),
            Err(fallback.clone())
        );
        assert_eq!(
            authorize_owner(&post, &Viewer::Anonymous, fallback.clone()),
            Err(fallback)
        );
    }

    #[test]
    fn test_comment_owner() {
        let author = Uuid::new_v4();
        let comment = Comment::new(Uuid::new_v4(), author, "Nice".to_string()).unwrap();
        assert!(authorize_owner(&comment, &Viewer::User(author), Route::Index).is_ok());
    }

    #[test]
    fn test_route_paths() {
        let id = Uuid::nil();
        assert_eq!(Route::Index.path(), "/");
        assert_eq!(
            Route::PostDetail(id).path(),
            "/posts/00000000-0000-0000-0000-000000000000/"
        );
        assert_eq!(Route::Profile("anna".to_string()).path(), "/profile/anna/");
    }
}
