//! Blog use cases exercised end to end against the in-memory store.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use blogicum_core::domain::{Category, Comment, PostDraft, ProfileUpdate, User};
use blogicum_core::ports::{AuthError, BaseRepository, PasswordService, Repositories};
use blogicum_core::service::Registration;
use blogicum_core::{BlogService, DomainError, Outcome, Route, Viewer};
use blogicum_infra::InMemoryStore;

/// Stores passwords reversed; enough to tell right from wrong.
struct ReversingPasswords;

impl PasswordService for ReversingPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(password.chars().rev().collect())
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(password.chars().rev().collect::<String>() == hash)
    }
}

struct Fixture {
    service: BlogService,
    repos: Repositories,
}

impl Fixture {
    fn new() -> Self {
        let repos = InMemoryStore::new().repositories();
        let service = BlogService::new(repos.clone(), Arc::new(ReversingPasswords), 10);
        Self { service, repos }
    }

    async fn user(&self, username: &str) -> User {
        self.service
            .register(Registration {
                username: username.to_string(),
                password: "password123".to_string(),
                password_confirmation: "password123".to_string(),
            })
            .await
            .unwrap()
            .record
    }

    async fn category(&self, slug: &str, is_published: bool) -> Category {
        let mut category =
            Category::new(slug.to_uppercase(), String::new(), slug.to_string()).unwrap();
        category.is_published = is_published;
        self.repos.categories.save(category).await.unwrap()
    }

    async fn post(&self, author: &User, draft: PostDraft) -> Uuid {
        match self.service.create_post(author.id, draft).await.unwrap() {
            Outcome::Completed(saved) => saved.record.id,
            Outcome::Redirected(route) => panic!("unexpected redirect to {route:?}"),
        }
    }
}

fn draft(title: &str, offset: Duration) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        text: "Text".to_string(),
        pub_date: Utc::now() + offset,
        category_id: None,
        location_id: None,
        image: None,
        is_published: true,
    }
}

#[tokio::test]
async fn future_post_is_visible_only_to_its_author() {
    let fx = Fixture::new();
    let anna = fx.user("anna").await;
    let boris = fx.user("boris").await;
    let post_id = fx.post(&anna, draft("Tomorrow", Duration::days(1))).await;

    let own = fx
        .service
        .profile_feed("anna", &Viewer::User(anna.id), 1)
        .await
        .unwrap();
    assert_eq!(own.posts.items[0].post.id, post_id);

    for viewer in [Viewer::User(boris.id), Viewer::Anonymous] {
        assert!(matches!(
            fx.service.post_detail(post_id, &viewer).await,
            Err(DomainError::NotFound { .. })
        ));
        let others = fx.service.profile_feed("anna", &viewer, 1).await.unwrap();
        assert!(others.posts.items.is_empty());
    }

    let global = fx.service.global_feed(1).await.unwrap();
    assert!(global.items.is_empty());

    assert!(
        fx.service
            .post_detail(post_id, &Viewer::User(anna.id))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn non_owner_edit_redirects_without_mutation() {
    let fx = Fixture::new();
    let anna = fx.user("anna").await;
    let carl = fx.user("carl").await;
    let post_id = fx.post(&anna, draft("Original", -Duration::hours(1))).await;

    for viewer in [Viewer::User(carl.id), Viewer::Anonymous] {
        let outcome = fx
            .service
            .update_post(&viewer, post_id, draft("Hijacked", -Duration::hours(1)))
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Redirected(Route::PostDetail(post_id)));

        let deleted = fx.service.delete_post(&viewer, post_id).await.unwrap();
        assert_eq!(deleted, Outcome::Redirected(Route::PostDetail(post_id)));
    }

    let post = fx.repos.posts.find_by_id(post_id).await.unwrap().unwrap();
    assert_eq!(post.title, "Original");
    assert_eq!(post.author_id, anna.id);
}

#[tokio::test]
async fn owner_can_edit_and_delete() {
    let fx = Fixture::new();
    let anna = fx.user("anna").await;
    let post_id = fx.post(&anna, draft("Original", -Duration::hours(1))).await;
    let viewer = Viewer::User(anna.id);

    let Outcome::Completed(saved) = fx
        .service
        .update_post(&viewer, post_id, draft("Edited", -Duration::hours(1)))
        .await
        .unwrap()
    else {
        panic!("owner edit was redirected");
    };
    assert_eq!(saved.record.title, "Edited");
    assert_eq!(saved.next, Route::PostDetail(post_id));

    let deleted = fx.service.delete_post(&viewer, post_id).await.unwrap();
    assert_eq!(
        deleted,
        Outcome::Completed(Route::Profile("anna".to_string()))
    );
    assert!(fx.repos.posts.find_by_id(post_id).await.unwrap().is_none());
}

#[tokio::test]
async fn unpublished_category_feed_is_not_found() {
    let fx = Fixture::new();
    let anna = fx.user("anna").await;
    let news = fx.category("news", false).await;
    let mut d = draft("In news", -Duration::hours(1));
    d.category_id = Some(news.id);
    fx.post(&anna, d).await;

    assert!(matches!(
        fx.service.category_feed("news", 1).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        fx.service.category_feed("missing", 1).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn category_feed_lists_released_posts() {
    let fx = Fixture::new();
    let anna = fx.user("anna").await;
    let travel = fx.category("travel", true).await;

    let mut live = draft("Live", -Duration::hours(1));
    live.category_id = Some(travel.id);
    let live_id = fx.post(&anna, live).await;
    let mut scheduled = draft("Scheduled", Duration::hours(1));
    scheduled.category_id = Some(travel.id);
    fx.post(&anna, scheduled).await;
    fx.post(&anna, draft("Uncategorised", -Duration::hours(1))).await;

    let feed = fx.service.category_feed("travel", 1).await.unwrap();
    assert_eq!(feed.category.id, travel.id);
    let ids: Vec<Uuid> = feed.posts.items.iter().map(|s| s.post.id).collect();
    assert_eq!(ids, vec![live_id]);
}

#[tokio::test]
async fn comment_counts_and_order() {
    let fx = Fixture::new();
    let anna = fx.user("anna").await;
    let boris = fx.user("boris").await;
    let post_id = fx.post(&anna, draft("Post", -Duration::hours(1))).await;

    for text in ["one", "two"] {
        fx.service
            .create_comment(boris.id, post_id, text.to_string())
            .await
            .unwrap();
    }

    let feed = fx.service.global_feed(1).await.unwrap();
    assert_eq!(feed.items[0].comment_count, 2);

    let detail = fx
        .service
        .post_detail(post_id, &Viewer::Anonymous)
        .await
        .unwrap();
    let texts: Vec<&str> = detail
        .comments
        .iter()
        .map(|c| c.comment.text.as_str())
        .collect();
    assert_eq!(texts, vec!["one", "two"]);
    assert_eq!(detail.summary.comment_count, 2);
}

#[tokio::test]
async fn cannot_comment_on_hidden_post() {
    let fx = Fixture::new();
    let anna = fx.user("anna").await;
    let boris = fx.user("boris").await;
    let post_id = fx.post(&anna, draft("Scheduled", Duration::days(1))).await;

    assert!(matches!(
        fx.service
            .create_comment(boris.id, post_id, "Early".to_string())
            .await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(
        fx.service
            .create_comment(anna.id, post_id, "Note to self".to_string())
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn comment_mutations_are_owner_only() {
    let fx = Fixture::new();
    let anna = fx.user("anna").await;
    let boris = fx.user("boris").await;
    let post_id = fx.post(&anna, draft("Post", -Duration::hours(1))).await;

    let Outcome::Completed(saved) = fx
        .service
        .create_comment(boris.id, post_id, "Mine".to_string())
        .await
        .unwrap()
    else {
        panic!("comment creation was redirected");
    };
    let comment_id = saved.record.id;

    let by_post_author = fx
        .service
        .update_comment(&Viewer::User(anna.id), post_id, comment_id, "Edited".to_string())
        .await
        .unwrap();
    assert_eq!(
        by_post_author,
        Outcome::Redirected(Route::PostDetail(post_id))
    );

    let wrong_post = fx
        .service
        .delete_comment(&Viewer::User(boris.id), Uuid::new_v4(), comment_id)
        .await;
    assert!(matches!(wrong_post, Err(DomainError::NotFound { .. })));

    let edited = fx
        .service
        .update_comment(&Viewer::User(boris.id), post_id, comment_id, "Edited".to_string())
        .await
        .unwrap();
    assert!(matches!(edited, Outcome::Completed(_)));

    let stored: Comment = fx.repos.comments.find_by_id(comment_id).await.unwrap().unwrap();
    assert_eq!(stored.text, "Edited");

    let deleted = fx
        .service
        .delete_comment(&Viewer::User(boris.id), post_id, comment_id)
        .await
        .unwrap();
    assert_eq!(deleted, Outcome::Completed(Route::PostDetail(post_id)));
}

#[tokio::test]
async fn deleting_category_keeps_posts_visible() {
    let fx = Fixture::new();
    let anna = fx.user("anna").await;
    let news = fx.category("news", false).await;
    let mut d = draft("Filed", -Duration::hours(1));
    d.category_id = Some(news.id);
    let post_id = fx.post(&anna, d).await;

    assert!(fx.service.global_feed(1).await.unwrap().items.is_empty());

    fx.repos.categories.delete(news.id).await.unwrap();

    let feed = fx.service.global_feed(1).await.unwrap();
    assert_eq!(feed.items[0].post.id, post_id);
    assert!(feed.items[0].category.is_none());
}

#[tokio::test]
async fn registration_and_login() {
    let fx = Fixture::new();
    let saved = fx
        .service
        .register(Registration {
            username: "anna".to_string(),
            password: "password123".to_string(),
            password_confirmation: "password123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(saved.next, Route::Index);

    let duplicate = fx
        .service
        .register(Registration {
            username: "anna".to_string(),
            password: "password123".to_string(),
            password_confirmation: "password123".to_string(),
        })
        .await;
    assert!(matches!(duplicate, Err(DomainError::Duplicate(_))));

    let mismatch = fx
        .service
        .register(Registration {
            username: "boris".to_string(),
            password: "password123".to_string(),
            password_confirmation: "password321".to_string(),
        })
        .await;
    assert!(matches!(mismatch, Err(DomainError::Validation(_))));

    assert_eq!(
        fx.service
            .authenticate("anna", "password123")
            .await
            .unwrap()
            .id,
        saved.record.id
    );
    assert!(matches!(
        fx.service.authenticate("anna", "wrong").await,
        Err(DomainError::InvalidCredentials)
    ));
    assert!(matches!(
        fx.service.authenticate("nobody", "password123").await,
        Err(DomainError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn profile_edit_targets_only_the_actor() {
    let fx = Fixture::new();
    let anna = fx.user("anna").await;
    fx.user("boris").await;

    let update = |username: &str| ProfileUpdate {
        username: username.to_string(),
        email: "anna@example.com".to_string(),
        first_name: "Anna".to_string(),
        last_name: "K".to_string(),
    };

    assert!(matches!(
        fx.service.edit_profile(anna.id, update("boris")).await,
        Err(DomainError::Duplicate(_))
    ));

    let saved = fx.service.edit_profile(anna.id, update("anya")).await.unwrap();
    assert_eq!(saved.record.id, anna.id);
    assert_eq!(saved.next, Route::Profile("anya".to_string()));
    assert_eq!(
        fx.service.own_profile(anna.id).await.unwrap().first_name,
        "Anna"
    );
}

#[tokio::test]
async fn deleting_user_removes_their_content() {
    let fx = Fixture::new();
    let anna = fx.user("anna").await;
    let boris = fx.user("boris").await;
    let annas = fx.post(&anna, draft("Anna's", -Duration::hours(1))).await;
    let boris_post = fx.post(&boris, draft("Boris'", -Duration::hours(2))).await;
    fx.service
        .create_comment(anna.id, boris_post, "Hello".to_string())
        .await
        .unwrap();

    fx.repos.users.delete(anna.id).await.unwrap();

    let feed = fx.service.global_feed(1).await.unwrap();
    let ids: Vec<Uuid> = feed.items.iter().map(|s| s.post.id).collect();
    assert_eq!(ids, vec![boris_post]);
    assert!(!ids.contains(&annas));
    assert_eq!(feed.items[0].comment_count, 0);
}

#[tokio::test]
async fn page_past_the_end_is_not_found() {
    let fx = Fixture::new();
    let anna = fx.user("anna").await;
    fx.post(&anna, draft("Only", -Duration::hours(1))).await;

    assert!(fx.service.global_feed(1).await.is_ok());
    assert!(matches!(
        fx.service.global_feed(2).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn huge_page_number_is_not_found() {
    let fx = Fixture::new();
    let anna = fx.user("anna").await;
    fx.post(&anna, draft("Only", -Duration::hours(1))).await;

    assert!(matches!(
        fx.service.global_feed(u64::MAX).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        fx.service.profile_feed("anna", &Viewer::User(anna.id), u64::MAX).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn create_post_rejects_unknown_category() {
    let fx = Fixture::new();
    let anna = fx.user("anna").await;
    let mut d = draft("Lost", -Duration::hours(1));
    d.category_id = Some(Uuid::new_v4());

    assert!(matches!(
        fx.service.create_post(anna.id, d).await,
        Err(DomainError::Validation(_))
    ));
}
